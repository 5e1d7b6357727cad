use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::{
    app::{init_config, load_config, load_config_from, ApiConfig, AppState, Config},
    avatar::{FileImagePicker, PipelineOutcome},
    models::UserProfile,
    utils::{ErrorKind, ValidationFailed},
    validation::{ProfileUpdateForm, SignInForm, ValidationEngine},
};

use super::{Cli, Commands, OutputFormat};

/// Handle CLI subcommands. Returns `false` when the command failed and the
/// process should exit non-zero.
pub async fn handle_command(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Init => {
            init()?;
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        command => {
            let config = load_app_config(cli.config.as_ref())?;
            let state = AppState::from_config(config)?;
            run_session_command(&state, command, cli.output_format).await
        }
    }
}

/// Run a command that needs the session store
pub async fn run_session_command(
    state: &AppState,
    command: &Commands,
    format: OutputFormat,
) -> Result<bool> {
    match command {
        Commands::SignIn { email, password } => sign_in(state, email, password, format).await,
        Commands::SignOut => sign_out(state, format).await,
        Commands::Whoami => {
            restore(state).await?;
            Ok(match state.session.profile() {
                Some(profile) => {
                    print_profile(format, &state.config.api, "Signed in", &profile);
                    true
                }
                None => not_signed_in(format),
            })
        }
        Commands::Profile {
            name,
            old_password,
            new_password,
            confirm_password,
        } => {
            restore(state).await?;
            let Some(current) = state.session.profile() else {
                return Ok(not_signed_in(format));
            };

            let mut form = ProfileUpdateForm::from_profile(&current);
            if let Some(name) = name {
                form.name = name.clone();
            }
            form.old_password = old_password.clone();
            form.new_password = new_password.clone();
            form.confirm_password = confirm_password.clone();

            update_profile(state, &form, &current, format).await
        }
        Commands::Avatar { path } => {
            restore(state).await?;
            if !state.session.is_authenticated() {
                return Ok(not_signed_in(format));
            }
            upload_avatar(state, path.clone(), format).await
        }
        Commands::Init | Commands::Version => Ok(true),
    }
}

/// Load configuration: an explicit file wins, otherwise discovered files
fn load_app_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => load_config_from(path),
        None => Ok(load_config().unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Config::default()
        })),
    }
}

/// Restore the persisted session before acting on it
async fn restore(state: &AppState) -> Result<()> {
    if state.session.is_authenticated() {
        return Ok(());
    }
    state
        .session
        .init()
        .await
        .context("Could not restore the saved session")?;
    Ok(())
}

async fn sign_in(
    state: &AppState,
    email: &str,
    password: &str,
    format: OutputFormat,
) -> Result<bool> {
    let form = SignInForm {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    if let Err(failed) = ValidationEngine::evaluate(&form).into_result() {
        return Ok(report_validation(format, &failed));
    }

    Ok(match state.session.sign_in(&form.email, &form.password).await {
        Ok(profile) => {
            print_profile(format, &state.config.api, "Signed in", &profile);
            true
        }
        Err(err) => report_error(format, err.kind(), &err.to_string()),
    })
}

async fn sign_out(state: &AppState, format: OutputFormat) -> Result<bool> {
    Ok(match state.session.sign_out().await {
        Ok(()) => {
            print_status(format, "signed_out", "Signed out");
            true
        }
        Err(err) => report_error(format, err.kind(), &err.to_string()),
    })
}

async fn update_profile(
    state: &AppState,
    form: &ProfileUpdateForm,
    current: &UserProfile,
    format: OutputFormat,
) -> Result<bool> {
    if let Err(failed) = ValidationEngine::evaluate(form).into_result() {
        return Ok(report_validation(format, &failed));
    }

    Ok(match state.session.update_profile(form.changes(current)).await {
        Ok(profile) => {
            print_profile(format, &state.config.api, "Profile updated", &profile);
            true
        }
        Err(err) => report_error(format, err.kind(), &err.to_string()),
    })
}

async fn upload_avatar(state: &AppState, path: Option<PathBuf>, format: OutputFormat) -> Result<bool> {
    let picker = Arc::new(FileImagePicker::new(path));

    Ok(match state.avatar_pipeline(picker).run().await {
        Ok(PipelineOutcome::Uploaded(profile)) => {
            print_profile(format, &state.config.api, "Avatar updated", &profile);
            true
        }
        Ok(PipelineOutcome::Cancelled) => {
            print_status(format, "cancelled", "No image selected; avatar unchanged");
            true
        }
        Err(err) => report_error(format, err.kind(), &err.to_string()),
    })
}

/// Create the default configuration file
pub fn init() -> Result<()> {
    let (path, created) = init_config()?;
    if created {
        println!("Created default configuration at: {}", path.display());
    } else {
        println!("Configuration already exists at: {}", path.display());
    }
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("Ignite Gym v{}", env!("CARGO_PKG_VERSION"));
    println!("   Session, profile and avatar client");
}

fn print_profile(format: OutputFormat, api: &ApiConfig, headline: &str, profile: &UserProfile) {
    match format {
        OutputFormat::Json => {
            let value = json!({ "status": "ok", "profile": profile_view(api, profile) });
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("{}", headline.green().bold());
            println!("  Name:   {}", profile.name());
            println!("  E-mail: {}", profile.email());
            match api.avatar_url(profile.avatar_ref()) {
                Some(url) => println!("  Avatar: {}", url),
                None => println!("  Avatar: {}", "default photo".dimmed()),
            }
        }
    }
}

/// Profile as printed in JSON output, with the avatar's display URL
fn profile_view(api: &ApiConfig, profile: &UserProfile) -> serde_json::Value {
    json!({
        "id": profile.id(),
        "name": profile.name(),
        "email": profile.email(),
        "avatar": profile.avatar_ref(),
        "avatar_url": api.avatar_url(profile.avatar_ref()),
    })
}

fn print_status(format: OutputFormat, status: &str, message: &str) {
    match format {
        OutputFormat::Json => println!("{}", json!({ "status": status, "message": message })),
        OutputFormat::Text => println!("{}", message),
    }
}

fn not_signed_in(format: OutputFormat) -> bool {
    report_error(
        format,
        ErrorKind::InvalidState,
        "Not signed in. Run `ignite-gym sign-in` first.",
    )
}

/// Print an error and return `false`
fn report_error(format: OutputFormat, kind: ErrorKind, message: &str) -> bool {
    match format {
        OutputFormat::Json => {
            println!("{}", json!({ "status": "error", "kind": kind, "message": message }));
        }
        OutputFormat::Text => eprintln!("{} {}", format!("[{}]", kind).red(), message),
    }
    false
}

fn report_validation(format: OutputFormat, failed: &ValidationFailed) -> bool {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "status": "error",
                "kind": failed.kind(),
                "violations": failed.violations(),
            });
            println!("{}", value);
        }
        OutputFormat::Text => {
            for (field, violation) in failed.violations().iter() {
                eprintln!("{} {}", format!("{}:", field).red(), violation.message(field));
            }
        }
    }
    false
}
