use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ignite-gym")]
#[command(version)]
#[command(about = "Sign in, manage your profile and avatar on Ignite Gym", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Sign in and remember the session
    SignIn {
        /// Account e-mail
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long, env = "IGNITE_GYM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    SignOut,
    /// Show the signed-in profile
    Whoami,
    /// Update name and/or password
    Profile {
        /// New display name (defaults to the current one)
        #[arg(short, long)]
        name: Option<String>,
        /// Current password
        #[arg(long, default_value = "")]
        old_password: String,
        /// New password (leave empty to keep the current one)
        #[arg(long, default_value = "")]
        new_password: String,
        /// Repeat the new password
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Upload a new avatar image; without a path nothing is uploaded
    Avatar {
        /// Image file to upload
        path: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
