pub mod app;
pub mod avatar;
pub mod cli;
pub mod constants;
pub mod gateway;
pub mod models;
pub mod session;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

pub use app::{load_config, AppState, Config};
pub use avatar::{AvatarUploadPipeline, PipelineOutcome};
pub use session::{SessionState, SessionStore};
pub use utils::{ErrorKind, PipelineError, SessionError};
pub use validation::{ProfileUpdateForm, ValidationEngine};
