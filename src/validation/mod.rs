// Gateway module for validation - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod engine;
mod profile;
mod sign_in;
mod types;

// Public re-exports - the ONLY way to access validation functionality
pub use engine::{Form, Rule, ValidationEngine};
pub use profile::ProfileUpdateForm;
pub use sign_in::SignInForm;
pub use types::{Field, Violation, Violations};
