// Gateway module for the remote API - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;

// Public re-exports - the ONLY way to access API functionality
pub use http::HttpCredentialGateway;
