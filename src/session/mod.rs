/// Session management module - Gateway

mod state;
mod storage;
mod store;

pub use state::SessionState;
pub use storage::FileTokenStorage;
pub use store::SessionStore;
