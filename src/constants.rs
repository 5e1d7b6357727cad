/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment
pub const ENV_PREFIX: &str = "IGNITE_GYM_";
pub const APP_NAME: &str = "ignite-gym";

// Token storage
pub const TOKEN_FILE_NAME: &str = "session.toml";

// Profile form
pub const MIN_PASSWORD_LEN: usize = 6;

// Avatar upload
pub const MAX_AVATAR_BYTES: u64 = 10 * 1024 * 1024; // 10 MiB
pub const AVATAR_FIELD_KEY: &str = "avatar";

// Image extensions the file picker accepts
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "heic", "bmp"];
