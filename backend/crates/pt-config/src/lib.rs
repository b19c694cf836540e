mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod oauth_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use oauth_config::OAuthConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "PT_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".pt";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "data.db";

const MIN_SECRET_LENGTH: usize = 32;
// Argon2id baseline: 19 MiB, 2 passes, 1 lane
const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_HASH_ITERATIONS: u32 = 2;
const DEFAULT_HASH_PARALLELISM: u32 = 1;
const MAX_HASH_MEMORY_KIB: u32 = 1_048_576;
const MAX_HASH_ITERATIONS: u32 = 16;
const MAX_HASH_PARALLELISM: u32 = 16;

const DEFAULT_OAUTH_ENABLED: bool = false;
const DEFAULT_OAUTH_CALLBACK_PATH: &str = "/api/auth/oauth/callback";
const DEFAULT_OAUTH_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_OAUTH_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_OAUTH_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const DEFAULT_OAUTH_SUCCESS_REDIRECT: &str = "/";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
