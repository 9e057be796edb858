mod env_file;
mod load;
mod types;

pub use env_file::{parse_env_file, parse_env_str};
pub use load::{get_evdump_data_dir, load_default, resolve_api_key, API_KEY_ENV};
pub use types::{ApiConfig, AppConfig, ExportConfig, LoggingConfig, RetryConfig};
