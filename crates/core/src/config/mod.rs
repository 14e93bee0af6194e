mod defaults;
mod load;
mod paths;
mod types;
mod validate;

pub use load::{load, load_from_paths};
pub use paths::{ROOT_ENV, default_log_path, discover_root, global_config_path, project_config_path};
pub use types::{Config, ConfigError, LayoutConfig, LogLevel, Result};
