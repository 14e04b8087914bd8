pub mod app_config;
pub mod cli;
pub mod probe_config;

pub use app_config::{AppConfig, ConfigError, load_config};
