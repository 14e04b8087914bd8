use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use url::Url;

use super::cli::Cli;
use super::probe_config::ProbeConfig;

const DEFAULT_TARGET_URL: &str = "https://thecatapi.com";
const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
const DEFAULT_NUM_CHECKS: usize = 10;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_OUTPUT_FILE: &str = "test_results.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid target URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme {0}, expected http or https")]
    UnsupportedScheme(String),
    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Fully resolved settings of a probe run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub target_url: Url,
    pub interval: Duration,
    pub num_checks: usize,
    pub request_timeout: Duration,
    pub output_file: PathBuf,
    pub max_duration: Option<Duration>,
}

/// Load the application configuration.
/// Values given on the command line or in the environment take precedence over the
/// optional YAML file, which in turn takes precedence over the built-in defaults.
/// A `.env` file in the working directory is loaded into the environment first.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    let file_config = match &cli.config_file {
        Some(path) => read_config_file(path)?,
        None => ProbeConfig::default(),
    };

    resolve(cli, file_config)
}

pub fn read_config_file(path: &Path) -> Result<ProbeConfig, ConfigError> {
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Using config file {}", path.display());

    serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge command line and file settings on top of the defaults.
pub fn resolve(cli: Cli, file: ProbeConfig) -> Result<AppConfig, ConfigError> {
    let raw_url = cli
        .target_url
        .or(file.target_url)
        .unwrap_or_else(|| DEFAULT_TARGET_URL.to_string());
    let target_url = parse_target_url(&raw_url)?;

    let request_timeout = cli
        .request_timeout
        .or(file.request_timeout)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
    if request_timeout.is_zero() {
        return Err(ConfigError::ZeroTimeout);
    }

    Ok(AppConfig {
        target_url,
        interval: cli.interval.or(file.interval).unwrap_or(DEFAULT_INTERVAL),
        num_checks: cli
            .num_checks
            .or(file.num_checks)
            .unwrap_or(DEFAULT_NUM_CHECKS),
        request_timeout,
        output_file: cli
            .output_file
            .or(file.output_file.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        max_duration: cli.max_duration.or(file.max_duration),
    })
}

fn parse_target_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
