use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Probe an HTTP endpoint at a fixed interval and report its success rate.
#[derive(Parser, Debug, Default)]
#[command(name = "oxyprobe", version, about)]
pub struct Cli {
    /// Interval between probe launches (e.g. 10s, 500ms)
    #[arg(short = 't', long, env = "OXYPROBE_INTERVAL", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Number of probes to run
    #[arg(short = 'n', long, env = "OXYPROBE_NUM_CHECKS")]
    pub num_checks: Option<usize>,

    /// URL of the endpoint to probe
    #[arg(short = 'u', long = "url", env = "OXYPROBE_TARGET_URL")]
    pub target_url: Option<String>,

    /// Timeout of a single probe request
    #[arg(long = "timeout", env = "OXYPROBE_TIMEOUT", value_parser = humantime::parse_duration)]
    pub request_timeout: Option<Duration>,

    /// File the raw results are written to
    #[arg(short = 'o', long = "output", env = "OXYPROBE_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Cancel the run once this much time has passed
    #[arg(long, env = "OXYPROBE_MAX_DURATION", value_parser = humantime::parse_duration)]
    pub max_duration: Option<Duration>,

    /// Optional YAML file with probe settings
    #[arg(short = 'c', long = "config", env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}
