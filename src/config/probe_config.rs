use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Settings read from an optional YAML file.
/// Every field is optional; missing values fall back to the environment, the command line or the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// The URL of the endpoint to probe.
    pub target_url: Option<String>,

    /// Time between two probe launches, e.g. `10s` or `500ms`.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub interval: Option<Duration>,

    /// Number of probes in a run.
    pub num_checks: Option<usize>,

    /// Timeout of a single probe request.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub request_timeout: Option<Duration>,

    /// Where the raw results are written.
    pub output_file: Option<String>,

    /// Overall deadline after which the run is cancelled.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub max_duration: Option<Duration>,
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}
