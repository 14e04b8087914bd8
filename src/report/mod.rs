use std::path::{Path, PathBuf};

use crate::http_probe::result::TestResult;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize results to JSON")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write results to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The human readable summary of a run, e.g. `Successful probes: 50.00% (2/4)`.
pub fn summary_line(result: &TestResult) -> String {
    format!(
        "Successful probes: {:.2}% ({}/{})",
        result.success_percentage(),
        result.successful(),
        result.len()
    )
}

/// Write the raw results as JSON to `path`, replacing any previous file.
pub async fn write_results(path: &Path, result: &TestResult) -> Result<(), ReportError> {
    let json = serde_json::to_vec_pretty(result)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
