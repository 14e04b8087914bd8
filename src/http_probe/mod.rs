pub mod probe;
pub mod result;
pub mod runner;

pub mod prelude {
    pub use super::probe::{HttpProber, ProbeError, Prober};
    pub use super::result::{CheckResult, TestResult};
    pub use super::runner::{ProbeRunner, RunPhase};
}

use std::fmt::Write;

/// Render an error together with its chain of sources.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
