use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub mod config;
use config::AppConfig;
pub mod http_probe;
use http_probe::prelude::*;
pub mod report;
pub mod shutdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config()?;
    let prober = HttpProber::new(config.target_url.clone(), config.request_timeout)?;
    log::info!(
        "Starting {} probes against {} every {}",
        config.num_checks,
        prober.url(),
        humantime::format_duration(config.interval)
    );

    let cancel = CancellationToken::new();
    let signal_listener = shutdown::spawn_signal_listener(cancel.clone());
    if let Some(max_duration) = config.max_duration {
        shutdown::spawn_deadline(cancel.clone(), max_duration);
    }

    let runner = ProbeRunner::new(Arc::new(prober));
    let test_result = runner
        .run_tests(&cancel, config.interval, config.num_checks)
        .await;

    log::info!("Probe run finished with {} results", test_result.len());

    // Stop the listeners; nothing is left to cancel.
    cancel.cancel();
    // tokio keeps its Ctrl-C handler installed until exit, so a signal during the
    // short publish step below is ignored.
    drop(signal_listener);

    publish(&config, &test_result).await;
    Ok(())
}

/// Print the summary and persist the raw results.
/// Failures are logged only; the run itself has already completed.
async fn publish(config: &AppConfig, test_result: &TestResult) {
    if test_result.len() < config.num_checks {
        log::warn!(
            "Run ended early, {} of {} probes reported",
            test_result.len(),
            config.num_checks
        );
    }
    println!("{}", report::summary_line(test_result));

    match report::write_results(&config.output_file, test_result).await {
        Ok(()) => log::info!("Results saved to {}", config.output_file.display()),
        Err(e) => log::error!("{}", http_probe::report(&e)),
    }
}
