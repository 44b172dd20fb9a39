// src/client/main.rs

use license_probe::client::check::LicenseCheckClient;
use license_probe::config::ProbeConfig;
use license_probe::errors::ProbeResult;
use license_probe::logging::init_tracing;
use license_probe::scenarios::{deployed_suite, local_suite, print_summary, run_suite};

/// Runs the fixed scenario suites.
///
/// Suite A hits the local server (e.g. `license_probe_server` or `vercel dev`
/// on port 3001), suite B the deployed one. Individual outcomes are reported
/// on stdout only; the process exits 0 unless configuration cannot be loaded.
#[tokio::main]
async fn main() -> ProbeResult<()> {
    let config = ProbeConfig::load()?;
    init_tracing(&config.logging);

    let client = LicenseCheckClient::from_config(&config.client)?;

    let mut reports = run_suite(
        &client,
        &config.endpoints,
        "STARTING LOCAL TESTS",
        &local_suite(&config.credentials),
    )
    .await;

    reports.extend(
        run_suite(
            &client,
            &config.endpoints,
            "STARTING DEPLOYED TESTS",
            &deployed_suite(&config.credentials),
        )
        .await,
    );

    print_summary(&reports);

    Ok(())
}
