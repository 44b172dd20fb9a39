use std::env;

use serial_test::serial;

use license_probe::config::ProbeConfig;
use license_probe::errors::ProbeError;

/// Config file name that does not exist, so only defaults and env apply.
const NO_FILE: &str = "nonexistent-probe-config";

#[test]
#[serial]
fn loads_defaults_without_file_or_env() {
    let config = ProbeConfig::load_from(NO_FILE).expect("defaults should load");

    assert_eq!(config.endpoints.local_url, "http://localhost:3001/api");
    assert_eq!(
        config.endpoints.deployed_url,
        "https://your-domain.vercel.app/api"
    );
    assert_eq!(config.client.timeout_secs, 5);
    assert_eq!(config.server.port, 3001);
}

#[test]
#[serial]
fn env_overrides_defaults() {
    env::set_var("PROBE_LOCAL_URL", "http://127.0.0.1:4000/api");
    env::set_var("PROBE_VALID_CLIENT_ID", "ENV_CLIENT");
    env::set_var("PROBE_TIMEOUT_SECS", "11");

    let result = ProbeConfig::load_from(NO_FILE);

    // Clean up env vars for other tests
    env::remove_var("PROBE_LOCAL_URL");
    env::remove_var("PROBE_VALID_CLIENT_ID");
    env::remove_var("PROBE_TIMEOUT_SECS");

    let config = result.expect("overridden config should load");
    assert_eq!(config.endpoints.local_url, "http://127.0.0.1:4000/api");
    assert_eq!(config.credentials.valid_client_id, "ENV_CLIENT");
    assert_eq!(config.client.timeout_secs, 11);
}

#[test]
#[serial]
fn invalid_env_value_fails_validation() {
    env::set_var("PROBE_DEPLOYED_URL", "mailto:ops@example.com");

    let result = ProbeConfig::load_from(NO_FILE);

    env::remove_var("PROBE_DEPLOYED_URL");

    assert!(matches!(result, Err(ProbeError::ConfigError(_))));
}
