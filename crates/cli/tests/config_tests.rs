//! Integration tests for environment-driven client configuration.
//!
//! Uses `ClientConfig::from_lookup` with an in-memory map so tests never
//! touch the process environment.

use std::collections::HashMap;
use std::time::Duration;

use assert_matches::assert_matches;
use hybrid_cli::config::{ClientConfig, ConfigError, ReconnectMode};

fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ClientConfig::from_lookup(|key| map.get(key).cloned())
}

// ---------------------------------------------------------------------------
// Test: defaults
// ---------------------------------------------------------------------------

#[test]
fn empty_environment_uses_defaults() {
    let config = load(&[]).unwrap();

    assert_eq!(config.host, "localhost:8000");
    assert!(!config.secure);
    assert!(!config.open_browser);
    assert_eq!(config.reconnect, ReconnectMode::None);
    assert_eq!(config.reconnect_max_attempts, 5);
}

/// The default policy never retries.
#[test]
fn default_policy_does_not_reconnect() {
    let config = load(&[]).unwrap();
    assert_eq!(config.reconnect_policy().delay_for(1), None);
}

// ---------------------------------------------------------------------------
// Test: overrides
// ---------------------------------------------------------------------------

#[test]
fn overrides_are_applied() {
    let config = load(&[
        ("HYBRID_HOST", "trading.internal:9000"),
        ("HYBRID_SECURE", "true"),
        ("HYBRID_OPEN_BROWSER", "1"),
        ("HYBRID_RECONNECT", "backoff"),
        ("HYBRID_RECONNECT_MAX_ATTEMPTS", "2"),
    ])
    .unwrap();

    assert_eq!(config.host, "trading.internal:9000");
    assert!(config.secure);
    assert!(config.open_browser);
    assert_eq!(config.reconnect, ReconnectMode::Backoff);

    let policy = config.reconnect_policy();
    assert_eq!(policy.delay_for(1), Some(Duration::from_secs(1)));
    assert_eq!(policy.delay_for(2), Some(Duration::from_secs(2)));
    assert_eq!(policy.delay_for(3), None);
}

/// A blank host falls back to the default instead of producing `ws:///...`.
#[test]
fn blank_host_uses_default() {
    let config = load(&[("HYBRID_HOST", "  ")]).unwrap();
    assert_eq!(config.host, "localhost:8000");
}

// ---------------------------------------------------------------------------
// Test: invalid values
// ---------------------------------------------------------------------------

#[test]
fn unknown_reconnect_mode_is_rejected() {
    assert_matches!(
        load(&[("HYBRID_RECONNECT", "forever")]),
        Err(ConfigError::Invalid { key: "HYBRID_RECONNECT", .. })
    );
}

#[test]
fn malformed_flag_is_rejected() {
    assert_matches!(
        load(&[("HYBRID_SECURE", "maybe")]),
        Err(ConfigError::Invalid { key: "HYBRID_SECURE", .. })
    );
}

#[test]
fn non_numeric_attempts_are_rejected() {
    let err = load(&[("HYBRID_RECONNECT_MAX_ATTEMPTS", "many")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "HYBRID_RECONNECT_MAX_ATTEMPTS has invalid value \"many\""
    );
}
