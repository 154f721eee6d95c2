//! The shipped example config must load and validate

use std::path::PathBuf;

use lunchbot::{LunchConfig, SelectionMode};

#[test]
fn test_example_config_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/example.toml");
    let config = LunchConfig::load_from_path(Some(path)).expect("example config is valid");

    assert_eq!(config.location.latitude, 43.072_864);
    assert_eq!(config.dine_out.walking_distance_meters, 1610.0);
    assert_eq!(config.selection.mode, SelectionMode::Uniform);
    assert_eq!(config.http.timeout_seconds, 10);
}
