//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert!(cfg.default_segments >= MIN_SEGMENTS);
    assert!(cfg.weld_distance > cfg.tolerance);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(0.0, 24, WELD_DISTANCE).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, 2, WELD_DISTANCE).unwrap_err(),
        ConfigError::InvalidSegments(2)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, 24, -1.0).unwrap_err(),
        ConfigError::InvalidWeldDistance(-1.0)
    );
}

#[test]
fn nan_tolerance_is_rejected() {
    assert!(GlobalConfig::new(f64::NAN, 24, WELD_DISTANCE).is_err());
}

#[test]
fn error_messages_name_the_field() {
    let msg = ConfigError::InvalidSegments(1).to_string();
    assert!(msg.contains("default_segments"));
}

#[test]
fn limits_are_consistent() {
    assert!(MAX_VERTICES >= DEFAULT_SEGMENTS as usize * 1000);
    assert!(MAX_FACES >= DEFAULT_SEGMENTS as usize * 1000);
}
