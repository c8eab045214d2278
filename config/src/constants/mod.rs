//! Centralized configuration values shared across the thread-mesh crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

/// Numerical tolerance used when deciding whether two positions coincide.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Distance under which a mesh backend merges duplicate vertices.
///
/// Thread regions deliberately share boundary positions with their
/// neighbors; welding at this distance closes those seams.
///
/// # Examples
/// ```
/// use config::constants::{EPSILON_TOLERANCE, WELD_DISTANCE};
/// assert!(WELD_DISTANCE > EPSILON_TOLERANCE);
/// ```
pub const WELD_DISTANCE: f64 = 1.0e-4;

/// Default angular resolution (vertices per loop) for threads and collars.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SEGMENTS;
/// assert_eq!(DEFAULT_SEGMENTS, 256);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 256;

/// Smallest angular resolution that still forms a closed polygon.
///
/// # Examples
/// ```
/// use config::constants::MIN_SEGMENTS;
/// assert_eq!(MIN_SEGMENTS, 3);
/// ```
pub const MIN_SEGMENTS: u32 = 3;

/// Maximum number of vertices a single part may allocate.
///
/// Safety limit against runaway loop counts or resolutions.
///
/// # Examples
/// ```
/// use config::constants::MAX_VERTICES;
/// assert!(MAX_VERTICES > 1_000_000);
/// ```
pub const MAX_VERTICES: usize = 50_000_000;

/// Maximum number of faces a single part may allocate.
pub const MAX_FACES: usize = 50_000_000;

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance for coincidence checks.
    pub tolerance: f64,
    /// Default vertices per loop for generated parts.
    pub default_segments: u32,
    /// Vertex merge distance applied by welding sinks.
    pub weld_distance: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance, default segments and weld distance.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 64, 1.0e-4).expect("valid config");
    /// assert_eq!(cfg.default_segments, 64);
    /// ```
    pub fn new(
        tolerance: f64,
        default_segments: u32,
        weld_distance: f64,
    ) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if default_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(default_segments));
        }
        if weld_distance.is_nan() || weld_distance <= 0.0 {
            return Err(ConfigError::InvalidWeldDistance(weld_distance));
        }
        Ok(Self {
            tolerance,
            default_segments,
            weld_distance,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            default_segments: DEFAULT_SEGMENTS,
            weld_distance: WELD_DISTANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the requested segment count is too small to form a polygon.
    InvalidSegments(u32),
    /// Raised when the weld distance is zero, negative or NaN.
    InvalidWeldDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "default_segments must be >= {MIN_SEGMENTS}: {value}")
            }
            ConfigError::InvalidWeldDistance(value) => {
                write!(f, "weld_distance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
