//! Generation settings building on the shared `config` crate.
//!
//! Part parameters (radii, loops, offsets) live in the per-part structs under
//! [`crate::parts`]; this module only covers how a part is generated.

use config::constants::{GlobalConfig, DEFAULT_SEGMENTS, EPSILON_TOLERANCE, WELD_DISTANCE};

use crate::error::Result;

/// Settings shared by every part generation call.
///
/// # Examples
/// ```
/// use thread_mesh::GenerationConfig;
/// let cfg = GenerationConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// assert!(!cfg.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Distance under which two positions count as coincident.
    pub tolerance: f64,
    /// Merge distance handed to welding sinks.
    pub weld_distance: f64,
    /// Write regions concurrently.
    pub parallel: bool,
    /// Turn collapsed-face warnings into errors.
    pub strict_degeneracy: bool,
}

impl GenerationConfig {
    /// Creates a configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use thread_mesh::GenerationConfig;
    /// let cfg = GenerationConfig::new(1.0e-8, 1.0e-3).unwrap();
    /// assert_eq!(cfg.weld_distance, 1.0e-3);
    /// assert!(GenerationConfig::new(-1.0, 1.0e-3).is_err());
    /// ```
    pub fn new(tolerance: f64, weld_distance: f64) -> Result<Self> {
        let global = GlobalConfig::new(tolerance, DEFAULT_SEGMENTS, weld_distance)?;
        Ok(Self::from(global))
    }

    /// Enables or disables concurrent region writes.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables strict degeneracy checking.
    #[must_use]
    pub fn with_strict_degeneracy(mut self, strict: bool) -> Self {
        self.strict_degeneracy = strict;
        self
    }
}

impl From<GlobalConfig> for GenerationConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            tolerance: global.tolerance,
            weld_distance: global.weld_distance,
            parallel: false,
            strict_degeneracy: false,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            weld_distance: WELD_DISTANCE,
            parallel: false,
            strict_degeneracy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThreadMeshError;

    #[test]
    fn default_matches_global_defaults() {
        assert_eq!(GenerationConfig::default(), GenerationConfig::from(GlobalConfig::default()));
    }

    #[test]
    fn invalid_weld_distance_is_a_config_error() {
        let err = GenerationConfig::new(1.0e-9, 0.0).unwrap_err();
        assert!(matches!(err, ThreadMeshError::Config(_)));
    }

    #[test]
    fn builders_toggle_flags() {
        let cfg = GenerationConfig::default()
            .with_parallel(true)
            .with_strict_degeneracy(true);
        assert!(cfg.parallel);
        assert!(cfg.strict_degeneracy);
    }
}
