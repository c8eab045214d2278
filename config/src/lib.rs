//! # Config Crate
//!
//! Centralized configuration constants for threaded part generation.
//! All magic numbers and tunable defaults live here so the geometry core
//! and the command-line driver agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GlobalConfig, DEFAULT_SEGMENTS, MIN_SEGMENTS};
//!
//! let cfg = GlobalConfig::default();
//! assert_eq!(cfg.default_segments, DEFAULT_SEGMENTS);
//! assert!(cfg.default_segments >= MIN_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: `GlobalConfig::new` rejects unusable values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
