//! # Error Types
//!
//! Error types for thread and part generation. All errors are fatal to the
//! generation call that raised them.
//!
//! ## Error Policy
//!
//! - NO partial parts: a part is fully generated or an error is returned
//!   before any mesh reaches a sink
//! - Parameter problems are reported before any buffer is written
//! - Errors include the region and buffer involved for debugging

use std::fmt;

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Which of the two shared buffers a size check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// The flat vertex buffer.
    Vertices,
    /// The flat face buffer.
    Faces,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Vertices => f.write_str("vertices"),
            BufferKind::Faces => f.write_str("faces"),
        }
    }
}

/// Errors that can occur while generating threads, collars and parts.
///
/// ## Example
///
/// ```rust
/// use thread_mesh::{ThreadMeshError, ThreadProfile, ThreadSpec, Polarity};
///
/// let spec = ThreadSpec {
///     segments: 2,
///     ..ThreadSpec::new(18.5, 17.2, ThreadProfile::default(), Polarity::Male)
/// };
/// match spec.validate() {
///     Err(ThreadMeshError::ContractViolation { message }) => assert!(message.contains("segments")),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ThreadMeshError {
    /// Caller-supplied parameters describe an unusable configuration.
    #[error("Contract violation: {message}")]
    ContractViolation {
        /// Which parameter was rejected and why.
        message: String,
    },

    /// A region wrote more or fewer entries than were reserved for it.
    #[error("Size mismatch in {region}: reserved {expected} {buffer}, got {actual}")]
    SizeMismatch {
        /// Label of the region or part whose count disagreed.
        region: String,
        /// Buffer the count refers to.
        buffer: BufferKind,
        /// Reserved entry count.
        expected: usize,
        /// Entry count actually produced.
        actual: usize,
    },

    /// Geometry collapsed where distinct positions were required.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the collapsed feature.
        message: String,
    },

    /// Invalid global configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A mesh sink refused the finished buffers.
    #[error("Mesh sink failed for '{name}': {message}")]
    Sink {
        /// Name of the part being materialized.
        name: String,
        /// Error reported by the sink.
        message: String,
    },

    /// Error writing an exported mesh.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThreadMeshError {
    /// Creates a contract violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a size mismatch error.
    pub fn size_mismatch(
        region: impl Into<String>,
        buffer: BufferKind,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::SizeMismatch {
            region: region.into(),
            buffer,
            expected,
            actual,
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for thread mesh operations.
pub type Result<T> = std::result::Result<T, ThreadMeshError>;

// =============================================================================
// TESTS
// =============================================================================
