//! Error types for grid editing.

use thiserror::Error;

/// Errors that can occur while editing a corner-point grid.
///
/// Every variant is a precondition violation: the operation that returned it
/// has not touched the grid. Geometric conflicts that are resolved by
/// clamping are not errors; they are reported through
/// [`DeformationReport`](crate::types::DeformationReport).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridToolError {
    /// Grid dimensions are unusable (a zero extent, or data of the wrong length).
    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),

    /// Layer index outside `[0, nz)`.
    #[error("layer {k} is out of range (nz = {nz})")]
    LayerOutOfRange { k: usize, nz: usize },

    /// Cell index outside the grid.
    #[error("cell ({i}, {j}, {k}) is outside grid {nx}x{ny}x{nz}")]
    CellOutOfRange {
        i: usize,
        j: usize,
        k: usize,
        nx: usize,
        ny: usize,
        nz: usize,
    },

    /// Pillar index outside `[0, nx] x [0, ny]`.
    #[error("pillar ({ip}, {jp}) is outside the {cols}x{rows} pillar lattice")]
    PillarOutOfRange {
        ip: usize,
        jp: usize,
        cols: usize,
        rows: usize,
    },

    /// An array did not have the shape the operation requires.
    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A pillar whose endpoints coincide in all three coordinates.
    #[error("pillar ({ip}, {jp}) is degenerate: {reason}")]
    DegeneratePillar {
        ip: usize,
        jp: usize,
        reason: String,
    },

    /// A displacement or target value that is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Unrecognised compass orientation.
    #[error("unknown corner orientation '{0}' (expected NW, NE, SW or SE)")]
    UnknownOrientation(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A surface point set that cannot be used for distance queries.
    #[error("surface error: {0}")]
    SurfaceError(String),
}

impl GridToolError {
    /// Create an InvalidDimensions error.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(what: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a DegeneratePillar error.
    pub fn degenerate_pillar(ip: usize, jp: usize, reason: impl Into<String>) -> Self {
        Self::DegeneratePillar {
            ip,
            jp,
            reason: reason.into(),
        }
    }

    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<std::io::Error> for GridToolError {
    fn from(err: std::io::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<serde_yaml::Error> for GridToolError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Result type for grid tool operations.
pub type Result<T> = std::result::Result<T, GridToolError>;
