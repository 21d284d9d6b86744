//! Common test fixtures for grid-tool tests.
//!
//! This module provides pre-defined grids and configuration snippets that
//! represent common scenarios in grid editing.

use std::io::Write;

use tempfile::NamedTempFile;

/// The small stacked grid used by the end-to-end deformation scenarios.
pub mod stack {
    /// Cells along x.
    pub const NX: usize = 2;

    /// Cells along y.
    pub const NY: usize = 2;

    /// Layers.
    pub const NZ: usize = 3;

    /// Pillar spacing in both directions.
    pub const SPACING: f64 = 100.0;

    /// Depth of the top of layer 0.
    pub const TOP: f64 = 0.0;

    /// Thickness of every layer.
    pub const THICKNESS: f64 = 10.0;

    /// Builds the grid: layer k spans depths 10k to 10(k + 1).
    pub fn grid() -> crate::SyntheticGrid {
        crate::layered_grid(NX, NY, NZ, SPACING, TOP, THICKNESS)
    }
}

/// Configuration documents for loader tests.
pub mod config {
    /// Free layer thickness with a tightened solver.
    pub const FREE_YAML: &str = r#"
fixed_layer_thickness: null
solver:
  tolerance: 1.0e-10
  max_iterations: 50
  initial_step_fraction: 0.5
"#;

    /// Fixed 5 m layer thickness, solver left at defaults.
    pub const FIXED_YAML: &str = "fixed_layer_thickness: 5.0\n";

    /// Rejected: thickness must be positive.
    pub const NEGATIVE_THICKNESS_YAML: &str = "fixed_layer_thickness: -1.0\n";

    /// Rejected: not a mapping.
    pub const MALFORMED_YAML: &str = "solver: [1, 2\n";
}

/// Write `contents` to a fresh temporary file.
///
/// The file is removed when the returned handle is dropped.
pub fn temp_file_with(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
