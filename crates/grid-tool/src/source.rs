//! Boundary with the grid-I/O collaborator.
//!
//! Reading and writing grid files lives outside this crate. A loader only
//! needs to hand over the grid dimensions and the two flat arrays, both in
//! C order:
//!
//! - ZCORN: `(nz, 2, ny, 2, nx, 2)`: layer, top/bottom, row, row-side,
//!   column, column-side.
//! - COORD: `(ny + 1, nx + 1, 2, 3)`: pillar row, pillar column,
//!   top/bottom endpoint, xyz.

use serde::{Deserialize, Serialize};

use crate::error::{GridToolError, Result};
use crate::types::GridDims;

/// Supplier of corner-point grid data.
pub trait GridSource {
    /// Grid cell counts.
    fn dims(&self) -> GridDims;

    /// Flat corner depths.
    fn export_zcorn(&self) -> Vec<f64>;

    /// Flat pillar coordinates.
    fn export_coord(&self) -> Vec<f64>;
}

/// In-memory grid definition.
///
/// Used both as a [`GridSource`] and as the result of
/// [`GridTool::export`](crate::GridTool::export) for handing the edited grid
/// back to a writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
    pub dims: GridDims,
    pub zcorn: Vec<f64>,
    pub coord: Vec<f64>,
}

impl GridDefinition {
    /// Create a grid definition, checking array lengths against the dimensions.
    pub fn new(nx: usize, ny: usize, nz: usize, zcorn: Vec<f64>, coord: Vec<f64>) -> Result<Self> {
        let dims = GridDims::new(nx, ny, nz)?;

        if zcorn.len() != dims.zcorn_len() {
            return Err(GridToolError::invalid_dimensions(format!(
                "ZCORN has {} values, grid {} needs {}",
                zcorn.len(),
                dims,
                dims.zcorn_len()
            )));
        }

        if coord.len() != dims.coord_len() {
            return Err(GridToolError::invalid_dimensions(format!(
                "COORD has {} values, grid {} needs {}",
                coord.len(),
                dims,
                dims.coord_len()
            )));
        }

        Ok(Self { dims, zcorn, coord })
    }

    /// Build a box-shaped grid with vertical pillars and layers of equal thickness.
    ///
    /// Pillar (ip, jp) sits at `(ip * dx, jp * dy)` and spans depths
    /// `top..top + nz * thickness`. Layer k has its top at `top + k * thickness`.
    pub fn regular(dims: GridDims, dx: f64, dy: f64, top: f64, thickness: f64) -> Self {
        let bottom = top + dims.nz as f64 * thickness;

        let mut coord = Vec::with_capacity(dims.coord_len());
        for jp in 0..=dims.ny {
            for ip in 0..=dims.nx {
                let x = ip as f64 * dx;
                let y = jp as f64 * dy;
                coord.extend_from_slice(&[x, y, top, x, y, bottom]);
            }
        }

        let mut zcorn = Vec::with_capacity(dims.zcorn_len());
        for k in 0..dims.nz {
            for s in 0..2 {
                let z = top + (k + s) as f64 * thickness;
                zcorn.extend(std::iter::repeat(z).take(4 * dims.nx * dims.ny));
            }
        }

        Self { dims, zcorn, coord }
    }
}

impl GridSource for GridDefinition {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn export_zcorn(&self) -> Vec<f64> {
        self.zcorn.clone()
    }

    fn export_coord(&self) -> Vec<f64> {
        self.coord.clone()
    }
}
