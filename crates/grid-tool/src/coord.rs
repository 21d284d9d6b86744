//! Pillar coordinates.

use nalgebra::Point3;
use ndarray::{s, Array4};

use crate::error::{GridToolError, Result};
use crate::types::GridDims;

/// Horizontal axis used as the free variable along a slanted pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeAxis {
    X,
    Y,
}

/// A pillar: the line through its top and bottom COORD endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    /// Pillar column index.
    pub ip: usize,
    /// Pillar row index.
    pub jp: usize,
    pub top: Point3<f64>,
    pub bottom: Point3<f64>,
}

impl Pillar {
    /// Top and bottom share x and y.
    pub fn is_vertical(&self) -> bool {
        self.top.x == self.bottom.x && self.top.y == self.bottom.y
    }

    /// Top and bottom coincide in all three coordinates.
    pub fn is_degenerate(&self) -> bool {
        self.top == self.bottom
    }

    /// Horizontal axis with nonzero extent, or `None` for a vertical pillar.
    pub fn free_axis(&self) -> Option<FreeAxis> {
        if self.top.x != self.bottom.x {
            Some(FreeAxis::X)
        } else if self.top.y != self.bottom.y {
            Some(FreeAxis::Y)
        } else {
            None
        }
    }

    /// Point on the pillar line at parameter `t` (0 at top, 1 at bottom).
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.top + (self.bottom - self.top) * t
    }

    /// Point on the pillar line at depth `z`.
    ///
    /// Vertical pillars keep their (x, y). A pillar with no depth extent has
    /// no unique point at a given depth and is rejected.
    pub fn point_at_depth(&self, z: f64) -> Result<Point3<f64>> {
        if self.is_vertical() {
            return Ok(Point3::new(self.top.x, self.top.y, z));
        }

        let dz = self.bottom.z - self.top.z;
        if dz == 0.0 {
            return Err(GridToolError::degenerate_pillar(
                self.ip,
                self.jp,
                "no depth extent, cannot locate a point by depth",
            ));
        }

        let mut p = self.point_at((z - self.top.z) / dz);
        p.z = z;
        Ok(p)
    }

    /// Line parameter of the point whose free-axis coordinate is `r`.
    pub(crate) fn param_at(&self, axis: FreeAxis, r: f64) -> f64 {
        match axis {
            FreeAxis::X => (r - self.top.x) / (self.bottom.x - self.top.x),
            FreeAxis::Y => (r - self.top.y) / (self.bottom.y - self.top.y),
        }
    }

    pub(crate) fn ensure_not_degenerate(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(GridToolError::degenerate_pillar(
                self.ip,
                self.jp,
                "top and bottom endpoints coincide",
            ));
        }
        Ok(())
    }
}

/// Pillar endpoints, shape `(ny + 1, nx + 1, 2, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordArray {
    dims: GridDims,
    data: Array4<f64>,
}

impl CoordArray {
    /// Wrap a flat C-order COORD export.
    pub fn from_flat(dims: GridDims, values: Vec<f64>) -> Result<Self> {
        let len = values.len();
        let data = Array4::from_shape_vec(dims.coord_shape(), values)
            .map_err(|_| GridToolError::shape_mismatch("COORD", &[dims.coord_len()], &[len]))?;
        Ok(Self { dims, data })
    }

    /// Wrap an existing tensor, checking its shape.
    pub fn from_array(dims: GridDims, data: Array4<f64>) -> Result<Self> {
        if data.shape() != &dims.coord_shape()[..] {
            return Err(GridToolError::shape_mismatch(
                "COORD",
                &dims.coord_shape(),
                data.shape(),
            ));
        }
        Ok(Self { dims, data })
    }

    pub fn as_array(&self) -> &Array4<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array4<f64> {
        self.data
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Pillar at column `ip`, row `jp`, counted from the SW corner of cell (0, 0).
    pub fn pillar(&self, ip: usize, jp: usize) -> Result<Pillar> {
        self.dims.check_pillar(ip, jp)?;
        let ends = self.data.slice(s![jp, ip, .., ..]);
        Ok(Pillar {
            ip,
            jp,
            top: Point3::new(ends[[0, 0]], ends[[0, 1]], ends[[0, 2]]),
            bottom: Point3::new(ends[[1, 0]], ends[[1, 1]], ends[[1, 2]]),
        })
    }

    /// Iterate over all pillars, row by row.
    pub fn pillars(&self) -> impl Iterator<Item = Pillar> + '_ {
        let (rows, cols) = (self.dims.ny + 1, self.dims.nx + 1);
        (0..rows).flat_map(move |jp| {
            (0..cols).map(move |ip| {
                let ends = self.data.slice(s![jp, ip, .., ..]);
                Pillar {
                    ip,
                    jp,
                    top: Point3::new(ends[[0, 0]], ends[[0, 1]], ends[[0, 2]]),
                    bottom: Point3::new(ends[[1, 0]], ends[[1, 1]], ends[[1, 2]]),
                }
            })
        })
    }
}
