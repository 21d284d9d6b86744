//! Owned corner-depth tensor.

use ndarray::{s, Array6, ArrayView4, ArrayView5, ArrayViewMut4, ArrayViewMut5, Zip};

use crate::error::{GridToolError, Result};
use crate::types::{GridDims, Orientation, Surface};

/// Corner depths of every cell, shape `(nz, 2, ny, 2, nx, 2)`.
///
/// Depth increases downward, so "top ≤ bottom" means the top corner has the
/// smaller value.
#[derive(Debug, Clone, PartialEq)]
pub struct ZcornArray {
    dims: GridDims,
    data: Array6<f64>,
}

impl ZcornArray {
    /// Wrap a flat C-order ZCORN export.
    pub fn from_flat(dims: GridDims, values: Vec<f64>) -> Result<Self> {
        let len = values.len();
        let data = Array6::from_shape_vec(dims.zcorn_shape(), values).map_err(|_| {
            GridToolError::shape_mismatch("ZCORN", &[dims.zcorn_len()], &[len])
        })?;
        Ok(Self { dims, data })
    }

    /// Wrap an existing tensor, checking its shape.
    pub fn from_array(dims: GridDims, data: Array6<f64>) -> Result<Self> {
        if data.shape() != &dims.zcorn_shape()[..] {
            return Err(GridToolError::shape_mismatch(
                "ZCORN",
                &dims.zcorn_shape(),
                data.shape(),
            ));
        }
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn as_array(&self) -> &Array6<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array6<f64> {
        self.data
    }

    /// Flat C-order copy, suitable for re-export.
    pub fn to_flat(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Both surfaces of layer k, shape `(2, ny, 2, nx, 2)`.
    pub fn layer(&self, k: usize) -> ArrayView5<'_, f64> {
        self.data.slice(s![k, .., .., .., .., ..])
    }

    pub fn layer_mut(&mut self, k: usize) -> ArrayViewMut5<'_, f64> {
        self.data.slice_mut(s![k, .., .., .., .., ..])
    }

    /// One surface of layer k, shape `(ny, 2, nx, 2)`.
    pub fn surface(&self, k: usize, surface: Surface) -> ArrayView4<'_, f64> {
        self.data.slice(s![k, surface.index(), .., .., .., ..])
    }

    pub fn surface_mut(&mut self, k: usize, surface: Surface) -> ArrayViewMut4<'_, f64> {
        self.data.slice_mut(s![k, surface.index(), .., .., .., ..])
    }

    /// Depth of a single corner.
    pub fn corner(&self, i: usize, j: usize, k: usize, orient: Orientation, surface: Surface) -> f64 {
        let (cs, rs) = orient.offsets();
        self.data[[k, surface.index(), j, rs, i, cs]]
    }

    pub fn corner_mut(
        &mut self,
        i: usize,
        j: usize,
        k: usize,
        orient: Orientation,
        surface: Surface,
    ) -> &mut f64 {
        let (cs, rs) = orient.offsets();
        &mut self.data[[k, surface.index(), j, rs, i, cs]]
    }

    /// Number of corners in layer k whose top lies below its bottom.
    pub fn inverted_corners(&self, k: usize) -> usize {
        let mut count = 0;
        Zip::from(self.surface(k, Surface::Top))
            .and(self.surface(k, Surface::Bottom))
            .for_each(|&top, &bottom| {
                if top > bottom {
                    count += 1;
                }
            });
        count
    }

    /// First layer containing an inverted corner, if any.
    pub fn first_inverted_layer(&self) -> Option<usize> {
        (0..self.dims.nz).find(|&k| self.inverted_corners(k) > 0)
    }
}
