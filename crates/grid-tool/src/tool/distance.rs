//! Per-pillar target depths to per-corner displacements.

use ndarray::{stack, Array4, ArrayView2, Axis};

use super::GridTool;
use crate::error::{GridToolError, Result};
use crate::types::{Displacement, Surface};

impl GridTool {
    /// Displacement that moves the top surface of layer `k` onto `target`.
    ///
    /// `target` holds one depth per pillar, shape `(ny + 1, nx + 1)` indexed
    /// `[jp, ip]`. Every cell corner on a pillar gets that pillar's target, so
    /// the returned delta has the top-surface shape `(ny, 2, nx, 2)`. With
    /// `tile_to_bottom` the delta is copied onto the bottom surface as well,
    /// giving `(2, ny, 2, nx, 2)`; applying it keeps each corner's thickness.
    pub fn zcorn_layer_distance_simple(
        &self,
        target: ArrayView2<'_, f64>,
        k: usize,
        tile_to_bottom: bool,
    ) -> Result<Displacement> {
        self.dims.check_layer(k)?;

        let expected = self.dims.pillar_shape();
        if target.shape() != &expected[..] {
            return Err(GridToolError::shape_mismatch(
                "pillar target",
                &expected,
                target.shape(),
            ));
        }
        if target.iter().any(|v| !v.is_finite()) {
            return Err(GridToolError::NonFinite("pillar target"));
        }

        let top = self.zcorn.surface(k, Surface::Top);
        let delta = Array4::from_shape_fn(self.dims.surface_shape(), |(j, rs, i, cs)| {
            target[[j + rs, i + cs]] - top[[j, rs, i, cs]]
        });

        if tile_to_bottom {
            let both = stack(Axis(0), &[delta.view(), delta.view()]).map_err(|_| {
                GridToolError::shape_mismatch(
                    "displacement",
                    &self.dims.layer_shape(),
                    delta.shape(),
                )
            })?;
            Ok(Displacement::both_surfaces(both))
        } else {
            Ok(Displacement::top_surface(delta))
        }
    }
}
