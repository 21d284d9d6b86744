//! Layer and corner deformation.

use ndarray::{Array, Array4, ArrayD, ArrayView4, ArrayViewMut4, Axis, Dimension, Ix4, Ix5, Zip};
use tracing::instrument;

use super::GridTool;
use crate::config::ThicknessMode;
use crate::error::{GridToolError, Result};
use crate::types::{ConflictKind, DeformationReport, Displacement, Orientation, Propagation, Surface};

impl GridTool {
    /// Move every corner of layer `k` and reconcile the rest of the stack.
    ///
    /// Moved corners never pass the global top (layer 0 top) or global
    /// bottom (layer nz-1 bottom) as they were before the call; a corner
    /// that would is set to the bound instead. With a fixed layer thickness
    /// only the top surface takes the displacement and the bottom follows at
    /// top + thickness.
    ///
    /// Conflicts are resolved in place and listed in the returned report.
    /// Nothing is rolled back.
    #[instrument(level = "debug", skip(self, displacement))]
    pub fn move_zcorn_layer(
        &mut self,
        k: usize,
        displacement: &Displacement,
        propagation: Propagation,
    ) -> Result<DeformationReport> {
        self.dims.check_layer(k)?;

        let mut report = DeformationReport::new(k);
        let upper = self.zcorn.surface(0, Surface::Top).to_owned();
        let lower = self
            .zcorn
            .surface(self.dims.nz - 1, Surface::Bottom)
            .to_owned();

        match self.mode {
            ThicknessMode::Free => {
                let shape = self.dims.layer_shape();
                let h = fixed_dim::<Ix5>(displacement.resolve(&shape)?, &shape)?;

                for surface in [Surface::Top, Surface::Bottom] {
                    let dh = h.index_axis(Axis(0), surface.index());
                    let (above, below) =
                        clamp_move(self.zcorn.surface_mut(k, surface), dh, &upper, &lower);
                    report.record(k, ConflictKind::TopBoundClamp, above);
                    report.record(k, ConflictKind::BottomBoundClamp, below);
                }

                self.collapse_inverted(k, &mut report);
            }
            ThicknessMode::Fixed(thickness) => {
                let shape = self.dims.surface_shape();
                let h = fixed_dim::<Ix4>(displacement.resolve(&shape)?, &shape)?;

                let (above, below) =
                    clamp_move(self.zcorn.surface_mut(k, Surface::Top), h.view(), &upper, &lower);
                report.record(k, ConflictKind::TopBoundClamp, above);
                report.record(k, ConflictKind::BottomBoundClamp, below);

                let top = self.zcorn.surface(k, Surface::Top).to_owned();
                let mut clamped = 0;
                Zip::from(self.zcorn.surface_mut(k, Surface::Bottom))
                    .and(&top)
                    .and(&lower)
                    .for_each(|bottom, &t, &lo| {
                        let z = t + thickness;
                        if z > lo {
                            *bottom = lo;
                            clamped += 1;
                        } else {
                            *bottom = z;
                        }
                    });
                report.record(k, ConflictKind::BottomBoundClamp, clamped);
            }
        }

        match propagation {
            Propagation::Redistribute => self.redistribute(k, &upper, &lower),
            Propagation::LocalRealign => self.realign_neighbours(k, &mut report),
        }

        tracing::debug!(
            layer = k,
            conflicts = report.conflicts.len(),
            clamped = report.clamped_corners(),
            "Moved layer"
        );

        Ok(report)
    }

    /// Add `h` to a single corner. No clamping and no propagation.
    pub fn move_zcorn_single(
        &mut self,
        i: usize,
        j: usize,
        k: usize,
        h: f64,
        orient: Orientation,
        surface: Surface,
    ) -> Result<()> {
        self.dims.check_cell(i, j, k)?;
        if !h.is_finite() {
            return Err(GridToolError::NonFinite("displacement"));
        }
        *self.zcorn.corner_mut(i, j, k, orient, surface) += h;
        Ok(())
    }

    /// Re-space layers above and below `k` linearly between layer k and the
    /// global bounds.
    fn redistribute(&mut self, k: usize, upper: &Array4<f64>, lower: &Array4<f64>) {
        let nz = self.dims.nz;

        if k > 0 {
            let top_k = self.zcorn.surface(k, Surface::Top).to_owned();
            let step = (&top_k - upper) / k as f64;

            for layer in 0..k {
                let top = upper + &(&step * layer as f64);
                let bottom = if layer + 1 == k {
                    top_k.clone()
                } else {
                    upper + &(&step * (layer + 1) as f64)
                };
                self.zcorn.surface_mut(layer, Surface::Top).assign(&top);
                self.zcorn.surface_mut(layer, Surface::Bottom).assign(&bottom);
            }
        }

        if k + 1 < nz {
            let below = nz - 1 - k;
            let bottom_k = self.zcorn.surface(k, Surface::Bottom).to_owned();
            let step = (lower - &bottom_k) / below as f64;

            for m in 0..below {
                let layer = k + 1 + m;
                let top = &bottom_k + &(&step * m as f64);
                let bottom = if m + 1 == below {
                    lower.clone()
                } else {
                    &bottom_k + &(&step * (m + 1) as f64)
                };
                self.zcorn.surface_mut(layer, Surface::Top).assign(&top);
                self.zcorn.surface_mut(layer, Surface::Bottom).assign(&bottom);
            }
        }
    }

    /// Snap the immediate neighbours of layer `k` onto it.
    ///
    /// Layer k is first confined between the top of the layer above and the
    /// bottom of the layer below, so neither neighbour can end up inverted.
    fn realign_neighbours(&mut self, k: usize, report: &mut DeformationReport) {
        if k > 0 {
            let floor = self.zcorn.surface(k - 1, Surface::Top).to_owned();
            let crossed = raise_to(self.zcorn.surface_mut(k, Surface::Top), &floor);
            raise_to(self.zcorn.surface_mut(k, Surface::Bottom), &floor);
            report.record(k - 1, ConflictKind::CrossedAbove, crossed);
        }

        if k + 1 < self.dims.nz {
            let ceiling = self.zcorn.surface(k + 1, Surface::Bottom).to_owned();
            let crossed = lower_to(self.zcorn.surface_mut(k, Surface::Bottom), &ceiling);
            lower_to(self.zcorn.surface_mut(k, Surface::Top), &ceiling);
            report.record(k + 1, ConflictKind::CrossedBelow, crossed);
        }

        if k > 0 {
            let top = self.zcorn.surface(k, Surface::Top).to_owned();
            self.zcorn.surface_mut(k - 1, Surface::Bottom).assign(&top);
        }
        if k + 1 < self.dims.nz {
            let bottom = self.zcorn.surface(k, Surface::Bottom).to_owned();
            self.zcorn.surface_mut(k + 1, Surface::Top).assign(&bottom);
        }
    }

    /// Pull bottom corners of layer `k` that lie above their top down onto it.
    fn collapse_inverted(&mut self, k: usize, report: &mut DeformationReport) {
        let top = self.zcorn.surface(k, Surface::Top).to_owned();
        let mut collapsed = 0;
        Zip::from(self.zcorn.surface_mut(k, Surface::Bottom))
            .and(&top)
            .for_each(|bottom, &t| {
                if t > *bottom {
                    *bottom = t;
                    collapsed += 1;
                }
            });
        report.record(k, ConflictKind::Inverted, collapsed);
    }
}

/// Add `dh` to `surface`, clamping to `[upper, lower]`. Returns the number of
/// corners clamped to each bound.
fn clamp_move(
    surface: ArrayViewMut4<'_, f64>,
    dh: ArrayView4<'_, f64>,
    upper: &Array4<f64>,
    lower: &Array4<f64>,
) -> (usize, usize) {
    let (mut above, mut below) = (0, 0);
    Zip::from(surface)
        .and(dh)
        .and(upper)
        .and(lower)
        .for_each(|z, &d, &up, &lo| {
            let moved = *z + d;
            if moved < up {
                *z = up;
                above += 1;
            } else if moved > lo {
                *z = lo;
                below += 1;
            } else {
                *z = moved;
            }
        });
    (above, below)
}

/// Raise corners shallower than `floor` onto it. Returns how many moved.
fn raise_to(surface: ArrayViewMut4<'_, f64>, floor: &Array4<f64>) -> usize {
    let mut moved = 0;
    Zip::from(surface).and(floor).for_each(|z, &f| {
        if *z < f {
            *z = f;
            moved += 1;
        }
    });
    moved
}

/// Lower corners deeper than `ceiling` onto it. Returns how many moved.
fn lower_to(surface: ArrayViewMut4<'_, f64>, ceiling: &Array4<f64>) -> usize {
    let mut moved = 0;
    Zip::from(surface).and(ceiling).for_each(|z, &c| {
        if *z > c {
            *z = c;
            moved += 1;
        }
    });
    moved
}

fn fixed_dim<D: Dimension>(h: ArrayD<f64>, expected: &[usize]) -> Result<Array<f64, D>> {
    let actual = h.shape().to_vec();
    h.into_dimensionality::<D>()
        .map_err(|_| GridToolError::shape_mismatch("displacement", expected, &actual))
}
