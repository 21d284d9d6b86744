//! Pillar/surface intersection.

use nalgebra::Point3;

use super::GridTool;
use crate::coord::FreeAxis;
use crate::error::Result;
use crate::solver::find_root;

/// Where a pillar meets a depth surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarIntersection {
    /// Surface depth at the solved horizontal position.
    pub depth: f64,
    /// Solved point; `z` equals `depth`.
    pub point: Point3<f64>,
    /// Pillar depth minus surface depth at the solved position.
    pub residual: f64,
    pub iterations: usize,
    /// False when the solver gave up; `depth` is then only a best estimate.
    pub converged: bool,
    /// The point lies between the pillar's top and bottom endpoints.
    pub on_segment: bool,
}

impl GridTool {
    /// Intersect pillar (`ip`, `jp`) with the surface `z = surf(x, y)`.
    ///
    /// A vertical pillar needs no solve: the answer is `surf(x0, y0)`. A
    /// slanted pillar is walked along its free horizontal axis (x if x
    /// varies along the pillar, else y), starting at the pillar midpoint,
    /// until pillar depth and surface depth agree. The pillar is treated as
    /// an infinite line, so the crossing may fall outside the segment;
    /// `on_segment` says whether it did.
    pub fn pillar_intersection<F>(&self, surf: F, ip: usize, jp: usize) -> Result<PillarIntersection>
    where
        F: Fn(f64, f64) -> f64,
    {
        let pillar = self.coord.pillar(ip, jp)?;
        pillar.ensure_not_degenerate()?;

        let axis = match pillar.free_axis() {
            Some(axis) => axis,
            None => {
                let depth = surf(pillar.top.x, pillar.top.y);
                let (lo, hi) = min_max(pillar.top.z, pillar.bottom.z);
                return Ok(PillarIntersection {
                    depth,
                    point: Point3::new(pillar.top.x, pillar.top.y, depth),
                    residual: 0.0,
                    iterations: 0,
                    converged: depth.is_finite(),
                    on_segment: depth >= lo && depth <= hi,
                });
            }
        };

        let (start, end) = match axis {
            FreeAxis::X => (pillar.top.x, pillar.bottom.x),
            FreeAxis::Y => (pillar.top.y, pillar.bottom.y),
        };
        let mid = 0.5 * (start + end);
        let step = self.solver.initial_step_fraction * (end - start);

        let residual = |r: f64| {
            let p = pillar.point_at(pillar.param_at(axis, r));
            p.z - surf(p.x, p.y)
        };
        let root = find_root(residual, mid, step, &self.solver);

        let t = pillar.param_at(axis, root.x);
        let on_line = pillar.point_at(t);
        let depth = surf(on_line.x, on_line.y);

        if !root.converged {
            tracing::warn!(
                ip,
                jp,
                residual = root.residual,
                iterations = root.iterations,
                "Pillar intersection did not converge"
            );
        }

        Ok(PillarIntersection {
            depth,
            point: Point3::new(on_line.x, on_line.y, depth),
            residual: root.residual,
            iterations: root.iterations,
            converged: root.converged,
            on_segment: (0.0..=1.0).contains(&t),
        })
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
