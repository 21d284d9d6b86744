//! Scalar root finding for pillar/surface intersection.
//!
//! The residual along a pillar is an arbitrary caller-supplied function, so
//! there is no closed form. We run secant steps from a starting point; once
//! two iterates straddle a sign change the search keeps that bracket and
//! falls back to bisection whenever a secant step would leave it.

use crate::config::SolverConfig;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// Best abscissa found (smallest |residual|, latest on ties).
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Residual evaluations after the initial guess.
    pub iterations: usize,
    /// `|residual| <= tolerance`.
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bracket {
    a: f64,
    ga: f64,
    b: f64,
}

impl Bracket {
    fn contains(&self, x: f64) -> bool {
        let (lo, hi) = if self.a < self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        };
        x > lo && x < hi
    }

    fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }

    fn update(&mut self, x: f64, g: f64) {
        if g.signum() == self.ga.signum() {
            self.a = x;
            self.ga = g;
        } else {
            self.b = x;
        }
    }
}

/// Find `x` with `f(x) ≈ 0`, starting at `x0` with a first secant step of `step`.
pub fn find_root<F>(mut f: F, x0: f64, step: f64, config: &SolverConfig) -> RootSolution
where
    F: FnMut(f64) -> f64,
{
    let tol = config.tolerance;

    let mut best = RootSolution {
        x: x0,
        residual: f(x0),
        iterations: 0,
        converged: false,
    };
    if best.residual.abs() <= tol {
        best.converged = true;
        return best;
    }

    let (mut xa, mut ga) = (x0, best.residual);
    let mut xb = x0 + step;
    let mut gb = f(xb);
    let mut iterations = 1;
    let mut bracket = None;

    if gb.is_finite() && ga.is_finite() && ga * gb < 0.0 {
        bracket = Some(Bracket { a: xa, ga, b: xb });
    }

    loop {
        if gb.is_finite() && (!best.residual.is_finite() || gb.abs() <= best.residual.abs()) {
            best.x = xb;
            best.residual = gb;
        }

        tracing::trace!(iteration = iterations, x = xb, residual = gb, "Root search step");

        if best.residual.abs() <= tol || iterations >= config.max_iterations {
            break;
        }

        if let Some(br) = &bracket {
            if br.width() <= f64::EPSILON * (1.0 + br.a.abs()) {
                break;
            }
        }

        let denom = gb - ga;
        let mut xc = if denom != 0.0 && denom.is_finite() {
            xb - gb * (xb - xa) / denom
        } else {
            f64::NAN
        };

        if let Some(br) = &bracket {
            if !xc.is_finite() || !br.contains(xc) {
                xc = 0.5 * (br.a + br.b);
            }
        }

        if !xc.is_finite() {
            // Flat or non-finite residual and no sign change to fall back on.
            break;
        }

        let gc = f(xc);
        iterations += 1;
        if !gc.is_finite() {
            break;
        }

        match bracket.as_mut() {
            Some(br) => br.update(xc, gc),
            None if gb * gc < 0.0 => bracket = Some(Bracket { a: xb, ga: gb, b: xc }),
            None => {}
        }

        xa = xb;
        ga = gb;
        xb = xc;
        gb = gc;
    }

    best.iterations = iterations;
    best.converged = best.residual.abs() <= tol;

    if !best.converged {
        tracing::debug!(
            x = best.x,
            residual = best.residual,
            iterations,
            "Root search did not converge"
        );
    }

    best
}
