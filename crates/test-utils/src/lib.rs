//! Shared test utilities for the grid-tool workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Approximate float assertions
//! - Synthetic corner-point grid generators
//! - Common test fixtures
//!
//! Grids are produced as flat ZCORN/COORD vectors so this crate stays
//! independent of `grid-tool` itself.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, layered_grid, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of 3-D points given as `(x, y, z)`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_xyz_approx_eq;
///
/// assert_xyz_approx_eq!((1.0001, 2.0001, 3.0), (1.0, 2.0, 3.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_xyz_approx_eq {
    (($x1:expr, $y1:expr, $z1:expr), ($x2:expr, $y2:expr, $z2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
        $crate::assert_approx_eq!($z1, $z2, $epsilon);
    }};
}

/// Assert that every value yielded by an iterator is within `epsilon` of
/// `expected`.
///
/// ```ignore
/// use test_utils::assert_all_approx_eq;
///
/// assert_all_approx_eq!([8.0, 8.0000001].iter(), 8.0, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_all_approx_eq {
    ($iter:expr, $expected:expr, $epsilon:expr) => {{
        for (idx, value) in $iter.into_iter().enumerate() {
            let value: f64 = *value as f64;
            let expected: f64 = $expected as f64;
            let epsilon: f64 = $epsilon as f64;
            if (value - expected).abs() > epsilon {
                panic!(
                    "assertion failed at index {}: `{:?}` is not within `{:?}` of `{:?}`",
                    idx, value, epsilon, expected
                );
            }
        }
    }};
}
