//! Distance between layer surfaces.
//!
//! A deformed layer is compared against a reference surface by taking, for
//! every cell centre of the deformed layer, the Manhattan distance to the
//! closest reference point. Typical use: build the index once from
//! [`GridTool::layer_top_centers`](crate::GridTool::layer_top_centers) of a
//! reference grid, then query it with the centres of each edited grid.

use nalgebra::Point3;

use crate::error::{GridToolError, Result};

/// Nearest-neighbour index over a fixed set of surface points.
#[derive(Debug, Clone)]
pub struct SurfaceIndex {
    points: Vec<Point3<f64>>,
}

impl SurfaceIndex {
    /// Build an index. The point set must be non-empty and finite.
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.is_empty() {
            return Err(GridToolError::SurfaceError(
                "reference surface has no points".to_string(),
            ));
        }
        if points.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(GridToolError::NonFinite("reference surface"));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Manhattan distance from `query` to its closest reference point.
    pub fn nearest_distance(&self, query: &Point3<f64>) -> f64 {
        self.points
            .iter()
            .map(|p| (p - query).lp_norm(1))
            .fold(f64::INFINITY, f64::min)
    }

    /// Nearest distances for every query point, in query order.
    pub fn nearest_distances(&self, queries: &[Point3<f64>]) -> Vec<f64> {
        queries.iter().map(|q| self.nearest_distance(q)).collect()
    }

    /// Mean nearest distance, or `None` for an empty query.
    pub fn mean_distance(&self, queries: &[Point3<f64>]) -> Option<f64> {
        if queries.is_empty() {
            return None;
        }
        let total: f64 = queries.iter().map(|q| self.nearest_distance(q)).sum();
        Some(total / queries.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference_rejected() {
        assert!(matches!(
            SurfaceIndex::new(Vec::new()),
            Err(GridToolError::SurfaceError(_))
        ));
    }

    #[test]
    fn test_non_finite_reference_rejected() {
        let points = vec![Point3::new(0.0, f64::NAN, 0.0)];
        assert!(SurfaceIndex::new(points).is_err());
    }

    #[test]
    fn test_manhattan_nearest() {
        let index = SurfaceIndex::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(index.nearest_distance(&Point3::new(1.0, 2.0, 3.0)), 6.0);
        assert_eq!(index.nearest_distance(&Point3::new(9.0, -1.0, 1.0)), 3.0);
    }

    #[test]
    fn test_mean_distance() {
        let index = SurfaceIndex::new(vec![Point3::new(0.0, 0.0, 0.0)]).unwrap();
        let queries = [Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, -4.0)];
        assert_eq!(index.nearest_distances(&queries), vec![2.0, 4.0]);
        assert_eq!(index.mean_distance(&queries), Some(3.0));
        assert_eq!(index.mean_distance(&[]), None);
    }
}
