//! Cell corner positions in 3-D.

use nalgebra::Point3;

use super::GridTool;
use crate::error::Result;
use crate::types::{Orientation, Surface};

impl GridTool {
    /// The eight corners of cell (i, j, k).
    ///
    /// Order: top SW, SE, NW, NE, then bottom SW, SE, NW, NE. Each corner is
    /// the point on its pillar at the corner's depth.
    pub fn cell_corners(&self, i: usize, j: usize, k: usize) -> Result<[Point3<f64>; 8]> {
        self.dims.check_cell(i, j, k)?;

        let mut corners = [Point3::origin(); 8];
        for (s, surface) in [Surface::Top, Surface::Bottom].into_iter().enumerate() {
            for (n, orient) in Orientation::ALL.into_iter().enumerate() {
                let (cs, rs) = orient.offsets();
                let pillar = self.coord.pillar(i + cs, j + rs)?;
                let z = self.zcorn.corner(i, j, k, orient, surface);
                corners[4 * s + n] = pillar.point_at_depth(z)?;
            }
        }
        Ok(corners)
    }

    /// Centre of the top face of every cell in layer `k`.
    ///
    /// Cells are visited with i in the outer loop and j in the inner loop.
    pub fn layer_top_centers(&self, k: usize) -> Result<Vec<Point3<f64>>> {
        self.dims.check_layer(k)?;

        let mut centers = Vec::with_capacity(self.dims.nx * self.dims.ny);
        for i in 0..self.dims.nx {
            for j in 0..self.dims.ny {
                let corners = self.cell_corners(i, j, k)?;
                let sum = corners[..4]
                    .iter()
                    .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
                centers.push(Point3::from(sum / 4.0));
            }
        }
        Ok(centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridToolConfig;
    use crate::source::GridDefinition;
    use crate::types::GridDims;

    fn regular(nx: usize, ny: usize, nz: usize) -> GridTool {
        let dims = GridDims::new(nx, ny, nz).unwrap();
        let grid = GridDefinition::regular(dims, 100.0, 50.0, 1000.0, 10.0);
        GridTool::new(&grid, GridToolConfig::default()).unwrap()
    }

    #[test]
    fn test_cell_corners_regular_grid() {
        let tool = regular(2, 2, 2);
        let c = tool.cell_corners(1, 0, 1).unwrap();
        assert_eq!(c[0], Point3::new(100.0, 0.0, 1010.0)); // top SW
        assert_eq!(c[1], Point3::new(200.0, 0.0, 1010.0)); // top SE
        assert_eq!(c[2], Point3::new(100.0, 50.0, 1010.0)); // top NW
        assert_eq!(c[3], Point3::new(200.0, 50.0, 1010.0)); // top NE
        assert_eq!(c[7], Point3::new(200.0, 50.0, 1020.0)); // bottom NE
    }

    #[test]
    fn test_cell_corners_follow_slanted_pillar() {
        let dims = GridDims::new(1, 1, 1).unwrap();
        let mut grid = GridDefinition::regular(dims, 100.0, 100.0, 0.0, 100.0);
        // Pillar (0, 0) leans east by 20 over its 100 m length.
        grid.coord[..6].copy_from_slice(&[0.0, 0.0, 0.0, 20.0, 0.0, 100.0]);
        let tool = GridTool::new(&grid, GridToolConfig::default()).unwrap();

        let c = tool.cell_corners(0, 0, 0).unwrap();
        assert_eq!(c[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(c[4], Point3::new(20.0, 0.0, 100.0));
    }

    #[test]
    fn test_layer_top_centers_order() {
        let tool = regular(2, 3, 1);
        let centers = tool.layer_top_centers(0).unwrap();
        assert_eq!(centers.len(), 6);
        assert_eq!(centers[0], Point3::new(50.0, 25.0, 1000.0));
        // i outer, j inner: second entry is cell (0, 1).
        assert_eq!(centers[1], Point3::new(50.0, 75.0, 1000.0));
        assert_eq!(centers[3], Point3::new(150.0, 25.0, 1000.0));
    }

    #[test]
    fn test_corner_queries_check_indices() {
        let tool = regular(1, 1, 1);
        assert!(tool.cell_corners(0, 0, 1).is_err());
        assert!(tool.layer_top_centers(1).is_err());
    }
}
