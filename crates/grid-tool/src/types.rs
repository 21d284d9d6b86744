//! Core types for grid editing.

use std::str::FromStr;

use ndarray::{Array4, Array5, ArrayD};
use serde::{Deserialize, Serialize};

use crate::error::{GridToolError, Result};

/// Cell counts of a corner-point grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    /// Create grid dimensions, rejecting zero extents.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridToolError::invalid_dimensions(format!(
                "every extent must be >= 1, got {}x{}x{}",
                nx, ny, nz
            )));
        }
        Ok(Self { nx, ny, nz })
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Shape of the full corner-depth tensor: (nz, 2, ny, 2, nx, 2).
    pub fn zcorn_shape(&self) -> [usize; 6] {
        [self.nz, 2, self.ny, 2, self.nx, 2]
    }

    /// Shape of one surface of one layer: (ny, 2, nx, 2).
    pub fn surface_shape(&self) -> [usize; 4] {
        [self.ny, 2, self.nx, 2]
    }

    /// Shape of both surfaces of one layer: (2, ny, 2, nx, 2).
    pub fn layer_shape(&self) -> [usize; 5] {
        [2, self.ny, 2, self.nx, 2]
    }

    /// Shape of the pillar-coordinate tensor: (ny + 1, nx + 1, 2, 3).
    pub fn coord_shape(&self) -> [usize; 4] {
        [self.ny + 1, self.nx + 1, 2, 3]
    }

    /// Shape of a per-pillar scalar field: (ny + 1, nx + 1).
    pub fn pillar_shape(&self) -> [usize; 2] {
        [self.ny + 1, self.nx + 1]
    }

    /// Number of values in a flat ZCORN export.
    pub fn zcorn_len(&self) -> usize {
        8 * self.cell_count()
    }

    /// Number of values in a flat COORD export.
    pub fn coord_len(&self) -> usize {
        6 * (self.nx + 1) * (self.ny + 1)
    }

    /// Check that cell (i, j, k) lies inside the grid.
    pub fn check_cell(&self, i: usize, j: usize, k: usize) -> Result<()> {
        if i >= self.nx || j >= self.ny || k >= self.nz {
            return Err(GridToolError::CellOutOfRange {
                i,
                j,
                k,
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }
        Ok(())
    }

    /// Check that layer k lies inside the grid.
    pub fn check_layer(&self, k: usize) -> Result<()> {
        if k >= self.nz {
            return Err(GridToolError::LayerOutOfRange { k, nz: self.nz });
        }
        Ok(())
    }

    /// Check that pillar (ip, jp) lies inside the pillar lattice.
    pub fn check_pillar(&self, ip: usize, jp: usize) -> Result<()> {
        if ip > self.nx || jp > self.ny {
            return Err(GridToolError::PillarOutOfRange {
                ip,
                jp,
                cols: self.nx + 1,
                rows: self.ny + 1,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for GridDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Top or bottom face of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Top,
    Bottom,
}

impl Surface {
    /// Index along the surface axis of the corner-depth tensor.
    pub fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

impl From<bool> for Surface {
    /// `true` selects the bottom surface.
    fn from(bottom: bool) -> Self {
        if bottom {
            Self::Bottom
        } else {
            Self::Top
        }
    }
}

/// Compass position of a corner within a cell.
///
/// ```text
///   NW --- NE    j
///   |       |    ^
///   |       |    |
///   SW --- SE     ---> i
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    NW,
    NE,
    SW,
    SE,
}

impl Orientation {
    /// All four orientations in corner-point order (SW, SE, NW, NE).
    pub const ALL: [Orientation; 4] = [Self::SW, Self::SE, Self::NW, Self::NE];

    /// (column-side, row-side) offsets of this corner.
    pub fn offsets(self) -> (usize, usize) {
        match self {
            Self::SW => (0, 0),
            Self::SE => (1, 0),
            Self::NW => (0, 1),
            Self::NE => (1, 1),
        }
    }
}

impl FromStr for Orientation {
    type Err = GridToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NW" => Ok(Self::NW),
            "NE" => Ok(Self::NE),
            "SW" => Ok(Self::SW),
            "SE" => Ok(Self::SE),
            _ => Err(GridToolError::UnknownOrientation(s.to_string())),
        }
    }
}

/// Displacement applied to the corners of one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Displacement {
    /// The same value for every moved corner.
    Uniform(f64),
    /// One value per moved corner. Shape (2, ny, 2, nx, 2) when the layer
    /// thickness is free, (ny, 2, nx, 2) when it is fixed.
    PerCorner(ArrayD<f64>),
}

impl Displacement {
    /// Per-corner displacement of the top surface only.
    pub fn top_surface(h: Array4<f64>) -> Self {
        Self::PerCorner(h.into_dyn())
    }

    /// Per-corner displacement of both surfaces.
    pub fn both_surfaces(h: Array5<f64>) -> Self {
        Self::PerCorner(h.into_dyn())
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }

    /// Resolve into a tensor of the given shape, broadcasting a uniform value.
    pub(crate) fn resolve(&self, shape: &[usize]) -> Result<ArrayD<f64>> {
        let resolved = match self {
            Self::Uniform(h) => {
                if !h.is_finite() {
                    return Err(GridToolError::NonFinite("displacement"));
                }
                ArrayD::from_elem(shape.to_vec(), *h)
            }
            Self::PerCorner(h) => {
                if h.shape() != shape {
                    return Err(GridToolError::shape_mismatch(
                        "displacement",
                        shape,
                        h.shape(),
                    ));
                }
                if h.iter().any(|v| !v.is_finite()) {
                    return Err(GridToolError::NonFinite("displacement"));
                }
                h.clone()
            }
        };
        Ok(resolved)
    }
}

impl From<f64> for Displacement {
    fn from(h: f64) -> Self {
        Self::Uniform(h)
    }
}

/// How a layer deformation is reconciled with the rest of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Propagation {
    /// Only the immediate neighbours are snapped to the moved layer.
    #[default]
    LocalRealign,
    /// All layers above and below are re-spaced linearly between the moved
    /// layer and the fixed global top/bottom surfaces.
    Redistribute,
}

impl From<bool> for Propagation {
    /// `true` selects redistribution.
    fn from(redistribute: bool) -> Self {
        if redistribute {
            Self::Redistribute
        } else {
            Self::LocalRealign
        }
    }
}

impl std::fmt::Display for Propagation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalRealign => write!(f, "local_realign"),
            Self::Redistribute => write!(f, "redistribute"),
        }
    }
}

/// Kind of geometric conflict resolved during a deformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Corners would have moved above the global top surface.
    TopBoundClamp,
    /// Corners would have moved below the global bottom surface.
    BottomBoundClamp,
    /// The moved layer's top passed its own bottom; the layer was collapsed.
    Inverted,
    /// The moved layer passed the top of the layer above, which would have
    /// inverted it; the moved corners were held at that top.
    CrossedAbove,
    /// The moved layer passed the bottom of the layer below; the moved
    /// corners were held at that bottom.
    CrossedBelow,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TopBoundClamp => "top_bound_clamp",
            Self::BottomBoundClamp => "bottom_bound_clamp",
            Self::Inverted => "inverted",
            Self::CrossedAbove => "crossed_above",
            Self::CrossedBelow => "crossed_below",
        };
        write!(f, "{}", s)
    }
}

/// One recoverable conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConflict {
    /// Layer whose geometry was clamped.
    pub layer: usize,
    /// Layer that was being moved.
    pub moved_layer: usize,
    pub kind: ConflictKind,
    /// Number of corners affected.
    pub corners: usize,
}

/// Outcome of a layer deformation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeformationReport {
    /// Layer that was moved.
    pub layer: usize,
    /// Conflicts absorbed by clamping, in the order they were resolved.
    pub conflicts: Vec<LayerConflict>,
}

impl DeformationReport {
    pub fn new(layer: usize) -> Self {
        Self {
            layer,
            conflicts: Vec::new(),
        }
    }

    /// True if the deformation was applied without any clamping.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// True if a conflict of the given kind was recorded.
    pub fn has(&self, kind: ConflictKind) -> bool {
        self.conflicts.iter().any(|c| c.kind == kind)
    }

    /// Total number of clamped corners across all conflicts.
    pub fn clamped_corners(&self) -> usize {
        self.conflicts.iter().map(|c| c.corners).sum()
    }

    /// Record a conflict and emit a warning. Zero-corner conflicts are ignored.
    pub(crate) fn record(&mut self, layer: usize, kind: ConflictKind, corners: usize) {
        if corners == 0 {
            return;
        }
        tracing::warn!(
            layer,
            moved_layer = self.layer,
            corners,
            kind = %kind,
            "Corner conflict resolved by clamping"
        );
        self.conflicts.push(LayerConflict {
            layer,
            moved_layer: self.layer,
            kind,
            corners,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_dims_reject_zero() {
        assert!(GridDims::new(0, 1, 1).is_err());
        assert!(GridDims::new(1, 0, 1).is_err());
        assert!(GridDims::new(1, 1, 0).is_err());
    }

    #[test]
    fn test_dims_shapes() {
        let dims = GridDims::new(3, 2, 4).unwrap();
        assert_eq!(dims.zcorn_shape(), [4, 2, 2, 2, 3, 2]);
        assert_eq!(dims.coord_shape(), [3, 4, 2, 3]);
        assert_eq!(dims.zcorn_len(), 8 * 24);
        assert_eq!(dims.coord_len(), 6 * 12);
        assert_eq!(dims.to_string(), "3x2x4");
    }

    #[test]
    fn test_dims_bounds_checks() {
        let dims = GridDims::new(2, 2, 3).unwrap();
        assert!(dims.check_cell(1, 1, 2).is_ok());
        assert!(dims.check_cell(2, 0, 0).is_err());
        assert!(dims.check_layer(3).is_err());
        assert!(dims.check_pillar(2, 2).is_ok());
        assert!(dims.check_pillar(3, 0).is_err());
    }

    #[test]
    fn test_orientation_offsets() {
        assert_eq!(Orientation::SW.offsets(), (0, 0));
        assert_eq!(Orientation::SE.offsets(), (1, 0));
        assert_eq!(Orientation::NW.offsets(), (0, 1));
        assert_eq!(Orientation::NE.offsets(), (1, 1));
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("ne".parse::<Orientation>().unwrap(), Orientation::NE);
        assert_eq!("SW".parse::<Orientation>().unwrap(), Orientation::SW);
        assert!(matches!(
            "N".parse::<Orientation>(),
            Err(GridToolError::UnknownOrientation(_))
        ));
    }

    #[test]
    fn test_uniform_displacement_broadcasts() {
        let h = Displacement::Uniform(-2.0).resolve(&[2, 1, 2, 1, 2]).unwrap();
        assert_eq!(h.shape(), &[2, 1, 2, 1, 2]);
        assert!(h.iter().all(|&v| v == -2.0));
    }

    #[test]
    fn test_per_corner_shape_checked() {
        let h = Displacement::top_surface(Array4::zeros((1, 2, 1, 2)));
        assert!(h.resolve(&[1, 2, 1, 2]).is_ok());
        assert!(matches!(
            h.resolve(&[2, 1, 2, 1, 2]),
            Err(GridToolError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_non_finite_displacement_rejected() {
        assert!(Displacement::Uniform(f64::NAN).resolve(&[1]).is_err());
        let mut h = Array4::zeros((1, 2, 1, 2));
        h[[0, 1, 0, 1]] = f64::INFINITY;
        assert!(Displacement::top_surface(h).resolve(&[1, 2, 1, 2]).is_err());
    }

    #[test]
    fn test_report_ignores_empty_conflicts() {
        let mut report = DeformationReport::new(1);
        report.record(0, ConflictKind::CrossedAbove, 0);
        assert!(report.is_clean());
        report.record(0, ConflictKind::CrossedAbove, 3);
        assert!(report.has(ConflictKind::CrossedAbove));
        assert_eq!(report.clamped_corners(), 3);
        assert_eq!(report.conflicts[0].moved_layer, 1);
    }

    #[test]
    fn test_propagation_from_bool() {
        assert_eq!(Propagation::from(true), Propagation::Redistribute);
        assert_eq!(Propagation::from(false), Propagation::LocalRealign);
        assert_eq!(Propagation::default(), Propagation::LocalRealign);
    }
}
