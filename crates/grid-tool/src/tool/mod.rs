//! The grid editing tool.

mod deform;
mod distance;
mod geometry;
mod intersect;

pub use intersect::PillarIntersection;

use ndarray::{Array4, Array6};

use crate::config::{GridToolConfig, SolverConfig, ThicknessMode};
use crate::coord::{CoordArray, Pillar};
use crate::error::Result;
use crate::source::{GridDefinition, GridSource};
use crate::types::GridDims;
use crate::zcorn::ZcornArray;

/// Editor for the geometry of one corner-point grid.
///
/// Owns the corner-depth and pillar-coordinate tensors for the lifetime of an
/// editing session. All mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct GridTool {
    dims: GridDims,
    zcorn: ZcornArray,
    coord: CoordArray,
    mode: ThicknessMode,
    solver: SolverConfig,
}

impl GridTool {
    /// Load a grid from a source and validate the configuration.
    pub fn new(source: &impl GridSource, config: GridToolConfig) -> Result<Self> {
        config.validate()?;

        let dims = source.dims();
        let dims = GridDims::new(dims.nx, dims.ny, dims.nz)?;
        let zcorn = ZcornArray::from_flat(dims, source.export_zcorn())?;
        let coord = CoordArray::from_flat(dims, source.export_coord())?;
        let mode = ThicknessMode::from(&config);

        tracing::debug!(
            nx = dims.nx,
            ny = dims.ny,
            nz = dims.nz,
            mode = %mode,
            "Loaded corner-point grid"
        );

        Ok(Self {
            dims,
            zcorn,
            coord,
            mode,
            solver: config.solver,
        })
    }

    /// Hand the current arrays back as a flat grid definition.
    pub fn export(&self) -> GridDefinition {
        GridDefinition {
            dims: self.dims,
            zcorn: self.zcorn.to_flat(),
            coord: self.coord.to_flat(),
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn nx(&self) -> usize {
        self.dims.nx
    }

    pub fn ny(&self) -> usize {
        self.dims.ny
    }

    pub fn nz(&self) -> usize {
        self.dims.nz
    }

    pub fn mode(&self) -> ThicknessMode {
        self.mode
    }

    pub fn zcorn(&self) -> &ZcornArray {
        &self.zcorn
    }

    /// Replace the corner depths wholesale.
    ///
    /// Only the shape is checked; geometric consistency is the caller's job.
    pub fn set_zcorn(&mut self, zcorn: Array6<f64>) -> Result<()> {
        self.zcorn = ZcornArray::from_array(self.dims, zcorn)?;
        Ok(())
    }

    pub fn coord(&self) -> &CoordArray {
        &self.coord
    }

    /// Replace the pillar coordinates wholesale. Only the shape is checked.
    pub fn set_coord(&mut self, coord: Array4<f64>) -> Result<()> {
        self.coord = CoordArray::from_array(self.dims, coord)?;
        Ok(())
    }

    /// Pillar at column `ip`, row `jp`.
    pub fn pillar(&self, ip: usize, jp: usize) -> Result<Pillar> {
        self.coord.pillar(ip, jp)
    }

    /// Number of corners in layer k with top below bottom.
    pub fn inverted_corners(&self, k: usize) -> Result<usize> {
        self.dims.check_layer(k)?;
        Ok(self.zcorn.inverted_corners(k))
    }

    /// Ok if no layer has an inverted corner, otherwise the first offending layer.
    pub fn check_consistency(&self) -> std::result::Result<(), usize> {
        match self.zcorn.first_inverted_layer() {
            Some(k) => Err(k),
            None => Ok(()),
        }
    }
}
