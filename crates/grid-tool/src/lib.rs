//! Corner-Point Grid Editing
//!
//! This crate edits the geometry of corner-point reservoir grids in memory.
//! A grid is held as two tensors:
//!
//! - **ZCORN**: the depth of every cell corner, shape `(nz, 2, ny, 2, nx, 2)`
//! - **COORD**: the top and bottom endpoint of every pillar, shape
//!   `(ny + 1, nx + 1, 2, 3)`
//!
//! On top of these, [`GridTool`] provides:
//!
//! - **Layer deformation** with clamping against the global top/bottom
//!   surfaces and either local realignment or linear redistribution of the
//!   remaining layers
//! - **Single-corner edits** addressed by compass orientation
//! - **Pillar targets**: conversion of per-pillar target depths into
//!   per-corner displacements
//! - **Pillar/surface intersection** by numerical root finding
//!
//! # Architecture
//!
//! ```text
//! GridSource (loader)
//!      │  dims, flat ZCORN, flat COORD
//!      ▼
//! GridTool::new(source, config)
//!      │
//!      ├─► move_zcorn_layer(k, displacement, propagation)
//!      │         │
//!      │         ├─► clamp to global bounds
//!      │         │
//!      │         └─► Redistribute | LocalRealign
//!      │                   │
//!      │                   └─► DeformationReport (conflicts)
//!      │
//!      ├─► pillar_intersection(surf, ip, jp) ─► PillarIntersection
//!      │
//!      └─► export() ─► GridDefinition (writer)
//! ```
//!
//! # Example
//!
//! ```
//! use grid_tool::{Displacement, GridDefinition, GridDims, GridTool, GridToolConfig, Propagation, Surface};
//!
//! let dims = GridDims::new(2, 2, 3).unwrap();
//! let grid = GridDefinition::regular(dims, 100.0, 100.0, 0.0, 10.0);
//! let mut tool = GridTool::new(&grid, GridToolConfig::default()).unwrap();
//!
//! let report = tool
//!     .move_zcorn_layer(1, &Displacement::Uniform(-2.0), Propagation::LocalRealign)
//!     .unwrap();
//! assert!(report.is_clean());
//! assert!(tool.zcorn().surface(0, Surface::Bottom).iter().all(|&z| z == 8.0));
//! ```

pub mod config;
pub mod coord;
pub mod error;
pub mod solver;
pub mod source;
pub mod surface;
pub mod tool;
pub mod types;
pub mod zcorn;

// Re-export commonly used types at crate root
pub use config::{GridToolConfig, SolverConfig, ThicknessMode};
pub use coord::{CoordArray, FreeAxis, Pillar};
pub use error::{GridToolError, Result};
pub use solver::{find_root, RootSolution};
pub use source::{GridDefinition, GridSource};
pub use surface::SurfaceIndex;
pub use tool::{GridTool, PillarIntersection};
pub use types::{
    ConflictKind, DeformationReport, Displacement, GridDims, LayerConflict, Orientation,
    Propagation, Surface,
};
pub use zcorn::ZcornArray;
