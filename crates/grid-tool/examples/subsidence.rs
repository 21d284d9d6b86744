//! Drape a layer onto a dipping horizon and report how far it moved.
//!
//! Run with: RUST_LOG=grid_tool=debug cargo run --package grid-tool --example subsidence

use anyhow::Context;
use ndarray::Array2;
use tracing_subscriber::{fmt, EnvFilter};

use grid_tool::{
    GridDefinition, GridDims, GridTool, GridToolConfig, Propagation, SurfaceIndex,
};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_tool=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let dims = GridDims::new(6, 4, 5)?;
    let mut grid = GridDefinition::regular(dims, 100.0, 100.0, 2000.0, 8.0);
    // Lean every pillar 15 m east so the intersection has to be solved.
    for pillar in grid.coord.chunks_mut(6) {
        pillar[3] += 15.0;
    }

    let mut tool = GridTool::new(&grid, GridToolConfig::from_env())?;
    let reference = SurfaceIndex::new(tool.layer_top_centers(2)?)?;

    let horizon = |x: f64, y: f64| 2012.0 + 0.004 * x + 2.0 * (0.01 * y).sin();
    let mut target = Array2::zeros((dims.ny + 1, dims.nx + 1));
    for ((jp, ip), depth) in target.indexed_iter_mut() {
        let hit = tool
            .pillar_intersection(horizon, ip, jp)
            .with_context(|| format!("intersecting pillar ({}, {})", ip, jp))?;
        *depth = hit.depth;
    }

    let delta = tool.zcorn_layer_distance_simple(target.view(), 2, true)?;
    let report = tool.move_zcorn_layer(2, &delta, Propagation::LocalRealign)?;

    let moved = reference
        .mean_distance(&tool.layer_top_centers(2)?)
        .unwrap_or_default();

    println!("Grid {}: layer 2 draped onto horizon", tool.dims());
    println!("  mean displacement: {:.3} m", moved);
    println!("  conflicts: {}", report.conflicts.len());
    for conflict in &report.conflicts {
        println!(
            "    layer {}: {} ({} corners)",
            conflict.layer, conflict.kind, conflict.corners
        );
    }

    Ok(())
}
