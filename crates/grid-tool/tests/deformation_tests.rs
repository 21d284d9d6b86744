//! Layer deformation across whole grids.

use grid_tool::{
    ConflictKind, Displacement, GridDefinition, GridTool, GridToolConfig, Orientation,
    Propagation, Surface,
};
use ndarray::Array4;
use test_utils::{
    assert_all_approx_eq, assert_approx_eq, jittered_grid, stack, undulating_grid, SyntheticGrid,
};

fn load(grid: SyntheticGrid, config: GridToolConfig) -> GridTool {
    let def = GridDefinition::new(grid.nx, grid.ny, grid.nz, grid.zcorn, grid.coord).unwrap();
    GridTool::new(&def, config).unwrap()
}

fn surface(tool: &GridTool, k: usize, s: Surface) -> Array4<f64> {
    tool.zcorn().surface(k, s).to_owned()
}

/// Every corner of every surface agrees with the other corners on its pillar.
fn assert_pillar_continuity(tool: &GridTool) {
    let (nx, ny) = (tool.nx(), tool.ny());
    for k in 0..tool.nz() {
        for s in [Surface::Top, Surface::Bottom] {
            let mut seen = vec![None; (nx + 1) * (ny + 1)];
            let values = tool.zcorn().surface(k, s);
            for ((j, rs, i, cs), &z) in values.indexed_iter() {
                let slot = &mut seen[(j + rs) * (nx + 1) + i + cs];
                match *slot {
                    None => *slot = Some(z),
                    Some(first) => assert_eq!(first, z, "layer {} {:?} pillar ({}, {})", k, s, i + cs, j + rs),
                }
            }
        }
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_small_move_snaps_layer_above() {
    let mut tool = load(stack::grid(), GridToolConfig::default());
    let report = tool
        .move_zcorn_layer(1, &Displacement::Uniform(-2.0), Propagation::LocalRealign)
        .unwrap();

    assert!(report.is_clean());
    assert_all_approx_eq!(surface(&tool, 1, Surface::Top).iter(), 8.0, 0.0);
    assert_all_approx_eq!(surface(&tool, 0, Surface::Bottom).iter(), 8.0, 0.0);
    assert_all_approx_eq!(surface(&tool, 0, Surface::Top).iter(), 0.0, 0.0);
}

#[test]
fn test_overshoot_clamped_to_global_top() {
    let mut tool = load(stack::grid(), GridToolConfig::default());
    let report = tool
        .move_zcorn_layer(1, &Displacement::Uniform(-15.0), Propagation::LocalRealign)
        .unwrap();

    assert!(!report.is_clean());
    let clamp = report
        .conflicts
        .iter()
        .find(|c| c.kind == ConflictKind::TopBoundClamp)
        .unwrap();
    assert_eq!(clamp.layer, 1);
    assert_eq!(clamp.corners, stack::NX * stack::NY * 4);

    assert_all_approx_eq!(surface(&tool, 1, Surface::Top).iter(), 0.0, 0.0);
    assert_all_approx_eq!(surface(&tool, 0, Surface::Bottom).iter(), 0.0, 0.0);
    assert_eq!(tool.inverted_corners(0).unwrap(), 0);
    assert!(tool.check_consistency().is_ok());
}

// ============================================================================
// Invariants under arbitrary moves
// ============================================================================

#[test]
fn test_moves_never_invert_or_leave_global_bounds() {
    let grid = jittered_grid(4, 3, 5, 11);
    let original = load(grid.clone(), GridToolConfig::default());
    let upper = surface(&original, 0, Surface::Top);
    let lower = surface(&original, 4, Surface::Bottom);

    for k in 0..5 {
        for h in [-60.0, -7.5, -1.0, 0.5, 6.0, 45.0] {
            for propagation in [Propagation::LocalRealign, Propagation::Redistribute] {
                let mut tool = original.clone();
                tool.move_zcorn_layer(k, &Displacement::Uniform(h), propagation)
                    .unwrap();

                assert_eq!(
                    tool.check_consistency(),
                    Ok(()),
                    "k = {}, h = {}, {}",
                    k,
                    h,
                    propagation
                );
                for layer in 0..5 {
                    for s in [Surface::Top, Surface::Bottom] {
                        let values = surface(&tool, layer, s);
                        assert!(values.iter().zip(upper.iter()).all(|(z, u)| z >= u));
                        assert!(values.iter().zip(lower.iter()).all(|(z, l)| z <= l));
                    }
                }
                for layer in 0..4 {
                    assert_eq!(
                        surface(&tool, layer, Surface::Bottom),
                        surface(&tool, layer + 1, Surface::Top)
                    );
                }
            }
        }
    }
}

#[test]
fn test_local_realign_leaves_distant_layers_alone() {
    let original = load(jittered_grid(3, 3, 6, 5), GridToolConfig::default());
    let mut tool = original.clone();
    tool.move_zcorn_layer(3, &Displacement::Uniform(-3.0), Propagation::LocalRealign)
        .unwrap();

    for layer in [0, 1, 5] {
        assert_eq!(tool.zcorn().layer(layer), original.zcorn().layer(layer));
    }
    assert_eq!(
        surface(&tool, 2, Surface::Top),
        surface(&original, 2, Surface::Top)
    );
}

#[test]
fn test_uniform_move_keeps_pillars_continuous() {
    let mut tool = load(undulating_grid(4, 4, 3, 6.0), GridToolConfig::default());
    assert_pillar_continuity(&tool);

    tool.move_zcorn_layer(1, &Displacement::Uniform(-4.0), Propagation::LocalRealign)
        .unwrap();
    assert_pillar_continuity(&tool);

    tool.move_zcorn_layer(2, &Displacement::Uniform(25.0), Propagation::Redistribute)
        .unwrap();
    assert_pillar_continuity(&tool);
}

// ============================================================================
// Redistribution
// ============================================================================

#[test]
fn test_redistribute_spaces_layers_evenly() {
    let mut tool = load(jittered_grid(3, 2, 5, 23), GridToolConfig::default());
    tool.move_zcorn_layer(2, &Displacement::Uniform(3.0), Propagation::Redistribute)
        .unwrap();

    let flat = |k: usize, s: Surface| -> Vec<f64> { surface(&tool, k, s).iter().copied().collect() };
    let tops: Vec<_> = (0..3).map(|k| flat(k, Surface::Top)).collect();
    let bottoms: Vec<_> = (2..5).map(|k| flat(k, Surface::Bottom)).collect();

    for idx in 0..tops[0].len() {
        assert_approx_eq!(
            tops[1][idx] - tops[0][idx],
            tops[2][idx] - tops[1][idx],
            1e-9
        );
        assert_approx_eq!(
            bottoms[1][idx] - bottoms[0][idx],
            bottoms[2][idx] - bottoms[1][idx],
            1e-9
        );
    }
}

#[test]
fn test_redistribute_keeps_global_bounds_fixed() {
    let original = load(jittered_grid(2, 2, 4, 3), GridToolConfig::default());
    let mut tool = original.clone();
    tool.move_zcorn_layer(1, &Displacement::Uniform(-2.0), Propagation::Redistribute)
        .unwrap();

    assert_eq!(
        surface(&tool, 0, Surface::Top),
        surface(&original, 0, Surface::Top)
    );
    assert_eq!(
        surface(&tool, 3, Surface::Bottom),
        surface(&original, 3, Surface::Bottom)
    );
}

// ============================================================================
// Fixed thickness
// ============================================================================

#[test]
fn test_fixed_thickness_holds_for_every_corner() {
    let mut tool = load(jittered_grid(3, 3, 5, 9), GridToolConfig::with_fixed_thickness(3.0));
    let report = tool
        .move_zcorn_layer(2, &Displacement::Uniform(1.0), Propagation::LocalRealign)
        .unwrap();
    assert!(report.is_clean());

    let top = surface(&tool, 2, Surface::Top);
    let bottom = surface(&tool, 2, Surface::Bottom);
    for (t, b) in top.iter().zip(bottom.iter()) {
        assert_approx_eq!(b - t, 3.0, 1e-9);
    }
    assert_eq!(bottom, surface(&tool, 3, Surface::Top));
}

// ============================================================================
// Single-corner edits
// ============================================================================

#[test]
fn test_single_corner_edit_touches_one_value() {
    let original = load(stack::grid(), GridToolConfig::default());
    let mut tool = original.clone();
    tool.move_zcorn_single(1, 1, 2, 1.5, Orientation::SE, Surface::Top)
        .unwrap();

    let before = original.export().zcorn;
    let after = tool.export().zcorn;
    let changed: Vec<usize> = (0..before.len()).filter(|&n| before[n] != after[n]).collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(after[changed[0]], 21.5);
    assert_eq!(tool.zcorn().corner(1, 1, 2, Orientation::SE, Surface::Top), 21.5);
}

#[test]
fn test_export_reloads_identically() {
    let mut tool = load(undulating_grid(3, 2, 2, 2.0), GridToolConfig::default());
    tool.move_zcorn_layer(0, &Displacement::Uniform(1.0), Propagation::LocalRealign)
        .unwrap();

    let exported = tool.export();
    let reloaded = GridTool::new(&exported, GridToolConfig::default()).unwrap();
    assert_eq!(reloaded.zcorn(), tool.zcorn());
    assert_eq!(reloaded.coord(), tool.coord());
}
