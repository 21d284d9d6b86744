//! Loading tool configuration from files.

use grid_tool::{GridDefinition, GridDims, GridTool, GridToolConfig, GridToolError, ThicknessMode};
use test_utils::{config, temp_file_with};

// ============================================================================
// File loading
// ============================================================================

#[test]
fn test_load_free_config_from_file() {
    let file = temp_file_with(config::FREE_YAML).unwrap();
    let loaded = GridToolConfig::from_file(file.path()).unwrap();

    assert_eq!(loaded.fixed_layer_thickness, None);
    assert_eq!(loaded.solver.tolerance, 1e-10);
    assert_eq!(loaded.solver.max_iterations, 50);
    assert_eq!(loaded.solver.initial_step_fraction, 0.5);
}

#[test]
fn test_partial_config_keeps_solver_defaults() {
    let file = temp_file_with(config::FIXED_YAML).unwrap();
    let loaded = GridToolConfig::from_file(file.path()).unwrap();

    assert_eq!(loaded.fixed_layer_thickness, Some(5.0));
    assert_eq!(loaded.solver, GridToolConfig::default().solver);
}

#[test]
fn test_invalid_configs_rejected() {
    for yaml in [config::NEGATIVE_THICKNESS_YAML, config::MALFORMED_YAML] {
        let file = temp_file_with(yaml).unwrap();
        assert!(matches!(
            GridToolConfig::from_file(file.path()),
            Err(GridToolError::ConfigError(_))
        ));
    }
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GridToolConfig::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(GridToolError::ConfigError(_))));
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn test_loaded_config_selects_thickness_mode() {
    let file = temp_file_with(config::FIXED_YAML).unwrap();
    let loaded = GridToolConfig::from_file(file.path()).unwrap();

    let grid = GridDefinition::regular(GridDims::new(1, 1, 2).unwrap(), 1.0, 1.0, 0.0, 10.0);
    let tool = GridTool::new(&grid, loaded).unwrap();
    assert_eq!(tool.mode(), ThicknessMode::Fixed(5.0));

    let tool = GridTool::new(&grid, GridToolConfig::default()).unwrap();
    assert_eq!(tool.mode(), ThicknessMode::Free);
}

#[test]
fn test_tool_rejects_invalid_config() {
    let grid = GridDefinition::regular(GridDims::new(1, 1, 1).unwrap(), 1.0, 1.0, 0.0, 10.0);
    let mut bad = GridToolConfig::default();
    bad.solver.max_iterations = 0;
    assert!(matches!(
        GridTool::new(&grid, bad),
        Err(GridToolError::ConfigError(_))
    ));
}
