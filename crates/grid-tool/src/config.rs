//! Configuration for the grid tool.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridToolError, Result};

/// Configuration for a [`GridTool`](crate::GridTool) instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridToolConfig {
    /// When set, a deformed layer's bottom is always derived as top + thickness.
    pub fixed_layer_thickness: Option<f64>,

    /// Settings for the pillar/surface root finder.
    pub solver: SolverConfig,
}

impl Default for GridToolConfig {
    fn default() -> Self {
        Self {
            fixed_layer_thickness: None,
            solver: SolverConfig::default(),
        }
    }
}

impl GridToolConfig {
    /// Configuration with a fixed layer thickness and default solver settings.
    pub fn with_fixed_thickness(thickness: f64) -> Self {
        Self {
            fixed_layer_thickness: Some(thickness),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_TOOL_FIXED_LAYER_THICKNESS") {
            if let Ok(thickness) = val.parse() {
                config.fixed_layer_thickness = Some(thickness);
            }
        }

        if let Ok(val) = std::env::var("GRID_TOOL_SOLVER_TOLERANCE") {
            if let Ok(tol) = val.parse() {
                config.solver.tolerance = tol;
            }
        }

        if let Ok(val) = std::env::var("GRID_TOOL_SOLVER_MAX_ITERATIONS") {
            if let Ok(iters) = val.parse() {
                config.solver.max_iterations = iters;
            }
        }

        config
    }

    /// Parse configuration from a YAML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(thickness) = self.fixed_layer_thickness {
            if !thickness.is_finite() || thickness <= 0.0 {
                return Err(GridToolError::config(format!(
                    "fixed_layer_thickness must be finite and > 0, got {}",
                    thickness
                )));
            }
        }

        self.solver.validate()
    }
}

/// Settings for the secant/bisection root finder used by pillar intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute residual (depth units) below which a root is accepted.
    pub tolerance: f64,

    /// Maximum number of residual evaluations after the initial guess.
    pub max_iterations: usize,

    /// Offset of the second secant point, as a fraction of the pillar's
    /// horizontal extent along its free axis.
    pub initial_step_fraction: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
            initial_step_fraction: 0.25,
        }
    }
}

impl SolverConfig {
    /// Validate the solver settings.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GridToolError::config("solver.tolerance must be > 0"));
        }

        if self.max_iterations == 0 {
            return Err(GridToolError::config("solver.max_iterations must be > 0"));
        }

        if !self.initial_step_fraction.is_finite() || self.initial_step_fraction <= 0.0 {
            return Err(GridToolError::config(
                "solver.initial_step_fraction must be > 0",
            ));
        }

        Ok(())
    }
}

/// How the bottom surface of a deformed layer is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThicknessMode {
    /// Top and bottom corners move independently.
    Free,
    /// Bottom is always top + the given thickness.
    Fixed(f64),
}

impl Default for ThicknessMode {
    fn default() -> Self {
        Self::Free
    }
}

impl From<&GridToolConfig> for ThicknessMode {
    fn from(config: &GridToolConfig) -> Self {
        match config.fixed_layer_thickness {
            Some(thickness) => Self::Fixed(thickness),
            None => Self::Free,
        }
    }
}

impl std::fmt::Display for ThicknessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Fixed(t) => write!(f, "fixed({})", t),
        }
    }
}
