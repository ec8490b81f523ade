//! Solver configuration
//!
//! Loaded from JSON the same way content bundles are: every field is
//! optional and falls back to the tuned defaults below.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Fixed "4D camera distance" along W
    pub camera_distance: f32,
    /// Hyper-FOV at which the slice plane projects with scale 1
    pub reference_fov: f32,
    /// Below this W-depth a point is behind the slice and degenerates
    pub near_cutoff: f32,
    pub degenerate_scale: f32,
    pub opacity_falloff: f32,
    pub hide_below: f32,
    pub depth_write_above: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            camera_distance: 4.0,
            reference_fov: 45.0,
            near_cutoff: 0.1,
            degenerate_scale: 0.001,
            opacity_falloff: 200.0,
            hide_below: 0.05,
            depth_write_above: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoftConfig {
    /// Used when a soft body has no `elasticity` of its own
    pub default_elasticity: f32,
    /// Vertical speed mapped to a speed factor of 1
    pub speed_reference: f32,
    pub max_stretch: f32,
    pub squash_amount: f32,
    /// Exponential decay rate of the impact squash, per second
    pub squash_recovery: f32,
    pub wobble_frequency: f32,
    pub wobble_spatial_frequency: f32,
    pub wobble_amplitude: f32,
}

impl Default for SoftConfig {
    fn default() -> Self {
        Self {
            default_elasticity: 0.3,
            speed_reference: 10.0,
            max_stretch: 0.4,
            squash_amount: 0.35,
            squash_recovery: 6.0,
            wobble_frequency: 8.0,
            wobble_spatial_frequency: 4.0,
            wobble_amplitude: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FluidConfig {
    pub spread_rate: f32,
    /// Final puddle thickness as a fraction of the height at first contact
    pub puddle_ratio: f32,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            spread_rate: 1.5,
            puddle_ratio: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    pub gravity: f32,
    pub substeps: u32,
    pub cell_size: f32,
    /// Upper bound applied on top of the caller's own dt clamp
    pub max_frame_dt: f32,
    pub sleep_threshold: f32,
    /// Jump only fires while |vy| is below this
    pub jump_threshold: f32,
    pub controller_force: f32,
    /// Bounce speed above which impacts kick angular velocity
    pub impact_wobble_threshold: f32,
    pub seed: u32,
    pub projection: ProjectionConfig,
    pub soft: SoftConfig,
    pub fluid: FluidConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            substeps: 8,
            cell_size: 2.0,
            max_frame_dt: 0.1,
            sleep_threshold: 0.1,
            jump_threshold: 0.1,
            controller_force: 20.0,
            impact_wobble_threshold: 2.0,
            seed: 12345,
            projection: ProjectionConfig::default(),
            soft: SoftConfig::default(),
            fluid: FluidConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SolverConfig =
            serde_json::from_str(json).map_err(|e| EngineError::json("solver config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.substeps == 0 {
            return Err(EngineError::InvalidConfig("substeps must be at least 1".into()));
        }
        if !(self.cell_size > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "cellSize must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.projection.reference_fov > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "projection.referenceFov must be positive, got {}",
                self.projection.reference_fov
            )));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "maxFrameDt must be positive, got {}",
                self.max_frame_dt
            )));
        }
        Ok(())
    }
}
