//! Solver - per-frame orchestration
//!
//! SolverCore only orchestrates; the physics lives in systems/:
//! - lifecycle sync of mesh caches, particle systems and motion state
//! - spatial index rebuild
//! - substep integration (only while simulating)
//! - body-type visuals (squash/stretch, wobble, puddles)
//! - 4D projection of bodies and meshes
//! - particle field
//! - portal triggers
//!
//! Entities are borrowed for one `update` call and mutated in place; the
//! solver keeps only what it owns (motion, particles, vertex caches).

use crate::core::{Result, Rng, Vec4};
use crate::domain::{Body, FrameInput, SolverConfig};
use crate::spatial::SpatialHash;
use crate::systems::{
    BehaviorTable, BodyMotion, Integrator, MotionStore, ParticleField, ParticleSystem,
    PortalTrigger, VisualState,
};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "render/mesh_cache.rs"]
mod mesh_cache;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "step/lifecycle.rs"]
mod lifecycle;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Solver;
pub use mesh_cache::{CachedMesh, MeshCache};
pub use perf_stats::PerfStats;
pub use render_extract::BodyRenderState;

use perf_timer::PerfTimer;

/// Per-frame outputs, reused across frames
pub(crate) struct RenderBuffers {
    states: Vec<BodyRenderState>,
    /// One entry per input body, same order
    visuals: Vec<VisualState>,
    triggers: Vec<PortalTrigger>,
}

/// The solver
pub struct SolverCore {
    config: SolverConfig,
    spatial: SpatialHash,
    integrator: Integrator,
    behaviors: BehaviorTable,
    motions: MotionStore,
    particles: ParticleField,
    meshes: MeshCache,
    render: RenderBuffers,

    // State
    rng: Rng,
    /// Simulated seconds, drives the soft-body wobble
    elapsed: f32,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SolverCore {
    pub fn new() -> Self {
        init::create_solver_core(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(init::create_solver_core(config))
    }

    pub fn load_config_json(&mut self, json: &str) -> Result<()> {
        settings::load_config_json(self, json)
    }

    pub fn set_config(&mut self, config: SolverConfig) -> Result<()> {
        settings::set_config(self, config)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run one frame over `bodies`. Fails only on malformed caller data
    /// (custom geometry), and then before any body is touched.
    pub fn update(&mut self, frame: &FrameInput, bodies: &mut [Body]) -> Result<()> {
        step::step(self, frame, bodies)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Reset the stochastic source (impact wobble, particle respawn)
    pub fn reseed(&mut self, seed: u32) {
        settings::reseed(self, seed);
    }

    // === SOLVER-OWNED STATE ===

    /// Linear velocity; zero for bodies not integrated yet
    pub fn velocity(&self, id: &str) -> Vec4 {
        self.motions.get(id).velocity
    }

    pub fn motion(&self, id: &str) -> BodyMotion {
        self.motions.get(id)
    }

    pub fn set_velocity(&mut self, id: &str, velocity: Vec4) {
        self.motions.set_velocity(id, velocity);
    }

    pub fn motions(&self) -> &MotionStore {
        &self.motions
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn particle_system(&self, id: &str) -> Option<&ParticleSystem> {
        self.particles.get(id)
    }

    pub fn meshes(&self) -> &MeshCache {
        &self.meshes
    }

    pub fn mesh(&self, id: &str) -> Option<&CachedMesh> {
        self.meshes.get(id)
    }

    /// Capture the undeformed vertices of a primitive mesh for soft wobble.
    /// The first capture wins.
    pub fn register_rest_vertices(&mut self, id: &str, vertices: Vec<f32>, stride: usize) -> Result<bool> {
        self.meshes.register(id, vertices, stride)
    }

    // === SPATIAL INDEX ===

    pub fn spatial(&self) -> &SpatialHash {
        &self.spatial
    }

    /// Slots (indices into the last `update`'s body slice) in the 27 cells
    /// around a point
    pub fn neighbors(&self, x: f32, y: f32, z: f32) -> Vec<u32> {
        self.spatial.query_neighbors(&crate::domain::Coords::new(x, y, z))
    }

    // === RENDER OUTPUT ===

    pub fn render_states(&self) -> &[BodyRenderState] {
        &self.render.states
    }

    pub fn render_state(&self, id: &str) -> Option<&BodyRenderState> {
        self.render.states.iter().find(|s| s.id == id)
    }

    pub fn triggers(&self) -> &[PortalTrigger] {
        &self.render.triggers
    }

    // === PERF ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

impl Default for SolverCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
