use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::{EngineError, Vec4};
use crate::domain::{Body, FrameInput, SolverConfig};

use super::perf_stats::PerfStats;
use super::SolverCore;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(context: &'static str, value: &T) -> Result<String, EngineError> {
    serde_json::to_string(value).map_err(|e| EngineError::json(context, e))
}

/// Editor-facing solver. Entities cross the boundary as JSON; bulk vertex
/// and particle data is read straight out of wasm memory through pointers.
#[wasm_bindgen]
pub struct Solver {
    core: SolverCore,
    /// Entities of the last step; spatial slots index into this
    bodies: Vec<Body>,
}

// Rust-side API, shared by the wasm exports and native tests
impl Solver {
    pub fn from_config(config: SolverConfig) -> Result<Self, EngineError> {
        Ok(Self {
            core: SolverCore::with_config(config)?,
            bodies: Vec::new(),
        })
    }

    pub fn core(&self) -> &SolverCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SolverCore {
        &mut self.core
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Parse the editor's entity array and frame input, run one frame and
    /// serialize the mutated entities back. Fields the solver doesn't know
    /// ride along untouched.
    pub fn step_entities(&mut self, entities_json: &str, frame_json: &str) -> Result<String, EngineError> {
        let mut bodies: Vec<Body> =
            serde_json::from_str(entities_json).map_err(|e| EngineError::json("entities", e))?;
        let frame: FrameInput =
            serde_json::from_str(frame_json).map_err(|e| EngineError::json("frame input", e))?;

        // Spatial slots keep pointing at the previous frame's bodies until
        // this frame fully succeeds
        self.core.update(&frame, &mut bodies)?;
        let out = to_json("entities", &bodies);
        self.bodies = bodies;
        out
    }

    /// Ids of the bodies in the 27 cells around a point
    pub fn neighbor_ids(&self, x: f32, y: f32, z: f32) -> Vec<&str> {
        self.core
            .neighbors(x, y, z)
            .into_iter()
            .filter_map(|slot| self.bodies.get(slot as usize))
            .map(|b| b.id.as_str())
            .collect()
    }
}

#[wasm_bindgen]
impl Solver {
    /// Create a solver with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: SolverCore::new(),
            bodies: Vec::new(),
        }
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<Solver, JsValue> {
        SolverConfig::from_json(json)
            .and_then(Self::from_config)
            .map_err(to_js)
    }

    pub fn load_config(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_config_json(json).map_err(to_js)
    }

    /// Run one frame; returns the mutated entities
    pub fn step(&mut self, entities_json: &str, frame_json: &str) -> Result<String, JsValue> {
        self.step_entities(entities_json, frame_json).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn elapsed(&self) -> f32 {
        self.core.elapsed()
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn reseed(&mut self, seed: u32) {
        self.core.reseed(seed);
    }

    // === RENDER OUTPUT ===

    pub fn render_states_json(&self) -> Result<String, JsValue> {
        to_json("render states", self.core.render_states()).map_err(to_js)
    }

    /// Pointer to a custom mesh's render vertices (3 floats each); null when
    /// the body has no cached mesh
    pub fn mesh_vertices_ptr(&self, id: &str) -> *const f32 {
        self.core.mesh(id).map_or(std::ptr::null(), |m| m.render_ptr())
    }

    /// Float count behind `mesh_vertices_ptr`
    pub fn mesh_vertices_len(&self, id: &str) -> usize {
        self.core.mesh(id).map_or(0, |m| m.render().len())
    }

    pub fn particle_positions_ptr(&self, id: &str) -> *const f32 {
        self.core
            .particle_system(id)
            .map_or(std::ptr::null(), |p| p.render_positions_ptr())
    }

    pub fn particle_colors_ptr(&self, id: &str) -> *const f32 {
        self.core
            .particle_system(id)
            .map_or(std::ptr::null(), |p| p.render_colors_ptr())
    }

    pub fn particle_count(&self, id: &str) -> usize {
        self.core.particle_system(id).map_or(0, |p| p.count())
    }

    /// Capture the rest shape of a primitive mesh for soft-body wobble.
    /// Returns false if one was already captured.
    pub fn register_rest_vertices(&mut self, id: &str, vertices: Vec<f32>, stride: usize) -> Result<bool, JsValue> {
        self.core.register_rest_vertices(id, vertices, stride).map_err(to_js)
    }

    // === QUERIES ===

    pub fn neighbors_json(&self, x: f32, y: f32, z: f32) -> Result<String, JsValue> {
        to_json("neighbors", &self.neighbor_ids(x, y, z)).map_err(to_js)
    }

    pub fn triggers_json(&self) -> Result<String, JsValue> {
        to_json("triggers", self.core.triggers()).map_err(to_js)
    }

    /// `[x, y, z, w]`, zeros for a body the solver hasn't integrated
    pub fn velocity_json(&self, id: &str) -> Result<String, JsValue> {
        let v = self.core.velocity(id);
        to_json("velocity", &[v.x, v.y, v.z, v.w]).map_err(to_js)
    }

    pub fn set_velocity(&mut self, id: &str, x: f32, y: f32, z: f32, w: f32) {
        self.core.set_velocity(id, Vec4::new(x, y, z, w));
    }

    // === PERF ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
