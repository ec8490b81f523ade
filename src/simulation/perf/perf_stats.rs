use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) sync_ms: f64,
    pub(super) spatial_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) visuals_ms: f64,
    pub(super) projection_ms: f64,
    pub(super) particles_ms: f64,
    pub(super) triggers_ms: f64,

    pub(super) body_count: u32,
    pub(super) integrated_bodies: u32,
    pub(super) ground_contacts: u32,
    pub(super) occupied_cells: u32,
    pub(super) particle_systems: u32,
    pub(super) particles_updated: u32,
    pub(super) particles_respawned: u32,
    pub(super) meshes: u32,
    pub(super) vertices_projected: u32,
    pub(super) triggers: u32,
    pub(super) dt_clamped: bool,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn sync_ms(&self) -> f64 { self.sync_ms }
    #[wasm_bindgen(getter)]
    pub fn spatial_ms(&self) -> f64 { self.spatial_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn visuals_ms(&self) -> f64 { self.visuals_ms }
    #[wasm_bindgen(getter)]
    pub fn projection_ms(&self) -> f64 { self.projection_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_ms(&self) -> f64 { self.particles_ms }
    #[wasm_bindgen(getter)]
    pub fn triggers_ms(&self) -> f64 { self.triggers_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn integrated_bodies(&self) -> u32 { self.integrated_bodies }
    #[wasm_bindgen(getter)]
    pub fn ground_contacts(&self) -> u32 { self.ground_contacts }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn particle_systems(&self) -> u32 { self.particle_systems }
    #[wasm_bindgen(getter)]
    pub fn particles_updated(&self) -> u32 { self.particles_updated }
    #[wasm_bindgen(getter)]
    pub fn particles_respawned(&self) -> u32 { self.particles_respawned }
    #[wasm_bindgen(getter)]
    pub fn meshes(&self) -> u32 { self.meshes }
    #[wasm_bindgen(getter)]
    pub fn vertices_projected(&self) -> u32 { self.vertices_projected }
    #[wasm_bindgen(getter)]
    pub fn triggers(&self) -> u32 { self.triggers }
    #[wasm_bindgen(getter)]
    pub fn dt_clamped(&self) -> bool { self.dt_clamped }
}
