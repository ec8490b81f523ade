//! Flint Engine - body solver and 4D slice projector for the editor viewport
//!
//! Architecture:
//! - core/        - vector math, seeded RNG, error type
//! - domain/      - serde data model shared with the editor
//! - spatial/     - uniform-grid spatial hash
//! - systems/     - integrator, body-type behaviors, projector, particles, triggers
//! - simulation/  - per-frame orchestration and the wasm facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool initialization for the parallel projection passes
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // A second init() finds the logger already installed
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Debug);

    web_sys::console::log_1(&"Flint engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{EngineError, Rng, Vec3, Vec4};
pub use domain::{Body, Dimension, FrameInput, ParticleConfig, PhysicsType, SolverConfig};
pub use simulation::{BodyRenderState, PerfStats, Solver, SolverCore};
pub use systems::PortalTrigger;
