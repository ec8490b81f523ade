use crate::core::Rng;
use crate::domain::SolverConfig;
use crate::spatial::SpatialHash;
use crate::systems::{BehaviorTable, Integrator, MotionStore, ParticleField};

use super::mesh_cache::MeshCache;
use super::perf_stats::PerfStats;
use super::{RenderBuffers, SolverCore};

pub(super) fn create_solver_core(config: SolverConfig) -> SolverCore {
    SolverCore {
        spatial: SpatialHash::new(config.cell_size),
        integrator: Integrator::new(),
        behaviors: BehaviorTable::new(),
        motions: MotionStore::new(),
        particles: ParticleField::new(),
        meshes: MeshCache::new(),
        render: RenderBuffers {
            states: Vec::with_capacity(64),
            visuals: Vec::with_capacity(64),
            triggers: Vec::new(),
        },
        rng: Rng::new(config.seed),
        elapsed: 0.0,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    }
}
