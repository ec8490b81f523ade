use log::{debug, info};

use crate::core::Result;
use crate::domain::SolverConfig;

use super::perf_stats::PerfStats;
use super::SolverCore;

pub(super) fn load_config_json(solver: &mut SolverCore, json: &str) -> Result<()> {
    let config = SolverConfig::from_json(json)?;
    set_config(solver, config)
}

pub(super) fn set_config(solver: &mut SolverCore, config: SolverConfig) -> Result<()> {
    config.validate()?;
    if config.cell_size != solver.spatial.cell_size() {
        solver.spatial.set_cell_size(config.cell_size);
    }
    info!(
        "solver config loaded: {} substeps, gravity {}, cell size {}",
        config.substeps, config.gravity, config.cell_size
    );
    solver.config = config;
    Ok(())
}

pub(super) fn reseed(solver: &mut SolverCore, seed: u32) {
    debug!("rng reseeded with {seed}");
    solver.rng.reseed(seed);
}

pub(super) fn enable_perf_metrics(solver: &mut SolverCore, enabled: bool) {
    solver.perf_enabled = enabled;
    if !enabled {
        solver.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(solver: &SolverCore) -> PerfStats {
    solver.perf_stats.clone()
}
