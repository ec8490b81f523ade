use std::collections::HashSet;

use log::debug;

use crate::core::Result;
use crate::domain::Body;

use super::SolverCore;

/// Match solver-owned state to the current entity list. The only fallible
/// stage, so it runs before any body is mutated.
pub(super) fn sync_entities(core: &mut SolverCore, bodies: &[Body]) -> Result<()> {
    core.meshes.sync(bodies)?;
    core.particles.sync(bodies, &mut core.rng);

    let live: HashSet<&str> = bodies.iter().map(|b| b.id.as_str()).collect();
    let dropped = core.motions.retain_live(&live);
    if dropped > 0 {
        debug!("motion state dropped for {dropped} removed bodies");
    }
    Ok(())
}

/// Rebuild the spatial index from scratch. Slots are indices into `bodies`.
pub(super) fn rebuild_spatial(core: &mut SolverCore, bodies: &[Body]) {
    core.spatial.clear();
    for (slot, body) in bodies.iter().enumerate() {
        core.spatial.insert(slot as u32, &body.transform.position);
    }
}
