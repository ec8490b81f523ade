use log::trace;

use crate::core::Result;
use crate::domain::{Body, FrameInput};
use crate::systems::behaviors::VisualContext;
use crate::systems::{detect_portals, Projector, VisualState};

use super::lifecycle::{rebuild_spatial, sync_entities};
use super::render_extract::write_body_states;
use super::{PerfTimer, SolverCore};

pub(super) fn step(core: &mut SolverCore, frame: &FrameInput, bodies: &mut [Body]) -> Result<()> {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
        core.perf_stats.body_count = bodies.len() as u32;
    }
    let step_start = PerfTimer::start_if(perf_on);

    // Safety clamp on top of the caller's
    let max_dt = core.config.max_frame_dt;
    let dt = if frame.dt > max_dt {
        trace!("frame dt {} clamped to {}", frame.dt, max_dt);
        core.perf_stats.dt_clamped = perf_on;
        max_dt
    } else {
        frame.dt.max(0.0)
    };

    // === LIFECYCLE ===
    let t0 = PerfTimer::start_if(perf_on);
    sync_entities(core, bodies)?;
    if let Some(t0) = t0 {
        core.perf_stats.sync_ms = t0.elapsed_ms();
    }

    // === SPATIAL INDEX ===
    let t0 = PerfTimer::start_if(perf_on);
    rebuild_spatial(core, bodies);
    if let Some(t0) = t0 {
        core.perf_stats.spatial_ms = t0.elapsed_ms();
        core.perf_stats.occupied_cells = core.spatial.occupied_cells() as u32;
    }

    // === INTEGRATION ===
    // Only while simulating; the preview still projects and animates particles
    if frame.is_simulating {
        let t0 = PerfTimer::start_if(perf_on);
        let stats = core.integrator.step(
            dt,
            bodies,
            &mut core.motions,
            &core.behaviors,
            frame,
            &core.config,
            &mut core.rng,
        );
        core.elapsed += dt;
        if let Some(t0) = t0 {
            core.perf_stats.integrate_ms = t0.elapsed_ms();
            core.perf_stats.integrated_bodies = stats.integrated;
            core.perf_stats.ground_contacts = stats.contacts;
        }
    }

    // === BODY-TYPE VISUALS ===
    let t0 = PerfTimer::start_if(perf_on);
    let visual_dt = if frame.is_simulating { dt } else { 0.0 };
    update_visuals(core, bodies, visual_dt);
    if let Some(t0) = t0 {
        core.perf_stats.visuals_ms = t0.elapsed_ms();
    }

    // === PROJECTION / RENDER EXTRACTION ===
    let projector = frame
        .dimension
        .is_4d()
        .then(|| Projector::new(frame.w_position, frame.w_fov, &core.config.projection));

    let t0 = PerfTimer::start_if(perf_on);
    write_body_states(&mut core.render.states, bodies, &core.render.visuals, projector.as_ref());
    let mut vertices_projected = 0;
    for (body, visual) in bodies.iter().zip(&core.render.visuals) {
        if let Some(mesh) = core.meshes.get_mut(&body.id) {
            vertices_projected += mesh.refresh(visual.wobble.as_ref(), projector.as_ref());
        }
    }
    if let Some(t0) = t0 {
        core.perf_stats.projection_ms = t0.elapsed_ms();
        core.perf_stats.meshes = core.meshes.len() as u32;
        core.perf_stats.vertices_projected = vertices_projected as u32;
    }

    // === PARTICLES ===
    // Real dt even while paused, emitters keep animating in the editor
    let t0 = PerfTimer::start_if(perf_on);
    let stats = core.particles.update(dt, bodies, projector.as_ref(), &mut core.rng);
    if let Some(t0) = t0 {
        core.perf_stats.particles_ms = t0.elapsed_ms();
        core.perf_stats.particle_systems = core.particles.len() as u32;
        core.perf_stats.particles_updated = stats.updated;
        core.perf_stats.particles_respawned = stats.respawned;
    }

    // === TRIGGERS ===
    let t0 = PerfTimer::start_if(perf_on);
    if frame.is_simulating {
        detect_portals(bodies, &mut core.render.triggers);
    } else {
        core.render.triggers.clear();
    }
    if let Some(t0) = t0 {
        core.perf_stats.triggers_ms = t0.elapsed_ms();
        core.perf_stats.triggers = core.render.triggers.len() as u32;
    }

    core.frame += 1;

    if let Some(t) = step_start {
        core.perf_stats.step_ms = t.elapsed_ms();
    }
    Ok(())
}

/// One `VisualState` per body, in body order. Bodies without motion state
/// (never integrated) get the identity.
fn update_visuals(core: &mut SolverCore, bodies: &mut [Body], dt: f32) {
    let elapsed = core.elapsed;
    core.render.visuals.clear();
    for body in bodies.iter_mut() {
        let visual = match core.motions.get_mut(&body.id) {
            Some(motion) => core.behaviors.visuals(&mut VisualContext {
                body,
                motion,
                dt,
                elapsed,
                config: &core.config,
            }),
            None => VisualState::IDENTITY,
        };
        core.render.visuals.push(visual);
    }
}
