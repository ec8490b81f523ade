use serde::Serialize;

use crate::domain::Body;
use crate::systems::{Fade, Projector, VisualState};

/// Everything the renderer needs to place one (non-particle) body
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRenderState {
    pub id: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    /// Transform scale times any soft-body squash/stretch
    pub scale: [f32; 3],
    /// Perspective factor at the body's W, 1 outside 4D
    pub hyper_scale: f32,
    pub opacity: f32,
    pub visible: bool,
    pub transparent: bool,
    pub depth_write: bool,
}

/// Rewrite `states` in place for this frame's bodies. Entries (and their id
/// strings) are reused across frames.
pub(super) fn write_body_states(
    states: &mut Vec<BodyRenderState>,
    bodies: &[Body],
    visuals: &[VisualState],
    projector: Option<&Projector>,
) {
    let mut n = 0;
    for (body, visual) in bodies.iter().zip(visuals) {
        if body.is_particle_emitter() {
            continue;
        }
        if n == states.len() {
            states.push(BodyRenderState::default());
        }
        let state = &mut states[n];
        n += 1;

        if state.id != body.id {
            state.id.clone_from(&body.id);
        }

        let t = &body.transform;
        let (position, hyper_scale, fade) = match projector {
            Some(projector) => {
                let w = t.position.w_or_zero();
                let projected = projector.project(t.position.to_vec4());
                (projected.position.to_array(), projected.scale, projector.fade(w))
            }
            None => ([t.position.x, t.position.y, t.position.z], 1.0, Fade::OPAQUE),
        };

        state.position = position;
        state.rotation = [t.rotation.x, t.rotation.y, t.rotation.z];
        state.scale = [
            t.scale.x * visual.scale.x,
            t.scale.y * visual.scale.y,
            t.scale.z * visual.scale.z,
        ];
        state.hyper_scale = hyper_scale;
        state.opacity = fade.opacity;
        state.visible = fade.visible;
        state.transparent = fade.transparent;
        state.depth_write = fade.depth_write;
    }
    states.truncate(n);
}
