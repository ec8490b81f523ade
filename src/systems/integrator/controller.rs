use crate::core::Vec3;
use crate::domain::{ControllerProps, FrameInput, SolverConfig};

use super::state::BodyMotion;

/// Yaw-only camera basis for controller movement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraBasis {
    /// Flatten the view direction onto the ground plane. Looking straight
    /// up or down falls back to -Z.
    pub fn from_forward(forward: Vec3) -> Self {
        let flat = Vec3::new(forward.x, 0.0, forward.z).normalize();
        let forward = if flat == Vec3::zero() {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            flat
        };
        let right = forward.cross(Vec3::UP).normalize();
        Self { forward, right }
    }
}

/// Apply held movement keys and jump to one substep of a controlled body
pub(crate) fn apply_input(
    controller: &ControllerProps,
    frame: &FrameInput,
    basis: &CameraBasis,
    config: &SolverConfig,
    sub_dt: f32,
    motion: &mut BodyMotion,
) {
    let push = controller.move_speed * config.controller_force * sub_dt;
    let v = &mut motion.velocity;

    if frame.key("w") {
        v.x += basis.forward.x * push;
        v.z += basis.forward.z * push;
    }
    if frame.key("s") {
        v.x -= basis.forward.x * push;
        v.z -= basis.forward.z * push;
    }
    if frame.key("a") {
        v.x -= basis.right.x * push;
        v.z -= basis.right.z * push;
    }
    if frame.key("d") {
        v.x += basis.right.x * push;
        v.z += basis.right.z * push;
    }
    if frame.key(" ") && v.y.abs() < config.jump_threshold {
        v.y = controller.jump_force;
    }
}
