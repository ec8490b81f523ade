//! RigidBehavior - bounce off the ground plane
//!
//! On penetration:
//! 1. Clamp to the surface
//! 2. Reflect vy scaled by restitution, scale vx/vz by (1 - friction)
//! 3. Hard impacts kick a random angular impulse
//! 4. Snap residual vy to zero below the sleep threshold

use super::{BodyBehavior, Contact};

pub struct RigidBehavior;

impl RigidBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RigidBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyBehavior for RigidBehavior {
    fn ground_contact(&self, contact: &mut Contact) {
        bounce(contact);
    }
}

/// Shared linear ground response, also used by soft bodies
pub(super) fn bounce(contact: &mut Contact) {
    let physics = &contact.body.physics;
    let restitution = physics.restitution;
    let friction = physics.friction;
    let sleep_threshold = physics.sleep_threshold.unwrap_or(contact.config.sleep_threshold);

    contact.body.transform.position.y = 0.0;

    let v = &mut contact.motion.velocity;
    v.y *= -restitution;
    v.x *= 1.0 - friction;
    v.z *= 1.0 - friction;

    if v.y.abs() > contact.config.impact_wobble_threshold {
        let ang = &mut contact.motion.angular;
        ang.x += (contact.rng.next_f32() - 0.5) * v.y;
        ang.z += (contact.rng.next_f32() - 0.5) * v.y;
    }

    if v.y.abs() < sleep_threshold {
        v.y = 0.0;
    }

    contact.motion.grounded = true;
}
