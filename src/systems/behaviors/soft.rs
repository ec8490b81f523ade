//! SoftBehavior - rigid ground response plus visual squash/stretch and wobble
//!
//! Deformation is visual only. The scale factors multiply the transform scale
//! in render output and the wobble displaces mesh vertices relative to their
//! captured rest shape; neither is written back to the entity.

use super::rigid::bounce;
use super::{BodyBehavior, Contact, VisualContext, VisualState};
use crate::core::Vec3;

/// Per-vertex sinusoidal offset, keyed by the solver clock and rest Y
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wobble {
    /// elapsed * wobble_frequency
    pub phase: f32,
    pub spatial_frequency: f32,
    pub amplitude: f32,
}

impl Wobble {
    #[inline]
    pub fn offset(&self, rest_y: f32) -> f32 {
        (self.phase + rest_y * self.spatial_frequency).sin() * self.amplitude
    }
}

pub struct SoftBehavior;

impl SoftBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SoftBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyBehavior for SoftBehavior {
    fn ground_contact(&self, contact: &mut Contact) {
        let landing_speed = contact.motion.velocity.y.abs();
        bounce(contact);

        let strength = (landing_speed / contact.config.soft.speed_reference).min(1.0);
        contact.motion.impact = contact.motion.impact.max(strength);
    }

    fn visuals(&self, ctx: &mut VisualContext) -> VisualState {
        let cfg = &ctx.config.soft;
        let motion = &mut *ctx.motion;

        let speed_factor = (motion.velocity.y.abs() / cfg.speed_reference).min(1.0);
        let stretch = if motion.grounded {
            1.0
        } else {
            1.0 + cfg.max_stretch * speed_factor
        };
        let squash = 1.0 - cfg.squash_amount * motion.impact;

        let sy = stretch * squash;
        let sxz = 1.0 / sy.sqrt();

        let elasticity = ctx.body.physics.elasticity.unwrap_or(cfg.default_elasticity);
        let wobble = Wobble {
            phase: ctx.elapsed * cfg.wobble_frequency,
            spatial_frequency: cfg.wobble_spatial_frequency,
            amplitude: elasticity * cfg.wobble_amplitude * speed_factor.max(motion.impact),
        };

        motion.impact *= (-cfg.squash_recovery * ctx.dt).exp();

        VisualState {
            scale: Vec3::new(sxz, sy, sxz),
            wobble: Some(wobble),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rng, Vec4};
    use crate::domain::{Body, PhysicsType, SolverConfig};
    use crate::systems::integrator::BodyMotion;
    use approx::assert_relative_eq;

    fn visuals(body: &mut Body, motion: &mut BodyMotion, dt: f32, elapsed: f32) -> VisualState {
        let config = SolverConfig::default();
        SoftBehavior::new().visuals(&mut VisualContext {
            body,
            motion,
            dt,
            elapsed,
            config: &config,
        })
    }

    #[test]
    fn stretches_while_falling_fast() {
        let mut body = Body::new("s", PhysicsType::Soft);
        let mut motion = BodyMotion::with_velocity(Vec4::new(0.0, -20.0, 0.0, 0.0));

        let state = visuals(&mut body, &mut motion, 0.016, 0.0);
        assert_relative_eq!(state.scale.y, 1.4);
        assert!(state.scale.x < 1.0);
        // Volume-ish preservation across the three axes
        assert_relative_eq!(state.scale.x * state.scale.y * state.scale.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn landing_squashes_then_recovers() {
        let config = SolverConfig::default();
        let mut rng = Rng::new(3);
        let mut body = Body::new("s", PhysicsType::Soft).with_physics(|p| p.restitution = 0.0);
        let mut motion = BodyMotion::with_velocity(Vec4::new(0.0, -10.0, 0.0, 0.0));

        SoftBehavior::new().ground_contact(&mut Contact {
            body: &mut body,
            motion: &mut motion,
            rng: &mut rng,
            config: &config,
        });
        assert_eq!(motion.impact, 1.0);

        let first = visuals(&mut body, &mut motion, 0.1, 0.0);
        assert_relative_eq!(first.scale.y, 0.65);

        let later = visuals(&mut body, &mut motion, 0.1, 0.1);
        assert!(later.scale.y > first.scale.y);
        assert!(motion.impact < 1.0);
    }

    #[test]
    fn resting_body_does_not_wobble() {
        let mut body = Body::new("s", PhysicsType::Soft);
        let mut motion = BodyMotion::default();
        motion.grounded = true;

        let state = visuals(&mut body, &mut motion, 0.016, 3.0);
        assert_eq!(state.scale, Vec3::new(1.0, 1.0, 1.0));
        let wobble = state.wobble.unwrap();
        assert_eq!(wobble.offset(0.25), 0.0);
    }

    #[test]
    fn wobble_is_relative_to_rest_y() {
        let w = Wobble {
            phase: 0.0,
            spatial_frequency: 4.0,
            amplitude: 0.1,
        };
        assert_eq!(w.offset(0.0), 0.0);
        assert_relative_eq!(w.offset(std::f32::consts::FRAC_PI_8), 0.1);
    }
}
