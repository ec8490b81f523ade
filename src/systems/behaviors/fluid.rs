//! FluidBehavior - no bounce, flatten into a puddle
//!
//! On contact the body stops dead and settles. While settled, its vertical
//! scale decays toward `rest_height * puddle_ratio` and the horizontal
//! scale widens to keep the footprint volume roughly constant. Vertical
//! scale never grows back.

use super::{BodyBehavior, Contact, VisualContext, VisualState};
use crate::core::{Vec3, Vec4};

pub struct FluidBehavior;

impl FluidBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FluidBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyBehavior for FluidBehavior {
    fn ground_contact(&self, contact: &mut Contact) {
        contact.body.transform.position.y = 0.0;
        contact.motion.velocity = Vec4::zero();
        contact.motion.angular = Vec3::zero();
        contact.motion.grounded = true;
        contact.motion.settled = true;
        // First landing only; a lifted puddle keeps its original floor
        if contact.motion.rest_height <= 0.0 {
            contact.motion.rest_height = contact.body.transform.scale.y;
        }
    }

    fn visuals(&self, ctx: &mut VisualContext) -> VisualState {
        if !ctx.motion.settled {
            return VisualState::IDENTITY;
        }

        let viscosity = ctx.body.physics.viscosity.unwrap_or(0.0).max(0.0);
        let rate = ctx.config.fluid.spread_rate / (1.0 + viscosity);
        let k = (rate * ctx.dt).min(1.0);

        let floor = ctx.motion.rest_height * ctx.config.fluid.puddle_ratio;
        let scale = &mut ctx.body.transform.scale;
        if scale.y > floor && k > 0.0 {
            let old_y = scale.y;
            let new_y = old_y - (old_y - floor) * k;
            if new_y > 0.0 {
                let widen = (old_y / new_y).sqrt();
                scale.y = new_y;
                scale.x *= widen;
                scale.z *= widen;
            }
        }

        VisualState::IDENTITY
    }
}
