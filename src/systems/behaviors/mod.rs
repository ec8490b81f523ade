//! Body-type behaviors
//!
//! Each physics type owns its ground response and its per-frame visual
//! deformation. Dispatch is an exhaustive match over `PhysicsType`; NONE has
//! no entry and is never integrated.

mod fluid;
mod rigid;
mod soft;

pub use fluid::FluidBehavior;
pub use rigid::RigidBehavior;
pub use soft::{SoftBehavior, Wobble};

use crate::core::{Rng, Vec3};
use crate::domain::{Body, PhysicsType, SolverConfig};
use crate::systems::integrator::BodyMotion;

/// Ground penetration context handed to a behavior (position.y < 0)
pub struct Contact<'a> {
    pub body: &'a mut Body,
    pub motion: &'a mut BodyMotion,
    pub rng: &'a mut Rng,
    pub config: &'a SolverConfig,
}

/// Per-frame visual update context
pub struct VisualContext<'a> {
    pub body: &'a mut Body,
    pub motion: &'a mut BodyMotion,
    /// Simulated seconds this frame, 0 while paused
    pub dt: f32,
    /// Solver clock, sum of simulated dt
    pub elapsed: f32,
    pub config: &'a SolverConfig,
}

/// Visual-only deformation; never written back into the entity transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    /// Multiplies the transform scale in render output
    pub scale: Vec3,
    pub wobble: Option<Wobble>,
}

impl VisualState {
    pub const IDENTITY: VisualState = VisualState {
        scale: Vec3 { x: 1.0, y: 1.0, z: 1.0 },
        wobble: None,
    };
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Behavior trait - each physics type implements this
pub trait BodyBehavior {
    fn ground_contact(&self, contact: &mut Contact);

    fn visuals(&self, _ctx: &mut VisualContext) -> VisualState {
        VisualState::IDENTITY
    }
}

/// Behavior table - dispatch by physics type
pub struct BehaviorTable {
    rigid: RigidBehavior,
    soft: SoftBehavior,
    fluid: FluidBehavior,
}

impl BehaviorTable {
    pub fn new() -> Self {
        Self {
            rigid: RigidBehavior::new(),
            soft: SoftBehavior::new(),
            fluid: FluidBehavior::new(),
        }
    }

    pub fn get(&self, kind: PhysicsType) -> Option<&dyn BodyBehavior> {
        match kind {
            PhysicsType::Rigid => Some(&self.rigid),
            PhysicsType::Soft => Some(&self.soft),
            PhysicsType::Fluid => Some(&self.fluid),
            PhysicsType::None => None,
        }
    }

    pub fn ground_contact(&self, contact: &mut Contact) {
        if let Some(behavior) = self.get(contact.body.physics.kind) {
            behavior.ground_contact(contact);
        }
    }

    pub fn visuals(&self, ctx: &mut VisualContext) -> VisualState {
        match self.get(ctx.body.physics.kind) {
            Some(behavior) => behavior.visuals(ctx),
            None => VisualState::IDENTITY,
        }
    }
}

impl Default for BehaviorTable {
    fn default() -> Self {
        Self::new()
    }
}
