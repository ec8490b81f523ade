//! Simulation systems, leaf-first: body behaviors, the substep integrator,
//! the dimensional projector, the particle field and portal triggers.

pub mod behaviors;
pub mod integrator;
pub mod particles;
pub mod projection;
pub mod triggers;

pub use behaviors::{BehaviorTable, BodyBehavior, VisualState, Wobble};
pub use integrator::{BodyMotion, CameraBasis, IntegrateStats, Integrator, MotionStore};
pub use particles::{ParticleField, ParticleStats, ParticleSystem};
pub use projection::{Fade, Projected, Projector};
pub use triggers::{detect_portals, PortalTrigger};
