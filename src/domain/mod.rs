//! Domain model shared with the editor: bodies, particle emitters,
//! per-frame input and solver tuning.

pub mod body;
pub mod config;
pub mod frame;
pub mod particles;

pub use body::{Body, ControllerProps, Coords, CustomGeometry, MeshKind, PhysicsProps, PhysicsType, Transform};
pub use config::{FluidConfig, ProjectionConfig, SoftConfig, SolverConfig};
pub use frame::{Dimension, FrameInput};
pub use particles::{Color, ParticleConfig};
