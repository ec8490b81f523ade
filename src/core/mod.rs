//! Core building blocks shared by every system: vector math, the seeded
//! RNG and the crate error type.

pub mod error;
pub mod random;
pub mod vec;

pub use error::{EngineError, Result};
pub use random::Rng;
pub use vec::{Vec3, Vec4};
