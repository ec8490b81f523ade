//! Spatial partitioning for neighbor queries

pub mod hash;

pub use hash::{CellKey, SpatialHash};
