//! Solver-owned motion state keyed by body id
//!
//! Default-on-miss: a body the store has never seen reads as at rest (or at
//! its seed `velocity` when the entity carries one). Entries are created on
//! first integration and dropped once the id leaves the input list.

use std::collections::{HashMap, HashSet};

use crate::core::{Vec3, Vec4};
use crate::domain::Body;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyMotion {
    pub velocity: Vec4,
    pub angular: Vec3,
    /// Touched the ground during the last integrated frame
    pub grounded: bool,
    /// Normalized strength of the last ground impact (0..1), decays over time
    pub impact: f32,
    /// Fluid body has hit the ground and stopped integrating
    pub settled: bool,
    /// Vertical scale captured when a fluid first settled
    pub rest_height: f32,
}

impl BodyMotion {
    pub fn with_velocity(velocity: Vec4) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }
}

#[derive(Default)]
pub struct MotionStore {
    motions: HashMap<String, BodyMotion>,
}

impl MotionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Motion for `id`, zero when the solver hasn't integrated it yet
    pub fn get(&self, id: &str) -> BodyMotion {
        self.motions.get(id).copied().unwrap_or_default()
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BodyMotion> {
        self.motions.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.motions.contains_key(id)
    }

    /// Fetch or lazily create the motion for `body`
    pub fn seeded(&mut self, body: &Body) -> &mut BodyMotion {
        self.motions.entry(body.id.clone()).or_insert_with(|| {
            let velocity = body.velocity.map(|v| v.to_vec4()).unwrap_or_default();
            BodyMotion::with_velocity(velocity)
        })
    }

    pub fn store(&mut self, id: &str, motion: BodyMotion) {
        match self.motions.get_mut(id) {
            Some(slot) => *slot = motion,
            None => {
                self.motions.insert(id.to_string(), motion);
            }
        }
    }

    /// Overwrite the linear velocity. A settled fluid is released so the
    /// new velocity is integrated; it settles again on its next landing.
    pub fn set_velocity(&mut self, id: &str, velocity: Vec4) {
        match self.motions.get_mut(id) {
            Some(m) => {
                m.velocity = velocity;
                m.settled = false;
            }
            None => {
                self.motions.insert(id.to_string(), BodyMotion::with_velocity(velocity));
            }
        }
    }

    /// Drop state of bodies that are no longer in the scene.
    /// Returns how many entries were discarded.
    pub fn retain_live(&mut self, live: &HashSet<&str>) -> usize {
        let before = self.motions.len();
        self.motions.retain(|id, _| live.contains(id.as_str()));
        before - self.motions.len()
    }

    pub fn clear(&mut self) {
        self.motions.clear();
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }
}
