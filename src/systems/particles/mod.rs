//! Particle field - one emitter per particle-system entity
//!
//! Systems live as long as their entity: created the first frame the entity
//! appears, freed the first frame it is gone. A `count` change reallocates;
//! any other config change is adopted in place.

mod emitter;

pub use emitter::{ParticleStats, ParticleSystem};

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::core::Rng;
use crate::domain::Body;
use crate::systems::projection::Projector;

#[derive(Default)]
pub struct ParticleField {
    systems: HashMap<String, ParticleSystem>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ParticleSystem> {
        self.systems.get(id)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn clear(&mut self) {
        self.systems.clear();
    }

    /// Total particles across every emitter
    pub fn particle_count(&self) -> usize {
        self.systems.values().map(ParticleSystem::count).sum()
    }

    /// Match the set of systems to the emitter entities in `bodies`
    pub fn sync(&mut self, bodies: &[Body], rng: &mut Rng) {
        let live: HashSet<&str> = bodies
            .iter()
            .filter(|b| b.is_particle_emitter())
            .map(|b| b.id.as_str())
            .collect();
        self.systems.retain(|id, _| {
            let keep = live.contains(id.as_str());
            if !keep {
                debug!("particle system {id} destroyed");
            }
            keep
        });

        for body in bodies.iter().filter(|b| b.is_particle_emitter()) {
            let config = body.particle_config.clone().unwrap_or_default();
            let center = body.transform.position.to_vec4();

            match self.systems.entry(body.id.clone()) {
                Entry::Vacant(slot) => {
                    debug!("particle system {} created with {} particles", body.id, config.count);
                    slot.insert(ParticleSystem::new(config, center, rng));
                }
                Entry::Occupied(mut slot) => {
                    let system = slot.get_mut();
                    if system.count() != config.count {
                        debug!(
                            "particle system {} rebuilt: {} -> {} particles",
                            body.id,
                            system.count(),
                            config.count
                        );
                        *system = ParticleSystem::new(config, center, rng);
                    } else if *system.config() != config {
                        system.set_config(config);
                    }
                }
            }
        }
    }

    /// Step every emitter in entity order, keeping RNG draws reproducible
    pub fn update(
        &mut self,
        dt: f32,
        bodies: &[Body],
        projector: Option<&Projector>,
        rng: &mut Rng,
    ) -> ParticleStats {
        let mut total = ParticleStats::default();
        for body in bodies.iter().filter(|b| b.is_particle_emitter()) {
            if let Some(system) = self.systems.get_mut(&body.id) {
                let center = body.transform.position.to_vec4();
                let stats = system.update(dt, center, projector, rng);
                total.updated += stats.updated;
                total.respawned += stats.respawned;
            }
        }
        total
    }
}
