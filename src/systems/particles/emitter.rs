//! ParticleSystem - fixed-capacity SoA emitter
//!
//! Layout (`n = config.count`):
//! - `pos`, `vel`: 4n floats, xyzw per particle
//! - `life`, `age`: n floats, seconds
//! - `render_positions`, `render_colors`: 3n floats handed to the renderer
//!
//! Every buffer is allocated once at creation and rewritten in place each
//! frame. A particle respawns when `age >= life`; otherwise it integrates.

use crate::core::{Rng, Vec4};
use crate::domain::ParticleConfig;
use crate::systems::projection::Projector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticleStats {
    pub updated: u32,
    pub respawned: u32,
}

pub struct ParticleSystem {
    config: ParticleConfig,
    pos: Vec<f32>,
    vel: Vec<f32>,
    life: Vec<f32>,
    age: Vec<f32>,
    render_positions: Vec<f32>,
    render_colors: Vec<f32>,
}

impl ParticleSystem {
    /// Allocate `config.count` particles around `center` with ages spread
    /// over `[0, life)` so the emitter doesn't pulse on start
    pub fn new(config: ParticleConfig, center: Vec4, rng: &mut Rng) -> Self {
        let n = config.count;
        let mut system = Self {
            pos: vec![0.0; n * 4],
            vel: vec![0.0; n * 4],
            life: vec![config.life; n],
            age: vec![0.0; n],
            render_positions: vec![0.0; n * 3],
            render_colors: vec![0.0; n * 3],
            config,
        };

        for i in 0..n {
            system.respawn(i, center, rng);
            system.age[i] = rng.range(0.0, system.config.life);
        }
        system.write_render(None);
        system
    }

    pub fn count(&self) -> usize {
        self.config.count
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Adopt a new config of the same size; existing particles keep flying
    /// and pick up the new life/ranges on their next respawn
    pub fn set_config(&mut self, config: ParticleConfig) {
        debug_assert_eq!(config.count, self.config.count);
        self.config = config;
    }

    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    pub fn velocities(&self) -> &[f32] {
        &self.vel
    }

    pub fn ages(&self) -> &[f32] {
        &self.age
    }

    pub fn lives(&self) -> &[f32] {
        &self.life
    }

    pub fn render_positions(&self) -> &[f32] {
        &self.render_positions
    }

    pub fn render_colors(&self) -> &[f32] {
        &self.render_colors
    }

    /// Get pointer to render positions (for JS rendering)
    pub fn render_positions_ptr(&self) -> *const f32 {
        self.render_positions.as_ptr()
    }

    /// Get pointer to render colors (for JS rendering)
    pub fn render_colors_ptr(&self) -> *const f32 {
        self.render_colors.as_ptr()
    }

    /// Advance one frame. `projector` is present only in 4D, where each
    /// particle is scaled by its own W; otherwise render positions are xyz.
    pub fn update(
        &mut self,
        dt: f32,
        center: Vec4,
        projector: Option<&Projector>,
        rng: &mut Rng,
    ) -> ParticleStats {
        let mut stats = ParticleStats::default();
        let drag = 1.0 - self.config.drag * dt;
        let hyper_gravity = self.config.hyper_gravity * dt;

        for i in 0..self.config.count {
            self.age[i] += dt;
            if self.age[i] >= self.life[i] {
                self.respawn(i, center, rng);
                stats.respawned += 1;
            } else {
                let p = i * 4;
                let v = &mut self.vel[p..p + 4];
                if self.config.drag != 0.0 {
                    v.iter_mut().for_each(|c| *c *= drag);
                }
                v[3] -= hyper_gravity;

                self.pos[p] += v[0] * dt;
                self.pos[p + 1] += v[1] * dt;
                self.pos[p + 2] += v[2] * dt;
                self.pos[p + 3] += v[3] * dt;
            }
        }
        stats.updated = self.config.count as u32;

        self.write_render(projector);
        stats
    }

    fn respawn(&mut self, i: usize, center: Vec4, rng: &mut Rng) {
        let cfg = &self.config;
        let p = i * 4;

        self.age[i] = 0.0;
        self.life[i] = cfg.life;

        self.pos[p] = center.x + rng.range(-cfg.spread[0], cfg.spread[0]);
        self.pos[p + 1] = center.y + rng.range(-cfg.spread[1], cfg.spread[1]);
        self.pos[p + 2] = center.z + rng.range(-cfg.spread[2], cfg.spread[2]);
        self.pos[p + 3] = center.w + rng.range(-cfg.w_spread, cfg.w_spread);

        self.vel[p] = rng.range(-1.0, 1.0) * cfg.speed;
        self.vel[p + 1] = rng.range(0.0, 2.0) * cfg.speed;
        self.vel[p + 2] = rng.range(-1.0, 1.0) * cfg.speed;
        self.vel[p + 3] = rng.range(-1.0, 1.0) * cfg.w_velocity;
    }

    fn write_render(&mut self, projector: Option<&Projector>) {
        match projector {
            Some(projector) => projector.project_vertices(&self.pos, &mut self.render_positions),
            None => {
                for (out, p) in self
                    .render_positions
                    .chunks_exact_mut(3)
                    .zip(self.pos.chunks_exact(4))
                {
                    out.copy_from_slice(&p[..3]);
                }
            }
        }

        let (start, end) = (&self.config.color_start, &self.config.color_end);
        for (i, out) in self.render_colors.chunks_exact_mut(3).enumerate() {
            let t = if self.life[i] > 0.0 { self.age[i] / self.life[i] } else { 0.0 };
            out.copy_from_slice(&start.lerp(end, t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, ProjectionConfig};
    use approx::assert_relative_eq;

    fn small_config(count: usize) -> ParticleConfig {
        ParticleConfig {
            count,
            life: 1.0,
            speed: 2.0,
            spread: [0.5, 0.25, 1.0],
            w_spread: 0.75,
            w_velocity: 0.3,
            ..ParticleConfig::default()
        }
    }

    fn in_box(sys: &ParticleSystem, i: usize, center: Vec4) -> bool {
        let cfg = sys.config();
        let p = &sys.positions()[i * 4..i * 4 + 4];
        let eps = 1e-5;
        (p[0] - center.x).abs() <= cfg.spread[0] + eps
            && (p[1] - center.y).abs() <= cfg.spread[1] + eps
            && (p[2] - center.z).abs() <= cfg.spread[2] + eps
            && (p[3] - center.w).abs() <= cfg.w_spread + eps
    }

    #[test]
    fn initial_ages_are_spread_over_life() {
        let mut rng = Rng::new(5);
        let sys = ParticleSystem::new(small_config(256), Vec4::zero(), &mut rng);
        assert!(sys.ages().iter().all(|&a| (0.0..1.0).contains(&a)));
        let distinct = sys.ages().windows(2).filter(|w| w[0] != w[1]).count();
        assert!(distinct > 200);
    }

    #[test]
    fn ages_stay_within_life_and_respawns_land_in_box() {
        let mut rng = Rng::new(11);
        let center = Vec4::new(3.0, 1.0, -2.0, 0.5);
        let mut sys = ParticleSystem::new(small_config(128), center, &mut rng);

        let mut respawned = 0;
        for _ in 0..240 {
            let stats = sys.update(1.0 / 60.0, center, None, &mut rng);
            respawned += stats.respawned;
            for i in 0..sys.count() {
                let age = sys.ages()[i];
                assert!(age >= 0.0 && age < sys.lives()[i]);
                if age == 0.0 {
                    assert!(in_box(&sys, i, center));
                }
            }
        }
        assert!(respawned > 0);
    }

    #[test]
    fn respawn_velocity_ranges() {
        let mut rng = Rng::new(21);
        let sys = ParticleSystem::new(small_config(512), Vec4::zero(), &mut rng);
        for v in sys.velocities().chunks_exact(4) {
            assert!(v[0].abs() <= 2.0 && v[2].abs() <= 2.0);
            assert!((0.0..=4.0).contains(&v[1]));
            assert!(v[3].abs() <= 0.3);
        }
    }

    #[test]
    fn buffers_are_reused_in_place() {
        let mut rng = Rng::new(2);
        let mut sys = ParticleSystem::new(small_config(64), Vec4::zero(), &mut rng);
        let pos_ptr = sys.positions().as_ptr();
        let render_ptr = sys.render_positions_ptr();
        for _ in 0..120 {
            sys.update(1.0 / 30.0, Vec4::zero(), None, &mut rng);
        }
        assert_eq!(sys.positions().as_ptr(), pos_ptr);
        assert_eq!(sys.render_positions_ptr(), render_ptr);
    }

    #[test]
    fn hyper_gravity_pulls_along_minus_w() {
        let mut rng = Rng::new(8);
        let mut cfg = small_config(1);
        cfg.life = 100.0;
        cfg.w_velocity = 0.0;
        cfg.hyper_gravity = 2.0;
        let mut sys = ParticleSystem::new(cfg, Vec4::zero(), &mut rng);
        sys.age[0] = 0.0;
        let w0 = sys.positions()[3];

        sys.update(0.5, Vec4::zero(), None, &mut rng);
        assert_relative_eq!(sys.velocities()[3], -1.0);
        assert_relative_eq!(sys.positions()[3], w0 - 0.5);
    }

    #[test]
    fn projects_by_each_particle_w_and_fades_color() {
        let mut rng = Rng::new(4);
        let mut cfg = small_config(32);
        cfg.color_start = Color::new(1.0, 1.0, 1.0);
        cfg.color_end = Color::new(0.0, 0.0, 0.0);
        let mut sys = ParticleSystem::new(cfg, Vec4::zero(), &mut rng);

        let proj_cfg = ProjectionConfig::default();
        let projector = Projector::new(0.0, 45.0, &proj_cfg);
        sys.update(0.01, Vec4::zero(), Some(&projector), &mut rng);

        for i in 0..sys.count() {
            let p = &sys.positions()[i * 4..i * 4 + 4];
            let s = projector.scale_at(p[3]);
            assert_relative_eq!(sys.render_positions()[i * 3], p[0] * s);
            let t = sys.ages()[i] / sys.lives()[i];
            assert_relative_eq!(sys.render_colors()[i * 3], 1.0 - t, epsilon = 1e-6);
        }
    }
}
