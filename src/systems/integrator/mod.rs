//! Integrator - fixed-count substep integration
//!
//! Per substep, for every dynamic body in input order:
//! 1. Controller input (held keys, jump)
//! 2. Gravity, linear damping, position on every axis incl. W
//! 3. Angular damping, Euler rotation
//! 4. Ground contact dispatched to the body-type behavior
//!
//! Bodies never interact, so per-body interleaving within a substep is
//! equivalent to running each phase over all bodies.

mod controller;
mod state;

pub use controller::CameraBasis;
pub use state::{BodyMotion, MotionStore};

use crate::core::Rng;
use crate::domain::{Body, FrameInput, PhysicsType, SolverConfig};
use crate::systems::behaviors::{BehaviorTable, Contact};

/// Counters for one integrated frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrateStats {
    pub integrated: u32,
    pub contacts: u32,
}

pub struct Integrator {
    /// (body index, working motion), reused across frames
    active: Vec<(usize, BodyMotion)>,
}

impl Integrator {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        dt: f32,
        bodies: &mut [Body],
        motions: &mut MotionStore,
        behaviors: &BehaviorTable,
        frame: &FrameInput,
        config: &SolverConfig,
        rng: &mut Rng,
    ) -> IntegrateStats {
        let mut stats = IntegrateStats::default();

        self.active.clear();
        for (i, body) in bodies.iter().enumerate() {
            if !body.is_dynamic() {
                continue;
            }
            let mut motion = *motions.seeded(body);
            if body.physics.kind == PhysicsType::Fluid
                && motion.settled
                && body.transform.position.y > 0.0
            {
                // Lifted off the ground by the editor; fall again
                motion.settled = false;
            }
            motion.grounded = false;
            self.active.push((i, motion));
        }

        let substeps = config.substeps.max(1);
        let sub_dt = dt / substeps as f32;
        let basis = CameraBasis::from_forward(frame.camera_forward());

        for _ in 0..substeps {
            for (i, motion) in self.active.iter_mut() {
                if motion.settled {
                    continue;
                }
                let body = &mut bodies[*i];

                if let Some(controller) = body.active_controller() {
                    controller::apply_input(controller, frame, &basis, config, sub_dt, motion);
                }

                integrate(body, motion, config.gravity, sub_dt);

                if body.transform.position.y < 0.0 {
                    behaviors.ground_contact(&mut Contact {
                        body,
                        motion,
                        rng: &mut *rng,
                        config,
                    });
                    stats.contacts += 1;
                }
            }
        }

        for (i, motion) in self.active.iter() {
            motions.store(&bodies[*i].id, *motion);
        }
        stats.integrated = self.active.len() as u32;
        stats
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn integrate(body: &mut Body, motion: &mut BodyMotion, gravity: f32, h: f32) {
    let physics = &body.physics;

    motion.velocity.y += gravity * physics.gravity_scale * h;
    motion.velocity *= 1.0 - physics.linear_damping * h;

    let v = motion.velocity;
    let pos = &mut body.transform.position;
    pos.x += v.x * h;
    pos.y += v.y * h;
    pos.z += v.z * h;
    if let Some(w) = pos.w.as_mut() {
        *w += v.w * h;
    }

    motion.angular *= 1.0 - physics.angular_damping * h;

    let ang = motion.angular;
    let rot = &mut body.transform.rotation;
    rot.x += ang.x * h;
    rot.y += ang.y * h;
    rot.z += ang.z * h;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec4;
    use crate::domain::{ControllerProps, Coords};
    use approx::assert_relative_eq;

    struct Rig {
        integrator: Integrator,
        motions: MotionStore,
        behaviors: BehaviorTable,
        config: SolverConfig,
        rng: Rng,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                integrator: Integrator::new(),
                motions: MotionStore::new(),
                behaviors: BehaviorTable::new(),
                config: SolverConfig::default(),
                rng: Rng::default(),
            }
        }

        fn step(&mut self, dt: f32, bodies: &mut [Body], frame: &FrameInput) -> IntegrateStats {
            self.integrator.step(
                dt,
                bodies,
                &mut self.motions,
                &self.behaviors,
                frame,
                &self.config,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn free_fall_matches_substepped_euler() {
        let mut rig = Rig::new();
        let mut bodies = vec![Body::new("a", PhysicsType::Rigid).with_position(Coords::new(0.0, 100.0, 0.0))];
        let frame = FrameInput::simulating(0.1);

        rig.step(0.1, &mut bodies, &frame);

        // Semi-implicit Euler over 8 substeps: y -= g*h^2 * (1 + 2 + ... + 8)
        let h = 0.1f32 / 8.0;
        let expected = 100.0 - 9.81 * h * h * 36.0;
        assert_relative_eq!(bodies[0].transform.position.y, expected, epsilon = 1e-4);
        assert_relative_eq!(rig.motions.get("a").velocity.y, -9.81 * 0.1, epsilon = 1e-5);
    }

    #[test]
    fn w_axis_only_moves_when_present() {
        let mut rig = Rig::new();
        let mut flat = Body::new("flat", PhysicsType::Rigid).with_position(Coords::new(0.0, 10.0, 0.0));
        flat.physics.gravity_scale = 0.0;
        flat.velocity = Some(Coords::new4(0.0, 0.0, 0.0, 2.0));
        let mut hyper = flat.clone();
        hyper.id = "hyper".into();
        hyper.transform.position = Coords::new4(0.0, 10.0, 0.0, 1.0);
        let mut bodies = vec![flat, hyper];

        rig.step(0.5, &mut bodies, &FrameInput::simulating(0.5));

        assert_eq!(bodies[0].transform.position.w, None);
        assert_relative_eq!(bodies[1].transform.position.w_or_zero(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn skips_static_none_and_emitters() {
        let mut rig = Rig::new();
        let mut fixed = Body::new("static", PhysicsType::Rigid).with_position(Coords::new(0.0, 3.0, 0.0));
        fixed.is_static = true;
        let ghost = Body::new("none", PhysicsType::None).with_position(Coords::new(0.0, 3.0, 0.0));
        let mut bodies = vec![fixed, ghost];

        let stats = rig.step(0.1, &mut bodies, &FrameInput::simulating(0.1));

        assert_eq!(stats.integrated, 0);
        assert_eq!(bodies[0].transform.position.y, 3.0);
        assert_eq!(bodies[1].transform.position.y, 3.0);
        assert!(rig.motions.is_empty());
    }

    #[test]
    fn damping_decays_linear_and_angular_motion() {
        let mut rig = Rig::new();
        let mut body = Body::new("d", PhysicsType::Rigid)
            .with_position(Coords::new(0.0, 50.0, 0.0))
            .with_physics(|p| {
                p.gravity_scale = 0.0;
                p.linear_damping = 1.0;
                p.angular_damping = 1.0;
            });
        body.velocity = Some(Coords::new(4.0, 0.0, 0.0));
        let mut bodies = vec![body];
        rig.motions.seeded(&bodies[0]).angular.y = 2.0;

        rig.step(0.1, &mut bodies, &FrameInput::simulating(0.1));

        let m = rig.motions.get("d");
        let factor = (1.0f32 - 0.1 / 8.0).powi(8);
        assert_relative_eq!(m.velocity.x, 4.0 * factor, epsilon = 1e-5);
        assert_relative_eq!(m.angular.y, 2.0 * factor, epsilon = 1e-5);
        assert!(bodies[0].transform.rotation.y > 0.0);
    }

    #[test]
    fn held_key_accelerates_controller_body() {
        let mut rig = Rig::new();
        let mut body = Body::new("player", PhysicsType::Rigid);
        body.controller = Some(ControllerProps::new(1.0, 5.0));
        let mut bodies = vec![body];
        let mut frame = FrameInput::simulating(0.1).with_keys(["d"]);
        frame.camera_forward = [0.0, 0.0, -1.0];

        rig.step(0.1, &mut bodies, &frame);

        // Right of -Z is +X; 8 substeps of 20 * 0.0125 each
        assert_relative_eq!(rig.motions.get("player").velocity.x, 2.0, epsilon = 1e-4);
        assert!(bodies[0].transform.position.x > 0.0);
    }

    #[test]
    fn disabled_controller_is_ignored() {
        let mut rig = Rig::new();
        let mut body = Body::new("player", PhysicsType::Rigid);
        let mut controller = ControllerProps::new(1.0, 5.0);
        controller.enabled = false;
        body.controller = Some(controller);
        let mut bodies = vec![body];

        rig.step(0.1, &mut bodies, &FrameInput::simulating(0.1).with_keys(["w", "d"]));
        let v = rig.motions.get("player").velocity;
        assert_eq!((v.x, v.z), (0.0, 0.0));
    }

    #[test]
    fn settled_fluid_stays_put() {
        let mut rig = Rig::new();
        let mut bodies = vec![Body::new("f", PhysicsType::Fluid).with_position(Coords::new(0.0, 0.05, 0.0))];

        rig.step(0.1, &mut bodies, &FrameInput::simulating(0.1));
        assert!(rig.motions.get("f").settled);
        assert_eq!(bodies[0].transform.position.y, 0.0);

        rig.step(0.1, &mut bodies, &FrameInput::simulating(0.1));
        assert_eq!(rig.motions.get("f").velocity, Vec4::zero());
        assert_eq!(bodies[0].transform.position.y, 0.0);
    }
}
