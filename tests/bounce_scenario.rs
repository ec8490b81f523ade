use approx::assert_relative_eq;
use flint_engine::domain::Coords;
use flint_engine::{Body, FrameInput, PhysicsType, SolverConfig, SolverCore};

const DT: f32 = 1.0 / 60.0;

fn ball(restitution: f32) -> Body {
    Body::new("ball", PhysicsType::Rigid)
        .with_position(Coords::new4(0.0, 5.0, 0.0, 0.0))
        .with_physics(|p| {
            p.restitution = restitution;
            p.friction = 0.5;
        })
}

/// Apex heights of each bounce, sampled at frame granularity
fn bounce_peaks(solver: &mut SolverCore, bodies: &mut [Body], frames: usize) -> Vec<f32> {
    let mut peaks = Vec::new();
    let mut rising = false;
    let mut peak = 0.0f32;
    for _ in 0..frames {
        solver.update(&FrameInput::simulating(DT), bodies).unwrap();
        let vy = solver.velocity("ball").y;
        let y = bodies[0].transform.position.y;
        if vy > 0.0 {
            rising = true;
            peak = peak.max(y);
        } else if rising {
            rising = false;
            peaks.push(peak.max(y));
            peak = 0.0;
        }
    }
    peaks
}

#[test]
fn rebound_height_follows_restitution_squared() {
    let mut solver = SolverCore::new();
    let mut bodies = vec![ball(0.5)];

    let peaks = bounce_peaks(&mut solver, &mut bodies, 400);

    assert!(peaks.len() >= 3, "only {} bounces recorded", peaks.len());
    // h * r^2
    assert_relative_eq!(peaks[0], 1.25, epsilon = 0.05);
    // Friction and damping only ever take energy out
    assert!(peaks[0] < 1.25, "first rebound {} above h * r^2", peaks[0]);
    assert!(peaks[1] < peaks[0]);
    assert!(peaks[2] < peaks[1]);
}

#[test]
fn bouncing_ball_comes_to_rest_on_the_ground() {
    let mut solver = SolverCore::new();
    let mut bodies = vec![ball(0.5)];

    for _ in 0..400 {
        solver.update(&FrameInput::simulating(DT), &mut bodies).unwrap();
        assert!(bodies[0].transform.position.y >= 0.0);
    }

    assert_eq!(bodies[0].transform.position.y, 0.0);
    assert_eq!(solver.velocity("ball").y, 0.0);
    assert!(solver.motion("ball").grounded);
}

#[test]
fn ball_is_still_after_three_seconds() {
    let mut solver = SolverCore::new();
    let mut bodies = vec![ball(0.5)];

    for _ in 0..180 {
        solver.update(&FrameInput::simulating(DT), &mut bodies).unwrap();
        assert!(bodies[0].transform.position.y >= 0.0);
    }

    assert_eq!(solver.frame(), 180);
    assert_eq!(bodies[0].transform.position.y, 0.0);
    assert_eq!(solver.velocity("ball").y, 0.0);
}

#[test]
fn substep_decomposition_is_time_homogeneous() {
    let falling = || {
        let mut body = Body::new("ball", PhysicsType::Rigid)
            .with_position(Coords::new(0.0, 100.0, 0.0))
            .with_physics(|p| p.linear_damping = 0.5);
        body.velocity = Some(Coords::new(3.0, 0.0, -1.0));
        vec![body]
    };

    // Same substep length: one call of dt vs two of dt/2
    let mut whole = SolverCore::new();
    let mut a = falling();
    whole.update(&FrameInput::simulating(0.1), &mut a).unwrap();

    let mut halves = SolverCore::with_config(SolverConfig {
        substeps: 4,
        ..SolverConfig::default()
    })
    .unwrap();
    let mut b = falling();
    halves.update(&FrameInput::simulating(0.05), &mut b).unwrap();
    halves.update(&FrameInput::simulating(0.05), &mut b).unwrap();

    let (pa, pb) = (&a[0].transform.position, &b[0].transform.position);
    assert_relative_eq!(pa.x, pb.x, epsilon = 1e-5);
    assert_relative_eq!(pa.y, pb.y, epsilon = 1e-4);
    assert_relative_eq!(pa.z, pb.z, epsilon = 1e-5);
    assert_relative_eq!(whole.velocity("ball").y, halves.velocity("ball").y, epsilon = 1e-5);

    // Default substep count: finer slicing stays within integration tolerance
    let mut fine = SolverCore::new();
    let mut c = falling();
    fine.update(&FrameInput::simulating(0.05), &mut c).unwrap();
    fine.update(&FrameInput::simulating(0.05), &mut c).unwrap();
    assert_relative_eq!(pa.y, c[0].transform.position.y, epsilon = 1e-2);
    assert_relative_eq!(whole.velocity("ball").x, fine.velocity("ball").x, epsilon = 1e-3);
}
