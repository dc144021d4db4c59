//! Integration tests for jelly-lattice.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use jelly_lattice::anchor::{control_cube_corners, FixedAnchors, TransformedAnchors};
use jelly_lattice::boundary::BoundingBox;
use jelly_lattice::config::{ForceAccumulation, PhysicsConfig, Tunable};
use jelly_lattice::integrator::{IntegrationStrategy, SymplecticEuler};
use jelly_lattice::network::SpringNetwork;
use jelly_lattice::point::LatticePoint;
use jelly_lattice::spring::{Spring, SpringKind};
use jelly_lattice::{Lattice, SoftBody};
use jelly_math::{Mat4, Vec3};
use jelly_types::constants::LATTICE_POINT_COUNT;
use jelly_types::{LatticeIndex, PointId};

fn reference_body() -> SoftBody {
    SoftBody::new(control_cube_corners(5.0), PhysicsConfig::default()).unwrap()
}

fn max_abs_coordinate(body: &SoftBody) -> f32 {
    body.positions()
        .iter()
        .map(|p| p.abs().max_element())
        .fold(0.0, f32::max)
}

// ─── Topology ─────────────────────────────────────────────────

#[test]
fn network_spring_counts() {
    let body = reference_body();
    let network = body.network();
    assert_eq!(network.count_by_kind(SpringKind::Structural), 144);
    assert_eq!(network.count_by_kind(SpringKind::Shear), 216);
    assert_eq!(network.count_by_kind(SpringKind::Anchor), 8);
    assert_eq!(network.len(), 368);
}

#[test]
fn network_rest_lengths() {
    let body = reference_body();
    let network = body.network();
    // 10×10×10 cube: diagonal 10√3, so edge_unit = 10/3.
    let unit = 10.0 / 3.0;
    assert!((network.structural_rest_length() - unit).abs() < 1e-5);

    for spring in network.springs() {
        let expected = match spring.kind() {
            SpringKind::Structural => unit,
            SpringKind::Shear => unit * std::f32::consts::SQRT_2,
            SpringKind::Anchor => 0.0,
        };
        assert!((spring.rest_length() - expected).abs() < 1e-5);
    }
}

#[test]
fn network_connects_only_neighbours() {
    let body = reference_body();
    for spring in body.network().springs() {
        if spring.kind() == SpringKind::Anchor {
            continue;
        }
        let a = LatticeIndex::from_flat(spring.a.index());
        let b = LatticeIndex::from_flat(spring.b.index());
        let steps = [a.i.abs_diff(b.i), a.j.abs_diff(b.j), a.k.abs_diff(b.k)];
        assert!(steps.iter().all(|&s| s <= 1), "{a:?} -> {b:?}");
        let moved: usize = steps.iter().sum();
        let expected = if spring.kind() == SpringKind::Structural { 1 } else { 2 };
        assert_eq!(moved, expected, "{a:?} -> {b:?}");
    }
}

#[test]
fn network_has_no_duplicate_edges() {
    let body = reference_body();
    let mut pairs: Vec<(u16, u16)> = body
        .network()
        .springs()
        .iter()
        .map(|s| (s.a.0.min(s.b.0), s.a.0.max(s.b.0)))
        .collect();
    pairs.sort_unstable();
    let before = pairs.len();
    pairs.dedup();
    assert_eq!(pairs.len(), before);
}

#[test]
fn anchor_springs_attach_corners() {
    let body = reference_body();
    let anchors: Vec<&Spring> = body
        .network()
        .springs()
        .iter()
        .filter(|s| s.kind() == SpringKind::Anchor)
        .collect();
    for (n, spring) in anchors.iter().enumerate() {
        assert!(spring.involves_static());
        assert_eq!(spring.b, PointId((LATTICE_POINT_COUNT + n) as u16));
        let corner = LatticeIndex::from_flat(spring.a.index());
        assert!(corner.is_corner());
        assert_eq!(corner.corner_anchor().unwrap().index(), n);
    }
}

#[test]
fn line_indices_skip_anchor_springs() {
    let body = reference_body();
    let lines = body.network().line_indices();
    assert_eq!(lines.len(), 360 * 2);
    assert!(lines.iter().all(|&i| (i as usize) < LATTICE_POINT_COUNT));
    // First structural spring runs along k.
    assert_eq!(&lines[..2], &[0, 1]);
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn construction_subdivides_control_cube() {
    let body = reference_body();
    let positions = body.positions();
    assert_eq!(positions[0], Vec3::splat(-5.0));
    assert_eq!(positions[63], Vec3::splat(5.0));
    let p = positions[LatticeIndex::new(1, 2, 3).flat()];
    assert!((p - Vec3::new(-5.0 + 10.0 / 3.0, -5.0 + 20.0 / 3.0, 5.0)).length() < 1e-5);
}

#[test]
fn construction_rejects_bad_config() {
    let config = PhysicsConfig { mass: 0.0, ..Default::default() };
    assert!(SoftBody::new(control_cube_corners(5.0), config).is_err());
}

#[test]
fn construction_rejects_non_finite_corner() {
    let mut corners = control_cube_corners(5.0);
    corners[3].y = f32::NAN;
    assert!(SoftBody::new(corners, PhysicsConfig::default()).is_err());
}

// ─── Force model ──────────────────────────────────────────────

#[test]
fn spring_at_rest_exerts_nothing() {
    let points = [
        LatticePoint::free(Vec3::ZERO),
        LatticePoint::free(Vec3::new(2.0, 0.0, 0.0)),
    ];
    let spring = Spring::new(PointId(0), PointId(1), 2.0, false, SpringKind::Structural);
    let accel = spring.acceleration(&points, &PhysicsConfig::default());
    assert_eq!(accel, Vec3::ZERO);
}

#[test]
fn stretched_spring_pulls_endpoints_together() {
    let points = [
        LatticePoint::free(Vec3::ZERO),
        LatticePoint::free(Vec3::new(3.0, 0.0, 0.0)),
    ];
    let spring = Spring::new(PointId(0), PointId(1), 2.0, false, SpringKind::Structural);
    let accel = spring.acceleration(&points, &PhysicsConfig::default());
    // k = 3, stretch = 1, m = 1 → a moves toward b at 3 units/s²
    assert!((accel - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn control_spring_uses_control_elasticity() {
    let points = [
        LatticePoint::free(Vec3::ZERO),
        LatticePoint::anchor(Vec3::new(0.0, 1.0, 0.0)),
    ];
    let spring = Spring::new(PointId(0), PointId(1), 0.0, true, SpringKind::Anchor);
    let accel = spring.acceleration(&points, &PhysicsConfig::default());
    assert!((accel.y - 130.0).abs() < 1e-4);
}

#[test]
fn damping_opposes_approach() {
    let mut a = LatticePoint::free(Vec3::ZERO);
    a.velocity = Vec3::new(1.0, 0.0, 0.0);
    let points = [a, LatticePoint::free(Vec3::new(2.0, 0.0, 0.0))];
    let spring = Spring::new(PointId(0), PointId(1), 2.0, false, SpringKind::Structural);
    let accel = spring.acceleration(&points, &PhysicsConfig::default());
    // Closing at 1 unit/s with viscosity 1 → push a back.
    assert!((accel.x + 1.0).abs() < 1e-6);
}

#[test]
fn coincident_points_produce_zero_force() {
    let points = [LatticePoint::free(Vec3::ONE), LatticePoint::free(Vec3::ONE)];
    let spring = Spring::new(PointId(0), PointId(1), 1.0, false, SpringKind::Structural);
    let accel = spring.acceleration(&points, &PhysicsConfig::default());
    assert_eq!(accel, Vec3::ZERO);
    assert!(accel.is_finite());
}

#[test]
fn accumulation_is_equal_and_opposite() {
    let mut body = reference_body();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    body.disturb(&mut rng);

    let mut lattice = body.lattice().clone();
    lattice.reset_accelerations();
    body.network().accumulate_forces(&mut lattice, body.config());

    let total = lattice
        .points()
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc + p.acceleration);
    assert!(total.length() < 1e-2, "net = {total:?}");
}

#[test]
fn accumulation_writes_only_acceleration() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(3));
    let mut lattice = body.lattice().clone();
    let before = lattice.positions();
    let vel_before = lattice.velocities();
    body.network().accumulate_forces(&mut lattice, body.config());
    assert_eq!(lattice.positions(), before);
    assert_eq!(lattice.velocities(), vel_before);
}

#[test]
fn parallel_accumulation_matches_sequential() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(11));

    let sequential = PhysicsConfig::default();
    let parallel = PhysicsConfig {
        force_accumulation: ForceAccumulation::Parallel,
        ..Default::default()
    };

    let mut a = body.lattice().clone();
    let mut b = body.lattice().clone();
    a.reset_accelerations();
    b.reset_accelerations();
    body.network().accumulate_forces(&mut a, &sequential);
    body.network().accumulate_forces(&mut b, &parallel);

    for (pa, pb) in a.points().iter().zip(b.points()) {
        assert_eq!(pa.acceleration, pb.acceleration);
    }
}

// ─── Integration ──────────────────────────────────────────────

#[test]
fn euler_advances_velocity_before_position() {
    let bounds = BoundingBox::new(10.0);
    let (x, v, report) =
        SymplecticEuler::advance(Vec3::ZERO, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 0.5, &bounds, 1.0);
    assert_eq!(v, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(x, Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(report.bounces, 0);
}

#[test]
fn euler_reflects_at_face_and_clamps() {
    let bounds = BoundingBox::new(10.0);
    let (x, v, report) =
        SymplecticEuler::advance(Vec3::new(10.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO, 0.5, &bounds, 0.5);
    assert_eq!(v, Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(x, Vec3::new(9.0, 0.0, 0.0));
    assert_eq!(report.bounces, 1);
}

#[test]
fn euler_clamps_fast_escape() {
    let bounds = BoundingBox::new(10.0);
    let (x, _, report) =
        SymplecticEuler::advance(Vec3::new(9.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 1.0, &bounds, 1.0);
    assert_eq!(x.x, 10.0);
    assert_eq!(report.clamps, 1);
}

#[test]
fn integrator_skips_static_points() {
    let mut lattice = Lattice::from_corners(Vec3::ZERO, Vec3::ONE, [Vec3::splat(2.0); 8]);
    for p in lattice.points_mut() {
        p.acceleration = Vec3::ONE;
    }
    SymplecticEuler.step(&mut lattice, 0.1, &PhysicsConfig::default());
    assert_eq!(lattice.anchor_positions(), [Vec3::splat(2.0); 8]);
    assert!(lattice.free_points().iter().all(|p| p.velocity != Vec3::ZERO));
}

#[test]
fn zero_dt_changes_nothing() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(5));
    let before = body.positions();
    body.update(0.0);
    assert_eq!(body.positions(), before);
}

// ─── Body behaviour ───────────────────────────────────────────

#[test]
fn rest_configuration_is_equilibrium() {
    let mut body = reference_body();
    let before = body.positions();
    body.update(0.016);
    for (a, b) in before.iter().zip(body.positions()) {
        assert!((*a - b).length() < 1e-4);
    }
}

#[test]
fn anchors_untouched_by_update() {
    let mut body = reference_body();
    let anchors = control_cube_corners(3.0);
    body.set_anchor_positions(anchors);
    body.disturb(&mut ChaCha8Rng::seed_from_u64(1));
    for _ in 0..50 {
        body.update(0.016);
    }
    assert_eq!(body.lattice().anchor_positions(), anchors);
}

#[test]
fn boundary_contains_violent_disturbance() {
    let config = PhysicsConfig { deformation_constant: 40.0, ..Default::default() };
    let mut body = SoftBody::new(control_cube_corners(5.0), config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for step in 0..200 {
        if step % 20 == 0 {
            body.disturb(&mut rng);
        }
        body.update(0.016);
        assert!(max_abs_coordinate(&body) <= 10.0, "escaped at step {step}");
    }
}

#[test]
fn anchors_outside_box_still_contained() {
    let mut body = reference_body();
    let mut controller = TransformedAnchors::new(control_cube_corners(5.0));
    controller.set_transform(Mat4::from_translation(Vec3::new(30.0, 0.0, 0.0)));
    let mut total_bounces = 0;
    for _ in 0..300 {
        let report = body.drive(&mut controller, 0.016);
        total_bounces += report.bounces;
        assert!(max_abs_coordinate(&body) <= 10.0);
    }
    assert!(total_bounces > 0);
}

#[test]
fn disturb_is_reproducible() {
    let mut a = reference_body();
    let mut b = reference_body();
    a.disturb(&mut ChaCha8Rng::seed_from_u64(42));
    b.disturb(&mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a.positions(), b.positions());

    let mut c = reference_body();
    c.disturb(&mut ChaCha8Rng::seed_from_u64(43));
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn disturb_offsets_are_bounded() {
    let config = PhysicsConfig { deformation_constant: 2.0, ..Default::default() };
    let mut body = SoftBody::new(control_cube_corners(5.0), config).unwrap();
    let before = body.positions();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(8));
    for (a, b) in before.iter().zip(body.positions()) {
        let offset = b - *a;
        assert!(offset.abs().max_element() <= 1.0 + 1e-5);
    }
}

#[test]
fn trajectories_are_deterministic() {
    let run = || {
        let mut body = reference_body();
        body.disturb(&mut ChaCha8Rng::seed_from_u64(2024));
        for _ in 0..100 {
            body.update(0.016);
        }
        body.positions()
    };
    assert_eq!(run(), run());
}

#[test]
fn end_to_end_reference_run() {
    let mut body = reference_body();
    for _ in 0..100 {
        body.update(0.016);
    }
    let positions = body.positions();
    assert!(positions.iter().all(|p| p.is_finite()));
    assert!(max_abs_coordinate(&body) <= 10.0);
    assert!(body.centroid().length() < 1e-3);
    assert_eq!(body.timestep(), 100);
    assert!((body.sim_time() - 1.6).abs() < 1e-4);
}

#[test]
fn update_does_not_time_itself() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(2));
    for _ in 0..5 {
        assert_eq!(body.update(0.016).wall_time, 0.0);
    }
}

#[test]
fn disturbed_body_settles() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(17));
    let mut anchors = FixedAnchors::new(control_cube_corners(5.0));

    let mut peak = 0.0f64;
    for _ in 0..200 {
        peak = peak.max(body.drive(&mut anchors, 0.016).kinetic_energy);
    }
    for _ in 0..2800 {
        body.drive(&mut anchors, 0.016);
    }
    assert!(peak > 0.0);
    assert!(body.kinetic_energy() < 0.1 * peak, "ke={} peak={peak}", body.kinetic_energy());
}

#[test]
fn two_point_oscillation_dissipates() {
    let config = PhysicsConfig::default();
    let bounds = BoundingBox::new(config.bounding_box_size);
    let spring = Spring::new(PointId(0), PointId(1), 1.0, false, SpringKind::Structural);
    let mut points = [
        LatticePoint::free(Vec3::ZERO),
        LatticePoint::free(Vec3::new(2.0, 0.0, 0.0)),
    ];
    let energy = |points: &[LatticePoint; 2]| {
        let kinetic: f64 = points.iter().map(|p| 0.5 * p.velocity.length_squared() as f64).sum();
        kinetic + spring.potential_energy(points, &config)
    };

    let initial = energy(&points);
    let dt = 0.016;
    let mut early_peak = 0.0f64;
    let mut late_peak = 0.0f64;
    for step in 0..500 {
        let accel = spring.acceleration(&points, &config);
        for (p, a) in points.iter_mut().zip([accel, -accel]) {
            let (x, v, _) = SymplecticEuler::advance(p.position, p.velocity, a, dt, &bounds, 1.0);
            p.position = x;
            p.velocity = v;
        }
        let kinetic: f64 = points.iter().map(|p| 0.5 * p.velocity.length_squared() as f64).sum();
        if step < 100 {
            early_peak = early_peak.max(kinetic);
        } else if step >= 400 {
            late_peak = late_peak.max(kinetic);
        }
    }

    assert!(late_peak < early_peak * 1e-3);
    assert!(energy(&points) < initial * 1e-3);
    let rest = points[0].position.distance(points[1].position);
    assert!((rest - 1.0).abs() < 1e-2);
}

/// True when `next` is not larger than `prev` beyond float noise.
fn non_increasing(prev: f64, next: f64) -> bool {
    next <= prev + prev.abs() * 1e-9 + 1e-12
}

#[test]
fn two_point_total_energy_never_rises() {
    let config = PhysicsConfig::default();
    let bounds = BoundingBox::new(config.bounding_box_size);
    let spring = Spring::new(PointId(0), PointId(1), 1.0, false, SpringKind::Structural);
    let mut points = [
        LatticePoint::free(Vec3::ZERO),
        LatticePoint::free(Vec3::new(2.0, 0.0, 0.0)),
    ];
    let energy = |points: &[LatticePoint; 2]| {
        let kinetic: f64 = points.iter().map(|p| 0.5 * p.velocity.length_squared() as f64).sum();
        kinetic + spring.potential_energy(points, &config)
    };

    let mut prev = energy(&points);
    for step in 0..500 {
        let accel = spring.acceleration(&points, &config);
        for (p, a) in points.iter_mut().zip([accel, -accel]) {
            let (x, v, _) = SymplecticEuler::advance(p.position, p.velocity, a, 0.016, &bounds, 1.0);
            p.position = x;
            p.velocity = v;
        }
        let next = energy(&points);
        assert!(non_increasing(prev, next), "step {step}: {prev} -> {next}");
        prev = next;
    }
}

#[test]
fn disturbed_body_total_energy_never_rises() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(17));
    let mut anchors = FixedAnchors::new(control_cube_corners(5.0));
    let total = |body: &SoftBody| body.kinetic_energy() + body.elastic_energy();

    let mut prev = total(&body);
    for _ in 0..3000 {
        let report = body.drive(&mut anchors, 0.016);
        let next = total(&body);
        assert!(non_increasing(prev, next), "step {}: {prev} -> {next}", report.timestep);
        prev = next;
    }
}

#[test]
fn parameter_changes_apply_next_update() {
    let mut a = reference_body();
    let mut b = reference_body();
    a.disturb(&mut ChaCha8Rng::seed_from_u64(4));
    b.disturb(&mut ChaCha8Rng::seed_from_u64(4));
    b.set_parameter(Tunable::Elasticity, 30.0).unwrap();
    a.update(0.016);
    b.update(0.016);
    assert_ne!(a.positions(), b.positions());
    assert_eq!(b.config().elasticity, 30.0);
}

#[test]
fn rejected_parameter_keeps_previous_value() {
    let mut body = reference_body();
    assert!(body.set_parameter(Tunable::Mass, -2.0).is_err());
    assert_eq!(body.config().mass, 1.0);
}

#[test]
fn config_toml_roundtrip() {
    let config = PhysicsConfig::wobbly();
    let text = config.to_toml_string().unwrap();
    let back = PhysicsConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn config_toml_partial_uses_defaults() {
    let config = PhysicsConfig::from_toml_str("elasticity = 8.0\nforce_accumulation = \"parallel\"\n").unwrap();
    assert_eq!(config.elasticity, 8.0);
    assert_eq!(config.mass, 1.0);
    assert_eq!(config.force_accumulation, ForceAccumulation::Parallel);
}

#[test]
fn config_toml_rejects_invalid_mass() {
    assert!(PhysicsConfig::from_toml_str("mass = 0.0\n").is_err());
}

#[test]
fn restore_state_round_trips() {
    let mut body = reference_body();
    body.disturb(&mut ChaCha8Rng::seed_from_u64(6));
    for _ in 0..10 {
        body.update(0.016);
    }
    let positions = body.positions();
    let velocities = body.lattice().velocities();
    let anchors = body.lattice().anchor_positions();

    let mut replay = reference_body();
    replay
        .restore_state(body.timestep(), body.sim_time(), &positions, &velocities, anchors)
        .unwrap();
    body.update(0.016);
    replay.update(0.016);
    assert_eq!(body.positions(), replay.positions());
}

#[test]
fn network_build_is_independent_of_body() {
    let lattice = Lattice::from_corners(Vec3::ZERO, Vec3::splat(6.0), control_cube_corners(3.0));
    let network = SpringNetwork::build(&lattice, Vec3::splat(6.0));
    assert!((network.structural_rest_length() - 2.0).abs() < 1e-5);
    assert_eq!(SymplecticEuler.name(), "symplectic_euler");
}
