//! Integration tests for jelly-math.

use jelly_math::{bernstein, bernstein_basis, sample_parameter, BernsteinTable, Vec3};

#[test]
fn basis_is_non_negative_on_unit_interval() {
    for step in 0..=64 {
        let t = step as f32 / 64.0;
        assert!(bernstein_basis(t).iter().all(|&b| b >= 0.0));
    }
}

#[test]
fn basis_symmetry() {
    // B_i(t) == B_{3-i}(1 - t)
    for step in 0..=20 {
        let t = step as f32 / 20.0;
        for i in 0..4 {
            let a = bernstein(i, t);
            let b = bernstein(3 - i, 1.0 - t);
            assert!((a - b).abs() < 1e-6);
        }
    }
}

#[test]
fn linear_precision() {
    // Control values 0, 1/3, 2/3, 1 reproduce t exactly (up to rounding).
    for step in 0..=30 {
        let t = step as f32 / 30.0;
        let b = bernstein_basis(t);
        let value = b[1] / 3.0 + b[2] * 2.0 / 3.0 + b[3];
        assert!((value - t).abs() < 1e-6);
    }
}

#[test]
fn weighted_curve_interpolates_end_points() {
    let control = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(2.0, -1.0, 0.0),
        Vec3::new(3.0, 0.5, 1.0),
    ];
    let eval = |t: f32| {
        let b = bernstein_basis(t);
        control.iter().zip(b).fold(Vec3::ZERO, |acc, (p, w)| acc + *p * w)
    };
    assert_eq!(eval(0.0), control[0]);
    assert_eq!(eval(1.0), control[3]);
}

#[test]
fn empty_table() {
    let table = BernsteinTable::new(0);
    assert!(table.is_empty());
}

#[test]
fn single_sample_table_sits_at_zero() {
    let table = BernsteinTable::new(1);
    assert_eq!(*table.row(0), [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(sample_parameter(0, 1), 0.0);
}
