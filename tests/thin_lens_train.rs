//! End-to-end checks of the paraxial analysis of thin lens trains.
use approx::{assert_abs_diff_eq, relative_eq};
use assert_matches::assert_matches;
use paraxis::{
    analyzer::Side, error::ParaxisError, millimeter, ray_transfer::RayTransferMatrix,
    thin_lens::ThinLens, OpticSystem,
};
use proptest::prelude::*;
use uom::si::{f64::Length, length::millimeter};

fn lens_strategy() -> impl Strategy<Value = ThinLens> {
    let focal_length = prop_oneof![20.0..1000.0f64, -1000.0..-20.0f64];
    (focal_length, 0.0..200.0f64).prop_map(|(f, x)| ThinLens::new(millimeter!(f), millimeter!(x)))
}

fn matrix_scale(m: &RayTransferMatrix) -> f64 {
    let sum = m.a().abs() + m.b().abs() + m.c().abs() + m.d().abs();
    (sum * sum).max(1.0)
}

fn matrices_close(m1: &RayTransferMatrix, m2: &RayTransferMatrix) -> bool {
    let eps = 1e-12 * matrix_scale(m1);
    m1.to_rows()
        .iter()
        .flatten()
        .zip(m2.to_rows().iter().flatten())
        .all(|(a, b)| relative_eq!(*a, *b, epsilon = eps, max_relative = 1e-9))
}

fn lengths_close(l1: Length, l2: Length) -> bool {
    relative_eq!(l1.value, l2.value, epsilon = 1e-12, max_relative = 1e-6)
}

#[test]
fn single_lens_at_origin() {
    let mut system = OpticSystem::new();
    system.add_lens(millimeter!(100.0), millimeter!(0.0));
    let analyzer = system.analyzer();
    assert_abs_diff_eq!(
        analyzer.effective_focal_length().unwrap().get::<millimeter>(),
        100.0,
        epsilon = 1e-9
    );
    let (focal_point, principal_plane, focal_distance) =
        analyzer.back_focal_parameters().unwrap().as_tuple();
    assert_abs_diff_eq!(focal_point.get::<millimeter>(), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(principal_plane.get::<millimeter>(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(focal_distance.get::<millimeter>(), 100.0, epsilon = 1e-9);
    let (focal_point, principal_plane, focal_distance) =
        analyzer.front_focal_parameters().unwrap().as_tuple();
    assert_abs_diff_eq!(focal_point.get::<millimeter>(), -100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(principal_plane.get::<millimeter>(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(focal_distance.get::<millimeter>(), 100.0, epsilon = 1e-9);
}

#[test]
fn single_lens_anywhere() {
    for (f, x) in [(100.0, 0.0), (-75.0, 12.5), (20.0, -300.0), (1.0e4, 1.0e3)] {
        let mut system = OpticSystem::new();
        system.add_lens(millimeter!(f), millimeter!(x));
        let efl = system.analyzer().effective_focal_length().unwrap();
        assert_abs_diff_eq!(efl.get::<millimeter>(), f, epsilon = 1e-9 * f64::abs(f));
    }
}

#[test]
fn two_lens_combination_formula() {
    let (f1, f2, d) = (100.0, 50.0, 20.0);
    let mut system = OpticSystem::new();
    system.add_lens(millimeter!(f2), millimeter!(d));
    system.add_lens(millimeter!(f1), millimeter!(0.0));
    let analyzer = system.analyzer();
    assert_abs_diff_eq!(
        analyzer.transfer_matrix().unwrap().determinant(),
        1.0,
        epsilon = 1e-9
    );
    let expected = 1.0 / (1.0 / f1 + 1.0 / f2 - d / (f1 * f2));
    assert_abs_diff_eq!(
        analyzer.effective_focal_length().unwrap().get::<millimeter>(),
        expected,
        epsilon = 1e-9
    );
}

#[test]
fn principal_planes_measure_effective_focal_length() {
    let mut system = OpticSystem::new();
    system.add_lens(millimeter!(150.0), millimeter!(-10.0));
    system.add_lens(millimeter!(-40.0), millimeter!(35.0));
    system.add_lens(millimeter!(60.0), millimeter!(80.0));
    let report = system.analyzer().analyze().unwrap();
    let efl = report.effective_focal_length().get::<millimeter>();
    let back = report.back();
    let front = report.front();
    assert_abs_diff_eq!(
        (back.focal_point - back.principal_plane).get::<millimeter>(),
        efl,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        (front.principal_plane - front.focal_point).get::<millimeter>(),
        efl,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        (back.focal_point - millimeter!(80.0)).get::<millimeter>(),
        back.focal_distance.get::<millimeter>(),
        epsilon = 1e-9
    );
}

#[test]
fn empty_system_fails_everywhere() {
    let system = OpticSystem::new();
    let analyzer = system.analyzer();
    assert_eq!(analyzer.transfer_matrix(), Err(ParaxisError::EmptySystem));
    assert_eq!(
        analyzer.effective_focal_length(),
        Err(ParaxisError::EmptySystem)
    );
    for side in [Side::Front, Side::Back] {
        assert_eq!(
            analyzer.focal_parameters(side),
            Err(ParaxisError::EmptySystem)
        );
    }
}

#[test]
fn zero_focal_length_fails() {
    let mut system = OpticSystem::new();
    system.add_lens(millimeter!(100.0), millimeter!(0.0));
    system.add_lens(millimeter!(0.0), millimeter!(10.0));
    assert_matches!(
        system.analyzer().transfer_matrix(),
        Err(ParaxisError::DivisionByZero(_))
    );
    assert_matches!(
        system.analyzer().analyze(),
        Err(ParaxisError::DivisionByZero(_))
    );
}

proptest! {
    #[test]
    fn prop_transfer_matrix_unit_determinant(lenses in prop::collection::vec(lens_strategy(), 1..6)) {
        let system: OpticSystem = lenses.into_iter().collect();
        let matrix = system.analyzer().transfer_matrix().unwrap();
        let tolerance = 1e-12 * matrix_scale(&matrix);
        prop_assert!((matrix.determinant() - 1.0).abs() <= tolerance);
    }

    #[test]
    fn prop_insertion_order_irrelevant(
        (lenses, shuffled) in prop::collection::vec(lens_strategy(), 1..6)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let system: OpticSystem = lenses.into_iter().collect();
        let shuffled_system: OpticSystem = shuffled.into_iter().collect();
        let m1 = system.analyzer().transfer_matrix().unwrap();
        let m2 = shuffled_system.analyzer().transfer_matrix().unwrap();
        prop_assert!(matrices_close(&m1, &m2));
        let report = system.analyzer().analyze();
        let shuffled_report = shuffled_system.analyzer().analyze();
        prop_assert_eq!(report.is_ok(), shuffled_report.is_ok());
        if let (Ok(r1), Ok(r2)) = (report, shuffled_report) {
            prop_assert!(lengths_close(r1.effective_focal_length(), r2.effective_focal_length()));
            for (p1, p2) in [(r1.front(), r2.front()), (r1.back(), r2.back())] {
                prop_assert!(lengths_close(p1.focal_point, p2.focal_point));
                prop_assert!(lengths_close(p1.principal_plane, p2.principal_plane));
                prop_assert!(lengths_close(p1.focal_distance, p2.focal_distance));
            }
        }
    }
}
