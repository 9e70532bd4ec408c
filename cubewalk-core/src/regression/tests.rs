//! Unit tests for the least-squares slope.

use proptest::prelude::*;
use rstest::rstest;

use super::{LinearFit, fit, slope};
use crate::error::{SlopeError, SlopeErrorCode};

#[rstest]
fn constant_y_has_zero_slope() {
    let y = 10_f64.ln();
    let value = slope(&[(1.0, y), (2.0, y)]).expect("two distinct x values");
    assert!(value.abs() < 1e-12, "slope was {value}");
}

#[rstest]
#[case::empty(&[], 0)]
#[case::single(&[(5.0, 1.0)], 1)]
fn too_few_points_are_rejected(#[case] points: &[(f64, f64)], #[case] expected: usize) {
    let err = slope(points).expect_err("a line needs two points");
    assert_eq!(err, SlopeError::InsufficientData { points: expected });
    assert_eq!(err.code(), SlopeErrorCode::InsufficientData);
}

#[rstest]
#[case::pair(&[(3.0, 1.0), (3.0, 2.0)])]
#[case::triple(&[(8.0, 0.0), (8.0, 4.0), (8.0, -1.0)])]
fn identical_x_values_are_degenerate(#[case] points: &[(f64, f64)]) {
    let err = slope(points).expect_err("identical x has no slope");
    assert_eq!(
        err,
        SlopeError::DegenerateFit {
            points: points.len()
        }
    );
    assert_eq!(err.code().as_str(), "SLOPE_DEGENERATE_FIT");
}

#[rstest]
#[case(0.1, 7)]
#[case(0.7, 5)]
#[case(0.7, 7)]
#[case(1.1, 5)]
#[case(-3.3, 9)]
fn fractional_identical_x_values_are_degenerate(#[case] x: f64, #[case] count: u32) {
    let points: Vec<(f64, f64)> = (0..count).map(|i| (x, f64::from(i))).collect();
    assert_eq!(
        fit(&points),
        Err(SlopeError::DegenerateFit {
            points: points.len()
        })
    );
}

#[rstest]
#[case::nan_y(&[(1.0, 0.0), (2.0, f64::NAN)], 1)]
#[case::infinite_x(&[(f64::INFINITY, 0.0), (2.0, 1.0)], 0)]
#[case::log_of_zero(&[(1.0, 1.0), (2.0, 0.0_f64.ln())], 1)]
fn non_finite_points_are_rejected(#[case] points: &[(f64, f64)], #[case] index: usize) {
    assert_eq!(slope(points), Err(SlopeError::NonFinite { index }));
}

#[rstest]
fn exact_line_is_recovered() {
    let points: Vec<(f64, f64)> = (2..12)
        .map(|x| {
            let x = f64::from(x);
            (x, -0.25 * x + 3.0)
        })
        .collect();
    let line = fit(&points).expect("points vary in x");
    assert!((line.slope + 0.25).abs() < 1e-12);
    assert!((line.intercept - 3.0).abs() < 1e-12);
    assert!((line.predict(20.0) + 2.0).abs() < 1e-12);
}

#[rstest]
fn noisy_points_match_hand_computed_fit() {
    // x = [1, 2, 3], y = [1, 2, 2]: n=3, Σx=6, Σy=5, Σxy=11, Σx²=14.
    // slope = (33 - 30) / (42 - 36) = 0.5, intercept = (5 - 3) / 3.
    let LinearFit { slope, intercept } =
        fit(&[(1.0, 1.0), (2.0, 2.0), (3.0, 2.0)]).expect("points vary in x");
    assert!((slope - 0.5).abs() < 1e-12);
    assert!((intercept - 2.0 / 3.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn shifting_y_does_not_change_slope(
        ys in prop::collection::vec(-20.0_f64..20.0, 2..40),
        shift in -50.0_f64..50.0,
    ) {
        let points: Vec<(f64, f64)> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| (f64::from(u32::try_from(i).expect("small index")), y))
            .collect();
        let shifted: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x, y + shift)).collect();
        let base = slope(&points).expect("x values are distinct");
        let moved = slope(&shifted).expect("x values are distinct");
        prop_assert!((base - moved).abs() < 1e-6, "{base} vs {moved}");
    }

    #[test]
    fn point_order_does_not_change_slope(
        ys in prop::collection::vec(-20.0_f64..20.0, 2..40),
    ) {
        let points: Vec<(f64, f64)> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| (f64::from(u32::try_from(i).expect("small index")), y))
            .collect();
        let mut reversed = points.clone();
        reversed.reverse();
        let forward = slope(&points).expect("x values are distinct");
        let backward = slope(&reversed).expect("x values are distinct");
        prop_assert!((forward - backward).abs() < 1e-6);
    }
}
