//! Ordinary least-squares fit of `ln(frequency)` against return time.
//!
//! Uses the closed form
//! `slope = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)` and the matching intercept
//! `(Σy − slope·Σx) / n`. Invalid input is reported through [`SlopeError`]
//! rather than aborting, so callers can retry with more data.

use crate::error::SlopeError;

/// Slope and intercept of a least-squares line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of the line at `x = 0`.
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the fitted line at `x`.
    #[expect(clippy::float_arithmetic, reason = "evaluating a line")]
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fits a least-squares line through `points`.
///
/// # Errors
/// Returns [`SlopeError::InsufficientData`] for fewer than two points,
/// [`SlopeError::NonFinite`] when a coordinate is NaN or infinite, and
/// [`SlopeError::DegenerateFit`] when every `x` is identical.
///
/// # Examples
/// ```
/// use cubewalk_core::fit;
///
/// let line = fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).expect("points vary in x");
/// assert!((line.slope - 2.0).abs() < 1e-12);
/// assert!((line.intercept - 1.0).abs() < 1e-12);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "least-squares sums are floating-point by definition"
)]
pub fn fit(points: &[(f64, f64)]) -> Result<LinearFit, SlopeError> {
    if points.len() < 2 {
        return Err(SlopeError::InsufficientData {
            points: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(SlopeError::NonFinite { index });
    }
    if shares_one_x(points) {
        return Err(SlopeError::DegenerateFit {
            points: points.len(),
        });
    }

    let sums = points.iter().fold(Sums::default(), |acc, &(x, y)| Sums {
        x: acc.x + x,
        y: acc.y + y,
        xy: x.mul_add(y, acc.xy),
        xx: x.mul_add(x, acc.xx),
    });

    let n = points.len() as f64;
    let denominator = n * sums.xx - sums.x * sums.x;
    // Distinct x values can still cancel to zero once rounded.
    if denominator == 0.0 {
        return Err(SlopeError::DegenerateFit {
            points: points.len(),
        });
    }

    let slope = (n * sums.xy - sums.x * sums.y) / denominator;
    let intercept = (sums.y - slope * sums.x) / n;
    Ok(LinearFit { slope, intercept })
}

/// Returns the least-squares slope of `points`.
///
/// # Errors
/// Fails under the same conditions as [`fit`].
///
/// # Examples
/// ```
/// use cubewalk_core::{SlopeError, slope};
///
/// let flat = slope(&[(1.0, 10_f64.ln()), (2.0, 10_f64.ln())]).expect("two distinct x");
/// assert!(flat.abs() < 1e-12);
///
/// assert_eq!(slope(&[(5.0, 1.0)]), Err(SlopeError::InsufficientData { points: 1 }));
/// assert_eq!(
///     slope(&[(3.0, 1.0), (3.0, 2.0)]),
///     Err(SlopeError::DegenerateFit { points: 2 }),
/// );
/// ```
pub fn slope(points: &[(f64, f64)]) -> Result<f64, SlopeError> {
    fit(points).map(|line| line.slope)
}

/// Compared exactly, so rounding in the sums cannot hide a vertical line.
#[expect(clippy::float_cmp, reason = "identical x values are bitwise equal")]
fn shares_one_x(points: &[(f64, f64)]) -> bool {
    match points.split_first() {
        Some((&(first, _), rest)) => rest.iter().all(|&(x, _)| x == first),
        None => false,
    }
}

#[derive(Default)]
struct Sums {
    x: f64,
    y: f64,
    xy: f64,
    xx: f64,
}

#[cfg(test)]
mod tests;
