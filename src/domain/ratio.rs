use super::metric::CounterTotal;

/// Totals below this many samples are not enough to publish a ratio.
pub const MIN_SAMPLE_COUNT: f64 = 1.0;

/// Success ratio in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Computes `success / (success + error)`.
///
/// Returns `None` when the combined total is below [`MIN_SAMPLE_COUNT`],
/// including fractional totals between zero and one. Totals whose sum
/// overflows `f64` are halved first so the ratio stays exact.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Ratio of two non-negative counter totals"
)]
pub fn compute_ratio(success: CounterTotal, error: CounterTotal) -> Option<Ratio> {
    let (success, error) = (success.value(), error.value());
    let denominator = success + error;
    if denominator < MIN_SAMPLE_COUNT {
        return None;
    }
    if denominator.is_finite() {
        return Some(Ratio(success / denominator));
    }
    let (half_success, half_error) = (success / 2.0, error / 2.0);
    Some(Ratio(half_success / (half_success + half_error)))
}
