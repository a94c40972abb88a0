//! Percentages and period-over-period deltas

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `completed / total * 100`, clamped to `[0, 100]` and rounded.
///
/// Zero when `total` is zero.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = completed as f64 / total as f64 * 100.0;
    round2(rate.clamp(0.0, 100.0))
}

/// Difference between the current and the previous period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    /// `current - previous`, positive when the current period did not fall behind
    pub fn between(current: f64, previous: f64) -> Self {
        Self {
            value: round2(current - previous),
            is_positive: current >= previous,
        }
    }

    /// Trend between two counts
    pub fn of_counts(current: usize, previous: usize) -> Self {
        Self::between(current as f64, previous as f64)
    }
}
