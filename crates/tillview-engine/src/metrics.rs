//! Derived percentage metrics and the shared division guard.
//!
//! Every ratio in the report surface funnels through [`safe_divide`] or
//! [`checked_divide`]; nothing downstream ever sees `NaN` or an infinity.

/// Divides, substituting `fallback` when no meaningful quotient exists.
///
/// Report denominators are counts or sales totals, so anything that is not
/// strictly positive (zero, negative, non-finite) means "no meaningful
/// ratio" and yields the fallback.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    checked_divide(numerator, denominator).unwrap_or(fallback)
}

/// [`safe_divide`] for callers that must tell a guarded division apart from
/// a genuine zero quotient (no sales vs. zero profit).
pub fn checked_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        let quotient = numerator / denominator;
        quotient.is_finite().then_some(quotient)
    } else {
        None
    }
}

/// Ratio as a percentage, rounded to 2 decimal places; 0 when guarded.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    round2(safe_divide(numerator, denominator, 0.0) * 100.0)
}

/// Rounds to the 2-decimal precision monetary and percentage fields carry
/// on the wire.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replaces `NaN` and infinities with 0 so report figures stay renderable.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
