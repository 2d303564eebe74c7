//! Shared rounding for every value that is both sorted on and shown.
//!
//! Ranking and the API go through these helpers so a displayed edge can
//! never disagree with the order it was sorted into.

/// Round to the nearest half point.  Exact quarter-point ties round away
/// from zero, so the result is symmetric in sign.
pub fn round_to_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}

/// Unsigned edge as displayed: round the signed value first, then take the
/// magnitude.
pub fn edge_magnitude(signed_edge: f64) -> f64 {
    round_to_half(signed_edge).abs()
}

/// Percentage for display, one decimal place.
pub fn round_pct(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rounds_to_nearest_half() {
        assert_relative_eq!(round_to_half(3.2), 3.0);
        assert_relative_eq!(round_to_half(3.3), 3.5);
        assert_relative_eq!(round_to_half(3.74), 3.5);
        assert_relative_eq!(round_to_half(3.76), 4.0);
        assert_relative_eq!(round_to_half(-1.6), -1.5);
    }

    #[test]
    fn quarter_ties_are_sign_symmetric() {
        assert_relative_eq!(edge_magnitude(2.25), 2.5);
        assert_relative_eq!(edge_magnitude(-2.25), 2.5);
        assert_relative_eq!(edge_magnitude(0.25), edge_magnitude(-0.25));
    }

    #[test]
    fn edge_rounds_before_abs() {
        assert_relative_eq!(edge_magnitude(-3.6), 3.5);
        assert_relative_eq!(edge_magnitude(0.2), 0.0);
    }

    #[test]
    fn pct_one_decimal() {
        assert_relative_eq!(round_pct(61.538), 61.5);
        assert_relative_eq!(round_pct(55.06), 55.1);
    }
}
