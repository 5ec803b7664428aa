//! Geometric math utilities.
//!
//! Distances and the scalar helpers used by animated transitions.

use crate::basics::PointD;

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Total drawn length of a discrete polyline (points taken in pairs).
pub fn discrete_length(points: &[PointD]) -> f64 {
    points
        .chunks_exact(2)
        .map(|s| calc_distance(s[0].x, s[0].y, s[1].x, s[1].y))
        .sum()
}

// ============================================================================
// Scalar helpers
// ============================================================================

/// Clamp `v` to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Loop `t` so it is never larger than `length` and never smaller than 0.
#[inline]
pub fn repeat(t: f64, length: f64) -> f64 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_calc_distance() {
        assert!((calc_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPS);
        assert_eq!(calc_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_discrete_length() {
        let pts = [
            PointD::new(0.0, 0.0),
            PointD::new(3.0, 4.0),
            // gap between segments is not counted
            PointD::new(100.0, 100.0),
            PointD::new(101.0, 100.0),
        ];
        assert!((discrete_length(&pts) - 6.0).abs() < EPS);
        assert_eq!(discrete_length(&[]), 0.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-1.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(3.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn test_repeat() {
        assert!((repeat(0.25, 1.0) - 0.25).abs() < EPS);
        assert!((repeat(3.75, 1.0) - 0.75).abs() < EPS);
        assert!((repeat(-0.25, 1.0) - 0.75).abs() < EPS);
        assert_eq!(repeat(2.0, 1.0), 0.0);
    }
}
