//! # Reliability → Standard Normal Deviate
//!
//! AASHTO-93 Part I Table 4.1: design reliability R (%) and the matching
//! standard normal deviate Zr.
//!
//! | R (%) | Zr     |   | R (%) | Zr     |
//! |-------|--------|---|-------|--------|
//! | 50    | 0.000  |   | 93    | −1.476 |
//! | 60    | −0.253 |   | 94    | −1.555 |
//! | 70    | −0.524 |   | 95    | −1.645 |
//! | 75    | −0.674 |   | 96    | −1.751 |
//! | 80    | −0.841 |   | 97    | −1.881 |
//! | 85    | −1.037 |   | 98    | −2.054 |
//! | 90    | −1.282 |   | 99    | −2.327 |
//! | 91    | −1.340 |   | 99.9  | −3.090 |
//! | 92    | −1.405 |   |       |        |
//!
//! Between keys Zr is linearly interpolated. Below 50 % the deviate is 0;
//! above 99.9 % it saturates at −3.090.
//!
//! ```rust
//! use pave_core::reliability::zr_for_reliability;
//!
//! assert_eq!(zr_for_reliability(95.0), -1.645);
//! assert!((zr_for_reliability(87.5) - (-1.1595)).abs() < 1e-9);
//! ```

/// (reliability %, Zr), strictly increasing in reliability
pub const RELIABILITY_TABLE: [(f64, f64); 17] = [
    (50.0, 0.000),
    (60.0, -0.253),
    (70.0, -0.524),
    (75.0, -0.674),
    (80.0, -0.841),
    (85.0, -1.037),
    (90.0, -1.282),
    (91.0, -1.340),
    (92.0, -1.405),
    (93.0, -1.476),
    (94.0, -1.555),
    (95.0, -1.645),
    (96.0, -1.751),
    (97.0, -1.881),
    (98.0, -2.054),
    (99.0, -2.327),
    (99.9, -3.090),
];

/// Standard normal deviate Zr for a reliability percentage.
///
/// Expects a percentage; use
/// [`validate_reliability`](crate::validation::validate_reliability) first
/// to normalize fractional input.
pub fn zr_for_reliability(reliability_pct: f64) -> f64 {
    let (min_key, _) = RELIABILITY_TABLE[0];
    let (max_key, max_zr) = RELIABILITY_TABLE[RELIABILITY_TABLE.len() - 1];

    if reliability_pct.is_nan() || reliability_pct < min_key {
        return 0.0;
    }
    if reliability_pct >= max_key {
        return max_zr;
    }

    for window in RELIABILITY_TABLE.windows(2) {
        let (r_lo, z_lo) = window[0];
        let (r_hi, z_hi) = window[1];
        if reliability_pct == r_lo {
            return z_lo;
        }
        if reliability_pct < r_hi {
            let t = (reliability_pct - r_lo) / (r_hi - r_lo);
            return z_lo + t * (z_hi - z_lo);
        }
    }
    max_zr
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_keys() {
        for (r, z) in RELIABILITY_TABLE {
            assert_eq!(zr_for_reliability(r), z, "R = {}", r);
        }
        assert_eq!(zr_for_reliability(95.0), -1.645);
    }

    #[test]
    fn test_interpolation_between_keys() {
        // Halfway between 90 (-1.282) and 91 (-1.340)
        assert!((zr_for_reliability(90.5) - (-1.311)).abs() < 1e-9);
        // 99.45 is halfway between 99 and 99.9
        assert!((zr_for_reliability(99.45) - (-2.7085)).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_table() {
        assert_eq!(zr_for_reliability(30.0), 0.0);
        assert_eq!(zr_for_reliability(99.99), -3.090);
        assert_eq!(zr_for_reliability(100.0), -3.090);
        assert_eq!(zr_for_reliability(f64::NAN), 0.0);
    }

    #[test]
    fn test_table_strictly_monotonic() {
        for window in RELIABILITY_TABLE.windows(2) {
            assert!(window[1].0 > window[0].0);
            assert!(window[1].1 < window[0].1);
        }
    }

    proptest! {
        #[test]
        fn zr_decreases_with_reliability(a in 50.0f64..99.9, b in 50.0f64..99.9) {
            prop_assume!((a - b).abs() > 1e-6);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(zr_for_reliability(hi) < zr_for_reliability(lo));
        }
    }
}
