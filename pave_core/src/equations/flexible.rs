//! # Flexible Pavement Formulas
//!
//! The AASHTO-93 flexible design equation and the layered structural number
//! used to turn a required SN into layer thicknesses.
//!
//! ## Notation
//!
//! - `W18` = Predicted 18-kip equivalent single axle loads
//! - `Zr` = Standard normal deviate for the design reliability
//! - `So` = Combined standard error of traffic and performance prediction
//! - `ΔPSI` = Serviceability loss, pi − pt
//! - `Mr` = Subgrade resilient modulus (psi)
//! - `SN` = Structural number
//! - `ai` = Structural layer coefficient (per inch)
//! - `mi` = Drainage coefficient
//! - `Di` = Layer thickness (in)
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures (1993), Part II, 3.1
//!   (Figure 3.1) and 3.5 (Layered Design Analysis)

use serde::{Deserialize, Serialize};

use crate::materials::LayerCoefficients;
use crate::safe_math::{safe_divide, safe_log10, safe_pow};

/// ΔPSI range the flexible equation is normalised by (4.2 − 1.5)
pub const FLEXIBLE_PSI_RANGE: f64 = 2.7;

/// Design parameters that stay fixed while SN is iterated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexibleParameters {
    /// Standard normal deviate Zr (negative for R > 50 %)
    pub zr: f64,
    /// Overall standard deviation So
    pub so: f64,
    /// Serviceability loss ΔPSI
    pub delta_psi: f64,
    /// Subgrade resilient modulus Mr (psi)
    pub mr_psi: f64,
}

/// Right-hand side of the flexible design equation: log10(W18) carried by
/// a section with structural number `sn`.
///
/// ```text
/// log10(W18) = Zr·So + 9.36·log10(SN+1) − 0.20
///            + log10(ΔPSI/2.7) / (0.40 + 1094/(SN+1)^5.19)
///            + 2.32·log10(Mr) − 8.07
/// ```
///
/// Every log, power and division is guarded, so the result is always finite.
pub fn flexible_log_w18(sn: f64, params: &FlexibleParameters) -> f64 {
    let sn1 = sn + 1.0;
    let serviceability_term = safe_divide(
        safe_log10(params.delta_psi / FLEXIBLE_PSI_RANGE),
        0.40 + safe_divide(1094.0, safe_pow(sn1, 5.19)),
    );

    params.zr * params.so + 9.36 * safe_log10(sn1) - 0.20
        + serviceability_term
        + 2.32 * safe_log10(params.mr_psi)
        - 8.07
}

/// Structural number of a three-layer section
///
/// # Formula (AASHTO-93 Part II, Eq. 3.5.1)
/// SN = a1·D1 + a2·D2·m2 + a3·D3·m3
#[inline]
pub fn layered_structural_number(
    surface_in: f64,
    base_in: f64,
    subbase_in: f64,
    coeffs: &LayerCoefficients,
) -> f64 {
    coeffs.a1 * surface_in + coeffs.base_effective() * base_in + coeffs.subbase_effective() * subbase_in
}

/// Whole-inch thickness that supplies `sn_deficit` from a layer with
/// coefficient `a` and drainage `m`.
///
/// # Formula
/// D = ⌈ΔSN / (a·m)⌉
///
/// Returns 0 for a non-positive deficit or a zero effective coefficient.
pub fn layer_thickness_required(sn_deficit: f64, coefficient: f64, drainage: f64) -> f64 {
    if sn_deficit <= 0.0 {
        return 0.0;
    }
    safe_divide(sn_deficit, coefficient * drainage).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> FlexibleParameters {
        FlexibleParameters { zr: -1.282, so: 0.45, delta_psi: 1.7, mr_psi: 7_500.0 }
    }

    #[test]
    fn test_rhs_increases_with_sn() {
        let p = scenario_a();
        let mut last = flexible_log_w18(1.0, &p);
        for i in 2..=15 {
            let next = flexible_log_w18(i as f64, &p);
            assert!(next > last, "SN {} gave {} <= {}", i, next, last);
            last = next;
        }
    }

    #[test]
    fn test_rhs_at_known_solution() {
        // SN 3.4733 carries 1,000,000 ESAL for scenario A inputs
        let rhs = flexible_log_w18(3.4733, &scenario_a());
        assert!((rhs - 6.0).abs() < 0.001, "rhs = {}", rhs);
    }

    #[test]
    fn test_rhs_is_finite_for_degenerate_inputs() {
        let p = FlexibleParameters { zr: 0.0, so: 0.45, delta_psi: 0.0, mr_psi: 0.0 };
        assert!(flexible_log_w18(-1.0, &p).is_finite());
        assert!(flexible_log_w18(f64::NAN, &p).is_finite());
    }

    #[test]
    fn test_layered_structural_number() {
        let coeffs = LayerCoefficients { a1: 0.44, a2: 0.14, a3: 0.11, m2: 1.0, m3: 1.0 };
        // 0.44·4 + 0.14·6 + 0.11·8 = 1.76 + 0.84 + 0.88
        let sn = layered_structural_number(4.0, 6.0, 8.0, &coeffs);
        assert!((sn - 3.48).abs() < 1e-9);
    }

    #[test]
    fn test_layer_thickness_rounds_up() {
        assert_eq!(layer_thickness_required(0.5, 0.11, 1.0), 5.0);
        assert_eq!(layer_thickness_required(0.44, 0.11, 1.0), 4.0);
        assert_eq!(layer_thickness_required(0.0, 0.11, 1.0), 0.0);
        assert_eq!(layer_thickness_required(0.5, 0.0, 1.0), 0.0);
    }
}
