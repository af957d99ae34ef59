//! # Rigid Pavement Formulas
//!
//! The AASHTO-93 rigid design equation for jointed plain concrete pavement
//! and the joint spacing rule of thumb applied to the resulting slab.
//!
//! ## Notation
//!
//! - `D` = Slab thickness (in)
//! - `pt` = Terminal serviceability
//! - `Sc` = Concrete modulus of rupture (psi)
//! - `Cd` = Drainage coefficient
//! - `J` = Load transfer coefficient
//! - `Ec` = Concrete elastic modulus (psi)
//! - `k` = Modulus of subgrade reaction (pci)
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures (1993), Part II, 3.2
//!   (Figure 3.7)
//! - ACPA, Design and Construction of Joints for Concrete Highways (TB010P)

use serde::{Deserialize, Serialize};

use crate::safe_math::{safe_divide, safe_log10, safe_pow};
use crate::units::{round_to_step, Feet, Inches, Meters};

/// ΔPSI range the rigid equation is normalised by (4.5 − 1.5)
pub const RIGID_PSI_RANGE: f64 = 3.0;

/// Maximum joint spacing in slab thicknesses
pub const JOINT_SPACING_RATIO: f64 = 21.0;

/// Joint spacing is rounded to this increment (m)
pub const JOINT_SPACING_STEP_M: f64 = 0.5;

/// Design parameters that stay fixed while D is iterated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidParameters {
    pub zr: f64,
    pub so: f64,
    pub delta_psi: f64,
    /// Terminal serviceability pt
    pub terminal_serviceability: f64,
    /// Modulus of rupture Sc (psi)
    pub modulus_of_rupture_psi: f64,
    pub drainage_cd: f64,
    pub load_transfer_j: f64,
    /// Elastic modulus Ec (psi)
    pub elastic_modulus_psi: f64,
    /// Subgrade reaction k (pci)
    pub subgrade_k_pci: f64,
}

/// Stiffness term of the rigid equation denominator
///
/// # Formula
/// D^0.75 − 18.42 / (Ec/k)^0.25
///
/// The equation is only defined where this is positive.
pub fn rigid_k_term(d_in: f64, params: &RigidParameters) -> f64 {
    let relative_stiffness = safe_pow(
        safe_divide(params.elastic_modulus_psi, params.subgrade_k_pci),
        0.25,
    );
    if relative_stiffness <= 0.0 {
        return f64::NEG_INFINITY;
    }
    safe_pow(d_in, 0.75) - 18.42 / relative_stiffness
}

/// Right-hand side of the rigid design equation: log10(W18) carried by a
/// slab of thickness `d_in`.
///
/// ```text
/// log10(W18) = Zr·So + 7.35·log10(D+1) − 0.06
///            + log10(ΔPSI/3.0) / (1 + 1.624e7/(D+1)^8.46)
///            + (4.22 − 0.32·pt)·log10[ Sc·Cd·(D^0.75 − 1.132)
///                / (215.63·J·(D^0.75 − 18.42/(Ec/k)^0.25)) ]
/// ```
///
/// Returns `None` when the stiffness term [`rigid_k_term`] is not positive.
pub fn rigid_log_w18(d_in: f64, params: &RigidParameters) -> Option<f64> {
    let k_term = rigid_k_term(d_in, params);
    if !k_term.is_finite() || k_term <= 0.0 {
        return None;
    }

    let d1 = d_in + 1.0;
    let serviceability_term = safe_divide(
        safe_log10(params.delta_psi / RIGID_PSI_RANGE),
        1.0 + safe_divide(1.624e7, safe_pow(d1, 8.46)),
    );
    let stress_ratio = safe_divide(
        params.modulus_of_rupture_psi * params.drainage_cd * (safe_pow(d_in, 0.75) - 1.132),
        215.63 * params.load_transfer_j * k_term,
    );

    Some(
        params.zr * params.so + 7.35 * safe_log10(d1) - 0.06
            + serviceability_term
            + (4.22 - 0.32 * params.terminal_serviceability) * safe_log10(stress_ratio),
    )
}

/// Transverse joint spacing for a slab thickness
///
/// # Formula
/// L = 21·D (in → ft → m), rounded to the nearest 0.5 m
pub fn joint_spacing_m(slab_thickness_in: f64) -> f64 {
    let spacing: Feet = Inches(JOINT_SPACING_RATIO * slab_thickness_in).into();
    let spacing: Meters = spacing.into();
    round_to_step(spacing.0, JOINT_SPACING_STEP_M)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::PSI_PER_MPA;

    fn scenario_c() -> RigidParameters {
        RigidParameters {
            zr: -1.645,
            so: 0.35,
            delta_psi: 2.0,
            terminal_serviceability: 2.5,
            modulus_of_rupture_psi: 4.4 * PSI_PER_MPA,
            drainage_cd: 1.0,
            load_transfer_j: 3.2,
            elastic_modulus_psi: 25_700.0 * PSI_PER_MPA,
            subgrade_k_pci: 150.0,
        }
    }

    #[test]
    fn test_rhs_near_known_solution() {
        // exact root is D = 9.478 in
        let rhs = rigid_log_w18(9.478, &scenario_c()).expect("k-term positive");
        assert!((rhs - 5.0e6_f64.log10()).abs() < 0.001, "rhs = {}", rhs);
    }

    #[test]
    fn test_rhs_increases_with_thickness() {
        let p = scenario_c();
        let thin = rigid_log_w18(6.0, &p).unwrap();
        let thick = rigid_log_w18(12.0, &p).unwrap();
        assert!(thick > thin);
    }

    #[test]
    fn test_non_positive_k_term_is_undefined() {
        let p = RigidParameters { elastic_modulus_psi: 1_000.0, subgrade_k_pci: 500.0, ..scenario_c() };
        assert!(rigid_k_term(5.0, &p) < 0.0);
        assert!(rigid_log_w18(5.0, &p).is_none());

        let zero_k = RigidParameters { subgrade_k_pci: 0.0, ..scenario_c() };
        assert!(rigid_log_w18(8.0, &zero_k).is_none());
    }

    #[test]
    fn test_joint_spacing() {
        // 21 × 9.4 in = 16.45 ft = 5.01 m
        assert_eq!(joint_spacing_m(9.4), 5.0);
        // 21 × 8 in = 14 ft = 4.27 m
        assert_eq!(joint_spacing_m(8.0), 4.5);
        // 21 × 10 in = 17.5 ft = 5.33 m
        assert_eq!(joint_spacing_m(10.0), 5.5);
    }
}
