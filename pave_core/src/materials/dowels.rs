//! Joint steel for jointed plain concrete pavement.
//!
//! Dowel bars at transverse joints are sized at roughly one eighth of the
//! slab thickness. Tie bars at longitudinal joints use one fixed
//! specification.

use serde::{Deserialize, Serialize};

use crate::units::{Centimeters, Inches, CM_PER_IN};

/// Smooth dowel bar geometry for one slab thickness row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowelSpec {
    /// Slab thickness this row applies to (in)
    pub slab_thickness_in: f64,
    pub diameter_in: f64,
    pub length_in: f64,
    /// Center-to-center spacing (in)
    pub spacing_in: f64,
}

impl DowelSpec {
    pub fn diameter_mm(&self) -> f64 {
        self.diameter_in * CM_PER_IN * 10.0
    }

    pub fn length_cm(&self) -> f64 {
        Centimeters::from(Inches(self.length_in)).0
    }

    pub fn spacing_cm(&self) -> f64 {
        Centimeters::from(Inches(self.spacing_in)).0
    }
}

/// Deformed tie bar specification for longitudinal joints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieBarSpec {
    /// US bar designation number (#5 → 5)
    pub bar_number: u8,
    pub diameter_mm: f64,
    pub length_cm: f64,
    pub spacing_cm: f64,
    /// Steel yield strength (MPa)
    pub yield_strength_mpa: f64,
}

/// #5 Grade 60 bars, 76 cm long at 76 cm centers
pub const TIE_BAR_SPEC: TieBarSpec = TieBarSpec {
    bar_number: 5,
    diameter_mm: 16.0,
    length_cm: 76.0,
    spacing_cm: 76.0,
    yield_strength_mpa: 420.0,
};

const DOWEL_TABLE: [DowelSpec; 7] = [
    DowelSpec { slab_thickness_in: 6.0, diameter_in: 0.750, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 7.0, diameter_in: 0.875, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 8.0, diameter_in: 1.000, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 9.0, diameter_in: 1.125, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 10.0, diameter_in: 1.250, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 11.0, diameter_in: 1.375, length_in: 18.0, spacing_in: 12.0 },
    DowelSpec { slab_thickness_in: 12.0, diameter_in: 1.500, length_in: 18.0, spacing_in: 12.0 },
];

/// Dowel row for a slab thickness.
///
/// The thickness is rounded to the nearest inch and clamped to the 6–12 in
/// rows, so any finite thickness yields a specification.
pub fn dowel_for_thickness(thickness_in: f64) -> DowelSpec {
    let first = DOWEL_TABLE[0];
    let last = DOWEL_TABLE[DOWEL_TABLE.len() - 1];
    if thickness_in.is_nan() {
        return first;
    }
    let key = thickness_in
        .round()
        .clamp(first.slab_thickness_in, last.slab_thickness_in);
    DOWEL_TABLE
        .iter()
        .copied()
        .find(|row| row.slab_thickness_in == key)
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rows() {
        assert_eq!(dowel_for_thickness(8.0).diameter_in, 1.0);
        assert_eq!(dowel_for_thickness(10.0).diameter_in, 1.25);
    }

    #[test]
    fn test_rounding_and_clamping() {
        assert_eq!(dowel_for_thickness(9.4).slab_thickness_in, 9.0);
        assert_eq!(dowel_for_thickness(9.5).slab_thickness_in, 10.0);
        assert_eq!(dowel_for_thickness(4.0).slab_thickness_in, 6.0);
        assert_eq!(dowel_for_thickness(17.5).slab_thickness_in, 12.0);
        assert_eq!(dowel_for_thickness(f64::NAN).slab_thickness_in, 6.0);
    }

    #[test]
    fn test_metric_accessors() {
        let d = dowel_for_thickness(8.0);
        assert!((d.diameter_mm() - 25.4).abs() < 1e-9);
        assert!((d.length_cm() - 45.72).abs() < 1e-9);
        assert!((d.spacing_cm() - 30.48).abs() < 1e-9);
    }

    #[test]
    fn test_tie_bar_constants() {
        assert_eq!(TIE_BAR_SPEC.bar_number, 5);
        assert_eq!(TIE_BAR_SPEC.spacing_cm, 76.0);
    }
}
