//! # Unit Types
//!
//! Type-safe wrappers for the units pavement design moves between. These
//! are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Conventions
//!
//! The AASHTO-93 equations are calibrated in US customary units:
//! - Thickness: inches (in)
//! - Moduli and strengths: pounds per square inch (psi)
//! - Subgrade reaction k: pounds per cubic inch (pci)
//!
//! Reports and layer results additionally carry metric values:
//! - Thickness: centimeters (cm)
//! - Joint spacing: meters (m)
//! - Concrete grades: megapascals (MPa)
//!
//! ## Example
//!
//! ```rust
//! use pave_core::units::{Centimeters, Inches, Mpa, Psi};
//!
//! let slab = Inches(10.0);
//! let slab_cm: Centimeters = slab.into();
//! assert!((slab_cm.0 - 25.4).abs() < 1e-9);
//!
//! let sc: Psi = Mpa(4.4).into();
//! assert!((sc.0 - 638.17).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Centimeters per inch
pub const CM_PER_IN: f64 = 2.54;
/// Meters per foot
pub const M_PER_FT: f64 = 0.3048;
/// psi per MPa
pub const PSI_PER_MPA: f64 = 145.037_737_730_209;

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_IN)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * M_PER_FT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / M_PER_FT)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress or modulus in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Stress or modulus in megapascals (MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mpa(pub f64);

impl From<Mpa> for Psi {
    fn from(mpa: Mpa) -> Self {
        Psi(mpa.0 * PSI_PER_MPA)
    }
}

impl From<Psi> for Mpa {
    fn from(psi: Psi) -> Self {
        Mpa(psi.0 / PSI_PER_MPA)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Inches);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Feet);
impl_arithmetic!(Meters);
impl_arithmetic!(Psi);
impl_arithmetic!(Mpa);

/// Round `value` to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_centimeters() {
        let cm: Centimeters = Inches(3.0).into();
        assert!((cm.0 - 7.62).abs() < 1e-9);
        let back: Inches = cm.into();
        assert!((back.0 - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_feet_to_meters() {
        let m: Meters = Feet(10.0).into();
        assert!((m.0 - 3.048).abs() < 1e-12);
        let inches: Inches = Feet(1.5).into();
        assert_eq!(inches.0, 18.0);
    }

    #[test]
    fn test_mpa_to_psi() {
        let psi: Psi = Mpa(1.0).into();
        assert!((psi.0 - 145.0377).abs() < 1e-3);
    }

    #[test]
    fn test_arithmetic() {
        let a = Inches(10.0);
        let b = Inches(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(4.80, 0.5), 5.0);
        assert_eq!(round_to_step(4.70, 0.5), 4.5);
        assert!((round_to_step(9.444, 0.1) - 9.4).abs() < 1e-9);
        assert_eq!(round_to_step(3.3, 0.0), 3.3);
    }

    #[test]
    fn test_serialization() {
        let t = Inches(12.5);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Inches = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
