//! # Pavement Materials Database
//!
//! Read-only engineering reference data for pavement layers.
//!
//! ## Tables
//!
//! - **Layer materials**: structural layer coefficient a_i per material
//!   (AASHTO-93 Part II, 2.3.5)
//! - **Drainage**: drainage quality → m2, m3 (flexible) and Cd (rigid)
//! - **Concrete**: concrete grade → f'c, Ec, Sc
//! - **Dowels / tie bars**: joint steel geometry keyed by slab thickness
//!
//! Every string-keyed lookup falls back to a documented conservative default
//! instead of failing:
//!
//! | Lookup              | Fallback                                   |
//! |---------------------|--------------------------------------------|
//! | Material coefficient| 0.11 ([`DEFAULT_STRUCTURAL_COEFFICIENT`])  |
//! | Drainage quality    | Fair (m2 = m3 = 0.80, Cd = 1.00)           |
//! | Concrete grade      | G25 (weakest tabulated grade)              |
//! | Dowel row           | Clamped to the 6 in / 12 in rows           |
//!
//! ## Example
//!
//! ```rust
//! use pave_core::materials::{default_coefficient, LayerCoefficients, DrainageQuality};
//!
//! assert_eq!(default_coefficient("asphalt_concrete"), 0.44);
//! assert_eq!(default_coefficient("unobtainium"), 0.11);
//!
//! let coeffs = LayerCoefficients::from_materials(
//!     "asphalt_concrete",
//!     "crushed_stone",
//!     "granular_subbase",
//!     DrainageQuality::Good,
//! );
//! assert_eq!(coeffs.a2, 0.14);
//! ```

pub mod concrete;
pub mod dowels;
pub mod drainage;
pub mod layer_materials;

pub use concrete::{ConcreteGrade, ConcreteProperties};
pub use dowels::{dowel_for_thickness, DowelSpec, TieBarSpec, TIE_BAR_SPEC};
pub use drainage::{DrainageCoefficients, DrainageQuality};
pub use layer_materials::{
    all_materials, default_coefficient, material, LayerMaterial, LayerPosition,
    DEFAULT_STRUCTURAL_COEFFICIENT,
};

use serde::{Deserialize, Serialize};

/// Structural and drainage coefficients for a three-layer flexible section.
///
/// The ordering a1 ≥ a2 ≥ a3 is expected but only warned about during
/// validation.
///
/// ## JSON Example
///
/// ```json
/// { "a1": 0.44, "a2": 0.14, "a3": 0.11, "m2": 1.0, "m3": 1.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerCoefficients {
    /// Surface course structural coefficient (per inch)
    pub a1: f64,
    /// Base course structural coefficient (per inch)
    pub a2: f64,
    /// Subbase course structural coefficient (per inch)
    pub a3: f64,
    /// Base drainage coefficient
    pub m2: f64,
    /// Subbase drainage coefficient
    pub m3: f64,
}

impl LayerCoefficients {
    /// Build coefficients from material keys and a drainage quality.
    ///
    /// Unknown material keys take [`DEFAULT_STRUCTURAL_COEFFICIENT`].
    pub fn from_materials(surface: &str, base: &str, subbase: &str, drainage: DrainageQuality) -> Self {
        let m = drainage.coefficients();
        LayerCoefficients {
            a1: default_coefficient(surface),
            a2: default_coefficient(base),
            a3: default_coefficient(subbase),
            m2: m.m2,
            m3: m.m3,
        }
    }

    /// Effective base coefficient a2·m2
    pub fn base_effective(&self) -> f64 {
        self.a2 * self.m2
    }

    /// Effective subbase coefficient a3·m3
    pub fn subbase_effective(&self) -> f64 {
        self.a3 * self.m3
    }
}

impl Default for LayerCoefficients {
    /// Dense-graded asphalt over crushed stone over granular subbase, good
    /// drainage.
    fn default() -> Self {
        LayerCoefficients {
            a1: 0.44,
            a2: 0.14,
            a3: 0.11,
            m2: 1.0,
            m3: 1.0,
        }
    }
}

/// Material labels attached to each layer of a flexible design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMaterials {
    pub surface: String,
    pub base: String,
    pub subbase: String,
}

impl Default for LayerMaterials {
    fn default() -> Self {
        LayerMaterials {
            surface: "Asphalt Concrete".to_string(),
            base: "Crushed Stone Base".to_string(),
            subbase: "Granular Subbase".to_string(),
        }
    }
}

impl LayerMaterials {
    /// Display labels for three material keys (unknown keys are shown as given)
    pub fn from_keys(surface: &str, base: &str, subbase: &str) -> Self {
        let label = |key: &str| {
            material(key)
                .map(|m| m.display_name.to_string())
                .unwrap_or_else(|| key.to_string())
        };
        LayerMaterials {
            surface: label(surface),
            base: label(base),
            subbase: label(subbase),
        }
    }
}
