//! # Pavement Design Calculations
//!
//! Each design type follows the pattern:
//!
//! - `*DesignInput` - Input parameters (JSON-serializable)
//! - `*DesignResult` - Design results (JSON-serializable)
//! - `design_*(input, .., settings) -> EngineResult<*DesignResult>`
//!
//! In the default lenient mode a design never fails: validation and
//! convergence errors are folded into the result's warnings and the result
//! is marked inadequate. [`DesignSettings::throw_on_error`] turns the first
//! error into an `Err` instead.
//!
//! ## Available Designs
//!
//! - [`flexible`] - Asphalt pavement: required SN and layer thicknesses
//! - [`rigid`] - Jointed plain concrete: slab thickness, joints, dowels

pub mod flexible;
pub mod rigid;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineResult;
use crate::materials::{DrainageQuality, LayerCoefficients, LayerMaterials};
use crate::settings::DesignSettings;
use crate::units::{Centimeters, Inches};

pub use flexible::{
    check_section, design_flexible, solve_structural_number, FlexibleDesignInput,
    FlexibleDesignResult, LayerThicknesses, SectionCheck, SnSolution,
};
pub use rigid::{design_rigid, solve_slab_thickness, RigidDesignInput, RigidDesignResult, SlabSolution};

/// Iteration budget shared by both solvers
pub const MAX_ITERATIONS: u32 = 100;

/// One layer of a designed pavement section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Base Course",
///   "material": "Crushed Stone Base",
///   "thickness_in": 6.0,
///   "thickness_cm": 15.24,
///   "coefficient": 0.14,
///   "drainage_coefficient": 1.0,
///   "contribution": 0.84
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PavementLayerResult {
    /// Layer role (e.g., "Surface Course", "Concrete Slab")
    pub name: String,
    /// Material label
    pub material: String,
    pub thickness_in: f64,
    pub thickness_cm: f64,
    /// Structural layer coefficient a_i (0 for a concrete slab)
    pub coefficient: f64,
    /// Drainage coefficient m_i (1.0 where not applicable)
    pub drainage_coefficient: f64,
    /// Structural number supplied by this layer (flexible), or the slab
    /// thickness in inches (rigid)
    pub contribution: f64,
}

impl PavementLayerResult {
    /// A flexible layer, contribution a·m·D
    pub fn structural(
        name: impl Into<String>,
        material: impl Into<String>,
        thickness_in: f64,
        coefficient: f64,
        drainage_coefficient: f64,
    ) -> Self {
        PavementLayerResult {
            name: name.into(),
            material: material.into(),
            thickness_in,
            thickness_cm: Centimeters::from(Inches(thickness_in)).0,
            coefficient,
            drainage_coefficient,
            contribution: coefficient * drainage_coefficient * thickness_in,
        }
    }

    /// A concrete slab, contribution is its thickness
    pub fn slab(material: impl Into<String>, thickness_in: f64) -> Self {
        PavementLayerResult {
            name: "Concrete Slab".to_string(),
            material: material.into(),
            thickness_in,
            thickness_cm: Centimeters::from(Inches(thickness_in)).0,
            coefficient: 0.0,
            drainage_coefficient: 1.0,
            contribution: thickness_in,
        }
    }
}

/// Material selection for a flexible case given by keys.
///
/// ## JSON Example
///
/// ```json
/// { "surface": "asphalt_concrete", "base": "crushed_stone", "subbase": "granular_subbase", "drainage": "good" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSelection {
    pub surface: String,
    pub base: String,
    pub subbase: String,
    #[serde(deserialize_with = "DrainageQuality::deserialize_lenient")]
    pub drainage: DrainageQuality,
}

impl Default for LayerSelection {
    fn default() -> Self {
        LayerSelection {
            surface: "asphalt_concrete".to_string(),
            base: "crushed_stone".to_string(),
            subbase: "granular_subbase".to_string(),
            drainage: DrainageQuality::Good,
        }
    }
}

impl LayerSelection {
    pub fn coefficients(&self) -> LayerCoefficients {
        LayerCoefficients::from_materials(&self.surface, &self.base, &self.subbase, self.drainage)
    }

    pub fn labels(&self) -> LayerMaterials {
        LayerMaterials::from_keys(&self.surface, &self.base, &self.subbase)
    }
}

/// A flexible design case: design input plus the layer materials.
///
/// Explicit `coefficients` take precedence over those looked up from
/// `layers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleCase {
    #[serde(flatten)]
    pub input: FlexibleDesignInput,
    #[serde(default)]
    pub layers: LayerSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<LayerCoefficients>,
}

impl FlexibleCase {
    pub fn new(input: FlexibleDesignInput) -> Self {
        FlexibleCase {
            input,
            layers: LayerSelection::default(),
            coefficients: None,
        }
    }

    pub fn effective_coefficients(&self) -> LayerCoefficients {
        self.coefficients.unwrap_or_else(|| self.layers.coefficients())
    }
}

/// Enum wrapper for all design types.
///
/// Lets a batch file hold flexible and rigid cases side by side.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Rigid", "label": "Runway apron", "w18": 5000000, "reliability": 95,
///   "subgrade_k_pci": 150, "load_transfer_j": 3.2, "drainage_cd": 1.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignCase {
    Flexible(FlexibleCase),
    Rigid(RigidDesignInput),
}

impl DesignCase {
    /// Get the user-provided label for this case
    pub fn label(&self) -> &str {
        match self {
            DesignCase::Flexible(c) => &c.input.label,
            DesignCase::Rigid(r) => &r.label,
        }
    }

    /// Get the design type as a string
    pub fn design_type(&self) -> &'static str {
        match self {
            DesignCase::Flexible(_) => "Flexible",
            DesignCase::Rigid(_) => "Rigid",
        }
    }

    /// Run the design for this case
    pub fn run(&self, settings: &DesignSettings) -> EngineResult<DesignOutcome> {
        match self {
            DesignCase::Flexible(case) => {
                let coeffs = case.effective_coefficients();
                let result = design_flexible(&case.input, &coeffs, &case.layers.labels(), settings)?;
                Ok(DesignOutcome::Flexible(result))
            }
            DesignCase::Rigid(input) => Ok(DesignOutcome::Rigid(design_rigid(input, settings)?)),
        }
    }
}

/// Result of running a [`DesignCase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignOutcome {
    Flexible(FlexibleDesignResult),
    Rigid(RigidDesignResult),
}

impl DesignOutcome {
    pub fn label(&self) -> &str {
        match self {
            DesignOutcome::Flexible(r) => &r.label,
            DesignOutcome::Rigid(r) => &r.label,
        }
    }

    pub fn is_adequate(&self) -> bool {
        match self {
            DesignOutcome::Flexible(r) => r.adequate,
            DesignOutcome::Rigid(r) => r.adequate,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            DesignOutcome::Flexible(r) => &r.warnings,
            DesignOutcome::Rigid(r) => &r.warnings,
        }
    }
}

/// A file of design cases sharing one set of settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "settings": { "throw_on_error": false, "project": { "engineer": "J. Doe", "job_id": "26-014" } },
///   "cases": [
///     { "type": "Flexible", "label": "Main St", "w18": 1000000, "reliability": 90,
///       "resilient_modulus_psi": 7500 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignBatch {
    #[serde(default)]
    pub settings: DesignSettings,
    #[serde(default)]
    pub cases: Vec<DesignCase>,
}

impl DesignBatch {
    pub fn new(settings: DesignSettings) -> Self {
        DesignBatch {
            settings,
            cases: Vec::new(),
        }
    }

    pub fn with_case(mut self, case: DesignCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Run every case in order.
    ///
    /// In strict mode the first failing case stops the batch.
    pub fn run(&self) -> EngineResult<Vec<DesignOutcome>> {
        let outcomes = self
            .cases
            .iter()
            .map(|case| case.run(&self.settings))
            .collect::<EngineResult<Vec<_>>>()?;

        let adequate = outcomes.iter().filter(|o| o.is_adequate()).count();
        info!(cases = outcomes.len(), adequate, "design batch complete");
        Ok(outcomes)
    }
}
