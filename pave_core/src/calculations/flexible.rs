//! # Flexible Pavement Design
//!
//! Solves the AASHTO-93 flexible equation for the required structural
//! number (SN) and allocates it across surface, base and subbase layers.
//!
//! ## Procedure
//!
//! 1. Validate W18, reliability, So, pi/pt, Mr and the layer coefficients
//! 2. Look up Zr and compute ΔPSI
//! 3. Iterate SN from 3.0: SN += 0.5·(log10 W18 − RHS), clamped to [1, 15],
//!    until |residual| < 0.001 (at most 100 iterations)
//! 4. Place the traffic-category minimum surface; if that is not enough add
//!    the minimum base, then subbase, then top up the base
//! 5. Compare provided and required SN and collect warnings
//!
//! All layer thicknesses are whole or half inches; metric values are
//! carried alongside for reporting.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::flexible::{design_flexible, FlexibleDesignInput};
//! use pave_core::materials::{LayerCoefficients, LayerMaterials};
//! use pave_core::settings::DesignSettings;
//!
//! let input = FlexibleDesignInput {
//!     label: "Main St".to_string(),
//!     w18: 1_000_000.0,
//!     reliability: 90.0,
//!     standard_deviation: 0.45,
//!     serviceability_initial: 4.2,
//!     serviceability_terminal: 2.5,
//!     resilient_modulus_psi: 7_500.0,
//! };
//!
//! let result = design_flexible(
//!     &input,
//!     &LayerCoefficients::default(),
//!     &LayerMaterials::default(),
//!     &DesignSettings::default(),
//! )
//! .unwrap();
//!
//! assert!(result.converged);
//! assert!(result.adequate);
//! println!("Required SN: {:.2}", result.required_sn);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{PavementLayerResult, MAX_ITERATIONS};
use crate::equations::{
    flexible_log_w18, layer_thickness_required, layered_structural_number, Equation,
    EquationTracker, FlexibleParameters, FLEXIBLE_PSI_RANGE,
};
use crate::errors::{EngineResult, EngineeringValidationError, ErrorCode, ValidationIssue};
use crate::materials::{LayerCoefficients, LayerMaterials, LayerPosition};
use crate::reliability::zr_for_reliability;
use crate::safe_math::safe_log10;
use crate::settings::DesignSettings;
use crate::traffic::FlexibleTrafficCategory;
use crate::units::{Centimeters, Inches};
use crate::validation::{
    validate_esal, validate_layer_coefficients, validate_reliability, validate_resilient_modulus,
    validate_serviceability, validate_standard_deviation, validate_structural_number,
    ValidationReport, FLEXIBLE_SO_TYPICAL,
};

/// Starting SN for the fixed-point iteration
pub const SN_INITIAL: f64 = 3.0;
/// SN is clamped to this range after every step
pub const SN_BOUNDS: (f64, f64) = (1.0, 15.0);
/// Convergence tolerance on the log10(W18) residual
pub const SN_TOLERANCE: f64 = 0.001;
/// Fraction of the residual applied to SN per step
pub const SN_CORRECTION_FACTOR: f64 = 0.5;

/// Total section thickness that draws a warning (cm)
pub const TOTAL_THICKNESS_WARNING_CM: f64 = 80.0;
/// Total section thickness considered excessive (cm)
pub const TOTAL_THICKNESS_EXCESSIVE_CM: f64 = 100.0;
/// Thinnest asphalt surface that does not draw a warning (cm)
pub const MIN_SURFACE_CM: f64 = 5.0;

/// Slack allowed when comparing provided against required SN
const SN_COMPARISON_EPSILON: f64 = 1e-9;

/// Input parameters for a flexible pavement design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Main St",
///   "w18": 1000000,
///   "reliability": 90,
///   "standard_deviation": 0.45,
///   "serviceability_initial": 4.2,
///   "serviceability_terminal": 2.5,
///   "resilient_modulus_psi": 7500
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleDesignInput {
    /// User label for this design (e.g., "Main St, Sta 10+00 to 24+50")
    #[serde(default)]
    pub label: String,

    /// Design traffic, 18-kip ESAL over the analysis period
    pub w18: f64,

    /// Reliability, as a percentage (90) or a fraction (0.9)
    pub reliability: f64,

    /// Overall standard deviation So (typically 0.40–0.50)
    #[serde(default = "default_standard_deviation")]
    pub standard_deviation: f64,

    /// Initial serviceability pi
    #[serde(default = "default_initial_serviceability")]
    pub serviceability_initial: f64,

    /// Terminal serviceability pt
    #[serde(default = "default_terminal_serviceability")]
    pub serviceability_terminal: f64,

    /// Subgrade resilient modulus Mr (psi)
    pub resilient_modulus_psi: f64,
}

fn default_standard_deviation() -> f64 {
    0.45
}

fn default_initial_serviceability() -> f64 {
    4.2
}

fn default_terminal_serviceability() -> f64 {
    2.5
}

/// Converged structural number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnSolution {
    pub sn: f64,
    /// Equation evaluations used
    pub iterations: u32,
    /// log10(W18) − RHS at `sn`
    pub residual: f64,
}

/// Flexible design results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleDesignResult {
    pub label: String,
    /// Design traffic (ESAL)
    pub w18: f64,

    // === Solve ===
    /// Required structural number (0 for a degraded result)
    pub required_sn: f64,
    pub converged: bool,
    pub iterations: u32,
    /// Standard normal deviate used
    pub zr: f64,
    /// Serviceability loss pi − pt
    pub delta_psi: f64,

    // === Section ===
    pub traffic_category: FlexibleTrafficCategory,
    /// Layers from the top down; empty for a degraded result
    pub layers: Vec<PavementLayerResult>,
    pub provided_sn: f64,
    pub total_thickness_in: f64,
    pub total_thickness_cm: f64,

    /// Provided SN covers the required SN and the solve succeeded
    pub adequate: bool,
    /// Validation findings and design advisories, in the order found
    pub warnings: Vec<String>,
    /// Equations applied, with context
    pub equations: EquationTracker,
}

impl FlexibleDesignResult {
    /// Result returned in lenient mode when the design cannot be completed
    fn degraded(input: &FlexibleDesignInput, warnings: Vec<String>) -> Self {
        FlexibleDesignResult {
            label: input.label.clone(),
            w18: input.w18,
            required_sn: 0.0,
            converged: false,
            iterations: 0,
            zr: 0.0,
            delta_psi: input.serviceability_initial - input.serviceability_terminal,
            traffic_category: FlexibleTrafficCategory::for_esal(input.w18),
            layers: Vec::new(),
            provided_sn: 0.0,
            total_thickness_in: 0.0,
            total_thickness_cm: 0.0,
            adequate: false,
            warnings,
            equations: EquationTracker::new(),
        }
    }

    /// Provided minus required SN
    pub fn sn_margin(&self) -> f64 {
        self.provided_sn - self.required_sn
    }

    /// Thickness of a layer by position, 0 if the section omits it
    pub fn layer_thickness_in(&self, position: LayerPosition) -> f64 {
        self.layers
            .iter()
            .find(|l| l.name == position.display_name())
            .map(|l| l.thickness_in)
            .unwrap_or(0.0)
    }
}

/// Layer thicknesses for checking an existing or proposed section (in).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerThicknesses {
    pub surface_in: f64,
    #[serde(default)]
    pub base_in: f64,
    #[serde(default)]
    pub subbase_in: f64,
}

/// Result of checking a given section against the required SN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCheck {
    pub required_sn: f64,
    pub provided_sn: f64,
    pub layers: Vec<PavementLayerResult>,
    pub adequate: bool,
    pub warnings: Vec<String>,
}

impl SectionCheck {
    /// Provided over required SN; above 1.0 is adequate
    pub fn capacity_ratio(&self) -> f64 {
        if self.required_sn > 0.0 {
            self.provided_sn / self.required_sn
        } else {
            f64::INFINITY
        }
    }
}

/// Validated, normalized design parameters
struct Prepared {
    params: FlexibleParameters,
    w18: f64,
    reliability: f64,
    report: ValidationReport,
}

fn prepare(input: &FlexibleDesignInput, coeffs: &LayerCoefficients) -> Prepared {
    let mut report = ValidationReport::new();
    let w18 = report.absorb(validate_esal(input.w18));
    let reliability = report.absorb(validate_reliability(input.reliability));
    let so = report.absorb(validate_standard_deviation(
        input.standard_deviation,
        FLEXIBLE_SO_TYPICAL,
    ));
    let delta_psi = report.absorb(validate_serviceability(
        input.serviceability_initial,
        input.serviceability_terminal,
    ));
    // The log10(ΔPSI/2.7) term needs a positive ratio whatever the
    // serviceability range checks concluded.
    let loss_ratio =
        (input.serviceability_initial - input.serviceability_terminal) / FLEXIBLE_PSI_RANGE;
    if loss_ratio.is_finite() && loss_ratio <= 0.0 {
        report.push_error(ValidationIssue::new(
            ErrorCode::PhysicalImpossibility,
            "delta_psi",
            format!("Serviceability loss ratio ΔPSI/{} must be positive", FLEXIBLE_PSI_RANGE),
            Some(loss_ratio),
        ));
    }
    let mr_psi = report.absorb(validate_resilient_modulus(input.resilient_modulus_psi));
    report.merge(validate_layer_coefficients(coeffs));

    Prepared {
        params: FlexibleParameters {
            zr: zr_for_reliability(reliability),
            so,
            delta_psi,
            mr_psi,
        },
        w18,
        reliability,
        report,
    }
}

/// Solve the flexible design equation for SN.
///
/// Inputs are taken as given; call [`design_flexible`] for validation.
///
/// # Errors
///
/// `ConvergenceFailure` when |residual| is still ≥ 0.001 after 100
/// iterations, which happens when the root lies outside [1, 15].
pub fn solve_structural_number(w18: f64, params: &FlexibleParameters) -> EngineResult<SnSolution> {
    let target = safe_log10(w18);
    let mut sn = SN_INITIAL;
    let mut residual = f64::NAN;

    for iteration in 1..=MAX_ITERATIONS {
        residual = target - flexible_log_w18(sn, params);
        trace!(iteration, sn, residual, "flexible SN iteration");

        if residual.abs() < SN_TOLERANCE {
            debug!(sn, iterations = iteration, "flexible SN converged");
            return Ok(SnSolution { sn, iterations: iteration, residual });
        }
        sn = (sn + SN_CORRECTION_FACTOR * residual).clamp(SN_BOUNDS.0, SN_BOUNDS.1);
    }

    warn!(w18, last_sn = sn, residual, "flexible SN did not converge");
    Err(EngineeringValidationError::convergence_failure(
        "structural_number",
        MAX_ITERATIONS,
        sn,
        residual,
    ))
}

/// Layer thicknesses that supply `required_sn` for a traffic category
fn allocate_layers(
    required_sn: f64,
    category: FlexibleTrafficCategory,
    coeffs: &LayerCoefficients,
    tracker: &mut EquationTracker,
) -> LayerThicknesses {
    let surface_in = category.min_surface_in();
    let mut remaining = required_sn - coeffs.a1 * surface_in;
    let mut section = LayerThicknesses { surface_in, base_in: 0.0, subbase_in: 0.0 };
    if remaining <= 0.0 {
        return section;
    }

    section.base_in = category.min_base_in();
    remaining -= coeffs.base_effective() * section.base_in;
    if remaining <= 0.0 {
        return section;
    }

    tracker.record(Equation::LayerThicknessRequired, "Subbase thickness");
    section.subbase_in = layer_thickness_required(remaining, coeffs.a3, coeffs.m3);
    remaining -= coeffs.subbase_effective() * section.subbase_in;
    if remaining > 0.0 {
        tracker.record(Equation::LayerThicknessRequired, "Base top-up");
        section.base_in += layer_thickness_required(remaining, coeffs.a2, coeffs.m2);
    }
    section
}

/// Layer results for a section, top down, omitting zero-thickness layers
fn build_layers(
    section: &LayerThicknesses,
    coeffs: &LayerCoefficients,
    materials: &LayerMaterials,
) -> Vec<PavementLayerResult> {
    [
        (LayerPosition::Surface, &materials.surface, section.surface_in, coeffs.a1, 1.0),
        (LayerPosition::Base, &materials.base, section.base_in, coeffs.a2, coeffs.m2),
        (LayerPosition::Subbase, &materials.subbase, section.subbase_in, coeffs.a3, coeffs.m3),
    ]
    .into_iter()
    .filter(|(_, _, thickness, _, _)| *thickness > 0.0)
    .map(|(position, material, thickness, a, m)| {
        PavementLayerResult::structural(position.display_name(), material.as_str(), thickness, a, m)
    })
    .collect()
}

/// Advisories on a finished section
fn section_warnings(section: &LayerThicknesses, required_sn: f64, provided_sn: f64) -> Vec<String> {
    let mut warnings = Vec::new();
    let total_in = section.surface_in + section.base_in + section.subbase_in;
    let total_cm = Centimeters::from(Inches(total_in)).0;
    if total_cm > TOTAL_THICKNESS_EXCESSIVE_CM {
        warnings.push(format!(
            "Total thickness {:.1} cm is excessive (over {} cm); consider stabilized layers or subgrade improvement",
            total_cm, TOTAL_THICKNESS_EXCESSIVE_CM
        ));
    } else if total_cm > TOTAL_THICKNESS_WARNING_CM {
        warnings.push(format!(
            "Total thickness {:.1} cm exceeds {} cm",
            total_cm, TOTAL_THICKNESS_WARNING_CM
        ));
    }

    let surface_cm = Centimeters::from(Inches(section.surface_in)).0;
    if surface_cm < MIN_SURFACE_CM {
        warnings.push(format!(
            "Surface course {:.1} cm is thinner than {} cm",
            surface_cm, MIN_SURFACE_CM
        ));
    }

    if provided_sn + SN_COMPARISON_EPSILON < required_sn {
        warnings.push(format!(
            "Section is inadequate: provided SN {:.2} is below required SN {:.2}",
            provided_sn, required_sn
        ));
    }
    warnings
}

/// Fail in strict mode, or build the degraded result.
///
/// `warnings` must already describe `error`.
fn reject(
    input: &FlexibleDesignInput,
    settings: &DesignSettings,
    error: EngineeringValidationError,
    warnings: Vec<String>,
) -> EngineResult<FlexibleDesignResult> {
    if settings.throw_on_error {
        return Err(error);
    }
    warn!(label = %input.label, code = error.error_code(), "flexible design degraded");
    Ok(FlexibleDesignResult::degraded(input, warnings))
}

/// Design a flexible pavement section.
///
/// # Arguments
///
/// * `input` - Traffic, reliability, serviceability and subgrade
/// * `coeffs` - Structural and drainage coefficients of the three layers
/// * `materials` - Labels attached to each layer in the result
/// * `settings` - `throw_on_error` selects strict or lenient mode
///
/// # Returns
///
/// * `Ok(FlexibleDesignResult)` - Always in lenient mode; a failed design
///   has `required_sn = 0`, no layers and `adequate = false`
/// * `Err(EngineeringValidationError)` - Strict mode only, the first error
pub fn design_flexible(
    input: &FlexibleDesignInput,
    coeffs: &LayerCoefficients,
    materials: &LayerMaterials,
    settings: &DesignSettings,
) -> EngineResult<FlexibleDesignResult> {
    debug!(label = %input.label, w18 = input.w18, "flexible design start");
    let Prepared { params, w18, reliability, report } = prepare(input, coeffs);

    if let Some(issue) = report.first_error() {
        let error = EngineeringValidationError::from(issue.clone());
        return reject(input, settings, error, report.messages());
    }

    let mut tracker = EquationTracker::new();
    tracker.record(Equation::ReliabilityDeviate, format!("Zr for R = {}%", reliability));
    tracker.record(Equation::ServiceabilityLoss, "ΔPSI");
    tracker.record(Equation::FlexibleDesign, "Required SN");

    let solution = match solve_structural_number(w18, &params) {
        Ok(solution) => solution,
        Err(error) => {
            let mut warnings = vec![error.issue().to_string()];
            warnings.extend(report.messages());
            return reject(input, settings, error, warnings);
        }
    };

    let mut warnings = report.messages();
    warnings.extend(
        validate_structural_number(solution.sn)
            .warnings
            .iter()
            .map(ToString::to_string),
    );

    let category = FlexibleTrafficCategory::for_esal(w18);
    let section = allocate_layers(solution.sn, category, coeffs, &mut tracker);
    tracker.record(Equation::LayeredStructuralNumber, "Provided SN");
    let provided_sn =
        layered_structural_number(section.surface_in, section.base_in, section.subbase_in, coeffs);
    warnings.extend(section_warnings(&section, solution.sn, provided_sn));

    let total_thickness_in = section.surface_in + section.base_in + section.subbase_in;
    let adequate = provided_sn + SN_COMPARISON_EPSILON >= solution.sn;
    debug!(
        required_sn = solution.sn,
        provided_sn,
        total_thickness_in,
        adequate,
        "flexible design complete"
    );

    Ok(FlexibleDesignResult {
        label: input.label.clone(),
        w18,
        required_sn: solution.sn,
        converged: true,
        iterations: solution.iterations,
        zr: params.zr,
        delta_psi: params.delta_psi,
        traffic_category: category,
        layers: build_layers(&section, coeffs, materials),
        provided_sn,
        total_thickness_in,
        total_thickness_cm: Centimeters::from(Inches(total_thickness_in)).0,
        adequate,
        warnings,
        equations: tracker,
    })
}

/// Check a given section against the required SN.
///
/// Always strict: the first validation or convergence error is returned.
///
/// ```rust
/// use pave_core::calculations::flexible::{check_section, FlexibleDesignInput, LayerThicknesses};
/// use pave_core::materials::LayerCoefficients;
///
/// let input: FlexibleDesignInput = serde_json::from_str(
///     r#"{"w18": 1000000, "reliability": 90, "resilient_modulus_psi": 7500}"#,
/// ).unwrap();
/// let section = LayerThicknesses { surface_in: 4.0, base_in: 8.0, subbase_in: 8.0 };
///
/// let check = check_section(&input, &LayerCoefficients::default(), &section).unwrap();
/// assert!(check.adequate);
/// ```
pub fn check_section(
    input: &FlexibleDesignInput,
    coeffs: &LayerCoefficients,
    thicknesses: &LayerThicknesses,
) -> EngineResult<SectionCheck> {
    let Prepared { params, w18, report, .. } = prepare(input, coeffs);
    if let Some(issue) = report.first_error() {
        return Err(issue.clone().into());
    }
    for (field, value) in [
        ("surface_in", thicknesses.surface_in),
        ("base_in", thicknesses.base_in),
        ("subbase_in", thicknesses.subbase_in),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineeringValidationError::invalid_input(
                field,
                value,
                "Layer thickness must be zero or positive",
            ));
        }
    }

    let solution = solve_structural_number(w18, &params)?;
    let provided_sn = layered_structural_number(
        thicknesses.surface_in,
        thicknesses.base_in,
        thicknesses.subbase_in,
        coeffs,
    );

    let mut warnings = report.messages();
    warnings.extend(section_warnings(thicknesses, solution.sn, provided_sn));

    Ok(SectionCheck {
        required_sn: solution.sn,
        provided_sn,
        layers: build_layers(thicknesses, coeffs, &LayerMaterials::default()),
        adequate: provided_sn + SN_COMPARISON_EPSILON >= solution.sn,
        warnings,
    })
}
