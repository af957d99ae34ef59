//! # Input Validation
//!
//! Generic and domain-specific validators for pavement design inputs.
//!
//! Validators never fail. They return structured [`ValidationIssue`]s split
//! into two tiers:
//!
//! - **errors**: the value cannot be designed with (non-finite, non-positive,
//!   outside the hard domain, broken relationship)
//! - **warnings**: the value is legal but outside the range engineers
//!   normally see, so the result deserves a second look
//!
//! Solvers decide what to do with the errors (raise them in strict mode,
//! downgrade them to warnings otherwise).
//!
//! ## Example
//!
//! ```rust
//! use pave_core::validation::{validate_number, validate_reliability, NumberBounds};
//!
//! assert!(validate_number(5.0, "k", NumberBounds::positive()).is_none());
//! assert!(validate_number(-1.0, "k", NumberBounds::positive()).is_some());
//!
//! // Fractional reliability is normalized to a percentage
//! let r = validate_reliability(0.95);
//! assert_eq!(r.value, 95.0);
//! assert!(r.is_valid());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorCode, ValidationIssue};
use crate::materials::LayerCoefficients;

// ============================================================================
// Engineering ranges
// ============================================================================

/// Typical design traffic range (ESAL). Outside this range the design is
/// still computed but flagged.
pub const ESAL_TYPICAL_MIN: f64 = 1.0e4;
pub const ESAL_TYPICAL_MAX: f64 = 1.0e9;

/// Reliability range covered by the Zr table (percent)
pub const RELIABILITY_TYPICAL_MIN: f64 = 50.0;
pub const RELIABILITY_TYPICAL_MAX: f64 = 99.9;

/// Hard bounds on the overall standard deviation So
pub const STANDARD_DEVIATION_MIN: f64 = 0.2;
pub const STANDARD_DEVIATION_MAX: f64 = 0.7;

/// Typical So for flexible pavements (AASHTO-93 Part I, 4.3)
pub const FLEXIBLE_SO_TYPICAL: (f64, f64) = (0.35, 0.50);
/// Typical So for rigid pavements
pub const RIGID_SO_TYPICAL: (f64, f64) = (0.30, 0.40);

/// Typical subgrade resilient modulus range (psi)
pub const MR_TYPICAL_MIN_PSI: f64 = 1_000.0;
pub const MR_TYPICAL_MAX_PSI: f64 = 50_000.0;

/// Practical structural number range
pub const SN_PRACTICAL_MIN: f64 = 0.5;
pub const SN_PRACTICAL_MAX: f64 = 12.0;

/// Serviceability index scale upper bound
pub const PSI_SCALE_MAX: f64 = 5.0;

/// Typical modulus of subgrade reaction (pci)
pub const K_TYPICAL_MIN_PCI: f64 = 50.0;
pub const K_TYPICAL_MAX_PCI: f64 = 1_000.0;

/// Typical load transfer coefficient J
pub const J_TYPICAL_MIN: f64 = 2.2;
pub const J_TYPICAL_MAX: f64 = 4.4;

/// Typical rigid drainage coefficient Cd
pub const CD_TYPICAL_MIN: f64 = 0.70;
pub const CD_TYPICAL_MAX: f64 = 1.25;

/// Typical flexible drainage coefficients m2, m3
pub const M_TYPICAL_MIN: f64 = 0.40;
pub const M_TYPICAL_MAX: f64 = 1.40;

// ============================================================================
// Generic number validation
// ============================================================================

/// Constraints for [`validate_number`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberBounds {
    /// Value must be strictly greater than zero
    #[serde(default)]
    pub positive: bool,
    /// Inclusive lower bound
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumberBounds {
    /// No constraint other than finiteness
    pub const fn any() -> Self {
        NumberBounds { positive: false, min: None, max: None }
    }

    /// Strictly positive
    pub const fn positive() -> Self {
        NumberBounds { positive: true, min: None, max: None }
    }

    /// Inclusive range
    pub const fn range(min: f64, max: f64) -> Self {
        NumberBounds { positive: false, min: Some(min), max: Some(max) }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Validate a scalar against `bounds`.
///
/// Returns `None` when the value is acceptable, otherwise a
/// `VALIDATION_ERROR` issue naming the first broken constraint.
pub fn validate_number(value: f64, field: &str, bounds: NumberBounds) -> Option<ValidationIssue> {
    if !value.is_finite() {
        return Some(ValidationIssue::new(
            ErrorCode::ValidationError,
            field,
            format!("{} must be a finite number", field),
            None,
        ));
    }
    if bounds.positive && value <= 0.0 {
        return Some(ValidationIssue::new(
            ErrorCode::ValidationError,
            field,
            format!("{} must be positive (got {})", field, value),
            Some(value),
        ));
    }
    if let Some(min) = bounds.min {
        if value < min {
            return Some(ValidationIssue::new(
                ErrorCode::ValidationError,
                field,
                format!("{} must be at least {} (got {})", field, min, value),
                Some(value),
            ));
        }
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Some(ValidationIssue::new(
                ErrorCode::ValidationError,
                field,
                format!("{} must not exceed {} (got {})", field, max, value),
                Some(value),
            ));
        }
    }
    None
}

// ============================================================================
// Validation results
// ============================================================================

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    /// Value after normalization (e.g. reliability 0.95 → 95.0)
    pub value: f64,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl FieldValidation {
    fn new(value: f64) -> Self {
        FieldValidation { value, errors: Vec::new(), warnings: Vec::new() }
    }

    /// True when no hard errors were found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(mut self, issue: Option<ValidationIssue>) -> Self {
        self.errors.extend(issue);
        self
    }

    fn warn_outside(mut self, field: &str, typical: (f64, f64), label: &str) -> Self {
        if self.errors.is_empty() && (self.value < typical.0 || self.value > typical.1) {
            self.warnings.push(ValidationIssue::warning(
                field,
                format!(
                    "{} {} is outside the typical range [{}, {}]",
                    label, self.value, typical.0, typical.1
                ),
                self.value,
            ));
        }
        self
    }
}

/// Accumulated errors and warnings across all fields of a design input.
///
/// Order of insertion is preserved so reports list findings in the order
/// the inputs were checked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a field result into the report, returning the normalized value
    pub fn absorb(&mut self, field: FieldValidation) -> f64 {
        self.errors.extend(field.errors);
        self.warnings.extend(field.warnings);
        field.value
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.errors.first()
    }

    /// Append another report's findings after this one's
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Every finding as a display line, errors first
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(ToString::to_string)
            .collect()
    }
}

// ============================================================================
// Domain validators
// ============================================================================

/// Design traffic W18 (18-kip ESAL).
///
/// Error when non-positive; warning outside [1e4, 1e9].
pub fn validate_esal(w18: f64) -> FieldValidation {
    FieldValidation::new(w18)
        .error(validate_number(w18, "w18", NumberBounds::positive()))
        .warn_outside("w18", (ESAL_TYPICAL_MIN, ESAL_TYPICAL_MAX), "Design ESAL")
}

/// Reliability level, as a percentage (0–100] or a fraction (0–1].
///
/// Values in (0, 1] are treated as fractions and scaled by 100, so `1.0`
/// means 100 %. The normalized percentage is returned in `value`.
pub fn validate_reliability(reliability: f64) -> FieldValidation {
    let normalized = if reliability > 0.0 && reliability <= 1.0 {
        reliability * 100.0
    } else {
        reliability
    };
    FieldValidation::new(normalized)
        .error(validate_number(
            normalized,
            "reliability",
            NumberBounds::positive().with_max(100.0),
        ))
        .warn_outside(
            "reliability",
            (RELIABILITY_TYPICAL_MIN, RELIABILITY_TYPICAL_MAX),
            "Reliability (%)",
        )
}

/// Resilient modulus of the subgrade (psi).
pub fn validate_resilient_modulus(mr_psi: f64) -> FieldValidation {
    FieldValidation::new(mr_psi)
        .error(validate_number(mr_psi, "resilient_modulus_psi", NumberBounds::positive()))
        .warn_outside(
            "resilient_modulus_psi",
            (MR_TYPICAL_MIN_PSI, MR_TYPICAL_MAX_PSI),
            "Subgrade resilient modulus (psi)",
        )
}

/// Structural number; warns outside the practical [0.5, 12.0] range.
pub fn validate_structural_number(sn: f64) -> FieldValidation {
    FieldValidation::new(sn)
        .error(validate_number(sn, "structural_number", NumberBounds::positive()))
        .warn_outside(
            "structural_number",
            (SN_PRACTICAL_MIN, SN_PRACTICAL_MAX),
            "Structural number",
        )
}

/// Overall standard deviation So: error outside [0.2, 0.7], warning outside
/// the pavement type's `typical` band.
pub fn validate_standard_deviation(so: f64, typical: (f64, f64)) -> FieldValidation {
    FieldValidation::new(so)
        .error(validate_number(
            so,
            "standard_deviation",
            NumberBounds::range(STANDARD_DEVIATION_MIN, STANDARD_DEVIATION_MAX),
        ))
        .warn_outside("standard_deviation", typical, "Standard deviation")
}

/// Initial/terminal serviceability pair.
///
/// Each index must lie in (0, 5]; `pi > pt` is a `CONSTRAINT_VIOLATION`.
/// `value` carries ΔPSI = pi − pt.
pub fn validate_serviceability(initial: f64, terminal: f64) -> FieldValidation {
    let mut result = FieldValidation::new(initial - terminal);
    let bounds = NumberBounds::positive().with_max(PSI_SCALE_MAX);
    result = result
        .error(validate_number(initial, "serviceability_initial", bounds))
        .error(validate_number(terminal, "serviceability_terminal", bounds));

    if result.is_valid() && initial <= terminal {
        result.errors.push(ValidationIssue::new(
            ErrorCode::ConstraintViolation,
            "serviceability_initial",
            format!(
                "Initial serviceability ({}) must exceed terminal serviceability ({})",
                initial, terminal
            ),
            Some(initial),
        ));
    }
    result
}

/// Structural and drainage coefficients of a flexible section.
///
/// Negative or non-finite coefficients are errors. The ordering
/// a1 ≥ a2 ≥ a3 and the drainage range are advisory only.
pub fn validate_layer_coefficients(coeffs: &LayerCoefficients) -> ValidationReport {
    let mut report = ValidationReport::new();
    let non_negative = NumberBounds::any().with_min(0.0);
    for (field, value) in [
        ("a1", coeffs.a1),
        ("a2", coeffs.a2),
        ("a3", coeffs.a3),
        ("m2", coeffs.m2),
        ("m3", coeffs.m3),
    ] {
        if let Some(issue) = validate_number(value, field, non_negative) {
            report.push_error(issue);
        }
    }
    if !report.is_valid() {
        return report;
    }

    if coeffs.a1 < coeffs.a2 {
        report.push_warning(ValidationIssue::warning(
            "a1",
            format!(
                "Surface coefficient a1 ({}) is lower than base coefficient a2 ({})",
                coeffs.a1, coeffs.a2
            ),
            coeffs.a1,
        ));
    }
    if coeffs.a2 < coeffs.a3 {
        report.push_warning(ValidationIssue::warning(
            "a2",
            format!(
                "Base coefficient a2 ({}) is lower than subbase coefficient a3 ({})",
                coeffs.a2, coeffs.a3
            ),
            coeffs.a2,
        ));
    }
    for (field, value) in [("m2", coeffs.m2), ("m3", coeffs.m3)] {
        let check = FieldValidation::new(value).warn_outside(
            field,
            (M_TYPICAL_MIN, M_TYPICAL_MAX),
            "Drainage coefficient",
        );
        report.absorb(check);
    }
    report
}

/// Modulus of subgrade reaction k (pci).
pub fn validate_subgrade_reaction(k_pci: f64) -> FieldValidation {
    FieldValidation::new(k_pci)
        .error(validate_number(k_pci, "subgrade_k_pci", NumberBounds::positive()))
        .warn_outside(
            "subgrade_k_pci",
            (K_TYPICAL_MIN_PCI, K_TYPICAL_MAX_PCI),
            "Modulus of subgrade reaction (pci)",
        )
}

/// Load transfer coefficient J.
pub fn validate_load_transfer(j: f64) -> FieldValidation {
    FieldValidation::new(j)
        .error(validate_number(j, "load_transfer_j", NumberBounds::positive()))
        .warn_outside(
            "load_transfer_j",
            (J_TYPICAL_MIN, J_TYPICAL_MAX),
            "Load transfer coefficient J",
        )
}

/// Rigid drainage coefficient Cd.
pub fn validate_drainage_coefficient(cd: f64) -> FieldValidation {
    FieldValidation::new(cd)
        .error(validate_number(cd, "drainage_cd", NumberBounds::positive()))
        .warn_outside(
            "drainage_cd",
            (CD_TYPICAL_MIN, CD_TYPICAL_MAX),
            "Drainage coefficient Cd",
        )
}
