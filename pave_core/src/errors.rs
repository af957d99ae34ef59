//! # Error Types
//!
//! Structured error types for pave_core. Errors fall into four classes:
//!
//! | Code                     | Meaning                                              |
//! |--------------------------|------------------------------------------------------|
//! | `VALIDATION_ERROR`       | A single scalar is malformed or outside its domain   |
//! | `CONSTRAINT_VIOLATION`   | Two valid scalars violate a relationship (pi ≤ pt)   |
//! | `PHYSICAL_IMPOSSIBILITY` | A derived intermediate breaks a math precondition    |
//! | `CONVERGENCE_FAILURE`    | An iterative solve ran out of iterations             |
//!
//! Low-level validators return [`ValidationIssue`] values and never fail.
//! Direct equation solves return `Err(EngineeringValidationError)`.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::errors::{EngineeringValidationError, EngineResult};
//!
//! fn check_modulus(mr_psi: f64) -> EngineResult<()> {
//!     if mr_psi <= 0.0 {
//!         return Err(EngineeringValidationError::invalid_input(
//!             "resilient_modulus_psi",
//!             mr_psi,
//!             "Resilient modulus must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_modulus(-1.0).unwrap_err();
//! assert_eq!(err.error_code(), "VALIDATION_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pave_core operations
pub type EngineResult<T> = Result<T, EngineeringValidationError>;

/// Stable machine-readable code attached to every issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-domain scalar
    ValidationError,
    /// Relationship between two valid scalars is broken
    ConstraintViolation,
    /// A derived value breaks a math precondition
    PhysicalImpossibility,
    /// Iteration budget exhausted
    ConvergenceFailure,
    /// Value is legal but outside the engineering-typical range (warning only)
    OutOfTypicalRange,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::PhysicalImpossibility => "PHYSICAL_IMPOSSIBILITY",
            ErrorCode::ConvergenceFailure => "CONVERGENCE_FAILURE",
            ErrorCode::OutOfTypicalRange => "OUT_OF_TYPICAL_RANGE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured validation finding: `{code, field, message, value}`.
///
/// Used both for hard errors and for advisory warnings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "code": "CONSTRAINT_VIOLATION",
///   "field": "serviceability_initial",
///   "message": "Initial serviceability (2.0) must exceed terminal serviceability (2.5)",
///   "value": 2.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: ErrorCode,
    pub field: String,
    pub message: String,
    /// Offending value, when a single scalar is to blame
    pub value: Option<f64>,
}

impl ValidationIssue {
    pub fn new(code: ErrorCode, field: impl Into<String>, message: impl Into<String>, value: Option<f64>) -> Self {
        ValidationIssue {
            code,
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    /// Shorthand for an advisory out-of-typical-range warning
    pub fn warning(field: impl Into<String>, message: impl Into<String>, value: f64) -> Self {
        Self::new(ErrorCode::OutOfTypicalRange, field, message, Some(value))
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// Typed error raised by equation solving and strict-mode design calls.
///
/// Each variant carries enough context to rebuild the structured
/// [`ValidationIssue`] via [`EngineeringValidationError::issue`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EngineeringValidationError {
    /// A scalar input is malformed or outside its domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: f64,
        reason: String,
    },

    /// Two individually valid inputs violate a required relationship
    #[error("Constraint violation on '{field}': {reason}")]
    ConstraintViolation {
        field: String,
        value: f64,
        reason: String,
    },

    /// A derived intermediate value makes the equation undefined
    #[error("Physical impossibility in '{field}': {reason}")]
    PhysicalImpossibility {
        field: String,
        value: f64,
        reason: String,
    },

    /// Fixed-point iteration did not reach tolerance
    #[error("{calculation} did not converge after {iterations} iterations (last estimate {last_estimate:.3}, residual {residual:.4})")]
    ConvergenceFailure {
        calculation: String,
        iterations: u32,
        last_estimate: f64,
        residual: f64,
    },
}

impl EngineeringValidationError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        EngineeringValidationError::InvalidInput {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a ConstraintViolation error
    pub fn constraint_violation(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        EngineeringValidationError::ConstraintViolation {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a PhysicalImpossibility error
    pub fn physical_impossibility(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        EngineeringValidationError::PhysicalImpossibility {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a ConvergenceFailure error
    pub fn convergence_failure(
        calculation: impl Into<String>,
        iterations: u32,
        last_estimate: f64,
        residual: f64,
    ) -> Self {
        EngineeringValidationError::ConvergenceFailure {
            calculation: calculation.into(),
            iterations,
            last_estimate,
            residual,
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineeringValidationError::InvalidInput { .. } => ErrorCode::ValidationError,
            EngineeringValidationError::ConstraintViolation { .. } => ErrorCode::ConstraintViolation,
            EngineeringValidationError::PhysicalImpossibility { .. } => ErrorCode::PhysicalImpossibility,
            EngineeringValidationError::ConvergenceFailure { .. } => ErrorCode::ConvergenceFailure,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        self.code().as_str()
    }

    /// Field (or calculation) the error is attributed to
    pub fn field(&self) -> &str {
        match self {
            EngineeringValidationError::InvalidInput { field, .. }
            | EngineeringValidationError::ConstraintViolation { field, .. }
            | EngineeringValidationError::PhysicalImpossibility { field, .. } => field,
            EngineeringValidationError::ConvergenceFailure { calculation, .. } => calculation,
        }
    }

    /// Structured `{code, field, message, value}` view of this error
    pub fn issue(&self) -> ValidationIssue {
        let value = match self {
            EngineeringValidationError::InvalidInput { value, .. }
            | EngineeringValidationError::ConstraintViolation { value, .. }
            | EngineeringValidationError::PhysicalImpossibility { value, .. } => Some(*value),
            EngineeringValidationError::ConvergenceFailure { last_estimate, .. } => Some(*last_estimate),
        };
        ValidationIssue::new(self.code(), self.field(), self.to_string(), value)
    }
}

impl From<ValidationIssue> for EngineeringValidationError {
    fn from(issue: ValidationIssue) -> Self {
        let value = issue.value.unwrap_or(f64::NAN);
        match issue.code {
            ErrorCode::ConstraintViolation => {
                EngineeringValidationError::constraint_violation(issue.field, value, issue.message)
            }
            ErrorCode::PhysicalImpossibility => {
                EngineeringValidationError::physical_impossibility(issue.field, value, issue.message)
            }
            ErrorCode::ConvergenceFailure => {
                EngineeringValidationError::convergence_failure(issue.field, 0, value, f64::NAN)
            }
            ErrorCode::ValidationError | ErrorCode::OutOfTypicalRange => {
                EngineeringValidationError::invalid_input(issue.field, value, issue.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EngineeringValidationError::invalid_input("w18", -5.0, "ESAL must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: EngineeringValidationError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EngineeringValidationError::constraint_violation("serviceability_initial", 2.0, "pi <= pt").error_code(),
            "CONSTRAINT_VIOLATION"
        );
        assert_eq!(
            EngineeringValidationError::convergence_failure("Flexible SN", 100, 15.0, 0.2).error_code(),
            "CONVERGENCE_FAILURE"
        );
    }

    #[test]
    fn test_issue_view_keeps_field_and_value() {
        let error = EngineeringValidationError::physical_impossibility("delta_psi", -0.5, "ratio must be positive");
        let issue = error.issue();
        assert_eq!(issue.code, ErrorCode::PhysicalImpossibility);
        assert_eq!(issue.field, "delta_psi");
        assert_eq!(issue.value, Some(-0.5));
    }

    #[test]
    fn test_issue_converts_back_to_typed_error() {
        let issue = ValidationIssue::new(
            ErrorCode::ConstraintViolation,
            "serviceability_initial",
            "pi must exceed pt",
            Some(2.0),
        );
        let error: EngineeringValidationError = issue.into();
        assert_eq!(error.code(), ErrorCode::ConstraintViolation);
        assert_eq!(error.field(), "serviceability_initial");
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::PhysicalImpossibility).unwrap();
        assert_eq!(json, "\"PHYSICAL_IMPOSSIBILITY\"");
    }
}
