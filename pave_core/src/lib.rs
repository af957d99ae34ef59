//! # pave_core - AASHTO-93 Pavement Structural Design Engine
//!
//! `pave_core` solves the AASHTO-93 design equations for flexible (asphalt)
//! and rigid (jointed plain concrete) pavements. Inputs are validated with a
//! two-tier error/warning taxonomy and the required structural capacity is
//! allocated across discrete layers. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured `{code, field, message, value}` issues
//! - **Never NaN**: Guarded arithmetic keeps the solvers finite
//!
//! ## Quick Start
//!
//! ```rust
//! use pave_core::calculations::{design_flexible, FlexibleDesignInput};
//! use pave_core::materials::{LayerCoefficients, LayerMaterials};
//! use pave_core::settings::DesignSettings;
//!
//! let input: FlexibleDesignInput = serde_json::from_str(
//!     r#"{"w18": 1000000, "reliability": 90, "resilient_modulus_psi": 7500}"#,
//! )
//! .unwrap();
//!
//! let result = design_flexible(
//!     &input,
//!     &LayerCoefficients::default(),
//!     &LayerMaterials::default(),
//!     &DesignSettings::default(),
//! )
//! .unwrap();
//! println!("{}", pave_core::report::render_flexible(&result, None));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Flexible and rigid design, batch cases
//! - [`equations`] - The design equations as pure functions, plus the registry
//! - [`validation`] - Input validators with engineering-typical ranges
//! - [`reliability`] - Reliability to standard normal deviate Zr
//! - [`materials`] - Layer coefficients, drainage, concrete grades, dowels
//! - [`traffic`] - ESAL traffic categories and minimum thicknesses
//! - [`report`] - Plain text reports
//! - [`settings`] - Strict/lenient mode and job metadata
//! - [`units`] - Type-safe unit wrappers
//! - [`safe_math`] - NaN-free arithmetic
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod reliability;
pub mod report;
pub mod safe_math;
pub mod settings;
pub mod traffic;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    design_flexible, design_rigid, DesignBatch, DesignCase, DesignOutcome, FlexibleDesignInput,
    FlexibleDesignResult, RigidDesignInput, RigidDesignResult,
};
pub use errors::{EngineResult, EngineeringValidationError, ErrorCode, ValidationIssue};
pub use settings::{DesignSettings, ProjectInfo};
