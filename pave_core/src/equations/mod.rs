//! # Pavement Design Equations
//!
//! The AASHTO-93 design equations as pure functions. Solvers in
//! [`crate::calculations`] iterate these; nothing here loops or validates.
//! Keeping the formulas in one place makes them easy to check against the
//! guide.
//!
//! ## Modules
//!
//! - [`flexible`] - Flexible design equation, layered structural number
//! - [`rigid`] - Rigid design equation, joint spacing
//! - [`registry`] - Equation metadata, usage tracking, EQUATIONS.md generation
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures, 1993
//! - ACPA TB010P, Design and Construction of Joints for Concrete Highways

pub mod flexible;
pub mod registry;
pub mod rigid;

pub use flexible::{
    flexible_log_w18, layer_thickness_required, layered_structural_number, FlexibleParameters,
    FLEXIBLE_PSI_RANGE,
};
pub use registry::{
    generate_equations_markdown, Equation, EquationCategory, EquationTracker, EquationUsage,
};
pub use rigid::{
    joint_spacing_m, rigid_k_term, rigid_log_w18, RigidParameters, JOINT_SPACING_RATIO,
    RIGID_PSI_RANGE,
};
