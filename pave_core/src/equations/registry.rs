//! # Equation Registry
//!
//! Central registry of the pavement design equations used by the solvers.
//! Each equation has metadata including its AASHTO citation, formula, and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for the generated EQUATIONS.md and report appendices
//! - Usage tracking so each design result lists the equations it applied
//!
//! ## Usage
//!
//! ```rust
//! use pave_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::FlexibleDesign, "Required SN");
//!
//! let meta = Equation::FlexibleDesign.metadata();
//! assert!(meta.formula_plain.contains("9.36"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the design guide or standard an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// AASHTO Guide for Design of Pavement Structures, 1993
    Aashto93 {
        part: &'static str,
        section: &'static str,
    },
    /// American Concrete Pavement Association technical bulletin
    Acpa { document: &'static str },
    /// Statistics or geometry with no design-guide source
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Aashto93 { part, section } => {
                format!("AASHTO 1993 Guide, Part {}, {}", part, section)
            }
            CodeReference::Acpa { document } => format!("ACPA {}", document),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Aashto93 { .. } => "AASHTO-93",
            CodeReference::Acpa { .. } => "ACPA",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Zr and serviceability inputs shared by both solvers
    Reliability,
    /// The flexible structural number equation
    FlexibleDesign,
    /// Turning a structural number into layer thicknesses
    LayerAllocation,
    /// The rigid slab thickness equation
    RigidDesign,
    /// Joint spacing and load transfer steel
    Joints,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Reliability => "Reliability",
            EquationCategory::FlexibleDesign => "Flexible Design",
            EquationCategory::LayerAllocation => "Layer Allocation",
            EquationCategory::RigidDesign => "Rigid Design",
            EquationCategory::Joints => "Joints",
        }
    }

    /// Sort order for documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Reliability => 1,
            EquationCategory::FlexibleDesign => 2,
            EquationCategory::LayerAllocation => 3,
            EquationCategory::RigidDesign => 4,
            EquationCategory::Joints => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "SN", "W18", "Zr")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "in", "psi", "-")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a pavement design equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Flexible Pavement Design Equation")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation (for linking)
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All pavement design equations used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// Zr from reliability by table interpolation
    ReliabilityDeviate,
    /// ΔPSI = pi − pt
    ServiceabilityLoss,
    /// log10(W18) as a function of SN
    FlexibleDesign,
    /// SN = a1·D1 + a2·D2·m2 + a3·D3·m3
    LayeredStructuralNumber,
    /// D = ⌈ΔSN/(a·m)⌉
    LayerThicknessRequired,
    /// log10(W18) as a function of D
    RigidDesign,
    /// D^0.75 − 18.42/(Ec/k)^0.25 > 0
    RigidStiffnessTerm,
    /// L = 21·D
    JointSpacing,
    /// Dowel diameter ≈ D/8
    DowelSizing,
}

impl Equation {
    /// Get full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::ReliabilityDeviate => EquationMetadata {
                name: "Standard Normal Deviate",
                description: "Standard normal deviate for the design reliability, linearly interpolated between tabulated reliability levels",
                formula_plain: "Zr = Zr_lo + (R - R_lo)(Zr_hi - Zr_lo)/(R_hi - R_lo)",
                reference: CodeReference::Aashto93 { part: "I", section: "Table 4.1" },
                variables: vec![
                    Variable::new("R", "Design reliability", "%"),
                    Variable::new("Zr", "Standard normal deviate", "-"),
                ],
                assumptions: vec![
                    "R below 50 % maps to Zr = 0",
                    "R at or above 99.9 % maps to Zr = -3.090",
                ],
                category: EquationCategory::Reliability,
                source_module: "reliability.rs",
                source_function: "zr_for_reliability",
            },

            Equation::ServiceabilityLoss => EquationMetadata {
                name: "Design Serviceability Loss",
                description: "Loss of present serviceability index over the design period",
                formula_plain: "ΔPSI = pi - pt",
                reference: CodeReference::Aashto93 { part: "II", section: "2.2.1" },
                variables: vec![
                    Variable::new("pi", "Initial serviceability", "-"),
                    Variable::new("pt", "Terminal serviceability", "-"),
                ],
                assumptions: vec!["pi must exceed pt"],
                category: EquationCategory::Reliability,
                source_module: "validation.rs",
                source_function: "validate_serviceability",
            },

            Equation::FlexibleDesign => EquationMetadata {
                name: "Flexible Pavement Design Equation",
                description: "Traffic a flexible section with structural number SN carries to terminal serviceability; solved for SN by fixed-point iteration",
                formula_plain: "log10(W18) = Zr*So + 9.36*log10(SN+1) - 0.20 + log10(ΔPSI/2.7)/(0.40 + 1094/(SN+1)^5.19) + 2.32*log10(Mr) - 8.07",
                reference: CodeReference::Aashto93 { part: "II", section: "Figure 3.1" },
                variables: vec![
                    Variable::new("W18", "Design 18-kip ESAL", "ESAL"),
                    Variable::new("Zr", "Standard normal deviate", "-"),
                    Variable::new("So", "Overall standard deviation", "-"),
                    Variable::new("SN", "Structural number", "in"),
                    Variable::new("ΔPSI", "Serviceability loss", "-"),
                    Variable::new("Mr", "Subgrade resilient modulus", "psi"),
                ],
                assumptions: vec![
                    "Start at SN = 3.0, step 0.5 × residual, SN clamped to [1, 15]",
                    "Converged when |residual| < 0.001, at most 100 iterations",
                ],
                category: EquationCategory::FlexibleDesign,
                source_module: "equations/flexible.rs",
                source_function: "flexible_log_w18",
            },

            Equation::LayeredStructuralNumber => EquationMetadata {
                name: "Layered Structural Number",
                description: "Structural number supplied by a surface, base and subbase section",
                formula_plain: "SN = a1*D1 + a2*D2*m2 + a3*D3*m3",
                reference: CodeReference::Aashto93 { part: "II", section: "3.5" },
                variables: vec![
                    Variable::new("ai", "Structural layer coefficient", "1/in"),
                    Variable::new("Di", "Layer thickness", "in"),
                    Variable::new("mi", "Drainage coefficient", "-"),
                ],
                assumptions: vec!["Surface course is not credited with drainage"],
                category: EquationCategory::LayerAllocation,
                source_module: "equations/flexible.rs",
                source_function: "layered_structural_number",
            },

            Equation::LayerThicknessRequired => EquationMetadata {
                name: "Layer Thickness for a Structural Deficit",
                description: "Whole-inch thickness of a layer that covers the remaining structural number",
                formula_plain: "D = ceil(ΔSN / (a*m))",
                reference: CodeReference::Aashto93 { part: "II", section: "3.5" },
                variables: vec![
                    Variable::new("ΔSN", "Structural number still to be supplied", "in"),
                    Variable::new("a", "Structural layer coefficient", "1/in"),
                    Variable::new("m", "Drainage coefficient", "-"),
                ],
                assumptions: vec![
                    "Traffic-category minimum surface and base placed first",
                    "Subbase capped at the practical maximum, base topped up for the rest",
                ],
                category: EquationCategory::LayerAllocation,
                source_module: "equations/flexible.rs",
                source_function: "layer_thickness_required",
            },

            Equation::RigidDesign => EquationMetadata {
                name: "Rigid Pavement Design Equation",
                description: "Traffic a jointed concrete slab of thickness D carries to terminal serviceability; solved for D by fixed-point iteration",
                formula_plain: "log10(W18) = Zr*So + 7.35*log10(D+1) - 0.06 + log10(ΔPSI/3.0)/(1 + 1.624e7/(D+1)^8.46) + (4.22 - 0.32*pt)*log10[Sc*Cd*(D^0.75 - 1.132)/(215.63*J*(D^0.75 - 18.42/(Ec/k)^0.25))]",
                reference: CodeReference::Aashto93 { part: "II", section: "Figure 3.7" },
                variables: vec![
                    Variable::new("D", "Slab thickness", "in"),
                    Variable::new("pt", "Terminal serviceability", "-"),
                    Variable::new("Sc", "Modulus of rupture", "psi"),
                    Variable::new("Cd", "Drainage coefficient", "-"),
                    Variable::new("J", "Load transfer coefficient", "-"),
                    Variable::new("Ec", "Concrete elastic modulus", "psi"),
                    Variable::new("k", "Modulus of subgrade reaction", "pci"),
                ],
                assumptions: vec![
                    "Start at D = 8.0 in, step 1.0 × residual, D clamped to [5, 18]",
                    "Converged when |residual| < 0.01, at most 100 iterations",
                ],
                category: EquationCategory::RigidDesign,
                source_module: "equations/rigid.rs",
                source_function: "rigid_log_w18",
            },

            Equation::RigidStiffnessTerm => EquationMetadata {
                name: "Rigid Stiffness Term",
                description: "Denominator term of the rigid equation; the equation is undefined unless it is positive",
                formula_plain: "D^0.75 - 18.42/(Ec/k)^0.25 > 0",
                reference: CodeReference::Aashto93 { part: "II", section: "Figure 3.7" },
                variables: vec![
                    Variable::new("Ec", "Concrete elastic modulus", "psi"),
                    Variable::new("k", "Modulus of subgrade reaction", "pci"),
                ],
                assumptions: vec!["D is stepped up by 0.5 in until the term is positive"],
                category: EquationCategory::RigidDesign,
                source_module: "equations/rigid.rs",
                source_function: "rigid_k_term",
            },

            Equation::JointSpacing => EquationMetadata {
                name: "Transverse Joint Spacing",
                description: "Maximum transverse joint spacing for plain concrete slabs",
                formula_plain: "L = 21*D (ft), rounded to 0.5 m",
                reference: CodeReference::Acpa { document: "TB010P" },
                variables: vec![
                    Variable::new("L", "Joint spacing", "m"),
                    Variable::new("D", "Slab thickness", "in"),
                ],
                assumptions: vec!["Jointed plain concrete pavement"],
                category: EquationCategory::Joints,
                source_module: "equations/rigid.rs",
                source_function: "joint_spacing_m",
            },

            Equation::DowelSizing => EquationMetadata {
                name: "Dowel Bar Sizing",
                description: "Smooth dowel diameter for transverse joints, tabulated by whole-inch slab thickness",
                formula_plain: "d_dowel ≈ D/8, 18 in long at 12 in centers",
                reference: CodeReference::Acpa { document: "TB010P" },
                variables: vec![
                    Variable::new("d_dowel", "Dowel diameter", "in"),
                    Variable::new("D", "Slab thickness", "in"),
                ],
                assumptions: vec!["Thickness rounded to the inch and clamped to 6-12 in"],
                category: EquationCategory::Joints,
                source_module: "materials/dowels.rs",
                source_function: "dowel_for_thickness",
            },
        }
    }

    /// Get all equations in a specific category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Reliability, FlexibleDesign, LayerAllocation, RigidDesign, Joints];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::ReliabilityDeviate,
    Equation::ServiceabilityLoss,
    Equation::FlexibleDesign,
    Equation::LayeredStructuralNumber,
    Equation::LayerThicknessRequired,
    Equation::RigidDesign,
    Equation::RigidStiffnessTerm,
    Equation::JointSpacing,
    Equation::DowelSizing,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "Subbase thickness")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a design.
///
/// Each solver fills one of these and returns it with its result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, categories in sort order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Markdown "List of Equations" for the equations this design applied.
    ///
    /// ```rust
    /// use pave_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record(Equation::RigidDesign, "Slab thickness");
    /// let md = tracker.generate_appendix_markdown();
    /// assert!(md.contains("Rigid Pavement Design Equation"));
    /// assert!(md.contains("Slab thickness"));
    /// ```
    pub fn generate_appendix_markdown(&self) -> String {
        let mut output = String::from("## List of Equations\n\n");
        let mut number = 1;

        for (category, equations) in self.by_category() {
            output.push_str(&format!("### {}\n\n", category.display_name()));
            for equation in equations {
                let meta = equation.metadata();
                let contexts: Vec<&str> = self
                    .usages
                    .iter()
                    .filter(|u| u.equation == equation)
                    .map(|u| u.context.as_str())
                    .collect();

                output.push_str(&format!("{}. **{}**: `{}`\n", number, meta.name, meta.formula_plain));
                output.push_str(&format!("   - Reference: {}\n", meta.reference.citation()));
                output.push_str(&format!("   - Used for: {}\n", contexts.join("; ")));
                number += 1;
            }
            output.push('\n');
        }

        output
    }
}

/// Equations a flexible design applies, in calculation order
pub fn flexible_design_equations() -> Vec<Equation> {
    vec![
        Equation::ReliabilityDeviate,
        Equation::ServiceabilityLoss,
        Equation::FlexibleDesign,
        Equation::LayerThicknessRequired,
        Equation::LayeredStructuralNumber,
    ]
}

/// Equations a rigid design applies, in calculation order
pub fn rigid_design_equations() -> Vec<Equation> {
    vec![
        Equation::ReliabilityDeviate,
        Equation::ServiceabilityLoss,
        Equation::RigidStiffnessTerm,
        Equation::RigidDesign,
        Equation::JointSpacing,
        Equation::DowelSizing,
    ]
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// Lists every equation in the registry by category, with formulas,
/// references, and source code links.
///
/// ```rust
/// use pave_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Pavement Design Equations Reference"));
/// assert!(markdown.contains("Layer Allocation"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Pavement Design Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run -p pave_core --bin gen-equations`

This document lists every formula the AASHTO-93 design engine evaluates.
Each equation includes its formula, guide reference, source location, and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Thickness, SN | in |
| Moduli, Sc | psi |
| Subgrade reaction k | pci |
| Joint spacing | m |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(r#"## How to Audit

1. Find the equation you want to verify in the sections above
2. Check the **Reference** against the 1993 AASHTO Guide
3. Follow the **Source** link to the implementation
4. Run `cargo test` to check the solvers against worked examples
"#);

    output
}

// ============================================================================
// Tests
// ============================================================================
