//! # Rigid Pavement Design
//!
//! Solves the AASHTO-93 rigid equation for the required slab thickness D of
//! a jointed plain concrete pavement, then derives the concrete grade,
//! transverse joint spacing, dowel bars and tie bars.
//!
//! ## Procedure
//!
//! 1. Check W18, reliability, So, pi/pt, k, J and Cd. Findings are
//!    advisory: they are reported as warnings and never stop the design
//! 2. Iterate D from 8.0 in: D += 1.0·(log10 W18 − RHS), clamped to [5, 18],
//!    until |residual| < 0.01 (at most 100 iterations). Where the stiffness
//!    term is not positive, D is nudged up 0.5 in without counting an
//!    iteration
//! 3. Round D to 0.1 in and pick the grade, joints and dowels from it
//! 4. Compare against the traffic-category minimum slab thickness
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::rigid::{design_rigid, RigidDesignInput};
//! use pave_core::settings::DesignSettings;
//!
//! let input: RigidDesignInput = serde_json::from_str(
//!     r#"{"w18": 5000000, "reliability": 95, "subgrade_k_pci": 150}"#,
//! )
//! .unwrap();
//!
//! let result = design_rigid(&input, &DesignSettings::default()).unwrap();
//! assert_eq!(result.concrete_grade.code(), "G30");
//! println!("Slab: {:.1} in, joints at {} m", result.thickness_in, result.joint_spacing_m);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{PavementLayerResult, MAX_ITERATIONS};
use crate::equations::{joint_spacing_m, rigid_log_w18, Equation, EquationTracker, RigidParameters};
use crate::errors::{EngineResult, EngineeringValidationError};
use crate::materials::{dowel_for_thickness, ConcreteGrade, ConcreteProperties, DowelSpec, TieBarSpec, TIE_BAR_SPEC};
use crate::reliability::zr_for_reliability;
use crate::safe_math::safe_log10;
use crate::settings::DesignSettings;
use crate::traffic::RigidTrafficCategory;
use crate::units::{round_to_step, Centimeters, Inches};
use crate::validation::{
    validate_drainage_coefficient, validate_esal, validate_load_transfer, validate_number,
    validate_reliability, validate_serviceability, validate_standard_deviation,
    validate_subgrade_reaction, NumberBounds, ValidationReport, RIGID_SO_TYPICAL,
};

/// Starting slab thickness (in)
pub const D_INITIAL_IN: f64 = 8.0;
/// D is clamped to this range after every step (in)
pub const D_BOUNDS_IN: (f64, f64) = (5.0, 18.0);
/// Convergence tolerance on the log10(W18) residual
pub const D_TOLERANCE: f64 = 0.01;
/// Fraction of the residual applied to D per step
pub const D_CORRECTION_FACTOR: f64 = 1.0;
/// Step taken when the stiffness term is not positive (in)
pub const D_NUDGE_IN: f64 = 0.5;
/// Reported slab thickness increment (in)
pub const THICKNESS_ROUNDING_IN: f64 = 0.1;

/// Input parameters for a rigid pavement design.
///
/// Sc and Ec default to the properties of the concrete grade, which in turn
/// defaults to the grade recommended for the design traffic.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Runway apron",
///   "w18": 5000000,
///   "reliability": 95,
///   "standard_deviation": 0.35,
///   "subgrade_k_pci": 150,
///   "load_transfer_j": 3.2,
///   "drainage_cd": 1.0,
///   "concrete_grade": "G30"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidDesignInput {
    #[serde(default)]
    pub label: String,

    /// Design traffic, 18-kip ESAL over the analysis period
    pub w18: f64,

    /// Reliability, as a percentage (95) or a fraction (0.95)
    pub reliability: f64,

    /// Overall standard deviation So (typically 0.30–0.40)
    #[serde(default = "default_standard_deviation")]
    pub standard_deviation: f64,

    #[serde(default = "default_initial_serviceability")]
    pub serviceability_initial: f64,

    #[serde(default = "default_terminal_serviceability")]
    pub serviceability_terminal: f64,

    /// Modulus of subgrade reaction k (pci)
    pub subgrade_k_pci: f64,

    /// Load transfer coefficient J
    #[serde(default = "default_load_transfer")]
    pub load_transfer_j: f64,

    /// Drainage coefficient Cd
    #[serde(default = "default_drainage_cd")]
    pub drainage_cd: f64,

    /// Concrete grade ("G30", "30", ...); recommended from W18 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concrete_grade: Option<String>,

    /// Overrides the grade's modulus of rupture Sc (psi)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulus_of_rupture_psi: Option<f64>,

    /// Overrides the grade's elastic modulus Ec (psi)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus_psi: Option<f64>,
}

fn default_standard_deviation() -> f64 {
    0.35
}

fn default_initial_serviceability() -> f64 {
    4.5
}

fn default_terminal_serviceability() -> f64 {
    2.5
}

fn default_load_transfer() -> f64 {
    3.2
}

fn default_drainage_cd() -> f64 {
    1.0
}

impl RigidDesignInput {
    /// Grade named in the input, or the one recommended for W18
    pub fn resolved_grade(&self) -> ConcreteGrade {
        match &self.concrete_grade {
            Some(grade) => ConcreteGrade::lookup(grade),
            None => ConcreteGrade::recommend_for_esal(self.w18),
        }
    }
}

/// Converged slab thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabSolution {
    /// Unrounded thickness (in)
    pub thickness_in: f64,
    /// Equation evaluations used, nudges excluded
    pub iterations: u32,
    /// log10(W18) − RHS at `thickness_in`
    pub residual: f64,
}

/// Rigid design results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidDesignResult {
    pub label: String,
    /// Design traffic (ESAL)
    pub w18: f64,

    // === Solve ===
    /// Solver output before rounding (in); last estimate if not converged
    pub required_thickness_exact_in: f64,
    pub converged: bool,
    pub iterations: u32,
    pub zr: f64,
    pub delta_psi: f64,

    // === Slab ===
    /// Design thickness rounded to 0.1 in
    pub thickness_in: f64,
    pub thickness_cm: f64,
    pub traffic_category: RigidTrafficCategory,
    pub minimum_thickness_in: f64,
    pub concrete_grade: ConcreteGrade,
    pub concrete: ConcreteProperties,
    pub layers: Vec<PavementLayerResult>,

    // === Joints ===
    pub joint_spacing_m: f64,
    pub dowel: DowelSpec,
    pub tie_bar: TieBarSpec,

    /// Converged on valid input and meets the minimum thickness
    pub adequate: bool,
    pub warnings: Vec<String>,
    pub equations: EquationTracker,
}

impl RigidDesignResult {
    /// Design thickness minus the traffic-category minimum (in)
    pub fn thickness_margin_in(&self) -> f64 {
        self.thickness_in - self.minimum_thickness_in
    }
}

/// Advisory checks on every rigid input
fn check_inputs(input: &RigidDesignInput, sc_psi: f64, ec_psi: f64) -> (RigidParameters, ValidationReport) {
    let mut report = ValidationReport::new();
    let w18 = report.absorb(validate_esal(input.w18));
    let reliability = report.absorb(validate_reliability(input.reliability));
    let so = report.absorb(validate_standard_deviation(input.standard_deviation, RIGID_SO_TYPICAL));
    let delta_psi = report.absorb(validate_serviceability(
        input.serviceability_initial,
        input.serviceability_terminal,
    ));
    let subgrade_k_pci = report.absorb(validate_subgrade_reaction(input.subgrade_k_pci));
    let load_transfer_j = report.absorb(validate_load_transfer(input.load_transfer_j));
    let drainage_cd = report.absorb(validate_drainage_coefficient(input.drainage_cd));

    for (value, field) in [(sc_psi, "modulus_of_rupture_psi"), (ec_psi, "elastic_modulus_psi")] {
        if let Some(issue) = validate_number(value, field, NumberBounds::positive()) {
            report.push_error(issue);
        }
    }
    trace!(w18, errors = report.errors.len(), "rigid inputs checked");

    let params = RigidParameters {
        zr: zr_for_reliability(reliability),
        so,
        delta_psi,
        terminal_serviceability: input.serviceability_terminal,
        modulus_of_rupture_psi: sc_psi,
        drainage_cd,
        load_transfer_j,
        elastic_modulus_psi: ec_psi,
        subgrade_k_pci,
    };
    (params, report)
}

/// Solve the rigid design equation for slab thickness D.
///
/// # Errors
///
/// * `PhysicalImpossibility` - the stiffness term stays non-positive all
///   the way to the 18 in upper bound
/// * `ConvergenceFailure` - |residual| is still ≥ 0.01 after 100
///   iterations, which happens when the root lies outside [5, 18] in
pub fn solve_slab_thickness(w18: f64, params: &RigidParameters) -> EngineResult<SlabSolution> {
    let target = safe_log10(w18);
    let mut d = D_INITIAL_IN;
    let mut residual = f64::NAN;
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        let Some(rhs) = rigid_log_w18(d, params) else {
            d += D_NUDGE_IN;
            if d > D_BOUNDS_IN.1 {
                warn!(ec = params.elastic_modulus_psi, k = params.subgrade_k_pci, "rigid stiffness term never positive");
                return Err(EngineeringValidationError::physical_impossibility(
                    "slab_thickness",
                    d,
                    format!(
                        "D^0.75 − 18.42/(Ec/k)^0.25 is not positive for any thickness up to {} in",
                        D_BOUNDS_IN.1
                    ),
                ));
            }
            continue;
        };

        iterations += 1;
        residual = target - rhs;
        trace!(iteration = iterations, d, residual, "rigid D iteration");

        if residual.abs() < D_TOLERANCE {
            debug!(d, iterations, "rigid D converged");
            return Ok(SlabSolution { thickness_in: d, iterations, residual });
        }
        d = (d + D_CORRECTION_FACTOR * residual).clamp(D_BOUNDS_IN.0, D_BOUNDS_IN.1);
    }

    warn!(w18, last_d = d, residual, "rigid D did not converge");
    Err(EngineeringValidationError::convergence_failure(
        "slab_thickness",
        MAX_ITERATIONS,
        d,
        residual,
    ))
}

/// Design a jointed plain concrete pavement slab.
///
/// # Returns
///
/// * `Ok(RigidDesignResult)` - Input findings never fail the design; they
///   are listed in `warnings` and an invalid input makes it inadequate.
///   In lenient mode a failed solve is reported the same way, with the
///   last thickness estimate kept
/// * `Err(EngineeringValidationError)` - Strict mode only, when the solve
///   fails
pub fn design_rigid(input: &RigidDesignInput, settings: &DesignSettings) -> EngineResult<RigidDesignResult> {
    debug!(label = %input.label, w18 = input.w18, "rigid design start");

    let concrete_grade = input.resolved_grade();
    let concrete = concrete_grade.properties();
    let sc_psi = input.modulus_of_rupture_psi.unwrap_or_else(|| concrete.sc_psi());
    let ec_psi = input.elastic_modulus_psi.unwrap_or_else(|| concrete.ec_psi());
    let (params, report) = check_inputs(input, sc_psi, ec_psi);
    let mut warnings = report.messages();

    let mut tracker = EquationTracker::new();
    tracker.record(Equation::ReliabilityDeviate, format!("Zr = {:.3}", params.zr));
    tracker.record(Equation::ServiceabilityLoss, "ΔPSI");
    tracker.record(Equation::RigidStiffnessTerm, "Stiffness term precondition");
    tracker.record(Equation::RigidDesign, "Required slab thickness");

    let (exact_in, iterations, converged) = match solve_slab_thickness(input.w18, &params) {
        Ok(solution) => (solution.thickness_in, solution.iterations, true),
        Err(error) => {
            if settings.throw_on_error {
                return Err(error);
            }
            warn!(label = %input.label, code = error.error_code(), "rigid design degraded");
            warnings.insert(0, error.issue().to_string());
            let last_estimate = match &error {
                EngineeringValidationError::ConvergenceFailure { last_estimate, .. } => *last_estimate,
                _ => 0.0,
            };
            (last_estimate, MAX_ITERATIONS, false)
        }
    };

    let thickness_in = round_to_step(exact_in, THICKNESS_ROUNDING_IN);
    let category = RigidTrafficCategory::for_esal(input.w18);
    let minimum_thickness_in = category.min_slab_in();
    let below_minimum = thickness_in < minimum_thickness_in;
    if below_minimum {
        warnings.push(format!(
            "Slab thickness {:.1} in is below the {:.1} in minimum for {} traffic",
            thickness_in, minimum_thickness_in, category
        ));
    }

    tracker.record(Equation::JointSpacing, "Transverse joint spacing");
    tracker.record(Equation::DowelSizing, "Dowel bars");
    let joint_spacing = joint_spacing_m(thickness_in);
    let dowel = dowel_for_thickness(thickness_in);

    let adequate = converged && report.is_valid() && !below_minimum;
    debug!(thickness_in, grade = %concrete_grade, joint_spacing, adequate, "rigid design complete");

    Ok(RigidDesignResult {
        label: input.label.clone(),
        w18: input.w18,
        required_thickness_exact_in: exact_in,
        converged,
        iterations,
        zr: params.zr,
        delta_psi: params.delta_psi,
        thickness_in,
        thickness_cm: Centimeters::from(Inches(thickness_in)).0,
        traffic_category: category,
        minimum_thickness_in,
        concrete_grade,
        concrete,
        layers: vec![PavementLayerResult::slab(
            format!("Portland Cement Concrete {}", concrete_grade),
            thickness_in,
        )],
        joint_spacing_m: joint_spacing,
        dowel,
        tie_bar: TIE_BAR_SPEC,
        adequate,
        warnings,
        equations: tracker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_c() -> RigidDesignInput {
        RigidDesignInput {
            label: "Scenario C".to_string(),
            w18: 5_000_000.0,
            reliability: 95.0,
            standard_deviation: 0.35,
            serviceability_initial: 4.5,
            serviceability_terminal: 2.5,
            subgrade_k_pci: 150.0,
            load_transfer_j: 3.2,
            drainage_cd: 1.0,
            concrete_grade: None,
            modulus_of_rupture_psi: None,
            elastic_modulus_psi: None,
        }
    }

    fn lenient() -> DesignSettings {
        DesignSettings::default()
    }

    #[test]
    fn test_scenario_c() {
        let result = design_rigid(&scenario_c(), &lenient()).unwrap();

        assert_eq!(result.concrete_grade, ConcreteGrade::G30);
        assert!(result.converged);
        assert!(result.thickness_in >= 7.0 && result.thickness_in <= 10.0);
        assert!((result.thickness_in - 9.4).abs() < 1e-9);
        assert!((result.thickness_cm - 23.876).abs() < 1e-6);
        assert_eq!(result.traffic_category, RigidTrafficCategory::Medium);
        assert_eq!(result.minimum_thickness_in, 7.0);
        assert!((result.joint_spacing_m - 5.0).abs() < 1e-9);
        assert_eq!(result.dowel.slab_thickness_in, 9.0);
        assert_eq!(result.dowel.diameter_in, 1.125);
        assert_eq!(result.tie_bar, TIE_BAR_SPEC);
        assert!(result.adequate);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_scenario_c_slab_layer() {
        let result = design_rigid(&scenario_c(), &lenient()).unwrap();
        assert_eq!(result.layers.len(), 1);
        let slab = &result.layers[0];
        assert_eq!(slab.name, "Concrete Slab");
        assert_eq!(slab.material, "Portland Cement Concrete G30");
        assert_eq!(slab.thickness_in, result.thickness_in);
    }

    #[test]
    fn test_unrounded_thickness_reproduces_traffic() {
        let result = design_rigid(&scenario_c(), &lenient()).unwrap();
        let sc = ConcreteGrade::G30.properties();
        let params = RigidParameters {
            zr: result.zr,
            so: 0.35,
            delta_psi: 2.0,
            terminal_serviceability: 2.5,
            modulus_of_rupture_psi: sc.sc_psi(),
            drainage_cd: 1.0,
            load_transfer_j: 3.2,
            elastic_modulus_psi: sc.ec_psi(),
            subgrade_k_pci: 150.0,
        };
        let rhs = rigid_log_w18(result.required_thickness_exact_in, &params).unwrap();
        assert!((rhs - 5_000_000f64.log10()).abs() < D_TOLERANCE);
    }

    #[test]
    fn test_grade_override_and_property_override() {
        let input = RigidDesignInput {
            concrete_grade: Some("g-40".to_string()),
            ..scenario_c()
        };
        let stronger = design_rigid(&input, &lenient()).unwrap();
        assert_eq!(stronger.concrete_grade, ConcreteGrade::G40);

        let base = design_rigid(&scenario_c(), &lenient()).unwrap();
        assert!(stronger.required_thickness_exact_in < base.required_thickness_exact_in);

        let weaker = RigidDesignInput {
            modulus_of_rupture_psi: Some(550.0),
            ..scenario_c()
        };
        let weaker = design_rigid(&weaker, &lenient()).unwrap();
        assert!(weaker.required_thickness_exact_in > base.required_thickness_exact_in);
    }

    #[test]
    fn test_unknown_grade_falls_back_to_g25() {
        let input = RigidDesignInput {
            concrete_grade: Some("premium".to_string()),
            ..scenario_c()
        };
        assert_eq!(input.resolved_grade(), ConcreteGrade::G25);
    }

    #[test]
    fn test_light_traffic_does_not_converge() {
        // The root lies below the 5 in lower bound
        let input = RigidDesignInput {
            w18: 50_000.0,
            ..scenario_c()
        };
        let result = design_rigid(&input, &lenient()).unwrap();
        assert!(!result.converged);
        assert!(!result.adequate);
        assert!((result.required_thickness_exact_in - 5.0).abs() < 1e-9);
        assert!(result.warnings[0].contains("CONVERGENCE_FAILURE"));
        assert!(result.warnings.iter().any(|w| w.contains("below the 6.0 in minimum")));

        let err = design_rigid(&input, &DesignSettings::strict()).unwrap_err();
        assert_eq!(err.error_code(), "CONVERGENCE_FAILURE");
    }

    #[test]
    fn test_below_minimum_is_inadequate() {
        // Very stiff support on heavy traffic: the solved slab is thin but
        // the category minimum is 9 in
        let input = RigidDesignInput {
            w18: 40_000_000.0,
            reliability: 50.0,
            subgrade_k_pci: 800.0,
            load_transfer_j: 2.5,
            drainage_cd: 1.2,
            concrete_grade: Some("G40".to_string()),
            ..scenario_c()
        };
        let result = design_rigid(&input, &lenient()).unwrap();
        assert!(result.converged);
        assert!((result.thickness_in - 6.5).abs() < 1e-9);
        assert!(result.thickness_margin_in() < 0.0);
        assert!(!result.adequate);
        assert!(result.warnings.iter().any(|w| w.contains("minimum for Very Heavy traffic")));
    }

    #[test]
    fn test_findings_are_advisory() {
        let input = RigidDesignInput {
            load_transfer_j: 5.0,
            drainage_cd: 1.4,
            standard_deviation: 0.45,
            ..scenario_c()
        };
        let result = design_rigid(&input, &DesignSettings::strict()).unwrap();
        assert!(result.adequate);
        assert_eq!(result.warnings.len(), 3);
        assert!(result.warnings.iter().all(|w| w.contains("OUT_OF_TYPICAL_RANGE")));
    }

    #[test]
    fn test_invalid_input_is_inadequate_not_fatal() {
        let input = RigidDesignInput {
            serviceability_initial: 2.0,
            ..scenario_c()
        };
        let result = design_rigid(&input, &lenient()).unwrap();
        assert!(!result.adequate);
        assert!(result.warnings.iter().any(|w| w.contains("CONSTRAINT_VIOLATION")));
    }

    #[test]
    fn test_non_physical_stiffness_is_bounded() {
        let params = RigidParameters {
            zr: -1.645,
            so: 0.35,
            delta_psi: 2.0,
            terminal_serviceability: 2.5,
            modulus_of_rupture_psi: 640.0,
            drainage_cd: 1.0,
            load_transfer_j: 3.2,
            elastic_modulus_psi: 1_000.0,
            subgrade_k_pci: 500.0,
        };
        let err = solve_slab_thickness(5_000_000.0, &params).unwrap_err();
        assert_eq!(err.error_code(), "PHYSICAL_IMPOSSIBILITY");

        let input = RigidDesignInput {
            elastic_modulus_psi: Some(1_000.0),
            subgrade_k_pci: 500.0,
            ..scenario_c()
        };
        let result = design_rigid(&input, &lenient()).unwrap();
        assert!(!result.converged);
        assert!(!result.adequate);
        assert!(result.warnings[0].contains("PHYSICAL_IMPOSSIBILITY"));
    }

    #[test]
    fn test_equations_tracked() {
        let result = design_rigid(&scenario_c(), &lenient()).unwrap();
        let used = result.equations.unique_equations();
        assert!(used.contains(&Equation::RigidDesign));
        assert!(used.contains(&Equation::JointSpacing));
        assert!(used.contains(&Equation::DowelSizing));
    }

    #[test]
    fn test_json_defaults() {
        let input: RigidDesignInput =
            serde_json::from_str(r#"{"w18": 5000000, "reliability": 0.95, "subgrade_k_pci": 150}"#).unwrap();
        assert_eq!(input.standard_deviation, 0.35);
        assert_eq!(input.serviceability_initial, 4.5);
        assert_eq!(input.load_transfer_j, 3.2);
        assert_eq!(input.drainage_cd, 1.0);
        let result = design_rigid(&input, &lenient()).unwrap();
        assert!((result.thickness_in - 9.4).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_converged_thickness_reproduces_traffic(
            w18 in 1.0e6f64..5.0e7,
            k in 80.0f64..400.0,
            j in 2.5f64..4.0,
        ) {
            let input = RigidDesignInput { w18, subgrade_k_pci: k, load_transfer_j: j, ..scenario_c() };
            let grade = input.resolved_grade().properties();
            let params = RigidParameters {
                zr: zr_for_reliability(95.0),
                so: 0.35,
                delta_psi: 2.0,
                terminal_serviceability: 2.5,
                modulus_of_rupture_psi: grade.sc_psi(),
                drainage_cd: 1.0,
                load_transfer_j: j,
                elastic_modulus_psi: grade.ec_psi(),
                subgrade_k_pci: k,
            };
            let target = w18.log10();
            let bracketed = matches!(
                (rigid_log_w18(D_BOUNDS_IN.0, &params), rigid_log_w18(D_BOUNDS_IN.1, &params)),
                (Some(thin), Some(thick)) if target > thin && target < thick
            );
            prop_assume!(bracketed);
            let solution = solve_slab_thickness(w18, &params);
            prop_assert!(solution.is_ok(), "no convergence: {:?}", solution);
            let solution = solution.unwrap();
            let rhs = rigid_log_w18(solution.thickness_in, &params).unwrap();
            prop_assert!((rhs - target).abs() < D_TOLERANCE);
            prop_assert!(solution.thickness_in >= D_BOUNDS_IN.0 && solution.thickness_in <= D_BOUNDS_IN.1);
        }

        #[test]
        fn prop_design_is_idempotent(w18 in 1.0e5f64..1.0e8, k in 50.0f64..800.0) {
            let input = RigidDesignInput { w18, subgrade_k_pci: k, ..scenario_c() };
            prop_assert_eq!(design_rigid(&input, &lenient()), design_rigid(&input, &lenient()));
        }
    }
}
