//! # Text Reports
//!
//! Renders design results as fixed-layout plain text for terminals and
//! calculation packages.
//!
//! ## Layout
//!
//! - Header with the design label and optional job line
//! - Required against provided capacity, and the status
//! - Layer breakdown with each layer's contribution
//! - Total thickness
//! - Warnings, in the order the design produced them
//!
//! Thicknesses in cm are shown to 1 decimal; SN values and contributions
//! to 2 decimals.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::rigid::{design_rigid, RigidDesignInput};
//! use pave_core::report::render_rigid;
//! use pave_core::settings::DesignSettings;
//!
//! let input: RigidDesignInput = serde_json::from_str(
//!     r#"{"label": "Apron", "w18": 5000000, "reliability": 95, "subgrade_k_pci": 150}"#,
//! )
//! .unwrap();
//! let result = design_rigid(&input, &DesignSettings::default()).unwrap();
//!
//! let text = render_rigid(&result, None);
//! assert!(text.contains("RIGID PAVEMENT DESIGN - Apron"));
//! ```

use crate::calculations::{DesignOutcome, FlexibleDesignResult, PavementLayerResult, RigidDesignResult};
use crate::settings::ProjectInfo;

const RULE_WIDTH: usize = 78;

const FLEXIBLE_TEMPLATE: &str = "\
{{RULE}}
FLEXIBLE PAVEMENT DESIGN - {{LABEL}}
{{PROJECT}}{{RULE}}
Design traffic W18:      {{W18}} ESAL ({{CATEGORY}} traffic)
Reliability deviate Zr:  {{ZR}}
Serviceability loss:     {{DELTA_PSI}}
Required SN:             {{REQUIRED}}
Provided SN:             {{PROVIDED}}
Status:                  {{STATUS}}
{{THIN_RULE}}
{{LAYERS}}{{THIN_RULE}}
Total thickness:         {{TOTAL_CM}} cm ({{TOTAL_IN}} in)
{{WARNINGS}}";

const RIGID_TEMPLATE: &str = "\
{{RULE}}
RIGID PAVEMENT DESIGN - {{LABEL}}
{{PROJECT}}{{RULE}}
Design traffic W18:      {{W18}} ESAL ({{CATEGORY}} traffic)
Reliability deviate Zr:  {{ZR}}
Serviceability loss:     {{DELTA_PSI}}
Required thickness:      {{REQUIRED}} in (unrounded)
Provided thickness:      {{PROVIDED}} in (minimum {{MINIMUM}} in)
Status:                  {{STATUS}}
{{THIN_RULE}}
{{LAYERS}}{{THIN_RULE}}
Total thickness:         {{TOTAL_CM}} cm ({{TOTAL_IN}} in)
Concrete:                {{GRADE}} (Ec {{EC}} MPa, Sc {{SC}} MPa)
Joint spacing:           {{JOINTS}} m
Dowel bars:              {{DOWEL_DIA}} in dia x {{DOWEL_LEN}} in @ {{DOWEL_SPACING}} in
Tie bars:                #{{TIE_NO}} x {{TIE_LEN}} cm @ {{TIE_SPACING}} cm
{{WARNINGS}}";

fn status(adequate: bool) -> &'static str {
    if adequate {
        "ADEQUATE"
    } else {
        "INADEQUATE"
    }
}

fn project_line(project: Option<&ProjectInfo>) -> String {
    project
        .map(|p| format!("{}\n", p.header_line()))
        .unwrap_or_default()
}

/// Layer table; the last column is the SN contribution for flexible layers
fn layer_rows(layers: &[PavementLayerResult], last_column: &str) -> String {
    if layers.is_empty() {
        return "No layers (design not completed)\n".to_string();
    }
    let mut rows = format!(
        "{:<16} {:<24} {:>8} {:>7} {:>5} {:>5} {:>7}\n",
        "Layer", "Material", "cm", "in", "a", "m", last_column
    );
    for layer in layers {
        rows.push_str(&format!(
            "{:<16} {:<24} {:>8.1} {:>7.1} {:>5.2} {:>5.2} {:>7.2}\n",
            layer.name,
            layer.material,
            layer.thickness_cm,
            layer.thickness_in,
            layer.coefficient,
            layer.drainage_coefficient,
            layer.contribution
        ));
    }
    rows
}

fn warning_lines(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return "Warnings:                none\n".to_string();
    }
    let mut lines = String::from("Warnings:\n");
    for warning in warnings {
        lines.push_str(&format!("  - {}\n", warning));
    }
    lines
}

/// Substitute `{{KEY}}` placeholders in one pass over the template.
///
/// Substituted text is never rescanned, so labels and warnings may
/// contain braces. Unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let key = &after[..close];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn common_values(label: &str, project: Option<&ProjectInfo>) -> Vec<(&'static str, String)> {
    vec![
        ("RULE", "=".repeat(RULE_WIDTH)),
        ("THIN_RULE", "-".repeat(RULE_WIDTH)),
        ("LABEL", label.to_string()),
        ("PROJECT", project_line(project)),
    ]
}

/// Render a flexible design result.
pub fn render_flexible(result: &FlexibleDesignResult, project: Option<&ProjectInfo>) -> String {
    let mut values = common_values(&result.label, project);
    values.extend([
        ("W18", format_esal(result.w18)),
        ("CATEGORY", result.traffic_category.display_name().to_string()),
        ("ZR", format!("{:.3}", result.zr)),
        ("DELTA_PSI", format!("{:.2}", result.delta_psi)),
        ("REQUIRED", format!("{:.2}", result.required_sn)),
        ("PROVIDED", format!("{:.2}", result.provided_sn)),
        ("STATUS", status(result.adequate).to_string()),
        ("LAYERS", layer_rows(&result.layers, "SN")),
        ("TOTAL_CM", format!("{:.1}", result.total_thickness_cm)),
        ("TOTAL_IN", format!("{:.1}", result.total_thickness_in)),
        ("WARNINGS", warning_lines(&result.warnings)),
    ]);
    fill_template(FLEXIBLE_TEMPLATE, &values)
}

/// Render a rigid design result.
pub fn render_rigid(result: &RigidDesignResult, project: Option<&ProjectInfo>) -> String {
    let mut values = common_values(&result.label, project);
    values.extend([
        ("W18", format_esal(result.w18)),
        ("CATEGORY", result.traffic_category.display_name().to_string()),
        ("ZR", format!("{:.3}", result.zr)),
        ("DELTA_PSI", format!("{:.2}", result.delta_psi)),
        ("REQUIRED", format!("{:.2}", result.required_thickness_exact_in)),
        ("PROVIDED", format!("{:.1}", result.thickness_in)),
        ("MINIMUM", format!("{:.1}", result.minimum_thickness_in)),
        ("STATUS", status(result.adequate).to_string()),
        ("LAYERS", layer_rows(&result.layers, "D (in)")),
        ("TOTAL_CM", format!("{:.1}", result.thickness_cm)),
        ("TOTAL_IN", format!("{:.1}", result.thickness_in)),
        ("GRADE", result.concrete_grade.code().to_string()),
        ("EC", format!("{:.0}", result.concrete.ec_mpa)),
        ("SC", format!("{:.1}", result.concrete.sc_mpa)),
        ("JOINTS", format!("{:.1}", result.joint_spacing_m)),
        ("DOWEL_DIA", format!("{:.3}", result.dowel.diameter_in)),
        ("DOWEL_LEN", format!("{:.0}", result.dowel.length_in)),
        ("DOWEL_SPACING", format!("{:.0}", result.dowel.spacing_in)),
        ("TIE_NO", result.tie_bar.bar_number.to_string()),
        ("TIE_LEN", format!("{:.0}", result.tie_bar.length_cm)),
        ("TIE_SPACING", format!("{:.0}", result.tie_bar.spacing_cm)),
        ("WARNINGS", warning_lines(&result.warnings)),
    ]);
    fill_template(RIGID_TEMPLATE, &values)
}

/// Render any design outcome.
pub fn render_outcome(outcome: &DesignOutcome, project: Option<&ProjectInfo>) -> String {
    match outcome {
        DesignOutcome::Flexible(result) => render_flexible(result, project),
        DesignOutcome::Rigid(result) => render_rigid(result, project),
    }
}

/// Render a batch of outcomes followed by a one-line summary.
pub fn render_outcomes(outcomes: &[DesignOutcome], project: Option<&ProjectInfo>) -> String {
    let mut text = outcomes
        .iter()
        .map(|outcome| render_outcome(outcome, project))
        .collect::<Vec<_>>()
        .join("\n");
    let adequate = outcomes.iter().filter(|o| o.is_adequate()).count();
    text.push_str(&format!("\n{} of {} designs adequate\n", adequate, outcomes.len()));
    text
}

/// W18 with thousands separators ("1,000,000")
fn format_esal(w18: f64) -> String {
    if !w18.is_finite() {
        return w18.to_string();
    }
    let digits = format!("{:.0}", w18.abs());
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if w18 < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::flexible::{design_flexible, FlexibleDesignInput};
    use crate::calculations::rigid::{design_rigid, RigidDesignInput};
    use crate::materials::{LayerCoefficients, LayerMaterials};
    use crate::settings::DesignSettings;

    fn scenario_a() -> FlexibleDesignInput {
        FlexibleDesignInput {
            label: "Main St".to_string(),
            w18: 1_000_000.0,
            reliability: 90.0,
            standard_deviation: 0.45,
            serviceability_initial: 4.2,
            serviceability_terminal: 2.5,
            resilient_modulus_psi: 7_500.0,
        }
    }

    fn flexible(input: &FlexibleDesignInput) -> FlexibleDesignResult {
        design_flexible(
            input,
            &LayerCoefficients::default(),
            &LayerMaterials::default(),
            &DesignSettings::default(),
        )
        .unwrap()
    }

    fn scenario_c() -> RigidDesignResult {
        let input: RigidDesignInput = serde_json::from_str(
            r#"{"label": "Apron", "w18": 5000000, "reliability": 95, "subgrade_k_pci": 150}"#,
        )
        .unwrap();
        design_rigid(&input, &DesignSettings::default()).unwrap()
    }

    #[test]
    fn test_format_esal() {
        assert_eq!(format_esal(1_000_000.0), "1,000,000");
        assert_eq!(format_esal(50_000.0), "50,000");
        assert_eq!(format_esal(999.0), "999");
        assert_eq!(format_esal(-1500.0), "-1,500");
    }

    #[test]
    fn test_flexible_report() {
        let text = render_flexible(&flexible(&scenario_a()), None);
        assert!(text.contains("FLEXIBLE PAVEMENT DESIGN - Main St"));
        assert!(text.contains("Design traffic W18:      1,000,000 ESAL"));
        assert!(text.contains("Required SN:             3.47"));
        assert!(text.contains("Provided SN:             3.48"));
        assert!(text.contains("Status:                  ADEQUATE"));
        assert!(text.contains("Asphalt Concrete"));
        assert!(text.contains("Total thickness:         53.3 cm (21.0 in)"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_layer_rows_are_rounded() {
        let rows = layer_rows(
            &[PavementLayerResult::structural("Base Course", "Crushed Stone Base", 6.0, 0.14, 0.8)],
            "SN",
        );
        let row = rows.lines().nth(1).unwrap();
        assert!(row.contains("15.2"));
        assert!(row.contains("0.67"));
        assert!(!row.contains("15.24"));
    }

    #[test]
    fn test_degraded_flexible_report() {
        let bad = FlexibleDesignInput {
            serviceability_initial: 2.0,
            ..scenario_a()
        };
        let text = render_flexible(&flexible(&bad), None);
        assert!(text.contains("INADEQUATE"));
        assert!(text.contains("No layers (design not completed)"));
        assert!(text.contains("CONSTRAINT_VIOLATION"));
    }

    #[test]
    fn test_rigid_report() {
        let text = render_rigid(&scenario_c(), None);
        assert!(text.contains("RIGID PAVEMENT DESIGN - Apron"));
        assert!(text.contains("Provided thickness:      9.4 in (minimum 7.0 in)"));
        assert!(text.contains("Concrete:                G30"));
        assert!(text.contains("Joint spacing:           5.0 m"));
        assert!(text.contains("1.125 in dia"));
        assert!(text.contains("Warnings:                none"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_label_with_placeholder_text_is_verbatim() {
        let input = FlexibleDesignInput {
            label: "Ramp {{W18}} {{STATUS}} {{LAYERS}}".to_string(),
            ..scenario_a()
        };
        let text = render_flexible(&flexible(&input), None);
        assert!(text.contains("FLEXIBLE PAVEMENT DESIGN - Ramp {{W18}} {{STATUS}} {{LAYERS}}\n"));
        assert!(text.contains("Design traffic W18:      1,000,000 ESAL"));
    }

    #[test]
    fn test_fill_template() {
        let values = [("A", "{{B}}".to_string()), ("B", "two".to_string())];
        assert_eq!(fill_template("{{A}}-{{B}}-{{C}}-{{", &values), "{{B}}-two-{{C}}-{{");
    }

    #[test]
    fn test_project_header() {
        let project = ProjectInfo::new("J. Doe", "26-014");
        let text = render_rigid(&scenario_c(), Some(&project));
        assert!(text.contains("Job 26-014 | Engineer: J. Doe"));
    }

    #[test]
    fn test_batch_summary() {
        let outcomes = vec![
            DesignOutcome::Flexible(flexible(&scenario_a())),
            DesignOutcome::Rigid(scenario_c()),
        ];
        let text = render_outcomes(&outcomes, None);
        assert!(text.contains("FLEXIBLE PAVEMENT DESIGN"));
        assert!(text.contains("RIGID PAVEMENT DESIGN"));
        assert!(text.ends_with("2 of 2 designs adequate\n"));
    }
}
