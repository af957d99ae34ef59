//! `zr` and `tables` commands: reference data.

use anyhow::{bail, Result};
use clap::Args;
use pave_core::materials::{
    all_materials, dowel_for_thickness, ConcreteGrade, DrainageQuality, TIE_BAR_SPEC,
};
use pave_core::reliability::{zr_for_reliability, RELIABILITY_TABLE};
use pave_core::traffic::{FlexibleTrafficCategory, RigidTrafficCategory};
use pave_core::validation::validate_reliability;
use serde_json::json;

use super::print_json;

#[derive(Args)]
pub struct ZrArgs {
    /// Reliability, as a percentage (95) or a fraction (0.95)
    pub reliability: f64,
}

pub fn execute_zr(args: ZrArgs) -> Result<()> {
    let checked = validate_reliability(args.reliability);
    if let Some(error) = checked.errors.first() {
        bail!("{}", error);
    }
    for warning in &checked.warnings {
        eprintln!("warning: {}", warning);
    }
    println!("R = {}%  Zr = {:.4}", checked.value, zr_for_reliability(checked.value));
    Ok(())
}

pub fn execute_tables() -> Result<()> {
    let drainage: Vec<_> = DrainageQuality::ALL
        .iter()
        .map(|q| json!({ "quality": q, "coefficients": q.coefficients() }))
        .collect();
    let concrete: Vec<_> = ConcreteGrade::ALL
        .iter()
        .map(|g| json!({ "grade": g, "properties": g.properties() }))
        .collect();
    let flexible_traffic: Vec<_> = FlexibleTrafficCategory::ALL
        .iter()
        .map(|c| json!({ "category": c, "min_surface_in": c.min_surface_in(), "min_base_in": c.min_base_in() }))
        .collect();
    let rigid_traffic: Vec<_> = RigidTrafficCategory::ALL
        .iter()
        .map(|c| json!({ "category": c, "min_slab_in": c.min_slab_in() }))
        .collect();
    let dowels: Vec<_> = (6..=12).map(|d| dowel_for_thickness(f64::from(d))).collect();
    let reliability: Vec<_> = RELIABILITY_TABLE
        .iter()
        .map(|(r, zr)| json!({ "reliability": r, "zr": zr }))
        .collect();

    print_json(&json!({
        "layer_materials": all_materials(),
        "drainage": drainage,
        "concrete_grades": concrete,
        "flexible_traffic": flexible_traffic,
        "rigid_traffic": rigid_traffic,
        "dowels": dowels,
        "tie_bar": TIE_BAR_SPEC,
        "reliability": reliability,
    }))
}
