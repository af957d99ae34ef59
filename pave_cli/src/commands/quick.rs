//! `flexible` and `rigid` commands: single designs from flags.

use anyhow::{Context, Result};
use clap::Args;
use pave_core::calculations::{
    design_flexible, design_rigid, FlexibleCase, FlexibleDesignInput, LayerSelection,
    RigidDesignInput,
};
use pave_core::materials::DrainageQuality;
use pave_core::report::{render_flexible, render_rigid};
use pave_core::settings::DesignSettings;

use super::print_json;

#[derive(Args)]
pub struct FlexibleArgs {
    /// Design traffic, 18-kip ESAL
    #[arg(long)]
    pub w18: f64,

    /// Reliability (%)
    #[arg(long)]
    pub reliability: f64,

    /// Subgrade resilient modulus Mr (psi)
    #[arg(long)]
    pub mr: f64,

    /// Overall standard deviation So
    #[arg(long, default_value_t = 0.45)]
    pub so: f64,

    /// Initial serviceability
    #[arg(long, default_value_t = 4.2)]
    pub pi: f64,

    /// Terminal serviceability
    #[arg(long, default_value_t = 2.5)]
    pub pt: f64,

    #[arg(long, default_value = "asphalt_concrete")]
    pub surface: String,

    #[arg(long, default_value = "crushed_stone")]
    pub base: String,

    #[arg(long, default_value = "granular_subbase")]
    pub subbase: String,

    /// Drainage quality (excellent, good, fair, poor, very_poor)
    #[arg(long, default_value = "good")]
    pub drainage: String,

    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct RigidArgs {
    /// Design traffic, 18-kip ESAL
    #[arg(long)]
    pub w18: f64,

    /// Reliability (%)
    #[arg(long)]
    pub reliability: f64,

    /// Modulus of subgrade reaction k (pci)
    #[arg(long)]
    pub k: f64,

    #[arg(long, default_value_t = 0.35)]
    pub so: f64,

    #[arg(long, default_value_t = 4.5)]
    pub pi: f64,

    #[arg(long, default_value_t = 2.5)]
    pub pt: f64,

    /// Load transfer coefficient J
    #[arg(long, default_value_t = 3.2)]
    pub j: f64,

    /// Drainage coefficient Cd
    #[arg(long, default_value_t = 1.0)]
    pub cd: f64,

    /// Concrete grade (G25, G30, G35, G40); recommended from W18 if omitted
    #[arg(long)]
    pub grade: Option<String>,

    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub strict: bool,
}

fn settings(strict: bool) -> DesignSettings {
    DesignSettings {
        throw_on_error: strict,
        ..Default::default()
    }
}

pub fn execute_flexible(args: FlexibleArgs) -> Result<()> {
    let mut case = FlexibleCase::new(FlexibleDesignInput {
        label: "Flexible design".to_string(),
        w18: args.w18,
        reliability: args.reliability,
        standard_deviation: args.so,
        serviceability_initial: args.pi,
        serviceability_terminal: args.pt,
        resilient_modulus_psi: args.mr,
    });
    case.layers = LayerSelection {
        surface: args.surface,
        base: args.base,
        subbase: args.subbase,
        drainage: DrainageQuality::lookup(&args.drainage),
    };

    let result = design_flexible(
        &case.input,
        &case.effective_coefficients(),
        &case.layers.labels(),
        &settings(args.strict),
    )
    .context("flexible design failed")?;

    if args.json {
        return print_json(&result);
    }
    print!("{}", render_flexible(&result, None));
    Ok(())
}

pub fn execute_rigid(args: RigidArgs) -> Result<()> {
    let input = RigidDesignInput {
        label: "Rigid design".to_string(),
        w18: args.w18,
        reliability: args.reliability,
        standard_deviation: args.so,
        serviceability_initial: args.pi,
        serviceability_terminal: args.pt,
        subgrade_k_pci: args.k,
        load_transfer_j: args.j,
        drainage_cd: args.cd,
        concrete_grade: args.grade,
        modulus_of_rupture_psi: None,
        elastic_modulus_psi: None,
    };

    let result = design_rigid(&input, &settings(args.strict)).context("rigid design failed")?;

    if args.json {
        return print_json(&result);
    }
    print!("{}", render_rigid(&result, None));
    Ok(())
}
