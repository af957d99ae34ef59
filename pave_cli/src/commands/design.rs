//! `design` command: run every case in a design file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pave_core::calculations::DesignOutcome;
use pave_core::report::render_outcomes;
use tracing::info;

use super::print_json;
use crate::input::load_design_file;

#[derive(Args)]
pub struct DesignArgs {
    /// Design file (.json or .toml)
    pub file: PathBuf,

    /// Print results as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Stop at the first validation or convergence error
    #[arg(long)]
    pub strict: bool,

    /// Append the list of equations used by each design
    #[arg(long)]
    pub equations: bool,
}

pub fn execute(args: DesignArgs) -> Result<()> {
    let mut batch = load_design_file(&args.file)?;
    if args.strict {
        batch.settings.throw_on_error = true;
    }
    info!(file = %args.file.display(), cases = batch.cases.len(), "running design file");

    let outcomes = batch.run().context("design failed in strict mode")?;

    if args.json {
        return print_json(&outcomes);
    }

    print!("{}", render_outcomes(&outcomes, batch.settings.project.as_ref()));
    if args.equations {
        for outcome in &outcomes {
            println!();
            println!("Equations for {}", outcome.label());
            print!("{}", equation_appendix(outcome));
        }
    }
    Ok(())
}

fn equation_appendix(outcome: &DesignOutcome) -> String {
    match outcome {
        DesignOutcome::Flexible(result) => result.equations.generate_appendix_markdown(),
        DesignOutcome::Rigid(result) => result.equations.generate_appendix_markdown(),
    }
}
