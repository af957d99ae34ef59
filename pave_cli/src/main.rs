//! # Pavement Design CLI
//!
//! Command-line front end for `pave_core`.
//!
//! ```text
//! pave_cli design cases.toml            # text report for every case
//! pave_cli design cases.json --json     # results as JSON
//! pave_cli flexible --w18 1e6 --reliability 90 --mr 7500
//! pave_cli rigid --w18 5e6 --reliability 95 --k 150
//! pave_cli zr 95
//! pave_cli tables
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=pave_core=trace`) to see solver iterations.

mod commands;
mod input;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// AASHTO-93 pavement structural design
#[derive(Parser)]
#[command(name = "pave_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AASHTO-93 flexible and rigid pavement design", long_about = None)]
struct Cli {
    /// Debug-level logging from the design engine
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every case in a JSON or TOML design file
    Design(commands::design::DesignArgs),
    /// Design a flexible pavement from flags
    Flexible(commands::quick::FlexibleArgs),
    /// Design a rigid pavement from flags
    Rigid(commands::quick::RigidArgs),
    /// Standard normal deviate for a reliability level
    Zr(commands::tables::ZrArgs),
    /// Dump the reference tables as JSON
    Tables,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pave_core=debug,info" } else { "pave_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Design(args) => commands::design::execute(args),
        Commands::Flexible(args) => commands::quick::execute_flexible(args),
        Commands::Rigid(args) => commands::quick::execute_rigid(args),
        Commands::Zr(args) => commands::tables::execute_zr(args),
        Commands::Tables => commands::tables::execute_tables(),
    }
}
