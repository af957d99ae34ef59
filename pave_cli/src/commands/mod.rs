pub mod design;
pub mod quick;
pub mod tables;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty JSON to stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
