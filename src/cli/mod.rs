//! Command handlers. Each runs one aggregation pass and writes its result
//! to stdout as JSON.

pub mod dashboard;
pub mod fund;
pub mod rank;
pub mod setup;

use anyhow::{Context, Result};
use serde::Serialize;

pub(crate) fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
