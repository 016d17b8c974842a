//! Convert each positional argument as one input unit.

use anyhow::Result;
use std::io;
use urlconv_core::{Converter, Direction};

pub fn run_args(converter: &Converter, direction: Direction, inputs: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let count = converter.convert_args(
        direction,
        inputs.iter().map(String::as_str),
        stdout.lock(),
    )?;
    tracing::info!(count, ?direction, "converted arguments");
    Ok(())
}
