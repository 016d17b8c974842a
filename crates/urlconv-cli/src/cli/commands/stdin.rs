//! Convert standard input until end of stream.

use anyhow::Result;
use std::io::{self, BufWriter};
use urlconv_core::{Converter, Direction};

pub fn run_stdin(converter: &Converter, direction: Direction) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let count = converter.convert_stream(direction, stdin.lock(), BufWriter::new(stdout.lock()))?;
    tracing::info!(count, ?direction, "converted standard input");
    Ok(())
}
