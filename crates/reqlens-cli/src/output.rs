//! Terminal output helpers.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

/// Write a value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Flag a failed run on stderr, after the report itself.
pub fn print_failure(kind: &str, message: &str) -> Result<()> {
    std::io::stdout().flush()?;
    eprintln!("{} {} failure: {}", "✗".red().bold(), kind.red(), message);
    Ok(())
}
