//! Integration test utilities for Heron

use anyhow::{Context, Result};
use hr_ast::{Node, Stmt};
use hr_ast_lower::LoweredModule;
use hr_pycode::{PrinterSettings, PythonCodePrinter};
use std::path::PathBuf;

/// Directory holding the `.py` fixtures
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Reads a fixture by file name
///
/// # Errors
///
/// Returns an error if the fixture does not exist
pub fn fixture(name: &str) -> Result<String> {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture: {}", path.display()))
}

/// Parses and lowers a source text
///
/// # Errors
///
/// Returns the driver error if parsing or lowering fails
pub fn lower(source: &str) -> Result<LoweredModule> {
    Ok(hr_driver::lower_source("fixture.py", source)?)
}

/// Prints a statement sequence with the default settings
///
/// # Errors
///
/// Returns an error if a node cannot be printed
pub fn print_body(body: &[Stmt]) -> Result<String> {
    Ok(PythonCodePrinter::new(PrinterSettings::default()).doprint(&Node::Block(body.to_vec()))?)
}

/// Prints `body` and lowers the result again
///
/// # Errors
///
/// Returns an error if printing or re-lowering fails
pub fn round_trip(body: &[Stmt]) -> Result<Vec<Stmt>> {
    let printed = print_body(body)?;
    let module = lower(&printed).with_context(|| format!("printed source:\n{printed}"))?;
    Ok(module.body)
}
