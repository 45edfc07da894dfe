//! Check command implementation

use crate::MessageFormat;
use anyhow::Result;
use colored::Colorize;
use hr_driver::DriverError;
use hr_pycode::PrinterSettings;
use std::path::{Path, PathBuf};

pub fn check(files: &[PathBuf], format: MessageFormat) -> Result<()> {
    println!("{} {} file(s)", "Checking".green().bold(), files.len());

    let mut total_errors = 0;
    for (path, result) in hr_driver::translate_files(files, &PrinterSettings::default()) {
        match result {
            Ok(translation) => {
                println!(
                    "  {} {} ({} statements)",
                    "✓".green(),
                    path.display(),
                    translation.module.body.len()
                );
            }
            Err(error) => {
                total_errors += 1;
                eprintln!("  {} {}", "✗".red(), path.display());
                match format {
                    MessageFormat::Human => eprintln!("{:?}", miette::Report::new(error)),
                    MessageFormat::Short => eprint!("{}", short_report(&path, &error)?),
                }
            }
        }
    }

    println!();
    if total_errors > 0 {
        eprintln!("{} {} file(s) failed", "Failed:".red().bold(), total_errors);
        anyhow::bail!("Check failed with {} errors", total_errors);
    }

    println!("{} No errors found", "Success:".green().bold());
    Ok(())
}

/// Syntax errors through codespan, one line each; other failures as one line
fn short_report(path: &Path, error: &DriverError) -> Result<String> {
    match error {
        DriverError::Parse { errors, .. } => {
            let mut report = String::new();
            for syntax_error in errors {
                report.push_str(&syntax_error.render_short()?);
            }
            Ok(report)
        }
        other => Ok(format!("{}: error: {other}\n", path.display())),
    }
}
