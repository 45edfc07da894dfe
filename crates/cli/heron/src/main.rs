//! Heron command line
//!
//! Translates files of the numeric Python subset and reports diagnostics.
//! Set `HERON_LOG` (e.g. `HERON_LOG=hr_ast_lower=trace`) to see pipeline
//! events on stderr.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod check;
mod translate;

#[derive(Parser)]
#[command(name = "heron")]
#[command(about = "Python subset translator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// What `translate` writes for each file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Python source from the printer
    Python,
    /// JSON dump of the lowered tree
    Ast,
}

/// How `check` reports failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Labelled source excerpts
    Human,
    /// One `file:line:col` line per syntax error
    Short,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate source files
    Translate {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output form
        #[arg(long, value_enum, default_value_t = Emit::Python)]
        emit: Emit,

        /// Configuration file (defaults to heron.toml beside the first input)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write one output file per input into this directory instead of stdout
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Check that source files can be translated
    Check {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Diagnostic layout
        #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
        message_format: MessageFormat,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            files,
            emit,
            config,
            out_dir,
        } => {
            translate::translate(&files, emit, config.as_deref(), out_dir.as_deref())?;
        }
        Commands::Check {
            files,
            message_format,
        } => {
            check::check(&files, message_format)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HERON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
