//! Errors reported for one compilation unit

#![allow(unused_assignments)]

use hr_ast_lower::LowerError;
use hr_parser::ParseError;
use hr_pycode::PrintError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Why a file could not be translated
#[derive(Error, Debug, Diagnostic)]
pub enum DriverError {
    /// The source has syntax errors
    #[error("{path} has {} syntax error(s)", .errors.len())]
    #[diagnostic(code(driver::parse))]
    Parse {
        /// File name
        path: String,
        /// Every syntax error, with source attached
        #[related]
        errors: Vec<ParseError>,
    },

    /// The syntax tree contains a construct that cannot be lowered
    #[error("cannot translate {path}: {error}")]
    #[diagnostic(code(driver::lower))]
    Lower {
        /// File name
        path: String,
        /// Source text for the label
        #[source_code]
        src: NamedSource<String>,
        /// Location of the offending node
        #[label("cannot be translated")]
        span: Option<SourceSpan>,
        /// Lowering failure
        #[source]
        error: LowerError,
    },

    /// The tree cannot be rendered
    #[error(transparent)]
    #[diagnostic(transparent)]
    Print(#[from] PrintError),

    /// The file cannot be read
    #[error("cannot read {path}: {message}")]
    #[diagnostic(code(driver::io))]
    Io {
        /// File name
        path: String,
        /// Operating system error
        message: String,
    },
}

impl DriverError {
    pub(crate) fn lower(path: &str, source: &str, error: LowerError) -> Self {
        Self::Lower {
            path: path.to_string(),
            src: NamedSource::new(path, source.to_string()),
            span: error.span(),
            error,
        }
    }
}
