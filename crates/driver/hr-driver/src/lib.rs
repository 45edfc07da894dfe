//! Translation driver
//!
//! Runs parse, lower and print for one compilation unit at a time. Units
//! share nothing, so [`translate_files`] processes them on the rayon pool.

pub mod config;
pub mod error;

pub use config::{CONFIG_FILE, HeronConfig};
pub use error::DriverError;

use hr_ast::Node;
use hr_ast_lower::{LoweredModule, lower_source_file};
use hr_parser::PythonFrontend;
use hr_pycode::{PrinterSettings, PythonCodePrinter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A translated compilation unit
#[derive(Debug, Clone)]
pub struct Translation {
    /// Lowered tree
    pub module: LoweredModule,
    /// Printed Python source
    pub output: String,
}

/// Parse and lower a source text
///
/// `name` is only used to label diagnostics.
pub fn lower_source(name: &str, source: &str) -> Result<LoweredModule, DriverError> {
    let result = hr_parser::parse_source(source);

    let syntax = match result.syntax {
        Some(syntax) if result.errors.is_empty() => syntax,
        _ => {
            tracing::debug!(path = name, errors = result.errors.len(), "parse failed");
            return Err(DriverError::Parse {
                path: name.to_string(),
                errors: result
                    .errors
                    .into_iter()
                    .map(|error| error.with_source(name, source))
                    .collect(),
            });
        }
    };

    let frontend = PythonFrontend::new();
    lower_source_file(&frontend, &syntax).map_err(|error| DriverError::lower(name, source, error))
}

/// Parse, lower and print a source text
pub fn translate_source(
    name: &str,
    source: &str,
    settings: &PrinterSettings,
) -> Result<Translation, DriverError> {
    let module = lower_source(name, source)?;
    let output = PythonCodePrinter::new(settings.clone()).doprint(&Node::Block(module.body.clone()))?;

    tracing::info!(
        path = name,
        statements = module.body.len(),
        intrinsics = module.intrinsic_imports.len(),
        "translated"
    );

    Ok(Translation { module, output })
}

/// Read and translate one file
pub fn translate_file(path: &Path, settings: &PrinterSettings) -> Result<Translation, DriverError> {
    let name = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|err| DriverError::Io {
        path: name.clone(),
        message: err.to_string(),
    })?;
    translate_source(&name, &source, settings)
}

/// Translate several files in parallel, keeping the input order
pub fn translate_files(
    paths: &[PathBuf],
    settings: &PrinterSettings,
) -> Vec<(PathBuf, Result<Translation, DriverError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), translate_file(path, settings)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_ast_lower::LowerError;

    #[test]
    fn translates_a_source_text() {
        let translation = translate_source(
            "sum.py",
            "from numpy import zeros\n\ns = 0\nfor i in range(10):\n    s += i\n",
            &PrinterSettings::default(),
        )
        .unwrap();

        assert_eq!(
            translation.output,
            "from numpy import zeros\n\ns = 0\nfor i in range(0, 10, 1):\n    s += i\n"
        );
        assert_eq!(translation.module.intrinsic_imports.len(), 1);
    }

    #[test]
    fn syntax_errors_are_reported_with_their_file() {
        let error = lower_source("bad.py", "def f(:\n    pass\n").unwrap_err();
        let DriverError::Parse { path, errors } = error else {
            panic!("expected a parse error");
        };
        assert_eq!(path, "bad.py");
        assert!(!errors.is_empty());
        for error in &errors {
            let line = error.render_short().unwrap();
            assert!(line.starts_with("bad.py:1:"), "{line}");
            assert_eq!(line.lines().count(), 1);
        }
    }

    #[test]
    fn lowering_errors_keep_their_span() {
        let error = lower_source("with.py", "with a as b:\n    pass\n").unwrap_err();
        let DriverError::Lower { span, error, .. } = error else {
            panic!("expected a lowering error");
        };
        assert!(matches!(error, LowerError::UnsupportedConstruct { .. }));
        assert_eq!(span.map(|span| span.offset()), Some(0));
    }

    #[test]
    fn files_are_translated_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.py");
        let second = dir.path().join("b.py");
        let missing = dir.path().join("missing.py");
        std::fs::write(&first, "x = 1\n").unwrap();
        std::fs::write(&second, "y = 2\n").unwrap();

        let results = translate_files(
            &[first.clone(), missing.clone(), second.clone()],
            &PrinterSettings::default(),
        );

        assert_eq!(
            results.iter().map(|(path, _)| path.clone()).collect::<Vec<_>>(),
            vec![first, missing, second]
        );
        assert_eq!(results[0].1.as_ref().unwrap().output, "x = 1\n");
        assert!(matches!(results[1].1, Err(DriverError::Io { .. })));
        assert_eq!(results[2].1.as_ref().unwrap().output, "y = 2\n");
    }
}
