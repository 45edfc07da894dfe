//! Syntax errors found by the parser
//!
//! A [`ParseError`] is a [`SyntaxErrorKind`] located in a named source. Both
//! renderers read the same labels: `miette` for the rich report the driver
//! prints and `codespan-reporting` for the one-line `file:line:col` form.

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, Config, DisplayStyle};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use std::fmt::Display;
use std::ops::Range;
use thiserror::Error;

/// What is wrong at the reported location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Input the grammar cannot place
    #[error("unexpected `{token}`")]
    Unexpected {
        /// First line of the offending text
        token: String,
    },

    /// The grammar inserted a token that is not in the source
    #[error("expected `{expected}`, found `{found}`")]
    Missing {
        /// Inserted token
        expected: String,
        /// Text at the insertion point
        found: String,
    },

    /// A bracket that is never closed
    #[error("`{open}` is never closed")]
    Unclosed {
        /// Opening bracket
        open: char,
        /// Bracket that would close it
        close: char,
        /// Byte offset of the opening bracket
        opened_at: usize,
    },

    /// A statement whose shape is wrong
    #[error("malformed {construct}")]
    Malformed {
        /// Statement family, e.g. "function definition"
        construct: &'static str,
        /// How the statement is written
        hint: &'static str,
    },

    /// tree-sitter produced no tree at all
    #[error("the parser gave up: {reason}")]
    Aborted {
        /// Reason given by the grammar
        reason: String,
    },
}

impl SyntaxErrorKind {
    /// Stable diagnostic code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unexpected { .. } => "syntax::unexpected",
            Self::Missing { .. } => "syntax::missing",
            Self::Unclosed { .. } => "syntax::unclosed",
            Self::Malformed { .. } => "syntax::malformed",
            Self::Aborted { .. } => "syntax::aborted",
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            Self::Missing { expected, .. } => Some(format!("insert `{expected}` here")),
            Self::Unclosed { close, .. } => Some(format!("add the matching `{close}`")),
            Self::Malformed { hint, .. } => Some((*hint).to_string()),
            Self::Unexpected { .. } | Self::Aborted { .. } => None,
        }
    }
}

/// One underlined range of a diagnostic
struct Mark {
    range: Range<usize>,
    message: Option<String>,
    primary: bool,
}

/// A syntax error with the source it was found in
#[derive(Error, Debug, Clone)]
#[error("{kind}")]
pub struct ParseError {
    kind: SyntaxErrorKind,
    span: SourceSpan,
    src: NamedSource<String>,
}

impl ParseError {
    /// Creates an error in an unnamed source
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, span: impl Into<SourceSpan>, source: &str) -> Self {
        Self {
            kind,
            span: span.into(),
            src: NamedSource::new("<input>", source.to_string()),
        }
    }

    /// What went wrong
    #[must_use]
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Where it went wrong
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        self.span
    }

    /// Name of the source shown in reports
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.src.name()
    }

    /// Attach the real file name and text
    #[must_use]
    pub fn with_source(self, filename: impl AsRef<str>, source: impl Into<String>) -> Self {
        Self {
            src: NamedSource::new(filename, source.into()),
            ..self
        }
    }

    fn marks(&self) -> Vec<Mark> {
        let at = self.span.offset()..self.span.offset() + self.span.len();
        match &self.kind {
            SyntaxErrorKind::Unclosed {
                open, opened_at, ..
            } => vec![
                Mark {
                    range: *opened_at..opened_at + open.len_utf8(),
                    message: Some("opened here".to_string()),
                    primary: false,
                },
                Mark {
                    range: at,
                    message: Some("expected the closing bracket here".to_string()),
                    primary: true,
                },
            ],
            SyntaxErrorKind::Aborted { .. } => Vec::new(),
            SyntaxErrorKind::Missing { expected, .. } => vec![Mark {
                range: at,
                message: Some(format!("`{expected}` belongs here")),
                primary: true,
            }],
            SyntaxErrorKind::Malformed { construct, .. } => vec![Mark {
                range: at,
                message: Some(format!("in this {construct}")),
                primary: true,
            }],
            SyntaxErrorKind::Unexpected { .. } => vec![Mark {
                range: at,
                message: Some("not valid here".to_string()),
                primary: true,
            }],
        }
    }

    /// Builds the `codespan-reporting` form of the error
    #[must_use]
    pub fn to_codespan<FileId: Copy>(&self, file: FileId) -> CodespanDiagnostic<FileId> {
        let labels = self
            .marks()
            .into_iter()
            .map(|mark| {
                let label = if mark.primary {
                    Label::primary(file, mark.range)
                } else {
                    Label::secondary(file, mark.range)
                };
                match mark.message {
                    Some(message) => label.with_message(message),
                    None => label,
                }
            })
            .collect();

        CodespanDiagnostic::error()
            .with_code(self.kind.code())
            .with_message(self.kind.to_string())
            .with_labels(labels)
            .with_notes(self.kind.help().into_iter().collect())
    }

    /// Renders `file:line:col: error[code]: message` for the attached source
    ///
    /// # Errors
    ///
    /// Fails when the span lies outside the attached source.
    pub fn render_short(&self) -> Result<String, codespan_reporting::files::Error> {
        let file = SimpleFile::new(self.src.name(), self.src.inner().as_str());
        let config = Config {
            display_style: DisplayStyle::Short,
            ..Config::default()
        };
        term::emit_into_string(&config, &file, &self.to_codespan(()))
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.kind
            .help()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let marks = self.marks();
        if marks.is_empty() {
            return None;
        }
        Some(Box::new(marks.into_iter().map(|mark| {
            let span = (mark.range.start, mark.range.len());
            if mark.primary {
                LabeledSpan::new_primary_with_span(mark.message, span)
            } else {
                LabeledSpan::new_with_span(mark.message, span)
            }
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "x = f(1,\ny = 2\n";

    fn unclosed() -> ParseError {
        ParseError::new(
            SyntaxErrorKind::Unclosed {
                open: '(',
                close: ')',
                opened_at: 5,
            },
            (9, 1),
            SOURCE,
        )
    }

    #[test]
    fn with_source_renames_the_file() {
        let error = unclosed().with_source("kernel.py", SOURCE);
        assert_eq!(error.file_name(), "kernel.py");
        assert_eq!(error.span().offset(), 9);
    }

    #[test]
    fn unclosed_bracket_points_at_both_ends() {
        let error = unclosed();
        let labels: Vec<_> = Diagnostic::labels(&error).unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].offset(), 5);
        assert!(labels[1].primary());
        assert_eq!(
            Diagnostic::code(&error).map(|code| code.to_string()),
            Some("syntax::unclosed".to_string())
        );

        let diagnostic = error.to_codespan(0usize);
        assert_eq!(diagnostic.labels.len(), 2);
        assert_eq!(diagnostic.notes, vec!["add the matching `)`".to_string()]);
    }

    #[test]
    fn short_form_names_file_line_and_column() {
        let error = ParseError::new(
            SyntaxErrorKind::Missing {
                expected: ":".to_string(),
                found: "pass".to_string(),
            },
            (7, 1),
            "def f()\n    pass\n",
        )
        .with_source("kernel.py", "def f()\n    pass\n");

        let rendered = error.render_short().unwrap();
        assert_eq!(
            rendered,
            "kernel.py:1:8: error[syntax::missing]: expected `:`, found `pass`\n"
        );
    }

    #[test]
    fn aborted_parse_has_no_labels() {
        let error = ParseError::new(
            SyntaxErrorKind::Aborted {
                reason: "cancelled".to_string(),
            },
            (0, 0),
            "",
        );
        assert!(Diagnostic::labels(&error).is_none());
        assert_eq!(error.to_string(), "the parser gave up: cancelled");
    }
}
