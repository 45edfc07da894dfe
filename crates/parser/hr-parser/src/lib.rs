//! Parser infrastructure for Heron
//!
//! This crate parses Python sources with tree-sitter and reports syntax
//! errors as rich diagnostics. [`PythonFrontend`] packages the parser as the
//! [`Frontend`] handle used by the lowering engine.

pub mod error;

pub use error::{ParseError, SyntaxErrorKind};

use hr_syntax::{Frontend, FrontendError, Language, SyntaxNode};
use lang_python::PythonLanguage;
use miette::SourceSpan;

/// Result of parsing a source file
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Converted syntax tree
    pub syntax: Option<SyntaxNode>,
    /// Parse errors with detailed diagnostics
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Whether the source parsed without errors
    pub fn is_ok(&self) -> bool {
        self.syntax.is_some() && self.errors.is_empty()
    }
}

/// Parse Python source code using the language adapter
pub fn parse_source(source: &str) -> ParseResult {
    let language = PythonLanguage::new();

    match language.parse(source) {
        Ok(tree) => {
            let mut errors = Vec::new();

            if tree.root_node().has_error() {
                collect_errors(&tree.root_node(), source, &mut errors);
            }

            let syntax = language.lower_node(&tree.root_node(), source);
            tracing::trace!(errors = errors.len(), "parsed source");

            ParseResult {
                syntax: Some(syntax),
                errors,
            }
        }
        Err(err) => ParseResult {
            syntax: None,
            errors: vec![ParseError::new(
                SyntaxErrorKind::Aborted {
                    reason: err.to_string(),
                },
                (0, 0),
                source,
            )],
        },
    }
}

/// The Python grammar as a [`Frontend`] handle
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFrontend;

impl PythonFrontend {
    /// Creates a new front end
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for PythonFrontend {
    fn parse_source(&self, source: &str) -> Result<SyntaxNode, FrontendError> {
        let ParseResult { syntax, errors } = parse_source(source);

        if let Some(first) = errors.first() {
            return Err(FrontendError::Syntax {
                first: first.to_string(),
                count: errors.len(),
            });
        }

        syntax.ok_or_else(|| FrontendError::Failed("no syntax tree produced".to_string()))
    }

    fn parse_directive(&self, text: &str) -> Result<SyntaxNode, FrontendError> {
        lang_python::parse_directive(text)
    }
}

fn missing_token(source: &str, pos: usize, expected: &str) -> ParseError {
    let found = source
        .get(pos..)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("end of file")
        .to_string();

    ParseError::new(
        SyntaxErrorKind::Missing {
            expected: expected.to_string(),
            found,
        },
        (pos, 1),
        source,
    )
}

fn unclosed(source: &str, open: char, opened_at: usize, span: SourceSpan) -> ParseError {
    let close = match open {
        '[' => ']',
        '{' => '}',
        _ => ')',
    };
    ParseError::new(
        SyntaxErrorKind::Unclosed {
            open,
            close,
            opened_at,
        },
        span,
        source,
    )
}

/// Walk the tree collecting one error per ERROR or MISSING node
fn collect_errors(node: &tree_sitter::Node, source: &str, errors: &mut Vec<ParseError>) {
    if node.is_error() {
        let span: SourceSpan = (node.start_byte(), node.end_byte() - node.start_byte()).into();
        errors.push(classify_error(node, source, span));
    } else if node.is_missing() {
        let pos = node.start_byte();
        let expected = node.kind();

        let open = match expected {
            ")" => Some('('),
            "]" => Some('['),
            "}" => Some('{'),
            _ => None,
        };

        let error = open
            .zip(node.parent())
            .and_then(|(open, parent)| {
                find_opening_delimiter(&parent, source, open)
                    .map(|opened_at| unclosed(source, open, opened_at, (pos, 1).into()))
            })
            .unwrap_or_else(|| missing_token(source, pos, expected));

        errors.push(error);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(&child, source, errors);
    }
}

/// Name the error after the statement or bracket pair that encloses it
fn classify_error(error_node: &tree_sitter::Node, source: &str, span: SourceSpan) -> ParseError {
    let unexpected = || {
        let text = &source[error_node.start_byte()..error_node.end_byte()];
        let token = text.lines().next().unwrap_or(text).to_string();
        ParseError::new(SyntaxErrorKind::Unexpected { token }, span, source)
    };
    let malformed = |construct, hint| {
        ParseError::new(SyntaxErrorKind::Malformed { construct, hint }, span, source)
    };

    let Some(parent) = error_node.parent() else {
        return unexpected();
    };

    let bracket = match parent.kind() {
        "parameters" | "argument_list" | "parenthesized_expression" | "tuple" => Some('('),
        "subscript" | "list" => Some('['),
        _ => None,
    };
    if let Some(open) = bracket {
        return find_opening_delimiter(&parent, source, open)
            .map_or_else(unexpected, |opened_at| unclosed(source, open, opened_at, span));
    }

    match parent.kind() {
        "block" => malformed(
            "indented block",
            "a block holds statements indented deeper than the line that opens it",
        ),
        "function_definition" => malformed(
            "function definition",
            "function definitions have the form: `def name(params):` followed by an indented body",
        ),
        "class_definition" => malformed(
            "class definition",
            "class definitions have the form: `class Name:` followed by an indented body",
        ),
        "if_statement" | "elif_clause" | "while_statement" | "for_statement" => malformed(
            "compound statement",
            "the header line of a compound statement ends with `:`",
        ),
        _ => unexpected(),
    }
}

/// Find the position of an opening delimiter in a node
fn find_opening_delimiter(node: &tree_sitter::Node, source: &str, delimiter: char) -> Option<usize> {
    let start = node.start_byte();
    source[start..node.end_byte()]
        .find(delimiter)
        .map(|idx| start + idx)
}
