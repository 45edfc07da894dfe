//! Lowering errors
//!
//! Every error is fatal for the compilation unit being lowered.

#![allow(unused_assignments)]

use hr_ast::MalformedNode;
use hr_span::Span;
use hr_syntax::{FrontendError, SyntaxNode};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while lowering a syntax tree
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum LowerError {
    /// A syntax node kind with no conversion rule
    #[error("unsupported construct `{kind}`")]
    #[diagnostic(
        code(lower::unsupported_construct),
        help("only the numeric Python subset can be translated")
    )]
    UnsupportedConstruct {
        /// What was found
        kind: String,
        /// Source location
        #[label("not supported")]
        span: SourceSpan,
    },

    /// An operator token outside the known set
    #[error("unknown operator `{token}`")]
    #[diagnostic(code(lower::unknown_operator))]
    UnknownOperator {
        /// Operator text
        token: String,
        /// Source location
        #[label("this operator cannot be translated")]
        span: SourceSpan,
    },

    /// A numeric or string literal that cannot be represented
    #[error("invalid literal `{text}`")]
    #[diagnostic(code(lower::invalid_literal))]
    InvalidLiteral {
        /// Literal text
        text: String,
        /// Source location
        #[label("invalid literal")]
        span: SourceSpan,
    },

    /// A node constructor rejected its children
    #[error(transparent)]
    #[diagnostic(code(lower::malformed_node))]
    Malformed(#[from] MalformedNode),

    /// A pragma comment the front end could not parse
    #[error("invalid pragma directive")]
    #[diagnostic(code(lower::directive))]
    Directive {
        /// Front end failure
        #[source]
        source: FrontendError,
        /// Location of the comment
        #[label("in this pragma")]
        span: SourceSpan,
    },
}

impl LowerError {
    pub(crate) fn unsupported(node: &SyntaxNode) -> Self {
        Self::unsupported_at(node.kind.to_string(), node.span)
    }

    pub(crate) fn unsupported_at(kind: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedConstruct {
            kind: kind.into(),
            span: span.into(),
        }
    }

    pub(crate) fn unknown_operator(token: &SyntaxNode) -> Self {
        Self::UnknownOperator {
            token: token.text.clone(),
            span: token.span.into(),
        }
    }

    pub(crate) fn invalid_literal(node: &SyntaxNode) -> Self {
        Self::InvalidLiteral {
            text: node.text.clone(),
            span: node.span.into(),
        }
    }

    /// Source location of the offending node, if known
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Self::UnsupportedConstruct { span, .. }
            | Self::UnknownOperator { span, .. }
            | Self::InvalidLiteral { span, .. }
            | Self::Directive { span, .. } => Some(*span),
            Self::Malformed(_) => None,
        }
    }
}
