//! Printer errors

#![allow(unused_assignments)]

use hr_ast::NodeKind;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while rendering an AST
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum PrintError {
    /// The node kind has no rendering in this position
    #[error("cannot print a {0} node")]
    #[diagnostic(code(print::unprintable_node))]
    UnprintableNode(NodeKind),

    /// NaN and infinities have no literal form
    #[error("float literal `{0}` has no source form")]
    #[diagnostic(code(print::non_finite_float))]
    NonFiniteFloat(String),

    /// A wrapper header needs the type of every argument
    #[error("argument `{argument}` has no type information")]
    #[diagnostic(
        code(print::missing_type_info),
        help("foreign wrappers can only be generated after type analysis")
    )]
    MissingTypeInfo {
        /// Argument or result name
        argument: String,
    },
}
