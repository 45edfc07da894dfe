//! Construction errors for AST nodes

use crate::NodeKind;
use thiserror::Error;

/// A node constructor was given children that violate its invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedNode {
    /// A child slot holds a node of the wrong kind
    #[error("{node} expects a {expected} child, found {found}")]
    WrongChildKind {
        /// Node being constructed
        node: NodeKind,
        /// Kind the slot accepts
        expected: NodeKind,
        /// Kind that was supplied
        found: NodeKind,
    },

    /// An intrinsic was applied to an unsupported number of arguments
    #[error("`{function}` takes {expected} argument(s), found {found}")]
    Arity {
        /// Intrinsic name
        function: &'static str,
        /// Accepted argument counts, e.g. `1..=3`
        expected: String,
        /// Supplied argument count
        found: usize,
    },

    /// A dotted name needs at least two parts
    #[error("a dotted name needs at least two parts, found {found}")]
    ShortDottedName {
        /// Supplied part count
        found: usize,
    },

    /// A name with no parts at all
    #[error("a name needs at least one part")]
    EmptyName,

    /// A name part is empty or contains a dot
    #[error("invalid name part `{part}`")]
    InvalidNamePart {
        /// The offending part
        part: String,
    },

    /// A conditional without branches
    #[error("a conditional needs at least one branch")]
    EmptyConditional,

    /// The always-true branch is not the last one
    #[error("the always-true branch must be last, found it at {position} of {branches}")]
    MisplacedElse {
        /// Zero based index of the always-true branch
        position: usize,
        /// Total number of branches
        branches: usize,
    },

    /// An import statement without targets
    #[error("an import needs at least one target")]
    EmptyImport,

    /// A subscript without indices
    #[error("an indexed access needs at least one index")]
    EmptyIndices,

    /// A loop target that is not a symbol or a tuple of symbols
    #[error("a loop target must be a symbol or a tuple of symbols, found {found}")]
    InvalidLoopTarget {
        /// Kind of the supplied target
        found: NodeKind,
    },

    /// An intrinsic that has its own node kind was wrapped as a call
    #[error("`{function}` has a dedicated node and cannot be used as an intrinsic call")]
    DedicatedNode {
        /// Intrinsic name
        function: &'static str,
    },
}
