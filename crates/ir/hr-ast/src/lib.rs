//! Abstract syntax tree for Heron
//!
//! The AST is a closed set of immutable, structurally compared values. Nodes
//! that carry invariants (dotted names, conditionals, defaulted parameters,
//! intrinsic calls, imports) keep their fields private and check them in
//! their constructors, failing with [`MalformedNode`].
//!
//! Both the lowering engine and the printers traverse the tree through the
//! [`Visitor`] trait, which dispatches on the variant tag.

pub mod def;
pub mod error;
pub mod expr;
pub mod foreign;
pub mod intrinsic;
pub mod meta;
pub mod stmt;
pub mod visitor;

pub use def::{Argument, ClassDef, FunctionDef, FunctionKind, Parameter, ValuedArgument};
pub use error::MalformedNode;
pub use expr::{
    BinaryOperator, DottedName, Expr, FloatLiteral, Indexed, Name, Symbol, UnaryOperator,
};
pub use foreign::{ForeignFunction, ForeignFunctionInterface, ForeignModule, ForeignModuleInterface};
pub use intrinsic::{IntrinsicCall, IntrinsicFunction, MathFunction};
pub use meta::{DataType, VariableMeta};
pub use stmt::{
    Branch, Condition, Conditional, ForLoop, Import, ImportTarget, Pragma, PragmaFamily, Stmt,
};
pub use visitor::Visitor;

use derive_more::Display;
use serde::Serialize;
use std::sync::Arc;

/// Variant tag of every node kind
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
pub enum NodeKind {
    // Expressions
    #[display("Integer")]
    Integer,
    #[display("Float")]
    Float,
    #[display("Complex")]
    Complex,
    #[display("Boolean")]
    Boolean,
    #[display("String")]
    String,
    #[display("Nil")]
    Nil,
    #[display("Symbol")]
    Symbol,
    #[display("DottedName")]
    DottedName,
    #[display("Tuple")]
    Tuple,
    #[display("BinaryOp")]
    BinaryOp,
    #[display("UnaryOp")]
    UnaryOp,
    #[display("FunctionCall")]
    FunctionCall,
    #[display("Range")]
    Range,
    #[display("Indexed")]
    Indexed,
    #[display("Slice")]
    Slice,
    #[display("Intrinsic")]
    Intrinsic,

    // Statements
    #[display("Assign")]
    Assign,
    #[display("AugAssign")]
    AugAssign,
    #[display("Return")]
    Return,
    #[display("Print")]
    Print,
    #[display("Comment")]
    Comment,
    #[display("Pragma")]
    Pragma,
    #[display("EmptyLine")]
    EmptyLine,
    #[display("Pass")]
    Pass,
    #[display("Import")]
    Import,
    #[display("If")]
    If,
    #[display("For")]
    For,
    #[display("While")]
    While,
    #[display("FunctionDef")]
    FunctionDef,
    #[display("ClassDef")]
    ClassDef,
    #[display("ExprStmt")]
    ExprStmt,

    // Parameters and containers
    #[display("Argument")]
    Argument,
    #[display("ValuedArgument")]
    ValuedArgument,
    #[display("Block")]
    Block,

    // Foreign interop
    #[display("ForeignFunction")]
    ForeignFunction,
    #[display("ForeignModule")]
    ForeignModule,
    #[display("ForeignFunctionInterface")]
    ForeignFunctionInterface,
    #[display("ForeignModuleInterface")]
    ForeignModuleInterface,
}

/// Any AST node
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Expr(Expr),
    Stmt(Stmt),
    Argument(Argument),
    ValuedArgument(ValuedArgument),
    /// Statement sequence such as a module body
    Block(Vec<Stmt>),
    ForeignFunction(Arc<ForeignFunction>),
    ForeignModule(Arc<ForeignModule>),
    ForeignFunctionInterface(ForeignFunctionInterface),
    ForeignModuleInterface(ForeignModuleInterface),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Expr(expr) => expr.kind(),
            Self::Stmt(stmt) => stmt.kind(),
            Self::Argument(_) => NodeKind::Argument,
            Self::ValuedArgument(_) => NodeKind::ValuedArgument,
            Self::Block(_) => NodeKind::Block,
            Self::ForeignFunction(_) => NodeKind::ForeignFunction,
            Self::ForeignModule(_) => NodeKind::ForeignModule,
            Self::ForeignFunctionInterface(_) => NodeKind::ForeignFunctionInterface,
            Self::ForeignModuleInterface(_) => NodeKind::ForeignModuleInterface,
        }
    }
}

impl From<Expr> for Node {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<Stmt> for Node {
    fn from(stmt: Stmt) -> Self {
        Self::Stmt(stmt)
    }
}

impl From<Vec<Stmt>> for Node {
    fn from(block: Vec<Stmt>) -> Self {
        Self::Block(block)
    }
}

impl From<FunctionDef> for Node {
    fn from(def: FunctionDef) -> Self {
        Self::Stmt(Stmt::FunctionDef(def))
    }
}

impl From<ForeignFunction> for Node {
    fn from(function: ForeignFunction) -> Self {
        Self::ForeignFunction(Arc::new(function))
    }
}

impl From<ForeignFunctionInterface> for Node {
    fn from(interface: ForeignFunctionInterface) -> Self {
        Self::ForeignFunctionInterface(interface)
    }
}

impl From<ForeignModuleInterface> for Node {
    fn from(interface: ForeignModuleInterface) -> Self {
        Self::ForeignModuleInterface(interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_follows_the_wrapped_value() {
        assert_eq!(Node::from(Expr::Nil).kind(), NodeKind::Nil);
        assert_eq!(Node::from(Stmt::Pass).kind(), NodeKind::Pass);
        assert_eq!(Node::Block(Vec::new()).kind(), NodeKind::Block);
        assert_eq!(NodeKind::ForeignModuleInterface.to_string(), "ForeignModuleInterface");
    }

    #[test]
    fn serializes_for_dumps() {
        let stmt = Stmt::Assign {
            lhs: Expr::symbol("x"),
            rhs: Expr::Integer(3),
        };
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "assign");
        assert_eq!(json["rhs"]["value"], 3);
        assert_eq!(json["lhs"]["value"]["name"], "x");
    }

    #[test]
    fn wrapped_nodes_serialize_flat() {
        let stmt = Stmt::for_loop(
            Expr::symbol("i"),
            Expr::indexed(Expr::symbol("rows"), vec![Expr::Integer(0)]).unwrap(),
            vec![Stmt::Pass],
        )
        .unwrap();
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "for");
        assert_eq!(json["target"]["value"]["name"], "i");
        assert_eq!(json["iterable"]["kind"], "indexed");
        assert_eq!(json["iterable"]["value"]["indices"][0]["value"], 0);
        assert_eq!(json["body"][0]["kind"], "pass");
    }
}
