//! Expressions and names

use crate::intrinsic::IntrinsicCall;
use crate::meta::VariableMeta;
use crate::{MalformedNode, NodeKind};
use derive_more::Display;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Float literal compared and hashed by bit pattern
#[derive(Copy, Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct FloatLiteral(f64);

impl FloatLiteral {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatLiteral {}

impl Hash for FloatLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for FloatLiteral {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Unqualified identifier
#[derive(Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[display("{name}")]
pub struct Symbol {
    /// Identifier text
    pub name: String,
    /// Type and shape, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VariableMeta>,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: None,
        }
    }

    pub fn with_meta(name: impl Into<String>, meta: VariableMeta) -> Self {
        Self {
            name: name.into(),
            meta: Some(meta),
        }
    }

    /// Whether this symbol is known to hold an array
    pub fn is_array(&self) -> bool {
        self.meta.is_some_and(|meta| !meta.is_scalar())
    }
}

/// Qualified access chain such as `numpy.linalg.norm`
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DottedName {
    parts: Vec<String>,
}

impl DottedName {
    /// Builds a dotted name from two or more non-empty parts
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Result<Self, MalformedNode> {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.len() < 2 {
            return Err(MalformedNode::ShortDottedName { found: parts.len() });
        }
        check_parts(&parts)?;
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Leading module or object name
    pub fn head(&self) -> &str {
        &self.parts[0]
    }

    /// Final attribute name
    pub fn last(&self) -> &str {
        &self.parts[self.parts.len() - 1]
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.parts.join("."))
    }
}

fn check_parts(parts: &[String]) -> Result<(), MalformedNode> {
    match parts.iter().find(|part| part.is_empty() || part.contains('.')) {
        Some(part) => Err(MalformedNode::InvalidNamePart { part: part.clone() }),
        None => Ok(()),
    }
}

/// A callee or import path: either a bare symbol or a dotted chain
#[derive(Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Name {
    /// Single identifier
    Symbol(Symbol),
    /// Qualified chain
    Dotted(DottedName),
}

impl Name {
    /// A name with one part is a symbol, longer ones are dotted
    pub fn from_parts<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Result<Self, MalformedNode> {
        let mut parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        match parts.len() {
            0 => Err(MalformedNode::EmptyName),
            1 => {
                check_parts(&parts)?;
                Ok(Self::Symbol(Symbol::new(parts.remove(0))))
            }
            _ => DottedName::new(parts).map(Self::Dotted),
        }
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    /// First path segment, e.g. `numpy` for `numpy.linalg`
    pub fn head(&self) -> &str {
        match self {
            Self::Symbol(symbol) => &symbol.name,
            Self::Dotted(dotted) => dotted.head(),
        }
    }

    /// Last path segment, the name bound by an import
    pub fn last(&self) -> &str {
        match self {
            Self::Symbol(symbol) => &symbol.name,
            Self::Dotted(dotted) => dotted.last(),
        }
    }
}

impl From<Name> for Expr {
    fn from(name: Name) -> Self {
        match name {
            Name::Symbol(symbol) => Self::Symbol(symbol),
            Name::Dotted(dotted) => Self::DottedName(dotted),
        }
    }
}

/// Binary operators
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,
    #[display("**")]
    Pow,
    #[display("and")]
    And,
    #[display("or")]
    Or,
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Arithmetic operators, the ones allowed in augmented assignment
    pub fn is_arithmetic(self) -> bool {
        !self.is_comparison() && !self.is_boolean()
    }
}

/// Unary operators
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    #[display("-")]
    Neg,
    #[display("not")]
    Not,
}

/// Expression nodes
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Expr {
    Integer(i64),
    Float(FloatLiteral),
    /// Imaginary literal such as `2j`, stored as its imaginary part
    Complex(FloatLiteral),
    Boolean(bool),
    /// String value with escapes already decoded
    String(String),
    /// The absence value, `None`
    Nil,
    Symbol(Symbol),
    DottedName(DottedName),
    Tuple(Vec<Expr>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    FunctionCall {
        callee: Name,
        args: Vec<Expr>,
    },
    Range {
        start: Box<Expr>,
        stop: Box<Expr>,
        step: Box<Expr>,
    },
    Indexed(Indexed),
    Slice {
        start: Option<Box<Expr>>,
        stop: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    Intrinsic(IntrinsicCall),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    pub fn float(value: f64) -> Self {
        Self::Float(FloatLiteral::new(value))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(callee: Name, args: Vec<Self>) -> Self {
        Self::FunctionCall { callee, args }
    }

    pub fn range(start: Self, stop: Self, step: Self) -> Self {
        Self::Range {
            start: Box::new(start),
            stop: Box::new(stop),
            step: Box::new(step),
        }
    }

    /// Subscript of `base`, see [`Indexed::new`]
    pub fn indexed(base: Self, indices: Vec<Self>) -> Result<Self, MalformedNode> {
        Indexed::new(base, indices).map(Self::Indexed)
    }

    pub fn slice(start: Option<Self>, stop: Option<Self>, step: Option<Self>) -> Self {
        Self::Slice {
            start: start.map(Box::new),
            stop: stop.map(Box::new),
            step: step.map(Box::new),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Integer(_) => NodeKind::Integer,
            Self::Float(_) => NodeKind::Float,
            Self::Complex(_) => NodeKind::Complex,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::String(_) => NodeKind::String,
            Self::Nil => NodeKind::Nil,
            Self::Symbol(_) => NodeKind::Symbol,
            Self::DottedName(_) => NodeKind::DottedName,
            Self::Tuple(_) => NodeKind::Tuple,
            Self::BinaryOp { .. } => NodeKind::BinaryOp,
            Self::UnaryOp { .. } => NodeKind::UnaryOp,
            Self::FunctionCall { .. } => NodeKind::FunctionCall,
            Self::Range { .. } => NodeKind::Range,
            Self::Indexed(_) => NodeKind::Indexed,
            Self::Slice { .. } => NodeKind::Slice,
            Self::Intrinsic(_) => NodeKind::Intrinsic,
        }
    }

    /// Integer, float or complex literal
    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_) | Self::Complex(_))
    }
}

/// Subscript access `base[i, j, ...]` with at least one index
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Indexed {
    base: Box<Expr>,
    indices: Vec<Expr>,
}

impl Indexed {
    pub fn new(base: Expr, indices: Vec<Expr>) -> Result<Self, MalformedNode> {
        if indices.is_empty() {
            return Err(MalformedNode::EmptyIndices);
        }
        Ok(Self {
            base: Box::new(base),
            indices,
        })
    }

    pub fn base(&self) -> &Expr {
        &self.base
    }

    pub fn indices(&self) -> &[Expr] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn dotted_name_needs_two_parts() {
        assert_eq!(
            DottedName::new(["numpy"]),
            Err(MalformedNode::ShortDottedName { found: 1 })
        );
        let name = DottedName::new(["numpy", "linalg", "norm"]).unwrap();
        assert_eq!(name.to_string(), "numpy.linalg.norm");
        assert_eq!(name.head(), "numpy");
        assert_eq!(name.last(), "norm");
    }

    #[test]
    fn dotted_name_rejects_empty_parts() {
        assert!(matches!(
            DottedName::new(["a", ""]),
            Err(MalformedNode::InvalidNamePart { .. })
        ));
        assert!(matches!(
            Name::from_parts(["a.b"]),
            Err(MalformedNode::InvalidNamePart { .. })
        ));
    }

    #[test]
    fn single_part_name_is_a_symbol() {
        assert_eq!(Name::from_parts(["x"]), Ok(Name::symbol("x")));
        assert_eq!(Name::from_parts(Vec::<String>::new()), Err(MalformedNode::EmptyName));
        assert!(matches!(Name::from_parts(["a", "b"]), Ok(Name::Dotted(_))));
    }

    #[test]
    fn structural_equality_and_hash() {
        let build = || {
            Expr::binary(
                BinaryOperator::Add,
                Expr::symbol("a"),
                Expr::float(0.5),
            )
        };
        let mut seen = FxHashSet::default();
        seen.insert(build());
        assert!(seen.contains(&build()));
        assert_ne!(build(), Expr::binary(BinaryOperator::Sub, Expr::symbol("a"), Expr::float(0.5)));
    }

    #[test]
    fn float_literal_compares_by_bits() {
        assert_eq!(FloatLiteral::new(f64::NAN), FloatLiteral::new(f64::NAN));
        assert_ne!(FloatLiteral::new(0.0), FloatLiteral::new(-0.0));
    }

    #[test]
    fn empty_subscript_is_malformed() {
        assert_eq!(
            Expr::indexed(Expr::symbol("a"), Vec::new()),
            Err(MalformedNode::EmptyIndices)
        );
    }

    #[test]
    fn operator_classes() {
        assert!(BinaryOperator::Le.is_comparison());
        assert!(BinaryOperator::Or.is_boolean());
        assert!(BinaryOperator::Pow.is_arithmetic());
        assert_eq!(BinaryOperator::Pow.to_string(), "**");
    }
}
