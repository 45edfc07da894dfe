//! Builtin operations that get their own node instead of a generic call

use crate::{Expr, MalformedNode};
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Elementary math functions
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MathFunction {
    Abs,
    Sqrt,
    Sin,
    Cos,
    Exp,
    Log,
    Csc,
    Sec,
    Tan,
    Cot,
    Asin,
    Acsc,
    Acos,
    Asec,
    Atan,
    Acot,
    Atan2,
}

impl MathFunction {
    pub const ALL: [Self; 17] = [
        Self::Abs,
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Exp,
        Self::Log,
        Self::Csc,
        Self::Sec,
        Self::Tan,
        Self::Cot,
        Self::Asin,
        Self::Acsc,
        Self::Acos,
        Self::Asec,
        Self::Atan,
        Self::Acot,
        Self::Atan2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Csc => "csc",
            Self::Sec => "sec",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Asin => "asin",
            Self::Acsc => "acsc",
            Self::Acos => "acos",
            Self::Asec => "asec",
            Self::Atan => "atan",
            Self::Acot => "acot",
            Self::Atan2 => "atan2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }
}

/// Intrinsic operations known to the translator
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntrinsicFunction {
    Range,
    Array,
    Shape,
    Int,
    Len,
    Sum,
    Zeros,
    Ones,
    Rand,
    Math(MathFunction),
}

impl IntrinsicFunction {
    /// Source-level name
    pub fn name(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Array => "array",
            Self::Shape => "shape",
            Self::Int => "int",
            Self::Len => "len",
            Self::Sum => "sum",
            Self::Zeros => "zeros",
            Self::Ones => "ones",
            Self::Rand => "rand",
            Self::Math(function) => function.name(),
        }
    }

    /// Accepted argument counts
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Range => 1..=3,
            Self::Shape | Self::Zeros | Self::Ones | Self::Sum => 1..=2,
            Self::Array | Self::Int | Self::Len => 1..=1,
            Self::Rand => 0..=2,
            Self::Math(MathFunction::Atan2) => 2..=2,
            Self::Math(_) => 1..=1,
        }
    }

    fn check_arity(self, found: usize) -> Result<(), MalformedNode> {
        let arity = self.arity();
        if arity.contains(&found) {
            Ok(())
        } else {
            Err(MalformedNode::Arity {
                function: self.name(),
                expected: format!("{}..={}", arity.start(), arity.end()),
                found,
            })
        }
    }

    /// Builds the specialised node for a call with `args`
    ///
    /// `range(stop)` and `range(start, stop)` are completed with a zero start
    /// and a unit step.
    pub fn construct(self, args: Vec<Expr>) -> Result<Expr, MalformedNode> {
        self.check_arity(args.len())?;

        if self != Self::Range {
            return IntrinsicCall::new(self, args).map(Expr::Intrinsic);
        }

        let mut args = args.into_iter();
        let (start, stop, step) = match (args.next(), args.next(), args.next()) {
            (Some(stop), None, None) => (Expr::Integer(0), stop, Expr::Integer(1)),
            (Some(start), Some(stop), None) => (start, stop, Expr::Integer(1)),
            (Some(start), Some(stop), Some(step)) => (start, stop, step),
            _ => unreachable!("arity checked above"),
        };
        Ok(Expr::range(start, stop, step))
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl fmt::Display for IntrinsicFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Application of an intrinsic other than `range`
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct IntrinsicCall {
    function: IntrinsicFunction,
    args: Vec<Expr>,
}

impl IntrinsicCall {
    pub fn new(function: IntrinsicFunction, args: Vec<Expr>) -> Result<Self, MalformedNode> {
        if function == IntrinsicFunction::Range {
            return Err(MalformedNode::DedicatedNode {
                function: function.name(),
            });
        }
        function.check_arity(args.len())?;
        Ok(Self { function, args })
    }

    pub fn function(&self) -> IntrinsicFunction {
        self.function
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_defaults_start_and_step() {
        assert_eq!(
            IntrinsicFunction::Range.construct(vec![Expr::symbol("n")]),
            Ok(Expr::range(Expr::Integer(0), Expr::symbol("n"), Expr::Integer(1)))
        );
        assert_eq!(
            IntrinsicFunction::Range.construct(vec![Expr::Integer(2), Expr::Integer(8)]),
            Ok(Expr::range(Expr::Integer(2), Expr::Integer(8), Expr::Integer(1)))
        );
    }

    #[test]
    fn arity_is_checked() {
        let error = IntrinsicFunction::Len.construct(Vec::new()).unwrap_err();
        assert_eq!(error.to_string(), "`len` takes 1..=1 argument(s), found 0");
        assert!(IntrinsicFunction::Range.construct(vec![Expr::Integer(1); 4]).is_err());
        assert!(IntrinsicFunction::Math(MathFunction::Atan2)
            .construct(vec![Expr::symbol("y")])
            .is_err());
    }

    #[test]
    fn range_is_not_a_plain_call() {
        assert!(matches!(
            IntrinsicCall::new(IntrinsicFunction::Range, vec![Expr::Integer(3)]),
            Err(MalformedNode::DedicatedNode { function: "range" })
        ));
    }

    #[test]
    fn math_names_round_trip() {
        for function in MathFunction::ALL {
            assert_eq!(MathFunction::from_name(function.name()), Some(function));
        }
        assert_eq!(MathFunction::from_name("hypot"), None);
    }

    #[test]
    fn other_intrinsics_wrap_their_arguments() {
        let call = IntrinsicFunction::Shape
            .construct(vec![Expr::symbol("a"), Expr::Integer(0)])
            .unwrap();
        match call {
            Expr::Intrinsic(call) => {
                assert_eq!(call.function(), IntrinsicFunction::Shape);
                assert_eq!(call.args().len(), 2);
            }
            other => panic!("expected an intrinsic call, found {other:?}"),
        }
    }
}
