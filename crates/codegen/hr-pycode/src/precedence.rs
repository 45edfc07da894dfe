//! Operator binding strength, used to decide where parentheses are needed

use hr_ast::{BinaryOperator, Expr, UnaryOperator};

pub(crate) const NOT: u8 = 3;
pub(crate) const COMPARISON: u8 = 4;
pub(crate) const UNARY: u8 = 7;
pub(crate) const POWER: u8 = 8;
pub(crate) const ATOM: u8 = 9;

pub(crate) fn binary(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Eq
        | BinaryOperator::Ne
        | BinaryOperator::Lt
        | BinaryOperator::Le
        | BinaryOperator::Gt
        | BinaryOperator::Ge => COMPARISON,
        BinaryOperator::Add | BinaryOperator::Sub => 5,
        BinaryOperator::Mul | BinaryOperator::Div => 6,
        BinaryOperator::Pow => POWER,
    }
}

pub(crate) fn of(expr: &Expr) -> u8 {
    match expr {
        Expr::BinaryOp { op, .. } => binary(*op),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            ..
        } => NOT,
        Expr::UnaryOp {
            op: UnaryOperator::Neg,
            ..
        } => UNARY,
        // Negative literals print with a leading minus
        Expr::Integer(value) if *value < 0 => UNARY,
        Expr::Float(value) | Expr::Complex(value) if value.value().is_sign_negative() => UNARY,
        _ => ATOM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_literals_bind_like_negation() {
        assert_eq!(of(&Expr::Integer(-1)), UNARY);
        assert_eq!(of(&Expr::float(-0.0)), UNARY);
        assert_eq!(of(&Expr::Integer(1)), ATOM);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert!(binary(BinaryOperator::Mul) > binary(BinaryOperator::Add));
        assert!(binary(BinaryOperator::And) > binary(BinaryOperator::Or));
        assert!(binary(BinaryOperator::Pow) > UNARY);
    }
}
