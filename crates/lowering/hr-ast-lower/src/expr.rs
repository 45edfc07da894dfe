//! Expression lowering

use crate::LowerError;
use crate::escape::{BadEscape, unescape};
use crate::lower::{LoweringContext, required};
use hr_ast::{BinaryOperator, DottedName, Expr, FloatLiteral, Name, UnaryOperator};
use hr_builtins::resolve_call;
use hr_syntax::{SyntaxKind, SyntaxNode};

impl LoweringContext<'_> {
    /// Lower one expression node
    pub fn lower_expr(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        match node.kind {
            SyntaxKind::Identifier => Ok(Expr::symbol(node.text.clone())),
            SyntaxKind::Integer => lower_integer(node, false),
            SyntaxKind::Float => lower_float(node, false),
            SyntaxKind::String => lower_string(node),
            SyntaxKind::True => Ok(Expr::Boolean(true)),
            SyntaxKind::False => Ok(Expr::Boolean(false)),
            SyntaxKind::None => Ok(Expr::Nil),
            SyntaxKind::Attribute => fold_attribute(node).map(Expr::DottedName),
            SyntaxKind::Call => self.lower_call(node),
            SyntaxKind::Subscript => self.lower_subscript(node),
            SyntaxKind::BinaryOperator => self.lower_binary(node, BinaryOperator::is_arithmetic),
            SyntaxKind::BooleanOperator => self.lower_binary(node, BinaryOperator::is_boolean),
            SyntaxKind::ComparisonOperator => self.lower_comparison(node),
            SyntaxKind::UnaryOperator => self.lower_unary(node),
            SyntaxKind::NotOperator => {
                let operand = self.lower_expr(required(node, "argument")?)?;
                Ok(Expr::unary(UnaryOperator::Not, operand))
            }
            SyntaxKind::ParenthesizedExpression => {
                let inner = node
                    .named_children()
                    .next()
                    .ok_or_else(|| LowerError::unsupported(node))?;
                self.lower_expr(inner)
            }
            SyntaxKind::List | SyntaxKind::Tuple | SyntaxKind::ExpressionList => {
                let items = node
                    .named_children()
                    .map(|item| self.lower_expr(item))
                    .collect::<Result<_, _>>()?;
                Ok(Expr::Tuple(items))
            }
            _ => Err(LowerError::unsupported(node)),
        }
    }

    /// Name in callee or decorator position
    pub(crate) fn lower_callee(&mut self, node: &SyntaxNode) -> Result<Name, LowerError> {
        match node.kind {
            SyntaxKind::Identifier => Ok(Name::symbol(node.text.clone())),
            SyntaxKind::Attribute => fold_attribute(node).map(Name::Dotted),
            _ => Err(LowerError::unsupported_at(
                format!("call of {}", node.kind),
                node.span,
            )),
        }
    }

    /// Positional arguments of a call
    pub(crate) fn lower_arguments(&mut self, node: &SyntaxNode) -> Result<Vec<Expr>, LowerError> {
        if node.kind != SyntaxKind::ArgumentList {
            return Err(LowerError::unsupported(node));
        }
        node.named_children()
            .map(|argument| self.lower_expr(argument))
            .collect()
    }

    /// Calls of `range` become [`Expr::Range`], everything else stays generic
    fn lower_call(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        let callee = self.lower_callee(required(node, "function")?)?;
        let args = self.lower_arguments(required(node, "arguments")?)?;

        let is_range = matches!(&callee, Name::Symbol(symbol) if symbol.name == "range");
        if is_range {
            if let Some(range) = resolve_call("range", &args) {
                return Ok(range);
            }
        }

        Ok(Expr::call(callee, args))
    }

    fn lower_subscript(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        let base = self.lower_expr(required(node, "value")?)?;
        let indices = node
            .children_by_field("subscript")
            .map(|index| match index.kind {
                SyntaxKind::Slice => self.lower_slice(index),
                _ => self.lower_expr(index),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expr::indexed(base, indices)?)
    }

    /// `start:stop:step` where every part is optional
    fn lower_slice(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        let mut parts: [Option<Expr>; 3] = [None, None, None];
        let mut position = 0;

        for child in &node.children {
            if child.kind == SyntaxKind::Token {
                if child.text == ":" {
                    position += 1;
                }
                continue;
            }
            let slot = parts
                .get_mut(position)
                .ok_or_else(|| LowerError::unsupported(node))?;
            *slot = Some(self.lower_expr(child)?);
        }

        let [start, stop, step] = parts;
        Ok(Expr::slice(start, stop, step))
    }

    fn lower_binary(
        &mut self,
        node: &SyntaxNode,
        accepts: fn(BinaryOperator) -> bool,
    ) -> Result<Expr, LowerError> {
        let operator = required(node, "operator")?;
        let op = binary_operator(&operator.text)
            .filter(|op| accepts(*op))
            .ok_or_else(|| LowerError::unknown_operator(operator))?;

        let left = self.lower_expr(required(node, "left")?)?;
        let right = self.lower_expr(required(node, "right")?)?;
        Ok(Expr::binary(op, left, right))
    }

    /// `a < b < c` becomes `a < b and b < c`
    fn lower_comparison(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        let operands = node
            .named_children()
            .map(|operand| self.lower_expr(operand))
            .collect::<Result<Vec<_>, _>>()?;
        let operators = node
            .tokens()
            .map(|token| {
                binary_operator(&token.text)
                    .filter(|op| op.is_comparison())
                    .ok_or_else(|| LowerError::unknown_operator(token))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if operators.is_empty() || operands.len() != operators.len() + 1 {
            return Err(LowerError::unsupported(node));
        }

        let comparisons = operators
            .iter()
            .zip(operands.windows(2))
            .map(|(op, pair)| Expr::binary(*op, pair[0].clone(), pair[1].clone()));

        comparisons
            .reduce(|chain, next| Expr::binary(BinaryOperator::And, chain, next))
            .ok_or_else(|| LowerError::unsupported(node))
    }

    /// Negation of a numeric literal folds into the literal
    fn lower_unary(&mut self, node: &SyntaxNode) -> Result<Expr, LowerError> {
        let operator = required(node, "operator")?;
        let argument = required(node, "argument")?;

        if operator.text != "-" {
            return Err(LowerError::unknown_operator(operator));
        }

        match argument.kind {
            SyntaxKind::Integer => lower_integer(argument, true),
            SyntaxKind::Float => lower_float(argument, true),
            _ => Ok(Expr::unary(UnaryOperator::Neg, self.lower_expr(argument)?)),
        }
    }
}

/// Operator for a Python operator token
pub(crate) fn binary_operator(token: &str) -> Option<BinaryOperator> {
    let op = match token {
        "+" => BinaryOperator::Add,
        "-" => BinaryOperator::Sub,
        "*" => BinaryOperator::Mul,
        "/" => BinaryOperator::Div,
        "**" => BinaryOperator::Pow,
        "and" => BinaryOperator::And,
        "or" => BinaryOperator::Or,
        "==" => BinaryOperator::Eq,
        "!=" | "<>" => BinaryOperator::Ne,
        "<" => BinaryOperator::Lt,
        "<=" => BinaryOperator::Le,
        ">" => BinaryOperator::Gt,
        ">=" => BinaryOperator::Ge,
        _ => return None,
    };
    Some(op)
}

/// Fold `a.b.c` into one dotted name by walking the `object` links
fn fold_attribute(node: &SyntaxNode) -> Result<DottedName, LowerError> {
    let mut parts = Vec::new();
    let mut current = node;

    while current.kind == SyntaxKind::Attribute {
        parts.push(required(current, "attribute")?.text.clone());
        current = required(current, "object")?;
    }

    if current.kind != SyntaxKind::Identifier {
        return Err(LowerError::unsupported_at(
            format!("attribute of {}", current.kind),
            current.span,
        ));
    }

    parts.push(current.text.clone());
    parts.reverse();
    Ok(DottedName::new(parts)?)
}

/// Numeric literal text without separators, plus whether it is imaginary
fn numeric_text(node: &SyntaxNode) -> (String, bool) {
    let text: String = node.text.chars().filter(|&c| c != '_').collect();
    match text.strip_suffix(['j', 'J']) {
        Some(real) => (real.to_string(), true),
        None => (text, false),
    }
}

fn lower_integer(node: &SyntaxNode, negate: bool) -> Result<Expr, LowerError> {
    let (text, imaginary) = numeric_text(node);
    if imaginary {
        return imaginary_literal(node, &text, negate);
    }

    let text = text.trim_end_matches(['l', 'L']);
    let lower = text.to_ascii_lowercase();
    let parsed = if let Some(digits) = lower.strip_prefix("0x") {
        i128::from_str_radix(digits, 16)
    } else if let Some(digits) = lower.strip_prefix("0o") {
        i128::from_str_radix(digits, 8)
    } else if let Some(digits) = lower.strip_prefix("0b") {
        i128::from_str_radix(digits, 2)
    } else {
        lower.parse::<i128>()
    };

    let magnitude = parsed.map_err(|_| LowerError::invalid_literal(node))?;
    let value = if negate { -magnitude } else { magnitude };
    i64::try_from(value)
        .map(Expr::Integer)
        .map_err(|_| LowerError::invalid_literal(node))
}

fn lower_float(node: &SyntaxNode, negate: bool) -> Result<Expr, LowerError> {
    let (text, imaginary) = numeric_text(node);
    if imaginary {
        return imaginary_literal(node, &text, negate);
    }

    let value = parse_float(node, &text)?;
    Ok(Expr::float(if negate { -value } else { value }))
}

fn imaginary_literal(node: &SyntaxNode, text: &str, negate: bool) -> Result<Expr, LowerError> {
    let value = parse_float(node, text)?;
    Ok(Expr::Complex(FloatLiteral::new(if negate { -value } else { value })))
}

fn parse_float(node: &SyntaxNode, text: &str) -> Result<f64, LowerError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LowerError::invalid_literal(node))
}

/// String value with its escapes decoded
fn lower_string(node: &SyntaxNode) -> Result<Expr, LowerError> {
    let text = node.text.as_str();
    let quote_start = text
        .find(['"', '\''])
        .ok_or_else(|| LowerError::invalid_literal(node))?;

    let prefix = &text[..quote_start];
    if !matches!(prefix, "" | "u" | "U") {
        return Err(LowerError::unsupported_at(
            format!("string prefix `{prefix}`"),
            node.span,
        ));
    }

    let quoted = &text[quote_start..];
    let content = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find_map(|quote| {
            quoted
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .ok_or_else(|| LowerError::invalid_literal(node))?;

    match unescape(content) {
        Ok(value) => Ok(Expr::string(value)),
        Err(BadEscape::Named) => Err(LowerError::unsupported_at(
            "named unicode escape",
            node.span,
        )),
        Err(BadEscape::Malformed) => Err(LowerError::invalid_literal(node)),
    }
}
