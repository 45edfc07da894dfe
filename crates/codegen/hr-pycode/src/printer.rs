//! Python rendering of every AST node kind

use crate::precedence::{self, ATOM, COMPARISON, NOT, POWER, UNARY};
use crate::{PrintError, PrinterSettings};
use hr_ast::{
    Argument, BinaryOperator, ClassDef, Condition, Conditional, DottedName, Expr, FloatLiteral,
    ForeignFunction, ForeignFunctionInterface, ForeignModule, ForeignModuleInterface, FunctionDef,
    Import, IntrinsicCall, IntrinsicFunction, Name, Node, NodeKind, Parameter, Pragma, Stmt,
    Symbol, UnaryOperator, ValuedArgument, Visitor,
};

/// Renders AST nodes as Python source
///
/// Statements are printed at the current nesting level; nested bodies are
/// indented by [`PrinterSettings::indent_width`] spaces per level.
#[derive(Debug, Clone)]
pub struct PythonCodePrinter {
    pub(crate) settings: PrinterSettings,
    level: usize,
}

type PrintResult = Result<String, PrintError>;

impl PythonCodePrinter {
    /// Printer at nesting level zero
    #[must_use]
    pub fn new(settings: PrinterSettings) -> Self {
        Self { settings, level: 0 }
    }

    /// Render a node
    ///
    /// A [`Node::Block`] renders as a module: one statement per line and a
    /// trailing newline.
    pub fn doprint(&mut self, node: &Node) -> PrintResult {
        self.level = 0;
        let text = self.walk_node(node)?;
        tracing::trace!(kind = %node.kind(), bytes = text.len(), "printed node");
        Ok(text)
    }

    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.level * self.settings.indent_width)
    }

    pub(crate) fn print_statements(&mut self, body: &[Stmt]) -> PrintResult {
        let lines = body
            .iter()
            .map(|stmt| self.walk_stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    /// Body one level deeper than the current statement
    ///
    /// A body without a real statement gets a trailing `pass`.
    pub(crate) fn print_block(&mut self, body: &[Stmt]) -> PrintResult {
        self.level += 1;
        let result = self.print_statements(body).map(|text| {
            let has_statement = body
                .iter()
                .any(|stmt| !matches!(stmt, Stmt::Comment { .. } | Stmt::EmptyLine));
            if has_statement {
                text
            } else if body.is_empty() {
                format!("{}pass", self.indent())
            } else {
                format!("{text}\n{}pass", self.indent())
            }
        });
        self.level -= 1;
        result
    }

    pub(crate) fn print_list(&mut self, items: &[Expr]) -> PrintResult {
        let items = items
            .iter()
            .map(|item| self.walk_expr(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items.join(", "))
    }

    /// Tuples in target and return position print without parentheses
    fn print_unparenthesized(&mut self, expr: &Expr) -> PrintResult {
        match expr {
            Expr::Tuple(items) if items.len() > 1 => self.print_list(items),
            _ => self.walk_expr(expr),
        }
    }

    fn print_operand(&mut self, expr: &Expr, parenthesize: bool) -> PrintResult {
        let text = self.walk_expr(expr)?;
        Ok(if parenthesize { format!("({text})") } else { text })
    }

    fn print_index(&mut self, index: &Expr) -> PrintResult {
        let Expr::Slice { start, stop, step } = index else {
            return self.walk_expr(index);
        };

        let mut text = self.print_slice_part(start.as_deref())?;
        text.push(':');
        text.push_str(&self.print_slice_part(stop.as_deref())?);
        if let Some(step) = step {
            text.push(':');
            text.push_str(&self.walk_expr(step)?);
        }
        Ok(text)
    }

    fn print_slice_part(&mut self, part: Option<&Expr>) -> PrintResult {
        part.map_or_else(|| Ok(String::new()), |expr| self.walk_expr(expr))
    }

    pub(crate) fn print_parameter(&mut self, parameter: &Parameter) -> PrintResult {
        match parameter {
            Parameter::Plain(argument) => self.visit_argument(argument),
            Parameter::Valued(valued) => self.visit_valued_argument(valued),
        }
    }
}

/// Python literal for a string value
///
/// Double quotes unless the value holds a double quote and no single quote.
/// Backslashes, the chosen quote and control characters are escaped, so the
/// literal always fits on one line.
fn quote(text: &str) -> String {
    let delimiter = if text.contains('"') && !text.contains('\'') {
        '\''
    } else {
        '"'
    };

    let mut literal = String::with_capacity(text.len() + 2);
    literal.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c == delimiter => {
                literal.push('\\');
                literal.push(c);
            }
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => literal.push(c),
        }
    }
    literal.push(delimiter);
    literal
}

fn float_literal(value: FloatLiteral) -> PrintResult {
    let value = value.value();
    if value.is_finite() {
        Ok(format!("{value:?}"))
    } else {
        Err(PrintError::NonFiniteFloat(value.to_string()))
    }
}

impl Visitor for PythonCodePrinter {
    type Output = PrintResult;

    // Expressions

    fn visit_integer(&mut self, value: i64) -> PrintResult {
        Ok(value.to_string())
    }

    fn visit_float(&mut self, value: FloatLiteral) -> PrintResult {
        float_literal(value)
    }

    fn visit_complex(&mut self, imaginary: FloatLiteral) -> PrintResult {
        Ok(format!("{}j", float_literal(imaginary)?))
    }

    fn visit_boolean(&mut self, value: bool) -> PrintResult {
        Ok(if value { "True" } else { "False" }.to_string())
    }

    fn visit_string(&mut self, text: &str) -> PrintResult {
        Ok(quote(text))
    }

    fn visit_nil(&mut self) -> PrintResult {
        Ok("None".to_string())
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> PrintResult {
        Ok(symbol.name.clone())
    }

    fn visit_dotted_name(&mut self, name: &DottedName) -> PrintResult {
        Ok(name.to_string())
    }

    fn visit_tuple(&mut self, items: &[Expr]) -> PrintResult {
        let inner = self.print_list(items)?;
        Ok(if items.len() == 1 {
            format!("({inner},)")
        } else {
            format!("({inner})")
        })
    }

    fn visit_binary_op(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> PrintResult {
        let strength = precedence::binary(op);
        let (left_parens, right_parens) = if op == BinaryOperator::Pow {
            (precedence::of(left) <= POWER, precedence::of(right) < UNARY)
        } else if op.is_comparison() {
            (
                precedence::of(left) <= COMPARISON,
                precedence::of(right) <= COMPARISON,
            )
        } else {
            (
                precedence::of(left) < strength,
                precedence::of(right) <= strength,
            )
        };

        let left = self.print_operand(left, left_parens)?;
        let right = self.print_operand(right, right_parens)?;
        Ok(format!("{left} {op} {right}"))
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &Expr) -> PrintResult {
        match op {
            UnaryOperator::Neg => {
                // `-(2)` keeps the negation separate from the literal
                let parens = operand.is_numeric_literal() || precedence::of(operand) < UNARY;
                Ok(format!("-{}", self.print_operand(operand, parens)?))
            }
            UnaryOperator::Not => {
                let parens = precedence::of(operand) < NOT;
                Ok(format!("not {}", self.print_operand(operand, parens)?))
            }
        }
    }

    fn visit_function_call(&mut self, callee: &Name, args: &[Expr]) -> PrintResult {
        Ok(format!("{callee}({})", self.print_list(args)?))
    }

    fn visit_range(&mut self, start: &Expr, stop: &Expr, step: &Expr) -> PrintResult {
        let start = self.walk_expr(start)?;
        let stop = self.walk_expr(stop)?;
        let step = self.walk_expr(step)?;
        Ok(format!("range({start}, {stop}, {step})"))
    }

    fn visit_indexed(&mut self, base: &Expr, indices: &[Expr]) -> PrintResult {
        let base = self.print_operand(base, precedence::of(base) < ATOM)?;
        let indices = indices
            .iter()
            .map(|index| self.print_index(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{base}[{}]", indices.join(", ")))
    }

    fn visit_slice(
        &mut self,
        _start: Option<&Expr>,
        _stop: Option<&Expr>,
        _step: Option<&Expr>,
    ) -> PrintResult {
        Err(PrintError::UnprintableNode(NodeKind::Slice))
    }

    fn visit_intrinsic(&mut self, call: &IntrinsicCall) -> PrintResult {
        match (call.function(), call.args()) {
            (IntrinsicFunction::Shape, [array]) => {
                let array = self.print_operand(array, precedence::of(array) < ATOM)?;
                Ok(format!("{array}.shape"))
            }
            (IntrinsicFunction::Shape, [array, axis]) => {
                let array = self.print_operand(array, precedence::of(array) < ATOM)?;
                Ok(format!("{array}.shape[{}]", self.walk_expr(axis)?))
            }
            (function, args) => Ok(format!("{}({})", function.name(), self.print_list(args)?)),
        }
    }

    // Statements

    fn visit_assign(&mut self, lhs: &Expr, rhs: &Expr) -> PrintResult {
        let lhs = self.print_unparenthesized(lhs)?;
        let rhs = self.print_unparenthesized(rhs)?;
        Ok(format!("{}{lhs} = {rhs}", self.indent()))
    }

    fn visit_aug_assign(&mut self, lhs: &Expr, op: BinaryOperator, rhs: &Expr) -> PrintResult {
        let lhs = self.walk_expr(lhs)?;
        let rhs = self.walk_expr(rhs)?;
        Ok(format!("{}{lhs} {op}= {rhs}", self.indent()))
    }

    fn visit_return(&mut self, value: &Expr) -> PrintResult {
        let value = self.print_unparenthesized(value)?;
        Ok(format!("{}return {value}", self.indent()))
    }

    fn visit_print(&mut self, items: &[Expr]) -> PrintResult {
        Ok(format!("{}print({})", self.indent(), self.print_list(items)?))
    }

    fn visit_comment(&mut self, text: &str) -> PrintResult {
        if text.is_empty() {
            Ok(format!("{}#", self.indent()))
        } else {
            Ok(format!("{}# {text}", self.indent()))
        }
    }

    fn visit_pragma(&mut self, pragma: &Pragma) -> PrintResult {
        let mut line = format!("{}#$ {}", self.indent(), pragma.family);
        for clause in &pragma.clauses {
            line.push(' ');
            line.push_str(clause);
        }
        Ok(line)
    }

    fn visit_empty_line(&mut self) -> PrintResult {
        Ok(String::new())
    }

    fn visit_pass(&mut self) -> PrintResult {
        Ok(format!("{}pass", self.indent()))
    }

    fn visit_import(&mut self, import: &Import) -> PrintResult {
        let targets = import
            .targets()
            .iter()
            .map(|target| match &target.alias {
                Some(alias) => format!("{} as {alias}", target.name),
                None => target.name.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(match import.source() {
            Some(source) => format!("{}from {source} import {targets}", self.indent()),
            None => format!("{}import {targets}", self.indent()),
        })
    }

    fn visit_if(&mut self, conditional: &Conditional) -> PrintResult {
        let indent = self.indent();
        let mut lines = Vec::with_capacity(conditional.branches().len() * 2);

        for (position, branch) in conditional.branches().iter().enumerate() {
            let header = match (&branch.condition, position) {
                (Condition::Always, 0) => format!("{indent}if True:"),
                (Condition::Always, _) => format!("{indent}else:"),
                (Condition::Expr(condition), 0) => {
                    format!("{indent}if {}:", self.walk_expr(condition)?)
                }
                (Condition::Expr(condition), _) => {
                    format!("{indent}elif {}:", self.walk_expr(condition)?)
                }
            };
            lines.push(header);
            lines.push(self.print_block(&branch.body)?);
        }

        Ok(lines.join("\n"))
    }

    fn visit_for(&mut self, target: &Expr, iterable: &Expr, body: &[Stmt]) -> PrintResult {
        let header = format!(
            "{}for {} in {}:",
            self.indent(),
            self.print_unparenthesized(target)?,
            self.walk_expr(iterable)?
        );
        Ok(format!("{header}\n{}", self.print_block(body)?))
    }

    fn visit_while(&mut self, condition: &Expr, body: &[Stmt]) -> PrintResult {
        let header = format!("{}while {}:", self.indent(), self.walk_expr(condition)?);
        Ok(format!("{header}\n{}", self.print_block(body)?))
    }

    fn visit_function_def(&mut self, def: &FunctionDef) -> PrintResult {
        let indent = self.indent();
        let mut lines = Vec::with_capacity(def.decorators.len() + 2);

        for (name, args) in &def.decorators {
            if args.is_empty() {
                lines.push(format!("{indent}@{name}"));
            } else {
                lines.push(format!("{indent}@{name}({})", self.print_list(args)?));
            }
        }

        let parameters = def
            .arguments
            .iter()
            .map(|parameter| self.print_parameter(parameter))
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(format!("{indent}def {}({}):", def.name, parameters.join(", ")));
        lines.push(self.print_block(&def.body)?);

        Ok(lines.join("\n"))
    }

    fn visit_class_def(&mut self, def: &ClassDef) -> PrintResult {
        let header = format!("{}class {}:", self.indent(), def.name);
        if def.methods.is_empty() {
            return Ok(format!("{header}\n{}", self.print_block(&[])?));
        }

        self.level += 1;
        let methods = def
            .methods
            .iter()
            .map(|method| self.visit_function_def(method))
            .collect::<Result<Vec<_>, _>>();
        self.level -= 1;

        Ok(format!("{header}\n{}", methods?.join("\n\n")))
    }

    fn visit_expr_stmt(&mut self, value: &Expr) -> PrintResult {
        Ok(format!("{}{}", self.indent(), self.walk_expr(value)?))
    }

    // Parameters and containers

    fn visit_argument(&mut self, argument: &Argument) -> PrintResult {
        Ok(argument.name.clone())
    }

    fn visit_valued_argument(&mut self, valued: &ValuedArgument) -> PrintResult {
        let value = self.walk_expr(valued.value())?;
        Ok(format!("{}={value}", valued.argument().name))
    }

    fn visit_block(&mut self, body: &[Stmt]) -> PrintResult {
        let mut text = self.print_statements(body)?;
        text.push('\n');
        Ok(text)
    }

    // Foreign interop

    fn visit_foreign_function(&mut self, function: &ForeignFunction) -> PrintResult {
        self.print_foreign_function(function)
    }

    fn visit_foreign_module(&mut self, module: &ForeignModule) -> PrintResult {
        self.print_foreign_module(module)
    }

    fn visit_foreign_function_interface(
        &mut self,
        interface: &ForeignFunctionInterface,
    ) -> PrintResult {
        self.print_foreign_function_interface(interface)
    }

    fn visit_foreign_module_interface(
        &mut self,
        interface: &ForeignModuleInterface,
    ) -> PrintResult {
        self.print_foreign_module_interface(interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pycode;
    use expect_test::expect;
    use hr_ast::{Branch, ImportTarget, MathFunction, PragmaFamily};

    fn print(node: impl Into<Node>) -> String {
        pycode(&node.into()).unwrap()
    }

    fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::binary(op, left, right)
    }

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn literals() {
        assert_eq!(print(Expr::Integer(-3)), "-3");
        assert_eq!(print(Expr::float(2.0)), "2.0");
        assert_eq!(print(Expr::float(1e-7)), "1e-7");
        assert_eq!(print(Expr::Complex(FloatLiteral::new(1.5))), "1.5j");
        assert_eq!(print(Expr::Boolean(false)), "False");
        assert_eq!(print(Expr::Nil), "None");
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(matches!(
            pycode(&Expr::float(f64::NAN).into()),
            Err(PrintError::NonFiniteFloat(_))
        ));
    }

    #[test]
    fn strings_pick_a_safe_quote() {
        assert_eq!(print(Expr::string("abc")), r#""abc""#);
        assert_eq!(print(Expr::string(r#"say "hi""#)), r#"'say "hi"'"#);
        assert_eq!(print(Expr::string("it's")), r#""it's""#);
        assert_eq!(print(Expr::string("a\nb")), r#""a\nb""#);
    }

    #[test]
    fn strings_escape_backslashes_and_quotes() {
        assert_eq!(print(Expr::string("a\\")), r#""a\\""#);
        assert_eq!(print(Expr::string(r#"it's "x""#)), r#""it's \"x\"""#);
        assert_eq!(
            print(Expr::string("'''\n\"\"\"")),
            r#""'''\n\"\"\"""#
        );
        assert_eq!(print(Expr::string("\u{7}\té")), r#""\x07\té""#);
    }

    #[test]
    fn layout_only_bodies_end_in_pass() {
        let commented =
            Stmt::for_loop(sym("i"), sym("xs"), vec![Stmt::comment("c")]).unwrap();
        assert_eq!(print(commented), "for i in xs:\n    # c\n    pass");

        let spaced = Stmt::While {
            condition: sym("a"),
            body: vec![Stmt::EmptyLine],
        };
        assert_eq!(print(spaced), "while a:\n\n    pass");
    }

    #[test]
    fn tuples() {
        assert_eq!(print(Expr::Tuple(vec![])), "()");
        assert_eq!(print(Expr::Tuple(vec![sym("a")])), "(a,)");
        assert_eq!(print(Expr::Tuple(vec![sym("a"), Expr::Integer(1)])), "(a, 1)");
    }

    #[test]
    fn parentheses_follow_binding_strength() {
        let sum = binary(BinaryOperator::Add, sym("a"), sym("b"));
        assert_eq!(print(binary(BinaryOperator::Mul, sum.clone(), sym("c"))), "(a + b) * c");
        assert_eq!(print(binary(BinaryOperator::Sub, sym("c"), sum.clone())), "c - (a + b)");
        assert_eq!(print(binary(BinaryOperator::Add, sum, sym("c"))), "a + b + c");

        let power = binary(BinaryOperator::Pow, sym("a"), sym("b"));
        assert_eq!(print(binary(BinaryOperator::Pow, power.clone(), sym("c"))), "(a ** b) ** c");
        assert_eq!(print(binary(BinaryOperator::Pow, sym("c"), power)), "c ** a ** b");
        assert_eq!(
            print(binary(BinaryOperator::Pow, Expr::Integer(-2), Expr::Integer(2))),
            "(-2) ** 2"
        );
    }

    #[test]
    fn nested_comparisons_are_grouped() {
        let less = binary(BinaryOperator::Lt, sym("a"), sym("b"));
        assert_eq!(print(binary(BinaryOperator::Eq, less.clone(), Expr::Boolean(true))), "(a < b) == True");
        assert_eq!(
            print(binary(BinaryOperator::And, less, binary(BinaryOperator::Lt, sym("b"), sym("c")))),
            "a < b and b < c"
        );
    }

    #[test]
    fn unary_operators() {
        assert_eq!(print(Expr::unary(UnaryOperator::Neg, sym("x"))), "-x");
        assert_eq!(print(Expr::unary(UnaryOperator::Neg, Expr::Integer(2))), "-(2)");
        assert_eq!(
            print(Expr::unary(UnaryOperator::Neg, binary(BinaryOperator::Add, sym("a"), sym("b")))),
            "-(a + b)"
        );
        assert_eq!(
            print(Expr::unary(UnaryOperator::Not, binary(BinaryOperator::Or, sym("a"), sym("b")))),
            "not (a or b)"
        );
    }

    #[test]
    fn intrinsics_use_native_syntax() {
        let shape = IntrinsicCall::new(IntrinsicFunction::Shape, vec![sym("x")]).unwrap();
        assert_eq!(print(Expr::Intrinsic(shape)), "x.shape");

        let axis = IntrinsicCall::new(IntrinsicFunction::Shape, vec![sym("x"), Expr::Integer(1)]).unwrap();
        assert_eq!(print(Expr::Intrinsic(axis)), "x.shape[1]");

        let len = IntrinsicCall::new(IntrinsicFunction::Len, vec![sym("x")]).unwrap();
        assert_eq!(print(Expr::Intrinsic(len)), "len(x)");

        let sqrt = IntrinsicCall::new(IntrinsicFunction::Math(MathFunction::Sqrt), vec![sym("x")]).unwrap();
        assert_eq!(print(Expr::Intrinsic(sqrt)), "sqrt(x)");

        let range = Expr::range(Expr::Integer(0), sym("n"), Expr::Integer(1));
        assert_eq!(print(range), "range(0, n, 1)");
    }

    #[test]
    fn subscripts_and_slices() {
        let indexed = Expr::indexed(
            sym("a"),
            vec![
                sym("i"),
                Expr::slice(Some(Expr::Integer(1)), None, None),
                Expr::slice(None, None, Some(Expr::Integer(2))),
            ],
        )
        .unwrap();
        assert_eq!(print(indexed), "a[i, 1:, ::2]");
    }

    #[test]
    fn slice_outside_subscript_is_unprintable() {
        let error = pycode(&Expr::slice(None, None, None).into()).unwrap_err();
        assert_eq!(error, PrintError::UnprintableNode(NodeKind::Slice));
    }

    #[test]
    fn conditional_prints_else_last() {
        let conditional = Conditional::new(vec![
            Branch::new(sym("a"), vec![Stmt::Pass]),
            Branch::new(sym("b"), vec![]),
            Branch::otherwise(vec![Stmt::Return { value: Expr::Nil }]),
        ])
        .unwrap();

        expect![[r#"
            if a:
                pass
            elif b:
                pass
            else:
                return None"#]]
        .assert_eq(&print(Stmt::If(conditional)));
    }

    #[test]
    fn module_with_nested_bodies() {
        let body = vec![
            Stmt::Import(
                Import::new(
                    Some(Name::symbol("numpy")),
                    vec![ImportTarget::aliased(Name::symbol("zeros"), "z")],
                )
                .unwrap(),
            ),
            Stmt::EmptyLine,
            Stmt::Pragma(Pragma::new(PragmaFamily::Omp, ["parallel", "private(i)"])),
            Stmt::for_loop(
                Expr::Tuple(vec![sym("i"), sym("j")]),
                sym("pairs"),
                vec![
                    Stmt::comment("accumulate"),
                    Stmt::AugAssign {
                        lhs: sym("s"),
                        op: BinaryOperator::Add,
                        rhs: binary(BinaryOperator::Mul, sym("i"), sym("j")),
                    },
                ],
            )
            .unwrap(),
            Stmt::While {
                condition: binary(BinaryOperator::Gt, sym("s"), Expr::Integer(0)),
                body: vec![Stmt::Print {
                    items: vec![Expr::string("s"), sym("s")],
                }],
            },
        ];

        expect![[r#"
            from numpy import zeros as z

            #$ omp parallel private(i)
            for i, j in pairs:
                # accumulate
                s += i * j
            while s > 0:
                print("s", s)
        "#]]
        .assert_eq(&print(Node::Block(body)));
    }

    #[test]
    fn function_with_decorators_and_defaults() {
        let def = FunctionDef::new(
            "axpy",
            vec![
                Argument::new("a").into(),
                Argument::new("x").into(),
                ValuedArgument::new(Node::Argument(Argument::new("y")), Expr::Nil)
                    .unwrap()
                    .into(),
            ],
            vec![Stmt::Return {
                value: Expr::Tuple(vec![sym("a"), sym("x")]),
            }],
        )
        .with_decorator("types", vec![Expr::string("float"), Expr::string("float[:]")])
        .with_decorator("pure", vec![]);

        expect![[r#"
            @types("float", "float[:]")
            @pure
            def axpy(a, x, y=None):
                return a, x"#]]
        .assert_eq(&print(def));
    }

    #[test]
    fn class_methods_are_separated_by_blank_lines() {
        let init = FunctionDef::new(
            "__init__",
            vec![Argument::new("self").into(), Argument::new("x").into()],
            vec![Stmt::Assign {
                lhs: Expr::DottedName(DottedName::new(["self", "x"]).unwrap()),
                rhs: sym("x"),
            }],
        );
        let norm = FunctionDef::new("norm", vec![Argument::new("self").into()], vec![]);
        let point = ClassDef::from_methods("Point", vec![init, norm]);

        expect![[r#"
            class Point:
                def __init__(self, x):
                    self.x = x

                def norm(self):
                    pass"#]]
        .assert_eq(&print(Stmt::ClassDef(point)));
    }

    #[test]
    fn empty_class_gets_a_pass() {
        assert_eq!(print(Stmt::ClassDef(ClassDef::from_methods("Empty", vec![]))), "class Empty:\n    pass");
    }

    #[test]
    fn indentation_width_is_configurable() {
        let settings = PrinterSettings {
            indent_width: 2,
            ..PrinterSettings::default()
        };
        let stmt = Stmt::While {
            condition: Expr::Boolean(true),
            body: vec![Stmt::Pass],
        };
        let text = PythonCodePrinter::new(settings).doprint(&stmt.into()).unwrap();
        assert_eq!(text, "while True:\n  pass");
    }
}
