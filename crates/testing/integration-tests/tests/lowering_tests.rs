//! Lowering of the fixture programs

use hr_ast::{
    BinaryOperator, Condition, DottedName, Expr, FunctionDef, IntrinsicFunction, MathFunction,
    Name, Pragma, PragmaFamily, Stmt,
};
use hr_ast_lower::LowerError;
use hr_driver::DriverError;
use integration_tests::{fixture, lower};

/// Pragmas in source order, wherever they ended up nested
fn collect_pragmas(body: &[Stmt], pragmas: &mut Vec<Pragma>) {
    for stmt in body {
        match stmt {
            Stmt::Pragma(pragma) => pragmas.push(pragma.clone()),
            Stmt::For(for_loop) => collect_pragmas(for_loop.body(), pragmas),
            Stmt::While { body, .. } => collect_pragmas(body, pragmas),
            Stmt::If(conditional) => {
                for branch in conditional.branches() {
                    collect_pragmas(&branch.body, pragmas);
                }
            }
            Stmt::FunctionDef(def) => collect_pragmas(&def.body, pragmas),
            _ => {}
        }
    }
}

fn function<'a>(body: &'a [Stmt], name: &str) -> &'a FunctionDef {
    body.iter()
        .find_map(|stmt| match stmt {
            Stmt::FunctionDef(def) if def.name == name => Some(def),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no function `{name}`"))
}

#[test]
fn openmp_pragmas_are_reparsed() {
    let module = lower(&fixture("openmp.py").unwrap()).unwrap();

    let mut pragmas = Vec::new();
    collect_pragmas(&module.body, &mut pragmas);
    assert_eq!(
        pragmas,
        vec![
            Pragma::new(PragmaFamily::Header, ["procedure", "accumulate(float [:], int)"]),
            Pragma::new(PragmaFamily::Omp, ["parallel", "private(i)", "shared(x)"]),
            Pragma::new(PragmaFamily::Omp, ["do", "schedule(static)", "reduction(+:s)"]),
            Pragma::new(PragmaFamily::Omp, ["end", "do"]),
            Pragma::new(PragmaFamily::Omp, ["end", "parallel"]),
        ]
    );

    let iterable = module.body.iter().find_map(|stmt| match stmt {
        Stmt::For(for_loop) => Some(for_loop.iterable()),
        _ => None,
    });
    assert_eq!(
        iterable,
        Some(&Expr::range(Expr::Integer(0), Expr::symbol("n"), Expr::Integer(1)))
    );
    assert_eq!(
        module.intrinsic_imports.get("zeros"),
        Some(&IntrinsicFunction::Zeros)
    );
}

#[test]
fn elif_chains_keep_their_order() {
    let module = lower(&fixture("control_flow.py").unwrap()).unwrap();
    let classify = function(&module.body, "classify");

    let [Stmt::If(conditional)] = classify.body.as_slice() else {
        panic!("expected a single conditional, got {:?}", classify.body);
    };
    let conditions: Vec<_> = conditional
        .branches()
        .iter()
        .map(|branch| branch.condition.clone())
        .collect();
    assert_eq!(
        conditions,
        vec![
            Condition::Expr(Expr::binary(BinaryOperator::Lt, Expr::symbol("x"), Expr::Integer(0))),
            Condition::Expr(Expr::binary(BinaryOperator::Eq, Expr::symbol("x"), Expr::Integer(0))),
            Condition::Expr(Expr::binary(BinaryOperator::Lt, Expr::symbol("x"), Expr::Integer(10))),
            Condition::Always,
        ]
    );
    assert_eq!(
        conditional.branches()[0].body,
        vec![Stmt::Return {
            value: Expr::Integer(-1)
        }]
    );
    assert!(conditional.has_else());
}

#[test]
fn print_calls_become_print_statements() {
    let module = lower(&fixture("control_flow.py").unwrap()).unwrap();
    let countdown = function(&module.body, "countdown");

    let Some(Stmt::While { body, .. }) = countdown.body.first() else {
        panic!("expected a while loop");
    };
    assert_eq!(
        body[0],
        Stmt::Print {
            items: vec![Expr::symbol("n")]
        }
    );
}

#[test]
fn attribute_chains_fold_into_dotted_names() {
    let module = lower(&fixture("dotted.py").unwrap()).unwrap();
    let dotted = |parts: &[&str]| DottedName::new(parts.iter().copied()).unwrap();

    let norm = function(&module.body, "norm");
    assert_eq!(
        norm.body,
        vec![Stmt::Return {
            value: Expr::call(
                Name::symbol("sqrt"),
                vec![Expr::call(
                    Name::Dotted(dotted(&["numpy", "linalg", "dot"])),
                    vec![Expr::symbol("v"), Expr::symbol("v")],
                )],
            )
        }]
    );

    let assignments: Vec<_> = module
        .body
        .iter()
        .filter(|stmt| matches!(stmt, Stmt::Assign { .. }))
        .cloned()
        .collect();
    assert_eq!(
        assignments,
        vec![
            Stmt::Assign {
                lhs: Expr::symbol("scale"),
                rhs: Expr::DottedName(dotted(&["settings", "grid", "scale"])),
            },
            Stmt::Assign {
                lhs: Expr::DottedName(dotted(&["settings", "grid", "step"])),
                rhs: Expr::binary(BinaryOperator::Div, Expr::symbol("scale"), Expr::Integer(2)),
            },
        ]
    );
}

#[test]
fn intrinsic_imports_are_keyed_by_binding() {
    let module = lower(&fixture("dotted.py").unwrap()).unwrap();

    let imports: Vec<_> = module
        .intrinsic_imports
        .iter()
        .map(|(binding, function)| (binding.as_str(), *function))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("sqrt", IntrinsicFunction::Math(MathFunction::Sqrt)),
            ("cosine", IntrinsicFunction::Math(MathFunction::Cos)),
            // only the first module segment is matched, so numpy.ma counts as numpy
            ("zeros", IntrinsicFunction::Zeros),
        ]
    );
}

#[test]
fn unsupported_construct_fails_the_whole_unit() {
    let source = fixture("unsupported.py").unwrap();
    let error = hr_driver::lower_source("unsupported.py", &source).unwrap_err();

    let DriverError::Lower { path, span, error, .. } = error else {
        panic!("expected a lowering error, got {error:?}");
    };
    assert_eq!(path, "unsupported.py");
    let LowerError::UnsupportedConstruct { kind, .. } = &error else {
        panic!("expected an unsupported construct, got {error:?}");
    };
    assert_eq!(kind, "list_comprehension");
    assert_eq!(span.map(|span| span.offset()), Some(source.find('[').unwrap()));
}

#[test]
fn unknown_operator_is_fatal() {
    let error = lower("q = a // b\n").unwrap_err();
    let error = error.downcast::<DriverError>().unwrap();
    assert!(matches!(
        error,
        DriverError::Lower {
            error: LowerError::UnknownOperator { ref token, .. },
            ..
        } if token == "//"
    ));
}
