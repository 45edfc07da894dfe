//! Recognition of intrinsic calls and imports
//!
//! Both lookups are total: a name or import that is not recognised yields
//! `None` and the caller keeps the generic node form. The tables are built
//! once and never change, so resolution can run from any thread.

use hr_ast::{Expr, IntrinsicFunction, MathFunction, Name};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Intrinsics recognised from a bare call name
static CALLS: LazyLock<FxHashMap<&'static str, IntrinsicFunction>> = LazyLock::new(|| {
    let mut table: FxHashMap<_, _> = [
        IntrinsicFunction::Range,
        IntrinsicFunction::Array,
        IntrinsicFunction::Shape,
        IntrinsicFunction::Int,
        IntrinsicFunction::Len,
        IntrinsicFunction::Sum,
    ]
    .into_iter()
    .map(|function| (function.name(), function))
    .collect();
    table.extend(math_entries());
    table
});

/// Names importable from `numpy`
static NUMPY: LazyLock<FxHashMap<&'static str, IntrinsicFunction>> = LazyLock::new(|| {
    let mut table: FxHashMap<_, _> = [
        ("zeros", IntrinsicFunction::Zeros),
        ("ones", IntrinsicFunction::Ones),
        ("array", IntrinsicFunction::Array),
        ("shape", IntrinsicFunction::Shape),
        ("int", IntrinsicFunction::Int),
        ("sum", IntrinsicFunction::Sum),
        ("rand", IntrinsicFunction::Rand),
        ("random", IntrinsicFunction::Rand),
    ]
    .into_iter()
    .collect();
    table.extend(math_entries());
    table
});

/// Names importable from `math`
static MATH: LazyLock<FxHashMap<&'static str, IntrinsicFunction>> =
    LazyLock::new(|| math_entries().collect());

fn math_entries() -> impl Iterator<Item = (&'static str, IntrinsicFunction)> {
    MathFunction::ALL
        .into_iter()
        .map(|function| (function.name(), IntrinsicFunction::Math(function)))
}

/// Intrinsic bound by an import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedImport {
    /// Canonical name of the imported symbol
    pub name: &'static str,
    /// Builds the specialised node for a call of the symbol
    pub constructor: IntrinsicFunction,
}

/// Looks up the intrinsic for a bare call name
pub fn intrinsic_for(name: &str) -> Option<IntrinsicFunction> {
    CALLS.get(name).copied()
}

/// Specialises a call of `name` with `args`
///
/// Returns `None` when `name` is not an intrinsic or when the intrinsic
/// does not accept that many arguments.
pub fn resolve_call(name: &str, args: &[Expr]) -> Option<Expr> {
    let function = intrinsic_for(name)?;
    function.construct(args.to_vec()).ok()
}

/// Resolves one imported name against the known numeric modules
///
/// Only the first segment of a dotted module path is consulted, so
/// `numpy.linalg` is treated as `numpy`.
pub fn resolve_import(source: Option<&Name>, target: &Name) -> Option<ResolvedImport> {
    let table = match source?.head() {
        "numpy" => &*NUMPY,
        "math" => &*MATH,
        _ => return None,
    };

    table
        .get_key_value(target.last())
        .map(|(&name, &constructor)| ResolvedImport { name, constructor })
}
