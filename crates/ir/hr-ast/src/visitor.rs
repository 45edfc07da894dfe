//! Tag-keyed dispatch over AST nodes
//!
//! `walk_*` match exhaustively on the variant and call the per-kind method.
//! Every per-kind method is required: a new node kind does not compile until
//! each visitor says how to handle it.

use crate::{
    Argument, BinaryOperator, ClassDef, Conditional, DottedName, Expr, FloatLiteral,
    ForeignFunction, ForeignFunctionInterface, ForeignModule, ForeignModuleInterface,
    FunctionDef, Import, IntrinsicCall, Name, Node, Pragma, Stmt, Symbol, UnaryOperator,
    ValuedArgument,
};

/// Visitor over AST nodes
pub trait Visitor {
    /// Output type produced by visiting a node
    type Output;

    /// Visit any node
    fn walk_node(&mut self, node: &Node) -> Self::Output {
        match node {
            Node::Expr(expr) => self.walk_expr(expr),
            Node::Stmt(stmt) => self.walk_stmt(stmt),
            Node::Argument(argument) => self.visit_argument(argument),
            Node::ValuedArgument(valued) => self.visit_valued_argument(valued),
            Node::Block(body) => self.visit_block(body),
            Node::ForeignFunction(function) => self.visit_foreign_function(function),
            Node::ForeignModule(module) => self.visit_foreign_module(module),
            Node::ForeignFunctionInterface(interface) => {
                self.visit_foreign_function_interface(interface)
            }
            Node::ForeignModuleInterface(interface) => {
                self.visit_foreign_module_interface(interface)
            }
        }
    }

    /// Visit an expression
    fn walk_expr(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::Integer(value) => self.visit_integer(*value),
            Expr::Float(value) => self.visit_float(*value),
            Expr::Complex(value) => self.visit_complex(*value),
            Expr::Boolean(value) => self.visit_boolean(*value),
            Expr::String(text) => self.visit_string(text),
            Expr::Nil => self.visit_nil(),
            Expr::Symbol(symbol) => self.visit_symbol(symbol),
            Expr::DottedName(name) => self.visit_dotted_name(name),
            Expr::Tuple(items) => self.visit_tuple(items),
            Expr::BinaryOp { op, left, right } => self.visit_binary_op(*op, left, right),
            Expr::UnaryOp { op, operand } => self.visit_unary_op(*op, operand),
            Expr::FunctionCall { callee, args } => self.visit_function_call(callee, args),
            Expr::Range { start, stop, step } => self.visit_range(start, stop, step),
            Expr::Indexed(indexed) => self.visit_indexed(indexed.base(), indexed.indices()),
            Expr::Slice { start, stop, step } => {
                self.visit_slice(start.as_deref(), stop.as_deref(), step.as_deref())
            }
            Expr::Intrinsic(call) => self.visit_intrinsic(call),
        }
    }

    /// Visit a statement
    fn walk_stmt(&mut self, stmt: &Stmt) -> Self::Output {
        match stmt {
            Stmt::Assign { lhs, rhs } => self.visit_assign(lhs, rhs),
            Stmt::AugAssign { lhs, op, rhs } => self.visit_aug_assign(lhs, *op, rhs),
            Stmt::Return { value } => self.visit_return(value),
            Stmt::Print { items } => self.visit_print(items),
            Stmt::Comment { text } => self.visit_comment(text),
            Stmt::Pragma(pragma) => self.visit_pragma(pragma),
            Stmt::EmptyLine => self.visit_empty_line(),
            Stmt::Pass => self.visit_pass(),
            Stmt::Import(import) => self.visit_import(import),
            Stmt::If(conditional) => self.visit_if(conditional),
            Stmt::For(for_loop) => {
                self.visit_for(for_loop.target(), for_loop.iterable(), for_loop.body())
            }
            Stmt::While { condition, body } => self.visit_while(condition, body),
            Stmt::FunctionDef(def) => self.visit_function_def(def),
            Stmt::ClassDef(def) => self.visit_class_def(def),
            Stmt::Expr { value } => self.visit_expr_stmt(value),
        }
    }

    // Expressions

    /// Integer
    fn visit_integer(&mut self, value: i64) -> Self::Output;
    /// Float
    fn visit_float(&mut self, value: FloatLiteral) -> Self::Output;
    /// Complex
    fn visit_complex(&mut self, imaginary: FloatLiteral) -> Self::Output;
    /// Boolean
    fn visit_boolean(&mut self, value: bool) -> Self::Output;
    /// String
    fn visit_string(&mut self, text: &str) -> Self::Output;
    /// Nil
    fn visit_nil(&mut self) -> Self::Output;
    /// Symbol
    fn visit_symbol(&mut self, symbol: &Symbol) -> Self::Output;
    /// Dotted name
    fn visit_dotted_name(&mut self, name: &DottedName) -> Self::Output;
    /// Tuple
    fn visit_tuple(&mut self, items: &[Expr]) -> Self::Output;
    /// Binary op
    fn visit_binary_op(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Self::Output;
    /// Unary op
    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &Expr) -> Self::Output;
    /// Function call
    fn visit_function_call(&mut self, callee: &Name, args: &[Expr]) -> Self::Output;
    /// Range
    fn visit_range(&mut self, start: &Expr, stop: &Expr, step: &Expr) -> Self::Output;
    /// Indexed
    fn visit_indexed(&mut self, base: &Expr, indices: &[Expr]) -> Self::Output;

    /// Slice parts; only meaningful inside an index
    fn visit_slice(
        &mut self,
        start: Option<&Expr>,
        stop: Option<&Expr>,
        step: Option<&Expr>,
    ) -> Self::Output;

    /// Intrinsic
    fn visit_intrinsic(&mut self, call: &IntrinsicCall) -> Self::Output;

    // Statements

    /// Assign
    fn visit_assign(&mut self, lhs: &Expr, rhs: &Expr) -> Self::Output;
    /// Aug assign
    fn visit_aug_assign(&mut self, lhs: &Expr, op: BinaryOperator, rhs: &Expr) -> Self::Output;
    /// Return
    fn visit_return(&mut self, value: &Expr) -> Self::Output;
    /// Print
    fn visit_print(&mut self, items: &[Expr]) -> Self::Output;
    /// Comment
    fn visit_comment(&mut self, text: &str) -> Self::Output;
    /// Pragma
    fn visit_pragma(&mut self, pragma: &Pragma) -> Self::Output;
    /// Empty line
    fn visit_empty_line(&mut self) -> Self::Output;
    /// Pass
    fn visit_pass(&mut self) -> Self::Output;
    /// Import
    fn visit_import(&mut self, import: &Import) -> Self::Output;
    /// If
    fn visit_if(&mut self, conditional: &Conditional) -> Self::Output;
    /// For
    fn visit_for(&mut self, target: &Expr, iterable: &Expr, body: &[Stmt]) -> Self::Output;
    /// While
    fn visit_while(&mut self, condition: &Expr, body: &[Stmt]) -> Self::Output;
    /// Function def
    fn visit_function_def(&mut self, def: &FunctionDef) -> Self::Output;
    /// Class def
    fn visit_class_def(&mut self, def: &ClassDef) -> Self::Output;
    /// Expr stmt
    fn visit_expr_stmt(&mut self, value: &Expr) -> Self::Output;

    // Parameters and containers

    /// Argument
    fn visit_argument(&mut self, argument: &Argument) -> Self::Output;
    /// Valued argument
    fn visit_valued_argument(&mut self, valued: &ValuedArgument) -> Self::Output;
    /// Block
    fn visit_block(&mut self, body: &[Stmt]) -> Self::Output;

    // Foreign interop

    /// Foreign function
    fn visit_foreign_function(&mut self, function: &ForeignFunction) -> Self::Output;
    /// Foreign module
    fn visit_foreign_module(&mut self, module: &ForeignModule) -> Self::Output;
    /// Foreign function interface
    fn visit_foreign_function_interface(
        &mut self,
        interface: &ForeignFunctionInterface,
    ) -> Self::Output;
    /// Foreign module interface
    fn visit_foreign_module_interface(
        &mut self,
        interface: &ForeignModuleInterface,
    ) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    /// Answers every visit with the kind it was called for
    struct KindEcho;

    #[rustfmt::skip]
    impl Visitor for KindEcho {
        type Output = NodeKind;

        fn visit_integer(&mut self, _: i64) -> NodeKind { NodeKind::Integer }
        fn visit_float(&mut self, _: FloatLiteral) -> NodeKind { NodeKind::Float }
        fn visit_complex(&mut self, _: FloatLiteral) -> NodeKind { NodeKind::Complex }
        fn visit_boolean(&mut self, _: bool) -> NodeKind { NodeKind::Boolean }
        fn visit_string(&mut self, _: &str) -> NodeKind { NodeKind::String }
        fn visit_nil(&mut self) -> NodeKind { NodeKind::Nil }
        fn visit_symbol(&mut self, _: &Symbol) -> NodeKind { NodeKind::Symbol }
        fn visit_dotted_name(&mut self, _: &DottedName) -> NodeKind { NodeKind::DottedName }
        fn visit_tuple(&mut self, _: &[Expr]) -> NodeKind { NodeKind::Tuple }
        fn visit_binary_op(&mut self, _: BinaryOperator, _: &Expr, _: &Expr) -> NodeKind { NodeKind::BinaryOp }
        fn visit_unary_op(&mut self, _: UnaryOperator, _: &Expr) -> NodeKind { NodeKind::UnaryOp }
        fn visit_function_call(&mut self, _: &Name, _: &[Expr]) -> NodeKind { NodeKind::FunctionCall }
        fn visit_range(&mut self, _: &Expr, _: &Expr, _: &Expr) -> NodeKind { NodeKind::Range }
        fn visit_indexed(&mut self, _: &Expr, _: &[Expr]) -> NodeKind { NodeKind::Indexed }
        fn visit_slice(&mut self, _: Option<&Expr>, _: Option<&Expr>, _: Option<&Expr>) -> NodeKind { NodeKind::Slice }
        fn visit_intrinsic(&mut self, _: &IntrinsicCall) -> NodeKind { NodeKind::Intrinsic }
        fn visit_assign(&mut self, _: &Expr, _: &Expr) -> NodeKind { NodeKind::Assign }
        fn visit_aug_assign(&mut self, _: &Expr, _: BinaryOperator, _: &Expr) -> NodeKind { NodeKind::AugAssign }
        fn visit_return(&mut self, _: &Expr) -> NodeKind { NodeKind::Return }
        fn visit_print(&mut self, _: &[Expr]) -> NodeKind { NodeKind::Print }
        fn visit_comment(&mut self, _: &str) -> NodeKind { NodeKind::Comment }
        fn visit_pragma(&mut self, _: &Pragma) -> NodeKind { NodeKind::Pragma }
        fn visit_empty_line(&mut self) -> NodeKind { NodeKind::EmptyLine }
        fn visit_pass(&mut self) -> NodeKind { NodeKind::Pass }
        fn visit_import(&mut self, _: &Import) -> NodeKind { NodeKind::Import }
        fn visit_if(&mut self, _: &Conditional) -> NodeKind { NodeKind::If }
        fn visit_for(&mut self, _: &Expr, _: &Expr, _: &[Stmt]) -> NodeKind { NodeKind::For }
        fn visit_while(&mut self, _: &Expr, _: &[Stmt]) -> NodeKind { NodeKind::While }
        fn visit_function_def(&mut self, _: &FunctionDef) -> NodeKind { NodeKind::FunctionDef }
        fn visit_class_def(&mut self, _: &ClassDef) -> NodeKind { NodeKind::ClassDef }
        fn visit_expr_stmt(&mut self, _: &Expr) -> NodeKind { NodeKind::ExprStmt }
        fn visit_argument(&mut self, _: &Argument) -> NodeKind { NodeKind::Argument }
        fn visit_valued_argument(&mut self, _: &ValuedArgument) -> NodeKind { NodeKind::ValuedArgument }
        fn visit_block(&mut self, _: &[Stmt]) -> NodeKind { NodeKind::Block }
        fn visit_foreign_function(&mut self, _: &ForeignFunction) -> NodeKind { NodeKind::ForeignFunction }
        fn visit_foreign_module(&mut self, _: &ForeignModule) -> NodeKind { NodeKind::ForeignModule }
        fn visit_foreign_function_interface(&mut self, _: &ForeignFunctionInterface) -> NodeKind {
            NodeKind::ForeignFunctionInterface
        }
        fn visit_foreign_module_interface(&mut self, _: &ForeignModuleInterface) -> NodeKind {
            NodeKind::ForeignModuleInterface
        }
    }

    #[test]
    fn dispatch_matches_the_node_kind() {
        let nodes: Vec<Node> = vec![
            Expr::Integer(1).into(),
            Expr::string("s").into(),
            Expr::symbol("a").into(),
            Expr::binary(BinaryOperator::Mul, Expr::symbol("a"), Expr::Integer(2)).into(),
            Expr::indexed(Expr::symbol("a"), vec![Expr::Integer(0)]).unwrap().into(),
            Expr::slice(None, None, None).into(),
            Stmt::Pass.into(),
            Stmt::EmptyLine.into(),
            Stmt::comment("note").into(),
            Stmt::for_loop(Expr::symbol("i"), Expr::symbol("xs"), vec![Stmt::Pass])
                .unwrap()
                .into(),
            Node::Argument(Argument::new("x")),
            Node::Block(vec![Stmt::Pass]),
        ];

        for node in &nodes {
            assert_eq!(KindEcho.walk_node(node), node.kind());
        }
    }
}
