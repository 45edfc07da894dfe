//! CST → AST lowering for statements and definitions

use crate::LowerError;
use crate::pragma::lower_pragma;
use hr_ast::{
    Argument, Branch, ClassDef, Conditional, Expr, FunctionDef, Import, ImportTarget,
    IntrinsicFunction, Name, Node, Parameter, Stmt, ValuedArgument,
};
use hr_builtins::resolve_import;
use hr_syntax::{Frontend, SyntaxKind, SyntaxNode};
use indexmap::IndexMap;
use serde::Serialize;

/// Result of lowering one compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredModule {
    /// Top-level statements in source order
    pub body: Vec<Stmt>,
    /// Local names bound to intrinsics by `numpy` / `math` imports
    pub intrinsic_imports: IndexMap<String, IntrinsicFunction>,
}

/// Context for lowering CST to AST
pub struct LoweringContext<'fe> {
    /// Front end used to re-parse pragma comments
    frontend: &'fe dyn Frontend,
    /// Intrinsics bound by imports seen so far
    pub intrinsic_imports: IndexMap<String, IntrinsicFunction>,
}

impl<'fe> LoweringContext<'fe> {
    /// Create a new lowering context
    pub fn new(frontend: &'fe dyn Frontend) -> Self {
        Self {
            frontend,
            intrinsic_imports: IndexMap::new(),
        }
    }

    /// Lower a `Module` node
    pub fn lower_module(&mut self, root: &SyntaxNode) -> Result<Vec<Stmt>, LowerError> {
        if root.kind != SyntaxKind::Module {
            return Err(LowerError::unsupported(root));
        }
        self.lower_statements(&root.children)
    }

    /// Lower a sequence of statement nodes, preserving order
    pub fn lower_statements(&mut self, nodes: &[SyntaxNode]) -> Result<Vec<Stmt>, LowerError> {
        nodes
            .iter()
            .filter(|node| node.kind != SyntaxKind::Token)
            .map(|node| self.lower_statement(node))
            .collect()
    }

    /// Lower one statement node
    pub fn lower_statement(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        tracing::trace!(kind = %node.kind, span = %node.span, "lowering statement");

        match node.kind {
            SyntaxKind::BlankLine => Ok(Stmt::EmptyLine),
            SyntaxKind::Comment => self.lower_comment(node),
            SyntaxKind::ExpressionStatement => self.lower_expression_statement(node),
            SyntaxKind::ReturnStatement => self.lower_return(node),
            SyntaxKind::PassStatement => Ok(Stmt::Pass),
            SyntaxKind::PrintStatement => self.lower_print_statement(node),
            SyntaxKind::ImportStatement => self.lower_import(node),
            SyntaxKind::ImportFromStatement => self.lower_import_from(node),
            SyntaxKind::IfStatement => self.lower_if(node),
            SyntaxKind::ForStatement => self.lower_for(node),
            SyntaxKind::WhileStatement => self.lower_while(node),
            SyntaxKind::FunctionDefinition => self
                .lower_function(node, IndexMap::new(), None)
                .map(Stmt::FunctionDef),
            SyntaxKind::DecoratedDefinition => self
                .lower_decorated(node, None)
                .map(Stmt::FunctionDef),
            SyntaxKind::ClassDefinition => self.lower_class(node).map(Stmt::ClassDef),
            _ => Err(LowerError::unsupported(node)),
        }
    }

    fn lower_comment(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        if node.is_pragma() {
            return lower_pragma(self.frontend, node).map(Stmt::Pragma);
        }

        let text = node.text.strip_prefix('#').unwrap_or(&node.text).trim();
        Ok(Stmt::comment(text))
    }

    fn lower_expression_statement(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let children: Vec<&SyntaxNode> = node.named_children().collect();

        let [child] = children.as_slice() else {
            let items = children
                .iter()
                .map(|child| self.lower_expr(child))
                .collect::<Result<_, _>>()?;
            return Ok(Stmt::Expr {
                value: Expr::Tuple(items),
            });
        };

        match child.kind {
            SyntaxKind::Assignment => self.lower_assignment(child),
            SyntaxKind::AugmentedAssignment => self.lower_augmented_assignment(child),
            SyntaxKind::Call if is_print_call(child) => {
                let arguments = required(child, "arguments")?;
                let items = self.lower_arguments(arguments)?;
                Ok(Stmt::Print { items })
            }
            _ => Ok(Stmt::Expr {
                value: self.lower_expr(child)?,
            }),
        }
    }

    fn lower_assignment(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        if let Some(annotation) = node.child_by_field("type") {
            return Err(LowerError::unsupported_at("annotated assignment", annotation.span));
        }

        let lhs = self.lower_expr(required(node, "left")?)?;
        let rhs = self.lower_expr(required(node, "right")?)?;
        Ok(Stmt::Assign { lhs, rhs })
    }

    fn lower_augmented_assignment(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let operator = required(node, "operator")?;
        let op = operator
            .text
            .strip_suffix('=')
            .and_then(crate::expr::binary_operator)
            .filter(|op| op.is_arithmetic())
            .ok_or_else(|| LowerError::unknown_operator(operator))?;

        let lhs = self.lower_expr(required(node, "left")?)?;
        let rhs = self.lower_expr(required(node, "right")?)?;
        Ok(Stmt::AugAssign { lhs, op, rhs })
    }

    fn lower_return(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let value = match node.named_children().next() {
            Some(value) => self.lower_expr(value)?,
            None => Expr::Nil,
        };
        Ok(Stmt::Return { value })
    }

    /// Python 2 `print a, b`
    fn lower_print_statement(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let items = node
            .named_children()
            .map(|child| {
                if child.field == Some("argument") {
                    self.lower_expr(child)
                } else {
                    Err(LowerError::unsupported(child))
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Stmt::Print { items })
    }

    fn lower_import(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let targets = node
            .children_by_field("name")
            .map(lower_import_target)
            .collect::<Result<_, _>>()?;
        Ok(Stmt::Import(Import::new(None, targets)?))
    }

    fn lower_import_from(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let module = required(node, "module_name")?;
        if module.kind != SyntaxKind::DottedName {
            return Err(LowerError::unsupported(module));
        }
        if let Some(wildcard) = node
            .named_children()
            .find(|child| child.field.is_none())
        {
            return Err(LowerError::unsupported(wildcard));
        }

        let source = dotted_name(module)?;
        let targets: Vec<ImportTarget> = node
            .children_by_field("name")
            .map(lower_import_target)
            .collect::<Result<_, _>>()?;

        for target in &targets {
            if let Some(resolved) = resolve_import(Some(&source), &target.name) {
                tracing::debug!(
                    module = %source,
                    name = resolved.name,
                    binding = target.binding(),
                    "recognised intrinsic import"
                );
                self.intrinsic_imports
                    .insert(target.binding().to_string(), resolved.constructor);
            }
        }

        Ok(Stmt::Import(Import::new(Some(source), targets)?))
    }

    fn lower_if(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        let mut branches = vec![self.lower_branch(node)?];

        for alternative in node.children_by_field("alternative") {
            match alternative.kind {
                SyntaxKind::ElifClause => branches.push(self.lower_branch(alternative)?),
                SyntaxKind::ElseClause => {
                    let body = self.lower_body(alternative, "body")?;
                    branches.push(Branch::otherwise(body));
                }
                _ => return Err(LowerError::unsupported(alternative)),
            }
        }

        Ok(Stmt::If(Conditional::new(branches)?))
    }

    /// `if` or `elif` clause: condition plus consequence
    fn lower_branch(&mut self, node: &SyntaxNode) -> Result<Branch, LowerError> {
        let condition = self.lower_expr(required(node, "condition")?)?;
        let body = self.lower_body(node, "consequence")?;
        Ok(Branch::new(condition, body))
    }

    fn lower_for(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        reject_async(node)?;
        if let Some(alternative) = node.child_by_field("alternative") {
            return Err(LowerError::unsupported_at("for-else", alternative.span));
        }

        let target = self.lower_expr(required(node, "left")?)?;
        let iterable = self.lower_expr(required(node, "right")?)?;
        let body = self.lower_body(node, "body")?;
        Ok(Stmt::for_loop(target, iterable, body)?)
    }

    fn lower_while(&mut self, node: &SyntaxNode) -> Result<Stmt, LowerError> {
        if let Some(alternative) = node.child_by_field("alternative") {
            return Err(LowerError::unsupported_at("while-else", alternative.span));
        }

        let condition = self.lower_expr(required(node, "condition")?)?;
        let body = self.lower_body(node, "body")?;
        Ok(Stmt::While { condition, body })
    }

    fn lower_body(&mut self, node: &SyntaxNode, field: &str) -> Result<Vec<Stmt>, LowerError> {
        let block = required(node, field)?;
        if block.kind != SyntaxKind::Block {
            return Err(LowerError::unsupported(block));
        }
        self.lower_statements(&block.children)
    }

    /// Lower a `def`; results stay empty until analysis fills them in
    fn lower_function(
        &mut self,
        node: &SyntaxNode,
        decorators: IndexMap<String, Vec<Expr>>,
        class_owner: Option<&str>,
    ) -> Result<FunctionDef, LowerError> {
        reject_async(node)?;
        for unsupported in ["return_type", "type_parameters"] {
            if let Some(child) = node.child_by_field(unsupported) {
                return Err(LowerError::unsupported_at(
                    format!("function {}", unsupported.replace('_', " ")),
                    child.span,
                ));
            }
        }

        let name = required(node, "name")?.text.clone();
        let arguments = self.lower_parameters(required(node, "parameters")?)?;
        let body = self.lower_body(node, "body")?;

        let mut def = FunctionDef::new(name, arguments, body);
        def.decorators = decorators;
        def.class_owner = class_owner.map(str::to_string);
        Ok(def)
    }

    fn lower_parameters(&mut self, node: &SyntaxNode) -> Result<Vec<Parameter>, LowerError> {
        node.named_children()
            .map(|parameter| match parameter.kind {
                SyntaxKind::Identifier => Ok(Argument::new(parameter.text.clone()).into()),
                SyntaxKind::DefaultParameter => {
                    let name = required(parameter, "name")?;
                    if name.kind != SyntaxKind::Identifier {
                        return Err(LowerError::unsupported(name));
                    }
                    let value = self.lower_expr(required(parameter, "value")?)?;
                    let argument = Node::Argument(Argument::new(name.text.clone()));
                    Ok(ValuedArgument::new(argument, value)?.into())
                }
                _ => Err(LowerError::unsupported(parameter)),
            })
            .collect()
    }

    fn lower_decorated(
        &mut self,
        node: &SyntaxNode,
        class_owner: Option<&str>,
    ) -> Result<FunctionDef, LowerError> {
        let mut decorators = IndexMap::new();
        for decorator in node
            .named_children()
            .filter(|child| child.kind == SyntaxKind::Decorator)
        {
            let (name, args) = self.lower_decorator(decorator)?;
            decorators.insert(name, args);
        }

        let definition = required(node, "definition")?;
        match definition.kind {
            SyntaxKind::FunctionDefinition => {
                self.lower_function(definition, decorators, class_owner)
            }
            _ => Err(LowerError::unsupported_at(
                format!("decorated {}", definition.kind),
                definition.span,
            )),
        }
    }

    /// `@name`, `@a.b` or `@name(args)`
    fn lower_decorator(&mut self, node: &SyntaxNode) -> Result<(String, Vec<Expr>), LowerError> {
        let expression = node
            .named_children()
            .next()
            .ok_or_else(|| LowerError::unsupported(node))?;

        match expression.kind {
            SyntaxKind::Call => {
                let callee = self.lower_callee(required(expression, "function")?)?;
                let args = self.lower_arguments(required(expression, "arguments")?)?;
                Ok((callee.to_string(), args))
            }
            _ => Ok((self.lower_callee(expression)?.to_string(), Vec::new())),
        }
    }

    /// Class whose attributes are the parameters of its first method
    fn lower_class(&mut self, node: &SyntaxNode) -> Result<ClassDef, LowerError> {
        if let Some(bases) = node.child_by_field("superclasses") {
            return Err(LowerError::unsupported_at("class bases", bases.span));
        }

        let name = required(node, "name")?.text.clone();
        let body = required(node, "body")?;

        let mut methods = Vec::new();
        for member in body.named_children() {
            match member.kind {
                SyntaxKind::FunctionDefinition => {
                    methods.push(self.lower_function(member, IndexMap::new(), Some(&name))?);
                }
                SyntaxKind::DecoratedDefinition => {
                    methods.push(self.lower_decorated(member, Some(&name))?);
                }
                SyntaxKind::Comment if member.is_pragma() => {
                    return Err(LowerError::unsupported_at("pragma in class body", member.span));
                }
                SyntaxKind::BlankLine | SyntaxKind::Comment | SyntaxKind::PassStatement => {}
                _ => return Err(LowerError::unsupported(member)),
            }
        }

        Ok(ClassDef::from_methods(name, methods))
    }
}

/// Lower a parsed module
///
/// Fails on the first construct without a conversion rule; no partial tree is
/// returned.
pub fn lower_source_file(
    frontend: &dyn Frontend,
    root: &SyntaxNode,
) -> Result<LoweredModule, LowerError> {
    let mut ctx = LoweringContext::new(frontend);
    let body = ctx.lower_module(root)?;

    tracing::debug!(
        statements = body.len(),
        intrinsics = ctx.intrinsic_imports.len(),
        "lowered module"
    );

    Ok(LoweredModule {
        body,
        intrinsic_imports: ctx.intrinsic_imports,
    })
}

/// Child stored under `field`, which the grammar guarantees for valid input
pub(crate) fn required<'node>(
    node: &'node SyntaxNode,
    field: &str,
) -> Result<&'node SyntaxNode, LowerError> {
    node.child_by_field(field)
        .ok_or_else(|| LowerError::unsupported_at(format!("{} without {field}", node.kind), node.span))
}

fn reject_async(node: &SyntaxNode) -> Result<(), LowerError> {
    if node.has_token("async") {
        return Err(LowerError::unsupported_at(format!("async {}", node.kind), node.span));
    }
    Ok(())
}

fn is_print_call(node: &SyntaxNode) -> bool {
    node.child_by_field("function")
        .is_some_and(|callee| callee.kind == SyntaxKind::Identifier && callee.text == "print")
}

/// `a.b.c` in import position
fn dotted_name(node: &SyntaxNode) -> Result<Name, LowerError> {
    let parts = node
        .named_children()
        .map(|part| {
            if part.kind == SyntaxKind::Identifier {
                Ok(part.text.clone())
            } else {
                Err(LowerError::unsupported(part))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Name::from_parts(parts)?)
}

fn lower_import_target(node: &SyntaxNode) -> Result<ImportTarget, LowerError> {
    match node.kind {
        SyntaxKind::DottedName => Ok(ImportTarget::new(dotted_name(node)?)),
        SyntaxKind::AliasedImport => {
            let name = dotted_name(required(node, "name")?)?;
            let alias = required(node, "alias")?.text.clone();
            Ok(ImportTarget::aliased(name, alias))
        }
        _ => Err(LowerError::unsupported(node)),
    }
}
