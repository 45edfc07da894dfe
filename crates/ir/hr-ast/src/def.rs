//! Function and class definitions

use crate::expr::{Expr, Symbol};
use crate::meta::VariableMeta;
use crate::stmt::{Import, Stmt};
use crate::{MalformedNode, Node, NodeKind};
use derive_more::Display;
use indexmap::IndexMap;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Formal parameter name
#[derive(Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[display("{name}")]
pub struct Argument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VariableMeta>,
}

impl Argument {
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
}

/// Formal parameter with a default value
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ValuedArgument {
    argument: Argument,
    value: Expr,
}

impl ValuedArgument {
    /// Pairs a parameter with its default
    ///
    /// Fails unless `argument` is an [`Node::Argument`].
    pub fn new(argument: Node, value: Expr) -> Result<Self, MalformedNode> {
        match argument {
            Node::Argument(argument) => Ok(Self { argument, value }),
            other => Err(MalformedNode::WrongChildKind {
                node: NodeKind::ValuedArgument,
                expected: NodeKind::Argument,
                found: other.kind(),
            }),
        }
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}

/// Entry of a parameter list
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    Plain(Argument),
    Valued(ValuedArgument),
}

impl Parameter {
    pub fn argument(&self) -> &Argument {
        match self {
            Self::Plain(argument) => argument,
            Self::Valued(valued) => valued.argument(),
        }
    }

    pub fn name(&self) -> &str {
        &self.argument().name
    }
}

impl From<Argument> for Parameter {
    fn from(argument: Argument) -> Self {
        Self::Plain(argument)
    }
}

impl From<ValuedArgument> for Parameter {
    fn from(valued: ValuedArgument) -> Self {
        Self::Valued(valued)
    }
}

/// Whether a definition returns through its results or its arguments
#[derive(Copy, Clone, Debug, Default, Display, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    #[default]
    #[display("function")]
    Function,
    #[display("procedure")]
    Procedure,
}

/// Function definition
///
/// Lowering leaves `results` empty; a later analysis fills it in together
/// with the variable metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub arguments: Vec<Parameter>,
    pub results: Vec<Symbol>,
    pub body: Vec<Stmt>,
    pub local_vars: Vec<Symbol>,
    pub global_vars: Vec<Symbol>,
    pub class_owner: Option<String>,
    pub is_hidden: bool,
    pub kind: FunctionKind,
    pub imports: Vec<Import>,
    /// Decorator name to its argument list, in source order
    pub decorators: IndexMap<String, Vec<Expr>>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, arguments: Vec<Parameter>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            arguments,
            results: Vec::new(),
            body,
            local_vars: Vec::new(),
            global_vars: Vec::new(),
            class_owner: None,
            is_hidden: false,
            kind: FunctionKind::Function,
            imports: Vec::new(),
            decorators: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_results(mut self, results: Vec<Symbol>) -> Self {
        self.results = results;
        self
    }

    #[must_use]
    pub fn with_decorator(mut self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        self.decorators.insert(name.into(), args);
        self
    }

    #[must_use]
    pub fn with_class_owner(mut self, owner: impl Into<String>) -> Self {
        self.class_owner = Some(owner.into());
        self
    }

    /// Parameter names in declaration order
    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(Parameter::name)
    }
}

impl Hash for FunctionDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.arguments.hash(state);
        self.results.hash(state);
        self.body.hash(state);
        self.local_vars.hash(state);
        self.global_vars.hash(state);
        self.class_owner.hash(state);
        self.is_hidden.hash(state);
        self.kind.hash(state);
        self.imports.hash(state);

        // map equality ignores insertion order, so the hash must too
        let mut decorators: Vec<_> = self.decorators.iter().collect();
        decorators.sort_by(|left, right| left.0.cmp(right.0));
        decorators.hash(state);
    }
}

/// Class definition
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ClassDef {
    pub name: String,
    /// Parameters of the first method, the initializer
    pub attributes: Vec<Argument>,
    pub methods: Vec<FunctionDef>,
}

impl ClassDef {
    /// Builds a class whose attributes come from its first method
    pub fn from_methods(name: impl Into<String>, methods: Vec<FunctionDef>) -> Self {
        let attributes = methods
            .first()
            .map(|method| {
                method
                    .arguments
                    .iter()
                    .map(|parameter| parameter.argument().clone())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.into(),
            attributes,
            methods,
        }
    }
}
