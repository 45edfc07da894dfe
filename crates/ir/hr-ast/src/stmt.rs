//! Statements and control structures

use crate::def::{ClassDef, FunctionDef};
use crate::expr::{BinaryOperator, Expr, Name};
use crate::{MalformedNode, NodeKind};
use derive_more::Display;
use serde::Serialize;

/// Statement nodes
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Assign {
        lhs: Expr,
        rhs: Expr,
    },
    AugAssign {
        lhs: Expr,
        op: BinaryOperator,
        rhs: Expr,
    },
    /// `return`, holding [`Expr::Nil`] when no value is given
    Return {
        value: Expr,
    },
    Print {
        items: Vec<Expr>,
    },
    /// Plain comment, text without the leading `#`
    Comment {
        text: String,
    },
    Pragma(Pragma),
    EmptyLine,
    Pass,
    Import(Import),
    If(Conditional),
    For(ForLoop),
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    /// Expression evaluated for its effect
    Expr {
        value: Expr,
    },
}

impl Stmt {
    /// Builds a `for` loop, see [`ForLoop::new`]
    pub fn for_loop(target: Expr, iterable: Expr, body: Vec<Self>) -> Result<Self, MalformedNode> {
        ForLoop::new(target, iterable, body).map(Self::For)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Assign { .. } => NodeKind::Assign,
            Self::AugAssign { .. } => NodeKind::AugAssign,
            Self::Return { .. } => NodeKind::Return,
            Self::Print { .. } => NodeKind::Print,
            Self::Comment { .. } => NodeKind::Comment,
            Self::Pragma(_) => NodeKind::Pragma,
            Self::EmptyLine => NodeKind::EmptyLine,
            Self::Pass => NodeKind::Pass,
            Self::Import(_) => NodeKind::Import,
            Self::If(_) => NodeKind::If,
            Self::For(_) => NodeKind::For,
            Self::While { .. } => NodeKind::While,
            Self::FunctionDef(_) => NodeKind::FunctionDef,
            Self::ClassDef(_) => NodeKind::ClassDef,
            Self::Expr { .. } => NodeKind::ExprStmt,
        }
    }
}

/// Directive families a pragma may belong to
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PragmaFamily {
    /// OpenMP
    #[display("omp")]
    Omp,
    /// OpenACC
    #[display("acc")]
    Acc,
    /// Type header for a function or variable
    #[display("header")]
    Header,
}

impl PragmaFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "omp" => Some(Self::Omp),
            "acc" => Some(Self::Acc),
            "header" => Some(Self::Header),
            _ => None,
        }
    }
}

/// A `#$` directive comment after re-parsing
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Pragma {
    pub family: PragmaFamily,
    pub clauses: Vec<String>,
}

impl Pragma {
    pub fn new<S: Into<String>>(family: PragmaFamily, clauses: impl IntoIterator<Item = S>) -> Self {
        Self {
            family,
            clauses: clauses.into_iter().map(Into::into).collect(),
        }
    }
}

/// One name bound by an import
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ImportTarget {
    pub name: Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportTarget {
    pub fn new(name: Name) -> Self {
        Self { name, alias: None }
    }

    pub fn aliased(name: Name, alias: impl Into<String>) -> Self {
        Self {
            name,
            alias: Some(alias.into()),
        }
    }

    /// Local name this target binds
    pub fn binding(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| self.name.last())
    }
}

/// `import a, b` or `from source import a, b`
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Import {
    source: Option<Name>,
    targets: Vec<ImportTarget>,
}

impl Import {
    pub fn new(source: Option<Name>, targets: Vec<ImportTarget>) -> Result<Self, MalformedNode> {
        if targets.is_empty() {
            return Err(MalformedNode::EmptyImport);
        }
        Ok(Self { source, targets })
    }

    pub fn source(&self) -> Option<&Name> {
        self.source.as_ref()
    }

    pub fn targets(&self) -> &[ImportTarget] {
        &self.targets
    }
}

/// Condition of one conditional branch
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Expr(Expr),
    /// The `else` branch
    Always,
}

/// One `(condition, body)` pair of a conditional
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Branch {
    pub condition: Condition,
    pub body: Vec<Stmt>,
}

impl Branch {
    pub fn new(condition: Expr, body: Vec<Stmt>) -> Self {
        Self {
            condition: Condition::Expr(condition),
            body,
        }
    }

    pub fn otherwise(body: Vec<Stmt>) -> Self {
        Self {
            condition: Condition::Always,
            body,
        }
    }
}

/// `for target in iterable:` loop
///
/// The target is a name or a non-empty tuple of names.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ForLoop {
    target: Expr,
    iterable: Expr,
    body: Vec<Stmt>,
}

impl ForLoop {
    pub fn new(target: Expr, iterable: Expr, body: Vec<Stmt>) -> Result<Self, MalformedNode> {
        let valid = match &target {
            Expr::Symbol(_) => true,
            Expr::Tuple(items) => {
                !items.is_empty() && items.iter().all(|item| matches!(item, Expr::Symbol(_)))
            }
            _ => false,
        };
        if !valid {
            return Err(MalformedNode::InvalidLoopTarget {
                found: target.kind(),
            });
        }
        Ok(Self {
            target,
            iterable,
            body,
        })
    }

    pub fn target(&self) -> &Expr {
        &self.target
    }

    pub fn iterable(&self) -> &Expr {
        &self.iterable
    }

    pub fn body(&self) -> &[Stmt] {
        &self.body
    }
}

/// `if` / `elif` / `else` chain
///
/// Holds at least one branch; only the last one may be [`Condition::Always`].
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Conditional {
    branches: Vec<Branch>,
}

impl Conditional {
    pub fn new(branches: Vec<Branch>) -> Result<Self, MalformedNode> {
        if branches.is_empty() {
            return Err(MalformedNode::EmptyConditional);
        }
        let last = branches.len() - 1;
        if let Some(position) = branches
            .iter()
            .position(|branch| branch.condition == Condition::Always)
            .filter(|&position| position != last)
        {
            return Err(MalformedNode::MisplacedElse {
                position,
                branches: branches.len(),
            });
        }
        Ok(Self { branches })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn has_else(&self) -> bool {
        self.branches
            .last()
            .is_some_and(|branch| branch.condition == Condition::Always)
    }
}
