//! Concrete syntax tree shared by the front end and the lowering engine
//!
//! The tree is deliberately generic: every node carries its kind, its source
//! text, the grammar field it occupies inside its parent and its children in
//! source order. Anonymous grammar tokens (keywords, operators, punctuation)
//! are kept as [`SyntaxKind::Token`] children so that operator text stays
//! available to later stages.

use anyhow::Result;
use hr_span::Span;
use std::fmt;

/// Text that starts a pragma comment
pub const PRAGMA_MARKER: &str = "#$";

/// Generic syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// The kind of this node
    pub kind: SyntaxKind,
    /// Source location
    pub span: Span,
    /// Source text covered by this node
    pub text: String,
    /// Grammar field this node occupies in its parent, if any
    pub field: Option<&'static str>,
    /// Child nodes
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a node without a field name
    pub fn new(kind: SyntaxKind, span: Span, text: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
            field: None,
            children,
        }
    }

    /// Returns the same node tagged with a grammar field
    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Children that are not anonymous tokens
    pub fn named_children(&self) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(|child| child.kind != SyntaxKind::Token)
    }

    /// Anonymous token children
    pub fn tokens(&self) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(|child| child.kind == SyntaxKind::Token)
    }

    /// Whether a token with exactly this text is a direct child
    pub fn has_token(&self, text: &str) -> bool {
        self.tokens().any(|token| token.text == text)
    }

    /// First child stored under `field`
    pub fn child_by_field(&self, field: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|child| child.field == Some(field))
    }

    /// All children stored under `field`, in source order
    pub fn children_by_field<'node>(
        &'node self,
        field: &'node str,
    ) -> impl Iterator<Item = &'node Self> + 'node {
        self.children
            .iter()
            .filter(move |child| child.field == Some(field))
    }

    /// Whether this node is a comment that starts with the pragma marker
    pub fn is_pragma(&self) -> bool {
        self.kind == SyntaxKind::Comment && self.text.starts_with(PRAGMA_MARKER)
    }
}

/// Node kinds of the supported Python subset
///
/// Every grammar kind outside this set is carried as [`SyntaxKind::Unknown`]
/// so that later stages can reject it by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of a source file
    Module,
    /// Indented statement block
    Block,
    /// A blank source line between two statements
    BlankLine,
    /// Line comment, including pragma comments
    Comment,
    /// Expression used as a statement
    ExpressionStatement,
    /// `target = value`
    Assignment,
    /// `target += value` and friends
    AugmentedAssignment,
    /// `return value`
    ReturnStatement,
    /// `pass`
    PassStatement,
    /// Python 2 `print a, b`
    PrintStatement,
    /// `import a.b`
    ImportStatement,
    /// `from a import b`
    ImportFromStatement,
    /// `name as alias`
    AliasedImport,
    /// `a.b.c` inside imports
    DottedName,
    /// `if` statement with its clauses
    IfStatement,
    /// `elif` clause
    ElifClause,
    /// `else` clause
    ElseClause,
    /// `for` loop
    ForStatement,
    /// `while` loop
    WhileStatement,
    /// `def` statement
    FunctionDefinition,
    /// Decorators followed by a definition
    DecoratedDefinition,
    /// `@decorator`
    Decorator,
    /// `class` statement
    ClassDefinition,
    /// Formal parameter list
    Parameters,
    /// `name=value` formal parameter
    DefaultParameter,
    /// Call argument list
    ArgumentList,
    /// Call expression
    Call,
    /// `object.attribute`
    Attribute,
    /// `value[index]`
    Subscript,
    /// `start:stop:step`
    Slice,
    /// Arithmetic operator
    BinaryOperator,
    /// `and` / `or`
    BooleanOperator,
    /// Comparison chain
    ComparisonOperator,
    /// Unary `-`, `+`, `~`
    UnaryOperator,
    /// `not`
    NotOperator,
    /// `(expr)`
    ParenthesizedExpression,
    /// `[a, b]`
    List,
    /// `(a, b)`
    Tuple,
    /// Bare `a, b`
    ExpressionList,
    /// Identifier
    Identifier,
    /// Integer literal, possibly imaginary
    Integer,
    /// Float literal, possibly imaginary
    Float,
    /// String literal including its quotes
    String,
    /// `True`
    True,
    /// `False`
    False,
    /// `None`
    None,
    /// Parsed pragma directive
    Directive,
    /// One clause of a pragma directive
    DirectiveClause,
    /// Anonymous token (keyword, operator, punctuation)
    Token,
    /// Grammar kind outside the supported subset
    Unknown(String),
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(formatter, "module"),
            Self::Block => write!(formatter, "block"),
            Self::BlankLine => write!(formatter, "blank_line"),
            Self::Comment => write!(formatter, "comment"),
            Self::ExpressionStatement => write!(formatter, "expression_statement"),
            Self::Assignment => write!(formatter, "assignment"),
            Self::AugmentedAssignment => write!(formatter, "augmented_assignment"),
            Self::ReturnStatement => write!(formatter, "return_statement"),
            Self::PassStatement => write!(formatter, "pass_statement"),
            Self::PrintStatement => write!(formatter, "print_statement"),
            Self::ImportStatement => write!(formatter, "import_statement"),
            Self::ImportFromStatement => write!(formatter, "import_from_statement"),
            Self::AliasedImport => write!(formatter, "aliased_import"),
            Self::DottedName => write!(formatter, "dotted_name"),
            Self::IfStatement => write!(formatter, "if_statement"),
            Self::ElifClause => write!(formatter, "elif_clause"),
            Self::ElseClause => write!(formatter, "else_clause"),
            Self::ForStatement => write!(formatter, "for_statement"),
            Self::WhileStatement => write!(formatter, "while_statement"),
            Self::FunctionDefinition => write!(formatter, "function_definition"),
            Self::DecoratedDefinition => write!(formatter, "decorated_definition"),
            Self::Decorator => write!(formatter, "decorator"),
            Self::ClassDefinition => write!(formatter, "class_definition"),
            Self::Parameters => write!(formatter, "parameters"),
            Self::DefaultParameter => write!(formatter, "default_parameter"),
            Self::ArgumentList => write!(formatter, "argument_list"),
            Self::Call => write!(formatter, "call"),
            Self::Attribute => write!(formatter, "attribute"),
            Self::Subscript => write!(formatter, "subscript"),
            Self::Slice => write!(formatter, "slice"),
            Self::BinaryOperator => write!(formatter, "binary_operator"),
            Self::BooleanOperator => write!(formatter, "boolean_operator"),
            Self::ComparisonOperator => write!(formatter, "comparison_operator"),
            Self::UnaryOperator => write!(formatter, "unary_operator"),
            Self::NotOperator => write!(formatter, "not_operator"),
            Self::ParenthesizedExpression => write!(formatter, "parenthesized_expression"),
            Self::List => write!(formatter, "list"),
            Self::Tuple => write!(formatter, "tuple"),
            Self::ExpressionList => write!(formatter, "expression_list"),
            Self::Identifier => write!(formatter, "identifier"),
            Self::Integer => write!(formatter, "integer"),
            Self::Float => write!(formatter, "float"),
            Self::String => write!(formatter, "string"),
            Self::True => write!(formatter, "true"),
            Self::False => write!(formatter, "false"),
            Self::None => write!(formatter, "none"),
            Self::Directive => write!(formatter, "directive"),
            Self::DirectiveClause => write!(formatter, "directive_clause"),
            Self::Token => write!(formatter, "token"),
            Self::Unknown(name) => write!(formatter, "{name}"),
        }
    }
}

/// Trait for tree-sitter backed language adapters
pub trait Language: Send + Sync + 'static {
    /// Name of the language
    fn name(&self) -> &'static str;

    /// File extensions this language handles
    fn extensions(&self) -> &[&'static str];

    /// tree-sitter language instance
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Parse source code to a tree-sitter tree
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing is aborted
    fn parse(&self, source: &str) -> Result<tree_sitter::Tree>;

    /// Convert a tree-sitter node to a generic syntax node
    fn lower_node(&self, node: &tree_sitter::Node, source: &str) -> SyntaxNode;
}

/// Errors reported by a [`Frontend`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontendError {
    /// The source text has syntax errors
    #[error("{count} syntax error(s), first: {first}")]
    Syntax {
        /// Message of the first error
        first: String,
        /// Total number of errors
        count: usize,
    },
    /// A pragma comment does not follow the directive grammar
    #[error("malformed directive `{text}`: {reason}")]
    Directive {
        /// Directive text, marker included
        text: String,
        /// What is wrong with it
        reason: String,
    },
    /// The parser itself failed
    #[error("front end failed: {0}")]
    Failed(String),
}

/// Handle to the front-end grammar
///
/// The lowering engine holds one of these so that it can re-enter the
/// grammar while lowering, e.g. to parse the text of a pragma comment.
pub trait Frontend: Send + Sync {
    /// Parse a complete source text into a `Module` node
    fn parse_source(&self, source: &str) -> Result<SyntaxNode, FrontendError>;

    /// Parse the text of a pragma comment into a `Directive` node
    fn parse_directive(&self, text: &str) -> Result<SyntaxNode, FrontendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: SyntaxKind, text: &str) -> SyntaxNode {
        SyntaxNode::new(kind, Span::default(), text, Vec::new())
    }

    #[test]
    fn field_lookup_skips_other_fields() {
        let node = SyntaxNode::new(
            SyntaxKind::Assignment,
            Span::new(0, 5),
            "x = 1",
            vec![
                leaf(SyntaxKind::Identifier, "x").with_field("left"),
                leaf(SyntaxKind::Token, "="),
                leaf(SyntaxKind::Integer, "1").with_field("right"),
            ],
        );

        assert_eq!(node.child_by_field("right").map(|child| child.text.as_str()), Some("1"));
        assert_eq!(node.named_children().count(), 2);
        assert!(node.has_token("="));
        assert!(node.child_by_field("type").is_none());
    }

    #[test]
    fn pragma_detection_needs_marker() {
        assert!(leaf(SyntaxKind::Comment, "#$ omp parallel").is_pragma());
        assert!(!leaf(SyntaxKind::Comment, "# omp parallel").is_pragma());
        assert!(!leaf(SyntaxKind::String, "#$ omp").is_pragma());
    }

    #[test]
    fn unknown_kinds_display_their_grammar_name() {
        assert_eq!(SyntaxKind::Unknown("with_statement".into()).to_string(), "with_statement");
        assert_eq!(SyntaxKind::IfStatement.to_string(), "if_statement");
    }
}
