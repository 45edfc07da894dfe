//! Python language adapter
//!
//! Maps the tree-sitter-python grammar onto the generic [`SyntaxNode`] tree
//! and normalises layout: blank lines between statements become
//! [`SyntaxKind::BlankLine`] nodes and comments survive only where a
//! statement could stand.

pub mod directive;

use anyhow::Result;
use hr_span::Span;
use hr_syntax::{Language, SyntaxKind, SyntaxNode};
use tree_sitter::{Parser, Tree};

pub use directive::parse_directive;

/// Python language implementation
pub struct PythonLanguage;

impl PythonLanguage {
    /// Creates a new Python language adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for PythonLanguage {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &[&'static str] {
        &["py", "pyh"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn parse(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.tree_sitter_language())?;

        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("tree-sitter parse failed"))
    }

    fn lower_node(&self, node: &tree_sitter::Node, source: &str) -> SyntaxNode {
        Converter::new(source).convert(node)
    }
}

/// Maps a named grammar kind onto the closed kind set
fn classify(kind: &str) -> SyntaxKind {
    match kind {
        "module" => SyntaxKind::Module,
        "block" => SyntaxKind::Block,
        "comment" => SyntaxKind::Comment,
        "expression_statement" => SyntaxKind::ExpressionStatement,
        "assignment" => SyntaxKind::Assignment,
        "augmented_assignment" => SyntaxKind::AugmentedAssignment,
        "return_statement" => SyntaxKind::ReturnStatement,
        "pass_statement" => SyntaxKind::PassStatement,
        "print_statement" => SyntaxKind::PrintStatement,
        "import_statement" => SyntaxKind::ImportStatement,
        "import_from_statement" => SyntaxKind::ImportFromStatement,
        "aliased_import" => SyntaxKind::AliasedImport,
        "dotted_name" => SyntaxKind::DottedName,
        "if_statement" => SyntaxKind::IfStatement,
        "elif_clause" => SyntaxKind::ElifClause,
        "else_clause" => SyntaxKind::ElseClause,
        "for_statement" => SyntaxKind::ForStatement,
        "while_statement" => SyntaxKind::WhileStatement,
        "function_definition" => SyntaxKind::FunctionDefinition,
        "decorated_definition" => SyntaxKind::DecoratedDefinition,
        "decorator" => SyntaxKind::Decorator,
        "class_definition" => SyntaxKind::ClassDefinition,
        "parameters" => SyntaxKind::Parameters,
        "default_parameter" => SyntaxKind::DefaultParameter,
        "argument_list" => SyntaxKind::ArgumentList,
        "call" => SyntaxKind::Call,
        "attribute" => SyntaxKind::Attribute,
        "subscript" => SyntaxKind::Subscript,
        "slice" => SyntaxKind::Slice,
        "binary_operator" => SyntaxKind::BinaryOperator,
        "boolean_operator" => SyntaxKind::BooleanOperator,
        "comparison_operator" => SyntaxKind::ComparisonOperator,
        "unary_operator" => SyntaxKind::UnaryOperator,
        "not_operator" => SyntaxKind::NotOperator,
        "parenthesized_expression" => SyntaxKind::ParenthesizedExpression,
        "list" | "list_pattern" => SyntaxKind::List,
        "tuple" | "tuple_pattern" => SyntaxKind::Tuple,
        "expression_list" | "pattern_list" => SyntaxKind::ExpressionList,
        "identifier" => SyntaxKind::Identifier,
        "integer" => SyntaxKind::Integer,
        "float" => SyntaxKind::Float,
        "string" => SyntaxKind::String,
        "true" => SyntaxKind::True,
        "false" => SyntaxKind::False,
        "none" => SyntaxKind::None,
        other => SyntaxKind::Unknown(other.to_string()),
    }
}

/// Kinds whose inner structure is not needed downstream
fn is_leaf(kind: &SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::Integer
            | SyntaxKind::Float
            | SyntaxKind::String
            | SyntaxKind::True
            | SyntaxKind::False
            | SyntaxKind::None
            | SyntaxKind::Comment
            | SyntaxKind::Token
    )
}

/// Compound statements whose header may carry a comment
fn hoists_comments(kind: &SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IfStatement
            | SyntaxKind::ElifClause
            | SyntaxKind::ElseClause
            | SyntaxKind::ForStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::FunctionDefinition
            | SyntaxKind::ClassDefinition
            | SyntaxKind::DecoratedDefinition
    )
}

struct Converter<'src> {
    source: &'src str,
    /// Start offset and text of every source row
    rows: Vec<(usize, &'src str)>,
}

impl<'src> Converter<'src> {
    fn new(source: &'src str) -> Self {
        let mut start = 0;
        let rows = source
            .split('\n')
            .map(|line| {
                let row = (start, line);
                start += line.len() + 1;
                row
            })
            .collect();
        Self { source, rows }
    }

    fn convert(&self, node: &tree_sitter::Node) -> SyntaxNode {
        let kind = if node.is_named() {
            classify(node.kind())
        } else {
            SyntaxKind::Token
        };

        let span = Span::from_range(node.start_byte()..node.end_byte());
        let text = self.source[node.start_byte()..node.end_byte()].to_string();

        let mut children = Vec::new();
        if !is_leaf(&kind) {
            let keeps_comments =
                matches!(kind, SyntaxKind::Module | SyntaxKind::Block) || hoists_comments(&kind);

            let mut cursor = node.walk();
            if cursor.goto_first_child() {
                loop {
                    let child = cursor.node();
                    let field = cursor.field_name();

                    if child.kind() != "comment" || keeps_comments {
                        let mut lowered = self.convert(&child);
                        lowered.field = field;
                        children.push((child, lowered));
                    }

                    if !cursor.goto_next_sibling() {
                        break;
                    }
                }
            }
        }

        let mut children = match kind {
            SyntaxKind::Module | SyntaxKind::Block => {
                self.with_blank_lines(&kind, node, children)
            }
            _ => children.into_iter().map(|(_, lowered)| lowered).collect(),
        };

        if hoists_comments(&kind) {
            hoist_comments(&mut children);
        }

        SyntaxNode {
            kind,
            span,
            text,
            field: None,
            children,
        }
    }

    /// Interleaves one `BlankLine` per whitespace-only row
    ///
    /// A block also takes the rows between its header and its first
    /// statement; the module also takes the rows after its last statement.
    /// Rows after the last statement of a block belong to the enclosing level.
    fn with_blank_lines(
        &self,
        kind: &SyntaxKind,
        parent: &tree_sitter::Node,
        children: Vec<(tree_sitter::Node, SyntaxNode)>,
    ) -> Vec<SyntaxNode> {
        let mut result = Vec::with_capacity(children.len());
        let mut next_row = match kind {
            SyntaxKind::Module => Some(0),
            _ => header_row(parent).map(|row| row + 1),
        };

        for (node, lowered) in children {
            if let Some(from) = next_row {
                self.push_blank_rows(&mut result, from..node.start_position().row);
            }
            next_row = Some(last_row_of(&node) + 1);
            result.push(lowered);
        }

        if let (SyntaxKind::Module, Some(from)) = (kind, next_row) {
            self.push_blank_rows(&mut result, from..self.text_rows());
        }

        result
    }

    fn push_blank_rows(&self, result: &mut Vec<SyntaxNode>, rows: std::ops::Range<usize>) {
        for row in rows {
            let blank = self.rows.get(row).filter(|(_, line)| line.trim().is_empty());
            if let Some(&(start, _)) = blank {
                result.push(blank_line(u32::try_from(start).unwrap_or(u32::MAX)));
            }
        }
    }

    /// Rows that hold text, not counting the empty row after a final newline
    fn text_rows(&self) -> usize {
        if self.source.ends_with('\n') {
            self.rows.len() - 1
        } else {
            self.rows.len()
        }
    }
}

/// Row of the token that opens a block, skipping comments after it
fn header_row(block: &tree_sitter::Node) -> Option<usize> {
    let mut sibling = block.prev_sibling();
    while let Some(node) = sibling {
        if node.kind() != "comment" {
            return Some(node.end_position().row);
        }
        sibling = node.prev_sibling();
    }
    None
}

/// Last row holding text of `node`, ignoring a trailing line break
fn last_row_of(node: &tree_sitter::Node) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row - 1
    } else {
        end.row
    }
}

fn blank_line(offset: u32) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::BlankLine, Span::empty_at(offset), "", Vec::new())
}

/// Moves header comments of a compound statement into a body block
///
/// A comment goes to the front of the next block; a comment with no block
/// after it goes to the end of the previous one.
fn hoist_comments(children: &mut Vec<SyntaxNode>) {
    let mut index = 0;
    while index < children.len() {
        if children[index].kind != SyntaxKind::Comment {
            index += 1;
            continue;
        }

        let next = (index + 1..children.len()).find(|&at| has_body(&children[at]));
        let previous = (0..index).rev().find(|&at| has_body(&children[at]));

        match (next, previous) {
            (Some(at), _) => {
                let comment = children.remove(index);
                if let Some(block) = body_mut(&mut children[at - 1]) {
                    let position = block
                        .children
                        .iter()
                        .take_while(|child| {
                            matches!(child.kind, SyntaxKind::BlankLine | SyntaxKind::Comment)
                                && child.span.start < comment.span.start
                        })
                        .count();
                    block.children.insert(position, comment);
                }
            }
            (None, Some(at)) => {
                let comment = children.remove(index);
                if let Some(block) = body_mut(&mut children[at]) {
                    block.children.push(comment);
                }
            }
            (None, None) => {
                children.remove(index);
            }
        }
    }
}

fn has_body(node: &SyntaxNode) -> bool {
    node.kind == SyntaxKind::Block
        || matches!(
            node.kind,
            SyntaxKind::FunctionDefinition | SyntaxKind::ClassDefinition
        ) && node.child_by_field("body").is_some()
}

fn body_mut(node: &mut SyntaxNode) -> Option<&mut SyntaxNode> {
    if node.kind == SyntaxKind::Block {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find(|child| child.field == Some("body") && child.kind == SyntaxKind::Block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(source: &str) -> SyntaxNode {
        let language = PythonLanguage::new();
        let tree = language.parse(source).unwrap();
        language.lower_node(&tree.root_node(), source)
    }

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children.iter().map(|child| child.kind.clone()).collect()
    }

    fn contains_kind(node: &SyntaxNode, kind: &SyntaxKind) -> bool {
        node.kind == *kind || node.children.iter().any(|child| contains_kind(child, kind))
    }

    #[test]
    fn assignment_keeps_fields() {
        let root = lower("x = 1\n");
        assert_eq!(root.kind, SyntaxKind::Module);

        let statement = &root.children[0];
        assert_eq!(statement.kind, SyntaxKind::ExpressionStatement);

        let assignment = &statement.children[0];
        assert_eq!(assignment.kind, SyntaxKind::Assignment);
        assert_eq!(
            assignment.child_by_field("left").map(|node| node.text.as_str()),
            Some("x")
        );
        assert_eq!(
            assignment.child_by_field("right").map(|node| node.kind.clone()),
            Some(SyntaxKind::Integer)
        );
        assert!(assignment.has_token("="));
    }

    #[test]
    fn blank_lines_between_statements() {
        let root = lower("\na = 1\n\n\nb = 2\nc = 3\n");
        assert_eq!(
            kinds(&root),
            vec![
                SyntaxKind::BlankLine,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::BlankLine,
                SyntaxKind::BlankLine,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::ExpressionStatement,
            ]
        );
    }

    #[test]
    fn trailing_blank_lines_stay_with_the_module() {
        let root = lower("a = 1\n\n");
        assert_eq!(
            kinds(&root),
            vec![SyntaxKind::ExpressionStatement, SyntaxKind::BlankLine]
        );
    }

    #[test]
    fn blank_lines_open_a_nested_block() {
        let root = lower("for i in xs:\n\n    pass\n");
        let body = root.children[0].child_by_field("body").unwrap();
        assert_eq!(
            kinds(body),
            vec![SyntaxKind::BlankLine, SyntaxKind::PassStatement]
        );
    }

    #[test]
    fn hoisted_comments_keep_their_row_order() {
        let root = lower("for i in xs:  # head\n\n    # inner\n    pass\n");
        let body = root.children[0].child_by_field("body").unwrap();
        assert_eq!(
            kinds(body),
            vec![
                SyntaxKind::Comment,
                SyntaxKind::BlankLine,
                SyntaxKind::Comment,
                SyntaxKind::PassStatement,
            ]
        );
    }

    #[test]
    fn header_comment_moves_into_body() {
        let root = lower("def f():  # note\n    return 1\n");
        let function = &root.children[0];
        assert_eq!(function.kind, SyntaxKind::FunctionDefinition);
        assert!(
            function
                .children
                .iter()
                .all(|child| child.kind != SyntaxKind::Comment)
        );

        let body = function.child_by_field("body").unwrap();
        assert!(body.children.iter().any(|child| child.kind == SyntaxKind::Comment));
    }

    #[test]
    fn comments_inside_expressions_are_dropped() {
        let root = lower("x = f(1,  # first\n      2)\n");
        assert!(!contains_kind(&root.children[0], &SyntaxKind::Comment));
    }

    #[test]
    fn unsupported_kinds_keep_their_name() {
        let root = lower("with f() as g:\n    pass\n");
        assert_eq!(
            root.children[0].kind,
            SyntaxKind::Unknown("with_statement".to_string())
        );
    }

    #[test]
    fn operator_tokens_are_leaves() {
        let root = lower("a = b ** 2\n");
        let assignment = &root.children[0].children[0];
        let power = assignment.child_by_field("right").unwrap();
        assert_eq!(power.kind, SyntaxKind::BinaryOperator);
        let operator = power.child_by_field("operator").unwrap();
        assert_eq!(operator.kind, SyntaxKind::Token);
        assert_eq!(operator.text, "**");
        assert!(operator.children.is_empty());
    }
}
