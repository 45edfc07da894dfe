//! Grammar for pragma comments
//!
//! A pragma is a comment starting with `#$`, followed by a directive family
//! and whitespace separated clauses. Parentheses group a clause, so
//! `#$ omp parallel private(i, j)` has the clauses `parallel` and
//! `private(i, j)`.

use hr_span::Span;
use hr_syntax::{FrontendError, PRAGMA_MARKER, SyntaxKind, SyntaxNode};

/// Parses the text of a pragma comment into a `Directive` node
///
/// The first child is the family (field `family`), the remaining children
/// are the clauses (field `clause`) in source order.
pub fn parse_directive(text: &str) -> Result<SyntaxNode, FrontendError> {
    let fail = |reason: &str| FrontendError::Directive {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let body = text
        .strip_prefix(PRAGMA_MARKER)
        .ok_or_else(|| fail("missing `#$` marker"))?;
    let base = PRAGMA_MARKER.len();

    let words = split_clauses(body).map_err(|reason| fail(reason))?;
    let Some(((family_start, family), clauses)) = words.split_first() else {
        return Err(fail("empty directive"));
    };

    let is_identifier = family
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && family
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if !is_identifier {
        return Err(fail("directive family must be an identifier"));
    }

    let word_node = |kind: SyntaxKind, start: usize, word: &str, field: &'static str| {
        let start = base + start;
        SyntaxNode::new(kind, Span::from_range(start..start + word.len()), word, Vec::new())
            .with_field(field)
    };

    let mut children = Vec::with_capacity(words.len());
    children.push(word_node(SyntaxKind::Identifier, *family_start, family, "family"));
    for (start, clause) in clauses {
        children.push(word_node(SyntaxKind::DirectiveClause, *start, clause, "clause"));
    }

    Ok(SyntaxNode::new(
        SyntaxKind::Directive,
        Span::from_range(0..text.len()),
        text,
        children,
    ))
}

/// Splits on whitespace outside parentheses, keeping byte offsets
fn split_clauses(body: &str) -> Result<Vec<(usize, &str)>, &'static str> {
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (offset, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or("unbalanced parentheses")?,
            _ => {}
        }

        if ch.is_whitespace() && depth == 0 {
            if let Some(begin) = start.take() {
                words.push((begin, &body[begin..offset]));
            }
        } else if start.is_none() {
            start = Some(offset);
        }
    }

    if depth != 0 {
        return Err("unbalanced parentheses");
    }
    if let Some(begin) = start {
        words.push((begin, &body[begin..]));
    }

    Ok(words)
}
