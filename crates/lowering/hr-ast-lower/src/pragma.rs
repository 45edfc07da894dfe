//! Pragma comments
//!
//! A comment starting with the pragma marker is handed back to the front end,
//! which parses it with the directive grammar. The resulting `Directive` node
//! becomes a [`Pragma`] statement in place of the comment.

use crate::LowerError;
use hr_ast::{Pragma, PragmaFamily};
use hr_span::Span;
use hr_syntax::{Frontend, SyntaxKind, SyntaxNode};

pub(crate) fn lower_pragma(frontend: &dyn Frontend, comment: &SyntaxNode) -> Result<Pragma, LowerError> {
    let directive = frontend
        .parse_directive(&comment.text)
        .map_err(|source| LowerError::Directive {
            source,
            span: comment.span.into(),
        })?;

    let family = directive
        .child_by_field("family")
        .ok_or_else(|| LowerError::unsupported(&directive))?;

    let Some(known) = PragmaFamily::from_name(&family.text) else {
        // Directive spans are relative to the comment text
        let start = comment.span.start + family.span.start;
        return Err(LowerError::unsupported_at(
            format!("`{}` directive", family.text),
            Span::new(start, start + family.span.len()),
        ));
    };

    let clauses: Vec<&str> = directive
        .children_by_field("clause")
        .filter(|clause| clause.kind == SyntaxKind::DirectiveClause)
        .map(|clause| clause.text.as_str())
        .collect();

    tracing::debug!(family = %family.text, clauses = clauses.len(), "lowered pragma");

    Ok(Pragma::new(known, clauses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_parser::PythonFrontend;
    use hr_syntax::FrontendError;

    fn comment(text: &str) -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::Comment, Span::new(10, 10 + text.len() as u32), text, Vec::new())
    }

    #[test]
    fn header_pragmas_keep_their_clauses() {
        let pragma = lower_pragma(
            &PythonFrontend::new(),
            &comment("#$ header procedure f(int, float [:])"),
        )
        .unwrap();
        assert_eq!(pragma.family, PragmaFamily::Header);
        assert_eq!(pragma.clauses, vec!["procedure", "f(int, float [:])"]);
    }

    #[test]
    fn unknown_family_points_at_the_family() {
        let error = lower_pragma(&PythonFrontend::new(), &comment("#$ cuda kernel")).unwrap_err();
        let LowerError::UnsupportedConstruct { kind, span } = error else {
            panic!("expected an unsupported construct");
        };
        assert_eq!(kind, "`cuda` directive");
        assert_eq!(span.offset(), 13);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn front_end_failures_are_wrapped() {
        let error = lower_pragma(&PythonFrontend::new(), &comment("#$")).unwrap_err();
        assert!(matches!(
            error,
            LowerError::Directive {
                source: FrontendError::Directive { .. },
                ..
            }
        ));
    }
}
