//! Instrumentation metadata carried across DOM moves.
//!
//! Authoring and analytics tooling annotate elements with prefixed `data-*`
//! attributes. When a decorator replaces an authored element with a new one,
//! those attributes must follow the content so the association survives.

use eb_dom::{Document, NodeId};

/// Move instrumentation attributes from `from` to `to`.
///
/// Every attribute of `from` whose name starts with one of `prefixes` and
/// whose value is non-empty is set on `to` and removed from `from`. Returns
/// the number of attributes moved.
pub fn move_instrumentation(
    doc: &mut Document,
    from: NodeId,
    to: NodeId,
    prefixes: &[String],
) -> usize {
    let names: Vec<String> = doc
        .attrs(from)
        .iter()
        .filter(|(name, value)| {
            !value.is_empty() && prefixes.iter().any(|p| name.starts_with(p.as_str()))
        })
        .map(|(name, _)| name.clone())
        .collect();

    for name in &names {
        if let Some(value) = doc.remove_attr(from, name) {
            doc.set_attr(to, name, value);
        }
    }

    names.len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["data-aue-".to_owned(), "data-richtext-".to_owned()]
    }

    #[test]
    fn test_moves_prefixed_attributes() {
        let mut doc = Document::parse_fragment(
            r#"<div class="cta" data-aue-resource="urn:a" data-aue-type="component" data-richtext-prop="text" data-other="keep"></div>"#,
        )
        .unwrap();
        let from = doc.element_children(doc.root())[0];
        let to = doc.create_element("li");

        let moved = move_instrumentation(&mut doc, from, to, &prefixes());

        assert_eq!(moved, 3);
        assert_eq!(
            doc.outer_html(to),
            r#"<li data-aue-resource="urn:a" data-aue-type="component" data-richtext-prop="text"></li>"#
        );
        assert_eq!(
            doc.outer_html(from),
            r#"<div class="cta" data-other="keep"></div>"#
        );
    }

    #[test]
    fn test_empty_values_stay() {
        let mut doc = Document::parse_fragment(r#"<div data-aue-label=""></div>"#).unwrap();
        let from = doc.element_children(doc.root())[0];
        let to = doc.create_element("li");

        assert_eq!(move_instrumentation(&mut doc, from, to, &prefixes()), 0);
        assert!(doc.has_attr(from, "data-aue-label"));
        assert!(!doc.has_attr(to, "data-aue-label"));
    }

    #[test]
    fn test_no_prefixes_moves_nothing() {
        let mut doc = Document::parse_fragment(r#"<div data-aue-type="x"></div>"#).unwrap();
        let from = doc.element_children(doc.root())[0];
        let to = doc.create_element("li");

        assert_eq!(move_instrumentation(&mut doc, from, to, &[]), 0);
    }
}
