//! Tab-list structure discovery.

use eb_config::TabsConfig;
use eb_dom::{Document, NodeId};

use super::BLOCK_NAME;
use crate::BlockError;

/// A labeled section that becomes one tab panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanelSource {
    /// Label as authored on the section.
    pub label: String,
    /// The section element converted into the panel.
    pub section: NodeId,
}

/// Everything the tab-list decorator needs to know about one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabListDescriptor {
    /// The block element whose children are replaced by the tab list.
    pub block: NodeId,
    /// Whether a leading "show all" tab is requested.
    pub show_all: bool,
    /// Panels in document order.
    pub panels: Vec<TabPanelSource>,
}

impl TabListDescriptor {
    /// Discover the panels belonging to a tab-list block.
    ///
    /// Starting from the section enclosing `block`, walks following element
    /// siblings while each carries a non-empty tab label and stops at the
    /// first that does not. The document is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Malformed`] if `block` is not inside a section.
    pub fn discover(
        doc: &Document,
        block: NodeId,
        config: &TabsConfig,
    ) -> Result<Self, BlockError> {
        let section = doc
            .closest_with_class(block, &config.section_class)
            .ok_or_else(|| {
                BlockError::malformed(
                    BLOCK_NAME,
                    format!("block is not inside a .{} element", config.section_class),
                )
            })?;

        let mut panels = Vec::new();
        let mut next = doc.next_element_sibling(section);
        while let Some(candidate) = next {
            let Some(label) = doc
                .dataset(candidate, &config.label_attribute)
                .filter(|label| !label.is_empty())
            else {
                break;
            };
            panels.push(TabPanelSource {
                label: label.to_owned(),
                section: candidate,
            });
            next = doc.next_element_sibling(candidate);
        }

        Ok(Self {
            block,
            show_all: doc.has_class(block, &config.show_all_class),
            panels,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tab_list::fixtures::page;

    #[test]
    fn test_discover_collects_labeled_sections_in_order() {
        let (doc, block) = page("tab-list block", &["One", "Two", "Three"]);
        let descriptor = TabListDescriptor::discover(&doc, block, &TabsConfig::default()).unwrap();

        let labels: Vec<_> = descriptor.panels.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["One", "Two", "Three"]);
        assert!(!descriptor.show_all);
        assert_eq!(descriptor.block, block);
    }

    #[test]
    fn test_discover_stops_at_first_unlabeled_section() {
        let doc = Document::parse_fragment(
            r#"<div class="section"><div class="tab-list block"></div></div><div class="section" data-tab-label="A"></div><div class="section"></div><div class="section" data-tab-label="B"></div>"#,
        )
        .unwrap();
        let block = doc.find_first(doc.root(), |el| el.has_class("tab-list")).unwrap();

        let descriptor = TabListDescriptor::discover(&doc, block, &TabsConfig::default()).unwrap();

        assert_eq!(descriptor.panels.len(), 1);
        assert_eq!(descriptor.panels[0].label, "A");
    }

    #[test]
    fn test_discover_empty_label_stops() {
        let doc = Document::parse_fragment(
            r#"<div class="section"><div class="tab-list block"></div></div><div class="section" data-tab-label=""></div>"#,
        )
        .unwrap();
        let block = doc.find_first(doc.root(), |el| el.has_class("tab-list")).unwrap();

        let descriptor = TabListDescriptor::discover(&doc, block, &TabsConfig::default()).unwrap();

        assert!(descriptor.panels.is_empty());
    }

    #[test]
    fn test_discover_show_all_marker() {
        let (doc, block) = page("tab-list block showall", &["One"]);
        let descriptor = TabListDescriptor::discover(&doc, block, &TabsConfig::default()).unwrap();
        assert!(descriptor.show_all);
    }

    #[test]
    fn test_discover_requires_section() {
        let doc = Document::parse_fragment(r#"<div class="tab-list block"></div>"#).unwrap();
        let block = doc.element_children(doc.root())[0];

        let err = TabListDescriptor::discover(&doc, block, &TabsConfig::default()).unwrap_err();

        assert!(matches!(err, BlockError::Malformed { block: "tab-list", .. }));
    }
}
