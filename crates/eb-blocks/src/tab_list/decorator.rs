//! Tab-list DOM transformation.

use std::collections::HashSet;

use eb_config::Config;
use eb_dom::{Document, NodeId};

use super::{TabListController, TabListDescriptor, TabsIdAllocator};
use crate::{BlockError, to_class_name};

/// Transform a discovered tab-list block into an ARIA tab widget.
///
/// Allocates a fresh id prefix from `ids`, builds one tab per panel source,
/// converts each source section into a `role="tabpanel"` element and
/// replaces the block's children with the tab list. Tab 0 starts selected
/// and focusable; all other panels start hidden.
///
/// When the descriptor requests "show all", an extra leading tab controlling
/// every panel is added and activated, which reveals all panels.
///
/// Tabs whose labels normalize to the same token get identical ids; this is
/// logged but not resolved.
///
/// # Errors
///
/// Returns an error if the tree cannot be restructured.
pub fn decorate_tab_list(
    doc: &mut Document,
    descriptor: &TabListDescriptor,
    ids: &mut TabsIdAllocator,
    config: &Config,
) -> Result<TabListController, BlockError> {
    let tabs_config = &config.tabs;
    let prefix = ids.next_prefix();

    let tablist = doc.create_element("ul");
    doc.set_attr(tablist, "role", "tablist");
    doc.set_attr(tablist, "id", format!("{prefix}-tablist"));

    let mut tabs = Vec::with_capacity(descriptor.panels.len() + 1);
    let mut panel_ids = Vec::with_capacity(descriptor.panels.len());
    let mut seen = HashSet::new();

    for (idx, source) in descriptor.panels.iter().enumerate() {
        let slug = to_class_name(&source.label);
        let tab_id = format!("{prefix}-tab-{slug}");
        let panel_id = format!("{prefix}-panel-{slug}");

        if !seen.insert(slug) {
            tracing::warn!(
                label = %source.label,
                tab_id = %tab_id,
                "Tab label normalizes to an id already used in this tab list"
            );
        }

        let selected = idx == 0;
        let tab = create_tab(doc, &tab_id, &panel_id, &source.label, Some(selected));
        append_tab(doc, tablist, tab, false)?;
        tabs.push(tab);

        let panel = source.section;
        doc.set_attr(panel, "id", panel_id.as_str());
        doc.set_attr(panel, "aria-labelledby", tab_id.as_str());
        doc.add_class(panel, &tabs_config.panel_class);
        doc.set_attr(panel, "role", "tabpanel");
        doc.set_attr(panel, "tabindex", "0");
        if !selected {
            doc.set_attr(panel, "hidden", "");
        }

        panel_ids.push(panel_id);
    }

    let mut controller = TabListController::new(prefix.clone(), tablist, tabs);

    if descriptor.show_all {
        if let Some(&first) = controller.tabs().first() {
            doc.set_attr(first, "tabindex", "-1");
        }

        let tab_id = format!("{prefix}-tab-all");
        let tab = create_tab(
            doc,
            &tab_id,
            &panel_ids.join(" "),
            &tabs_config.show_all_label,
            None,
        );
        append_tab(doc, tablist, tab, true)?;
        controller.prepend_tab(tab);
        controller.activate_tab(doc, 0)?;
    }

    doc.replace_children(descriptor.block, &[tablist])?;

    tracing::debug!(
        prefix = %prefix,
        tabs = controller.tabs().len(),
        show_all = descriptor.show_all,
        "Decorated tab list"
    );

    Ok(controller)
}

/// Build a `<button role="tab">`. `selected` of `None` leaves
/// `aria-selected` unset and makes the tab focusable.
fn create_tab(
    doc: &mut Document,
    tab_id: &str,
    controls: &str,
    label: &str,
    selected: Option<bool>,
) -> NodeId {
    let tab = doc.create_element("button");
    doc.set_attr(tab, "id", tab_id);
    doc.set_attr(tab, "role", "tab");
    if let Some(selected) = selected {
        doc.set_attr(tab, "aria-selected", selected.to_string());
    }
    let focusable = selected.unwrap_or(true);
    doc.set_attr(tab, "tabindex", if focusable { "0" } else { "-1" });
    doc.set_attr(tab, "aria-controls", controls);
    doc.set_text_content(tab, label);
    tab
}

/// Wrap a tab in an `<li>` and add it to the list.
fn append_tab(
    doc: &mut Document,
    tablist: NodeId,
    tab: NodeId,
    first: bool,
) -> Result<(), BlockError> {
    let item = doc.create_element("li");
    doc.append_child(item, tab)?;
    if first {
        doc.prepend_child(tablist, item)?;
    } else {
        doc.append_child(tablist, item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tab_list::fixtures::page;

    fn decorate(block_classes: &str, labels: &[&str]) -> (Document, TabListController, NodeId) {
        let (mut doc, block) = page(block_classes, labels);
        let config = Config::default();
        let descriptor = TabListDescriptor::discover(&doc, block, &config.tabs).unwrap();
        let controller =
            decorate_tab_list(&mut doc, &descriptor, &mut TabsIdAllocator::default(), &config)
                .unwrap();
        (doc, controller, block)
    }

    fn panels(doc: &Document) -> Vec<NodeId> {
        doc.find_all(doc.root(), |el| el.attr("role") == Some("tabpanel"))
    }

    #[test]
    fn test_decorate_produces_tab_per_panel() {
        let (doc, controller, _) = decorate("tab-list block", &["Overview", "Specs", "FAQ"]);
        let panels = panels(&doc);

        assert_eq!(controller.tabs().len(), 3);
        assert_eq!(panels.len(), 3);
        for (tab, panel) in controller.tabs().iter().zip(&panels) {
            assert_eq!(doc.attr(*tab, "aria-controls"), doc.attr(*panel, "id"));
            assert_eq!(doc.attr(*panel, "aria-labelledby"), doc.attr(*tab, "id"));
        }
    }

    #[test]
    fn test_decorate_initial_state() {
        let (doc, controller, _) = decorate("tab-list block", &["A", "B", "C"]);

        let state: Vec<_> = controller
            .tabs()
            .iter()
            .map(|&t| {
                (
                    doc.attr(t, "aria-selected").unwrap(),
                    doc.attr(t, "tabindex").unwrap(),
                )
            })
            .collect();
        assert_eq!(
            state,
            vec![("true", "0"), ("false", "-1"), ("false", "-1")]
        );

        let hidden: Vec<_> = panels(&doc)
            .into_iter()
            .map(|p| doc.has_attr(p, "hidden"))
            .collect();
        assert_eq!(hidden, vec![false, true, true]);
    }

    #[test]
    fn test_decorate_output_html() {
        let (doc, _, block) = decorate("tab-list block", &["Overview", "Specs &amp; Sizes"]);

        assert_eq!(
            doc.outer_html(block),
            concat!(
                r#"<div class="tab-list block"><ul role="tablist" id="tabs-1-tablist">"#,
                r#"<li><button id="tabs-1-tab-overview" role="tab" aria-selected="true" tabindex="0" aria-controls="tabs-1-panel-overview">Overview</button></li>"#,
                r#"<li><button id="tabs-1-tab-specs-sizes" role="tab" aria-selected="false" tabindex="-1" aria-controls="tabs-1-panel-specs-sizes">Specs &amp; Sizes</button></li>"#,
                r#"</ul></div>"#,
            )
        );

        let second = doc.element_by_id("tabs-1-panel-specs-sizes").unwrap();
        assert_eq!(
            doc.outer_html(second),
            r#"<div class="section hidden" data-tab-label="Specs &amp; Sizes" id="tabs-1-panel-specs-sizes" aria-labelledby="tabs-1-tab-specs-sizes" role="tabpanel" tabindex="0" hidden><p>Panel 1</p></div>"#
        );
    }

    #[test]
    fn test_decorate_leaves_following_sections_alone() {
        let (doc, _, _) = decorate("tab-list block", &["A"]);
        let after = doc
            .find_all(doc.root(), |el| el.has_class("section"))
            .into_iter()
            .last()
            .unwrap();
        assert_eq!(doc.outer_html(after), r#"<div class="section"><p>After</p></div>"#);
    }

    #[test]
    fn test_decorate_without_panels_yields_empty_list() {
        let (doc, controller, block) = decorate("tab-list block", &[]);

        assert!(controller.tabs().is_empty());
        assert_eq!(
            doc.outer_html(block),
            r#"<div class="tab-list block"><ul role="tablist" id="tabs-1-tablist"></ul></div>"#
        );
    }

    #[test]
    fn test_show_all_tab_prepended_and_selected() {
        let (doc, controller, _) = decorate("tab-list block showall", &["A", "B", "C"]);
        let tabs = controller.tabs();

        assert_eq!(tabs.len(), 4);
        assert_eq!(doc.attr(tabs[0], "id"), Some("tabs-1-tab-all"));
        assert_eq!(doc.text_content(tabs[0]), "All");
        assert_eq!(
            doc.attr(tabs[0], "aria-controls"),
            Some("tabs-1-panel-a tabs-1-panel-b tabs-1-panel-c")
        );
        assert_eq!(controller.selected(&doc), vec![0]);

        let tabindexes: Vec<_> = tabs
            .iter()
            .map(|&t| doc.attr(t, "tabindex").unwrap())
            .collect();
        assert_eq!(tabindexes, vec!["0", "-1", "-1", "-1"]);

        assert!(panels(&doc).iter().all(|&p| !doc.has_attr(p, "hidden")));
    }

    #[test]
    fn test_show_all_tab_is_first_list_item() {
        let (doc, controller, _) = decorate("tab-list block showall", &["A"]);
        let first_item = doc.element_children(controller.tablist())[0];
        assert_eq!(
            doc.outer_html(first_item),
            r#"<li><button id="tabs-1-tab-all" role="tab" tabindex="0" aria-controls="tabs-1-panel-a" aria-selected="true">All</button></li>"#
        );
    }

    #[test]
    fn test_show_all_after_selecting_single_tab_hides_others() {
        let (mut doc, mut controller, _) = decorate("tab-list block showall", &["A", "B"]);

        controller.activate_tab(&mut doc, 2).unwrap();
        let hidden: Vec<_> = panels(&doc)
            .into_iter()
            .map(|p| doc.has_attr(p, "hidden"))
            .collect();
        assert_eq!(hidden, vec![true, false]);

        controller.activate_tab(&mut doc, 0).unwrap();
        assert!(panels(&doc).iter().all(|&p| !doc.has_attr(p, "hidden")));
        assert_eq!(controller.selected(&doc), vec![0]);
    }

    #[test]
    fn test_show_all_without_panels() {
        let (doc, controller, _) = decorate("tab-list block showall", &[]);
        assert_eq!(controller.tabs().len(), 1);
        assert_eq!(doc.attr(controller.tabs()[0], "aria-controls"), Some(""));
        assert_eq!(controller.selected(&doc), vec![0]);
    }

    #[test]
    fn test_custom_show_all_label() {
        let (mut doc, block) = page("tab-list block showall", &["A"]);
        let mut config = Config::default();
        config.tabs.show_all_label = "Everything".to_owned();
        let descriptor = TabListDescriptor::discover(&doc, block, &config.tabs).unwrap();

        let controller =
            decorate_tab_list(&mut doc, &descriptor, &mut TabsIdAllocator::default(), &config)
                .unwrap();

        assert_eq!(doc.text_content(controller.tabs()[0]), "Everything");
    }

    #[test]
    fn test_duplicate_labels_are_not_deduplicated() {
        let (doc, controller, _) = decorate("tab-list block", &["Specs", "specs!"]);
        let ids: Vec<_> = controller
            .tabs()
            .iter()
            .map(|&t| doc.attr(t, "id").unwrap())
            .collect();
        assert_eq!(ids, vec!["tabs-1-tab-specs", "tabs-1-tab-specs"]);
    }

    #[test]
    fn test_separate_decorations_use_distinct_prefixes() {
        let (mut doc, block) = page("tab-list block", &["A"]);
        let config = Config::default();
        let mut ids = TabsIdAllocator::default();
        ids.next_prefix();
        let descriptor = TabListDescriptor::discover(&doc, block, &config.tabs).unwrap();

        let controller = decorate_tab_list(&mut doc, &descriptor, &mut ids, &config).unwrap();

        assert_eq!(doc.attr(controller.tablist(), "id"), Some("tabs-2-tablist"));
        assert_eq!(ids.allocated(), 2);
    }
}
