//! Page-level block decoration.
//!
//! Finds every block on a page, dispatches it to its decorator and keeps the
//! resulting widget controllers so that later input events can be routed to
//! them. A block that fails to decorate is reported and left as authored;
//! the remaining blocks are still decorated.

use eb_config::Config;
use eb_dom::{Document, NodeId};

use crate::BlockError;
use crate::tab_list::{
    Key, TabListController, TabListDescriptor, TabsIdAllocator, decorate_tab_list,
};
use crate::teaser::{TeaserDescriptor, decorate_teaser};

/// Attribute marking a block as already decorated.
const STATUS_ATTR: &str = "data-block-status";
const STATUS_DECORATED: &str = "decorated";

/// Blocks this crate knows how to decorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `tab-list`.
    TabList,
    /// `teaser`.
    Teaser,
}

impl BlockKind {
    /// Resolve a block name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tab-list" => Some(Self::TabList),
            "teaser" => Some(Self::Teaser),
            _ => None,
        }
    }

    /// Block name as authored.
    pub fn name(self) -> &'static str {
        match self {
            Self::TabList => "tab-list",
            Self::Teaser => "teaser",
        }
    }
}

/// A block that could not be decorated.
#[derive(Debug)]
pub struct BlockFailure {
    /// The block element, unchanged.
    pub block: NodeId,
    /// Block kind.
    pub kind: BlockKind,
    /// Why decoration failed.
    pub error: BlockError,
}

/// Outcome of decorating a page.
#[derive(Debug, Default)]
pub struct DecoratedPage {
    /// Controllers of decorated tab lists, in document order.
    pub tab_lists: Vec<TabListController>,
    /// Decorated teaser blocks.
    pub teasers: Vec<NodeId>,
    /// Blocks with a name no decorator handles.
    pub unknown: Vec<NodeId>,
    /// Blocks that failed to decorate.
    pub failures: Vec<BlockFailure>,
}

impl DecoratedPage {
    /// Number of successfully decorated blocks.
    pub fn decorated(&self) -> usize {
        self.tab_lists.len() + self.teasers.len()
    }

    /// Route a click on `target` to the tab list owning it.
    ///
    /// Returns `false` if no tab was hit.
    ///
    /// # Errors
    ///
    /// Propagates tab activation errors.
    pub fn click(&mut self, doc: &mut Document, target: NodeId) -> Result<bool, BlockError> {
        for controller in &mut self.tab_lists {
            if controller.handle_click(doc, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Route a keydown on `target` to the tab list containing it.
    ///
    /// `key` is a `KeyboardEvent.key` name. Returns `true` if consumed.
    pub fn key_down(&mut self, doc: &mut Document, target: NodeId, key: &str) -> bool {
        self.tab_lists
            .iter_mut()
            .find(|controller| doc.contains(controller.tablist(), target))
            .is_some_and(|controller| controller.handle_key(doc, Key::from(key)))
    }
}

/// Decorates every block of a page.
///
/// Owns the tab id allocator, so all tab lists decorated through one
/// `PageDecorator` get distinct id namespaces. Use one decorator per
/// document.
#[derive(Debug)]
pub struct PageDecorator {
    config: Config,
    ids: TabsIdAllocator,
}

impl PageDecorator {
    /// Create a decorator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ids = TabsIdAllocator::new(config.tabs.id_prefix.clone());
        Self { config, ids }
    }

    /// Resolve the kind of a block element.
    ///
    /// Uses `data-block-name` when present, otherwise the first class.
    pub fn block_kind(doc: &Document, block: NodeId) -> Option<BlockKind> {
        let name = doc
            .dataset(block, "blockName")
            .or_else(|| doc.classes(block).first().copied())?;
        BlockKind::from_name(name)
    }

    /// Decorate all blocks of `doc` in document order.
    ///
    /// Blocks already marked decorated and blocks that are no longer
    /// attached by the time they are reached are skipped.
    pub fn decorate(&mut self, doc: &mut Document) -> DecoratedPage {
        let block_class = self.config.page.block_class.clone();
        let blocks = doc.find_all(doc.root(), |el| {
            el.has_class(&block_class) && el.attr(STATUS_ATTR) != Some(STATUS_DECORATED)
        });

        let mut page = DecoratedPage::default();
        for block in blocks {
            if !doc.contains(doc.root(), block) {
                tracing::debug!(block = ?block, "Skipping detached block");
                continue;
            }

            let Some(kind) = Self::block_kind(doc, block) else {
                tracing::debug!(classes = ?doc.classes(block), "No decorator for block");
                page.unknown.push(block);
                continue;
            };

            match self.decorate_block(doc, block, kind) {
                Ok(Some(controller)) => page.tab_lists.push(controller),
                Ok(None) => page.teasers.push(block),
                Err(error) => {
                    tracing::warn!(block = kind.name(), error = %error, "Failed to decorate block");
                    page.failures.push(BlockFailure { block, kind, error });
                }
            }
        }

        tracing::info!(
            decorated = page.decorated(),
            failed = page.failures.len(),
            unknown = page.unknown.len(),
            "Decorated page"
        );
        page
    }

    /// Decorate a single block as `kind`.
    ///
    /// Returns the controller for tab lists and `None` for teasers.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is malformed; the block is left as
    /// authored.
    pub fn decorate_block(
        &mut self,
        doc: &mut Document,
        block: NodeId,
        kind: BlockKind,
    ) -> Result<Option<TabListController>, BlockError> {
        let controller = match kind {
            BlockKind::TabList => {
                let descriptor = TabListDescriptor::discover(doc, block, &self.config.tabs)?;
                Some(decorate_tab_list(doc, &descriptor, &mut self.ids, &self.config)?)
            }
            BlockKind::Teaser => {
                let descriptor = TeaserDescriptor::parse(doc, block, &self.config.teaser)?;
                decorate_teaser(doc, &descriptor, &self.config)?;
                None
            }
        };
        doc.set_attr(block, STATUS_ATTR, STATUS_DECORATED);
        Ok(controller)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = concat!(
        "<main>",
        r#"<div class="section"><div class="tab-list block" data-block-name="tab-list"><div></div></div></div>"#,
        r#"<div class="section" data-tab-label="One"><p>1</p></div>"#,
        r#"<div class="section" data-tab-label="Two"><p>2</p></div>"#,
        r#"<div class="section"><div class="teaser block"><div>m</div><div>c</div><div><div>x</div></div></div></div>"#,
        r#"<div class="section"><div class="tab-list block showall"><div></div></div></div>"#,
        r#"<div class="section" data-tab-label="One"><p>3</p></div>"#,
        r#"<div class="section"><div class="teaser block"><div>m</div><div>c</div></div><div class="cards block"></div></div>"#,
        "</main>",
    );

    fn decorate_page() -> (Document, DecoratedPage) {
        let mut doc = Document::parse_fragment(PAGE).unwrap();
        let page = PageDecorator::new(Config::default()).decorate(&mut doc);
        (doc, page)
    }

    #[test]
    fn test_block_kind_from_name() {
        assert_eq!(BlockKind::from_name("tab-list"), Some(BlockKind::TabList));
        assert_eq!(BlockKind::from_name("teaser"), Some(BlockKind::Teaser));
        assert_eq!(BlockKind::from_name("cards"), None);
        assert_eq!(BlockKind::TabList.name(), "tab-list");
    }

    #[test]
    fn test_block_kind_prefers_data_attribute() {
        let doc = Document::parse_fragment(concat!(
            r#"<div class="block teaser" data-block-name="teaser"></div>"#,
            r#"<div class="teaser block"></div>"#,
            r#"<div class="block"></div>"#,
        ))
        .unwrap();
        let blocks = doc.element_children(doc.root());

        assert_eq!(PageDecorator::block_kind(&doc, blocks[0]), Some(BlockKind::Teaser));
        assert_eq!(PageDecorator::block_kind(&doc, blocks[1]), Some(BlockKind::Teaser));
        assert_eq!(PageDecorator::block_kind(&doc, blocks[2]), None);
    }

    #[test]
    fn test_decorate_page_isolates_failures() {
        let (doc, page) = decorate_page();

        assert_eq!(page.tab_lists.len(), 2);
        assert_eq!(page.teasers.len(), 1);
        assert_eq!(page.unknown.len(), 1);
        assert_eq!(page.failures.len(), 1);
        assert_eq!(page.failures[0].kind, BlockKind::Teaser);
        assert!(matches!(page.failures[0].error, BlockError::Malformed { .. }));
        assert!(!doc.has_attr(page.failures[0].block, STATUS_ATTR));
    }

    #[test]
    fn test_tab_lists_get_distinct_ids() {
        let (doc, page) = decorate_page();

        let ids: Vec<_> = page
            .tab_lists
            .iter()
            .map(|c| doc.attr(c.tablist(), "id").unwrap())
            .collect();
        assert_eq!(ids, vec!["tabs-1-tablist", "tabs-2-tablist"]);

        let mut all_ids: Vec<_> = doc
            .find_all(doc.root(), |el| el.attr("id").is_some())
            .into_iter()
            .map(|n| doc.attr(n, "id").unwrap())
            .collect();
        let total = all_ids.len();
        all_ids.sort_unstable();
        all_ids.dedup();
        assert_eq!(all_ids.len(), total);
    }

    #[test]
    fn test_decorated_blocks_are_marked_and_skipped_on_rerun() {
        let mut doc = Document::parse_fragment(PAGE).unwrap();
        let mut decorator = PageDecorator::new(Config::default());
        decorator.decorate(&mut doc);
        let first_pass = doc.to_html();

        let second = decorator.decorate(&mut doc);

        assert_eq!(second.decorated(), 0);
        assert_eq!(doc.to_html(), first_pass);
    }

    #[test]
    fn test_click_routes_to_owning_tab_list() {
        let (mut doc, mut page) = decorate_page();
        let second_tab = page.tab_lists[0].tabs()[1];

        assert!(page.click(&mut doc, second_tab).unwrap());

        assert_eq!(page.tab_lists[0].selected(&doc), vec![1]);
        assert_eq!(page.tab_lists[1].selected(&doc), vec![0]);
        let other_panel = doc.element_by_id("tabs-2-panel-one").unwrap();
        assert!(!doc.has_attr(other_panel, "hidden"));
    }

    #[test]
    fn test_click_outside_tabs_is_ignored() {
        let (mut doc, mut page) = decorate_page();
        let main = doc.element_children(doc.root())[0];
        assert!(!page.click(&mut doc, main).unwrap());
    }

    #[test]
    fn test_key_down_routes_by_containment() {
        let (mut doc, mut page) = decorate_page();
        let tablist = page.tab_lists[1].tablist();

        assert!(page.key_down(&mut doc, tablist, "ArrowRight"));

        assert_eq!(page.tab_lists[1].focus_index(), 1);
        assert_eq!(page.tab_lists[0].focus_index(), 0);
        assert_eq!(doc.active_element(), Some(page.tab_lists[1].tabs()[1]));
    }

    #[test]
    fn test_key_down_outside_tab_lists() {
        let (mut doc, mut page) = decorate_page();
        let main = doc.element_children(doc.root())[0];
        assert!(!page.key_down(&mut doc, main, "ArrowRight"));
        assert!(!page.key_down(&mut doc, page.tab_lists[0].tablist(), "Tab"));
    }

    #[test]
    fn test_custom_block_class() {
        let mut config = Config::default();
        config.page.block_class = "blk".to_owned();
        let mut doc = Document::parse_fragment(
            r#"<div class="teaser blk"><div>m</div><div>c</div></div><div class="teaser block"><div>m</div><div>c</div></div>"#,
        )
        .unwrap();

        let page = PageDecorator::new(config).decorate(&mut doc);

        assert_eq!(page.teasers.len(), 1);
    }
}
