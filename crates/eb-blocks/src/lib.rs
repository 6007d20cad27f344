//! Progressive-enhancement decorators for authored content blocks.
//!
//! Pages arrive as static HTML produced by the authoring system. Each block
//! on the page is a `div.block` whose first class names the block. This
//! crate turns two of them into interactive widgets:
//!
//! - [`tab_list`]: following page sections become panels of an accessible
//!   ARIA tab widget, driven by a [`TabListController`].
//! - [`teaser`]: media, content and call-to-action rows become a teaser card
//!   with a list of CTA buttons.
//!
//! Each decorator validates the block into a typed descriptor first and only
//! then transforms the document, so malformed blocks fail with
//! [`BlockError::Malformed`] and stay as authored.
//!
//! # Example
//!
//! ```
//! use eb_blocks::PageDecorator;
//! use eb_config::Config;
//! use eb_dom::Document;
//!
//! let mut doc = Document::parse_fragment(concat!(
//!     r#"<div class="section"><div class="tab-list block"></div></div>"#,
//!     r#"<div class="section" data-tab-label="Overview"><p>One</p></div>"#,
//!     r#"<div class="section" data-tab-label="Details"><p>Two</p></div>"#,
//! ))?;
//!
//! let mut page = PageDecorator::new(Config::default()).decorate(&mut doc);
//! assert_eq!(page.tab_lists.len(), 1);
//!
//! // Clicking the second tab reveals its panel.
//! let details = page.tab_lists[0].tabs()[1];
//! page.click(&mut doc, details)?;
//! let panel = doc.element_by_id("tabs-1-panel-details").unwrap();
//! assert!(!doc.has_attr(panel, "hidden"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod class_name;
mod error;
mod instrumentation;
mod page;
pub mod tab_list;
pub mod teaser;

pub use class_name::to_class_name;
pub use error::BlockError;
pub use instrumentation::move_instrumentation;
pub use page::{BlockFailure, BlockKind, DecoratedPage, PageDecorator};
pub use tab_list::{
    Key, TabListController, TabListDescriptor, TabPanelSource, TabsIdAllocator, decorate_tab_list,
};
pub use teaser::{CtaEntry, TeaserDescriptor, decorate_teaser};
