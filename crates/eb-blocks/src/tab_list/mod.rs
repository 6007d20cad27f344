//! Accessible tab-list block.
//!
//! A `tab-list` block turns the page sections that follow its own section
//! into the panels of an ARIA tab widget:
//!
//! ```html
//! <div class="section"><div class="tab-list block">...</div></div>
//! <div class="section" data-tab-label="Overview">...</div>
//! <div class="section" data-tab-label="Specs">...</div>
//! ```
//!
//! # Architecture
//!
//! Decoration runs in two phases:
//!
//! 1. **Discovery** ([`TabListDescriptor::discover`]): walks the following
//!    sibling sections and records `(label, section)` pairs without touching
//!    the document.
//!
//! 2. **Transformation** ([`decorate_tab_list`]): builds the
//!    `<ul role="tablist">`, converts each section into a `role="tabpanel"`
//!    and returns a [`TabListController`] that implements the widget's
//!    click and arrow-key behavior.
//!
//! # Output HTML Structure
//!
//! ```html
//! <div class="tab-list block">
//!   <ul role="tablist" id="tabs-1-tablist">
//!     <li><button id="tabs-1-tab-overview" role="tab" aria-selected="true"
//!                 tabindex="0" aria-controls="tabs-1-panel-overview">Overview</button></li>
//!     <li><button id="tabs-1-tab-specs" role="tab" aria-selected="false"
//!                 tabindex="-1" aria-controls="tabs-1-panel-specs">Specs</button></li>
//!   </ul>
//! </div>
//! <div class="section hidden" data-tab-label="Overview" id="tabs-1-panel-overview"
//!      aria-labelledby="tabs-1-tab-overview" role="tabpanel" tabindex="0">...</div>
//! <div class="section hidden" data-tab-label="Specs" id="tabs-1-panel-specs"
//!      aria-labelledby="tabs-1-tab-specs" role="tabpanel" tabindex="0" hidden>...</div>
//! ```

mod controller;
mod decorator;
mod descriptor;
mod ids;

pub use controller::{Key, TabListController};
pub use decorator::decorate_tab_list;
pub use descriptor::{TabListDescriptor, TabPanelSource};
pub use ids::TabsIdAllocator;

/// Block name as authored.
pub(crate) const BLOCK_NAME: &str = "tab-list";

/// Separator between a tab group prefix and a panel slug in panel ids.
pub(crate) const PANEL_MARKER: &str = "-panel-";
