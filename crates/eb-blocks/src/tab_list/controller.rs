//! Tab-list widget behavior.

use eb_dom::{Document, NodeId};

use super::PANEL_MARKER;
use crate::BlockError;

/// Keyboard keys the tab list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move focus to the previous tab.
    ArrowLeft,
    /// Move focus to the next tab.
    ArrowRight,
    /// Any other key; ignored.
    Other,
}

impl From<&str> for Key {
    /// Map a `KeyboardEvent.key` name.
    fn from(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Interactive state of one decorated tab list.
///
/// Selection (`aria-selected` plus panel visibility) changes only through
/// [`activate_tab`](Self::activate_tab). Arrow keys move the roving
/// `tabindex` and document focus without touching selection.
#[derive(Debug, Clone)]
pub struct TabListController {
    prefix: String,
    tablist: NodeId,
    tabs: Vec<NodeId>,
    focus: usize,
}

impl TabListController {
    pub(crate) fn new(prefix: String, tablist: NodeId, tabs: Vec<NodeId>) -> Self {
        Self {
            prefix,
            tablist,
            tabs,
            focus: 0,
        }
    }

    /// Id namespace of this list (`tabs-1`).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The `<ul role="tablist">` element.
    pub fn tablist(&self) -> NodeId {
        self.tablist
    }

    /// Tab buttons in display order.
    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    /// Index of the tab holding the roving focus.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub(crate) fn prepend_tab(&mut self, tab: NodeId) {
        self.tabs.insert(0, tab);
    }

    /// Indices of tabs currently marked `aria-selected="true"`.
    pub fn selected(&self, doc: &Document) -> Vec<usize> {
        self.tabs
            .iter()
            .enumerate()
            .filter(|(_, tab)| doc.attr(**tab, "aria-selected") == Some("true"))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Select the tab at `index` and show the panel(s) it controls.
    ///
    /// Every other tab of this list is deselected, every panel whose id
    /// starts with `{prefix}-panel-` is hidden, then each panel named in the
    /// tab's `aria-controls` is shown. The "show all" tab controls several panels.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::TabOutOfRange`] for an invalid index and
    /// [`BlockError::MissingPanel`] if a controlled panel is not in the
    /// document. Nothing is modified in either case.
    pub fn activate_tab(&mut self, doc: &mut Document, index: usize) -> Result<(), BlockError> {
        let Some(&target) = self.tabs.get(index) else {
            return Err(BlockError::TabOutOfRange {
                index,
                len: self.tabs.len(),
            });
        };

        let controls = doc.attr(target, "aria-controls").unwrap_or_default().to_owned();
        let shown = controls
            .split_ascii_whitespace()
            .map(|id| {
                doc.element_by_id(id)
                    .ok_or_else(|| BlockError::MissingPanel(id.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for &tab in &self.tabs {
            if doc.attr(tab, "aria-selected") == Some("true") {
                doc.set_attr(tab, "aria-selected", "false");
            }
        }
        doc.set_attr(target, "aria-selected", "true");

        let marker = format!("{}{PANEL_MARKER}", self.prefix);
        let group_panels = doc.find_all(doc.root(), |el| {
            el.attr("role") == Some("tabpanel")
                && el.attr("id").is_some_and(|id| id.starts_with(&marker))
        });
        for panel in group_panels {
            doc.set_attr(panel, "hidden", "");
        }

        for panel in shown {
            doc.remove_attr(panel, "hidden");
        }

        tracing::debug!(tab = ?doc.attr(target, "id"), panels = %controls, "Activated tab");
        Ok(())
    }

    /// Move the roving focus by `delta` tabs, wrapping at both ends.
    ///
    /// The previously focused tab gets `tabindex="-1"`, the new one
    /// `tabindex="0"` and document focus. Does nothing on an empty list.
    pub fn move_focus(&mut self, doc: &mut Document, delta: isize) {
        let len = self.tabs.len();
        if len == 0 {
            return;
        }

        doc.set_attr(self.tabs[self.focus], "tabindex", "-1");

        let shift = delta.unsigned_abs() % len;
        self.focus = if delta >= 0 {
            (self.focus + shift) % len
        } else {
            (self.focus + len - shift) % len
        };

        let tab = self.tabs[self.focus];
        doc.set_attr(tab, "tabindex", "0");
        doc.focus(tab);
    }

    /// Handle a click on `target`. Returns `false` if the click did not hit
    /// one of this list's tabs.
    ///
    /// # Errors
    ///
    /// Propagates [`activate_tab`](Self::activate_tab) errors.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> Result<bool, BlockError> {
        let Some(index) = self.tabs.iter().position(|&tab| doc.contains(tab, target)) else {
            return Ok(false);
        };
        self.activate_tab(doc, index)?;
        Ok(true)
    }

    /// Handle a keydown inside the tab list. Returns `true` if the key was
    /// consumed.
    pub fn handle_key(&mut self, doc: &mut Document, key: Key) -> bool {
        match key {
            Key::ArrowRight => self.move_focus(doc, 1),
            Key::ArrowLeft => self.move_focus(doc, -1),
            Key::Other => return false,
        }
        true
    }
}
