//! Block decoration errors.

use eb_dom::DomError;

/// Error raised while decorating a block or handling widget input.
///
/// Decoration validates the block structure before mutating anything, so a
/// [`BlockError::Malformed`] leaves the block exactly as authored.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BlockError {
    /// The block does not have the structure its decorator expects.
    #[error("malformed {block} block: {reason}")]
    Malformed {
        /// Block name (`tab-list`, `teaser`).
        block: &'static str,
        /// What was missing or unexpected.
        reason: String,
    },

    /// A tab controls a panel id that is not in the document.
    #[error("tab panel #{0} not found in document")]
    MissingPanel(String),

    /// A tab index outside the tab list was activated.
    #[error("tab index {index} out of range for tab list with {len} tabs")]
    TabOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of tabs.
        len: usize,
    },

    /// A tree operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl BlockError {
    pub(crate) fn malformed(block: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            block,
            reason: reason.into(),
        }
    }
}
