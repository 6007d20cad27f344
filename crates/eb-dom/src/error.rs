//! Document model errors.

use crate::NodeId;

/// Error raised while parsing or restructuring a [`Document`](crate::Document).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// Markup could not be tokenized.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Text could not be decoded.
    #[error("HTML encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Insertion would make a node its own ancestor.
    #[error("cannot insert node {child:?} into {parent:?}: would create a cycle")]
    Hierarchy {
        /// Intended parent.
        parent: NodeId,
        /// Node being inserted.
        child: NodeId,
    },
}
