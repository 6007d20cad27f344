//! Arena-backed HTML document model.
//!
//! Block decorators operate on a [`Document`]: an arena of nodes addressed by
//! copyable [`NodeId`] handles. The API mirrors the subset of the browser DOM
//! that decorators need: sibling walking, attribute and class list edits,
//! re-parenting, document-wide id lookup and keyboard focus.
//!
//! # Example
//!
//! ```
//! use eb_dom::Document;
//!
//! let mut doc = Document::parse_fragment(r#"<div class="teaser block"><p>Hi</p></div>"#)?;
//! let block = doc.find_first(doc.root(), |el| el.has_class("teaser")).unwrap();
//! doc.add_class(block, "decorated");
//!
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<div class="teaser block decorated"><p>Hi</p></div>"#
//! );
//! # Ok::<(), eb_dom::DomError>(())
//! ```

mod document;
mod entities;
mod error;
mod parser;
mod serializer;

pub use document::{Document, Element, NodeData, NodeId};
pub use error::DomError;
