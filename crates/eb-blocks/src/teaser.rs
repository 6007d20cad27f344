//! Teaser card block.
//!
//! A teaser block is authored as rows: a media row, a content row, then one
//! row per call to action. Each CTA row holds a cell with comma-separated
//! class names and a cell with the button paragraph:
//!
//! ```html
//! <div class="teaser block">
//!   <div><picture>...</picture></div>
//!   <div><h2>Title</h2><p>Copy</p></div>
//!   <div><div>primary, large</div><div><p class="button-container"><a href="/go">Go</a></p></div></div>
//! </div>
//! ```
//!
//! Decoration tags the media and content rows and moves every CTA button
//! into a `<ul class="teaser-ctas">` appended to the content row.

use eb_config::{Config, TeaserConfig};
use eb_dom::{Document, NodeId};

use crate::{BlockError, move_instrumentation};

const BLOCK_NAME: &str = "teaser";

/// One call-to-action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaEntry {
    /// The authored row, removed after decoration.
    pub source: NodeId,
    /// Class names applied to the generated list item.
    pub classes: Vec<String>,
    /// The button paragraph moved into the list item.
    pub button: NodeId,
}

/// Validated structure of a teaser block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeaserDescriptor {
    /// The block element.
    pub block: NodeId,
    /// First row.
    pub media: NodeId,
    /// Second row; receives the CTA list.
    pub content: NodeId,
    /// Remaining rows in authored order.
    pub ctas: Vec<CtaEntry>,
}

impl TeaserDescriptor {
    /// Validate a teaser block without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Malformed`] if the media or content row is
    /// missing, or a CTA row lacks its class cell, its button cell, or a
    /// button paragraph inside the button cell.
    pub fn parse(
        doc: &Document,
        block: NodeId,
        config: &TeaserConfig,
    ) -> Result<Self, BlockError> {
        let rows = doc.element_children(block);
        let [media, content, cta_rows @ ..] = rows.as_slice() else {
            return Err(BlockError::malformed(
                BLOCK_NAME,
                format!("expected media and content rows, found {} rows", rows.len()),
            ));
        };

        let button_class = &config.button_container_class;
        let ctas = cta_rows
            .iter()
            .enumerate()
            .map(|(idx, &row)| {
                let cells = doc.element_children(row);
                let [classes_cell, button_cell, ..] = cells.as_slice() else {
                    return Err(BlockError::malformed(
                        BLOCK_NAME,
                        format!("call to action {} has {} cells, expected 2", idx + 1, cells.len()),
                    ));
                };
                let button = doc
                    .find_first(*button_cell, |el| el.tag == "p" && el.has_class(button_class))
                    .ok_or_else(|| {
                        BlockError::malformed(
                            BLOCK_NAME,
                            format!("call to action {} has no p.{button_class}", idx + 1),
                        )
                    })?;
                Ok(CtaEntry {
                    source: row,
                    classes: parse_classes(&doc.text_content(*classes_cell)),
                    button,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            block,
            media: *media,
            content: *content,
            ctas,
        })
    }
}

/// Split a comma-separated class cell into class tokens.
///
/// Entries are trimmed; empty entries are dropped and entries containing
/// inner whitespace contribute each word as its own class.
fn parse_classes(text: &str) -> Vec<String> {
    text.split(',')
        .flat_map(str::split_whitespace)
        .map(str::to_owned)
        .collect()
}

/// Rearrange a validated teaser block into its card layout.
///
/// Returns the generated CTA list. The list is appended to the content row
/// even when there are no CTAs.
///
/// # Errors
///
/// Returns an error if the tree cannot be restructured.
pub fn decorate_teaser(
    doc: &mut Document,
    descriptor: &TeaserDescriptor,
    config: &Config,
) -> Result<NodeId, BlockError> {
    let teaser = &config.teaser;
    doc.add_class(descriptor.media, &teaser.media_class);
    doc.add_class(descriptor.content, &teaser.content_class);

    let list = doc.create_element("ul");
    doc.add_class(list, &teaser.ctas_class);

    for cta in &descriptor.ctas {
        let item = doc.create_element("li");
        for class in &cta.classes {
            doc.add_class(item, class);
        }
        doc.append_child(item, cta.button)?;
        move_instrumentation(doc, cta.source, item, &config.instrumentation.prefixes);
        doc.append_child(list, item)?;
        doc.remove(cta.source);
    }

    doc.append_child(descriptor.content, list)?;

    tracing::debug!(ctas = descriptor.ctas.len(), "Decorated teaser");
    Ok(list)
}
