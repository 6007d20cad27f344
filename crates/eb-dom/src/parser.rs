//! Lenient HTML fragment parser built on `quick-xml`.
//!
//! Authored block markup is close to XHTML but not quite: void elements are
//! left open, attributes may be valueless, and end tags are occasionally
//! mismatched. The tokenizer is configured to tolerate all of these and the
//! tree is built with an explicit stack of open elements.
//!
//! Bodies of raw-text elements (`script`, `style`, `template`, `textarea`)
//! are never tokenized: they are wrapped in CDATA sections before parsing and
//! end up as a single text node.

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::entities::{decode_reference, normalize_entities};
use crate::{Document, DomError, NodeId};

/// Wrapper element name that never appears in authored markup.
const FRAGMENT_ROOT: &str = "eb-fragment-root";

/// Elements that never have content or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Elements whose content is text, written back unescaped.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "textarea"];

pub(crate) fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Start tag of a raw-text element.
static RAW_TEXT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(script|style|template|textarea)\b[^>]*>")
        .expect("invalid raw text regex")
});

impl Document {
    /// Parse an HTML fragment into a new document.
    ///
    /// Top-level nodes of the fragment become children of
    /// [`root`](Self::root). Comments and the doctype are kept; XML declarations and
    /// processing instructions are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup cannot be tokenized.
    pub fn parse_fragment(html: &str) -> Result<Self, DomError> {
        let wrapped = format!("<{FRAGMENT_ROOT}>{}</{FRAGMENT_ROOT}>", prepare_markup(html));

        let mut reader = Reader::from_str(&wrapped);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut doc = Self::new();
        // Stack of open elements as (tag, node); the root entry stands for
        // the wrapper element.
        let mut open: Vec<(String, NodeId)> = vec![(FRAGMENT_ROOT.to_owned(), doc.root())];
        let mut seen_wrapper = false;
        let mut buf = Vec::new();

        loop {
            let parent = open.last().map_or(doc.root(), |(_, id)| *id);
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = decode_tag(&reader, e.name().as_ref());
                    if !seen_wrapper && tag == FRAGMENT_ROOT {
                        seen_wrapper = true;
                    } else {
                        let node = start_element(&mut doc, &reader, &e, tag.clone());
                        doc.append_child(parent, node)?;
                        if !is_void(&tag) {
                            open.push((tag, node));
                        }
                    }
                }
                Event::Empty(e) => {
                    let tag = decode_tag(&reader, e.name().as_ref());
                    let node = start_element(&mut doc, &reader, &e, tag);
                    doc.append_child(parent, node)?;
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    doc.append_text(parent, &text);
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(&e)?;
                    doc.append_text(parent, &decode_reference(&name));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    doc.append_text(parent, &text);
                }
                Event::Comment(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    let node = doc.create_comment(text);
                    doc.append_child(parent, node)?;
                }
                Event::End(e) => {
                    let tag = decode_tag(&reader, e.name().as_ref());
                    // Close up to the matching open element; stray end tags are dropped.
                    if let Some(pos) = open.iter().rposition(|(name, _)| *name == tag)
                        && pos > 0
                    {
                        open.truncate(pos);
                    }
                }
                Event::Eof => break,
                Event::DocType(e) => {
                    let name = reader.decoder().decode(&e)?;
                    let node = doc.create_doctype(name.trim());
                    doc.append_child(parent, node)?;
                }
                Event::Decl(_) | Event::PI(_) => {}
            }
            buf.clear();
        }

        Ok(doc)
    }
}

/// Make authored markup safe for the XML tokenizer.
///
/// Markup outside raw-text elements gets its entities normalized; each
/// raw-text body is copied verbatim into CDATA sections. An unclosed raw-text
/// element runs to the end of the input.
fn prepare_markup(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len() + 32);
    let mut pos = 0;

    while let Some(caps) = RAW_TEXT_START.captures_at(html, pos) {
        let Some(start) = caps.get(0) else {
            break;
        };
        out.push_str(&normalize_entities(&html[pos..start.end()]));
        pos = start.end();
        if start.as_str().ends_with("/>") {
            continue;
        }

        let end_tag = format!("</{}", caps[1].to_ascii_lowercase());
        let body_end = lower[pos..].find(&end_tag).map_or(html.len(), |i| pos + i);
        push_cdata(&mut out, &html[pos..body_end]);
        pos = body_end;
    }

    out.push_str(&normalize_entities(&html[pos..]));
    out
}

fn push_cdata(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str("<![CDATA[");
    out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

fn decode_tag<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(|_| String::from_utf8_lossy(name).into_owned(), Cow::into_owned)
        .to_ascii_lowercase()
}

fn start_element<R: BufRead>(
    doc: &mut Document,
    reader: &Reader<R>,
    e: &BytesStart,
    tag: String,
) -> NodeId {
    let node = doc.create_element(&tag);
    for attr in e.html_attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            Cow::into_owned,
        );
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        doc.set_attr(node, &key.to_ascii_lowercase(), value);
    }
    node
}
