use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::{XmlAttribute, XmlNode};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for name extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode an entity or escaped value.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlNode`] tree.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let node = build_node_start(&e, &reader)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = build_node_start(&e, &reader)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            // Text carries no configuration, but bad entities still make the document invalid.
            Event::Text(e) => {
                e.unescape()?;
            }
            Event::Eof => break,
            Event::CData(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_)
            | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML string into an [`XmlNode`] tree.
pub fn parse_str(xml: &str) -> Result<XmlNode, ParseError> {
    parse(xml.as_bytes())
}

fn attach(
    node: XmlNode,
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

fn build_node_start(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let name = std::str::from_utf8(e.name().local_name().as_ref())?.to_string();
    let mut node = XmlNode::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.push(XmlAttribute { name, value });
    }

    Ok(node)
}
