//! Minimal element tree over quick-xml events
//!
//! E-utilities responses are small enough per request to hold in memory, and
//! the extraction rules are descendant lookups ("first `Title` anywhere in the
//! article"), which read naturally against a tree.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument};

use crate::error::{PubMedError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// All elements below this one in document order, excluding itself
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&XmlElement> = self.elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// First descendant named `name`
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.name == name)
    }

    /// Every descendant named `name`, in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.name == name)
    }

    /// First `child` element directly under any descendant `parent`
    pub fn find_child_of(&self, parent: &str, child: &str) -> Option<&XmlElement> {
        self.descendants()
            .filter(|e| e.name == parent)
            .find_map(|p| p.child(child))
    }

    /// Concatenated text of this element and everything below it, trimmed
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    /// Like [`text`](Self::text) but `None` when nothing but whitespace is there
    pub fn non_empty_text(&self) -> Option<String> {
        let text = self.text();
        (!text.is_empty()).then_some(text)
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// Pre-order walk over an element's subtree
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(element.elements());
        self.stack[start..].reverse();
        Some(element)
    }
}

/// Parse a complete XML document into its root element
///
/// Fails on mismatched or unclosed tags, a missing root, more than one root,
/// text outside the root and undecodable entities.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(xml_error(position, "content after the root element"));
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(XmlElement::new(name));
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(xml_error(position, "closing tag without an opening tag"));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| xml_error(position, &err.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(xml_error(position, "text outside the root element")),
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                match stack.last_mut() {
                    Some(current) => current.push_text(&text),
                    None => return Err(xml_error(position, "CDATA outside the root element")),
                }
            }
            Event::Eof => break,
            // Declarations, DOCTYPE, comments and processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PubMedError::XmlError(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    let root = root.ok_or_else(|| PubMedError::XmlError("document has no root element".into()))?;
    debug!(root = %root.name, "Parsed XML document");
    Ok(root)
}

fn xml_error(position: u64, message: &str) -> PubMedError {
    PubMedError::XmlError(format!("{} at byte {}", message, position))
}
