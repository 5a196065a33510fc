//! Owned element tree for vector markup
//!
//! Markup is read once with quick-xml into plain owned values so every
//! rendering intent can clone and rewrite its own copy.

use crate::types::{PackError, Result};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified name as written, prefix included
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Namespace prefix including the colon, empty when unprefixed
    pub fn prefix(&self) -> &str {
        match self.name.rfind(':') {
            Some(i) => &self.name[..=i],
            None => "",
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position when it already exists
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    /// Visit this element and every descendant element, parents first
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        self.walk_descendants_mut(f);
    }

    /// Visit every descendant element, parents first, skipping `self`
    pub fn walk_descendants_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.walk_mut(f);
            }
        }
    }
}

/// Parse markup into its root element
pub fn parse(markup: &str) -> Result<Element> {
    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(element_from(&e)?),
            Event::Empty(e) => {
                let element = element_from(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| PackError::InvalidMarkup("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(e.unescape()?.into_owned()));
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = std::str::from_utf8(&e)?;
                    parent.children.push(Node::CData(text.to_string()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PackError::InvalidMarkup(format!(
            "element <{}> is never closed",
            open.name
        )));
    }

    root.ok_or_else(|| PackError::InvalidMarkup("no root element".to_string()))
}

/// Serialize an element tree back to markup
pub fn serialize(root: &Element) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner();
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(std::str::from_utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(PackError::InvalidMarkup(
            "more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let root = parse(
            r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="10"><g><rect x="1"/></g><text>a &amp; b</text></svg>"#,
        )
        .unwrap();
        assert_eq!(root.name, "svg");
        assert_eq!(root.get("width"), Some("10"));
        assert_eq!(root.children.len(), 2);

        let Node::Element(g) = &root.children[0] else {
            panic!("expected <g>");
        };
        let Node::Element(rect) = &g.children[0] else {
            panic!("expected <rect>");
        };
        assert_eq!(rect.get("x"), Some("1"));

        let Node::Element(text) = &root.children[1] else {
            panic!("expected <text>");
        };
        assert_eq!(text.children, vec![Node::Text("a & b".to_string())]);
    }

    #[test]
    fn test_serialize_escapes_and_collapses_empty() {
        let mut root = Element::new("svg");
        root.set("data-label", "a<b");
        let mut text = Element::new("text");
        text.children.push(Node::Text("x & y".to_string()));
        root.children.push(Node::Element(text));
        root.children.push(Node::Element(Element::new("rect")));

        let out = serialize(&root).unwrap();
        assert_eq!(
            out,
            r#"<svg data-label="a&lt;b"><text>x &amp; y</text><rect/></svg>"#
        );
    }

    #[test]
    fn test_parse_rejects_broken_markup() {
        assert!(parse("<svg><g></svg>").is_err());
        assert!(parse("<svg>").is_err());
        assert!(parse("just text").is_err());
        assert!(parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_set_keeps_attribute_position() {
        let mut e = Element::new("rect");
        e.set("x", "1");
        e.set("y", "2");
        e.set("x", "3");
        assert_eq!(
            e.attributes,
            vec![
                ("x".to_string(), "3".to_string()),
                ("y".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_prefixed_names() {
        let e = Element::new("svg:rect");
        assert_eq!(e.local_name(), "rect");
        assert_eq!(e.prefix(), "svg:");
        assert_eq!(Element::new("rect").prefix(), "");
    }
}
