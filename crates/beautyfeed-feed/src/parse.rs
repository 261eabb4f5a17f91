//! Generic XML document parsing.
//!
//! Real supplier feeds routinely contain bare `&` characters, so input is
//! passed through [`sanitize_ampersands`] before it reaches the XML reader.
//! The result is a plain element tree: attributes live in their own map,
//! character data in [`XmlElement::text`], and repeated tags are always a
//! collection of children regardless of how many times they occur.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::error::FeedParseError;

static VALID_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:amp|lt|gt|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);").expect("valid entity regex")
});

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// An element and everything nested inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    /// The element's own character data, text and CDATA pieces concatenated
    /// as they appear, trimmed once at the closing tag.
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>, position: u64) -> Result<Self, FeedParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = BTreeMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FeedParseError::syntax(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| FeedParseError::syntax(position, e))?;
            attributes.insert(key, value.trim().to_string());
        }
        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Attribute value, if present and non-empty.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// First child with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given tag name, in document order. Yields the
    /// same shape whether the tag appears once or many times.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child with the given name, if non-empty.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn finish_text(&mut self) {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
    }
}

/// Escapes every `&` that does not begin a predefined XML entity or a
/// numeric character reference. CDATA sections are left untouched.
#[must_use]
pub fn sanitize_ampersands(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 32);
    let mut rest = input;
    while let Some(start) = rest.find(CDATA_OPEN) {
        escape_bare_ampersands(&rest[..start], &mut out);
        let section = &rest[start..];
        let end = section
            .find(CDATA_CLOSE)
            .map_or(section.len(), |i| i + CDATA_CLOSE.len());
        out.push_str(&section[..end]);
        rest = &section[end..];
    }
    escape_bare_ampersands(rest, &mut out);

    if out == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(out)
    }
}

fn escape_bare_ampersands(segment: &str, out: &mut String) {
    let mut rest = segment;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if VALID_ENTITY.is_match(tail) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
}

/// Parses a feed document into its root [`XmlElement`].
///
/// # Errors
///
/// Returns [`FeedParseError`] if the sanitized document is not well-formed:
/// a syntax error, mismatched or unclosed tags, more than one root element,
/// or no root element at all. No partial tree is returned.
pub fn parse_document(xml: &str) -> Result<XmlElement, FeedParseError> {
    let sanitized = sanitize_ampersands(xml);
    let mut reader = Reader::from_str(&sanitized);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                ensure_single_root(root.as_ref(), position)?;
                stack.push(XmlElement::from_start(&e, position)?);
            }
            Ok(Event::Empty(e)) => {
                ensure_single_root(root.as_ref(), position)?;
                let element = XmlElement::from_start(&e, position)?;
                attach(element, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                // quick-xml verifies end names, so the top of the stack is
                // the element being closed.
                if let Some(mut element) = stack.pop() {
                    element.finish_text();
                    attach(element, &mut stack, &mut root);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| FeedParseError::syntax(position, err))?;
                    current.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedParseError::syntax(reader.buffer_position(), e)),
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        // Report the innermost unclosed element.
        return Err(FeedParseError::Unclosed { element: open.name });
    }

    root.ok_or(FeedParseError::NoRootElement)
}

fn ensure_single_root(root: Option<&XmlElement>, position: u64) -> Result<(), FeedParseError> {
    match root {
        Some(existing) => Err(FeedParseError::syntax(
            position,
            format!("content after root element <{}>", existing.name),
        )),
        None => Ok(()),
    }
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
