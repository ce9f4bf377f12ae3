//! Parsing XML text into an owned element tree.
//!
//! Only elements, attributes, text and CDATA are kept. Declarations, comments
//! and processing instructions are skipped.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::element::XmlElement;
use crate::errors::XmlError;

/// A parsed document. `root` is `None` when the input holds no element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDocument {
    root: Option<XmlElement>,
}

impl XmlDocument {
    /// Parses a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed markup, unclosed elements or more than
    /// one root element.
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX);
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(element_from_start(e, position)?),
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e, position)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(open) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|source| XmlError::Syntax { position, source })?;
                        open.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(_)) => {
                    // end tag names are checked by the reader
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element)?;
                    }
                }
                Ok(Event::Eof) => break,
                Err(source) => return Err(XmlError::Syntax { position, source }),
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed { tag: open.tag });
        }
        Ok(Self { root })
    }

    /// Reads and parses a document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::FileReadError`] if the file cannot be read, or any
    /// parse error from [`XmlDocument::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, XmlError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| XmlError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn root(&self) -> Option<&XmlElement> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn into_root(self) -> Option<XmlElement> {
        self.root
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, XmlError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|source| XmlError::Attribute { position, source })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|source| XmlError::Syntax { position, source })?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(XmlError::MultipleRoots { tag: element.tag });
    }
    Ok(())
}
