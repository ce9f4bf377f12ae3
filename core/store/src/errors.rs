//! Error types for the item store.
//!
//! Every failing operation returns a [`TreeError`] carrying the offending
//! name, index or layer. [`ErrorKind`] collapses those errors into the stable
//! numeric codes used by command-line callers.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::id::{MAX_LAYERS, MAX_SIBLINGS};

/// Errors raised while building a schema, ingesting batches or querying values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum TreeError {
    /// The schema nests deeper than an id can encode.
    #[error("layer {layer} exceeds the maximum of {max} layers", max = MAX_LAYERS)]
    OverLayer { layer: u32 },

    /// The input document has no root node.
    #[error("document has no root node")]
    NullPointer,

    /// One level of the schema declares more children than an id field can index.
    #[error("`{parent}` declares {count} items, at most {max} are allowed", max = MAX_SIBLINGS)]
    OverItem { parent: String, count: usize },

    /// The schema declares no top-level item.
    #[error("no `{tag}` node found at the top level of the schema")]
    NoXmlNode { tag: String },

    /// A node lacks a required attribute, or carries an empty name.
    #[error("`{tag}` node is missing attribute `{attribute}`")]
    NoXmlAttr { tag: String, attribute: String },

    /// A sibling or batch index is zero, out of range or not a decimal number.
    #[error("illegal index `{index}`")]
    IllegalIndex { index: String },

    /// An item name does not resolve to an item with a well-formed id chain.
    #[error("item `{name}` does not resolve to a legal id")]
    IllegalId { name: String },

    /// The index is already taken: a sibling index under the same parent, or
    /// a batch that already holds a value for the item.
    #[error("index {index} is already used by `{owner}`")]
    UsedIndex { index: u32, owner: String },

    /// The batch index is not known to the tree.
    #[error("batch {index} is not registered")]
    UnregisteredIndex { index: u32 },

    /// No item carries the requested name.
    #[error("item `{name}` is not registered")]
    UnregisteredItem { name: String },

    /// The declared type is unknown or the raw text does not parse as that type.
    #[error("cannot read `{raw}` as a value of type `{type_name}`")]
    IllegalValue { type_name: String, raw: String },

    /// Two schema items share a name while names are required to be unique.
    #[error("item name `{name}` is declared more than once")]
    DuplicateName { name: String },
}

impl TreeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::OverLayer { .. } => ErrorKind::OverLayer,
            TreeError::NullPointer => ErrorKind::NullPointer,
            TreeError::OverItem { .. } => ErrorKind::OverItem,
            TreeError::NoXmlNode { .. } => ErrorKind::NoXmlNode,
            TreeError::NoXmlAttr { .. } => ErrorKind::NoXmlAttr,
            TreeError::IllegalIndex { .. } => ErrorKind::IllegalIndex,
            TreeError::IllegalId { .. } => ErrorKind::IllegalId,
            TreeError::UsedIndex { .. } => ErrorKind::UsedIndex,
            TreeError::UnregisteredIndex { .. } => ErrorKind::UnregisteredIndex,
            TreeError::UnregisteredItem { .. } => ErrorKind::UnregisteredItem,
            TreeError::IllegalValue { .. } => ErrorKind::IllegalValue,
            TreeError::DuplicateName { .. } => ErrorKind::DuplicateName,
        }
    }

    pub(crate) fn missing_attr(tag: &str, attribute: &str) -> Self {
        TreeError::NoXmlAttr {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

/// Flat classification of [`TreeError`].
///
/// Code `0` is reserved for success and never produced by a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorKind {
    OverLayer = 1,
    NullPointer,
    OverItem,
    NoXmlNode,
    NoXmlAttr,
    IllegalIndex,
    IllegalId,
    UsedIndex,
    UnregisteredIndex,
    UnregisteredItem,
    IllegalValue,
    DuplicateName,
}

impl ErrorKind {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::OverLayer => "over-layer",
            ErrorKind::NullPointer => "null-pointer",
            ErrorKind::OverItem => "over-item",
            ErrorKind::NoXmlNode => "no-xml-node",
            ErrorKind::NoXmlAttr => "no-xml-attr",
            ErrorKind::IllegalIndex => "illegal-index",
            ErrorKind::IllegalId => "illegal-id",
            ErrorKind::UsedIndex => "used-index",
            ErrorKind::UnregisteredIndex => "unregistered-index",
            ErrorKind::UnregisteredItem => "unregistered-item",
            ErrorKind::IllegalValue => "illegal-value",
            ErrorKind::DuplicateName => "duplicate-name",
        };
        write!(f, "{name}")
    }
}
