#![warn(clippy::pedantic)]
//! Owned XML element trees for the item store.
//!
//! Documents are parsed with `quick-xml` into [`XmlElement`]s, which implement
//! [`AttributedNode`](itemtree_store::AttributedNode) so they can be handed to
//! schema construction and batch ingestion directly.

pub mod document;
pub mod element;
pub mod errors;

pub use document::XmlDocument;
pub use element::XmlElement;
pub use errors::XmlError;
