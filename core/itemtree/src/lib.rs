#![warn(clippy::pedantic)]
//! Core Orchestration Crate for item trees
//!
//! This crate ties the XML reader and the item store together and exposes
//! file-level entry points.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemtree::{add_batches_from_file, build_tree_from_file, Vocabulary};
//!
//! let mut tree = build_tree_from_file("xml_name.xml", Vocabulary::default())?;
//! add_batches_from_file(&mut tree, "xml_val.xml")?;
//!
//! for (batch, value) in tree.values_for_item("student")? {
//!     println!("{batch}: {value}");
//! }
//! tree.delete_batch(2)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Documents
//!
//! The schema document declares items, one nesting level per id layer:
//!
//! ```xml
//! <Schema>
//!   <Content index="1" name="student">
//!     <Content index="1" name="age"/>
//!   </Content>
//! </Schema>
//! ```
//!
//! The batch document fills them in, one `Batch` per set of values:
//!
//! ```xml
//! <Values>
//!   <Batch index="1">
//!     <Member name="student" type="string">Alice</Member>
//!     <Member name="age" type="int">20</Member>
//!   </Batch>
//! </Values>
//! ```
//!
//! Tag and attribute names come from [`Vocabulary`] and can be changed in a
//! TOML configuration file, see [`load_config`].
//!
//! ## Errors
//!
//! Store failures surface as [`TreeError`] inside the returned
//! [`anyhow::Error`]; use `downcast_ref::<TreeError>()` to recover the
//! [`ErrorKind`].

pub mod config;

use std::path::Path;

use anyhow::Context;

pub use config::{TreeConfig, load_config};
pub use itemtree_store::{
    AttributedNode, BatchEntry, BatchIndex, ErrorKind, Item, ItemId, ItemTree, Member, TreeError,
    Value, ValueType, Vocabulary,
};
pub use itemtree_xml::{XmlDocument, XmlElement, XmlError};

/// Returns the root element of a parsed document.
///
/// # Errors
///
/// Returns [`TreeError::NullPointer`] if the document holds no element.
pub fn document_root(document: &XmlDocument) -> Result<&XmlElement, TreeError> {
    document.root().ok_or(TreeError::NullPointer)
}

/// Builds an item tree from schema XML text.
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML or the schema is
/// rejected by the store.
pub fn build_tree_from_str(schema: &str, vocabulary: Vocabulary) -> anyhow::Result<ItemTree> {
    let document = XmlDocument::parse(schema).context("failed to parse schema document")?;
    Ok(ItemTree::build(document_root(&document)?, vocabulary)?)
}

/// Builds an item tree from a schema file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the schema is
/// rejected by the store.
pub fn build_tree_from_file(
    path: impl AsRef<Path>,
    vocabulary: Vocabulary,
) -> anyhow::Result<ItemTree> {
    let path = path.as_ref();
    let document = XmlDocument::from_file(path)
        .with_context(|| format!("failed to load schema {}", path.display()))?;
    let tree = ItemTree::build(document_root(&document)?, vocabulary)?;
    tracing::info!(schema = %path.display(), items = tree.len(), "schema loaded");
    Ok(tree)
}

/// Ingests every batch of a batch document given as XML text.
///
/// Returns the indices of the ingested batches in document order.
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML or a batch is rejected.
/// Batches before the rejected one remain ingested.
pub fn add_batches_from_str(tree: &mut ItemTree, values: &str) -> anyhow::Result<Vec<BatchIndex>> {
    let document = XmlDocument::parse(values).context("failed to parse batch document")?;
    Ok(tree.ingest_document(document_root(&document)?)?)
}

/// Ingests every batch of a batch file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a batch is
/// rejected. Batches before the rejected one remain ingested.
pub fn add_batches_from_file(
    tree: &mut ItemTree,
    path: impl AsRef<Path>,
) -> anyhow::Result<Vec<BatchIndex>> {
    let path = path.as_ref();
    let document = XmlDocument::from_file(path)
        .with_context(|| format!("failed to load batches {}", path.display()))?;
    let batches = tree.ingest_document(document_root(&document)?)?;
    tracing::info!(values = %path.display(), batches = batches.len(), "batches loaded");
    Ok(batches)
}
