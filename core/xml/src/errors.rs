use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing an XML document.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum XmlError {
    #[error("failed to read {}: {source}", path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    #[error("element `{tag}` is never closed")]
    Unclosed { tag: String },

    #[error("unexpected second root element `{tag}`")]
    MultipleRoots { tag: String },
}
