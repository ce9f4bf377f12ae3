//! Names of the tags and attributes read from input documents.

use serde::{Deserialize, Serialize};

/// Tag and attribute names used when walking schema and batch documents.
///
/// ```toml
/// [vocabulary]
/// item-tag = "Content"
/// batch-tag = "Batch"
/// index-attr = "index"
/// name-attr = "name"
/// type-attr = "type"
/// unique-names = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Vocabulary {
    /// Tag of schema item nodes.
    pub item_tag: String,
    /// Tag of batch nodes inside a batch document.
    pub batch_tag: String,
    /// Sibling index of an item, or index of a batch.
    pub index_attr: String,
    /// Item name, on schema items and on batch members.
    pub name_attr: String,
    /// Declared value type of a batch member.
    pub type_attr: String,
    /// Reject schemas declaring the same item name twice.
    pub unique_names: bool,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            item_tag: "Content".to_string(),
            batch_tag: "Batch".to_string(),
            index_attr: "index".to_string(),
            name_attr: "name".to_string(),
            type_attr: "type".to_string(),
            unique_names: true,
        }
    }
}

impl Vocabulary {
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
