//! Schema builder that converts an attributed node tree into an [`ItemArena`].
//!
//! The builder walks the schema document top-down. Every node tagged with the
//! vocabulary's item tag becomes one [`Item`](crate::item::Item):
//!
//! 1. Read the sibling index attribute and check it is in `1..=15` and unused
//!    among the node's siblings
//! 2. Read the name attribute
//! 3. Pack the id from the parent id, the layer and the sibling index
//! 4. Attach the item to its parent and recurse into the node
//!
//! # Error Handling
//!
//! Construction stops at the first error met in document order, depth-first.
//! The child count of a level is checked before any child of that level is
//! visited. A failed build yields no arena at all.
//!
//! # Layers
//!
//! Top-level items live in layer 0. A node without item children is a leaf at
//! any depth, so a schema may use all eight layers; item children below the
//! eighth layer fail with [`TreeError::OverLayer`].

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::arena::ItemArena;
use crate::errors::TreeError;
use crate::id::{ItemId, MAX_LAYERS, MAX_SIBLINGS};
use crate::item::ItemRef;
use crate::node::AttributedNode;
use crate::vocabulary::Vocabulary;

pub struct SchemaBuilder<'v> {
    vocabulary: &'v Vocabulary,
    arena: ItemArena,
    names: FxHashSet<String>,
}

impl<'v> SchemaBuilder<'v> {
    #[must_use]
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            arena: ItemArena::default(),
            names: FxHashSet::default(),
        }
    }

    /// Builds the item arena from the schema document's root node.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NoXmlNode`] if the root has no item children
    /// - [`TreeError::OverItem`] if a node has more than 15 item children
    /// - [`TreeError::OverLayer`] if items nest below the last layer
    /// - [`TreeError::NoXmlAttr`] if an item lacks its index or name
    /// - [`TreeError::IllegalIndex`] / [`TreeError::UsedIndex`] for bad or
    ///   repeated sibling indices
    /// - [`TreeError::DuplicateName`] if names must be unique and are not
    pub fn build<N: AttributedNode>(mut self, root: &N) -> Result<ItemArena, TreeError> {
        self.build_level(root, ItemArena::ROOT, 0)?;
        Ok(self.arena)
    }

    fn build_level<N: AttributedNode>(
        &mut self,
        node: &N,
        parent: ItemRef,
        layer: u32,
    ) -> Result<(), TreeError> {
        let vocabulary = self.vocabulary;
        let children: Vec<&N> = node.children_tagged(&vocabulary.item_tag).collect();

        if children.is_empty() {
            if layer == 0 {
                return Err(TreeError::NoXmlNode {
                    tag: vocabulary.item_tag.clone(),
                });
            }
            return Ok(());
        }
        if layer >= MAX_LAYERS {
            return Err(TreeError::OverLayer { layer });
        }
        if children.len() > usize::from(MAX_SIBLINGS) {
            return Err(TreeError::OverItem {
                parent: self.owner_name(parent),
                count: children.len(),
            });
        }

        let mut used = FxHashSet::default();
        for child in children {
            let raw_index = child
                .attribute(&vocabulary.index_attr)
                .filter(|raw| !raw.is_empty())
                .ok_or_else(|| TreeError::missing_attr(child.tag(), &vocabulary.index_attr))?;
            let sibling = parse_sibling_index(raw_index)?;
            if !used.insert(sibling) {
                return Err(TreeError::UsedIndex {
                    index: u32::from(sibling),
                    owner: self.owner_name(parent),
                });
            }

            let name = child
                .attribute(&vocabulary.name_attr)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| TreeError::missing_attr(child.tag(), &vocabulary.name_attr))?;
            if vocabulary.unique_names && !self.names.insert(name.to_string()) {
                return Err(TreeError::DuplicateName {
                    name: name.to_string(),
                });
            }

            let id = ItemId::pack(self.arena.get(parent).id(), layer, sibling)?;
            let item = self.arena.alloc(parent, sibling, id, name);
            debug!(name, %id, "add item");

            self.build_level(child, item, layer + 1)?;
        }
        Ok(())
    }

    fn owner_name(&self, item: ItemRef) -> String {
        self.arena
            .get(item)
            .name()
            .unwrap_or("<root>")
            .to_string()
    }
}

fn parse_sibling_index(raw: &str) -> Result<u8, TreeError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|index| (1..=MAX_SIBLINGS).contains(index))
        .ok_or_else(|| TreeError::IllegalIndex {
            index: raw.to_string(),
        })
}
