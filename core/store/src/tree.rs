//! The item tree: one schema plus every batch of values slotted onto it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::arena::ItemArena;
use crate::builder::SchemaBuilder;
use crate::errors::TreeError;
use crate::id::ItemId;
use crate::item::{Item, ItemRef};
use crate::member::BatchIndex;
use crate::node::AttributedNode;
use crate::value::Value;
use crate::vocabulary::Vocabulary;

static NO_VALUE: Value = Value::None;

/// One item's value within a batch, as returned by
/// [`ItemTree::values_for_batch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry<'a> {
    pub id: ItemId,
    /// Item name; empty for the root.
    pub name: &'a str,
    /// [`Value::None`] when the item holds nothing for the batch.
    pub value: &'a Value,
}

/// A schema of named items populated by batches of values.
///
/// The tree is single-threaded: queries borrow it immutably, ingestion and
/// deletion borrow it mutably.
#[derive(Debug, Clone)]
pub struct ItemTree {
    arena: ItemArena,
    vocabulary: Vocabulary,
    batches: BTreeSet<BatchIndex>,
}

impl ItemTree {
    /// Builds a tree from the root node of a schema document.
    ///
    /// # Errors
    ///
    /// Returns the first construction error; see [`SchemaBuilder::build`].
    pub fn build<N: AttributedNode>(root: &N, vocabulary: Vocabulary) -> Result<Self, TreeError> {
        match SchemaBuilder::new(&vocabulary).build(root) {
            Ok(arena) => {
                info!(items = arena.len(), "item tree built");
                Ok(Self {
                    arena,
                    vocabulary,
                    batches: BTreeSet::new(),
                })
            }
            Err(err) => {
                warn!(kind = %err.kind(), "item tree build failed: {err}");
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of schema items, the root excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Items in depth-first pre-order, the root first.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.arena.iter()
    }

    /// Ingests every batch node of a batch document, in document order.
    ///
    /// Ingestion stops at the first failing batch. Batches before it stay
    /// ingested and known; the failing batch leaves no trace. A batch whose
    /// index attribute is missing or not decimal reads as batch 0 and fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing batch; see [`Self::ingest_batch`].
    pub fn ingest_document<N: AttributedNode>(
        &mut self,
        root: &N,
    ) -> Result<Vec<BatchIndex>, TreeError> {
        let batch_tag = self.vocabulary.batch_tag.clone();
        let mut ingested = Vec::new();
        for batch in root.children_tagged(&batch_tag) {
            let index = batch
                .attribute(&self.vocabulary.index_attr)
                .and_then(|raw| raw.trim().parse::<BatchIndex>().ok())
                .unwrap_or(0);
            info!(batch = index, "adding batch");
            if let Err(err) = self.ingest_batch(index, batch.children()) {
                warn!(batch = index, kind = %err.kind(), "batch rejected: {err}");
                return Err(err);
            }
            ingested.push(index);
        }
        Ok(ingested)
    }

    /// Ingests one batch: every member node names an item, declares a type
    /// and carries the raw value as text.
    ///
    /// Members are validated before anything is written, so a failing batch
    /// leaves the tree unchanged. On success the batch becomes known, even
    /// when it holds no members.
    ///
    /// # Errors
    ///
    /// - [`TreeError::IllegalIndex`] if `index` is 0
    /// - [`TreeError::NoXmlAttr`] if a member lacks its name or type
    /// - [`TreeError::IllegalId`] if a name matches no item with a legal id
    /// - [`TreeError::UsedIndex`] if an item already holds a value for this
    ///   batch, or is named twice in it
    /// - [`TreeError::IllegalValue`] for unknown types or unparseable text
    pub fn ingest_batch<'n, N, I>(&mut self, index: BatchIndex, members: I) -> Result<(), TreeError>
    where
        N: AttributedNode + 'n,
        I: IntoIterator<Item = &'n N>,
    {
        if index == 0 {
            return Err(TreeError::IllegalIndex {
                index: index.to_string(),
            });
        }

        let mut staged: Vec<(ItemRef, Value)> = Vec::new();
        for node in members {
            let target = self.resolve_member(node, index, &staged)?;
            let type_name = node.attribute(&self.vocabulary.type_attr).ok_or_else(|| {
                TreeError::missing_attr(node.tag(), &self.vocabulary.type_attr)
            })?;
            let value = Value::parse(type_name, node.text())?;
            staged.push((target, value));
        }

        for (target, value) in staged {
            let item = self.arena.get_mut(target);
            debug!(item = item.full_name(), batch = index, %value, "add value");
            item.add_value(index, value);
        }
        self.batches.insert(index);
        Ok(())
    }

    fn resolve_member<N: AttributedNode>(
        &self,
        node: &N,
        index: BatchIndex,
        staged: &[(ItemRef, Value)],
    ) -> Result<ItemRef, TreeError> {
        let name = node
            .attribute(&self.vocabulary.name_attr)
            .ok_or_else(|| TreeError::missing_attr(node.tag(), &self.vocabulary.name_attr))?;
        let illegal_id = || TreeError::IllegalId {
            name: name.to_string(),
        };
        let target = self.arena.find_by_name(name).ok_or_else(illegal_id)?;
        let item = self.arena.get(target);
        self.arena
            .find_by_id(item.id().parent())
            .ok_or_else(illegal_id)?;

        if item.holds(index) || staged.iter().any(|(pending, _)| *pending == target) {
            return Err(TreeError::UsedIndex {
                index,
                owner: name.to_string(),
            });
        }
        Ok(target)
    }

    /// Known batch indices, highest first.
    #[must_use]
    pub fn batches(&self) -> Vec<BatchIndex> {
        self.batches.iter().rev().copied().collect()
    }

    #[must_use]
    pub fn is_known(&self, batch: BatchIndex) -> bool {
        self.batches.contains(&batch)
    }

    /// Decodes a packed id to its item.
    #[must_use]
    pub fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.arena.find_by_id(id).map(|item| self.arena.get(item))
    }

    /// Name of the item with the given id; `None` for the root and for ids
    /// that decode to no item.
    #[must_use]
    pub fn item_name(&self, id: ItemId) -> Option<&str> {
        self.find_by_id(id).and_then(Item::name)
    }

    /// Resolves an item by name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredItem`] if no item carries the name.
    pub fn item(&self, name: &str) -> Result<&Item, TreeError> {
        self.arena
            .find_by_name(name)
            .map(|item| self.arena.get(item))
            .ok_or_else(|| TreeError::UnregisteredItem {
                name: name.to_string(),
            })
    }

    /// The value the named item holds for `batch`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredItem`] for unknown names and
    /// [`TreeError::UnregisteredIndex`] if the item holds nothing for `batch`.
    pub fn value_of(&self, name: &str, batch: BatchIndex) -> Result<&Value, TreeError> {
        self.item(name)?.value_of(batch)
    }

    /// One entry per item, root included, in depth-first pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredIndex`] if `batch` is not known.
    pub fn values_for_batch(&self, batch: BatchIndex) -> Result<Vec<BatchEntry<'_>>, TreeError> {
        if !self.is_known(batch) {
            return Err(TreeError::UnregisteredIndex { index: batch });
        }
        Ok(self
            .arena
            .iter()
            .map(|item| BatchEntry {
                id: item.id(),
                name: item.full_name(),
                value: item.value_of(batch).unwrap_or(&NO_VALUE),
            })
            .collect())
    }

    /// Every batch the named item holds a value for, ordered by batch index.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredItem`] if no item carries the name.
    pub fn values_for_item(&self, name: &str) -> Result<BTreeMap<BatchIndex, &Value>, TreeError> {
        let item = self.item(name)?;
        Ok(item
            .members()
            .iter()
            .flat_map(|member| member.batches().map(move |batch| (batch, member.value())))
            .collect())
    }

    /// Removes a batch from every item, dropping values no other batch holds.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredIndex`] if `batch` is not known; the
    /// tree is untouched in that case.
    pub fn delete_batch(&mut self, batch: BatchIndex) -> Result<(), TreeError> {
        if !self.batches.remove(&batch) {
            return Err(TreeError::UnregisteredIndex { index: batch });
        }
        let mut reclaimed = 0;
        for item in self.arena.items_mut() {
            let dropped = item.remove_batch(batch);
            if dropped > 0 {
                debug!(item = item.full_name(), batch, reclaimed = dropped, "reclaim members");
                reclaimed += dropped;
            }
        }
        info!(batch, reclaimed, "batch deleted");
        Ok(())
    }
}
