//! Schema items and their per-batch values.

use crate::errors::TreeError;
use crate::id::{ItemId, MAX_SIBLINGS};
use crate::member::{BatchIndex, Member};
use crate::value::Value;

/// Position of an item inside its [`ItemArena`](crate::arena::ItemArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ItemRef(pub(crate) usize);

/// One named node of the schema.
///
/// Children are kept in declaration order for traversal, and additionally
/// slotted by sibling index so that a packed id decodes through plain index
/// look-ups.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    name: String,
    members: Vec<Member>,
    pub(crate) children: Vec<ItemRef>,
    slots: [Option<ItemRef>; MAX_SIBLINGS as usize],
}

impl Item {
    pub(crate) fn root() -> Self {
        Self::new(ItemId::ROOT, String::new())
    }

    pub(crate) fn new(id: ItemId, name: String) -> Self {
        Self {
            id,
            name,
            members: Vec::new(),
            children: Vec::new(),
            slots: [None; MAX_SIBLINGS as usize],
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item's name; `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        if self.id.is_root() {
            None
        } else {
            Some(&self.name)
        }
    }

    /// Distinct values in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn holds(&self, batch: BatchIndex) -> bool {
        self.members.iter().any(|member| member.holds(batch))
    }

    /// Returns the value this item holds for `batch`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnregisteredIndex`] if no member holds `batch`.
    pub fn value_of(&self, batch: BatchIndex) -> Result<&Value, TreeError> {
        self.members
            .iter()
            .find(|member| member.holds(batch))
            .map(Member::value)
            .ok_or(TreeError::UnregisteredIndex { index: batch })
    }

    pub(crate) fn full_name(&self) -> &str {
        &self.name
    }

    pub(crate) fn child_at(&self, sibling: u8) -> Option<ItemRef> {
        match sibling {
            1..=MAX_SIBLINGS => self.slots[usize::from(sibling - 1)],
            _ => None,
        }
    }

    pub(crate) fn attach_child(&mut self, sibling: u8, child: ItemRef) {
        debug_assert!((1..=MAX_SIBLINGS).contains(&sibling));
        self.slots[usize::from(sibling - 1)] = Some(child);
        self.children.push(child);
    }

    /// Records `value` for `batch`, sharing an equal member if one exists.
    /// Returns `true` when a new member was created.
    pub(crate) fn add_value(&mut self, batch: BatchIndex, value: Value) -> bool {
        if let Some(member) = self.members.iter_mut().find(|m| *m.value() == value) {
            member.insert(batch);
            false
        } else {
            self.members.push(Member::new(value, batch));
            true
        }
    }

    /// Drops `batch` from every member and reclaims members left without a
    /// batch. Returns the number of reclaimed members.
    pub(crate) fn remove_batch(&mut self, batch: BatchIndex) -> usize {
        let before = self.members.len();
        self.members.retain_mut(|member| {
            member.remove(batch);
            !member.is_orphaned()
        });
        before - self.members.len()
    }
}
