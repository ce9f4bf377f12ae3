use crate::id::ItemId;
use crate::item::{Item, ItemRef};

/// Flat storage for the items of one schema. The root lives at position 0.
#[derive(Debug, Clone)]
pub struct ItemArena {
    items: Vec<Item>,
}

impl Default for ItemArena {
    fn default() -> Self {
        Self {
            items: vec![Item::root()],
        }
    }
}

impl ItemArena {
    pub(crate) const ROOT: ItemRef = ItemRef(0);

    /// Number of items, the root excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get(&self, item: ItemRef) -> &Item {
        &self.items[item.0]
    }

    pub(crate) fn get_mut(&mut self, item: ItemRef) -> &mut Item {
        &mut self.items[item.0]
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// Allocates a new item and attaches it under `parent` at `sibling`.
    pub(crate) fn alloc(&mut self, parent: ItemRef, sibling: u8, id: ItemId, name: &str) -> ItemRef {
        let child = ItemRef(self.items.len());
        self.items.push(Item::new(id, name.to_string()));
        self.get_mut(parent).attach_child(sibling, child);
        child
    }

    /// Decodes `id` field by field from the root.
    ///
    /// Returns `None` if a field points to a missing child.
    pub(crate) fn find_by_id(&self, id: ItemId) -> Option<ItemRef> {
        let mut current = Self::ROOT;
        for sibling in id.path() {
            current = self.get(current).child_at(sibling)?;
        }
        (self.get(current).id() == id).then_some(current)
    }

    /// Finds the first item named `name`.
    ///
    /// The search is depth-first: an item's descendants are visited before
    /// the item itself, and earlier siblings before later ones. With unique
    /// names this is simply the item carrying the name.
    pub(crate) fn find_by_name(&self, name: &str) -> Option<ItemRef> {
        self.find_below(Self::ROOT, name)
    }

    fn find_below(&self, parent: ItemRef, name: &str) -> Option<ItemRef> {
        self.get(parent).children.iter().find_map(|&child| {
            self.find_below(child, name)
                .or_else(|| (self.get(child).full_name() == name).then_some(child))
        })
    }

    /// Every item, root first, in depth-first pre-order.
    pub(crate) fn preorder(&self) -> Vec<ItemRef> {
        let mut order = Vec::with_capacity(self.items.len());
        let mut stack = vec![Self::ROOT];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.get(current).children.iter().rev().copied());
        }
        order
    }

    /// Items in depth-first pre-order, the root included.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.preorder().into_iter().map(|item| self.get(item))
    }
}
