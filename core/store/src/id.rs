//! Packed item identifiers.
//!
//! An [`ItemId`] encodes the path from the root to an item as a sequence of
//! 4-bit sibling indices, one field per layer, layer 0 in the least
//! significant field:
//!
//! ```text
//! 0x00000321
//!        │││
//!        ││└─ layer 0: sibling 1
//!        │└── layer 1: sibling 2
//!        └─── layer 2: sibling 3
//! ```
//!
//! Sibling index 0 never appears inside a valid id, so the number of
//! populated fields is the depth of the item and the root is `0`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;

/// Bits per layer field.
pub const FIELD_WIDTH: u32 = 4;
/// Number of layers that fit into an id.
pub const MAX_LAYERS: u32 = u32::BITS / FIELD_WIDTH;
/// Largest sibling index; also the maximum number of children per item.
pub const MAX_SIBLINGS: u8 = (1 << FIELD_WIDTH) - 1;

const FIELD_MASK: u32 = (1 << FIELD_WIDTH) - 1;

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub const ROOT: ItemId = ItemId(0);

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        ItemId(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Computes the id of the child at `sibling` under `parent`, where the
    /// child lives in `layer`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OverLayer`] if `layer` is not below [`MAX_LAYERS`]
    /// and [`TreeError::IllegalIndex`] if `sibling` is outside `1..=15`.
    pub fn pack(parent: ItemId, layer: u32, sibling: u8) -> Result<ItemId, TreeError> {
        if layer >= MAX_LAYERS {
            return Err(TreeError::OverLayer { layer });
        }
        if sibling == 0 || sibling > MAX_SIBLINGS {
            return Err(TreeError::IllegalIndex {
                index: sibling.to_string(),
            });
        }
        Ok(ItemId(
            (u32::from(sibling) << (FIELD_WIDTH * layer)) | parent.0,
        ))
    }

    /// Returns the sibling index stored in the field for `layer`, or 0 when
    /// the field is empty or `layer` is out of range.
    #[must_use]
    pub fn sibling_index_at(self, layer: u32) -> u8 {
        if layer >= MAX_LAYERS {
            return 0;
        }
        // masked to four bits
        #[allow(clippy::cast_possible_truncation)]
        let index = ((self.0 >> (FIELD_WIDTH * layer)) & FIELD_MASK) as u8;
        index
    }

    /// Number of populated fields; 0 for the root.
    #[must_use]
    pub fn depth(self) -> u32 {
        (u32::BITS - self.0.leading_zeros()).div_ceil(FIELD_WIDTH)
    }

    /// Strips the most significant populated field. Top-level ids and the
    /// root map to the root.
    #[must_use]
    pub fn parent(self) -> ItemId {
        match self.depth() {
            0 => ItemId::ROOT,
            depth => ItemId(self.0 & !(FIELD_MASK << (FIELD_WIDTH * (depth - 1)))),
        }
    }

    /// Sibling indices from layer 0 down to the item itself.
    pub fn path(self) -> impl Iterator<Item = u8> {
        (0..self.depth()).map(move |layer| self.sibling_index_at(layer))
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = TreeError;

    /// Parses a hexadecimal id, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        u32::from_str_radix(digits, 16)
            .map(ItemId)
            .map_err(|_| TreeError::IllegalIndex {
                index: s.to_string(),
            })
    }
}
