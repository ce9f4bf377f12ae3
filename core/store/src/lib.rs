#![warn(clippy::pedantic)]
//! Hierarchical named-value store.
//!
//! A schema of named items is built once from an attributed node tree, then
//! populated by any number of batches of values. Each batch contributes at
//! most one value per item; equal values are stored once per item and shared
//! by every batch that supplied them.
//!
//! ```text
//! schema document ──► SchemaBuilder ──► ItemArena ─┐
//!                                                  ├─► ItemTree ◄── batch documents
//!                                   known batches ─┘
//! ```
//!
//! Inputs are consumed through the [`AttributedNode`] trait, so the store never
//! touches document syntax directly.

pub mod arena;
pub mod builder;
pub mod errors;
pub mod id;
pub mod item;
pub mod member;
pub mod node;
pub mod tree;
pub mod value;
pub mod vocabulary;

pub use errors::{ErrorKind, TreeError};
pub use id::ItemId;
pub use item::Item;
pub use member::{BatchIndex, Member};
pub use node::AttributedNode;
pub use tree::{BatchEntry, ItemTree};
pub use value::{Value, ValueType};
pub use vocabulary::Vocabulary;
