//! Selector tree implementation for selkit.
//!
//! This crate provides the node model and the arena-based tree that the
//! parser builds: a [`SelectorTree`] owns every [`Node`], and all
//! relationships are expressed with [`NodeId`] indices.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! so moving a node between containers is an index rewrite and a node can only
//! ever sit in one child list. Removed nodes stay allocated (detached) until the
//! tree is dropped, which keeps any `NodeId` a caller holds valid.
//!
//! # Scope
//!
//! - **Node Model** - the twelve node variants and their options records
//! - **Container API** - `append`, `insert_before`, `remove_child`, `replace_with`, ...
//! - **Traversal** - mutation-tolerant `each` / `walk` and the filtered walkers
//! - **Serializer** - exact inverse of the parser for unmutated trees

/// Escape decoding and identifier checks.
pub mod escape;
mod error;
mod node;
mod serialize;
mod traverse;
mod tree;
mod view;

pub use error::{NodeError, TreeError};
pub use node::{
    AttributeData, AttributeOperator, AttributeOptions, AttributeRaws, ContainerOptions,
    NamespaceOptions, Node, NodeKind, NodeOptions, NodeType, Position, Raws, Source, Spaces,
};
pub use serialize::NodeDisplay;
pub use tree::{AncestorIterator, SelectorTree};
pub use view::NodeView;

use serde::Serialize;

/// A type-safe index into a [`SelectorTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}
