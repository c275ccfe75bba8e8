//! Errors raised by node constructors and tree mutation.

use thiserror::Error;

use crate::NodeId;
use crate::node::{AttributeOperator, NodeType};

/// A structural mutation that would break the tree's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id was not issued by this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),

    /// Only `root`, `selector`, and `pseudo` nodes own children.
    #[error("{0} nodes cannot hold children")]
    NotAContainer(NodeType),

    /// The reference node does not live in the given container.
    #[error("node {child:?} is not a child of {container:?}")]
    NotAChild {
        /// The container that was searched.
        container: NodeId,
        /// The node that was expected in it.
        child: NodeId,
    },

    /// The insertion would make a node its own ancestor.
    #[error("inserting {node:?} into {container:?} would make it its own ancestor")]
    Cycle {
        /// The intended new parent.
        container: NodeId,
        /// The node being inserted.
        node: NodeId,
    },
}

/// Invalid constructor input or a field the variant does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// `attribute` needs a non-empty attribute name.
    #[error("attribute selectors need a name")]
    EmptyAttributeName,

    /// An operator was supplied without a value to compare against.
    #[error("attribute operator `{0}` needs a value")]
    MissingAttributeValue(AttributeOperator),

    /// Namespaces only apply to tag, class, universal, and attribute nodes.
    #[error("{0} nodes do not carry a namespace")]
    NamespaceUnsupported(NodeType),
}
