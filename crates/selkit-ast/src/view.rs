//! Owned, serializable view of a subtree, for JSON dumps and debugging.

use serde::Serialize;

use crate::NodeId;
use crate::node::{AttributeData, NodeType, Source, Spaces};
use crate::tree::SelectorTree;

/// A nested copy of one node and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    /// Node type name.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Decoded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Namespace prefix, for namespace-bearing nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Attribute fields, for attribute nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributeData>,
    /// Root only: the input ended with a bare `,`.
    #[serde(skip_serializing_if = "core::ops::Not::not")]
    pub trailing_comma: bool,
    /// Children of containers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeView>,
}

impl SelectorTree {
    /// Build a [`NodeView`] of the subtree at `id`.
    #[must_use]
    pub fn view(&self, id: NodeId) -> Option<NodeView> {
        let node = self.get(id)?;
        Some(NodeView {
            node_type: node.node_type(),
            value: node.value().map(str::to_owned),
            spaces: node.spaces.clone(),
            source: node.source,
            namespace: node.namespace().map(str::to_owned),
            attribute: node.attribute_data().cloned(),
            trailing_comma: node.trailing_comma(),
            nodes: node
                .children()
                .iter()
                .filter_map(|&child| self.view(child))
                .collect(),
        })
    }
}
