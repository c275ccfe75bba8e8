//! Selector text output.
//!
//! Every node renders as `spaces.before`, its body, then `spaces.after`.
//! Raw spellings win over decoded values, so an unmutated parse tree prints
//! back to exactly its input.

use core::fmt;

use crate::NodeId;
use crate::node::{AttributeData, Node, NodeKind};
use crate::tree::SelectorTree;

/// Displays one subtree. Returned by [`SelectorTree::display`].
#[derive(Clone, Copy)]
pub struct NodeDisplay<'a> {
    tree: &'a SelectorTree,
    id: NodeId,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_node(self.id, f)
    }
}

impl fmt::Display for SelectorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(self.root(), f)
    }
}

impl SelectorTree {
    /// Serialize the subtree at `id`. Unknown ids yield an empty string.
    #[must_use]
    pub fn stringify(&self, id: NodeId) -> String {
        self.display(id).to_string()
    }

    /// A [`Display`](fmt::Display) adapter for the subtree at `id`.
    #[must_use]
    pub const fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { tree: self, id }
    }

    fn write_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.get(id) else {
            return Ok(());
        };

        f.write_str(&node.spaces.before)?;
        match node.kind() {
            NodeKind::Root { trailing_comma } => {
                self.write_joined(node.children(), f)?;
                if *trailing_comma {
                    f.write_str(",")?;
                }
            }
            NodeKind::Selector => {
                for &child in node.children() {
                    self.write_node(child, f)?;
                }
            }
            NodeKind::Pseudo => {
                write_raw(node, f)?;
                if !node.children().is_empty() {
                    f.write_str("(")?;
                    self.write_joined(node.children(), f)?;
                    f.write_str(")")?;
                }
            }
            NodeKind::Tag { .. } | NodeKind::Universal { .. } => {
                f.write_str(&node.ns())?;
                write_raw(node, f)?;
            }
            NodeKind::Class { .. } => {
                f.write_str(&node.ns())?;
                f.write_str(".")?;
                write_raw(node, f)?;
            }
            NodeKind::Id => {
                f.write_str("#")?;
                write_raw(node, f)?;
            }
            NodeKind::Attribute(data) => write_attribute(node, data, f)?,
            NodeKind::Combinator | NodeKind::Comment | NodeKind::Nesting | NodeKind::String => {
                write_raw(node, f)?;
            }
        }
        f.write_str(&node.spaces.after)
    }

    fn write_joined(&self, ids: &[NodeId], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            self.write_node(id, f)?;
        }
        Ok(())
    }
}

fn write_raw(node: &Node, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(node.raw_value().unwrap_or_default())
}

fn write_attribute(node: &Node, data: &AttributeData, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let raws = &data.raws;
    f.write_str("[")?;
    f.write_str(&raws.before_attribute)?;
    f.write_str(&node.ns())?;
    f.write_str(raws.attribute.as_deref().unwrap_or(data.attribute()))?;
    f.write_str(&raws.after_attribute)?;
    if let Some(operator) = data.operator {
        f.write_str(operator.as_str())?;
        f.write_str(&raws.after_operator)?;
        f.write_str(node.value().unwrap_or_default())?;
    }
    if data.insensitive {
        f.write_str(raws.insensitive.as_deref().unwrap_or(" i"))?;
    }
    f.write_str(&raws.after_value)?;
    f.write_str("]")
}
