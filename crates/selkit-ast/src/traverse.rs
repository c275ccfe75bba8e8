//! Child iteration, descendant walks, and read-only queries over containers.
//!
//! `each` and `walk` hand the callback `&mut SelectorTree`, so it may insert
//! or remove nodes while iterating. Every container being iterated keeps a
//! cursor on the tree; child-list edits shift those cursors so that no child
//! is skipped or visited twice.

use core::cmp::Ordering;
use core::ops::ControlFlow;

use crate::NodeId;
use crate::node::{Node, NodeType};
use crate::tree::{Cursor, SelectorTree};

type Callback<'a> = dyn FnMut(&mut SelectorTree, NodeId) -> ControlFlow<()> + 'a;

impl SelectorTree {
    fn iterate(
        &mut self,
        container: NodeId,
        deep: bool,
        callback: &mut Callback<'_>,
    ) -> ControlFlow<()> {
        if !self.get(container).is_some_and(Node::is_container) {
            return ControlFlow::Continue(());
        }

        self.cursors.push(Cursor { container, next: 0 });
        let slot = self.cursors.len() - 1;

        let flow = loop {
            let next = self.cursors[slot].next;
            let Some(child) = self.at(container, next) else {
                break ControlFlow::Continue(());
            };
            self.cursors[slot].next = next + 1;

            if callback(self, child).is_break() {
                break ControlFlow::Break(());
            }
            // A child the callback detached is not descended into.
            if deep
                && self.parent(child) == Some(container)
                && self[child].is_container()
                && self.iterate(child, true, callback).is_break()
            {
                break ControlFlow::Break(());
            }
        };

        let _ = self.cursors.pop();
        flow
    }

    /// Visit the direct children of `container` in order.
    ///
    /// Returning [`ControlFlow::Break`] stops the iteration and is passed
    /// through. The callback may mutate the tree.
    pub fn each<F>(&mut self, container: NodeId, mut callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.iterate(container, false, &mut callback)
    }

    /// Visit every descendant of `container` (not `container` itself) in
    /// pre-order. Same contract as [`each`](Self::each).
    pub fn walk<F>(&mut self, container: NodeId, mut callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.iterate(container, true, &mut callback)
    }

    fn walk_type<F>(
        &mut self,
        container: NodeId,
        node_type: NodeType,
        mut callback: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk(container, |tree, id| {
            if tree.get(id).is_some_and(|n| n.node_type() == node_type) {
                callback(tree, id)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// [`walk`](Self::walk) restricted to `tag` nodes.
    pub fn walk_tags<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Tag, callback)
    }

    /// [`walk`](Self::walk) restricted to `class` nodes.
    pub fn walk_classes<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Class, callback)
    }

    /// [`walk`](Self::walk) restricted to `id` nodes.
    pub fn walk_ids<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Id, callback)
    }

    /// [`walk`](Self::walk) restricted to `attribute` nodes.
    pub fn walk_attributes<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Attribute, callback)
    }

    /// [`walk`](Self::walk) restricted to `pseudo` nodes.
    pub fn walk_pseudos<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Pseudo, callback)
    }

    /// [`walk`](Self::walk) restricted to `combinator` nodes.
    pub fn walk_combinators<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Combinator, callback)
    }

    /// [`walk`](Self::walk) restricted to `comment` nodes.
    pub fn walk_comments<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Comment, callback)
    }

    /// [`walk`](Self::walk) restricted to `nesting` nodes.
    pub fn walk_nesting<F>(&mut self, container: NodeId, callback: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<()>,
    {
        self.walk_type(container, NodeType::Nesting, callback)
    }

    fn child_nodes(&self, container: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.children(container).iter().map(|&id| (id, &self[id]))
    }

    /// Apply `f` to each child, collecting the results.
    pub fn map<T, F>(&self, container: NodeId, mut f: F) -> Vec<T>
    where
        F: FnMut(NodeId, &Node) -> T,
    {
        self.child_nodes(container).map(|(id, node)| f(id, node)).collect()
    }

    /// Children for which `predicate` holds, in order.
    pub fn filter<F>(&self, container: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.child_nodes(container)
            .filter(|&(id, node)| predicate(id, node))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether any child satisfies `predicate`.
    pub fn some<F>(&self, container: NodeId, mut predicate: F) -> bool
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.child_nodes(container).any(|(id, node)| predicate(id, node))
    }

    /// Whether every child satisfies `predicate` (true for no children).
    pub fn every<F>(&self, container: NodeId, mut predicate: F) -> bool
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.child_nodes(container).all(|(id, node)| predicate(id, node))
    }

    /// Fold the children into one value.
    pub fn reduce<T, F>(&self, container: NodeId, init: T, mut f: F) -> T
    where
        F: FnMut(T, NodeId, &Node) -> T,
    {
        self.child_nodes(container)
            .fold(init, |acc, (id, node)| f(acc, id, node))
    }

    /// Children ordered by `compare`. Stable; the tree itself is not reordered.
    pub fn sort<F>(&self, container: NodeId, mut compare: F) -> Vec<NodeId>
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        let mut ids = self.children(container).to_vec();
        ids.sort_by(|&a, &b| compare(&self[a], &self[b]));
        ids
    }

    /// Split the children after the first one matching `predicate`.
    ///
    /// The first group ends with the matching child; the second holds the rest.
    /// Without a match everything lands in the first group.
    pub fn split<F>(&self, container: NodeId, mut predicate: F) -> (Vec<NodeId>, Vec<NodeId>)
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        let children = self.children(container);
        match children.iter().position(|&id| predicate(id, &self[id])) {
            Some(index) => (children[..=index].to_vec(), children[index + 1..].to_vec()),
            None => (children.to_vec(), Vec::new()),
        }
    }
}
