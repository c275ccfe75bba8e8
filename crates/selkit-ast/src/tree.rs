use core::ops::{Index, IndexMut};

use crate::NodeId;
use crate::error::TreeError;
use crate::node::{ContainerOptions, Node};

/// A live `each`/`walk` position inside one container.
///
/// `next` is the index of the next child to visit. Mutations of the
/// container's child list shift it so iteration neither skips nor revisits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    pub(crate) container: NodeId,
    pub(crate) next: usize,
}

/// Where an insertion lands in a container's child list.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Start,
    End,
    Before(NodeId),
    After(NodeId),
}

/// Arena-based selector tree with O(1) node access.
///
/// All nodes live in a contiguous vector and refer to each other by
/// [`NodeId`]. The [`Root`](crate::NodeType::Root) node is always at index 0
/// ([`NodeId::ROOT`]). Detached nodes (freshly allocated, removed, or cloned)
/// stay in the arena and can be re-inserted anywhere.
#[derive(Debug, Clone)]
pub struct SelectorTree {
    nodes: Vec<Node>,
    pub(crate) cursors: Vec<Cursor>,
}

impl SelectorTree {
    /// Create a tree holding only an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root(ContainerOptions::default())],
            cursors: Vec::new(),
        }
    }

    /// The root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a node of this tree.
    #[must_use]
    pub fn is_node(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Move a node into the arena and return its ID.
    ///
    /// The node starts detached. Child ids listed in its options are moved
    /// into it in order, detaching them from wherever they were.
    ///
    /// # Errors
    ///
    /// Fails when a listed child does not exist, or when a non-container node
    /// lists children.
    pub fn alloc(&mut self, mut node: Node) -> Result<NodeId, TreeError> {
        let children = core::mem::take(&mut node.children);
        if !children.is_empty() && !node.is_container() {
            return Err(TreeError::NotAContainer(node.node_type()));
        }
        if let Some(&missing) = children.iter().find(|&&child| !self.is_node(child)) {
            return Err(TreeError::UnknownNode(missing));
        }
        node.parent = None;

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        for child in children {
            self.append(id, child)?;
        }
        Ok(id)
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.is_node(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    fn container(&self, id: NodeId) -> Result<&Node, TreeError> {
        let node = self.get(id).ok_or(TreeError::UnknownNode(id))?;
        if node.is_container() {
            Ok(node)
        } else {
            Err(TreeError::NotAContainer(node.node_type()))
        }
    }

    fn check_container(&self, id: NodeId) -> Result<(), TreeError> {
        self.container(id).map(|_| ())
    }

    fn check_child(&self, container: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(child)?;
        if self.container(container)?.children.contains(&child) {
            Ok(())
        } else {
            Err(TreeError::NotAChild { container, child })
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node (empty for leaves and unknown ids).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The child at `index`.
    #[must_use]
    pub fn at(&self, container: NodeId, index: usize) -> Option<NodeId> {
        self.children(container).get(index).copied()
    }

    /// Position of `child` in `container`.
    #[must_use]
    pub fn index(&self, container: NodeId, child: NodeId) -> Option<usize> {
        self.children(container).iter().position(|&id| id == child)
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first(&self, container: NodeId) -> Option<NodeId> {
        self.children(container).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last(&self, container: NodeId) -> Option<NodeId> {
        self.children(container).last().copied()
    }

    /// Number of children.
    #[must_use]
    pub fn length(&self, container: NodeId) -> usize {
        self.children(container).len()
    }

    /// The sibling after `id`.
    #[must_use]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index(parent, id)?;
        self.at(parent, index + 1)
    }

    /// The sibling before `id`.
    #[must_use]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index(parent, id)?;
        index.checked_sub(1).and_then(|i| self.at(parent, i))
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Check if `descendant` sits somewhere below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Add `node` as the last child of `container`.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids, a non-container target, or a cycle.
    pub fn append(&mut self, container: NodeId, node: NodeId) -> Result<(), TreeError> {
        self.insert(container, Slot::End, node)
    }

    /// Add `node` as the first child of `container`.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids, a non-container target, or a cycle.
    pub fn prepend(&mut self, container: NodeId, node: NodeId) -> Result<(), TreeError> {
        self.insert(container, Slot::Start, node)
    }

    /// Insert `node` into `container` just before `reference`.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids, a non-container target, a `reference` that is
    /// not a child of `container`, or a cycle.
    pub fn insert_before(
        &mut self,
        container: NodeId,
        reference: NodeId,
        node: NodeId,
    ) -> Result<(), TreeError> {
        self.insert(container, Slot::Before(reference), node)
    }

    /// Insert `node` into `container` just after `reference`.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids, a non-container target, a `reference` that is
    /// not a child of `container`, or a cycle.
    pub fn insert_after(
        &mut self,
        container: NodeId,
        reference: NodeId,
        node: NodeId,
    ) -> Result<(), TreeError> {
        self.insert(container, Slot::After(reference), node)
    }

    fn insert(&mut self, container: NodeId, slot: Slot, node: NodeId) -> Result<(), TreeError> {
        self.check_container(container)?;
        self.check(node)?;
        if node == container || self.is_descendant_of(container, node) {
            return Err(TreeError::Cycle { container, node });
        }
        if let Slot::Before(reference) | Slot::After(reference) = slot {
            self.check_child(container, reference)?;
            if reference == node {
                return Ok(());
            }
        }

        self.detach(node);

        let children = &self.nodes[container.0].children;
        let index = match slot {
            Slot::Start => 0,
            Slot::End => children.len(),
            Slot::Before(reference) => self.index(container, reference).unwrap_or(0),
            Slot::After(reference) => self
                .index(container, reference)
                .map_or(children.len(), |i| i + 1),
        };

        self.nodes[container.0].children.insert(index, node);
        self.nodes[node.0].parent = Some(container);
        for cursor in self.cursors.iter_mut().filter(|c| c.container == container) {
            if index < cursor.next {
                cursor.next += 1;
            }
        }
        Ok(())
    }

    /// Unlink `node` from its parent, keeping live cursors consistent.
    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        let Some(index) = self.index(parent, node) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);
        for cursor in self.cursors.iter_mut().filter(|c| c.container == parent) {
            if index < cursor.next {
                cursor.next -= 1;
            }
        }
    }

    /// Detach `child` from `container` and return it.
    ///
    /// # Errors
    ///
    /// Fails when `child` is not a child of `container`.
    pub fn remove_child(&mut self, container: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        self.check_child(container, child)?;
        self.detach(child);
        Ok(child)
    }

    /// Detach every child of `container`, returning them in order.
    ///
    /// # Errors
    ///
    /// Fails on an unknown id or a non-container target.
    pub fn remove_all(&mut self, container: NodeId) -> Result<Vec<NodeId>, TreeError> {
        self.check_container(container)?;
        let removed = core::mem::take(&mut self.nodes[container.0].children);
        for &child in &removed {
            self.nodes[child.0].parent = None;
        }
        for cursor in self.cursors.iter_mut().filter(|c| c.container == container) {
            cursor.next = 0;
        }
        Ok(removed)
    }

    /// Same as [`remove_all`](Self::remove_all), discarding the removed ids.
    ///
    /// # Errors
    ///
    /// Fails on an unknown id or a non-container target.
    pub fn empty(&mut self, container: NodeId) -> Result<(), TreeError> {
        self.remove_all(container).map(|_| ())
    }

    /// Detach `node` from its parent and return it. A detached node is left as-is.
    ///
    /// # Errors
    ///
    /// Fails when `node` does not exist.
    pub fn remove(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        self.check(node)?;
        self.detach(node);
        Ok(node)
    }

    /// Put `nodes` where `node` is, in order, then detach `node`.
    ///
    /// A detached `node` is returned unchanged.
    ///
    /// # Errors
    ///
    /// Fails on unknown ids or when a replacement would create a cycle.
    pub fn replace_with(&mut self, node: NodeId, nodes: &[NodeId]) -> Result<NodeId, TreeError> {
        self.check(node)?;
        let Some(parent) = self.parent(node) else {
            return Ok(node);
        };
        for &replacement in nodes {
            self.insert_before(parent, node, replacement)?;
        }
        self.detach(node);
        Ok(node)
    }

    /// Deep copy `node` and its descendants. The copy is detached.
    ///
    /// # Errors
    ///
    /// Fails when `node` does not exist.
    pub fn clone_node(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        self.clone_node_with(node, |_| {})
    }

    /// Deep copy `node`, then apply `overrides` to the copy (not its descendants).
    ///
    /// # Errors
    ///
    /// Fails when `node` does not exist.
    pub fn clone_node_with<F>(&mut self, node: NodeId, overrides: F) -> Result<NodeId, TreeError>
    where
        F: FnOnce(&mut Node),
    {
        self.check(node)?;
        let copy = self.deep_copy(node);
        overrides(&mut self.nodes[copy.0]);
        Ok(copy)
    }

    fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let mut node = self.nodes[id.0].clone();
        node.parent = None;
        let children = core::mem::take(&mut node.children);

        let copy = NodeId(self.nodes.len());
        self.nodes.push(node);
        for child in children {
            let child_copy = self.deep_copy(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }
}

impl Default for SelectorTree {
    fn default() -> Self {
        Self::new()
    }
}

/// # Panics
///
/// Panics when `id` was not issued by this tree. Use [`SelectorTree::get`]
/// for a fallible lookup.
impl Index<NodeId> for SelectorTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// # Panics
///
/// Panics when `id` was not issued by this tree.
impl IndexMut<NodeId> for SelectorTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SelectorTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
