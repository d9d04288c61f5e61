//! The basic tree module.
//!
//! This module implements the node record and [`BasicTree`], the arena-backed
//! core that every keyed tree in this crate is built on. [`BasicTree`] knows
//! how to search by key and how to rotate, but it doesn't balance anything:
//! the balancing algorithms are expressed as sequences of
//! [`BasicTree::rotate_left`] and [`BasicTree::rotate_right`] together with
//! changes to the algorithm-specific data of the nodes.

mod arena;
pub mod iterators;
mod print;

pub(crate) use arena::Arena;
pub use arena::NodeId;
pub use iterators::{Iter, Keys};

use super::Side;
use crate::data::KeyOrder;

const NO_CHILD_ERROR: &str = "invariant violated: rotation without a child to pivot on";

/// A node of a tree.
///
/// `left` and `right` own their subtrees, `parent` is a back-reference that is
/// [`None`] exactly for the root. `alg_data` is the data used by the balancing
/// algorithm: the color in red-black trees, the priority in treaps.
#[derive(Clone, Debug)]
pub struct Node<K, V, T = ()> {
    key: K,
    val: Option<V>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) alg_data: T,
}

impl<K, V, T> Node<K, V, T> {
    pub(crate) fn new_alg(key: K, val: Option<V>, alg_data: T) -> Self {
        Node {
            key,
            val,
            left: None,
            right: None,
            parent: None,
            alg_data,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn val(&self) -> Option<&V> {
        self.val.as_ref()
    }

    pub(crate) fn set_val(&mut self, val: V) {
        self.val = Some(val);
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn alg_data(&self) -> &T {
        &self.alg_data
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn into_entry(self) -> (K, Option<V>) {
        (self.key, self.val)
    }
}

/// A tree of [`Node`]s stored in an arena. Might be empty.
#[derive(Clone, Debug)]
pub struct BasicTree<K, V, T = ()> {
    arena: Arena<Node<K, V, T>>,
    root: Option<NodeId>,
}

impl<K, V, T> Default for BasicTree<K, V, T> {
    fn default() -> Self {
        BasicTree::new()
    }
}

impl<K, V, T> BasicTree<K, V, T> {
    pub fn new() -> Self {
        BasicTree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the node with this id, if it belongs to the tree.
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V, T>> {
        self.arena.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V, T> {
        &mut self.arena[id]
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<K, V, T> {
        &self.arena[id]
    }

    /// Allocates a node that isn't linked to anything yet.
    pub(crate) fn alloc(&mut self, node: Node<K, V, T>) -> NodeId {
        self.arena.insert(node)
    }

    /// Looks for a node whose key equals `key`, descending from the root.
    /// Returns the first equal node on the way down.
    pub fn search<O: KeyOrder<K>>(&self, key: &K, order: &O) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.get(id);
            if order.key_eq(&node.key, key) {
                return Some(id);
            }
            current = if order.key_gt(&node.key, key) {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Links an allocated, detached node into the tree as a new leaf,
    /// at the position given by its key. Equal keys go to the right.
    pub(crate) fn attach<O: KeyOrder<K>>(&mut self, new: NodeId, order: &O) {
        let mut current = match self.root {
            None => {
                self.root = Some(new);
                return;
            }
            Some(root) => root,
        };
        loop {
            let side = if order.key_gt(&self.get(current).key, &self.get(new).key) {
                Side::Left
            } else {
                Side::Right
            };
            match self.get(current).child(side) {
                Some(next) => current = next,
                None => {
                    *self.node_mut(current).child_mut(side) = Some(new);
                    self.node_mut(new).parent = Some(current);
                    return;
                }
            }
        }
    }

    /// On which side of its parent the node hangs. [`None`] for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.get(id).parent?;
        if self.get(parent).left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Puts `new` in the slot that `old` occupies in its parent
    /// (or in the root slot), and fixes `new`'s parent link.
    /// `old`'s own parent link is left untouched.
    pub(crate) fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.get(old).parent;
        match self.side_of(old) {
            None => self.root = new,
            Some(side) => {
                let parent = parent.expect("only the root has no side");
                *self.node_mut(parent).child_mut(side) = new;
            }
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    /// Rotates `id` down to the right. Its left child takes its place.
    ///```text
    ///      n           l
    ///     / \         / \
    ///    l   c  ->   a   n
    ///   / \             / \
    ///  a   b           b   c
    ///```
    pub fn rotate_right(&mut self, id: NodeId) {
        self.rotate(id, Side::Right)
    }

    /// Rotates `id` down to the left. Its right child takes its place.
    pub fn rotate_left(&mut self, id: NodeId) {
        self.rotate(id, Side::Left)
    }

    /// Rotates `id` down towards `direction`: the child on the other side
    /// takes its place, and the child's inner subtree moves over to `id`.
    pub(crate) fn rotate(&mut self, id: NodeId, direction: Side) {
        let pivot_side = !direction;
        let pivot = self.get(id).child(pivot_side).expect(NO_CHILD_ERROR);
        let inner = self.get(pivot).child(direction);

        self.set_child(id, pivot_side, inner);
        self.replace_in_parent(id, Some(pivot));
        self.set_child(pivot, direction, Some(id));
    }

    /// Puts `child` in the `side` slot of `parent`, and fixes `child`'s parent link.
    /// Whatever was in the slot before is dropped from the tree structure.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.node_mut(parent).child_mut(side) = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    /// Removes a leaf from the tree and returns it.
    pub(crate) fn detach_leaf(&mut self, id: NodeId) -> Node<K, V, T> {
        assert!(self.get(id).is_leaf(), "invariant violated: detaching a non-leaf");
        self.replace_in_parent(id, None);
        self.free(id)
    }

    /// Frees the slot of a node that is no longer linked into the tree.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V, T> {
        let mut node = self
            .arena
            .remove(id)
            .expect("invariant violated: freeing a vacant slot");
        node.left = None;
        node.right = None;
        node.parent = None;
        node
    }

    /// Moves the subtree rooted at `root` out of `self` into a new tree.
    /// `root` must already be unlinked from its parent.
    pub(crate) fn extract_subtree(&mut self, root: Option<NodeId>) -> BasicTree<K, V, T> {
        let mut out = BasicTree::new();
        out.root = move_nodes(self, root, &mut out);
        out
    }

    /// Moves all the nodes of `other` into `self`'s arena, and returns the
    /// new id of `other`'s root. The moved subtree isn't linked to anything.
    pub(crate) fn absorb(&mut self, mut other: BasicTree<K, V, T>) -> Option<NodeId> {
        let root = other.root.take();
        move_nodes(&mut other, root, self)
    }

    /// The leftmost node of the subtree of `id`.
    pub fn first_in(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.get(id).left {
            id = left;
        }
        id
    }

    /// The rightmost node of the subtree of `id`.
    pub fn last_in(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.get(id).right {
            id = right;
        }
        id
    }

    /// The first node in in-order.
    pub fn first(&self) -> Option<NodeId> {
        Some(self.first_in(self.root?))
    }

    /// The in-order successor of `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.get(id).right {
            return Some(self.first_in(right));
        }
        let mut current = id;
        loop {
            let parent = self.get(current).parent?;
            if self.get(parent).left == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Iterates over the nodes in in-order.
    pub fn iter(&self) -> Iter<'_, K, V, T> {
        Iter::new(self)
    }

    /// Iterates over the keys in in-order.
    pub fn keys(&self) -> Keys<'_, K, V, T> {
        Keys::new(self)
    }

    /// Checks that every child's parent link points back at its parent,
    /// and that the root has no parent. Panics otherwise.
    pub fn assert_links(&self) {
        if let Some(root) = self.root {
            assert!(self.get(root).parent.is_none(), "the root has a parent");
        }
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        let mut count = 0;
        while let Some(id) = stack.pop() {
            count += 1;
            let node = self.get(id);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.get(child).parent, Some(id), "broken parent link");
                stack.push(child);
            }
        }
        assert_eq!(count, self.len(), "unreachable nodes in the arena");
    }

    /// Checks that the keys are in order along the in-order traversal.
    /// Panics otherwise.
    pub fn assert_order<O: KeyOrder<K>>(&self, order: &O) {
        let mut nodes = self.iter();
        if let Some(mut prev) = nodes.next() {
            for node in nodes {
                assert!(
                    !order.key_gt(prev.key(), node.key()),
                    "keys out of order in the in-order traversal"
                );
                prev = node;
            }
        }
    }
}

/// Moves the subtree of `root` from `src` to `dst`, node by node.
/// Returns the id of the root in `dst`. The new root has no parent.
fn move_nodes<K, V, T>(
    src: &mut BasicTree<K, V, T>,
    root: Option<NodeId>,
    dst: &mut BasicTree<K, V, T>,
) -> Option<NodeId> {
    let mut new_root = None;
    // each entry is a node to move, together with its new parent
    let mut stack: Vec<(NodeId, Option<(NodeId, Side)>)> = root.into_iter().map(|id| (id, None)).collect();
    while let Some((id, parent)) = stack.pop() {
        let left = src.get(id).left;
        let right = src.get(id).right;
        let node = src.free(id);
        let new = dst.alloc(node);
        match parent {
            None => new_root = Some(new),
            Some((parent, side)) => {
                *dst.node_mut(parent).child_mut(side) = Some(new);
                dst.node_mut(new).parent = Some(parent);
            }
        }
        if let Some(left) = left {
            stack.push((left, Some((new, Side::Left))));
        }
        if let Some(right) = right {
            stack.push((right, Some((new, Side::Right))));
        }
    }
    new_root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::example_data::NaturalOrder;

    fn tree_of(keys: &[i32]) -> BasicTree<i32, (), ()> {
        let mut tree = BasicTree::new();
        for &key in keys {
            let id = tree.alloc(Node::new_alg(key, None, ()));
            tree.attach(id, &NaturalOrder);
        }
        tree
    }

    fn keys(tree: &BasicTree<i32, (), ()>) -> Vec<i32> {
        tree.iter().map(|node| *node.key()).collect()
    }

    #[test]
    fn rotations_keep_order_and_links() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root().unwrap();
        let left = tree.get(root).left().unwrap();

        tree.rotate_right(root);
        assert_eq!(tree.root(), Some(left));
        assert_eq!(*tree.get(left).key(), 2);
        assert_eq!(tree.get(root).parent(), Some(left));
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
        tree.assert_links();

        tree.rotate_left(left);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
        tree.assert_links();

        // rotating an inner node updates its parent's slot
        let right = tree.get(root).right().unwrap();
        tree.rotate_left(right);
        assert_eq!(*tree.get(tree.get(root).right().unwrap()).key(), 7);
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
        tree.assert_links();
    }

    #[test]
    fn search_and_ties() {
        let tree = tree_of(&[5, 3, 5, 8]);
        let found = tree.search(&5, &NaturalOrder).unwrap();
        assert_eq!(found, tree.root().unwrap());
        assert_eq!(tree.search(&4, &NaturalOrder), None);
        // the second 5 went to the right of the first
        let first = tree.get(found);
        assert_eq!(*tree.get(first.right().unwrap()).key(), 5);
        assert_eq!(keys(&tree), vec![3, 5, 5, 8]);
    }

    #[test]
    fn extract_and_absorb() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root().unwrap();
        let right = tree.get(root).right().unwrap();
        tree.node_mut(root).right = None;
        tree.node_mut(right).parent = None;

        let moved = tree.extract_subtree(Some(right));
        assert_eq!(keys(&moved), vec![5, 6, 7]);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4]);
        assert_eq!(moved.len(), 3);
        assert_eq!(tree.len(), 4);
        moved.assert_links();
        tree.assert_links();

        let new_right = tree.absorb(moved);
        tree.node_mut(root).right = new_right;
        tree.node_mut(new_right.unwrap()).parent = Some(root);
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
        tree.assert_links();
    }
}
