//! Implementation of red-black trees.
//!
//! Every node is colored red or black, and the tree keeps three invariants:
//! the root is black, no red node has a red child, and every path from a node
//! down to a missing child passes through the same number of black nodes.
//! Together they keep the height at most `2 log(n+1)`, so every operation
//! takes `O(log n)` worst-case time.
//!
//! Insertion and deletion restore the invariants by recoloring and rotating
//! on the way up from the modified position.

use super::basic_tree::*;
use super::*;
use crate::data::example_data::NaturalOrder;
use crate::error::{Result, TreeError};

const RED_ROOT_ERROR: &str = "invariant violated: a red node has no parent";
const SIBLING_ERROR: &str = "invariant violated: a black-height deficit without a sibling";

/// The color of a node. This is the [`Node::alg_data`] of red-black trees.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

impl<K, V> Node<K, V, Color> {
    pub fn color(&self) -> Color {
        self.alg_data
    }

    pub fn is_red(&self) -> bool {
        self.alg_data == Color::Red
    }
}

/// A red-black tree.
///
/// Keys are ordered by `O`, which is fixed when the tree is created.
/// Equal keys are allowed; a new key goes after all the equal keys already in the tree.
pub struct RedBlackTree<K, V, O = NaturalOrder> {
    tree: BasicTree<K, V, Color>,
    order: O,
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Creates an empty [`RedBlackTree`], ordered by the keys' [`Ord`] instance.
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<K: Ord, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<K, V, O: KeyOrder<K>> RedBlackTree<K, V, O> {
    pub fn with_order(order: O) -> Self {
        RedBlackTree {
            tree: BasicTree::new(),
            order,
        }
    }

    /// Inserts a new node. Returns its id.
    ///```
    /// use ordtree::red_black::RedBlackTree;
    /// use ordtree::SomeTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in [4, 3, 2, 1] {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    /// # tree.assert_correctness();
    ///```
    pub fn insert(&mut self, key: K, val: V) -> NodeId {
        self.insert_node(key, Some(val))
    }

    /// Inserts a record created with [`Record::default`].
    /// Fails if the record has no key, without changing the tree.
    pub fn insert_record(&mut self, record: Record<K, V>) -> Result<NodeId> {
        let key = record
            .key
            .ok_or(TreeError::InvalidArgument("a record must have a key"))?;
        Ok(self.insert_node(key, record.val))
    }

    fn insert_node(&mut self, key: K, val: Option<V>) -> NodeId {
        let id = self.tree.alloc(Node::new_alg(key, val, Color::Red));
        self.tree.attach(id, &self.order);
        self.insert_fixup(id);
        id
    }

    fn color(&self, id: NodeId) -> Color {
        self.tree.get(id).alg_data
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.tree.node_mut(id).alg_data = color;
    }

    /// Missing nodes count as black.
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.map_or(false, |id| self.color(id) == Color::Red)
    }

    /// `id` is red, and might have a red parent.
    fn insert_fixup(&mut self, mut id: NodeId) {
        loop {
            let parent = match self.tree.get(id).parent() {
                None => {
                    self.set_color(id, Color::Black);
                    return;
                }
                Some(parent) => parent,
            };
            if !self.is_red(Some(parent)) {
                return;
            }

            let grandparent = self.tree.get(parent).parent().expect(RED_ROOT_ERROR);
            let side = self.tree.side_of(parent).expect(RED_ROOT_ERROR);
            let uncle = self.tree.get(grandparent).child(!side);

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                id = grandparent;
                continue;
            }

            // inner grandchild: rotate it to the outside first
            let mut parent = parent;
            if self.tree.side_of(id) == Some(!side) {
                self.tree.rotate(parent, side);
                parent = id;
            }
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.tree.rotate(grandparent, !side);
            return;
        }
    }

    /// Unlinks the node from the tree, restores the invariants, and frees it.
    fn delete_node(&mut self, id: NodeId) -> Node<K, V, Color> {
        let node = self.tree.get(id);
        let (left, right, parent) = (node.left(), node.right(), node.parent());

        match (left, right) {
            (None, child) | (child, None) => {
                let side = self.tree.side_of(id).unwrap_or(Side::Left);
                self.tree.replace_in_parent(id, child);
                if self.color(id) == Color::Black {
                    match child {
                        Some(child) if self.is_red(Some(child)) => {
                            self.set_color(child, Color::Black)
                        }
                        _ => self.delete_fixup(parent, side),
                    }
                }
            }
            (Some(left), Some(right)) => {
                // the in-order predecessor takes the node's place and color
                let pred = self.tree.last_in(left);
                let pred_parent = self.tree.get(pred).parent().expect(RED_ROOT_ERROR);

                self.tree.replace_in_parent(id, Some(pred));
                self.tree.set_child(pred, Side::Right, Some(right));
                if pred_parent != id {
                    let pred_left = self.tree.get(pred).left();
                    self.tree.set_child(pred_parent, Side::Right, pred_left);
                    self.tree.set_child(pred, Side::Left, Some(left));
                }

                let removed_color = self.color(pred);
                self.set_color(pred, self.color(id));

                if removed_color == Color::Black {
                    let (deficit_parent, side) = if pred_parent != id {
                        (pred_parent, Side::Right)
                    } else {
                        (pred, Side::Left)
                    };
                    match self.tree.get(deficit_parent).child(side) {
                        Some(child) if self.is_red(Some(child)) => {
                            self.set_color(child, Color::Black)
                        }
                        _ => self.delete_fixup(Some(deficit_parent), side),
                    }
                }
            }
        }
        self.tree.free(id)
    }

    /// The subtree on the `side` of `parent` has one black node less than
    /// the other side. Restores the black height.
    fn delete_fixup(&mut self, mut parent: Option<NodeId>, mut side: Side) {
        while let Some(p) = parent {
            let mut sibling = self.tree.get(p).child(!side).expect(SIBLING_ERROR);

            if self.is_red(Some(sibling)) {
                self.set_color(p, Color::Red);
                self.set_color(sibling, Color::Black);
                self.tree.rotate(p, side);
                sibling = self.tree.get(p).child(!side).expect(SIBLING_ERROR);
            }

            let near = self.tree.get(sibling).child(side);
            let far = self.tree.get(sibling).child(!side);

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                if self.is_red(Some(p)) {
                    self.set_color(p, Color::Black);
                    return;
                }
                // the whole subtree of `p` is short by one: move the deficit up
                side = self.tree.side_of(p).unwrap_or(Side::Left);
                parent = self.tree.get(p).parent();
                continue;
            }

            if !self.is_red(far) {
                let near = near.expect(SIBLING_ERROR);
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                self.tree.rotate(sibling, !side);
                sibling = near;
            }

            let far = self.tree.get(sibling).child(!side).expect(SIBLING_ERROR);
            self.set_color(sibling, self.color(p));
            self.set_color(p, Color::Black);
            self.set_color(far, Color::Black);
            self.tree.rotate(p, side);
            return;
        }
    }

    /// The number of black nodes on any path from the root to a missing child.
    pub fn black_height(&self) -> usize {
        self.black_height_of(self.tree.root())
    }

    /// Computes the black height of a subtree, asserting that it is the same
    /// along every path, and that no red node has a red child.
    fn black_height_of(&self, id: Option<NodeId>) -> usize {
        let id = match id {
            None => return 0,
            Some(id) => id,
        };
        let node = self.tree.get(id);
        if node.is_red() {
            assert!(
                !self.is_red(node.left()) && !self.is_red(node.right()),
                "a red node has a red child"
            );
        }
        let left = self.black_height_of(node.left());
        let right = self.black_height_of(node.right());
        assert_eq!(left, right, "black heights differ");
        left + if node.is_red() { 0 } else { 1 }
    }
}

impl<K, V, O: KeyOrder<K>> SomeTree<K, V> for RedBlackTree<K, V, O> {
    type AlgData = Color;
    type Order = O;

    fn inner(&self) -> &BasicTree<K, V, Color> {
        &self.tree
    }

    fn inner_mut(&mut self) -> &mut BasicTree<K, V, Color> {
        &mut self.tree
    }

    fn key_order(&self) -> &O {
        &self.order
    }

    /// Deletes a node with this key.
    /// If the node has two children, its in-order predecessor is moved into
    /// its place, so the ids of all the other nodes stay valid.
    fn delete(&mut self, key: &K) -> Option<(K, Option<V>)> {
        let id = self.locate(key)?;
        Some(self.delete_node(id).into_entry())
    }

    fn assert_correctness(&self) {
        self.tree.assert_links();
        self.tree.assert_order(&self.order);
        if let Some(root) = self.tree.root() {
            assert_eq!(self.color(root), Color::Black, "the root is red");
        }
        self.black_height();
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = RedBlackTree::new();
        for (key, val) in iter {
            tree.insert(key, val);
        }
        tree
    }
}
