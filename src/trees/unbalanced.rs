//! A plain binary search tree, without any balancing.
//!
//! The height depends on the insertion order: inserting sorted keys makes a
//! path. Useful as a baseline, and for tests that need a specific shape.

use super::basic_tree::*;
use super::*;
use crate::data::example_data::NaturalOrder;
use crate::error::{Result, TreeError};

const PARENT_ERROR: &str = "invariant violated: a predecessor below the left child has no parent";

/// An unbalanced search tree. Equal keys go after the equal keys already in the tree.
pub struct UnbalancedTree<K, V, O = NaturalOrder> {
    tree: BasicTree<K, V>,
    order: O,
}

impl<K: Ord, V> UnbalancedTree<K, V> {
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<K: Ord, V> Default for UnbalancedTree<K, V> {
    fn default() -> Self {
        UnbalancedTree::new()
    }
}

impl<K, V, O: KeyOrder<K>> UnbalancedTree<K, V, O> {
    pub fn with_order(order: O) -> Self {
        UnbalancedTree {
            tree: BasicTree::new(),
            order,
        }
    }

    /// Inserts a new leaf. Returns its id.
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
        let id = self.tree.alloc(Node::new_alg(key, val, ()));
        self.tree.attach(id, &self.order);
        id
    }

    /// The number of nodes on the longest path from the root.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.tree.root().into_iter().map(|id| (id, 1)).collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.tree.get(id);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }
}

impl<K, V, O: KeyOrder<K>> SomeTree<K, V> for UnbalancedTree<K, V, O> {
    type AlgData = ();
    type Order = O;

    fn inner(&self) -> &BasicTree<K, V> {
        &self.tree
    }

    fn inner_mut(&mut self) -> &mut BasicTree<K, V> {
        &mut self.tree
    }

    fn key_order(&self) -> &O {
        &self.order
    }

    /// A node with two children is replaced by its in-order predecessor.
    fn delete(&mut self, key: &K) -> Option<(K, Option<V>)> {
        let id = self.locate(key)?;
        let node = self.tree.get(id);
        match (node.left(), node.right()) {
            (None, child) | (child, None) => self.tree.replace_in_parent(id, child),
            (Some(left), Some(right)) => {
                let pred = self.tree.last_in(left);
                if pred != left {
                    let pred_parent = self.tree.get(pred).parent().expect(PARENT_ERROR);
                    let pred_left = self.tree.get(pred).left();
                    self.tree.set_child(pred_parent, Side::Right, pred_left);
                    self.tree.set_child(pred, Side::Left, Some(left));
                }
                self.tree.replace_in_parent(id, Some(pred));
                self.tree.set_child(pred, Side::Right, Some(right));
            }
        }
        Some(self.tree.free(id).into_entry())
    }

    fn assert_correctness(&self) {
        self.tree.assert_links();
        self.tree.assert_order(&self.order);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for UnbalancedTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = UnbalancedTree::new();
        for (key, val) in iter {
            tree.insert(key, val);
        }
        tree
    }
}
