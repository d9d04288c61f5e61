//! This module contains the trees of the crate, and the contract that the
//! keyed trees share.
//!
//! Every keyed tree owns a [`BasicTree`](basic_tree::BasicTree) and a
//! [`KeyOrder`] fixed at construction. Searching and updating are the same for
//! all of them, and are implemented once in [`SomeTree`]. Inserting and
//! deleting are specific to each balancing algorithm.

pub mod basic_tree;
pub mod red_black;
pub mod segment_tree;
pub mod treap;
pub mod unbalanced;

use crate::data::KeyOrder;
use basic_tree::{BasicTree, Iter, Keys, Node, NodeId};

/// A direction in a binary tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl std::ops::Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A record to be inserted into a tree.
///
/// [`Record::default`] is the factory for fresh records: all the fields start
/// out missing, and the caller fills in what it has. Inserting a record
/// without a key (or, into a treap, without a priority) fails with
/// [`TreeError::InvalidArgument`](crate::TreeError::InvalidArgument).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Record<K, V, P = ()> {
    pub key: Option<K>,
    pub val: Option<V>,
    pub priority: Option<P>,
}

impl<K, V, P> Default for Record<K, V, P> {
    fn default() -> Self {
        Record {
            key: None,
            val: None,
            priority: None,
        }
    }
}

impl<K, V, P> Record<K, V, P> {
    pub fn new(key: K) -> Self {
        Record {
            key: Some(key),
            ..Default::default()
        }
    }

    pub fn with_val(mut self, val: V) -> Self {
        self.val = Some(val);
        self
    }

    pub fn with_priority(mut self, priority: P) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// The operations shared by every keyed tree.
pub trait SomeTree<K, V> {
    /// The data each node keeps for the balancing algorithm.
    type AlgData;
    type Order: KeyOrder<K>;

    fn inner(&self) -> &BasicTree<K, V, Self::AlgData>;

    // using this function might mess up the internal structure of the tree.
    // be warned!
    fn inner_mut(&mut self) -> &mut BasicTree<K, V, Self::AlgData>;

    fn key_order(&self) -> &Self::Order;

    /// Removes a node with this key, and returns its key and value.
    /// Returns [`None`] if there is no such node.
    fn delete(&mut self, key: &K) -> Option<(K, Option<V>)>;

    /// Checks all the invariants of the tree. If it finds a violation, it panics.
    fn assert_correctness(&self);

    /// Returns the id of a node with this key.
    fn locate(&self, key: &K) -> Option<NodeId> {
        self.inner().search(key, self.key_order())
    }

    /// Returns a node with this key.
    /// Takes `O(height)` time.
    fn search(&self, key: &K) -> Option<&Node<K, V, Self::AlgData>> {
        let id = self.locate(key)?;
        self.inner().node(id)
    }

    /// Overwrites the value of a node with this key, and returns the node.
    /// The structure of the tree doesn't change.
    fn update(&mut self, key: &K, val: V) -> Option<&Node<K, V, Self::AlgData>> {
        let id = self.locate(key)?;
        self.inner_mut().node_mut(id).set_val(val);
        self.inner().node(id)
    }

    /// The value stored with this key.
    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: 'a,
        Self::AlgData: 'a,
    {
        self.search(key)?.val()
    }

    fn contains(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn is_empty(&self) -> bool {
        self.inner().is_empty()
    }

    fn root(&self) -> Option<NodeId> {
        self.inner().root()
    }

    fn node(&self, id: NodeId) -> Option<&Node<K, V, Self::AlgData>> {
        self.inner().node(id)
    }

    /// Iterates over the nodes in key order.
    fn iter(&self) -> Iter<'_, K, V, Self::AlgData> {
        self.inner().iter()
    }

    /// Iterates over the keys in order.
    fn keys(&self) -> Keys<'_, K, V, Self::AlgData> {
        self.inner().keys()
    }
}
