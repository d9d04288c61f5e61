//! Implementation of treaps.
//!
//! A treap is a search tree by key and a min-heap by priority at the same time:
//! no child's priority is less than its parent's. The priorities are given by
//! the user, so the shape of the tree is fully determined by the keys and the
//! priorities. With random priorities ([`Treap::insert_random`]) the expected
//! depth is `O(log n)`.
//!
//! All the restructuring is done by rolling nodes up and down with rotations,
//! which is also how the treap supports [`Treap::split`] and [`Treap::join`].

use rand::distributions::{Distribution, Standard};

use super::basic_tree::*;
use super::*;
use crate::data::example_data::NaturalOrder;
use crate::data::PriorityOrder;
use crate::error::{Result, TreeError};

/// The priority of a treap node, extended with the sentinels used while
/// restructuring. Ordered as `Top < Real(_) < Bottom < Absent`, where real
/// priorities are ordered by the treap's [`PriorityOrder`].
///
/// Only [`Priority::Real`] is ever left in a finished tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Priority<P> {
    /// Rolls a node all the way up to the root.
    Top,
    Real(P),
    /// Rolls a node all the way down to a leaf.
    Bottom,
    /// The priority of a missing child. Nothing rotates through it.
    Absent,
}

impl<P> Priority<P> {
    fn rank(&self) -> u8 {
        match self {
            Priority::Top => 0,
            Priority::Real(_) => 1,
            Priority::Bottom => 2,
            Priority::Absent => 3,
        }
    }

    pub fn less<O: PriorityOrder<P>>(&self, other: &Self, order: &O) -> bool {
        match (self, other) {
            (Priority::Real(a), Priority::Real(b)) => order.priority_lt(a, b),
            _ => self.rank() < other.rank(),
        }
    }

    pub fn real(&self) -> Option<&P> {
        match self {
            Priority::Real(p) => Some(p),
            _ => None,
        }
    }

    fn real_owned(self) -> Option<P> {
        match self {
            Priority::Real(p) => Some(p),
            _ => None,
        }
    }
}

impl<K, V, P> Node<K, V, Priority<P>> {
    /// The priority of the node.
    pub fn priority(&self) -> Option<&P> {
        self.alg_data.real()
    }
}

/// A treap.
///
/// Keys are ordered by `O`, priorities by `PO`. Both are fixed when the treap
/// is created.
pub struct Treap<K, V, P, O = NaturalOrder, PO = NaturalOrder> {
    tree: BasicTree<K, V, Priority<P>>,
    order: O,
    priority_order: PO,
}

/// The result of [`Treap::split`].
pub struct SplitResult<K, V, P, O, PO> {
    /// The keys before the pivot.
    pub left: Treap<K, V, P, O, PO>,
    /// The keys after the pivot.
    pub right: Treap<K, V, P, O, PO>,
    pub pivot: Pivot<K, V, P>,
}

/// The node that [`Treap::split`] split around. It doesn't belong to either side.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Pivot<K, V, P> {
    pub key: K,
    pub val: Option<V>,
    /// The priority the node had in the tree,
    /// or [`None`] if the pivot was created just for the split.
    pub priority: Option<P>,
}

impl<K: Ord, V, P: Ord> Treap<K, V, P> {
    /// Creates an empty [`Treap`], with keys and priorities ordered by their [`Ord`] instances.
    pub fn new() -> Self {
        Self::with_orders(NaturalOrder, NaturalOrder)
    }
}

impl<K: Ord, V, P: Ord> Default for Treap<K, V, P> {
    fn default() -> Self {
        Treap::new()
    }
}

impl<K, V, P, O, PO> Treap<K, V, P, O, PO>
where
    O: KeyOrder<K>,
    PO: PriorityOrder<P>,
{
    pub fn with_orders(order: O, priority_order: PO) -> Self {
        Treap {
            tree: BasicTree::new(),
            order,
            priority_order,
        }
    }

    /// Inserts a new node with the given priority. Returns its id.
    ///```
    /// use ordtree::treap::Treap;
    /// use ordtree::SomeTree;
    ///
    /// let mut tree = Treap::new();
    /// tree.insert(2, 10, "b");
    /// tree.insert(1, 5, "a");
    /// let root = tree.root().unwrap();
    /// assert_eq!(tree.node(root).unwrap().priority(), Some(&5));
    /// # tree.assert_correctness();
    ///```
    pub fn insert(&mut self, key: K, priority: P, val: V) -> NodeId {
        self.insert_node(key, Priority::Real(priority), Some(val))
    }

    /// Inserts a new node with a random priority.
    pub fn insert_random(&mut self, key: K, val: V) -> NodeId
    where
        Standard: Distribution<P>,
    {
        self.insert(key, rand::random(), val)
    }

    /// Inserts a record created with [`Record::default`].
    /// Fails if the record has no key or no priority, without changing the tree.
    pub fn insert_record(&mut self, record: Record<K, V, P>) -> Result<NodeId> {
        let (key, priority) = match (record.key, record.priority) {
            (Some(key), Some(priority)) => (key, priority),
            _ => {
                return Err(TreeError::InvalidArgument(
                    "a treap record must have a key and a priority",
                ))
            }
        };
        Ok(self.insert_node(key, Priority::Real(priority), record.val))
    }

    fn insert_node(&mut self, key: K, priority: Priority<P>, val: Option<V>) -> NodeId {
        let id = self.tree.alloc(Node::new_alg(key, val, priority));
        self.tree.attach(id, &self.order);
        self.roll_up(id);
        id
    }

    fn less(&self, a: &Priority<P>, b: &Priority<P>) -> bool {
        a.less(b, &self.priority_order)
    }

    fn child_priority(&self, id: NodeId, side: Side) -> &Priority<P> {
        match self.tree.get(id).child(side) {
            Some(child) => &self.tree.get(child).alg_data,
            None => &Priority::Absent,
        }
    }

    /// Rotates the node up while its priority is less than its parent's.
    fn roll_up(&mut self, id: NodeId) {
        while let Some(parent) = self.tree.get(id).parent() {
            if !self.less(&self.tree.get(id).alg_data, &self.tree.get(parent).alg_data) {
                return;
            }
            let side = self.tree.side_of(id).expect("a node with a parent has a side");
            self.tree.rotate(parent, !side);
        }
    }

    /// Rotates the node down while one of its children has a smaller priority.
    /// The child with the smaller priority goes up; on a tie, the right one.
    fn roll_down(&mut self, id: NodeId) {
        loop {
            let own = &self.tree.get(id).alg_data;
            let left = self.child_priority(id, Side::Left);
            let right = self.child_priority(id, Side::Right);
            if !self.less(left, own) && !self.less(right, own) {
                return;
            }
            if self.less(left, right) {
                self.tree.rotate(id, Side::Right);
            } else {
                self.tree.rotate(id, Side::Left);
            }
        }
    }

    /// Rolls the node down to a leaf position and unlinks it.
    fn sink_and_detach(&mut self, id: NodeId) -> Node<K, V, Priority<P>> {
        self.tree.node_mut(id).alg_data = Priority::Bottom;
        self.roll_down(id);
        self.tree.detach_leaf(id)
    }

    /// Changes the priority of a node with this key, and returns the node.
    /// Returns [`None`] if there is no such node.
    pub fn update_priority(&mut self, key: &K, priority: P) -> Option<&Node<K, V, Priority<P>>> {
        let id = self.locate(key)?;
        let new = Priority::Real(priority);
        let increased = self.less(&self.tree.get(id).alg_data, &new);
        self.tree.node_mut(id).alg_data = new;
        if increased {
            self.roll_down(id);
        } else {
            self.roll_up(id);
        }
        self.tree.node(id)
    }

    /// Splits the treap around `key`.
    ///
    /// If `keep_pivot` is `false` and there is a node with this key, the node
    /// found by [`SomeTree::locate`] becomes the pivot. When keys are unique,
    /// every key in `left` is then less than `key`; other nodes with an equal
    /// key stay in the tree, on either side of the pivot in in-order, and end
    /// up in `left`. Otherwise a new pivot is made for the split, all the nodes
    /// stay, and the nodes with keys equal to `key` end up in `left`.
    /// Either way every key in `right` is greater than `key`.
    ///```
    /// use ordtree::treap::Treap;
    /// use ordtree::SomeTree;
    ///
    /// let mut tree = Treap::new();
    /// for (key, priority) in [(1, 4), (2, 3), (3, 2), (4, 1)] {
    ///     tree.insert(key, priority, ());
    /// }
    /// let res = tree.split(3, false);
    /// assert_eq!(res.left.keys().cloned().collect::<Vec<_>>(), vec![1, 2]);
    /// assert_eq!(res.pivot.key, 3);
    /// assert_eq!(res.pivot.priority, Some(2));
    /// assert_eq!(res.right.keys().cloned().collect::<Vec<_>>(), vec![4]);
    ///```
    pub fn split(mut self, key: K, keep_pivot: bool) -> SplitResult<K, V, P, O, PO>
    where
        O: Clone,
        PO: Clone,
    {
        let existing = if keep_pivot { None } else { self.locate(&key) };
        let (pivot, priority) = match existing {
            Some(id) => {
                let old = std::mem::replace(&mut self.tree.node_mut(id).alg_data, Priority::Top);
                self.roll_up(id);
                (id, old.real_owned())
            }
            None => (self.insert_node(key, Priority::Top, None), None),
        };

        let left = self.tree.get(pivot).left();
        let right = self.tree.get(pivot).right();
        for child in [left, right].into_iter().flatten() {
            self.tree.node_mut(child).parent = None;
        }
        let (key, val) = self.tree.free(pivot).into_entry();
        self.tree.set_root(left);
        let right_tree = self.tree.extract_subtree(right);

        let right = Treap {
            tree: right_tree,
            order: self.order.clone(),
            priority_order: self.priority_order.clone(),
        };
        SplitResult {
            left: self,
            right,
            pivot: Pivot { key, val, priority },
        }
    }

    /// Joins two treaps, where every key in `left` is less than every key in
    /// `right`. This isn't checked: if the ranges overlap, the result is still
    /// a valid heap, but its keys are out of order.
    ///
    /// The result keeps `left`'s orders. The nodes of the smaller side are
    /// moved into the arena of the larger one, so the ids of the larger side
    /// stay valid.
    ///```
    /// use ordtree::treap::Treap;
    /// use ordtree::SomeTree;
    ///
    /// let mut left = Treap::new();
    /// left.insert(1, 1, ());
    /// left.insert(2, 2, ());
    /// let mut right = Treap::new();
    /// right.insert(3, 3, ());
    /// right.insert(4, 0, ());
    /// let joined = Treap::join(left, right);
    /// assert_eq!(joined.keys().cloned().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    /// # joined.assert_correctness();
    ///```
    pub fn join(mut left: Self, right: Self) -> Self
    where
        K: Clone,
    {
        let left_root = match left.tree.root() {
            None => {
                return Treap {
                    tree: right.tree,
                    order: left.order,
                    priority_order: left.priority_order,
                }
            }
            Some(root) => root,
        };
        if right.is_empty() {
            return left;
        }

        // the pivot never takes part in a key comparison
        let key = left.tree.get(left_root).key().clone();

        // the smaller arena moves into the larger one
        let (tree, left_root, right_root) = if left.tree.len() >= right.tree.len() {
            let right_root = left.tree.absorb(right.tree);
            (left.tree, Some(left_root), right_root)
        } else {
            let mut tree = right.tree;
            let right_root = tree.root();
            let left_root = tree.absorb(left.tree);
            (tree, left_root, right_root)
        };
        let mut joined = Treap {
            tree,
            order: left.order,
            priority_order: left.priority_order,
        };

        let pivot = joined.tree.alloc(Node::new_alg(key, None, Priority::Bottom));
        joined.tree.set_child(pivot, Side::Left, left_root);
        joined.tree.set_child(pivot, Side::Right, right_root);
        joined.tree.set_root(Some(pivot));

        joined.roll_down(pivot);
        joined.tree.detach_leaf(pivot);
        joined
    }

    /// Not implemented.
    pub fn union(_left: Self, _right: Self) -> Result<Self> {
        Err(TreeError::Unsupported("union"))
    }

    /// Not implemented.
    pub fn intersect(_left: Self, _right: Self) -> Result<Self> {
        Err(TreeError::Unsupported("intersect"))
    }

    /// Not implemented.
    pub fn difference(_left: Self, _right: Self) -> Result<Self> {
        Err(TreeError::Unsupported("difference"))
    }

    /// Asserts that no child has a smaller priority than its parent,
    /// and that no sentinel priority is left in the tree.
    pub fn assert_priorities(&self) {
        for node in self.tree.iter() {
            assert!(
                matches!(node.alg_data, Priority::Real(_)),
                "a sentinel priority was left in the tree"
            );
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert!(
                    !self.less(&self.tree.get(child).alg_data, &node.alg_data),
                    "a child has a smaller priority than its parent"
                );
            }
        }
    }
}

impl<K, V, P, O, PO> SomeTree<K, V> for Treap<K, V, P, O, PO>
where
    O: KeyOrder<K>,
    PO: PriorityOrder<P>,
{
    type AlgData = Priority<P>;
    type Order = O;

    fn inner(&self) -> &BasicTree<K, V, Priority<P>> {
        &self.tree
    }

    fn inner_mut(&mut self) -> &mut BasicTree<K, V, Priority<P>> {
        &mut self.tree
    }

    fn key_order(&self) -> &O {
        &self.order
    }

    /// Rolls the node down to a leaf, and removes it.
    fn delete(&mut self, key: &K) -> Option<(K, Option<V>)> {
        let id = self.locate(key)?;
        Some(self.sink_and_detach(id).into_entry())
    }

    fn assert_correctness(&self) {
        self.tree.assert_links();
        self.tree.assert_order(&self.order);
        self.assert_priorities();
    }
}

impl<K: Ord, V, P: Ord> FromIterator<(K, P, V)> for Treap<K, V, P> {
    fn from_iter<T: IntoIterator<Item = (K, P, V)>>(iter: T) -> Self {
        let mut tree = Treap::new();
        for (key, priority, val) in iter {
            tree.insert(key, priority, val);
        }
        tree
    }
}
