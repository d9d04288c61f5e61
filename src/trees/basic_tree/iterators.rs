//! In-order iterators over a [`BasicTree`].
//! They follow the parent links, so they don't allocate.

use super::*;

/// Iterates over the nodes of a tree in in-order.
pub struct Iter<'a, K, V, T> {
    tree: &'a BasicTree<K, V, T>,
    next: Option<NodeId>,
}

impl<'a, K, V, T> Iter<'a, K, V, T> {
    pub fn new(tree: &'a BasicTree<K, V, T>) -> Self {
        Iter {
            tree,
            next: tree.first(),
        }
    }
}

impl<'a, K, V, T> Iterator for Iter<'a, K, V, T> {
    type Item = &'a Node<K, V, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.next(id);
        Some(self.tree.get(id))
    }
}

/// Iterates over the keys of a tree in in-order.
pub struct Keys<'a, K, V, T> {
    inner: Iter<'a, K, V, T>,
}

impl<'a, K, V, T> Keys<'a, K, V, T> {
    pub fn new(tree: &'a BasicTree<K, V, T>) -> Self {
        Keys { inner: tree.iter() }
    }
}

impl<'a, K, V, T> Iterator for Keys<'a, K, V, T> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.key())
    }
}
