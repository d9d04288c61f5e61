//! This module contains the capabilities that are injected into the trees
//! when they are constructed: how keys are ordered, how priorities are ordered,
//! and how values are aggregated by the segment tree.
//!
//! Ready-made implementations live in [`example_data`].

pub mod example_data;

/// Orders the keys of a search tree.
///
/// Implementations must describe a strict total order: for every `a` and `b`,
/// exactly one of `key_eq(a, b)`, `key_gt(a, b)` and `key_gt(b, a)` holds.
/// The trees don't check this. An inconsistent order won't make them crash,
/// but the in-order sequence of keys becomes meaningless.
pub trait KeyOrder<K> {
    fn key_eq(&self, a: &K, b: &K) -> bool;
    fn key_gt(&self, a: &K, b: &K) -> bool;
}

/// Orders the priorities of a treap.
/// Smaller priorities go higher up the tree.
pub trait PriorityOrder<P> {
    fn priority_lt(&self, a: &P, b: &P) -> bool;
}

/// The aggregation function of a segment tree.
///
/// `combine` should be associative and pure: the tree calls it while building,
/// updating and querying, in an order that depends on its internal layout.
pub trait Aggregate<T> {
    fn combine(&self, left: &T, right: &T) -> T;
}

impl<T, F> Aggregate<T> for F
where
    F: Fn(&T, &T) -> T,
{
    fn combine(&self, left: &T, right: &T) -> T {
        self(left, right)
    }
}
