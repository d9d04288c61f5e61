//! Ready-made orders and aggregation functions.

use super::*;

/// The order given by the type's [`Ord`] instance.
/// This is the default order of every tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> KeyOrder<K> for NaturalOrder {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }

    fn key_gt(&self, a: &K, b: &K) -> bool {
        a > b
    }
}

impl<P: Ord> PriorityOrder<P> for NaturalOrder {
    fn priority_lt(&self, a: &P, b: &P) -> bool {
        a < b
    }
}

/// The reverse of the type's [`Ord`] instance.
///
/// As a priority order, it makes the treap a max-heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ReverseOrder;

impl<K: Ord> KeyOrder<K> for ReverseOrder {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }

    fn key_gt(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<P: Ord> PriorityOrder<P> for ReverseOrder {
    fn priority_lt(&self, a: &P, b: &P) -> bool {
        a > b
    }
}

/// A key order given by two predicates, the equality and the greater-than.
///```
/// use ordtree::data::example_data::KeyFns;
/// use ordtree::red_black::RedBlackTree;
/// use ordtree::SomeTree;
///
/// // order strings by length only
/// let order = KeyFns::new(
///     |a: &String, b: &String| a.len() == b.len(),
///     |a: &String, b: &String| a.len() > b.len(),
/// );
/// let mut tree: RedBlackTree<String, (), _> = RedBlackTree::with_order(order);
/// tree.insert("ccc".to_string(), ());
/// tree.insert("a".to_string(), ());
/// assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec!["a", "ccc"]);
///```
#[derive(Clone, Copy, Debug)]
pub struct KeyFns<E, G> {
    eq: E,
    gt: G,
}

impl<E, G> KeyFns<E, G> {
    pub fn new(eq: E, gt: G) -> Self {
        KeyFns { eq, gt }
    }
}

impl<K, E, G> KeyOrder<K> for KeyFns<E, G>
where
    E: Fn(&K, &K) -> bool,
    G: Fn(&K, &K) -> bool,
{
    fn key_eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }

    fn key_gt(&self, a: &K, b: &K) -> bool {
        (self.gt)(a, b)
    }
}

/// A priority order given by a less-than predicate.
#[derive(Clone, Copy, Debug)]
pub struct PriorityFn<F> {
    lt: F,
}

impl<F> PriorityFn<F> {
    pub fn new(lt: F) -> Self {
        PriorityFn { lt }
    }
}

impl<P, F> PriorityOrder<P> for PriorityFn<F>
where
    F: Fn(&P, &P) -> bool,
{
    fn priority_lt(&self, a: &P, b: &P) -> bool {
        (self.lt)(a, b)
    }
}

/// Sums the values of a segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Sum;

impl<T> Aggregate<T> for Sum
where
    T: Clone + std::ops::Add<Output = T>,
{
    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

/// The minimum value of a segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Min;

impl<T: Ord + Clone> Aggregate<T> for Min {
    fn combine(&self, left: &T, right: &T) -> T {
        std::cmp::min(left, right).clone()
    }
}

/// The maximum value of a segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Max;

impl<T: Ord + Clone> Aggregate<T> for Max {
    fn combine(&self, left: &T, right: &T) -> T {
        std::cmp::max(left, right).clone()
    }
}

#[test]
fn orders() {
    assert!(KeyOrder::key_gt(&NaturalOrder, &3, &2));
    assert!(!KeyOrder::key_gt(&NaturalOrder, &2, &2));
    assert!(KeyOrder::key_gt(&ReverseOrder, &2, &3));
    assert!(PriorityOrder::priority_lt(&NaturalOrder, &1, &2));
    assert!(PriorityOrder::priority_lt(&ReverseOrder, &2, &1));

    let by_abs = KeyFns::new(|a: &i32, b: &i32| a.abs() == b.abs(), |a: &i32, b: &i32| a.abs() > b.abs());
    assert!(by_abs.key_eq(&-4, &4));
    assert!(by_abs.key_gt(&-5, &4));
}

#[test]
fn aggregates() {
    assert_eq!(Sum.combine(&3, &4), 7);
    assert_eq!(Min.combine(&3, &4), 3);
    assert_eq!(Max.combine(&3, &4), 4);
    let concat = |a: &String, b: &String| format!("{a}{b}");
    assert_eq!(concat.combine(&"ab".to_string(), &"c".to_string()), "abc");
}
