//! An array segment tree: an implicit complete binary tree stored in one
//! allocation, over a user supplied [`Aggregate`].
//!
//! For a tree of degree `d` (the smallest power of two that fits the
//! elements), there are `2d - 1` slots. Slot `0` is the root, the children of
//! slot `p` are `2p + 1` and `2p + 2`, and element `i` lives in slot `d - 1 + i`.
//! A slot is empty when its whole span lies past the last element.
//! ```text
//!            0
//!        1       2
//!      3   4   5   6      <- elements 0..4 when d = 4
//! ```
//! An internal slot whose right child is empty copies its left child, so the
//! aggregation is never called with a missing operand.

use crate::data::Aggregate;
use crate::error::{Result, TreeError};

const NOT_BUILT_ERROR: &str = "the segment tree isn't built";
const EMPTY_LEAF_ERROR: &str = "invariant violated: empty slot for a live element";

/// See the module documentation.
#[derive(Clone, Debug)]
pub struct SegmentTree<T, A> {
    slots: Vec<Option<T>>,
    /// `0` while the tree isn't built.
    degree: usize,
    len: usize,
    aggregate: A,
}

impl<T: Clone, A: Aggregate<T>> SegmentTree<T, A> {
    /// Creates an unbuilt segment tree. Every operation other than [`Self::build`]
    /// and [`Self::append`] fails until it is built.
    pub fn new(aggregate: A) -> Self {
        SegmentTree {
            slots: vec![],
            degree: 0,
            len: 0,
            aggregate,
        }
    }

    /// Creates a segment tree and builds it.
    ///```
    /// use ordtree::segment_tree::SegmentTree;
    ///
    /// let mut tree = SegmentTree::build_from(vec![1, 2, 3, 4], |a: &i32, b: &i32| a + b).unwrap();
    /// assert_eq!(tree.query(0, 3), Ok(10));
    /// tree.update(1, 5).unwrap();
    /// assert_eq!(tree.query(0, 3), Ok(13));
    /// assert_eq!(tree.query(1, 2), Ok(8));
    ///```
    pub fn build_from<I: IntoIterator<Item = T>>(elements: I, aggregate: A) -> Result<Self> {
        let mut tree = SegmentTree::new(aggregate);
        tree.build(elements)?;
        Ok(tree)
    }

    /// Replaces the contents of the tree with `elements`.
    /// Fails if there are no elements, leaving the tree as it was.
    ///
    /// O(n)
    pub fn build<I: IntoIterator<Item = T>>(&mut self, elements: I) -> Result<()> {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(TreeError::InvalidArgument(
                "a segment tree needs at least one element",
            ));
        }
        let degree = elements.len().next_power_of_two();
        let mut slots: Vec<Option<T>> = Vec::with_capacity(2 * degree - 1);
        slots.resize_with(degree - 1, || None);
        self.len = elements.len();
        slots.extend(elements.into_iter().map(Some));
        slots.resize_with(2 * degree - 1, || None);
        self.slots = slots;
        self.degree = degree;

        for pos in (0..degree - 1).rev() {
            self.recompute(pos);
        }
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.degree > 0
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of leaf slots. A power of two, or `0` while unbuilt.
    pub fn degree(&self) -> usize {
        self.degree
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if !self.is_built() {
            return Err(TreeError::PreconditionViolated(NOT_BUILT_ERROR));
        }
        if index >= self.len {
            return Err(TreeError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn leaf(&self, index: usize) -> usize {
        self.degree - 1 + index
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(self.slots[self.leaf(index)].as_ref().expect(EMPTY_LEAF_ERROR))
    }

    /// Sets the element at `index` and recomputes its ancestors.
    ///
    /// O(log n)
    pub fn update(&mut self, index: usize, val: T) -> Result<()> {
        self.check_index(index)?;
        self.set_leaf(index, val);
        Ok(())
    }

    fn set_leaf(&mut self, index: usize, val: T) {
        let mut pos = self.leaf(index);
        self.slots[pos] = Some(val);
        while pos > 0 {
            pos = (pos - 1) / 2;
            self.recompute(pos);
        }
    }

    fn recompute(&mut self, pos: usize) {
        let left = self.slots[2 * pos + 1].as_ref();
        let right = self.slots[2 * pos + 2].as_ref();
        self.slots[pos] = match (left, right) {
            (Some(left), Some(right)) => Some(self.aggregate.combine(left, right)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        };
    }

    /// Aggregates the elements in `low..=high`, associating from left to right.
    /// `high` past the last element is cut down to the last element.
    ///
    /// O(log n)
    pub fn query(&self, low: usize, high: usize) -> Result<T> {
        self.check_index(low)?;
        if low > high {
            return Err(TreeError::InvalidArgument(
                "the low end of a query is above its high end",
            ));
        }
        let high = high.min(self.len - 1);
        Ok(self
            .query_at(0, 0, self.degree, low, high)
            .expect(EMPTY_LEAF_ERROR))
    }

    /// The aggregate of `low..=high` inside the span of `pos`, which starts at
    /// `start` and is `width` elements wide. The span must intersect the range.
    fn query_at(&self, pos: usize, start: usize, width: usize, low: usize, high: usize) -> Option<T> {
        let end = start + width - 1;
        if low <= start && end <= high {
            return self.slots[pos].clone();
        }
        let half = width / 2;
        let mid = start + half - 1;
        let left = if low <= mid {
            self.query_at(2 * pos + 1, start, half, low, high)
        } else {
            None
        };
        let right = if high > mid {
            self.query_at(2 * pos + 2, mid + 1, half, low, high)
        } else {
            None
        };
        match (left, right) {
            (Some(left), Some(right)) => Some(self.aggregate.combine(&left, &right)),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }

    /// Adds an element after the last one.
    /// When the tree is full its degree doubles, so a sequence of appends takes
    /// amortized O(log n) per append. Builds the tree if it isn't built.
    pub fn append(&mut self, val: T) {
        if !self.is_built() {
            self.slots = vec![Some(val)];
            self.degree = 1;
            self.len = 1;
            return;
        }
        if self.len == self.degree {
            self.grow();
        }
        self.len += 1;
        self.set_leaf(self.len - 1, val);
    }

    /// Doubles the degree. The old tree becomes the left subtree of the new root,
    /// level by level, so every computed aggregate stays valid.
    fn grow(&mut self) {
        let degree = self.degree * 2;
        let mut slots: Vec<Option<T>> = Vec::with_capacity(2 * degree - 1);
        slots.resize_with(2 * degree - 1, || None);

        // `width` is the number of slots on the current level, which starts at `start`
        let (mut start, mut width) = (0, 1);
        for (pos, slot) in std::mem::take(&mut self.slots).into_iter().enumerate() {
            if pos == start + width {
                start = pos;
                width *= 2;
            }
            slots[pos + width] = slot;
        }
        slots[0] = slots[1].clone();

        self.slots = slots;
        self.degree = degree;
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let start = self.degree.saturating_sub(1);
        self.slots[start..start + self.len]
            .iter()
            .map(|slot| slot.as_ref().expect(EMPTY_LEAF_ERROR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::example_data::{Max, Min, Sum};

    fn concat(a: &String, b: &String) -> String {
        format!("{a}{b}")
    }

    #[test]
    fn sum_example() {
        let mut tree = SegmentTree::build_from(vec![1, 2, 3, 4], Sum).unwrap();
        assert_eq!(tree.degree(), 4);
        assert_eq!(tree.query(0, 3), Ok(10));
        tree.update(1, 5).unwrap();
        assert_eq!(tree.query(0, 3), Ok(13));
        assert_eq!(tree.query(1, 2), Ok(8));
        assert_eq!(tree.query(1, 1), Ok(5));
        assert_eq!(tree.get(1), Ok(&5));
    }

    #[test]
    fn errors() {
        let mut tree: SegmentTree<i32, Sum> = SegmentTree::new(Sum);
        assert!(!tree.is_built());
        assert!(matches!(tree.get(0), Err(TreeError::PreconditionViolated(_))));
        assert!(matches!(tree.update(0, 1), Err(TreeError::PreconditionViolated(_))));
        assert!(matches!(tree.query(0, 0), Err(TreeError::PreconditionViolated(_))));
        assert!(matches!(tree.build(vec![]), Err(TreeError::InvalidArgument(_))));
        assert!(!tree.is_built());

        tree.build(vec![7, 8, 9]).unwrap();
        assert_eq!(tree.get(3), Err(TreeError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(tree.update(5, 1), Err(TreeError::OutOfRange { index: 5, len: 3 }));
        assert_eq!(tree.query(3, 4), Err(TreeError::OutOfRange { index: 3, len: 3 }));
        assert!(matches!(tree.query(2, 1), Err(TreeError::InvalidArgument(_))));
        // failed calls change nothing
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![7, 8, 9]);
        // the high end is cut down to the last element
        assert_eq!(tree.query(1, 100), Ok(17));
    }

    #[test]
    fn odd_sizes_copy_lonely_children() {
        for n in 1..=9 {
            let elements: Vec<i64> = (1..=n).collect();
            let tree = SegmentTree::build_from(elements.clone(), Sum).unwrap();
            assert_eq!(tree.degree(), (n as usize).next_power_of_two());
            for low in 0..elements.len() {
                for high in low..elements.len() {
                    let expected: i64 = elements[low..=high].iter().sum();
                    assert_eq!(tree.query(low, high), Ok(expected));
                }
            }
        }
    }

    #[test]
    fn left_to_right_association() {
        let words = ["a", "b", "c", "d", "e"].map(String::from);
        let mut tree = SegmentTree::build_from(words, concat).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), "abcde");
        assert_eq!(tree.query(1, 3).unwrap(), "bcd");
        tree.update(2, "X".to_string()).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), "abXde");
        assert_eq!(tree.query(2, 2).unwrap(), "X");
    }

    #[test]
    fn append_grows() {
        let mut tree = SegmentTree::new(concat);
        let mut model = String::new();
        for c in "appending letters".chars() {
            tree.append(c.to_string());
            model.push(c);
            assert!(tree.degree() >= tree.len());
            assert_eq!(tree.query(0, tree.len() - 1).unwrap(), model);
        }
        assert_eq!(tree.len(), 17);
        assert_eq!(tree.degree(), 32);
        assert_eq!(tree.query(3, 8).unwrap(), "ending");
        assert_eq!(tree.get(16).unwrap(), "s");
    }

    #[test]
    fn append_after_build() {
        let mut tree = SegmentTree::build_from(vec![5, 1, 4, 2], Min).unwrap();
        tree.append(0);
        assert_eq!(tree.degree(), 8);
        assert_eq!(tree.query(0, 3), Ok(1));
        assert_eq!(tree.query(0, 4), Ok(0));
        tree.update(4, 9).unwrap();
        assert_eq!(tree.query(2, 4), Ok(2));

        let mut tree = SegmentTree::build_from(vec![5, 1, 4], Max).unwrap();
        tree.append(3);
        assert_eq!(tree.degree(), 4);
        assert_eq!(tree.query(1, 3), Ok(4));
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![5, 1, 4, 3]);
    }
}
