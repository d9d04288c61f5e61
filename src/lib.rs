//! Ordered, mutable trees with injected orders.
//!
//! The keyed trees ([`red_black::RedBlackTree`], [`treap::Treap`] and
//! [`unbalanced::UnbalancedTree`]) share one contract, [`SomeTree`], and one
//! arena-backed core, [`basic_tree::BasicTree`], where all the rotations
//! happen. The [`segment_tree::SegmentTree`] is separate: it isn't keyed, and
//! answers range aggregation queries over a sequence.
//!
//! Orders and aggregation functions are given to each tree when it's created.
//! See [`data`] for the traits and some ready-made implementations.

pub mod data;
pub mod error;
pub mod trees;

pub use data::{Aggregate, KeyOrder, PriorityOrder};
pub use error::{Result, TreeError};
pub use trees::*;
