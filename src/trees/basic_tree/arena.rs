//! Slot storage for the nodes of a tree.
//!
//! Nodes refer to each other by [`NodeId`]s, which are indices into the arena.
//! Removing a node vacates its slot, and the slot is reused by the next insertion.

use std::ops::{Index, IndexMut};

const VACANT_SLOT_ERROR: &str = "invariant violated: a link points to a vacant slot";

/// The index of a node inside the arena of the tree that owns it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<usize>,
    len: usize,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Arena {
            slots: vec![],
            free: vec![],
            len: 0,
        }
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, node: N) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.slots.get_mut(id.0)?.as_mut()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        self.get(id).expect(VACANT_SLOT_ERROR)
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.get_mut(id).expect(VACANT_SLOT_ERROR)
    }
}

#[test]
fn arena_reuses_slots() {
    let mut arena = Arena::new();
    let a = arena.insert('a');
    let b = arena.insert('b');
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.remove(a), Some('a'));
    assert_eq!(arena.remove(a), None);
    assert_eq!(arena.get(a), None);
    let c = arena.insert('c');
    assert_eq!(c, a);
    assert_eq!(arena[b], 'b');
    assert_eq!(arena[c], 'c');
    assert_eq!(arena.len(), 2);
}
