#![allow(dead_code)]

use ordtree::red_black::RedBlackTree;
use ordtree::treap::Treap;
use ordtree::unbalanced::UnbalancedTree;
use ordtree::SomeTree;
use proptest::prelude::*;
use rand::{self, Rng};

/// Keyed trees that can take a key and a value without anything else.
/// Treaps draw a random priority.
pub trait InsertKey: SomeTree<i32, i32> + Default {
    fn insert_key(&mut self, key: i32, val: i32);
}

impl InsertKey for RedBlackTree<i32, i32> {
    fn insert_key(&mut self, key: i32, val: i32) {
        self.insert(key, val);
    }
}

impl InsertKey for Treap<i32, i32, u32> {
    fn insert_key(&mut self, key: i32, val: i32) {
        self.insert_random(key, val);
    }
}

impl InsertKey for UnbalancedTree<i32, i32> {
    fn insert_key(&mut self, key: i32, val: i32) {
        self.insert(key, val);
    }
}

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32 },
    Delete { key: i32 },
    Search { key: i32 },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Empty,
    Deleted(Option<(i32, Option<i32>)>),
    Found(Option<i32>),
}

/// Every value in the tests is a function of its key,
/// so that results don't depend on which of several equal keys is found.
pub fn val_of(key: i32) -> i32 {
    key * 3
}

pub const MAX_KEY: i32 = 100;

fn random_round_action(rng: &mut rand::prelude::ThreadRng) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(-MAX_KEY..=MAX_KEY);
    match rng.gen_range(0..3) {
        0 => Insert { key },
        1 => Delete { key },
        _ => Search { key },
    }
}

pub fn round_action_strategy() -> impl Strategy<Value = RoundAction> {
    let key = -MAX_KEY..=MAX_KEY;
    prop_oneof![
        key.clone().prop_map(|key| RoundAction::Insert { key }),
        key.clone().prop_map(|key| RoundAction::Delete { key }),
        key.prop_map(|key| RoundAction::Search { key }),
    ]
}

/// Runs one round on the tree and on the model, a sorted vector of keys.
fn run_round<T: InsertKey>(round_action: &RoundAction, tree: &mut T, model: &mut Vec<i32>) -> (RoundResult, RoundResult) {
    use RoundAction::*;
    use RoundResult::*;

    match *round_action {
        Insert { key } => {
            tree.insert_key(key, val_of(key));
            let index = model.partition_point(|k| *k <= key);
            model.insert(index, key);
            (Empty, Empty)
        }
        Delete { key } => {
            let res = tree.delete(&key);
            let expected = match model.binary_search(&key) {
                Ok(index) => {
                    model.remove(index);
                    Some((key, Some(val_of(key))))
                }
                Err(_) => None,
            };
            (Deleted(res), Deleted(expected))
        }
        Search { key } => {
            let found = tree.get(&key).cloned();
            let expected = model.binary_search(&key).ok().map(|_| val_of(key));
            (Found(found), Found(expected))
        }
    }
}

pub fn tree_from_keys<T: InsertKey>(keys: &[i32]) -> T {
    let mut tree = T::default();
    for &key in keys {
        tree.insert_key(key, val_of(key));
    }
    tree
}

pub fn check_consistency<T: InsertKey>(num_rounds: u32) {
    let mut rng = rand::thread_rng();
    let initial: Vec<i32> = (0..200).map(|_| rng.gen_range(-MAX_KEY..=MAX_KEY)).collect();
    let mut tree: T = tree_from_keys(&initial);
    let mut model = initial;
    model.sort();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng);
        let (res, expected) = run_round(&round_action, &mut tree, &mut model);
        assert_eq!(res, expected, "{round_action:?}");
        assert_eq!(tree.len(), model.len());
    }
    tree.assert_correctness();
    assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), model);
}

pub fn check_consistency_proptest<T: InsertKey>(
    initial: &[i32],
    actions: &[RoundAction],
) -> Result<(), TestCaseError> {
    let mut tree: T = tree_from_keys(initial);
    let mut model = initial.to_vec();
    model.sort();

    for round_action in actions {
        let (res, expected) = run_round(round_action, &mut tree, &mut model);
        prop_assert_eq!(res, expected);
        tree.assert_correctness();
    }
    prop_assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), model);
    Ok(())
}

/// Checks what a split of a tree with these keys should give.
/// Duplicate keys are dropped first.
pub fn check_split(keys: &[i32], pivot: i32, keep_pivot: bool) -> Result<(), TestCaseError> {
    let mut all = keys.to_vec();
    all.sort();
    all.dedup();
    let tree: Treap<i32, i32, u32> = tree_from_keys(&all);
    let had_pivot = tree.contains(&pivot);
    tree.assert_correctness();

    let res = tree.split(pivot, keep_pivot);
    res.left.assert_correctness();
    res.right.assert_correctness();
    let left: Vec<i32> = res.left.keys().cloned().collect();
    let right: Vec<i32> = res.right.keys().cloned().collect();
    prop_assert!(right.iter().all(|key| *key > pivot));

    if keep_pivot || !had_pivot {
        prop_assert!(left.iter().all(|key| *key <= pivot));
        prop_assert_eq!(res.pivot.priority, None);
        prop_assert_eq!([left, right].concat(), all);
    } else {
        prop_assert!(left.iter().all(|key| *key < pivot));
        prop_assert!(res.pivot.priority.is_some());
        prop_assert_eq!(res.pivot.val, Some(val_of(pivot)));
        prop_assert_eq!([left, vec![pivot], right].concat(), all);
    }
    Ok(())
}

/// The aggregate of `elements` associated from the left.
pub fn naive_fold<T: Clone>(elements: &[T], combine: impl Fn(&T, &T) -> T) -> Option<T> {
    let (first, rest) = elements.split_first()?;
    Some(rest.iter().fold(first.clone(), |acc, x| combine(&acc, x)))
}
