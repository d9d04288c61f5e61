mod common;
use common::*;

use itertools::Itertools;
use ordtree::data::example_data::{Max, Sum};
use ordtree::red_black::{Color, RedBlackTree};
use ordtree::segment_tree::SegmentTree;
use ordtree::treap::Treap;
use ordtree::unbalanced::UnbalancedTree;
use ordtree::SomeTree;
use rand::Rng;

#[test]
fn red_black_consistency() {
    check_consistency::<RedBlackTree<i32, i32>>(2_000);
}

#[test]
fn treap_consistency() {
    check_consistency::<Treap<i32, i32, u32>>(2_000);
}

#[test]
fn unbalanced_consistency() {
    check_consistency::<UnbalancedTree<i32, i32>>(2_000);
}

#[test]
fn red_black_end_to_end() {
    let mut tree = RedBlackTree::new();
    for key in [4, 3, 2, 1] {
        tree.insert(key, key.to_string());
        tree.assert_correctness();
    }
    assert_eq!(tree.keys().cloned().collect_vec(), vec![1, 2, 3, 4]);
    let root = tree.node(tree.root().unwrap()).unwrap();
    assert_eq!(root.color(), Color::Black);

    assert_eq!(tree.delete(&3), Some((3, Some("3".to_string()))));
    tree.assert_correctness();
    assert_eq!(tree.keys().cloned().collect_vec(), vec![1, 2, 4]);
    assert_eq!(tree.delete(&3), None);
}

#[test]
fn red_black_stays_shallow() {
    let tree: RedBlackTree<i32, ()> = (0..1 << 12).map(|key| (key, ())).collect();
    tree.assert_correctness();
    // a subtree of black height h has at least 2^h - 1 nodes
    assert!(tree.black_height() <= 13);
    assert_eq!(tree.len(), 1 << 12);
}

#[test]
fn segment_tree_end_to_end() {
    let mut tree = SegmentTree::build_from(vec![1, 2, 3, 4], Sum).unwrap();
    assert_eq!(tree.query(0, 3), Ok(10));
    tree.update(1, 5).unwrap();
    assert_eq!(tree.query(0, 3), Ok(13));
    assert_eq!(tree.query(1, 2), Ok(8));
}

#[test]
fn segment_tree_random_rounds() {
    let mut rng = rand::thread_rng();
    let mut model: Vec<i64> = (0..37).map(|_| rng.gen_range(-1000..1000)).collect();
    let mut tree = SegmentTree::build_from(model.clone(), Max).unwrap();

    for _ in 0..2_000 {
        match rng.gen_range(0..3) {
            0 => {
                let index = rng.gen_range(0..model.len());
                let val = rng.gen_range(-1000..1000);
                tree.update(index, val).unwrap();
                model[index] = val;
            }
            1 => {
                let val = rng.gen_range(-1000..1000);
                tree.append(val);
                model.push(val);
            }
            _ => {
                let low = rng.gen_range(0..model.len());
                let high = rng.gen_range(low..model.len());
                let expected = model[low..=high].iter().max().cloned();
                assert_eq!(tree.query(low, high).ok(), expected);
            }
        }
        assert_eq!(tree.len(), model.len());
    }
    assert_eq!(tree.iter().cloned().collect_vec(), model);
}

#[test]
fn segment_tree_keeps_order_of_operands() {
    let concat = |a: &String, b: &String| format!("{a}{b}");
    let words = (0..13).map(|i| ((b'a' + i) as char).to_string()).collect_vec();
    let mut tree = SegmentTree::new(concat);
    for word in words.iter().cloned() {
        tree.append(word);
    }
    let n = words.len();
    for (low, high) in (0..n).flat_map(|low| (low..n).map(move |high| (low, high))) {
        assert_eq!(
            tree.query(low, high).ok(),
            naive_fold(&words[low..=high], concat)
        );
    }
}

#[test]
fn treap_split_and_join_round_trip() {
    let mut rng = rand::thread_rng();
    let keys = (0..300).map(|_| rng.gen_range(-1000..1000)).sorted().dedup().collect_vec();
    let tree: Treap<i32, i32, u32> = tree_from_keys(&keys);

    let pivot = keys[keys.len() / 2];
    let res = tree.split(pivot, false);
    assert_eq!(res.pivot.key, pivot);
    assert_eq!(res.pivot.val, Some(val_of(pivot)));

    let mut left = res.left;
    left.insert(pivot, res.pivot.priority.unwrap(), val_of(pivot));
    let joined = Treap::join(left, res.right);
    joined.assert_correctness();
    assert_eq!(joined.keys().cloned().collect_vec(), keys);
    for key in &keys {
        assert_eq!(joined.get(key), Some(&val_of(*key)));
    }
}

#[test]
fn treap_update_priority_moves_nodes() {
    let mut tree: Treap<i32, (), i32> = (0..50).map(|key| (key, key, ())).collect();
    tree.assert_correctness();
    // the largest key has the largest priority, so it starts at the bottom
    assert!(tree.update_priority(&49, -1).is_some());
    assert_eq!(*tree.node(tree.root().unwrap()).unwrap().key(), 49);
    tree.assert_correctness();
    assert!(tree.update_priority(&49, 100).is_some());
    assert_eq!(*tree.node(tree.root().unwrap()).unwrap().key(), 0);
    tree.assert_correctness();
    assert!(tree.update_priority(&50, 0).is_none());
}
