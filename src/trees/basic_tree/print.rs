//! A textual dump of a tree, for debugging.

use std::fmt::Debug;

use super::*;

impl<K: Debug, V: Debug, T: Debug> BasicTree<K, V, T> {
    /// Renders the tree one node per line, children indented below their
    /// parent. `alg_data` is shown next to each key, so the dump shows the
    /// colors of a red-black tree or the priorities of a treap.
    ///```text
    /// Node[0] Black { 2 = Some("b") }
    ///   L=Node[1] Red { 1 = Some("a") }
    ///     L=∅
    ///     R=∅
    ///   R=∅
    ///```
    pub fn print(&self) -> String {
        self.print_subtree(self.root, "")
    }

    fn print_subtree(&self, id: Option<NodeId>, tab: &str) -> String {
        match id {
            None => "∅".to_string(),
            Some(id) => {
                let node = self.get(id);
                let child_tab = format!("{tab}  ");
                let left = self.print_subtree(node.left, &child_tab);
                let right = self.print_subtree(node.right, &child_tab);
                format!(
                    "Node[{}] {:?} {{ {:?} = {:?} }}\n{child_tab}L={left}\n{child_tab}R={right}",
                    id.index(),
                    node.alg_data,
                    node.key,
                    node.val,
                )
            }
        }
    }
}

#[test]
fn print_shows_structure() {
    use crate::data::example_data::NaturalOrder;

    let mut tree: BasicTree<i32, &str, ()> = BasicTree::new();
    assert_eq!(tree.print(), "∅");
    for (key, val) in [(2, "b"), (1, "a")] {
        let id = tree.alloc(Node::new_alg(key, Some(val), ()));
        tree.attach(id, &NaturalOrder);
    }
    assert_eq!(
        tree.print(),
        "Node[0] () { 2 = Some(\"b\") }\n  L=Node[1] () { 1 = Some(\"a\") }\n    L=∅\n    R=∅\n  R=∅"
    );
}
