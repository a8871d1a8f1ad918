use petgraph::stable_graph::NodeIndex;
use ud2ccg_protocol::TokenIndex;
use ud2ccg_tree::DependencyTree;

use crate::btree::{BinaryTree, Role};
use crate::obliqueness::ObliquenessTable;

/// Relations whose head phrase takes the dependent as an argument.
const HEAD_IS_FUNCTOR: [&str; 9] = ["nsubj", "csubj", "obj", "iobj", "xcomp", "ccomp", "expl", "scop", "obl-ap"];

/// Order in which the dependents of `parent` attach: the nearest unattached
/// dependent on each side competes, the lower priority wins, ties go left.
pub fn attachment_order(tree: &DependencyTree, table: &ObliquenessTable, parent: TokenIndex) -> Vec<TokenIndex> {
    let children = tree.children(parent);
    // Nearest dependent on top of each stack
    let mut left: Vec<TokenIndex> = children.iter().copied().filter(|c| *c < parent).collect();
    let mut right: Vec<TokenIndex> = children.iter().rev().copied().filter(|c| *c > parent).collect();

    let mut order = Vec::with_capacity(children.len());
    loop {
        let next = match (left.last(), right.last()) {
            (None, None) => break,
            (Some(_), None) => left.pop(),
            (None, Some(_)) => right.pop(),
            (Some(l), Some(r)) => {
                if table.priority(tree.label(*l)) <= table.priority(tree.label(*r)) {
                    left.pop()
                } else {
                    right.pop()
                }
            }
        };
        order.extend(next);
    }
    order
}

/// Binarizes the whole tree from the synthetic root.
pub fn binarize(tree: &DependencyTree, table: &ObliquenessTable) -> BinaryTree {
    let mut btree = BinaryTree::new();
    let root = attach(tree, table, &mut btree, TokenIndex::ROOT);
    btree.set_root(root);
    btree
}

fn attach(tree: &DependencyTree, table: &ObliquenessTable, btree: &mut BinaryTree, parent: TokenIndex) -> NodeIndex {
    let mut accumulator = btree.add_token(parent);

    for child in attachment_order(tree, table, parent) {
        let label = tree.label(child);
        let phrase = attach(tree, table, btree, child);
        let relation = btree.add_relation(label, parent, child, accumulator, phrase);

        let (accumulator_role, phrase_role) = if label == "root" {
            (Role::Root, Role::Argument)
        } else if HEAD_IS_FUNCTOR.contains(&label) {
            (Role::Functor, Role::Argument)
        } else {
            (Role::Argument, Role::Functor)
        };
        btree.node_mut(accumulator).role = Some(accumulator_role);
        btree.node_mut(phrase).role = Some(phrase_role);

        accumulator = relation;
    }

    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::NodeKind;
    use ud2ccg_protocol::{SentenceRecord, TokenRecord, UniversalPos};

    fn build(tokens: Vec<TokenRecord>) -> DependencyTree {
        DependencyTree::from_sentence(&SentenceRecord { sent_id: "b".to_string(), text: None, tokens }).unwrap()
    }

    /// "the big dog chased a cat"
    fn chased() -> DependencyTree {
        build(vec![
            TokenRecord::basic(1, "the", UniversalPos::Det, 3, "det"),
            TokenRecord::basic(2, "big", UniversalPos::Adj, 3, "amod"),
            TokenRecord::basic(3, "dog", UniversalPos::Noun, 4, "nsubj"),
            TokenRecord::basic(4, "chased", UniversalPos::Verb, 0, "root"),
            TokenRecord::basic(5, "a", UniversalPos::Det, 6, "det"),
            TokenRecord::basic(6, "cat", UniversalPos::Noun, 4, "obj"),
        ])
    }

    #[test]
    fn test_object_attaches_before_subject() {
        let tree = chased();
        let order = attachment_order(&tree, &ObliquenessTable::default(), TokenIndex(4));
        assert_eq!(order, vec![TokenIndex(6), TokenIndex(3)]);
    }

    #[test]
    fn test_nearest_dependent_on_a_side_goes_first() {
        let tree = chased();
        // det and amod tie; the left stack yields the nearest (big) first
        let order = attachment_order(&tree, &ObliquenessTable::default(), TokenIndex(3));
        assert_eq!(order, vec![TokenIndex(2), TokenIndex(1)]);
    }

    #[test]
    fn test_ties_across_sides_go_left() {
        let tree = build(vec![
            TokenRecord::basic(1, "a", UniversalPos::Adv, 2, "advmod"),
            TokenRecord::basic(2, "b", UniversalPos::Verb, 0, "root"),
            TokenRecord::basic(3, "c", UniversalPos::Adv, 2, "advmod"),
        ]);
        let order = attachment_order(&tree, &ObliquenessTable::default(), TokenIndex(2));
        assert_eq!(order, vec![TokenIndex(1), TokenIndex(3)]);
    }

    #[test]
    fn test_roles_are_total_and_root_token_is_root() {
        let tree = chased();
        let btree = binarize(&tree, &ObliquenessTable::default());
        let root = btree.root().unwrap();

        for node in btree.descendants(root) {
            if node == root {
                assert_eq!(btree.node(node).role, None);
                continue;
            }
            assert!(btree.node(node).role.is_some());
        }
        for node in btree.descendants(root) {
            if let NodeKind::Relation { .. } = btree.node(node).kind {
                let roles: Vec<Role> = btree
                    .children(node)
                    .iter()
                    .filter_map(|c| btree.node(*c).role)
                    .collect();
                assert_eq!(roles.len(), 2);
                assert_ne!(roles[0], roles[1]);
            }
        }

        let synthetic = btree.child_with_role(root, Role::Root).unwrap();
        assert_eq!(btree.node(synthetic).kind, NodeKind::Token(TokenIndex::ROOT));
    }

    #[test]
    fn test_subject_relation_makes_head_the_functor() {
        let tree = chased();
        let btree = binarize(&tree, &ObliquenessTable::default());
        let root = btree.root().unwrap();
        let clause = btree.dependent(root).unwrap();

        assert_eq!(btree.node(clause).name(), "nsubj:4-3");
        let subject = btree.dependent(clause).unwrap();
        let predicate = btree.accumulator(clause).unwrap();
        assert_eq!(btree.node(subject).role, Some(Role::Argument));
        assert_eq!(btree.node(predicate).role, Some(Role::Functor));
        assert_eq!(btree.node(predicate).name(), "obj:4-6");
    }

    #[test]
    fn test_unary_chain_has_no_spurious_nodes() {
        // Each word has exactly one dependent: "very very big"
        let tree = build(vec![
            TokenRecord::basic(1, "very", UniversalPos::Adv, 2, "advmod"),
            TokenRecord::basic(2, "very", UniversalPos::Adv, 3, "advmod"),
            TokenRecord::basic(3, "big", UniversalPos::Adj, 0, "root"),
        ]);
        let btree = binarize(&tree, &ObliquenessTable::default());

        // 4 tokens (ROOT included) and one relation per dependency
        assert_eq!(btree.len(), 4 + 3);
        assert_eq!(btree.height(), 3);
    }

    #[test]
    fn test_single_token_sentence() {
        let tree = build(vec![TokenRecord::basic(1, "Run", UniversalPos::Verb, 0, "root")]);
        let mut btree = binarize(&tree, &ObliquenessTable::default());
        assert_eq!(btree.len(), 3);

        btree.strip_root_wrapper();
        let root = btree.root().unwrap();
        assert_eq!(btree.node(root).kind, NodeKind::Token(TokenIndex(1)));
        assert_eq!(btree.leaves(), vec![root]);
    }
}
