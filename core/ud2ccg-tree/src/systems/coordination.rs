use ud2ccg_protocol::TokenIndex;

use crate::tree::DependencyTree;

/// Relabels `conj` as `conj-sent` where the conjunct is a clause of its own
/// instead of a predicate sharing the first conjunct's subject.
///
/// Only conjuncts whose head has a subject are considered. They are
/// converted when they have their own subject, have no enhanced dependents
/// at all, or none of their enhanced dependents is that subject.
pub fn mark_clausal_conjuncts(tree: &mut DependencyTree) -> usize {
    let targets: Vec<TokenIndex> = tree
        .tokens()
        .filter(|&node| tree.label(node) == "conj" && is_clausal(tree, node))
        .collect();

    for &node in &targets {
        tree.set_label(node, "conj-sent");
    }
    targets.len()
}

fn is_clausal(tree: &DependencyTree, node: TokenIndex) -> bool {
    let Some(head) = tree.head(node) else {
        return false;
    };
    let Some(&head_subject) = tree.children_labeled(head, "nsubj").first() else {
        return false;
    };

    if !tree.children_labeled(node, "nsubj").is_empty() {
        return true;
    }
    tree.enhanced_children(node, false)
        .iter()
        .all(|(dependent, _)| *dependent != head_subject)
}
