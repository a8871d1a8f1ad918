use ud2ccg_protocol::{PredicateArguments, TokenIndex};

use crate::tree::DependencyTree;

/// Relabels `obl`/`nmod` phrases introduced by an adposition as `obl-ap`
/// when the semantic-role annotation makes them a core argument (A0-A4,
/// ARG0-ARG4) of their syntactic head.
pub fn mark_argument_phrases(tree: &mut DependencyTree, arguments: &[PredicateArguments]) -> usize {
    let targets: Vec<TokenIndex> = tree
        .tokens()
        .filter(|&node| matches!(tree.label(node), "obl" | "nmod"))
        .filter(|&node| !tree.children_labeled(node, "case").is_empty())
        .filter(|&node| is_core_argument_of_head(tree, node, arguments))
        .collect();

    for &node in &targets {
        tree.set_label(node, "obl-ap");
    }
    targets.len()
}

fn is_core_argument_of_head(tree: &DependencyTree, node: TokenIndex, arguments: &[PredicateArguments]) -> bool {
    let Some(head) = tree.head(node) else {
        return false;
    };
    arguments
        .iter()
        .filter(|predicate| predicate.predicate == head)
        .flat_map(|predicate| predicate.heads.iter())
        .any(|argument| argument.index == node && argument.is_core())
}
