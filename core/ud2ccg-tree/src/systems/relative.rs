use ud2ccg_protocol::TokenIndex;

use crate::tree::DependencyTree;

/// Prefixes the label of every relative pronoun (target of an enhanced
/// `ref` arc) with `ref-`. A possessive relative (`whose`, labeled `nmod`)
/// also marks its head noun.
pub fn mark_relative_pronouns(tree: &mut DependencyTree) -> usize {
    let pronouns: Vec<TokenIndex> = tree
        .tokens()
        .filter(|&node| tree.enhanced_heads(node).iter().any(|(_, label)| *label == "ref"))
        .collect();

    for &node in &pronouns {
        let label = tree.label(node).to_string();
        tree.set_label(node, format!("ref-{}", label));

        if label == "nmod" {
            if let Some(head) = tree.head(node).filter(|head| !head.is_root()) {
                let head_label = tree.label(head).to_string();
                tree.set_label(head, format!("ref-{}", head_label));
            }
        }
    }
    pronouns.len()
}
