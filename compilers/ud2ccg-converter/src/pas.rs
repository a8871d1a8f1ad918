//! Predicate-argument dependencies read off coindexed leaf categories.

use std::collections::HashMap;

use serde::Serialize;
use ud2ccg_category::{CatId, CategoryStore, Identity};
use ud2ccg_protocol::TokenIndex;

use crate::btree::ConjunctTag;
use crate::corpus::ConvertedSentence;

/// A predicate and one of its arguments, by token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Dependency {
    pub predicate: TokenIndex,
    pub argument: TokenIndex,
}

/// `(X{i}|X{i}){j}` with `i != j`.
fn is_modifier(store: &CategoryStore, category: CatId) -> bool {
    match (store.left(category), store.right(category)) {
        (Some(result), Some(argument)) => {
            let shared = store.identity(result);
            shared == store.identity(argument) && shared != store.identity(category)
        }
        _ => false,
    }
}

/// Arguments of a functor, outermost first.
fn argument_chain(store: &CategoryStore, category: CatId) -> Vec<CatId> {
    let mut chain = Vec::new();
    let mut current = category;
    while let (Some(result), Some(argument)) = (store.left(current), store.right(current)) {
        chain.push(argument);
        current = result;
    }
    chain
}

/// Two tokens inside different conjuncts of the same coordination.
fn across_conjuncts(a: Option<&ConjunctTag>, b: Option<&ConjunctTag>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.relation == b.relation && a.draw != b.draw,
        _ => false,
    }
}

/// Every functor leaf contributes one dependency per argument whose
/// identity can be traced to a leaf. Dependencies projected from modifiers
/// point from the modified phrase to the modifier.
pub fn extract_dependencies(sentence: &ConvertedSentence) -> Vec<Dependency> {
    let store = &sentence.store;
    let leaves: Vec<(TokenIndex, CatId, Option<&ConjunctTag>)> = sentence
        .leaves
        .iter()
        .filter_map(|leaf| {
            let node = sentence.btree.node(*leaf);
            Some((node.index(), node.category?, node.conjunct.as_ref()))
        })
        .collect();

    let mut positions: HashMap<Identity, Vec<TokenIndex>> = HashMap::new();
    for (index, category, _) in &leaves {
        positions.entry(store.identity(*category)).or_default().push(*index);
    }
    let tags: HashMap<TokenIndex, Option<&ConjunctTag>> =
        leaves.iter().map(|(index, _, tag)| (*index, *tag)).collect();

    let mut dependencies = Vec::new();
    for (index, category, tag) in &leaves {
        if !store.is_functor(*category) {
            continue;
        }
        let modifier = is_modifier(store, *category);

        for argument in argument_chain(store, *category) {
            let targets = match store.identity(argument) {
                Identity::Deferred(position) => vec![position],
                fixed => positions.get(&fixed).cloned().unwrap_or_default(),
            };
            for target in targets {
                let target_tag = tags.get(&target).copied().flatten();
                if across_conjuncts(*tag, target_tag) {
                    continue;
                }
                dependencies.push(if modifier {
                    Dependency { predicate: target, argument: *index }
                } else {
                    Dependency { predicate: *index, argument: target }
                });
            }
        }
    }
    dependencies
}
