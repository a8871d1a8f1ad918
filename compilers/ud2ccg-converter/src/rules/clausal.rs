//! Rules that decide between a saturated clause, a nominal, and a clause
//! still missing its subject (`S|NP`).

use ud2ccg_category::{CatId, Slash};
use ud2ccg_protocol::TokenIndex;
use ud2ccg_tree::DependencyTree;

use super::{RuleContext, Site};

const CORE_ENHANCED: [&str; 4] = ["nsubj:xsubj", "nsubj", "obj", "iobj"];
const RELATIVE_MARKERS: [&str; 3] = ["ref-nsubj", "ref-obj", "ref-iobj"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Sentence,
    Nominal,
    Open,
}

/// Looks at the basic dependents of `token` that lie in `within` (the
/// leaves of the phrase being built).
fn clause_shape(tree: &DependencyTree, token: TokenIndex, within: &[TokenIndex]) -> Shape {
    let mut has_subject = false;
    let mut has_copula = false;
    for child in tree.children(token) {
        if !within.contains(&child) {
            continue;
        }
        match tree.label(child) {
            "nsubj" | "csubj" => has_subject = true,
            "cop" => has_copula = true,
            _ => {}
        }
    }

    if has_subject {
        Shape::Sentence
    } else if tree.upos(token).is_nominal() && !has_copula {
        Shape::Nominal
    } else {
        Shape::Open
    }
}

/// Relative clauses never read as nominals; an enhanced core argument
/// (the gap) keeps the clause open even when it has a subject.
fn relative_shape(tree: &DependencyTree, token: TokenIndex, within: &[TokenIndex]) -> Shape {
    let has_subject = tree
        .children(token)
        .into_iter()
        .filter(|child| within.contains(child))
        .any(|child| matches!(tree.label(child), "nsubj" | "csubj"));
    let has_gap = tree
        .enhanced_children(token, true)
        .iter()
        .any(|(_, label)| CORE_ENHANCED.contains(label));

    if has_subject && !has_gap {
        Shape::Sentence
    } else {
        Shape::Open
    }
}

fn has_child_labeled(tree: &DependencyTree, token: TokenIndex, labels: &[&str]) -> bool {
    tree.children(token)
        .into_iter()
        .any(|child| labels.contains(&tree.label(child)))
}

/// `S|NP` whose identity follows its result.
fn open_clause(ctx: &mut RuleContext<'_>) -> CatId {
    let s = ctx.store.atom("S");
    let np = ctx.store.atom("NP");
    let clause = ctx.store.functor(s, Slash::Either, np);
    let identity = ctx.identity(s);
    ctx.set_identity(clause, identity);
    clause
}

/// Gives an open clause and its result the identity of `source`.
fn set_shape_identity(ctx: &mut RuleContext<'_>, clause: CatId, source: CatId) {
    let identity = ctx.identity(source);
    ctx.set_identity(clause, identity);
    if let Some(result) = ctx.store.left(clause) {
        ctx.set_identity(result, identity);
    }
}

fn shaped(ctx: &mut RuleContext<'_>, shape: Shape) -> CatId {
    match shape {
        Shape::Sentence => ctx.store.atom("S"),
        Shape::Nominal => ctx.store.atom("NP"),
        Shape::Open => open_clause(ctx),
    }
}

/// `ccomp`, `xcomp`, `csubj`: the head takes the clause as an argument.
pub(super) fn complement(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    let within = ctx.btree.leaf_indices(site.node);

    let shape = clause_shape(tree, site.dependent, &within);
    let argument = shaped(ctx, shape);
    if shape == Shape::Open {
        ctx.coindex_shared_argument(argument, site.dependent);
    }
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.argument_slash());
    ctx.set_category(site.functor, functor);
}

/// `cop`, `scop`: the copula takes the predicate as its argument and
/// shares the subject slot of the whole phrase.
pub(super) fn copula(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    let within = site
        .argument
        .map(|argument| ctx.btree.leaf_indices(argument))
        .unwrap_or_default();

    let shape = clause_shape(tree, site.head, &within);
    let argument = shaped(ctx, shape);
    if shape == Shape::Open {
        if let (Some(subject), Some(slot)) = (ctx.store.right(parent), ctx.store.right(argument)) {
            let identity = ctx.identity(subject);
            ctx.set_identity(slot, identity);
        }
    }
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.modifier_slash());
    ctx.set_category(site.functor, functor);
}

/// `mark`: the marker turns the clause into the parent category, and the
/// clause shares the parent's identity.
pub(super) fn marker(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    let within = ctx.btree.leaf_indices(site.node);

    let shape = clause_shape(tree, site.head, &within);
    let argument = shaped(ctx, shape);
    if shape == Shape::Open {
        set_shape_identity(ctx, argument, parent);
        ctx.coindex_shared_argument(argument, site.head);
    }
    let identity = ctx.identity(parent);
    ctx.set_identity(argument, identity);
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.modifier_slash());
    ctx.set_category(site.functor, functor);
}

/// Modifier category for an adjunct clause. Without a marker the clause
/// reaches it through a type change from its own category.
pub(super) fn clausal_modifier(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    ctx.set_category(site.argument, parent);
    let modifier = ctx.store.solve_functor(parent, parent, site.modifier_slash());

    let Some(clause) = site.functor else {
        return;
    };
    if has_child_labeled(tree, site.dependent, &["mark"]) {
        ctx.set_category(Some(clause), modifier);
        return;
    }

    ctx.btree.node_mut(clause).category_tc = Some(modifier);
    let within = ctx.btree.leaf_indices(site.node);
    let shape = clause_shape(tree, site.dependent, &within);
    let original = shaped(ctx, shape);
    if shape == Shape::Open {
        let identity = ctx.identity(modifier);
        let shared = ctx.identity(parent);
        if let Some(result) = ctx.store.left(original) {
            ctx.set_identity(result, identity);
        }
        if let Some(subject) = ctx.store.right(original) {
            ctx.set_identity(subject, shared);
        }
        ctx.coindex_shared_argument(original, site.dependent);
    }
    let identity = ctx.identity(modifier);
    ctx.set_identity(original, identity);
    ctx.set_category(Some(clause), original);
}

/// `acl:relcl`, `advcl:relcl`. A relative pronoun inside the clause makes
/// the modifier lexical; otherwise the clause is type-changed.
pub(super) fn relative_clause(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    ctx.set_category(site.argument, parent);
    let modifier = ctx.store.solve_functor(parent, parent, site.modifier_slash());

    let Some(clause) = site.functor else {
        return;
    };
    if has_child_labeled(tree, site.dependent, &RELATIVE_MARKERS) {
        ctx.set_category(Some(clause), modifier);
        return;
    }

    ctx.btree.node_mut(clause).category_tc = Some(modifier);
    let within = ctx.btree.leaf_indices(site.node);
    let shape = relative_shape(tree, site.dependent, &within);
    let original = shaped(ctx, shape);
    if shape == Shape::Open {
        set_shape_identity(ctx, original, modifier);
        ctx.coindex_shared_argument(original, site.dependent);
    }
    let identity = ctx.identity(modifier);
    ctx.set_identity(original, identity);
    ctx.set_category(Some(clause), original);
}

/// `ref-*`: the relative pronoun takes the clause with its gap.
pub(super) fn relative_pronoun(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let parent = ctx.ensure_category(site.node);
    let within = ctx.btree.leaf_indices(site.node);

    let shape = relative_shape(tree, site.head, &within);
    let argument = shaped(ctx, shape);
    if shape == Shape::Open {
        set_shape_identity(ctx, argument, parent);
        ctx.coindex_shared_argument(argument, site.head);
    }
    let identity = ctx.identity(parent);
    ctx.set_identity(argument, identity);
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.modifier_slash());
    ctx.set_category(site.functor, functor);
}
