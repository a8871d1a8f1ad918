use petgraph::stable_graph::NodeIndex;
use ud2ccg_category::Slash;
use ud2ccg_protocol::UniversalPos;

use super::{RuleContext, Site};
use crate::btree::{NodeKind, Role};

/// Relations in which a determiner, adjective or adverb stands in for a noun phrase.
const NOMINAL_SLOTS: [&str; 6] = ["nsubj", "obj", "iobj", "obl", "obl-ap", "nmod"];

/// Lexical `NP` for nominal tokens; fills a placeholder in place so every
/// position sharing it sees the result.
pub(super) fn token(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let NodeKind::Token(index) = ctx.btree.node(node).kind else {
        return;
    };
    let dependency = ctx.tree.node(index);
    let is_np = dependency.upos.is_noun_phrase_tag()
        || (dependency.upos.is_nominalizable() && NOMINAL_SLOTS.contains(&dependency.label.as_str()));
    if !is_np {
        return;
    }

    match ctx.category(node) {
        None => {
            let np = ctx.store.atom("NP");
            ctx.set_category(Some(node), np);
        }
        Some(current) if ctx.store.is_placeholder(current) => {
            let np = ctx.store.atom("NP");
            ctx.store.resolve(current, np, true);
        }
        Some(_) => {}
    }
}

/// Unknown relation: the dependent is an unconstrained argument.
pub(super) fn default(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    let argument = ctx.store.placeholder();
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.argument_slash());
    ctx.set_category(site.functor, functor);
}

/// Sentence category of the real root: `S` with a subject (or an expletive
/// or copula on a nominal), `NP` for a bare nominal, otherwise a clause
/// still missing its subject.
pub(super) fn root(ctx: &mut RuleContext<'_>, site: &Site) {
    let tree = ctx.tree;
    let mut has_subject = false;
    let mut has_expletive = false;
    let mut has_copula = false;
    for child in tree.children(site.dependent) {
        match tree.label(child) {
            "nsubj" | "csubj" => has_subject = true,
            "expl" => has_expletive = true,
            "cop" => has_copula = true,
            _ => {}
        }
    }
    let upos = tree.upos(site.dependent);

    let category = if has_subject {
        ctx.store.atom("S")
    } else if upos.is_nominal() {
        ctx.store.atom(if has_expletive || has_copula { "S" } else { "NP" })
    } else if has_expletive {
        ctx.store.atom("S")
    } else if !tree.has_children(site.dependent)
        && matches!(upos, UniversalPos::Punct | UniversalPos::Intj | UniversalPos::X)
    {
        ctx.store.atom("NP")
    } else {
        let s = ctx.store.atom("S");
        let np = ctx.store.atom("NP");
        let clause = ctx.store.functor(s, Slash::Either, np);
        let identity = ctx.identity(s);
        ctx.set_identity(clause, identity);
        clause
    };
    ctx.set_category(site.argument, category);

    let root_atom = ctx.store.atom("ROOT");
    let synthetic = ctx.btree.child_with_role(site.node, Role::Root);
    ctx.set_category(synthetic, root_atom);
}

fn punctuation_category(name: &str) -> &'static str {
    match name {
        "," | "，" | "、" | "،" | "՝" | "/" | "\\" => ",",
        ":" | "：" | "..." | "…" => ":",
        ";" | "；" | "؛" => ";",
        _ => ".",
    }
}

/// The punctuation mark gets its own atom; the phrase keeps the parent's category.
pub(super) fn punctuation(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    ctx.set_category(site.argument, parent);

    let Some(mark) = site.functor else {
        return;
    };
    let name = match &ctx.btree.node(mark).kind {
        NodeKind::Token(index) => ctx.tree.form(*index).to_string(),
        NodeKind::Relation { label, .. } => label.clone(),
    };
    let atom = ctx.store.atom(punctuation_category(&name));
    ctx.set_category(Some(mark), atom);
}
