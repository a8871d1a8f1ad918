use petgraph::stable_graph::NodeIndex;
use rand::Rng;

use super::{RuleContext, Site};
use crate::btree::ConjunctTag;

/// Upper bound (exclusive) of the draw that tells two conjuncts apart.
const DRAW_RANGE: u32 = 1_000_000_000;

/// `conj`: both conjuncts carry the parent's category. Each side is tagged
/// with its own draw so argument pairs that straddle the coordination can be
/// filtered later.
pub(super) fn conjunction(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    let relation = ctx.btree.node(site.node).name();

    for child in ctx.btree.children(site.node) {
        ctx.set_category(Some(child), parent);
        let tag = ConjunctTag {
            relation: relation.clone(),
            draw: ctx.rng.gen_range(0..DRAW_RANGE),
        };
        tag_conjunct(ctx, child, tag);
    }
}

fn tag_conjunct(ctx: &mut RuleContext<'_>, conjunct: NodeIndex, tag: ConjunctTag) {
    for node in ctx.btree.descendants(conjunct) {
        ctx.btree.node_mut(node).conjunct = Some(tag.clone());
    }
}

/// `cc`: the coordinator is `conj`, the rest of the phrase keeps the parent's category.
pub(super) fn coordinator(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    let conj = ctx.store.atom("conj");
    ctx.set_category(site.functor, conj);
    ctx.set_category(site.argument, parent);
}
