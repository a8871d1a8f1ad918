use super::{RuleContext, Site};

/// `X|X` modifiers: the head phrase keeps the parent's category and the
/// dependent is a fresh functor over it.
pub(super) fn modifier(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    ctx.set_category(site.argument, parent);

    let functor = ctx.store.solve_functor(parent, parent, site.modifier_slash());
    ctx.set_category(site.functor, functor);
}

/// Like [`modifier`], but a head still unresolved afterwards is read as a
/// nominal ("most of us").
pub(super) fn nominal_modifier(ctx: &mut RuleContext<'_>, site: &Site) {
    modifier(ctx, site);

    let Some(head) = site.argument.and_then(|argument| ctx.category(argument)) else {
        return;
    };
    if ctx.store.is_placeholder(head) {
        let np = ctx.store.atom("NP");
        ctx.store.resolve(head, np, true);
    }
}

/// `case`: the adposition takes an unconstrained phrase that shares the
/// parent's identity.
pub(super) fn case(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    let argument = ctx.store.placeholder();
    let identity = ctx.identity(parent);
    ctx.set_identity(argument, identity);
    ctx.set_category(site.argument, argument);

    let functor = ctx.store.solve_functor(parent, argument, site.modifier_slash());
    ctx.set_category(site.functor, functor);
}

/// `obl-ap`: an oblique argument marked by an adposition is a `PP`.
pub(super) fn oblique_argument(ctx: &mut RuleContext<'_>, site: &Site) {
    let parent = ctx.ensure_category(site.node);
    let pp = ctx.store.atom("PP");
    ctx.set_category(site.argument, pp);

    let functor = ctx.store.solve_functor(parent, pp, site.argument_slash());
    ctx.set_category(site.functor, functor);
}
