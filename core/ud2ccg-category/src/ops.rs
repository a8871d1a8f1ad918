use ud2ccg_protocol::TokenIndex;

use crate::identity::Identity;
use crate::store::{CatId, CategoryKind, CategoryStore, Slash};

impl CategoryStore {
    /// Feature compatibility: placeholders unify with anything, atoms unify
    /// when either feature is a variable or ignorable, or both are equal.
    pub fn unify(&self, a: CatId, b: CatId) -> bool {
        match (self.kind(a), self.kind(b)) {
            (CategoryKind::Placeholder(_), _) | (_, CategoryKind::Placeholder(_)) => true,
            (CategoryKind::Atom { feature: fa, .. }, CategoryKind::Atom { feature: fb, .. }) => {
                fa.unifies(fb) || fb.unifies(fa)
            }
            _ => self.equivalent(a, b),
        }
    }

    /// Structural equality; placeholders and ignorable features match anything.
    pub fn equivalent(&self, a: CatId, b: CatId) -> bool {
        if a == b {
            return true;
        }
        match (self.kind(a), self.kind(b)) {
            (CategoryKind::Placeholder(_), _) | (_, CategoryKind::Placeholder(_)) => true,
            (
                CategoryKind::Atom { base: ba, feature: fa },
                CategoryKind::Atom { base: bb, feature: fb },
            ) => ba == bb && (fa.unifies(fb) || fb.unifies(fa)),
            (
                CategoryKind::Functor { left: la, slash: sa, right: ra },
                CategoryKind::Functor { left: lb, slash: sb, right: rb },
            ) => sa == sb && self.equivalent(*la, *lb) && self.equivalent(*ra, *rb),
            _ => false,
        }
    }

    /// The functor that yields `result` when applied to `argument` along
    /// `slash`. Shares both handles, so later resolution of either shows
    /// through the new functor.
    pub fn solve_functor(&mut self, result: CatId, argument: CatId, slash: Slash) -> CatId {
        self.functor(result, slash, argument)
    }

    /// `X/Y  Y  =>  X`
    pub fn forward_apply(&self, functor: CatId, argument: CatId) -> Option<CatId> {
        self.apply_towards(functor, argument, Slash::Forward)
    }

    /// `Y  X\Y  =>  X`
    pub fn backward_apply(&self, functor: CatId, argument: CatId) -> Option<CatId> {
        self.apply_towards(functor, argument, Slash::Backward)
    }

    fn apply_towards(&self, functor: CatId, argument: CatId, direction: Slash) -> Option<CatId> {
        match self.kind(functor) {
            CategoryKind::Functor { left, slash, right }
                if (*slash == direction || *slash == Slash::Either)
                    && self.equivalent(*right, argument) =>
            {
                Some(*left)
            }
            _ => None,
        }
    }

    /// Rewrites every `|` reachable from `id` to `direction`.
    pub fn apply_default_slash(&mut self, id: CatId, direction: Slash) {
        for cell in self.reachable(id) {
            if self.slash(cell) == Some(Slash::Either) {
                self.set_slash(cell, direction);
            }
        }
    }

    /// Resolves every placeholder reachable from `id` to a copy of
    /// `fallback`, keeping each placeholder's identity.
    pub fn apply_default_category(&mut self, id: CatId, fallback: CatId) {
        for cell in self.reachable(id) {
            self.resolve(cell, fallback, true);
        }
    }

    pub fn contains_placeholder(&self, id: CatId) -> bool {
        self.reachable(id).into_iter().any(|cell| self.is_placeholder(cell))
    }

    pub fn contains_undirected_slash(&self, id: CatId) -> bool {
        self.reachable(id)
            .into_iter()
            .any(|cell| self.slash(cell) == Some(Slash::Either))
    }

    /// Fully resolved: no placeholder and no `|` anywhere inside.
    pub fn is_complete(&self, id: CatId) -> bool {
        !self.contains_placeholder(id) && !self.contains_undirected_slash(id)
    }

    /// Replaces deferred identities reachable from `id` using `lookup`.
    /// Positions `lookup` cannot answer stay deferred.
    pub fn resolve_deferred<F>(&mut self, id: CatId, lookup: F)
    where
        F: Fn(TokenIndex) -> Option<Identity>,
    {
        for cell in self.reachable(id) {
            if let Identity::Deferred(position) = self.identity(cell) {
                if let Some(identity) = lookup(position) {
                    self.set_identity(cell, identity);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::store::{CategoryStore, Slash};

    #[test]
    fn test_unify_features() {
        let mut store = CategoryStore::standalone();
        let dcl = parse(&mut store, "S[dcl]").unwrap();
        let bare = parse(&mut store, "S").unwrap();
        let var = parse(&mut store, "S[X]").unwrap();
        let pss = parse(&mut store, "S[pss]").unwrap();
        let hole = store.placeholder();

        assert!(store.unify(dcl, bare));
        assert!(store.unify(var, pss));
        assert!(!store.unify(dcl, pss));
        assert!(store.unify(hole, dcl));
    }

    #[test]
    fn test_equivalence_ignores_nb_but_not_base() {
        let mut store = CategoryStore::standalone();
        let a = parse(&mut store, "(S\\NP[nb])/NP").unwrap();
        let b = parse(&mut store, "(S\\NP)/NP").unwrap();
        let c = parse(&mut store, "(S\\N)/NP").unwrap();
        let d = parse(&mut store, "(S/NP)/NP").unwrap();

        assert!(store.equivalent(a, b));
        assert!(!store.equivalent(b, c));
        assert!(!store.equivalent(b, d));
    }

    #[test]
    fn test_backward_application_of_solved_functor() {
        let mut store = CategoryStore::standalone();
        let s = parse(&mut store, "S").unwrap();
        let np = parse(&mut store, "NP").unwrap();

        let verb = store.solve_functor(s, np, Slash::Backward);
        assert_eq!(store.render(verb), "S\\NP");
        assert_eq!(store.backward_apply(verb, np), Some(s));
        assert_eq!(store.forward_apply(verb, np), None);
    }

    #[test]
    fn test_undirected_slash_applies_both_ways() {
        let mut store = CategoryStore::standalone();
        let vp = parse(&mut store, "S|NP").unwrap();
        let np = parse(&mut store, "NP").unwrap();

        assert!(store.forward_apply(vp, np).is_some());
        assert!(store.backward_apply(vp, np).is_some());
    }

    #[test]
    fn test_default_slash_reaches_nested_functors() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "(S|NP)|(S|NP)").unwrap();

        store.apply_default_slash(cat, Slash::Backward);
        assert_eq!(store.render(cat), "(S\\NP)\\(S\\NP)");
        assert!(store.is_complete(cat));
    }

    #[test]
    fn test_default_category_keeps_placeholder_identity() {
        let mut store = CategoryStore::standalone();
        let s = parse(&mut store, "S").unwrap();
        let hole = store.placeholder();
        let verb = store.solve_functor(s, hole, Slash::Backward);
        let fallback = parse(&mut store, "NP").unwrap();
        let before = store.identity(hole);

        assert!(!store.is_complete(verb));
        store.apply_default_category(verb, fallback);

        assert_eq!(store.render(verb), "S\\NP");
        assert_eq!(store.identity(hole), before);
        assert_ne!(store.identity(hole), store.identity(fallback));
        assert!(store.is_complete(verb));
    }

    #[test]
    fn test_resolve_can_adopt_source_identity() {
        let mut store = CategoryStore::standalone();
        let hole = store.placeholder();
        let np = parse(&mut store, "NP").unwrap();

        assert!(store.resolve(hole, np, false));
        assert_eq!(store.identity(hole), store.identity(np));
        // Already resolved: a second resolution is refused
        let s = parse(&mut store, "S").unwrap();
        assert!(!store.resolve(hole, s, true));
        assert_eq!(store.render(hole), "NP");
    }

    #[test]
    fn test_indexed_rendering() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "S\\NP").unwrap();
        let s = store.left(cat).unwrap();
        let np = store.right(cat).unwrap();
        store.set_identity(np, crate::Identity::Deferred(ud2ccg_protocol::TokenIndex(4)));

        let expected = format!("(S{{{}}}\\NP{{4:t}}){{{}}}", store.identity(s), store.identity(cat));
        assert_eq!(store.render_indexed(cat), expected);
    }

    #[test]
    fn test_deferred_identities_follow_lookup() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "S|NP").unwrap();
        let np = store.right(cat).unwrap();
        let target = crate::Identity::Fixed(7);
        store.set_identity(np, crate::Identity::Deferred(ud2ccg_protocol::TokenIndex(2)));

        store.resolve_deferred(cat, |position| (position.0 == 2).then_some(target));
        assert_eq!(store.identity(np), target);
    }
}
