//! Top-down category assignment over a binary tree.
//!
//! Each relation node is handled by the [`Rule`] its label selects; token
//! nodes by [`Rule::Token`]. A rule reads the category already on the node
//! (assigned by its parent), and assigns categories to the node's two
//! children.

mod basic;
mod clausal;
mod coordination;
mod modifier;

use petgraph::stable_graph::NodeIndex;
use rand::rngs::StdRng;
use ud2ccg_category::{CatId, CategoryStore, Identity, Slash};
use ud2ccg_protocol::TokenIndex;
use ud2ccg_tree::DependencyTree;

use crate::btree::{BinaryTree, NodeKind, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Token,
    Default,
    Root,
    Complement,
    Copula,
    ObliqueArgument,
    Marker,
    Case,
    Punctuation,
    Modifier,
    ClausalModifier,
    NominalModifier,
    Conjunction,
    Coordinator,
    RelativeClause,
    RelativePronoun,
}

impl Rule {
    /// Exact label first, then the `ref-` family, then the default.
    pub fn for_label(label: &str) -> Rule {
        match label {
            "root" => Rule::Root,
            "ccomp" | "xcomp" | "csubj" => Rule::Complement,
            "scop" | "cop" => Rule::Copula,
            "obl-ap" => Rule::ObliqueArgument,
            "mark" => Rule::Marker,
            "case" => Rule::Case,
            "punct" => Rule::Punctuation,
            "det" | "aux" | "punct2" | "obl" | "amod" | "advmod" | "nummod" | "compound" | "fixed"
            | "flat" | "list" | "goeswith" | "dep" | "clf" | "appos" | "parataxis" | "vocative"
            | "discourse" | "dislocated" | "reparandum" => Rule::Modifier,
            "advcl" | "acl" => Rule::ClausalModifier,
            "nmod" => Rule::NominalModifier,
            "conj" | "conj-sent" => Rule::Conjunction,
            "cc" => Rule::Coordinator,
            "acl:relcl" | "advcl:relcl" => Rule::RelativeClause,
            _ if label.starts_with("ref-") => Rule::RelativePronoun,
            _ => Rule::Default,
        }
    }

    pub fn for_node(kind: &NodeKind) -> Rule {
        match kind {
            NodeKind::Token(_) => Rule::Token,
            NodeKind::Relation { label, .. } => Rule::for_label(label),
        }
    }
}

/// Slash of rules whose functor takes the dependent as an argument:
/// `/` looks right for a dependent after its head.
pub(crate) fn argument_slash(head: TokenIndex, dependent: TokenIndex) -> Slash {
    if head > dependent {
        Slash::Backward
    } else {
        Slash::Forward
    }
}

/// Slash of modifier-like rules, where the dependent is the functor and
/// looks towards its head.
pub(crate) fn modifier_slash(head: TokenIndex, dependent: TokenIndex) -> Slash {
    if head > dependent {
        Slash::Forward
    } else {
        Slash::Backward
    }
}

/// Everything a rule needs while working on one sentence.
pub struct RuleContext<'a> {
    pub tree: &'a DependencyTree,
    pub btree: &'a mut BinaryTree,
    pub store: &'a mut CategoryStore,
    pub rng: &'a mut StdRng,
}

/// The relation node a rule is applied to, with its children resolved.
pub(crate) struct Site {
    pub node: NodeIndex,
    pub head: TokenIndex,
    pub dependent: TokenIndex,
    pub functor: Option<NodeIndex>,
    pub argument: Option<NodeIndex>,
}

impl Site {
    fn new(btree: &BinaryTree, node: NodeIndex) -> Option<Site> {
        let NodeKind::Relation { head, dependent, .. } = &btree.node(node).kind else {
            return None;
        };
        Some(Site {
            node,
            head: *head,
            dependent: *dependent,
            functor: btree.child_with_role(node, Role::Functor),
            argument: btree.child_with_role(node, Role::Argument),
        })
    }

    pub fn argument_slash(&self) -> Slash {
        argument_slash(self.head, self.dependent)
    }

    pub fn modifier_slash(&self) -> Slash {
        modifier_slash(self.head, self.dependent)
    }
}

impl RuleContext<'_> {
    pub(crate) fn category(&self, node: NodeIndex) -> Option<CatId> {
        self.btree.node(node).category
    }

    pub(crate) fn set_category(&mut self, node: Option<NodeIndex>, category: CatId) {
        if let Some(node) = node {
            self.btree.node_mut(node).category = Some(category);
        }
    }

    /// The node's category, creating a placeholder if it has none yet.
    pub(crate) fn ensure_category(&mut self, node: NodeIndex) -> CatId {
        if let Some(category) = self.category(node) {
            return category;
        }
        let placeholder = self.store.placeholder();
        self.btree.node_mut(node).category = Some(placeholder);
        placeholder
    }

    pub(crate) fn identity(&self, category: CatId) -> Identity {
        self.store.identity(category)
    }

    pub(crate) fn set_identity(&mut self, category: CatId, identity: Identity) {
        self.store.set_identity(category, identity);
    }

    /// Points the argument of an `S|NP` clause at the core argument it
    /// shares through the enhanced graph, if `token` has one.
    pub(crate) fn coindex_shared_argument(&mut self, clause: CatId, token: TokenIndex) {
        let Some(shared) = self.tree.core_enhanced_dependent(token) else {
            return;
        };
        if let Some(argument) = self.store.right(clause) {
            self.store.set_identity(argument, Identity::Deferred(shared));
        }
    }
}

/// Applies the rules top-down from the tree root, visiting children left
/// to right.
pub fn apply_rules(ctx: &mut RuleContext<'_>) {
    let Some(root) = ctx.btree.root() else {
        return;
    };
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        apply_rule(ctx, node);
        let children = ctx.btree.children(node);
        stack.extend(children.into_iter().rev());
    }
}

pub(crate) fn apply_rule(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let rule = Rule::for_node(&ctx.btree.node(node).kind);
    if rule == Rule::Token {
        basic::token(ctx, node);
        return;
    }
    let Some(site) = Site::new(ctx.btree, node) else {
        return;
    };

    match rule {
        Rule::Token => {}
        Rule::Default => basic::default(ctx, &site),
        Rule::Root => basic::root(ctx, &site),
        Rule::Punctuation => basic::punctuation(ctx, &site),
        Rule::Complement => clausal::complement(ctx, &site),
        Rule::Copula => clausal::copula(ctx, &site),
        Rule::Marker => clausal::marker(ctx, &site),
        Rule::ClausalModifier => clausal::clausal_modifier(ctx, &site),
        Rule::RelativeClause => clausal::relative_clause(ctx, &site),
        Rule::RelativePronoun => clausal::relative_pronoun(ctx, &site),
        Rule::Modifier => modifier::modifier(ctx, &site),
        Rule::NominalModifier => modifier::nominal_modifier(ctx, &site),
        Rule::Case => modifier::case(ctx, &site),
        Rule::ObliqueArgument => modifier::oblique_argument(ctx, &site),
        Rule::Conjunction => coordination::conjunction(ctx, &site),
        Rule::Coordinator => coordination::coordinator(ctx, &site),
    }
}

#[cfg(test)]
mod tests;
