use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use ud2ccg_category::CatId;
use ud2ccg_protocol::TokenIndex;

/// Part a child plays in its parent's combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Functor,
    Argument,
    /// The synthetic root token under the `root` relation.
    Root,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A word (or the synthetic root) of the dependency tree.
    Token(TokenIndex),
    /// The combination of `head`'s partial phrase with `dependent`'s phrase.
    Relation {
        label: String,
        head: TokenIndex,
        dependent: TokenIndex,
    },
}

/// Marks the members of one conjunct of a coordination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConjunctTag {
    /// Name of the coordinating relation node, e.g. `conj:2-5`.
    pub relation: String,
    pub draw: u32,
}

impl fmt::Display for ConjunctTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.relation, self.draw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode {
    pub kind: NodeKind,
    pub role: Option<Role>,
    pub category: Option<CatId>,
    /// Set when the phrase reaches its parent through a unary type change:
    /// the category it is used as.
    pub category_tc: Option<CatId>,
    pub conjunct: Option<ConjunctTag>,
}

impl BinaryNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            role: None,
            category: None,
            category_tc: None,
            conjunct: None,
        }
    }

    /// Token index for tokens, dependent index for relations.
    pub fn index(&self) -> TokenIndex {
        match &self.kind {
            NodeKind::Token(index) => *index,
            NodeKind::Relation { dependent, .. } => *dependent,
        }
    }

    /// Token index for tokens, head index for relations.
    pub fn head(&self) -> TokenIndex {
        match &self.kind {
            NodeKind::Token(index) => *index,
            NodeKind::Relation { head, .. } => *head,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self.kind, NodeKind::Token(_))
    }

    /// `label:head-dep` for relations, the index for tokens.
    pub fn name(&self) -> String {
        match &self.kind {
            NodeKind::Token(index) => index.to_string(),
            NodeKind::Relation { label, head, dependent } => format!("{}:{}-{}", label, head, dependent),
        }
    }
}

/// Which operand of a relation node an edge leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The head's phrase built so far.
    Accumulator,
    /// The phrase of the newly attached dependent.
    Dependent,
}

/// Binary derivation skeleton. Every relation node has exactly one
/// accumulator and one dependent child; tokens are leaves.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree {
    graph: StableDiGraph<BinaryNode, Side>,
    root: Option<NodeIndex>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, index: TokenIndex) -> NodeIndex {
        self.graph.add_node(BinaryNode::new(NodeKind::Token(index)))
    }

    /// Joins `accumulator` (the head's phrase) with `dependent`.
    pub fn add_relation(
        &mut self,
        label: &str,
        head: TokenIndex,
        dependent: TokenIndex,
        accumulator: NodeIndex,
        dependent_phrase: NodeIndex,
    ) -> NodeIndex {
        let node = self.graph.add_node(BinaryNode::new(NodeKind::Relation {
            label: label.to_string(),
            head,
            dependent,
        }));
        self.graph.add_edge(node, accumulator, Side::Accumulator);
        self.graph.add_edge(node, dependent_phrase, Side::Dependent);
        node
    }

    pub fn set_root(&mut self, root: NodeIndex) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, node: NodeIndex) -> &BinaryNode {
        &self.graph[node]
    }

    pub fn node_mut(&mut self, node: NodeIndex) -> &mut BinaryNode {
        &mut self.graph[node]
    }

    fn side(&self, node: NodeIndex, side: Side) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|edge| *edge.weight() == side)
            .map(|edge| edge.target())
    }

    pub fn accumulator(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.side(node, Side::Accumulator)
    }

    pub fn dependent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.side(node, Side::Dependent)
    }

    /// Children in surface order: a dependent left of its head comes first.
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let (Some(accumulator), Some(dependent)) = (self.accumulator(node), self.dependent(node)) else {
            return Vec::new();
        };
        let current = self.node(node);
        if current.index() < current.head() {
            vec![dependent, accumulator]
        } else {
            vec![accumulator, dependent]
        }
    }

    pub fn child_with_role(&self, node: NodeIndex, role: Role) -> Option<NodeIndex> {
        self.children(node)
            .into_iter()
            .find(|child| self.node(*child).role == Some(role))
    }

    /// `node` and everything below it, parents before children.
    pub fn descendants(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            found.push(current);
            let children = self.children(current);
            stack.extend(children.into_iter().rev());
        }
        found
    }

    /// Token indices of the leaves under `node`.
    pub fn leaf_indices(&self, node: NodeIndex) -> Vec<TokenIndex> {
        let mut indices: Vec<TokenIndex> = self
            .descendants(node)
            .into_iter()
            .filter_map(|n| match self.node(n).kind {
                NodeKind::Token(index) => Some(index),
                NodeKind::Relation { .. } => None,
            })
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Token leaves of the whole tree, in surface order.
    pub fn leaves(&self) -> Vec<NodeIndex> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut leaves: Vec<NodeIndex> = self
            .descendants(root)
            .into_iter()
            .filter(|n| self.node(*n).is_token())
            .collect();
        leaves.sort_by_key(|n| self.node(*n).index());
        leaves
    }

    /// Longest root-to-leaf path, in edges.
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in self.children(node) {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Removes the synthetic `root` relation and its ROOT token, making the
    /// real root's phrase the root of the tree.
    pub fn strip_root_wrapper(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        if self.node(root).is_token() {
            return;
        }
        if let Some(synthetic) = self.child_with_role(root, Role::Root) {
            self.graph.remove_node(synthetic);
        }
        let phrase = self.dependent(root);
        self.graph.remove_node(root);
        self.root = phrase;
        if let Some(phrase) = phrase {
            self.graph[phrase].role = None;
        }
    }
}
