use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{Dfs, EdgeFiltered, EdgeRef};
use petgraph::Direction;
use ud2ccg_protocol::{SentenceRecord, TokenIndex, UniversalPos};

use crate::error::TreeError;
use crate::node::{Arc, DependencyNode};

/// Enhanced labels that make a dependent a shared core argument, in
/// order of preference.
const CORE_ENHANCED: [&str; 3] = ["nsubj", "obj", "iobj"];

/// Basic dependency tree of one sentence plus its enhanced arcs.
///
/// Node `i` of the graph is token `i`; node 0 is the synthetic root.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    graph: DiGraph<DependencyNode, Arc>,
}

fn node_index(index: TokenIndex) -> NodeIndex {
    NodeIndex::new(index.0)
}

fn token_index(node: NodeIndex) -> TokenIndex {
    TokenIndex(node.index())
}

impl DependencyTree {
    pub fn from_sentence(sentence: &SentenceRecord) -> Result<Self, TreeError> {
        let mut graph = DiGraph::with_capacity(sentence.len() + 1, sentence.len());
        graph.add_node(DependencyNode::root());

        for (position, record) in sentence.tokens.iter().enumerate() {
            let expected = TokenIndex(position + 1);
            if record.index != expected {
                return Err(TreeError::NonContiguous { expected, found: record.index });
            }
            graph.add_node(DependencyNode::from_record(record));
        }

        let bound = graph.node_count();
        for record in &sentence.tokens {
            if record.head.0 >= bound {
                return Err(TreeError::MissingHead { index: record.index, head: record.head });
            }
            graph.add_edge(node_index(record.head), node_index(record.index), Arc::Basic);
        }

        let roots = sentence.tokens.iter().filter(|record| record.head == TokenIndex::ROOT).count();
        if roots != 1 {
            return Err(TreeError::RootCount { count: roots });
        }
        // Every token hangs off the root through basic arcs
        let basic = EdgeFiltered::from_fn(&graph, |edge| matches!(edge.weight(), Arc::Basic));
        let mut reached = vec![false; bound];
        let mut dfs = Dfs::new(&basic, node_index(TokenIndex::ROOT));
        while let Some(node) = dfs.next(&basic) {
            reached[node.index()] = true;
        }
        if let Some(position) = reached.iter().position(|seen| !seen) {
            return Err(TreeError::Unreachable { index: TokenIndex(position) });
        }

        for record in &sentence.tokens {
            for arc in &record.enhanced {
                if arc.head.0 >= bound {
                    return Err(TreeError::MissingHead { index: record.index, head: arc.head });
                }
                graph.add_edge(
                    node_index(arc.head),
                    node_index(record.index),
                    Arc::Enhanced(arc.label.clone()),
                );
            }
        }

        Ok(Self { graph })
    }

    /// Node count, synthetic root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Real tokens, in surface order.
    pub fn tokens(&self) -> impl Iterator<Item = TokenIndex> {
        (1..self.len()).map(TokenIndex)
    }

    pub fn contains(&self, index: TokenIndex) -> bool {
        index.0 < self.len()
    }

    pub fn node(&self, index: TokenIndex) -> &DependencyNode {
        &self.graph[node_index(index)]
    }

    pub fn get(&self, index: TokenIndex) -> Option<&DependencyNode> {
        self.graph.node_weight(node_index(index))
    }

    pub fn label(&self, index: TokenIndex) -> &str {
        &self.node(index).label
    }

    pub fn set_label(&mut self, index: TokenIndex, label: impl Into<String>) {
        self.graph[node_index(index)].label = label.into();
    }

    pub fn form(&self, index: TokenIndex) -> &str {
        &self.node(index).form
    }

    pub fn upos(&self, index: TokenIndex) -> &UniversalPos {
        &self.node(index).upos
    }

    pub fn head(&self, index: TokenIndex) -> Option<TokenIndex> {
        self.node(index).head
    }

    /// Basic dependents, ascending.
    pub fn children(&self, index: TokenIndex) -> Vec<TokenIndex> {
        let mut children: Vec<TokenIndex> = self
            .graph
            .edges_directed(node_index(index), Direction::Outgoing)
            .filter(|edge| *edge.weight() == Arc::Basic)
            .map(|edge| token_index(edge.target()))
            .collect();
        children.sort_unstable();
        children
    }

    /// Basic dependents carrying `label`, ascending.
    pub fn children_labeled(&self, index: TokenIndex, label: &str) -> Vec<TokenIndex> {
        self.children(index)
            .into_iter()
            .filter(|child| self.label(*child) == label)
            .collect()
    }

    pub fn has_children(&self, index: TokenIndex) -> bool {
        self.graph
            .edges_directed(node_index(index), Direction::Outgoing)
            .any(|edge| *edge.weight() == Arc::Basic)
    }

    fn enhanced_edges(&self, index: TokenIndex, direction: Direction) -> Vec<(EdgeIndex, TokenIndex, &str)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node_index(index), direction)
            .filter_map(|edge| match edge.weight() {
                Arc::Enhanced(label) => {
                    let other = match direction {
                        Direction::Outgoing => edge.target(),
                        Direction::Incoming => edge.source(),
                    };
                    Some((edge.id(), token_index(other), label.as_str()))
                }
                Arc::Basic => None,
            })
            .collect();
        // Edge ids grow with insertion
        edges.sort_unstable_by_key(|(id, _, _)| *id);
        edges
    }

    /// Enhanced dependents of `index` in file order. With `only_non_basic`
    /// the dependents that are also basic children of `index` are dropped.
    pub fn enhanced_children(&self, index: TokenIndex, only_non_basic: bool) -> Vec<(TokenIndex, &str)> {
        let basic = if only_non_basic { self.children(index) } else { Vec::new() };
        self.enhanced_edges(index, Direction::Outgoing)
            .into_iter()
            .filter(|(_, dependent, _)| !basic.contains(dependent))
            .map(|(_, dependent, label)| (dependent, label))
            .collect()
    }

    /// Enhanced heads of `index` in file order.
    pub fn enhanced_heads(&self, index: TokenIndex) -> Vec<(TokenIndex, &str)> {
        self.enhanced_edges(index, Direction::Incoming)
            .into_iter()
            .map(|(_, head, label)| (head, label))
            .collect()
    }

    pub fn add_enhanced(&mut self, head: TokenIndex, dependent: TokenIndex, label: impl Into<String>) {
        self.graph
            .add_edge(node_index(head), node_index(dependent), Arc::Enhanced(label.into()));
    }

    /// The enhanced-only dependent of `index` that it shares as a core
    /// argument: `nsubj:xsubj` first, then `nsubj`, `obj` and `iobj`
    /// (subtypes ignored).
    pub fn core_enhanced_dependent(&self, index: TokenIndex) -> Option<TokenIndex> {
        let candidates = self.enhanced_children(index, true);

        if let Some((dependent, _)) = candidates.iter().find(|(_, label)| *label == "nsubj:xsubj") {
            return Some(*dependent);
        }
        CORE_ENHANCED.iter().find_map(|core| {
            candidates
                .iter()
                .find(|(_, label)| label.split(':').next() == Some(*core))
                .map(|(dependent, _)| *dependent)
        })
    }

    /// `index` and every token below it in the basic tree.
    pub fn subtree(&self, index: TokenIndex) -> Vec<TokenIndex> {
        let mut found = vec![index];
        let mut cursor = 0;
        while cursor < found.len() {
            let next = self.children(found[cursor]);
            found.extend(next);
            cursor += 1;
        }
        found.sort_unstable();
        found
    }
}
