//! Two-pass conversion of a whole file of sentences.
//!
//! The first pass converts every sentence on its own and counts the leaves
//! that came out as `S\NP` or `S/NP`. The majority direction then settles
//! every `|` left in the corpus, and unresolved placeholders fall back to
//! `NP`.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::stable_graph::NodeIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use ud2ccg_category::{CatId, CategoryStore, Identity, IdentityAllocator, Slash};
use ud2ccg_protocol::{PredicateArguments, SentenceRecord, TokenIndex};
use ud2ccg_tree::{preprocess, DependencyTree, TreeError};

use crate::binarize::binarize;
use crate::btree::BinaryTree;
use crate::crossing::has_crossing;
use crate::obliqueness::ObliquenessTable;
use crate::rules::{apply_rules, RuleContext};

/// Trees taller than this are left unconverted.
pub const DEFAULT_MAX_HEIGHT: usize = 27;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Convert non-projective sentences instead of skipping them.
    pub convert_crossing: bool,
    /// Withhold sentences that still have an incomplete leaf.
    pub complete_only: bool,
    pub max_height: usize,
    /// Seed of the conjunct tag draws.
    pub seed: u64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            convert_crossing: false,
            complete_only: false,
            max_height: DEFAULT_MAX_HEIGHT,
            seed: 0,
        }
    }
}

/// Why a sentence produced no derivation.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("crossing dependencies")]
    Crossing,
    #[error(transparent)]
    Malformed(#[from] TreeError),
    #[error("binary tree of height {height} exceeds {limit}")]
    TooDeep { height: usize, limit: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub total: usize,
    pub crossing: usize,
    pub malformed: usize,
    pub too_deep: usize,
    pub converted: usize,
    pub complete: usize,
    pub exported: usize,
    /// Leaves rendering exactly `S/NP` after the first pass.
    pub forward: usize,
    /// Leaves rendering exactly `S\NP` after the first pass.
    pub backward: usize,
    pub direction: Option<char>,
}

/// One converted sentence with everything the writers need.
#[derive(Debug)]
pub struct ConvertedSentence {
    pub sent_id: String,
    pub tree: DependencyTree,
    pub btree: BinaryTree,
    pub store: CategoryStore,
    /// Leaf nodes in token order.
    pub leaves: Vec<NodeIndex>,
    pub complete: bool,
}

impl ConvertedSentence {
    pub fn category(&self, leaf: NodeIndex) -> Option<CatId> {
        self.btree.node(leaf).category
    }

    pub fn leaf_categories(&self) -> Vec<Option<CatId>> {
        self.leaves.iter().map(|leaf| self.category(*leaf)).collect()
    }

    /// Leaf categories in plain notation, `?` where none was assigned.
    pub fn rendered_categories(&self) -> Vec<String> {
        self.leaf_categories()
            .into_iter()
            .map(|category| match category {
                Some(category) => self.store.render(category),
                None => "?".to_string(),
            })
            .collect()
    }

    pub fn token_index(&self, leaf: NodeIndex) -> TokenIndex {
        self.btree.node(leaf).index()
    }

    /// Replaces each deferred identity with the identity of the category
    /// at that position. Only fixed identities are substituted, so the
    /// result does not depend on the order leaves are visited in.
    fn resolve_deferred(&mut self) {
        let anchors: HashMap<TokenIndex, Identity> = self
            .leaves
            .iter()
            .filter_map(|leaf| {
                let node = self.btree.node(*leaf);
                let identity = self.store.identity(node.category?);
                matches!(identity, Identity::Fixed(_)).then_some((node.index(), identity))
            })
            .collect();

        for category in self.leaf_categories().into_iter().flatten() {
            self.store
                .resolve_deferred(category, |position| anchors.get(&position).copied());
        }
    }

    fn tally(&self, stats: &mut ConversionStats) {
        for category in self.leaf_categories().into_iter().flatten() {
            match self.store.render(category).as_str() {
                "S\\NP" => stats.backward += 1,
                "S/NP" => stats.forward += 1,
                _ => {}
            }
        }
    }

    /// Second pass: settles `|` and unresolved placeholders, and decides
    /// completeness.
    fn finish(&mut self, direction: Slash) {
        let categories = self.leaf_categories();
        for category in categories.iter().flatten() {
            self.store.apply_default_slash(*category, direction);
            let np = self.store.atom("NP");
            self.store.apply_default_category(*category, np);
        }
        self.complete = categories
            .iter()
            .all(|category| category.is_some_and(|category| self.store.is_complete(category)));
    }
}

#[derive(Debug, Default)]
pub struct Conversion {
    /// Sentences to export, in input order.
    pub sentences: Vec<ConvertedSentence>,
    pub stats: ConversionStats,
}

pub struct Converter {
    table: ObliquenessTable,
    options: ConversionOptions,
    ids: Arc<IdentityAllocator>,
}

impl Converter {
    pub fn new(table: ObliquenessTable, options: ConversionOptions) -> Self {
        Self {
            table,
            options,
            ids: Arc::new(IdentityAllocator::new()),
        }
    }

    /// Shares identity numbering with other converters of the same run.
    pub fn with_allocator(mut self, ids: Arc<IdentityAllocator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn table(&self) -> &ObliquenessTable {
        &self.table
    }

    /// First pass for one sentence: everything up to deferred identity
    /// resolution. Directions and fallbacks are left for [`Converter::convert`].
    pub fn convert_sentence(
        &self,
        sentence: &SentenceRecord,
        arguments: Option<&[PredicateArguments]>,
        rng: &mut StdRng,
    ) -> Result<ConvertedSentence, SkipReason> {
        if !self.options.convert_crossing && has_crossing(sentence) {
            return Err(SkipReason::Crossing);
        }

        let mut tree = DependencyTree::from_sentence(sentence)?;
        preprocess(&mut tree, arguments);

        let mut btree = binarize(&tree, &self.table);
        let height = btree.height();
        if height > self.options.max_height {
            return Err(SkipReason::TooDeep {
                height,
                limit: self.options.max_height,
            });
        }

        let mut store = CategoryStore::new(Arc::clone(&self.ids));
        let mut ctx = RuleContext {
            tree: &tree,
            btree: &mut btree,
            store: &mut store,
            rng,
        };
        apply_rules(&mut ctx);
        btree.strip_root_wrapper();

        let leaves = btree.leaves();
        let mut converted = ConvertedSentence {
            sent_id: sentence.sent_id.clone(),
            tree,
            btree,
            store,
            leaves,
            complete: false,
        };
        converted.resolve_deferred();
        Ok(converted)
    }

    /// Converts a file's worth of sentences. `arguments` holds the
    /// semantic-role annotation by sentence id, if there is any.
    pub fn convert(
        &self,
        sentences: &[SentenceRecord],
        arguments: &HashMap<String, Vec<PredicateArguments>>,
    ) -> Conversion {
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut stats = ConversionStats {
            total: sentences.len(),
            ..ConversionStats::default()
        };

        let mut converted = Vec::new();
        for sentence in sentences {
            let annotation = arguments.get(&sentence.sent_id).map(Vec::as_slice);
            match self.convert_sentence(sentence, annotation, &mut rng) {
                Ok(sentence) => {
                    sentence.tally(&mut stats);
                    converted.push(sentence);
                }
                Err(reason) => {
                    match reason {
                        SkipReason::Crossing => stats.crossing += 1,
                        SkipReason::Malformed(_) => stats.malformed += 1,
                        SkipReason::TooDeep { .. } => stats.too_deep += 1,
                    }
                    debug!(sent_id = %sentence.sent_id, %reason, "skipped sentence");
                }
            }
        }
        stats.converted = converted.len();

        let direction = if stats.forward > stats.backward {
            Slash::Forward
        } else {
            Slash::Backward
        };
        stats.direction = Some(direction.as_char());

        for sentence in &mut converted {
            sentence.finish(direction);
        }
        stats.complete = converted.iter().filter(|sentence| sentence.complete).count();
        if self.options.complete_only {
            converted.retain(|sentence| sentence.complete);
        }
        stats.exported = converted.len();

        info!(
            total = stats.total,
            crossing = stats.crossing,
            too_deep = stats.too_deep,
            converted = stats.converted,
            complete = stats.complete,
            forward = stats.forward,
            backward = stats.backward,
            direction = %direction.as_char(),
            "converted sentences"
        );

        Conversion {
            sentences: converted,
            stats,
        }
    }
}
