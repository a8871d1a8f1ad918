//! Label-rewriting passes run on a tree before binarization.

pub mod adpositional;
pub mod coordination;
pub mod relative;

use ud2ccg_protocol::PredicateArguments;

use crate::tree::DependencyTree;

/// How many labels each pass rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessSummary {
    pub adpositional: usize,
    pub coordination: usize,
    pub relative: usize,
}

/// Runs every pass in order. Adpositional phrases are only detected when
/// the sentence has a semantic-role annotation.
pub fn preprocess(tree: &mut DependencyTree, arguments: Option<&[PredicateArguments]>) -> PreprocessSummary {
    let adpositional = match arguments {
        Some(arguments) => adpositional::mark_argument_phrases(tree, arguments),
        None => 0,
    };
    let coordination = coordination::mark_clausal_conjuncts(tree);
    let relative = relative::mark_relative_pronouns(tree);

    PreprocessSummary { adpositional, coordination, relative }
}
