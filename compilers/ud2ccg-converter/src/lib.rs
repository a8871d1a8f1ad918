//! UD dependency trees to CCG derivations.
//!
//! A sentence is binarized by the obliqueness hierarchy, categories are
//! assigned top-down by label-driven rules, and a corpus-wide pass settles
//! slash directions and leftover placeholders.

pub mod binarize;
pub mod btree;
pub mod corpus;
pub mod crossing;
pub mod derivation;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod obliqueness;
pub mod pas;
pub mod rules;

pub use binarize::{attachment_order, binarize};
pub use btree::{BinaryNode, BinaryTree, ConjunctTag, NodeKind, Role, Side};
pub use corpus::{
    Conversion, ConversionOptions, ConversionStats, ConvertedSentence, Converter, SkipReason, DEFAULT_MAX_HEIGHT,
};
pub use crossing::has_crossing;
pub use derivation::{to_auto, write_derivation};
pub use error::ConvertError;
pub use export::{build_lexicon, export, render_derivations, ExportPaths};
pub use lexicon::Lexicon;
pub use obliqueness::{ObliquenessEntry, ObliquenessTable};
pub use pas::{extract_dependencies, Dependency};
pub use rules::{apply_rules, Rule, RuleContext};
