//! Readers for the two input formats of the converter: CoNLL-U trees (basic
//! and enhanced dependencies) and the CoNLL-U Plus semantic-role layer.

pub mod conllu;
pub mod conllup;
pub mod error;
pub mod fields;
pub mod remap;

pub use conllu::{parse_conllu, read_conllu, Treebank};
pub use conllup::{parse_conllup, read_conllup, ArgumentIndex};
pub use error::ReadError;
pub use remap::IndexRemap;
