use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::ids::TokenIndex;
use crate::pos::UniversalPos;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One `head:label` entry of the enhanced-dependencies column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct EnhancedArc {
    pub head: TokenIndex,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TokenRecord {
    pub index: TokenIndex,
    pub form: String,
    pub upos: UniversalPos,
    /// Raw FEATS column (`_` when empty).
    pub feats: String,
    pub head: TokenIndex,
    /// Raw DEPREL column, subtype included.
    pub deprel: String,
    pub enhanced: Vec<EnhancedArc>,
}

impl TokenRecord {
    /// A token with no features and no enhanced arcs.
    pub fn basic(index: usize, form: &str, upos: UniversalPos, head: usize, deprel: &str) -> Self {
        Self {
            index: TokenIndex(index),
            form: form.to_string(),
            upos,
            feats: "_".to_string(),
            head: TokenIndex(head),
            deprel: deprel.to_string(),
            enhanced: Vec::new(),
        }
    }

    /// Value of one `Name=Value` entry of the FEATS column.
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.feats
            .split('|')
            .filter_map(|entry| entry.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn with_enhanced(mut self, head: usize, label: &str) -> Self {
        self.enhanced.push(EnhancedArc {
            head: TokenIndex(head),
            label: label.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SentenceRecord {
    pub sent_id: String,
    pub text: Option<String>,
    pub tokens: Vec<TokenRecord>,
}

impl SentenceRecord {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: TokenIndex) -> Option<&TokenRecord> {
        self.tokens.iter().find(|t| t.index == index)
    }
}

/// `label:index` entry of a predicate's argument-head column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ArgumentHead {
    pub label: String,
    pub index: TokenIndex,
}

/// `label:start-end` entry of a predicate's argument-span column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ArgumentSpan {
    pub label: String,
    pub start: TokenIndex,
    pub end: TokenIndex,
}

/// Semantic-role annotation of one predicate token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct PredicateArguments {
    pub predicate: TokenIndex,
    pub heads: Vec<ArgumentHead>,
    pub spans: Vec<ArgumentSpan>,
}

impl ArgumentHead {
    /// Core proto-roles: `A0`..`A4` and `ARG0`..`ARG4`.
    pub fn is_core(&self) -> bool {
        let number = self
            .label
            .strip_prefix("ARG")
            .or_else(|| self.label.strip_prefix('A'));
        matches!(number, Some("0" | "1" | "2" | "3" | "4"))
    }
}
