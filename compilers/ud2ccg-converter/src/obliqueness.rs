use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Built-in hierarchy: lower priorities attach to their head first, so
/// they end up innermost in the binary tree.
const DEFAULT_HIERARCHY: &[(&str, u32)] = &[
    ("fixed", 1),
    ("flat", 1),
    ("compound", 1),
    ("goeswith", 1),
    ("reparandum", 1),
    ("list", 1),
    ("case", 2),
    ("det", 2),
    ("clf", 2),
    ("nummod", 2),
    ("amod", 2),
    ("nmod", 3),
    ("appos", 3),
    ("acl", 3),
    ("acl:relcl", 3),
    ("iobj", 4),
    ("obj", 5),
    ("xcomp", 6),
    ("ccomp", 6),
    ("obl-ap", 6),
    ("scop", 6),
    ("cop", 7),
    ("aux", 8),
    ("mark", 8),
    ("obl", 9),
    ("advmod", 9),
    ("advcl", 9),
    ("advcl:relcl", 9),
    ("expl", 9),
    ("dep", 9),
    ("discourse", 9),
    ("vocative", 9),
    ("dislocated", 9),
    ("nsubj", 10),
    ("csubj", 10),
    ("parataxis", 11),
    ("punct", 11),
    ("punct2", 11),
    ("cc", 12),
    ("conj", 13),
    ("conj-sent", 13),
    ("root", 14),
];

/// One entry of the JSON form: `{"name": "nsubj", "priority": 10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObliquenessEntry {
    pub name: String,
    pub priority: u32,
}

/// Relation label to attachment priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObliquenessTable {
    priorities: HashMap<String, u32>,
    fallback: u32,
}

impl ObliquenessTable {
    pub fn from_entries(entries: impl IntoIterator<Item = ObliquenessEntry>) -> Result<Self, ConvertError> {
        let priorities: HashMap<String, u32> = entries
            .into_iter()
            .map(|entry| (entry.name, entry.priority))
            .collect();
        let fallback = priorities
            .values()
            .copied()
            .max()
            .ok_or(ConvertError::EmptyObliqueness)?;
        Ok(Self { priorities, fallback })
    }

    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        let entries: Vec<ObliquenessEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConvertError::io(path, source))?;
        Self::from_json(&json)
    }

    /// Priority of `label`. Unlisted `ref-x` labels rank like `x`; anything
    /// else unlisted attaches last.
    pub fn priority(&self, label: &str) -> u32 {
        self.priorities
            .get(label)
            .or_else(|| label.strip_prefix("ref-").and_then(|base| self.priorities.get(base)))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn entries(&self) -> Vec<ObliquenessEntry> {
        let mut entries: Vec<ObliquenessEntry> = self
            .priorities
            .iter()
            .map(|(name, priority)| ObliquenessEntry { name: name.clone(), priority: *priority })
            .collect();
        entries.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        entries
    }
}

impl Default for ObliquenessTable {
    fn default() -> Self {
        let priorities: HashMap<String, u32> = DEFAULT_HIERARCHY
            .iter()
            .map(|(name, priority)| (name.to_string(), *priority))
            .collect();
        let fallback = DEFAULT_HIERARCHY.iter().map(|(_, p)| *p).max().unwrap_or(0);
        Self { priorities, fallback }
    }
}
