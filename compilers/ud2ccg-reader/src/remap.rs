use std::collections::HashMap;

/// Old-to-new token positions of one sentence after quotation-mark tokens
/// were dropped. The root always maps to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRemap {
    positions: HashMap<usize, usize>,
}

impl IndexRemap {
    pub fn new() -> Self {
        let mut positions = HashMap::new();
        positions.insert(0, 0);
        Self { positions }
    }

    pub fn insert(&mut self, old: usize, new: usize) {
        self.positions.insert(old, new);
    }

    pub fn get(&self, old: usize) -> Option<usize> {
        self.positions.get(&old).copied()
    }

    /// The new position of `old`, or `old` itself when it was never mapped.
    pub fn apply(&self, old: usize) -> usize {
        self.get(old).unwrap_or(old)
    }
}

impl Default for IndexRemap {
    fn default() -> Self {
        Self::new()
    }
}
