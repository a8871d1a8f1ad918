use std::collections::BTreeMap;
use std::fmt;

use crate::corpus::ConvertedSentence;

/// Counts of `(word, category)` pairs over exported sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: BTreeMap<(String, String), usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str, category: &str) {
        *self
            .entries
            .entry((word.to_string(), category.to_string()))
            .or_insert(0) += 1;
    }

    /// Adds every leaf of `sentence`; a leaf without a category counts as `?`.
    pub fn add_sentence(&mut self, sentence: &ConvertedSentence) {
        let categories = sentence.rendered_categories();
        for (leaf, category) in sentence.leaves.iter().zip(&categories) {
            let word = sentence.tree.form(sentence.token_index(*leaf));
            self.add(word, category);
        }
    }

    pub fn count(&self, word: &str, category: &str) -> usize {
        self.entries
            .get(&(word.to_string(), category.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by word, then category.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.entries
            .iter()
            .map(|((word, category), count)| (word.as_str(), category.as_str(), *count))
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (word, category, count) in self.iter() {
            writeln!(f, "{:<15}\t{:>50}\t\t{}", word, category, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::corpus::{ConversionOptions, Converter};
    use crate::obliqueness::ObliquenessTable;
    use ud2ccg_protocol::{SentenceRecord, TokenRecord, UniversalPos};

    #[test]
    fn test_counts_and_order() {
        let mut lexicon = Lexicon::new();
        lexicon.add("dogs", "NP");
        lexicon.add("bark", "S\\NP");
        lexicon.add("dogs", "NP");
        lexicon.add("bark", "(S\\NP)/NP");

        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.count("dogs", "NP"), 2);
        assert_eq!(lexicon.count("cats", "NP"), 0);

        let order: Vec<(&str, &str)> = lexicon.iter().map(|(w, c, _)| (w, c)).collect();
        assert_eq!(order, vec![("bark", "(S\\NP)/NP"), ("bark", "S\\NP"), ("dogs", "NP")]);
    }

    #[test]
    fn test_line_format() {
        let mut lexicon = Lexicon::new();
        lexicon.add("dogs", "NP");

        let text = lexicon.to_string();
        let expected = format!("dogs{}\t{}NP\t\t1\n", " ".repeat(11), " ".repeat(48));
        assert_eq!(text, expected);
    }

    #[test]
    fn test_collects_converted_leaves() {
        let sentences: Vec<SentenceRecord> = ["a", "b"]
            .iter()
            .map(|id| SentenceRecord {
                sent_id: id.to_string(),
                text: None,
                tokens: vec![
                    TokenRecord::basic(1, "Dogs", UniversalPos::Noun, 2, "nsubj"),
                    TokenRecord::basic(2, "bark", UniversalPos::Verb, 0, "root"),
                ],
            })
            .collect();
        let conversion = Converter::new(ObliquenessTable::default(), ConversionOptions::default())
            .convert(&sentences, &HashMap::new());

        let mut lexicon = Lexicon::new();
        for sentence in &conversion.sentences {
            lexicon.add_sentence(sentence);
        }
        assert_eq!(lexicon.count("Dogs", "NP"), 2);
        assert_eq!(lexicon.count("bark", "S\\NP"), 2);
    }
}
