pub mod error;
pub mod node;
pub mod systems;
pub mod tree;

pub use error::TreeError;
pub use node::{normalize_label, Arc, DependencyNode};
pub use systems::{preprocess, PreprocessSummary};
pub use tree::DependencyTree;

#[cfg(test)]
mod tests {
    use super::*;
    use ud2ccg_protocol::{ArgumentHead, PredicateArguments, SentenceRecord, TokenIndex, TokenRecord, UniversalPos};

    #[test]
    fn test_preprocess_runs_every_pass() {
        // "the man who relies on her sang and Mary danced"
        let sentence = SentenceRecord {
            sent_id: "p".to_string(),
            text: None,
            tokens: vec![
                TokenRecord::basic(1, "the", UniversalPos::Det, 2, "det"),
                TokenRecord::basic(2, "man", UniversalPos::Noun, 7, "nsubj"),
                TokenRecord::basic(3, "who", UniversalPos::Pron, 4, "nsubj").with_enhanced(2, "ref"),
                TokenRecord::basic(4, "relies", UniversalPos::Verb, 2, "acl:relcl"),
                TokenRecord::basic(5, "on", UniversalPos::Adp, 6, "case"),
                TokenRecord::basic(6, "her", UniversalPos::Pron, 4, "obl"),
                TokenRecord::basic(7, "sang", UniversalPos::Verb, 0, "root"),
                TokenRecord::basic(8, "and", UniversalPos::Cconj, 10, "cc"),
                TokenRecord::basic(9, "Mary", UniversalPos::Propn, 10, "nsubj"),
                TokenRecord::basic(10, "danced", UniversalPos::Verb, 7, "conj"),
            ],
        };
        let arguments = vec![PredicateArguments {
            predicate: TokenIndex(4),
            heads: vec![ArgumentHead { label: "ARG1".to_string(), index: TokenIndex(6) }],
            spans: Vec::new(),
        }];

        let mut tree = DependencyTree::from_sentence(&sentence).unwrap();
        let summary = preprocess(&mut tree, Some(&arguments));

        assert_eq!(summary, PreprocessSummary { adpositional: 1, coordination: 1, relative: 1 });
        assert_eq!(tree.label(TokenIndex(6)), "obl-ap");
        assert_eq!(tree.label(TokenIndex(10)), "conj-sent");
        assert_eq!(tree.label(TokenIndex(3)), "ref-nsubj");

        let mut bare = DependencyTree::from_sentence(&sentence).unwrap();
        assert_eq!(preprocess(&mut bare, None).adpositional, 0);
        assert_eq!(bare.label(TokenIndex(6)), "obl");
    }
}
