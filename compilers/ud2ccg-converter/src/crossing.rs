use ud2ccg_protocol::SentenceRecord;

/// Spans `(low, high)` of every basic arc, the root arc included.
pub fn arc_spans(sentence: &SentenceRecord) -> Vec<(usize, usize)> {
    sentence
        .tokens
        .iter()
        .map(|token| {
            let (index, head) = (token.index.0, token.head.0);
            (index.min(head), index.max(head))
        })
        .collect()
}

/// Two spans cross when neither contains the other and they overlap.
pub fn spans_cross(a: (usize, usize), b: (usize, usize)) -> bool {
    let contains = |outer: (usize, usize), inner: (usize, usize)| outer.0 <= inner.0 && inner.1 <= outer.1;
    if contains(a, b) || contains(b, a) {
        return false;
    }
    a.0.max(b.0) < a.1.min(b.1)
}

pub fn any_crossing(spans: &[(usize, usize)]) -> bool {
    spans
        .iter()
        .enumerate()
        .any(|(i, a)| spans[i + 1..].iter().any(|b| spans_cross(*a, *b)))
}

/// Non-projective sentences cannot be binarized into a derivation that
/// respects surface order.
pub fn has_crossing(sentence: &SentenceRecord) -> bool {
    any_crossing(&arc_spans(sentence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ud2ccg_protocol::{TokenRecord, UniversalPos};

    fn span() -> impl Strategy<Value = (usize, usize)> {
        (0usize..20, 1usize..10).prop_map(|(start, width)| (start, start + width))
    }

    proptest! {
        #[test]
        fn prop_crossing_is_symmetric(a in span(), b in span()) {
            prop_assert_eq!(spans_cross(a, b), spans_cross(b, a));
        }

        #[test]
        fn prop_nested_spans_never_cross(outer in span(), shrink in 0usize..5) {
            let inner = (outer.0 + shrink.min(outer.1 - outer.0), outer.1);
            prop_assert!(!spans_cross(outer, inner));
        }
    }

    #[test]
    fn test_span_pairs() {
        assert!(any_crossing(&[(1, 4), (2, 5)]));
        assert!(!any_crossing(&[(1, 4), (2, 3)]));
        assert!(!any_crossing(&[(1, 2), (3, 4)]));
        // Shared endpoint is not an overlap
        assert!(!any_crossing(&[(1, 3), (3, 5)]));
    }

    #[test]
    fn test_sentence_with_root_arc() {
        // 1 <- 3 crosses the root arc 0 -> 2
        let sentence = SentenceRecord {
            sent_id: "x".to_string(),
            text: None,
            tokens: vec![
                TokenRecord::basic(1, "a", UniversalPos::Noun, 3, "nsubj"),
                TokenRecord::basic(2, "b", UniversalPos::Verb, 0, "root"),
                TokenRecord::basic(3, "c", UniversalPos::Noun, 2, "obj"),
            ],
        };
        assert!(has_crossing(&sentence));

        let projective = SentenceRecord {
            tokens: vec![
                TokenRecord::basic(1, "a", UniversalPos::Noun, 2, "nsubj"),
                TokenRecord::basic(2, "b", UniversalPos::Verb, 0, "root"),
                TokenRecord::basic(3, "c", UniversalPos::Noun, 2, "obj"),
            ],
            ..sentence
        };
        assert!(!has_crossing(&projective));
    }
}
