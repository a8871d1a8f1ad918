//! nom grammars of the structured CoNLL-U columns.

use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize, rest},
    sequence::{pair, separated_pair},
    IResult,
};

/// Kinds of value found in the ID column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    Word(usize),
    /// `3-4`: multiword token line.
    Range,
    /// `3.1`: empty node.
    Empty,
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

pub fn token_id(input: &str) -> Option<TokenId> {
    let parsed: IResult<&str, TokenId> = all_consuming(alt((
        map(separated_pair(digit1, char('-'), digit1), |_| TokenId::Range),
        map(separated_pair(digit1, char('.'), digit1), |_| TokenId::Empty),
        map(number, TokenId::Word),
    )))(input);
    parsed.ok().map(|(_, id)| id)
}

pub fn index(input: &str) -> Option<usize> {
    all_consuming(number)(input).ok().map(|(_, n)| n)
}

/// Head of one enhanced entry. Empty-node heads (`5.1`) are reported as
/// `None` so the caller can drop the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedEntry<'a> {
    pub head: Option<usize>,
    pub label: &'a str,
}

fn enhanced_entry(input: &str) -> IResult<&str, EnhancedEntry<'_>> {
    map(
        separated_pair(
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            char(':'),
            rest,
        ),
        |(head, label): (&str, &str)| EnhancedEntry { head: head.parse().ok(), label },
    )(input)
}

/// `h:label|h:label`; labels may themselves contain colons. `_` is empty.
pub fn enhanced(column: &str) -> Option<Vec<EnhancedEntry<'_>>> {
    if column == "_" {
        return Some(Vec::new());
    }
    column
        .split('|')
        .map(|entry| all_consuming(enhanced_entry)(entry).ok().map(|(_, e)| e))
        .collect()
}

/// `A0:3|AM-TMP:7`
pub fn argument_heads(column: &str) -> Option<Vec<(&str, usize)>> {
    if column == "_" {
        return Some(Vec::new());
    }
    column
        .split('|')
        .map(|entry| {
            all_consuming(separated_pair(take_till1(|c: char| c == ':'), char(':'), number))(entry)
                .ok()
                .map(|(_, pair)| pair)
        })
        .collect()
}

/// `A0:1-2|A1:4-9`
pub fn argument_spans(column: &str) -> Option<Vec<(&str, usize, usize)>> {
    if column == "_" {
        return Some(Vec::new());
    }
    column
        .split('|')
        .map(|entry| {
            all_consuming(separated_pair(
                take_till1(|c: char| c == ':'),
                char(':'),
                separated_pair(number, char('-'), number),
            ))(entry)
            .ok()
            .map(|(_, (label, (start, end)))| (label, start, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ids() {
        assert_eq!(token_id("12"), Some(TokenId::Word(12)));
        assert_eq!(token_id("3-4"), Some(TokenId::Range));
        assert_eq!(token_id("3.1"), Some(TokenId::Empty));
        assert_eq!(token_id("x"), None);
        assert_eq!(token_id("3a"), None);
    }

    #[test]
    fn test_enhanced_column() {
        let entries = enhanced("2:nsubj|4:nsubj:xsubj|5.1:obj").unwrap();
        assert_eq!(
            entries,
            vec![
                EnhancedEntry { head: Some(2), label: "nsubj" },
                EnhancedEntry { head: Some(4), label: "nsubj:xsubj" },
                EnhancedEntry { head: None, label: "obj" },
            ]
        );
        assert_eq!(enhanced("_"), Some(Vec::new()));
        assert_eq!(enhanced("nsubj"), None);
    }

    #[test]
    fn test_argument_columns() {
        assert_eq!(argument_heads("A0:1|AM-TMP:7"), Some(vec![("A0", 1), ("AM-TMP", 7)]));
        assert_eq!(argument_spans("A1:4-9"), Some(vec![("A1", 4, 9)]));
        assert_eq!(argument_heads("A0"), None);
        assert_eq!(argument_spans("A1:4"), None);
    }
}
