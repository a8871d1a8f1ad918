use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, one_of},
    combinator::{map, opt},
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::error::CategoryError;
use crate::store::{CatId, CategoryStore, Feature, Slash};

#[derive(Debug, Clone, PartialEq)]
enum Lexeme<'a> {
    Open,
    Close,
    Slash(Slash),
    Atom { base: &'a str, feature: Option<&'a str> },
}

fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '<' | '>' | '[' | ']' | '/' | '\\' | '|')
}

fn lexeme(input: &str) -> IResult<&str, Lexeme<'_>> {
    preceded(
        multispace0,
        alt((
            map(one_of("(<"), |_| Lexeme::Open),
            map(one_of(")>"), |_| Lexeme::Close),
            map(one_of("/\\|"), |c| {
                Lexeme::Slash(match c {
                    '/' => Slash::Forward,
                    '\\' => Slash::Backward,
                    _ => Slash::Either,
                })
            }),
            map(
                pair(
                    take_while1(is_atom_char),
                    opt(delimited(char('['), take_while1(|c| c != ']'), char(']'))),
                ),
                |(base, feature)| Lexeme::Atom { base, feature },
            ),
        )),
    )(input)
}

enum Item {
    Open,
    Cat(CatId),
    Slash(Slash),
}

/// Parses the linear notation (`(S\NP)/NP`, `S[dcl]`, `S|NP`) into fresh
/// cells of `store`.
///
/// Shift-reduce: brackets, atoms and slashes are shifted, a closing bracket
/// reduces the top `x slash y` (or a lone category) down to its opening
/// bracket, and whatever remains at the end must be a single category or
/// one final `x slash y`.
pub fn parse(store: &mut CategoryStore, text: &str) -> Result<CatId, CategoryError> {
    let malformed = || CategoryError::Malformed { text: text.to_string() };

    let mut stack: Vec<Item> = Vec::new();
    let mut input = text;

    loop {
        let (rest, _) = multispace0::<&str, nom::error::Error<&str>>(input)
            .map_err(|_| malformed())?;
        if rest.is_empty() {
            break;
        }

        let (rest, lexeme) = lexeme(rest).map_err(|_| CategoryError::UnexpectedInput {
            text: text.to_string(),
            offset: text.len() - rest.len(),
        })?;
        input = rest;

        match lexeme {
            Lexeme::Open => stack.push(Item::Open),
            Lexeme::Atom { base, feature } => {
                let feature = feature.map(Feature::new).unwrap_or_default();
                stack.push(Item::Cat(store.atom_with_feature(base, feature)));
            }
            Lexeme::Slash(slash) => stack.push(Item::Slash(slash)),
            Lexeme::Close => {
                let Some(Item::Cat(y)) = stack.pop() else {
                    return Err(malformed());
                };
                let inner = if matches!(stack.last(), Some(Item::Open)) {
                    // "(NP)": parentheses around a complete category
                    y
                } else {
                    reduce(store, &mut stack, y).ok_or_else(malformed)?
                };
                let Some(Item::Open) = stack.pop() else {
                    return Err(malformed());
                };
                stack.push(Item::Cat(inner));
            }
        }
    }

    let result = match stack.pop() {
        None => return Err(CategoryError::Empty),
        Some(Item::Cat(y)) if stack.is_empty() => y,
        Some(Item::Cat(y)) => reduce(store, &mut stack, y).ok_or_else(malformed)?,
        Some(_) => return Err(malformed()),
    };
    if stack.is_empty() {
        Ok(result)
    } else {
        Err(malformed())
    }
}

fn reduce(store: &mut CategoryStore, stack: &mut Vec<Item>, right: CatId) -> Option<CatId> {
    let Item::Slash(slash) = stack.pop()? else {
        return None;
    };
    let Item::Cat(left) = stack.pop()? else {
        return None;
    };
    Some(store.functor(left, slash, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CategoryKind;

    #[test]
    fn test_parse_nested_functor() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "(S\\NP)/NP").unwrap();

        assert_eq!(store.slash(cat), Some(Slash::Forward));
        let left = store.left(cat).unwrap();
        assert_eq!(store.slash(left), Some(Slash::Backward));
        assert_eq!(store.render(cat), "(S\\NP)/NP");
    }

    #[test]
    fn test_parse_feature_and_undirected_slash() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "S[dcl]|NP[nb]").unwrap();

        assert_eq!(store.slash(cat), Some(Slash::Either));
        match store.kind(store.left(cat).unwrap()) {
            CategoryKind::Atom { base, feature } => {
                assert_eq!(base, "S");
                assert_eq!(feature.as_str(), Some("dcl"));
            }
            other => panic!("expected atom, got {:?}", other),
        }
        assert_eq!(store.render(cat), "S[dcl]|NP[nb]");
    }

    #[test]
    fn test_parse_punctuation_atoms() {
        let mut store = CategoryStore::standalone();
        for text in [",", ".", ";", ":", "conj", "ROOT"] {
            let cat = parse(&mut store, text).unwrap();
            assert_eq!(store.render(cat), text);
        }
    }

    #[test]
    fn test_parse_redundant_parentheses() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "(NP)").unwrap();
        assert_eq!(store.render(cat), "NP");

        let cat = parse(&mut store, "(S)/((NP)\\(N))").unwrap();
        assert_eq!(store.render(cat), "S/(NP\\N)");
    }

    #[test]
    fn test_parse_failures() {
        let mut store = CategoryStore::standalone();
        assert_eq!(parse(&mut store, "   "), Err(CategoryError::Empty));
        assert!(matches!(parse(&mut store, "S/"), Err(CategoryError::Malformed { .. })));
        assert!(matches!(parse(&mut store, "S/NP/NP"), Err(CategoryError::Malformed { .. })));
        assert!(matches!(parse(&mut store, "NP[nb"), Err(CategoryError::UnexpectedInput { .. })));
        assert!(matches!(parse(&mut store, "(S\\NP"), Err(CategoryError::Malformed { .. })));
        assert!(matches!(parse(&mut store, "S\\NP)"), Err(CategoryError::Malformed { .. })));
    }

    #[test]
    fn test_every_parsed_cell_gets_its_own_identity() {
        let mut store = CategoryStore::standalone();
        let cat = parse(&mut store, "S|NP").unwrap();
        let left = store.left(cat).unwrap();
        let right = store.right(cat).unwrap();

        assert_ne!(store.identity(cat), store.identity(left));
        assert_ne!(store.identity(left), store.identity(right));
    }
}
