use std::collections::HashMap;
use std::path::Path;

use tracing::warn;
use ud2ccg_protocol::{ArgumentHead, ArgumentSpan, PredicateArguments, TokenIndex};

use crate::conllu::{blocks, sentence_id, Line};
use crate::error::ReadError;
use crate::fields::{self, TokenId};
use crate::remap::IndexRemap;

/// Semantic-role annotation of a file, keyed by sentence id.
pub type ArgumentIndex = HashMap<String, Vec<PredicateArguments>>;

const CONLLUP_COLUMNS: usize = 4;

/// One predicate row: `ID PRED ARGHEADS ARGSPANS`. Rows without a
/// predicate yield `None`.
fn predicate_row(line: &Line<'_>, remap: &IndexRemap) -> Result<Option<PredicateArguments>, ReadError> {
    let columns: Vec<&str> = line.text.trim_end().split('\t').collect();
    if columns.len() < CONLLUP_COLUMNS {
        return Err(ReadError::MissingColumns {
            line: line.number,
            expected: CONLLUP_COLUMNS,
            found: columns.len(),
        });
    }

    let index = match fields::token_id(columns[0]) {
        Some(TokenId::Word(index)) => index,
        Some(_) => return Ok(None),
        None => return Err(ReadError::malformed(line.number, "token id", columns[0])),
    };
    if columns[1] == "_" {
        return Ok(None);
    }

    let heads = fields::argument_heads(columns[2])
        .ok_or_else(|| ReadError::malformed(line.number, "argument heads", columns[2]))?
        .into_iter()
        .map(|(label, head)| ArgumentHead {
            label: label.to_string(),
            index: TokenIndex(remap.apply(head)),
        })
        .collect();
    let spans = fields::argument_spans(columns[3])
        .ok_or_else(|| ReadError::malformed(line.number, "argument spans", columns[3]))?
        .into_iter()
        .map(|(label, start, end)| ArgumentSpan {
            label: label.to_string(),
            start: TokenIndex(remap.apply(start)),
            end: TokenIndex(remap.apply(end)),
        })
        .collect();

    Ok(Some(PredicateArguments {
        predicate: TokenIndex(remap.apply(index)),
        heads,
        spans,
    }))
}

/// Parses CoNLL-U Plus argument annotation, renumbering tokens with the
/// remaps produced while reading the matching CoNLL-U file.
pub fn parse_conllup(input: &str, remaps: &HashMap<String, IndexRemap>) -> ArgumentIndex {
    let identity = IndexRemap::new();
    let mut index = ArgumentIndex::new();

    for (ordinal, block) in blocks(input).iter().enumerate() {
        let sent_id = block
            .iter()
            .filter(|line| line.text.starts_with('#'))
            .find_map(|line| sentence_id(line.text))
            .map(str::to_string)
            .unwrap_or_else(|| (ordinal + 1).to_string());
        let remap = remaps.get(&sent_id).unwrap_or(&identity);

        let predicates: Result<Vec<_>, _> = block
            .iter()
            .filter(|line| !line.text.starts_with('#'))
            .filter_map(|line| predicate_row(line, remap).transpose())
            .collect();

        match predicates {
            Ok(predicates) => {
                index.insert(sent_id, predicates);
            }
            Err(err) => warn!(sent_id = %sent_id, error = %err, "skipping unreadable annotation"),
        }
    }

    index
}

pub fn read_conllup(path: &Path, remaps: &HashMap<String, IndexRemap>) -> Result<ArgumentIndex, ReadError> {
    let input = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_conllup(&input, remaps))
}
