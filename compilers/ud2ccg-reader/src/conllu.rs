use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::warn;
use ud2ccg_protocol::{EnhancedArc, SentenceRecord, TokenIndex, TokenRecord, UniversalPos};

use crate::error::ReadError;
use crate::fields::{self, TokenId};
use crate::remap::IndexRemap;

/// Forms dropped from a sentence unless they do real syntactic work.
const QUOTATION_MARKS: [&str; 5] = ["\"", "’’", ",,", "''", "”"];

/// Bracket and dash forms whose relation is rewritten to `punct2`.
const PAIRED_PUNCTUATION: &str = "『』「」【】《》〈〉（）〔〕«»()[]{}-–—";

const CONLLU_COLUMNS: usize = 9;

/// A parsed CoNLL-U file.
#[derive(Debug, Default)]
pub struct Treebank {
    pub sentences: Vec<SentenceRecord>,
    /// Index remap of every sentence, keyed by sentence id.
    pub remaps: HashMap<String, IndexRemap>,
    /// Sentences that could not be read.
    pub rejected: Vec<ReadError>,
}

impl Treebank {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// One line of a sentence block, with its 1-based line number.
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Splits a document into blank-line separated blocks.
pub(crate) fn blocks(input: &str) -> Vec<Vec<Line<'_>>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (offset, text) in input.lines().enumerate() {
        if text.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(Line { number: offset + 1, text });
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// `# sent_id = x`: the last whitespace-separated token of the comment.
pub(crate) fn sentence_id(comment: &str) -> Option<&str> {
    if !comment.starts_with("# sent_id") {
        return None;
    }
    comment.split_whitespace().last()
}

struct RawToken<'a> {
    index: usize,
    form: &'a str,
    upos: &'a str,
    feats: &'a str,
    head: usize,
    deprel: &'a str,
    enhanced: Vec<fields::EnhancedEntry<'a>>,
}

fn raw_token<'a>(line: &Line<'a>) -> Result<Option<RawToken<'a>>, ReadError> {
    let columns: Vec<&str> = line.text.trim_end_matches(['\r', '\n']).split('\t').collect();
    if columns.len() < CONLLU_COLUMNS {
        return Err(ReadError::MissingColumns {
            line: line.number,
            expected: CONLLU_COLUMNS,
            found: columns.len(),
        });
    }

    let index = match fields::token_id(columns[0]) {
        Some(TokenId::Word(index)) => index,
        Some(TokenId::Range | TokenId::Empty) => return Ok(None),
        None => return Err(ReadError::malformed(line.number, "token id", columns[0])),
    };
    let head = fields::index(columns[6])
        .ok_or_else(|| ReadError::malformed(line.number, "head", columns[6]))?;
    let enhanced = fields::enhanced(columns[8])
        .ok_or_else(|| ReadError::malformed(line.number, "enhanced dependencies", columns[8]))?;

    Ok(Some(RawToken {
        index,
        form: columns[1],
        upos: columns[3],
        feats: columns[5],
        head,
        deprel: columns[7],
        enhanced,
    }))
}

fn is_removable_quote(token: &RawToken<'_>, heads: &HashSet<usize>) -> bool {
    QUOTATION_MARKS.contains(&token.form)
        && !matches!(token.upos, "NOUN" | "PROPN" | "PRON" | "NUM" | "SYM")
        && token.deprel != "root"
        && !heads.contains(&token.index)
}

/// Reads one sentence block; `ordinal` names sentences without an id.
fn read_sentence(block: &[Line<'_>], ordinal: usize) -> Result<Option<(SentenceRecord, IndexRemap)>, ReadError> {
    let mut sent_id = None;
    let mut text = None;
    let mut raw = Vec::new();

    for line in block {
        if line.text.starts_with('#') {
            if let Some(id) = sentence_id(line.text) {
                sent_id = Some(id.to_string());
            } else if let Some(rest) = line.text.strip_prefix("# text =") {
                text = Some(rest.trim().to_string());
            }
            continue;
        }
        if let Some(token) = raw_token(line)? {
            raw.push(token);
        }
    }
    if raw.is_empty() {
        return Ok(None);
    }
    let sent_id = sent_id.unwrap_or_else(|| ordinal.to_string());

    let heads: HashSet<usize> = raw.iter().map(|token| token.head).collect();
    let mut remap = IndexRemap::new();
    let mut kept = Vec::with_capacity(raw.len());
    let mut removed = 0;
    for token in raw {
        if is_removable_quote(&token, &heads) {
            removed += 1;
            continue;
        }
        remap.insert(token.index, token.index - removed);
        kept.push(token);
    }

    let dangling = |index: usize, head: usize| ReadError::DanglingHead {
        sent_id: sent_id.clone(),
        index,
        head,
    };

    let mut tokens = Vec::with_capacity(kept.len());
    for token in kept {
        let index = remap.apply(token.index);
        let head = remap.get(token.head).ok_or_else(|| dangling(token.index, token.head))?;

        let mut enhanced = Vec::with_capacity(token.enhanced.len());
        for entry in &token.enhanced {
            // Arcs from empty nodes have no place in the tree
            let Some(old_head) = entry.head else { continue };
            let new_head = remap.get(old_head).ok_or_else(|| dangling(token.index, old_head))?;
            enhanced.push(EnhancedArc {
                head: TokenIndex(new_head),
                label: entry.label.to_string(),
            });
        }

        let deprel = if !token.form.is_empty() && PAIRED_PUNCTUATION.contains(token.form) {
            "punct2"
        } else {
            token.deprel
        };

        tokens.push(TokenRecord {
            index: TokenIndex(index),
            form: token.form.to_string(),
            upos: token.upos.parse::<UniversalPos>().unwrap_or(UniversalPos::X),
            feats: token.feats.to_string(),
            head: TokenIndex(head),
            deprel: deprel.to_string(),
            enhanced,
        });
    }

    Ok(Some((SentenceRecord { sent_id, text, tokens }, remap)))
}

/// Parses CoNLL-U text. Malformed sentences are logged and collected in
/// [`Treebank::rejected`]; the rest are returned in file order.
pub fn parse_conllu(input: &str) -> Treebank {
    let mut treebank = Treebank::default();

    for (ordinal, block) in blocks(input).iter().enumerate() {
        match read_sentence(block, ordinal + 1) {
            Ok(Some((sentence, remap))) => {
                treebank.remaps.insert(sentence.sent_id.clone(), remap);
                treebank.sentences.push(sentence);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "skipping unreadable sentence");
                treebank.rejected.push(err);
            }
        }
    }

    treebank
}

pub fn read_conllu(path: &Path) -> Result<Treebank, ReadError> {
    let input = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_conllu(&input))
}
