//! CCGbank `.auto` rendering of a converted sentence.

use std::fmt::{self, Write};

use petgraph::stable_graph::NodeIndex;
use ud2ccg_category::CatId;

use crate::corpus::ConvertedSentence;

/// `ID=<sent_id> PARSER=GOLD NUMPARSE=1`, then the derivation on one line.
pub fn write_derivation(out: &mut impl Write, sentence: &ConvertedSentence) -> fmt::Result {
    writeln!(out, "ID={} PARSER=GOLD NUMPARSE=1", sentence.sent_id)?;
    if let Some(root) = sentence.btree.root() {
        write_node(out, sentence, root, true)?;
    }
    writeln!(out)
}

/// The bracketed derivation without the header line.
pub fn to_auto(sentence: &ConvertedSentence) -> String {
    let mut out = String::new();
    if let Some(root) = sentence.btree.root() {
        // Writing into a String cannot fail
        let _ = write_node(&mut out, sentence, root, true);
    }
    out
}

fn plain(sentence: &ConvertedSentence, category: Option<CatId>) -> String {
    category
        .map(|category| sentence.store.render(category))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| "?".to_string())
}

fn indexed(sentence: &ConvertedSentence, category: Option<CatId>) -> String {
    category
        .map(|category| sentence.store.render_indexed(category))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| "?".to_string())
}

fn write_node(out: &mut impl Write, sentence: &ConvertedSentence, node: NodeIndex, expand_tc: bool) -> fmt::Result {
    let btree = &sentence.btree;
    let data = btree.node(node);

    // A type-changed phrase: unary node over the phrase with its own category
    if expand_tc {
        if let Some(changed) = data.category_tc {
            write!(out, "(<T {} 0 1> ", plain(sentence, Some(changed)))?;
            write_node(out, sentence, node, false)?;
            return write!(out, " )");
        }
    }

    let category = plain(sentence, data.category);
    let children = btree.children(node);
    match children.as_slice() {
        [] => {
            let index = data.index();
            let pos = sentence.tree.upos(index).as_str();
            let word = sentence.tree.form(index).trim().replace(' ', "_");
            write!(
                out,
                "(<L {} {} {} {} {}>)",
                category,
                pos,
                pos,
                word,
                indexed(sentence, data.category)
            )
        }
        [only] => {
            write!(out, "(<T {} 0 1> ", category)?;
            write_node(out, sentence, *only, true)?;
            write!(out, " )")
        }
        [left, right, ..] => {
            let head = if btree.accumulator(node) == Some(*right) { 1 } else { 0 };
            write!(out, "(<T {} {} 2> ", category, head)?;
            write_node(out, sentence, *left, true)?;
            write!(out, " ")?;
            write_node(out, sentence, *right, true)?;
            write!(out, " )")
        }
    }
}
