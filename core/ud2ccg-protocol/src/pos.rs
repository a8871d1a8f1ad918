use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Universal part-of-speech tag (UPOS column of CoNLL-U).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum UniversalPos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    /// Tag of the synthetic root node.
    Root,
    /// Anything a treebank uses outside the universal inventory.
    Other(String),
}

impl UniversalPos {
    /// Heads that count as a bare nominal when deciding `NP` vs. a clause.
    pub fn is_nominal(&self) -> bool {
        matches!(
            self,
            UniversalPos::Noun
                | UniversalPos::Pron
                | UniversalPos::Propn
                | UniversalPos::Num
                | UniversalPos::Sym
        )
    }

    /// Tokens that receive `NP` lexically, regardless of their relation.
    pub fn is_noun_phrase_tag(&self) -> bool {
        self.is_nominal() || *self == UniversalPos::X
    }

    /// Tokens that receive `NP` only while filling a nominal slot.
    pub fn is_nominalizable(&self) -> bool {
        matches!(self, UniversalPos::Det | UniversalPos::Adj | UniversalPos::Adv)
    }

    pub fn as_str(&self) -> &str {
        match self {
            UniversalPos::Adj => "ADJ",
            UniversalPos::Adp => "ADP",
            UniversalPos::Adv => "ADV",
            UniversalPos::Aux => "AUX",
            UniversalPos::Cconj => "CCONJ",
            UniversalPos::Det => "DET",
            UniversalPos::Intj => "INTJ",
            UniversalPos::Noun => "NOUN",
            UniversalPos::Num => "NUM",
            UniversalPos::Part => "PART",
            UniversalPos::Pron => "PRON",
            UniversalPos::Propn => "PROPN",
            UniversalPos::Punct => "PUNCT",
            UniversalPos::Sconj => "SCONJ",
            UniversalPos::Sym => "SYM",
            UniversalPos::Verb => "VERB",
            UniversalPos::X => "X",
            UniversalPos::Root => "ROOT",
            UniversalPos::Other(tag) => tag.as_str(),
        }
    }
}

impl FromStr for UniversalPos {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ADJ" => UniversalPos::Adj,
            "ADP" => UniversalPos::Adp,
            "ADV" => UniversalPos::Adv,
            "AUX" => UniversalPos::Aux,
            "CCONJ" => UniversalPos::Cconj,
            "DET" => UniversalPos::Det,
            "INTJ" => UniversalPos::Intj,
            "NOUN" => UniversalPos::Noun,
            "NUM" => UniversalPos::Num,
            "PART" => UniversalPos::Part,
            "PRON" => UniversalPos::Pron,
            "PROPN" => UniversalPos::Propn,
            "PUNCT" => UniversalPos::Punct,
            "SCONJ" => UniversalPos::Sconj,
            "SYM" => UniversalPos::Sym,
            "VERB" => UniversalPos::Verb,
            "X" => UniversalPos::X,
            "ROOT" => UniversalPos::Root,
            other => UniversalPos::Other(other.to_string()),
        })
    }
}

impl fmt::Display for UniversalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
