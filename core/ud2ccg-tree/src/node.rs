use ud2ccg_protocol::{TokenIndex, TokenRecord, UniversalPos};

/// Subtyped relations that keep their full label.
const KEPT_SUBTYPES: [&str; 2] = ["acl:relcl", "advcl:relcl"];

/// `nmod:poss` becomes `nmod`; relative-clause subtypes survive.
pub fn normalize_label(deprel: &str) -> &str {
    if KEPT_SUBTYPES.contains(&deprel) {
        return deprel;
    }
    deprel.split(':').next().unwrap_or(deprel)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub index: TokenIndex,
    pub form: String,
    pub upos: UniversalPos,
    pub pron_type: Option<String>,
    /// Normalized relation label, rewritten by the preprocessors.
    pub label: String,
    /// `None` only for the synthetic root.
    pub head: Option<TokenIndex>,
}

impl DependencyNode {
    pub fn root() -> Self {
        Self {
            index: TokenIndex::ROOT,
            form: "ROOT".to_string(),
            upos: UniversalPos::Root,
            pron_type: None,
            label: String::new(),
            head: None,
        }
    }

    pub fn from_record(record: &TokenRecord) -> Self {
        Self {
            index: record.index,
            form: record.form.clone(),
            upos: record.upos.clone(),
            pron_type: record.feature("PronType").map(str::to_string),
            label: normalize_label(&record.deprel).to_string(),
            head: Some(record.head),
        }
    }

    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }
}

/// Edge weight of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arc {
    /// Primary tree edge; the label lives on the dependent node.
    Basic,
    /// Enhanced edge with its raw label (`nsubj:xsubj`, `ref`, ...).
    Enhanced(String),
}
