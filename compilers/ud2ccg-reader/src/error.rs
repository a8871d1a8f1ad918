use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns { line: usize, expected: usize, found: usize },
    #[error("line {line}: malformed {field} `{value}`")]
    MalformedField {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("sentence {sent_id}: token {index} points at unknown head {head}")]
    DanglingHead { sent_id: String, index: usize, head: usize },
}

impl ReadError {
    pub(crate) fn malformed(line: usize, field: &'static str, value: &str) -> Self {
        ReadError::MalformedField { line, field, value: value.to_string() }
    }
}
