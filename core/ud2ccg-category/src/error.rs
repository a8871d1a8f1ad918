use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("empty category string")]
    Empty,

    #[error("unexpected input in category {text:?} at byte {offset}")]
    UnexpectedInput { text: String, offset: usize },

    #[error("failed to parse category: {text}")]
    Malformed { text: String },
}
