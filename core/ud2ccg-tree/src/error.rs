use thiserror::Error;
use ud2ccg_protocol::TokenIndex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("token {found} is out of sequence (expected {expected})")]
    NonContiguous { expected: TokenIndex, found: TokenIndex },
    #[error("token {index} points at missing head {head}")]
    MissingHead { index: TokenIndex, head: TokenIndex },
    #[error("expected exactly one token attached to the root, found {count}")]
    RootCount { count: usize },
    #[error("token {index} is not reachable from the root")]
    Unreachable { index: TokenIndex },
}
