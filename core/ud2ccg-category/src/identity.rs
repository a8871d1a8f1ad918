use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use ud2ccg_protocol::{define_id, TokenIndex};

define_id!(
    /// Number of an unresolved placeholder, rendered as `X_n`.
    VariableId,
    u32
);

/// Coindexation handle of a category cell.
///
/// Two cells with equal identities denote the same referent even when their
/// categories differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Fixed(u64),
    /// Same referent as whatever category ends up on the leaf at this position.
    Deferred(TokenIndex),
}

impl Identity {
    pub fn is_deferred(self) -> bool {
        matches!(self, Identity::Deferred(_))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Fixed(n) => write!(f, "{}", n),
            Identity::Deferred(position) => write!(f, "{}:t", position),
        }
    }
}

/// Hands out identity and placeholder numbers.
///
/// Both counters only ever grow. One allocator may be shared by every
/// sentence of a run (including across threads); numbers are only compared
/// inside one sentence, so sharing affects readability of debug output only.
#[derive(Debug)]
pub struct IdentityAllocator {
    next_identity: AtomicU64,
    next_variable: AtomicU32,
}

impl IdentityAllocator {
    pub const FIRST_IDENTITY: u64 = 100;

    pub fn new() -> Self {
        Self {
            next_identity: AtomicU64::new(Self::FIRST_IDENTITY),
            next_variable: AtomicU32::new(0),
        }
    }

    pub fn fresh_identity(&self) -> Identity {
        Identity::Fixed(self.next_identity.fetch_add(1, Ordering::Relaxed))
    }

    pub fn fresh_variable(&self) -> VariableId {
        VariableId(self.next_variable.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
