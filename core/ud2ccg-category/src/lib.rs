//! CCG category algebra.
//!
//! Categories live in a per-sentence [`CategoryStore`] arena and are passed
//! around as [`CatId`] handles. A placeholder handle held by several tree
//! positions is resolved once, in place, and every holder sees the result.

pub mod error;
pub mod identity;
pub mod ops;
pub mod parse;
pub mod render;
pub mod store;

pub use error::CategoryError;
pub use identity::{Identity, IdentityAllocator, VariableId};
pub use parse::parse;
pub use render::Rendered;
pub use store::{CatId, CategoryKind, CategoryStore, Feature, Slash};
