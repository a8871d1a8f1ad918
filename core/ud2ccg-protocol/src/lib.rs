#![no_std] // Records are plain data; the core never needs the OS

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod pos;
pub mod model;

pub use ids::TokenIndex;
pub use pos::UniversalPos;
pub use model::*;
