//! Compact sets of `u32` indices stored as coalesced closed ranges.
//!
//! Used wherever a large, mostly contiguous index domain (tree indices,
//! sector ids) must be held and combined cheaply.

mod index_set;
mod range;

pub use index_set::IndexSet;
pub use range::NumericRange;
