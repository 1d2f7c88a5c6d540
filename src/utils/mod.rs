//! Generic utility primitives with zero domain knowledge.
//!
//! - `number` - NaN checks, numeric coercion and rendering
//! - `sequence` - Slice membership, head/tail slicing, ranges
//! - `text` - Substring predicates, capitalization, reversal

pub mod number;
pub mod sequence;
pub mod text;
