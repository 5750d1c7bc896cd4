//! Daily aggregation and digest composition: per-category tally blocks
//! and the multi-category report handed to delivery.

pub mod aggregate;
pub mod compose;

pub use aggregate::{aggregate, TALLY_MARK};
pub use compose::{compose, DigestOutcome, CLOSING, FALLBACK};
