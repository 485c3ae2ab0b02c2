//! Combination pipeline: expand rotated variants of a corpus, sample a few,
//! thin them out, and splice them into one level without cell collisions.
pub mod config;
pub mod events;
pub mod runner;

/// Name of the accumulator level; ends up as the saved file's description.
pub const ACCUMULATOR_NAME: &str = "Combination of everything";
