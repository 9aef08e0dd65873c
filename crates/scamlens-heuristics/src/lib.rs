//! Local heuristic spam/phishing scoring.
//!
//! A fixed set of substring and pattern rules accumulates an integer score
//! for a piece of content; no network access, no configuration. The rules
//! and weights are deliberate constants, see [`rules::score`].

pub mod rules;

pub use rules::score;
