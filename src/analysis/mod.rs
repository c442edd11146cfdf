//! Presentation-side derivations over fetched analytics data.
//!
//! Everything here is a pure, single-pass function: score-to-band
//! mapping, transcript aggregation, and the synthetic tag rollup.

pub mod interaction;
pub mod scoring;
pub mod tags;

pub use interaction::{InteractionStats, SentimentTally};
pub use scoring::{score_band, Direction, Scheme};
pub use tags::{estimate_rollups, TagRollup};
