//! Batch aggregation over scored posts.
//!
//! Everything here is a pure function of the scored batch and the user
//! thresholds; the same inputs always produce the same [`AggregateView`].

mod aggregate;
mod text;

pub use aggregate::{aggregate, classify, AggregateView, DailySentiment, Polarity};
pub use text::{extract_hashtags, word_frequencies, HashtagCount, WordCount};
