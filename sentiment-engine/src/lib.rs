//! Sentiment polarity scoring for post text.
//!
//! Two interchangeable backends produce a polarity score in `[-1, 1]`:
//! the VADER compound score and a built-in weighted lexicon. The backend
//! is selected once at construction via [`SentimentModel`]; scoring is
//! pure per call and never fails on well-formed text.

mod lexicon;

pub use lexicon::SentimentLexicon;
use redpulse_core::{Post, ScoredPost, SentimentModel};
use tracing::debug;

pub struct SentimentAnalyzer {
    model: SentimentModel,
    vader: vader_sentiment::SentimentIntensityAnalyzer<'static>,
    lexicon: SentimentLexicon,
}

impl SentimentAnalyzer {
    pub fn new(model: SentimentModel) -> Self {
        debug!("Initializing sentiment analyzer with model {:?}", model);
        Self {
            model,
            vader: vader_sentiment::SentimentIntensityAnalyzer::new(),
            lexicon: SentimentLexicon::default(),
        }
    }

    pub fn model(&self) -> SentimentModel {
        self.model
    }

    /// Polarity of `text` in `[-1, 1]`.
    ///
    /// Empty or whitespace-only input is defined as exactly `0.0`.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let raw = match self.model {
            SentimentModel::Vader => self
                .vader
                .polarity_scores(text)
                .get("compound")
                .copied()
                .unwrap_or(0.0),
            SentimentModel::Lexicon => self.lexicon.score(text),
        };

        raw.clamp(-1.0, 1.0)
    }

    /// Score a fetched batch, one [`ScoredPost`] per post, preserving
    /// fetch order.
    pub fn score_posts(&self, posts: Vec<Post>) -> Vec<ScoredPost> {
        posts
            .into_iter()
            .map(|post| {
                let sentiment = self.score(&post.body);
                ScoredPost { post, sentiment }
            })
            .collect()
    }
}
