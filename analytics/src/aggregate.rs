use std::collections::BTreeMap;

use chrono::NaiveDate;
use redpulse_core::{ScoredPost, Thresholds};
use tracing::debug;

use crate::text::{extract_hashtags, word_frequencies, HashtagCount, WordCount};

const MOST_DISCUSSED_N: usize = 10;
const SENTIMENT_TAIL_N: usize = 5;
const TOP_HASHTAGS_N: usize = 10;
const CLOUD_WORDS_N: usize = 40;

/// Mean sentiment for one UTC calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub mean_score: f64,
}

/// Threshold classification of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

/// Everything the dashboard renders, derived from one scored batch.
#[derive(Debug, Clone)]
pub struct AggregateView {
    pub total_posts: usize,
    pub total_comments: u64,
    /// Arithmetic mean of all scores; defined as 0.0 for an empty batch.
    pub mean_sentiment: f64,
    /// One entry per distinct UTC date, chronological.
    pub sentiment_over_time: Vec<DailySentiment>,
    /// Top posts by comment count, descending, ties in fetch order.
    pub most_discussed: Vec<ScoredPost>,
    /// Highest-scored posts, descending.
    pub top_positive: Vec<ScoredPost>,
    /// Lowest-scored posts, ascending.
    pub top_negative: Vec<ScoredPost>,
    /// Top `#word` tokens from titles, case-sensitive raw counts.
    pub hashtags: Vec<HashtagCount>,
    /// Word-cloud input from titles of posts above the positive cutoff.
    pub positive_cloud: Vec<WordCount>,
    /// Word-cloud input from titles of posts below the negative cutoff.
    pub negative_cloud: Vec<WordCount>,
}

/// Classify a score against the thresholds.
///
/// Strict inequalities: a score exactly equal to either cutoff is Neutral.
pub fn classify(score: f64, thresholds: Thresholds) -> Polarity {
    if score > thresholds.positive {
        Polarity::Positive
    } else if score < thresholds.negative {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

/// Aggregate one scored batch. Pure: no hidden state, identical inputs
/// produce an identical view, and an empty batch produces a well-defined
/// empty view (zero counts, mean 0.0, empty series).
pub fn aggregate(scored: &[ScoredPost], thresholds: Thresholds) -> AggregateView {
    debug!("Aggregating {} scored posts", scored.len());

    let total_posts = scored.len();
    let total_comments = scored.iter().map(|p| p.post.num_comments).sum();
    let mean_sentiment = if scored.is_empty() {
        0.0
    } else {
        scored.iter().map(|p| p.sentiment).sum::<f64>() / scored.len() as f64
    };

    let positive_titles: Vec<&str> = scored
        .iter()
        .filter(|p| classify(p.sentiment, thresholds) == Polarity::Positive)
        .map(|p| p.post.title.as_str())
        .collect();
    let negative_titles: Vec<&str> = scored
        .iter()
        .filter(|p| classify(p.sentiment, thresholds) == Polarity::Negative)
        .map(|p| p.post.title.as_str())
        .collect();

    AggregateView {
        total_posts,
        total_comments,
        mean_sentiment,
        sentiment_over_time: daily_mean_sentiment(scored),
        most_discussed: top_by_comments(scored, MOST_DISCUSSED_N),
        top_positive: sentiment_tail(scored, SENTIMENT_TAIL_N, Tail::Positive),
        top_negative: sentiment_tail(scored, SENTIMENT_TAIL_N, Tail::Negative),
        hashtags: extract_hashtags(
            scored.iter().map(|p| p.post.title.as_str()),
            TOP_HASHTAGS_N,
        ),
        positive_cloud: word_frequencies(positive_titles.iter().copied(), CLOUD_WORDS_N),
        negative_cloud: word_frequencies(negative_titles.iter().copied(), CLOUD_WORDS_N),
    }
}

/// Group by UTC calendar date and average. BTreeMap keeps the output
/// chronological.
fn daily_mean_sentiment(scored: &[ScoredPost]) -> Vec<DailySentiment> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for p in scored {
        let entry = buckets.entry(p.post.created_date()).or_insert((0.0, 0));
        entry.0 += p.sentiment;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| DailySentiment {
            date,
            mean_score: sum / count as f64,
        })
        .collect()
}

fn top_by_comments(scored: &[ScoredPost], n: usize) -> Vec<ScoredPost> {
    let mut posts = scored.to_vec();
    // stable: equal comment counts keep fetch order
    posts.sort_by(|a, b| b.post.num_comments.cmp(&a.post.num_comments));
    posts.truncate(n);
    posts
}

enum Tail {
    Positive,
    Negative,
}

fn sentiment_tail(scored: &[ScoredPost], n: usize, tail: Tail) -> Vec<ScoredPost> {
    let mut posts = scored.to_vec();
    match tail {
        Tail::Positive => posts.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment)),
        Tail::Negative => posts.sort_by(|a, b| a.sentiment.total_cmp(&b.sentiment)),
    }
    posts.truncate(n);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use redpulse_core::Post;

    fn scored(id: &str, title: &str, comments: u64, sentiment: f64, ts: i64) -> ScoredPost {
        ScoredPost {
            post: Post {
                id: id.to_string(),
                title: title.to_string(),
                body: String::new(),
                score: 0,
                num_comments: comments,
                url: String::new(),
                created: Utc.timestamp_opt(ts, 0).unwrap(),
            },
            sentiment,
        }
    }

    const DAY: i64 = 86_400;
    const T0: i64 = 1_700_000_000;

    #[test]
    fn empty_batch_is_well_defined() {
        let view = aggregate(&[], Thresholds::default());
        assert_eq!(view.total_posts, 0);
        assert_eq!(view.total_comments, 0);
        assert_eq!(view.mean_sentiment, 0.0);
        assert!(view.sentiment_over_time.is_empty());
        assert!(view.most_discussed.is_empty());
        assert!(view.top_positive.is_empty());
        assert!(view.top_negative.is_empty());
        assert!(view.hashtags.is_empty());
        assert!(view.positive_cloud.is_empty());
        assert!(view.negative_cloud.is_empty());
    }

    #[test]
    fn mean_is_arithmetic_mean() {
        let batch = vec![
            scored("a", "a", 0, 0.5, T0),
            scored("b", "b", 0, -0.5, T0),
            scored("c", "c", 0, 0.3, T0),
        ];
        let view = aggregate(&batch, Thresholds::default());
        assert!((view.mean_sentiment - 0.1).abs() < 1e-12);
    }

    #[test]
    fn top_by_comments_is_stable_on_ties() {
        let batch = vec![
            scored("first", "first", 5, 0.0, T0),
            scored("second", "second", 5, 0.0, T0),
            scored("third", "third", 3, 0.0, T0),
        ];
        let top = top_by_comments(&batch, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].post.id, "first");
        assert_eq!(top[1].post.id, "second");
    }

    #[test]
    fn sentiment_tails_pick_extremes() {
        let batch = vec![
            scored("a", "a", 0, 0.9, T0),
            scored("b", "b", 0, -0.8, T0),
            scored("c", "c", 0, 0.1, T0),
            scored("d", "d", 0, -0.2, T0),
        ];
        let view = aggregate(&batch, Thresholds::default());
        assert_eq!(view.top_positive[0].post.id, "a");
        assert_eq!(view.top_negative[0].post.id, "b");
        assert_eq!(view.top_positive.len(), 4);
    }

    #[test]
    fn boundary_score_is_neutral() {
        let t = Thresholds {
            positive: 0.3,
            negative: -0.3,
        };
        assert_eq!(classify(0.3, t), Polarity::Neutral);
        assert_eq!(classify(-0.3, t), Polarity::Neutral);
        assert_eq!(classify(0.300_1, t), Polarity::Positive);
        assert_eq!(classify(-0.300_1, t), Polarity::Negative);
    }

    #[test]
    fn same_date_posts_share_a_bucket() {
        // two instants on the same UTC date, one on the next
        let batch = vec![
            scored("a", "a", 0, 0.4, T0),
            scored("b", "b", 0, 0.8, T0 + 3600),
            scored("c", "c", 0, -0.2, T0 + DAY),
        ];
        let view = aggregate(&batch, Thresholds::default());
        assert_eq!(view.sentiment_over_time.len(), 2);
        assert!((view.sentiment_over_time[0].mean_score - 0.6).abs() < 1e-12);
        assert!(view.sentiment_over_time[0].date < view.sentiment_over_time[1].date);
    }

    #[test]
    fn clouds_respect_strict_thresholds() {
        let t = Thresholds {
            positive: 0.3,
            negative: -0.3,
        };
        let batch = vec![
            scored("a", "sunny sunny", 0, 0.5, T0),
            scored("b", "exactly boundary", 0, 0.3, T0),
            scored("c", "gloomy gloomy", 0, -0.5, T0),
        ];
        let view = aggregate(&batch, t);
        assert_eq!(view.positive_cloud[0].word, "sunny");
        assert_eq!(view.negative_cloud[0].word, "gloomy");
        assert!(view.positive_cloud.iter().all(|w| w.word != "boundary"));
    }

    #[test]
    fn aggregate_is_idempotent() {
        let batch = vec![
            scored("a", "Loving #AI", 7, 0.6, T0),
            scored("b", "meh #ai", 2, -0.1, T0 + DAY),
        ];
        let t = Thresholds::default();
        let first = aggregate(&batch, t);
        let second = aggregate(&batch, t);
        assert_eq!(first.mean_sentiment, second.mean_sentiment);
        assert_eq!(first.hashtags, second.hashtags);
        assert_eq!(first.sentiment_over_time, second.sentiment_over_time);
        assert_eq!(
            first
                .most_discussed
                .iter()
                .map(|p| &p.post.id)
                .collect::<Vec<_>>(),
            second
                .most_discussed
                .iter()
                .map(|p| &p.post.id)
                .collect::<Vec<_>>()
        );
    }

    proptest! {
        #[test]
        fn mean_matches_arithmetic_mean(scores in prop::collection::vec(-1.0f64..=1.0, 1..50)) {
            let batch: Vec<ScoredPost> = scores
                .iter()
                .enumerate()
                .map(|(i, &s)| scored(&format!("p{i}"), "t", 0, s, T0))
                .collect();
            let view = aggregate(&batch, Thresholds::default());
            let expected = scores.iter().sum::<f64>() / scores.len() as f64;
            prop_assert!((view.mean_sentiment - expected).abs() < 1e-9);
        }

        #[test]
        fn top_n_never_exceeds_n(comments in prop::collection::vec(0u64..100, 0..30)) {
            let batch: Vec<ScoredPost> = comments
                .iter()
                .enumerate()
                .map(|(i, &c)| scored(&format!("p{i}"), "t", c, 0.0, T0))
                .collect();
            let view = aggregate(&batch, Thresholds::default());
            prop_assert!(view.most_discussed.len() <= MOST_DISCUSSED_N);
            prop_assert!(view.top_positive.len() <= SENTIMENT_TAIL_N);
            // descending by comments
            for pair in view.most_discussed.windows(2) {
                prop_assert!(pair[0].post.num_comments >= pair[1].post.num_comments);
            }
        }
    }
}
