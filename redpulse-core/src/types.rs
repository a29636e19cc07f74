use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One fetched search result. Immutable for the lifetime of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
    pub created: DateTime<Utc>,
}

impl Post {
    /// Calendar date of the post, always derived in UTC.
    pub fn created_date(&self) -> NaiveDate {
        self.created.date_naive()
    }
}

/// A post together with its sentiment polarity score in roughly [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPost {
    pub post: Post,
    pub sentiment: f64,
}

/// Positive/negative sentiment cutoffs supplied by the user.
///
/// Convention is `positive > 0 > negative`, but this is a UI input
/// convention and is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.3,
            negative: -0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn created_date_is_utc() {
        let post = Post {
            id: "t3_abc".to_string(),
            title: "Test".to_string(),
            body: String::new(),
            score: 1,
            num_comments: 0,
            url: "https://reddit.com/r/test/abc".to_string(),
            // 23:30 UTC must not roll over into the next local day
            created: Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap(),
        };
        assert_eq!(
            post.created_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.positive, 0.3);
        assert_eq!(t.negative, -0.3);
    }
}
