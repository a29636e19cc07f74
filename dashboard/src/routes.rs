use axum::extract::{Query, State};
use axum::http::header::{self, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use maud::Markup;
use redpulse_core::Thresholds;
use serde::Deserialize;
use tracing::info;

use crate::error::RequestResult;
use crate::{render, SharedState};

const LIMIT_MIN: u32 = 10;
const LIMIT_MAX: u32 = 100;
const DEFAULT_LIMIT: u32 = 50;

#[derive(Clone, Debug)]
#[must_use]
pub struct Maud(pub Markup);

impl IntoResponse for Maud {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            )],
            self.0 .0,
        )
            .into_response()
    }
}

pub fn route_handler(state: SharedState) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/assets/style.css", get(get_stylesheet))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    q: Option<String>,
    subreddit: Option<String>,
    limit: Option<u32>,
    positive: Option<f64>,
    negative: Option<f64>,
}

/// The parameter surface after defaulting and clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchInputs {
    pub query: String,
    pub subreddit: Option<String>,
    pub limit: u32,
    pub thresholds: Thresholds,
}

impl DashboardParams {
    fn normalize(self, default_query: &str) -> SearchInputs {
        let query = match self.q {
            Some(q) if !q.trim().is_empty() => q.trim().to_string(),
            _ => default_query.to_string(),
        };
        let subreddit = self
            .subreddit
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(LIMIT_MIN, LIMIT_MAX);
        let thresholds = Thresholds {
            positive: self.positive.unwrap_or(0.3).clamp(0.1, 1.0),
            negative: self.negative.unwrap_or(-0.3).clamp(-1.0, -0.1),
        };
        SearchInputs {
            query,
            subreddit,
            limit,
            thresholds,
        }
    }
}

/// Run the whole pipeline for one parameter set and render the page.
async fn get_dashboard(
    state: State<SharedState>,
    Query(params): Query<DashboardParams>,
) -> RequestResult<Maud> {
    let inputs = params.normalize(&state.default_query);
    info!(
        "Dashboard run: query='{}' subreddit={:?} limit={}",
        inputs.query, inputs.subreddit, inputs.limit
    );

    let posts = state
        .reddit
        .search_posts(&inputs.query, inputs.subreddit.as_deref(), inputs.limit)
        .await?;
    let scored = state.analyzer.score_posts(posts);
    let view = analytics::aggregate(&scored, inputs.thresholds);

    Ok(Maud(render::dashboard_page(&inputs, &scored, &view)))
}

async fn get_stylesheet() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/css; charset=utf-8"),
        )],
        render::STYLESHEET,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_take_defaults() {
        let inputs = DashboardParams::default().normalize("AI");
        assert_eq!(inputs.query, "AI");
        assert_eq!(inputs.subreddit, None);
        assert_eq!(inputs.limit, DEFAULT_LIMIT);
        assert_eq!(inputs.thresholds, Thresholds::default());
    }

    #[test]
    fn limit_is_clamped_to_slider_bounds() {
        let low = DashboardParams {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(low.normalize("AI").limit, LIMIT_MIN);

        let high = DashboardParams {
            limit: Some(5000),
            ..Default::default()
        };
        assert_eq!(high.normalize("AI").limit, LIMIT_MAX);
    }

    #[test]
    fn thresholds_are_clamped_to_slider_bounds() {
        let params = DashboardParams {
            positive: Some(3.0),
            negative: Some(-3.0),
            ..Default::default()
        };
        let inputs = params.normalize("AI");
        assert_eq!(inputs.thresholds.positive, 1.0);
        assert_eq!(inputs.thresholds.negative, -1.0);
    }

    #[test]
    fn blank_query_and_subreddit_fall_back() {
        let params = DashboardParams {
            q: Some("   ".to_string()),
            subreddit: Some("".to_string()),
            ..Default::default()
        };
        let inputs = params.normalize("rust");
        assert_eq!(inputs.query, "rust");
        assert_eq!(inputs.subreddit, None);
    }
}
