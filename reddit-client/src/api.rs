use std::time::Duration;

use redpulse_core::{CoreError, Post, RedditApiError};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::auth::{self, AppToken};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub subreddit: String,
    pub url: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u64,
}

/// Reddit application credentials for the app-only grant.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Client for the Reddit search API.
///
/// Holds explicit credentials (no ambient configuration) and a cached
/// app-only token that is refreshed when stale. A single search call
/// fetches one bounded batch; there is no pagination, retry, or rate
/// limiting here, and any upstream failure is fatal to the caller's run.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    credentials: RedditCredentials,
    user_agent: String,
    token: RwLock<Option<AppToken>>,
}

impl RedditApiClient {
    pub fn new(credentials: RedditCredentials, user_agent: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            credentials,
            user_agent,
            token: RwLock::new(None),
        })
    }

    /// Fetch posts matching `query`, optionally restricted to a single
    /// subreddit. Returns at most `limit` posts in the upstream ranking
    /// order.
    pub async fn search_posts(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Post>, CoreError> {
        let endpoint = match subreddit {
            Some(name) => format!("/r/{}/search", name),
            None => "/search".to_string(),
        };
        let limit_str = limit.to_string();
        let mut params = vec![
            ("q", query),
            ("limit", limit_str.as_str()),
            ("type", "link"),
        ];
        if subreddit.is_some() {
            params.push(("restrict_sr", "1"));
        }

        let response = self
            .make_request(Method::GET, &endpoint, Some(&params))
            .await?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse search results: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("failed to parse search results for '{query}'"),
            })
        })?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        info!("Retrieved {} posts for query '{}'", posts.len(), query);
        Ok(posts)
    }

    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let url = format!("{}{}", REDDIT_API_BASE, endpoint);
        let access_token = self.access_token().await?;

        let mut request_builder = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(&access_token)
            .header("User-Agent", &self.user_agent);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        info!("Making Reddit API request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Rate limited, upstream asks for {}s", retry_after);
                Err(CoreError::RedditApi(RedditApiError::RateLimitExceeded {
                    retry_after,
                }))
            }
            401 => Err(CoreError::RedditApi(RedditApiError::InvalidToken)),
            403 => Err(CoreError::RedditApi(RedditApiError::Forbidden {
                resource: endpoint.to_string(),
            })),
            404 => Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "resource not found".to_string(),
            })),
            code if status.is_server_error() => {
                Err(CoreError::RedditApi(RedditApiError::ServerError {
                    status_code: code,
                }))
            }
            code => Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("unexpected status {code}"),
            })),
        }
    }

    /// Return a valid app token, requesting a fresh one when the cached
    /// token is missing or stale.
    async fn access_token(&self) -> Result<String, CoreError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_valid() {
                return Ok(token.access_token.clone());
            }
        }

        let mut write = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = write.as_ref() {
            if token.is_valid() {
                return Ok(token.access_token.clone());
            }
        }

        let token = auth::request_app_token(
            &self.http_client,
            &self.credentials.client_id,
            &self.credentials.client_secret,
            &self.user_agent,
        )
        .await?;
        let access_token = token.access_token.clone();
        *write = Some(token);
        Ok(access_token)
    }
}

impl From<RedditPostData> for Post {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            id: post_data.id,
            title: post_data.title,
            body: post_data.selftext,
            score: post_data.score,
            num_comments: post_data.num_comments,
            url: post_data.url,
            created: chrono::DateTime::from_timestamp(post_data.created_utc as i64, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}
