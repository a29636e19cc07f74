use std::time::{Duration, SystemTime};

use redpulse_core::{CoreError, RedditApiError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Safety margin subtracted from the reported token lifetime so a token
/// is never used right at its expiry instant.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// An application-only OAuth token with its expiry.
#[derive(Debug, Clone)]
pub(crate) struct AppToken {
    pub access_token: String,
    expires_at: SystemTime,
}

impl AppToken {
    pub fn is_valid(&self) -> bool {
        SystemTime::now() < self.expires_at
    }
}

/// Request an app-only (client credentials) token.
///
/// Reddit requires HTTP basic auth with the application id/secret on the
/// token endpoint; no user involvement, so no authorization-code flow.
pub(crate) async fn request_app_token(
    http_client: &Client,
    client_id: &str,
    client_secret: &str,
    user_agent: &str,
) -> Result<AppToken, CoreError> {
    debug!("Requesting app-only Reddit token");

    let response = http_client
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .header("User-Agent", user_agent)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if status.as_u16() == 401 {
        error!("Reddit rejected the application credentials");
        return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: "invalid client id or secret".to_string(),
        }));
    }
    if !status.is_success() {
        error!("Token request failed with status {}", status);
        return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: format!("token endpoint returned {status}"),
        }));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        error!("Failed to parse token response: {}", e);
        CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: "failed to parse token response".to_string(),
        })
    })?;

    let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
    info!("Obtained Reddit app token, valid for {:?}", lifetime);

    Ok(AppToken {
        access_token: token.access_token,
        expires_at: SystemTime::now() + lifetime,
    })
}
