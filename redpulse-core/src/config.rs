use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which pretrained sentiment backend scores post bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentModel {
    /// VADER compound polarity.
    #[default]
    Vader,
    /// Built-in weighted word lexicon.
    Lexicon,
}

impl FromStr for SentimentModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vader" => Ok(Self::Vader),
            "lexicon" => Ok(Self::Lexicon),
            other => Err(ConfigError::InvalidValue {
                field: "sentiment_model".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Explicit application configuration, read once at startup and passed
/// into the component constructors. No ambient globals.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub user_agent: String,
    pub sentiment_model: SentimentModel,
    pub listen: String,
    pub default_query: String,
}

const DEFAULT_USER_AGENT: &str = "redpulse/0.1 (sentiment dashboard)";
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
const DEFAULT_QUERY: &str = "AI";

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// `REDDIT_CLIENT_ID` and `REDDIT_CLIENT_SECRET` are required; the
    /// rest fall back to sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let reddit_client_id = require_env("REDDIT_CLIENT_ID")?;
        let reddit_client_secret = require_env("REDDIT_CLIENT_SECRET")?;

        let sentiment_model = match env::var("REDPULSE_SENTIMENT_MODEL") {
            Ok(value) => SentimentModel::from_str(&value)?,
            Err(_) => SentimentModel::default(),
        };

        Ok(Self {
            reddit_client_id,
            reddit_client_secret,
            user_agent: env::var("REDPULSE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            sentiment_model,
            listen: env::var("REDPULSE_LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string()),
            default_query: env::var("REDPULSE_DEFAULT_QUERY")
                .unwrap_or_else(|_| DEFAULT_QUERY.to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit_client_id.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "reddit_client_id is empty".to_string(),
            });
        }
        if self.reddit_client_secret.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "reddit_client_secret is empty".to_string(),
            });
        }
        Ok(())
    }
}

fn require_env(var_name: &str) -> Result<String, ConfigError> {
    env::var(var_name).map_err(|_| ConfigError::MissingEnvironmentVariable {
        var_name: var_name.to_string(),
    })
}
