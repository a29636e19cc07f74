use dashboard::{Opts, Server};
use reddit_client::{RedditApiClient, RedditCredentials};
use redpulse_core::{AppConfig, CoreError};
use sentiment_engine::SentimentAnalyzer;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("redpulse=debug,dashboard=debug,reddit_client=debug")
        .init();

    tracing::info!("Starting Redpulse - Reddit Sentiment Dashboard");

    let config = AppConfig::from_env()?;
    config.validate()?;

    let reddit = RedditApiClient::new(
        RedditCredentials {
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
        },
        config.user_agent.clone(),
    )?;
    let analyzer = SentimentAnalyzer::new(config.sentiment_model);
    tracing::info!("Sentiment model: {:?}", analyzer.model());

    let server = Server::init(
        Opts {
            listen: config.listen.clone(),
            default_query: config.default_query.clone(),
        },
        reddit,
        analyzer,
    )
    .await?;

    server.run().await
}
