//! Server-rendered sentiment dashboard.
//!
//! One GET request runs the whole pipeline (fetch, score, aggregate) and
//! renders the result; adjusting any form parameter simply issues a new
//! request. No state survives between requests beyond the shared clients.

mod charts;
mod error;
mod render;
mod routes;

use std::sync::Arc;

use redpulse_core::CoreError;
use reddit_client::RedditApiClient;
use sentiment_engine::SentimentAnalyzer;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Opts {
    pub listen: String,
    pub default_query: String,
}

/// Shared request state: the constructed collaborators plus defaults.
pub struct UiState {
    reddit: RedditApiClient,
    analyzer: SentimentAnalyzer,
    default_query: String,
}

pub type SharedState = Arc<UiState>;

pub struct Server {
    listener: TcpListener,
    state: SharedState,
}

impl Server {
    pub async fn init(
        opts: Opts,
        reddit: RedditApiClient,
        analyzer: SentimentAnalyzer,
    ) -> Result<Server, CoreError> {
        let listener = TcpListener::bind(&opts.listen).await?;
        info!("Listening on {}", listener.local_addr()?);

        let state = Arc::new(UiState {
            reddit,
            analyzer,
            default_query: opts.default_query,
        });

        Ok(Self { listener, state })
    }

    pub async fn run(self) -> Result<(), CoreError> {
        let router = routes::route_handler(self.state.clone()).layer(CompressionLayer::new());

        info!("Starting dashboard server");
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
