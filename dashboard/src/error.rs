use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use redpulse_core::CoreError;
use thiserror::Error;
use tracing::error;

use crate::render;
use crate::routes::Maud;

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let RequestError::Core(err) = self;
        error!("Request failed: {}", err);

        let status = match &err {
            CoreError::RedditApi(_) | CoreError::Network(_) => StatusCode::BAD_GATEWAY,
            CoreError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = render::error_page(&err.to_string());
        (status, Maud(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpulse_core::RedditApiError;

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let err = RequestError::Core(CoreError::RedditApi(RedditApiError::InvalidToken));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
