use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::views;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("backend responded with {status}: {message}")]
    Backend { status: StatusCode, message: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Backend { status, .. } if status.is_client_error() => *status,
            AppError::Backend { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show to the person using the site.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Upstream(_) => "The ride service is unreachable right now.".to_string(),
            AppError::Internal(_) => "Something went wrong on our side.".to_string(),
            AppError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Html(views::error_page(status, &self.public_message()))).into_response()
    }
}
