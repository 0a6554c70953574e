use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// The backend's response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl<T> ApiResponse<T> {
    /// Unwraps `data` from a successful envelope; anything else becomes a backend error
    /// carrying the backend's own message.
    pub fn into_data(self) -> AppResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(AppError::Backend {
                status: StatusCode::BAD_GATEWAY,
                message: "Backend response had no data".to_string(),
            }),
            (false, _) => Err(AppError::Backend {
                status: if self.status.is_success() {
                    StatusCode::BAD_REQUEST
                } else {
                    self.status
                },
                message: self.message,
            }),
        }
    }

    /// Message to show for this outcome, falling back when the backend sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        if self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total: Option<u64>,
    pub total_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub meta: Option<Meta>,
}

/// Collections come back either wrapped with paging metadata or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged(Paginated<T>),
}

impl<T> Listing<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<Meta>) {
        match self {
            Listing::Plain(items) => (items, None),
            Listing::Paged(page) => (page.data, page.meta),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.into_parts().0
    }
}

/// Pulls `message` out of an error body that is JSON but not a full envelope.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
