//! HTTP client for the Tracksy backend API.
//!
//! Every call returns the backend's `{success, message, data}` envelope. A
//! `success: false` envelope is a normal value for the caller to report; only
//! transport failures and unreadable responses become [`AppError`]s.

pub mod auth;
pub mod envelope;
pub mod payment;
pub mod rating;
pub mod ride;
pub mod user;

use reqwest::{header::AUTHORIZATION, multipart::Form, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub use envelope::{ApiResponse, Listing, Meta, Paginated};

/// Backend document ids are Mongo-style tokens. Anything else (a decoded `%2F`,
/// a `..`) must never reach a request path.
pub fn check_record_id(id: &str) -> AppResult<&str> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id)
    } else {
        Err(AppError::NotFound(format!("No record with id {:?}", id)))
    }
}

/// `prefix/id` for an id that passed [`check_record_id`].
pub(crate) fn record_path(prefix: &str, id: &str) -> AppResult<String> {
    Ok(format!("{}/{}", prefix, check_record_id(id)?))
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.backend_url.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        // The backend expects the bare token, without a `Bearer` scheme.
        match token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> AppResult<ApiResponse<T>> {
        let mut request = self.request(Method::GET, path, token);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request).await
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> AppResult<ApiResponse<T>> {
        let request = self.request(method, path, token).json(body);
        self.execute(request).await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> AppResult<ApiResponse<T>> {
        self.execute(self.request(method, path, token)).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        form: Form,
    ) -> AppResult<ApiResponse<T>> {
        let request = self.request(Method::POST, path, token).multipart(form);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> AppResult<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(mut envelope) => {
                envelope.status = status;
                if !envelope.success {
                    tracing::debug!(%status, path = %url, message = %envelope.message, "Backend rejected request");
                }
                Ok(envelope)
            }
            Err(e) if status.is_success() => {
                tracing::warn!(path = %url, error = %e, "Unreadable backend response");
                Err(AppError::Internal(format!(
                    "Unexpected response from {}: {}",
                    url, e
                )))
            }
            Err(_) => Err(AppError::Backend {
                status,
                message: envelope::error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
            }),
        }
    }
}
