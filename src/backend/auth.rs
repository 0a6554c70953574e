use reqwest::{multipart::Form, Method};
use serde::{Deserialize, Serialize};

use crate::backend::{ApiResponse, BackendClient};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Which registration endpoint a multipart sign-up goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Rider,
    Driver,
}

impl Registration {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Registration::Rider => "/auth/register-rider",
            Registration::Driver => "/auth/register-driver",
        }
    }
}

impl BackendClient {
    pub async fn login(&self, payload: &LoginRequest) -> AppResult<ApiResponse<LoginTokens>> {
        self.send_json(Method::POST, "/auth/login", None, payload).await
    }

    /// Forwards a sign-up form: a `data` JSON part plus any photo parts.
    pub async fn register(
        &self,
        kind: Registration,
        form: Form,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        self.send_multipart(kind.endpoint(), None, form).await
    }

    pub async fn send_reset_otp(
        &self,
        payload: &SendOtpRequest,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        self.send_json(Method::POST, "/auth/send-otp", None, payload).await
    }

    pub async fn reset_password(
        &self,
        payload: &ResetPasswordRequest,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        self.send_json(Method::POST, "/auth/reset-password", None, payload).await
    }

    /// The browser is sent here directly; the backend owns the OAuth dance.
    pub fn google_login_url(&self) -> String {
        self.url("/auth/google")
    }
}
