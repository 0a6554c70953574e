use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot notification carried across a redirect in a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn set(self, jar: CookieJar) -> CookieJar {
        let payload = match serde_json::to_vec(&self) {
            Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
            Err(_) => return jar,
        };

        let mut cookie = Cookie::new(FLASH_COOKIE, payload);
        cookie.set_path("/");
        cookie.set_http_only(true);
        jar.add(cookie)
    }

    /// Reads the pending flash, if any, and removes it from the jar.
    pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
        let flash = jar
            .get(FLASH_COOKIE)
            .and_then(|c| URL_SAFE_NO_PAD.decode(c.value()).ok())
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());

        if jar.get(FLASH_COOKIE).is_none() {
            return (jar, None);
        }

        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
    }
}
