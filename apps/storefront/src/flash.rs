//! # Flash Messages
//!
//! One-shot status messages ("Horse added successfully!") that survive
//! exactly one redirect.
//!
//! ## Cookie Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Flash Round Trip                                 │
//! │                                                                         │
//! │  POST /add                                                             │
//! │    handler: flash.push("Horse added successfully!")                    │
//! │    303 Location: /                                                      │
//! │    Set-Cookie: paddock_flash=<payload>.<signature>                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /                                                                  │
//! │    Cookie: paddock_flash=<payload>.<signature>                         │
//! │    handler: flash.take() → ["Horse added successfully!"]               │
//! │    200 + Set-Cookie: paddock_flash=; Max-Age=0   (consumed)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `payload` is the base64url JSON array of messages, `signature` the
//! base64url HMAC-SHA256 of the payload under the configured secret. A cookie
//! that fails verification is treated as absent.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cookie::{Cookie, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "paddock_flash";

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Signer
// =============================================================================

/// Seals and opens flash cookie values.
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    /// Creates a signer keyed with `secret`.
    pub fn new(secret: &[u8]) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(FlashSigner {
            mac: HmacSha256::new_from_slice(secret)?,
        })
    }

    /// Encodes and signs a list of messages.
    pub fn seal(&self, messages: &[String]) -> String {
        let json = serde_json::to_vec(messages).unwrap_or_else(|_| b"[]".to_vec());
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload}.{signature}")
    }

    /// Verifies and decodes a sealed value.
    ///
    /// Returns `None` for anything malformed or signed with another key.
    pub fn open(&self, value: &str) -> Option<Vec<String>> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            warn!("Ignoring flash cookie with a bad signature");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

impl fmt::Debug for FlashSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashSigner").finish_non_exhaustive()
    }
}

// =============================================================================
// Flash Extractor
// =============================================================================

/// Pending flash messages for the current request.
///
/// Extract it, then return it as part of the response so the cookie gets
/// written (or cleared):
///
/// ```rust,ignore
/// async fn delete(flash: Flash) -> impl IntoResponse {
///     (flash.push("Horse deleted successfully!"), Redirect::to("/"))
/// }
/// ```
#[derive(Debug)]
pub struct Flash {
    signer: Arc<FlashSigner>,
    messages: Vec<String>,
    /// The request carried a flash cookie that may need clearing.
    had_cookie: bool,
}

impl Flash {
    /// Builds a flash from a raw `Cookie` header set.
    fn from_cookie_headers<'a>(
        signer: Arc<FlashSigner>,
        headers: impl Iterator<Item = &'a HeaderValue>,
    ) -> Self {
        let mut had_cookie = false;
        let mut messages = Vec::new();

        for header in headers {
            let Ok(raw) = header.to_str() else { continue };
            for cookie in Cookie::split_parse(raw).flatten() {
                if cookie.name() != FLASH_COOKIE {
                    continue;
                }
                had_cookie = true;
                if let Some(pending) = signer.open(cookie.value()) {
                    messages.extend(pending);
                }
            }
        }

        Flash {
            signer,
            messages,
            had_cookie,
        }
    }

    /// Queues a message for the next rendered page.
    pub fn push(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        debug!(message = %message, "Flash");
        self.messages.push(message);
        self
    }

    /// Takes every pending message. They will not be shown again.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// The cookie this flash should write, if any.
    fn outgoing_cookie(&self) -> Option<Cookie<'static>> {
        if !self.messages.is_empty() {
            let cookie = Cookie::build((FLASH_COOKIE, self.signer.seal(&self.messages)))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            return Some(cookie);
        }

        if self.had_cookie {
            let mut cookie = Cookie::build((FLASH_COOKIE, "")).path("/").build();
            cookie.make_removal();
            return Some(cookie);
        }

        None
    }
}

impl<S> FromRequestParts<S> for Flash
where
    Arc<FlashSigner>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let signer = Arc::<FlashSigner>::from_ref(state);
        Ok(Flash::from_cookie_headers(
            signer,
            parts.headers.get_all(COOKIE).iter(),
        ))
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.outgoing_cookie() {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!(error = %e, "Flash cookie is not a valid header value"),
            }
        }
        Ok(res)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
