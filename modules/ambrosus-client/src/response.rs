//! Response normalization for the gateway HTTP contract.
//!
//! Every operation funnels its raw transport response through
//! `handle_response`, which produces the uniform success/failure envelope
//! callers consume. Client-side validation failures go through
//! `reject_response` without touching the network.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// What the transport hands back: the gateway status and body text, verbatim.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The success half of the envelope contract. `status` is always 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSuccess<T = Value> {
    pub status: u16,
    pub data: T,
}

/// The failure half: the gateway status (400 for client-side rejections,
/// 503 when no status is available) and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("API error (status {status}): {message}")]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

/// Envelope alias returned by every client operation.
pub type ApiResult<T = Value> = Result<ApiSuccess<T>, ApiFailure>;

/// Normalize a raw gateway response into the envelope contract.
///
/// A 200 body is parsed as JSON and unwrapped at its `data` key when it has
/// one. Any other status becomes a failure carrying the body's `reason`
/// field when present. Parse errors never escape: a malformed body turns
/// into a failure with the original status.
pub fn handle_response(raw: RawResponse) -> ApiResult {
    if raw.status == 200 {
        if raw.body.trim().is_empty() {
            return Ok(success_response(Value::Null));
        }
        return match serde_json::from_str::<Value>(&raw.body) {
            Ok(Value::Object(mut body)) => match body.remove("data") {
                Some(data) => Ok(success_response(data)),
                None => Ok(success_response(Value::Object(body))),
            },
            Ok(body) => Ok(success_response(body)),
            Err(_) => Err(ApiFailure {
                status: raw.status,
                message: "Malformed response body".to_string(),
            }),
        };
    }

    let reason = serde_json::from_str::<Value>(&raw.body)
        .ok()
        .and_then(|body| {
            body.get("reason")
                .and_then(Value::as_str)
                .map(String::from)
        });

    Err(ApiFailure {
        status: raw.status,
        message: reason.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Client-side rejection: always status 400.
pub fn reject_response(message: impl Into<String>) -> ApiFailure {
    ApiFailure {
        status: 400,
        message: message.into(),
    }
}

/// Synthetic success: always status 200.
pub fn success_response<T>(data: T) -> ApiSuccess<T> {
    ApiSuccess { status: 200, data }
}
