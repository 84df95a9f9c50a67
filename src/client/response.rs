//! Normalization of successful responses
//!
//! The loan service answers some mutations with 204, some with an empty 200,
//! and the tunneling proxy in front of it may inject HTML pages. Only a
//! non-empty JSON body is treated as a payload.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ConsoleError, ConsoleResult};

/// True when a 2xx response carries no body at all
pub fn is_empty_response(status: StatusCode, content_length: Option<u64>) -> bool {
    status == StatusCode::NO_CONTENT || content_length == Some(0)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Decode the body of a 2xx response.
///
/// Returns `Ok(None)` for non-JSON content and for blank JSON bodies.
pub fn decode_body<T: DeserializeOwned>(content_type: Option<&str>, text: &str) -> ConsoleResult<Option<T>> {
    if !is_json(content_type) {
        tracing::debug!("Response without JSON content ({:?})", content_type);
        return Ok(None);
    }
    if text.trim().is_empty() {
        tracing::debug!("Empty JSON response");
        return Ok(None);
    }
    let data = serde_json::from_str(text)?;
    Ok(Some(data))
}

/// Unwrap a payload the operation cannot do without
pub fn required<T>(payload: Option<T>, what: &str) -> ConsoleResult<T> {
    payload.ok_or_else(|| ConsoleError::EmptyResponse(what.to_string()))
}
