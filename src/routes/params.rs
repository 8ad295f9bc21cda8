use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

/// Rejects a missing path parameter before anything else looks at it.
/// The value is returned as given, whitespace included.
pub fn require_param(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(AppError::BadRequest("id is required".to_string()));
    }
    Ok(raw)
}

pub fn parse_product_id(raw: &str) -> Result<i32> {
    require_param(raw)?
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("id must be a number".to_string()))
}

/// Decodes a JSON body regardless of its content type. The decoder's
/// message is what the client sees.
pub fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
