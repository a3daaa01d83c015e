// Request body extraction
//
// `JsonObject` accepts any JSON object as the request body. It is more
// tolerant than `axum::Json` about the content type (a missing header is
// treated as JSON) and stricter about the payload (arrays and scalars are
// rejected). Every rejection is a 422 with a `detail` message, except an
// oversized body which keeps its 413.
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// An arbitrary JSON object taken from the request body, key order preserved.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = is_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

        if !json_body {
            tracing::debug!("rejecting body with non-JSON content type");
            return Err(ApiError::unprocessable("Input should be a valid dictionary"));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed JSON body");
            ApiError::unprocessable(format!("JSON decode error: {}", e))
        })?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => {
                tracing::debug!(kind = value_kind(&other), "rejecting non-object JSON body");
                Err(ApiError::unprocessable("Input should be a valid dictionary"))
            }
        }
    }
}

/// A missing content type counts as JSON; otherwise the media type must be
/// `application/json` or an `application/*+json` variant.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(ct) = value.to_str() else {
        return false;
    };
    let media: String = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match media.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
