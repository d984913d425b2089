use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use kennel_core::errors::KennelError;
use serde_json::{json, Map, Value};

use crate::KennelAxumError;

/// The key/value pairs a client submitted in a JSON request body.
///
/// A request without a JSON content type, or with an empty body, submits
/// nothing. An array submits its elements keyed by index.
#[derive(Debug, Clone, Default)]
pub struct SubmittedFields(pub Map<String, Value>);

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn bad_body(detail: impl Into<String>) -> KennelAxumError {
    KennelError::bad_request("Failed to parse the request body as JSON")
        .with_errors(json!({"_schema": [detail.into()]}))
        .into()
}

impl SubmittedFields {
    pub fn from_value(value: Value) -> Result<Self, KennelAxumError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Array(items) => Ok(Self(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, v)| (idx.to_string(), v))
                    .collect(),
            )),
            other => Err(bad_body(format!("expected an object, got {other}"))),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KennelAxumError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(bytes).map_err(|e| bad_body(e.to_string()))?;
        Self::from_value(value)
    }
}

impl<S> FromRequest<S> for SubmittedFields
where
    S: Send + Sync,
{
    type Rejection = KennelAxumError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| bad_body(rejection.body_text()))?;

        Self::from_bytes(&bytes)
    }
}
