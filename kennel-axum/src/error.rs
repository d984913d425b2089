use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kennel_core::errors::KennelError;

/// Fallback for anything a handler does not map to its own status.
#[derive(Debug)]
pub struct KennelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for KennelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<KennelError> for KennelAxumError {
    fn from(e: KennelError) -> Self {
        Self(e.into_anyhow())
    }
}

fn respond(err: &KennelError) -> Response {
    let safe = err.sanitize_for_client();
    let status = StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(safe.to_json())).into_response()
}

impl IntoResponse for KennelAxumError {
    fn into_response(self) -> Response {
        // Keep the status of a KennelError even when wrapped in context.
        if let Some(kennel) = KennelError::from_anyhow(&self.0) {
            if kennel.code() >= 500 {
                tracing::error!("request failed: {:#}", self.0);
            }
            return respond(kennel);
        }

        tracing::error!("unhandled error: {:#}", self.0);
        respond(&KennelError::general_error("An unexpected error occurred.").with_source(self.0))
    }
}
