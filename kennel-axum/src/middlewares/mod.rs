//! Layers wrapped around every route.

pub mod request_id;

use std::any::Any;

use axum::{
    body::Body,
    http::{Method, Request, Uri},
    response::{IntoResponse, Response},
    Router,
};
use kennel_core::errors::KennelError;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::KennelAxumError;
use request_id::{MakeRequestUuidV4, REQUEST_ID_HEADER};

fn panic_message(err: &(dyn Any + Send)) -> &str {
    if let Some(s) = err.downcast_ref::<String>() {
        s
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked: {}", panic_message(&*err));
    let err = KennelError::general_error("An unexpected error occurred.");
    KennelAxumError::from(err).into_response()
}

pub async fn not_found(method: Method, uri: Uri) -> KennelAxumError {
    KennelError::not_found(format!("No route for {method} {}", uri.path())).into()
}

/// Install the not-found fallback and the request-id, trace and panic layers.
///
/// Call this after every route has been added.
pub fn apply(router: Router<()>) -> Router<()> {
    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();

                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id
                    )
                }))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}
