//! HTTP routes
//!
//! `GET /` serves a quote, `OPTIONS /` answers CORS preflight without
//! touching the corpus, `GET /healthz` reports liveness. Every response,
//! errors included, passes through [`apply_standard_headers`].

use super::envelope::{ErrorEnvelope, apply_standard_headers};
use super::render::render;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Router, middleware};
use futures::FutureExt;
use hitokoto_application::{CorpusFetcher, QuoteSelection, ServeQuoteError, ServeQuoteUseCase};
use hitokoto_domain::RawParams;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, warn};

/// Shared state for the quote routes
pub struct AppState<F: CorpusFetcher + 'static> {
    service: Arc<ServeQuoteUseCase<F>>,
    expose_internal_errors: bool,
}

impl<F: CorpusFetcher + 'static> AppState<F> {
    pub fn new(service: Arc<ServeQuoteUseCase<F>>) -> Self {
        Self {
            service,
            expose_internal_errors: false,
        }
    }

    /// Show raw error text in 500 responses
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.expose_internal_errors = debug;
        self
    }
}

impl<F: CorpusFetcher + 'static> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            expose_internal_errors: self.expose_internal_errors,
        }
    }
}

/// Build the application router
pub fn router<F: CorpusFetcher + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/", get(quote::<F>).options(preflight))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::map_response(apply_standard_headers))
}

async fn quote<F: CorpusFetcher + 'static>(
    State(state): State<AppState<F>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(pairs)) => RawParams::from_pairs(pairs),
        Err(rejection) => {
            return ErrorEnvelope::new(StatusCode::BAD_REQUEST, rejection.body_text())
                .into_response();
        }
    };

    match guard_panics(state.service.execute(&params)).await {
        Ok(selection) => respond(selection, state.expose_internal_errors),
        Err(e) => error_response(e, state.expose_internal_errors),
    }
}

fn respond(selection: QuoteSelection, expose: bool) -> Response {
    match render(&selection.record, &selection.query) {
        Ok(rendered) => (
            [(header::CONTENT_TYPE, rendered.content_type)],
            rendered.body,
        )
            .into_response(),
        Err(e) => error_response(ServeQuoteError::Internal(e.to_string()), expose),
    }
}

fn error_response(error: ServeQuoteError, expose: bool) -> Response {
    let envelope = match error {
        ServeQuoteError::InvalidParameter(message) => {
            ErrorEnvelope::new(StatusCode::BAD_REQUEST, message)
        }
        ServeQuoteError::NotFound(message) => {
            warn!("No quote for request: {}", message);
            ErrorEnvelope::new(StatusCode::NOT_FOUND, message)
        }
        ServeQuoteError::Internal(detail) => {
            error!("Unexpected error serving quote: {}", detail);
            ErrorEnvelope::internal(&detail, expose)
        }
    };
    envelope.into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> ErrorEnvelope {
    ErrorEnvelope::new(StatusCode::NOT_FOUND, "not found")
}

/// Run the pipeline, turning a panic into an internal error
async fn guard_panics<Fut>(pipeline: Fut) -> Result<QuoteSelection, ServeQuoteError>
where
    Fut: Future<Output = Result<QuoteSelection, ServeQuoteError>>,
{
    AssertUnwindSafe(pipeline)
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(ServeQuoteError::Internal(panic_message(&*panic))))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic while serving request".to_string())
}
