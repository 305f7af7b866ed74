use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::issue_challenge::issue_challenge;
use super::handlers::method_not_allowed;
use super::handlers::not_found;
use super::handlers::validate_access::validate_access;
use super::handlers::verify_challenge::verify_challenge;
use crate::domain::otp::service::OtpService;
use crate::outbound::sms::LoggingPasscodeSender;

#[derive(Clone)]
pub struct AppState {
    pub otp_service: Arc<OtpService<LoggingPasscodeSender>>,
}

pub fn create_router(otp_service: Arc<OtpService<LoggingPasscodeSender>>) -> Router {
    let state = AppState { otp_service };

    let otp_routes = Router::new()
        .route(
            "/api/send-otp",
            post(issue_challenge).fallback(method_not_allowed),
        )
        .route(
            "/api/verify-otp",
            post(verify_challenge).fallback(method_not_allowed),
        )
        .route(
            "/api/get-verify",
            get(validate_access).fallback(method_not_allowed),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry bearer tokens.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(otp_routes)
        .route("/health", get(health))
        .fallback(not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
