// Router assembly
//
// `build_app` is shared by `main` and the tests so both exercise the same
// stack: routes wrapped in CORS, tracing, timeout, compression and a body
// size limit, plus optional POST body logging.
use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{request::Parts, HeaderValue},
    middleware, Router,
};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowCredentials, AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::handle_timeout_error;
use crate::middleware::log_post_body_middleware;
use crate::routes;

/// CORS policy for a single allowed origin.
///
/// Credentials are allowed, so "any method" and "any header" cannot be sent
/// as `*`; the pre-flight's requested method and headers are mirrored back
/// instead. Requests from any other origin get no allow headers at all.
/// An allowed origin of `*` admits every origin by echoing it back.
pub fn cors_layer(allowed_origin: &HeaderValue) -> CorsLayer {
    let any_origin: bool = allowed_origin == "*";
    let origins: AllowOrigin = if any_origin {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list([allowed_origin.clone()])
    };
    let credentials_origin: HeaderValue = allowed_origin.clone();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(AllowCredentials::predicate(
            move |origin: &HeaderValue, _parts: &Parts| any_origin || *origin == credentials_origin,
        ))
}

/// Build the complete application router from startup configuration.
pub fn build_app(config: &GatewayConfig) -> Router {
    let timeout_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_timeout_error))
        .layer(TimeoutLayer::new(config.request_timeout));

    let mut app: Router = routes::all()
        .layer(cors_layer(&config.allowed_origin))
        .layer(TraceLayer::new_for_http())
        .layer(timeout_stack)
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.body_limit));

    if config.log_post_body {
        app = app.layer(middleware::from_fn_with_state(config.body_limit, log_post_body_middleware));
    }
    app
}
