// Route module aggregator
//
// Each submodule defines a focused set of routes. `all()` composes them into
// one router which `app::build_app` wraps with the middleware stack.
use axum::Router;

pub mod root;

/// Merge all route groups into a single router.
pub fn all() -> Router {
    Router::new().merge(root::router())
}
