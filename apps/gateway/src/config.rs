// Startup configuration
//
// Everything the gateway reads from the environment is read exactly once,
// here, and handed to `app::build_app`. Handlers never touch `std::env`.
//
// Recognized variables (all optional):
// - ALLOWED_URL          sole origin allowed by the CORS policy
// - GATEWAY_ADDR         listen address
// - BODY_LIMIT_BYTES     maximum accepted request body
// - REQUEST_TIMEOUT_SECS per-request timeout
// - LOG_POST_BODY        "1" turns on POST body logging (debug aid)
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_ALLOWED_URL: &str = "http://localhost:3000";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, fixed for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub allowed_origin: HeaderValue,
    pub addr: SocketAddr,
    pub body_limit: usize,
    pub request_timeout: Duration,
    pub log_post_body: bool,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Missing keys fall
    /// back to defaults; present but unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_url: String = lookup("ALLOWED_URL").unwrap_or_else(|| DEFAULT_ALLOWED_URL.to_string());
        let allowed_origin = HeaderValue::from_str(allowed_url.trim())
            .with_context(|| format!("ALLOWED_URL is not a valid origin: {:?}", allowed_url))?;

        let addr: SocketAddr = lookup("GATEWAY_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("GATEWAY_ADDR is not a valid socket address")?;

        let body_limit: usize = match lookup("BODY_LIMIT_BYTES") {
            Some(s) => s.trim().parse().context("BODY_LIMIT_BYTES must be a byte count")?,
            None => DEFAULT_BODY_LIMIT,
        };

        let timeout_secs: u64 = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(s) => s.trim().parse().context("REQUEST_TIMEOUT_SECS must be whole seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let log_post_body = lookup("LOG_POST_BODY").as_deref() == Some("1");

        Ok(Self {
            allowed_origin,
            addr,
            body_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            log_post_body,
        })
    }
}
