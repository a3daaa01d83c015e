// Cross-cutting middleware
//
// - log_post_body_middleware: debug aid, logs POST request and response
//   bodies (capped) under the `post_body` tracing target. Only installed
//   when LOG_POST_BODY=1 because it buffers both bodies in memory. The
//   request body is read through `Limited`, so the configured body limit
//   holds before the route's own extractor ever sees it.
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt as _, LengthLimitError, Limited};

use crate::error::ApiError;

/// Bodies longer than this are truncated in the log line.
pub const LOG_BODY_CAP: usize = 64 * 1024;

/// Buffer the body, log it, then rebuild the request/response with the same
/// bytes so downstream extractors and the client see them unchanged.
pub async fn log_post_body_middleware(
    State(body_limit): State<usize>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let path: String = req.uri().path().to_string();
    let (parts, body) = req.into_parts();
    let collected: Bytes = match Limited::new(body, body_limit).collect().await {
        Ok(col) => col.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            tracing::info!(target: "post_body", path = %path, limit = body_limit, "POST payload over limit");
            return ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        }
        Err(e) => {
            tracing::warn!(target: "post_body", error = %e, "failed to buffer body");
            Bytes::new()
        }
    };
    log_body(&path, None, &collected, "POST payload");
    let req = Request::from_parts(parts, Body::from(collected));

    let res: Response = next.run(req).await;
    let status: u16 = res.status().as_u16();
    let (res_parts, res_body) = res.into_parts();
    let res_bytes: Bytes = collect_bytes(res_body).await;
    log_body(&path, Some(status), &res_bytes, "POST response");
    Response::from_parts(res_parts, Body::from(res_bytes))
}

async fn collect_bytes(body: Body) -> Bytes {
    match body.collect().await {
        Ok(col) => col.to_bytes(),
        Err(e) => {
            tracing::warn!(target: "post_body", error = %e, "failed to buffer body");
            Bytes::new()
        }
    }
}

fn log_body(path: &str, status: Option<u16>, bytes: &Bytes, what: &str) {
    let (shown, truncated) = loggable(bytes);
    tracing::info!(
        target: "post_body",
        path = %path,
        status = ?status,
        bytes = bytes.len(),
        truncated,
        body = %shown,
        "{}",
        what
    );
}

/// Text form of a body for logging: capped at `LOG_BODY_CAP`, binary elided.
fn loggable(bytes: &Bytes) -> (&str, bool) {
    let truncated = bytes.len() > LOG_BODY_CAP;
    let head: &[u8] = if truncated { &bytes[..LOG_BODY_CAP] } else { &bytes[..] };
    match std::str::from_utf8(head) {
        Ok(s) => (s, truncated),
        // a cut through a multi-byte char is still text
        Err(e) if truncated && e.error_len().is_none() => {
            (std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or("[binary body]"), true)
        }
        Err(_) => ("[binary body]", truncated),
    }
}
