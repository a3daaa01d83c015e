// Root and health endpoints
// - `GET /` responds with the fixed message envelope
// - `POST /` echoes the received JSON object inside the envelope
// - `/healthz` is used by orchestrators/containers to check liveness
use axum::{routing::get, Json, Router};
use domain::Envelope;

use crate::extract::JsonObject;

/// Build the router for root/health endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root).post(echo))
        .route("/healthz", get(|| async { "ok" }))
}

/// GET /
async fn root() -> Json<Envelope> {
    Json(Envelope::get())
}

/// POST /
/// Body must be a JSON object; anything else is rejected by `JsonObject`
/// before this runs.
async fn echo(JsonObject(item): JsonObject) -> Json<Envelope> {
    Json(Envelope::echo(&item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
    use http_body_util::BodyExt as _;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = router().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn post(body: &'static str, content_type: Option<&'static str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::POST).uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn get_returns_fixed_message() {
        let req = Request::builder()
            .uri("/?foo=bar&x=1")
            .header("x-anything", "1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"{"message":"This is Get Request from python backend"}"#
        );
    }

    #[tokio::test]
    async fn post_echoes_object() {
        let (status, body) = send(post(r#"{"a": 1}"#, Some("application/json"))).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            v,
            json!({ "message": "This is Post Request from python backend and here is response {'a': 1}" })
        );
    }

    #[tokio::test]
    async fn post_keeps_key_order_and_nesting() {
        let (status, body) = send(post(
            r#"{"name": "x", "tags": ["a", null], "ok": true, "n": 1.5}"#,
            Some("application/json"),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            v["message"],
            "This is Post Request from python backend and here is response {'name': 'x', 'tags': ['a', None], 'ok': True, 'n': 1.5}"
        );
    }

    #[tokio::test]
    async fn post_echoes_numbers_as_written() {
        let (status, body) = send(post(
            r#"{"big": 18446744073709551616, "z": -0, "huge": 1e400}"#,
            Some("application/json"),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            v["message"],
            "This is Post Request from python backend and here is response {'big': 18446744073709551616, 'z': 0, 'huge': inf}"
        );
    }

    #[tokio::test]
    async fn post_without_content_type_is_parsed_as_json() {
        let (status, _) = send(post(r#"{}"#, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn post_rejects_non_objects() {
        for body in [r#"[1, 2]"#, "42", r#""text""#, "null", "true"] {
            let (status, bytes) = send(post(body, Some("application/json"))).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
            let v: Value = serde_json::from_slice(&bytes).unwrap();
            assert!(v.get("message").is_none());
            assert!(v.get("detail").is_some());
        }
    }

    #[tokio::test]
    async fn post_rejects_malformed_json() {
        for body in [r#"{"a": "#, "not json", ""] {
            let (status, bytes) = send(post(body, Some("application/json"))).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body:?}");
            let v: Value = serde_json::from_slice(&bytes).unwrap();
            assert!(v.get("message").is_none());
        }
    }

    #[tokio::test]
    async fn post_rejects_non_json_content_type() {
        let (status, _) = send(post(r#"{"a": 1}"#, Some("text/plain"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn healthz_and_unknown_paths() {
        let (status, body) = send(Request::builder().uri("/healthz").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");

        let (status, _) = send(Request::builder().uri("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::builder().method(Method::DELETE).uri("/").body(Body::empty()).unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
