use super::{cors, error::ApiError, log_requests, page::INDEX_HTML, state::ServerState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Method,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::debug;

/// Pulls the post URL out of a JSON body. Missing, null, false, zero and empty
/// values all count as "no URL"; other non-string values are used as their JSON text.
fn url_from_body(body: &Value) -> Option<String> {
    match body.get("url")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

async fn process(state: &ServerState, url: &str) -> Response {
    match state.media.download(url).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => ApiError::from(e).into_response_for(state.developer()),
    }
}

/// `POST /api` with `{"url": "..."}`.
async fn submit_json(State(state): State<ServerState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => return ApiError::from(e).into_response_for(state.developer()),
    };
    if body.is_null() {
        return ApiError::NullBody.into_response_for(state.developer());
    }

    match url_from_body(&body) {
        Some(url) => process(&state, &url).await,
        None => ApiError::MissingUrl.into_response_for(state.developer()),
    }
}

/// `GET ...?url=...` runs an extraction, anything else gets the web page.
async fn dispatch(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if method == Method::GET {
        if let Some((_, url)) = params.iter().find(|(key, _)| key == "url") {
            if url.is_empty() {
                return ApiError::MissingUrl.into_response_for(state.developer());
            }
            return process(&state, url).await;
        }
    }

    debug!("Serving web page for {} request", method);
    Html(INDEX_HTML).into_response()
}

pub fn make_app(state: ServerState) -> Router {
    Router::new()
        .route("/api", post(submit_json).fallback(dispatch))
        .fallback(dispatch)
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::tests::StubExtractor;
    use crate::media::{Extractor, MediaService};
    use crate::server::RequestsLoggingLevel;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt; // for `oneshot`

    fn app_with(extractor: impl Extractor + 'static) -> Router {
        let media = MediaService::new(Box::new(extractor), "@dev");
        make_app(ServerState::new(RequestsLoggingLevel::None, media))
    }

    fn video_app() -> Router {
        app_with(StubExtractor::with_payload(json!({
            "id": "7106594312292453675",
            "title": "a video",
            "region": "US",
            "duration": 9,
            "create_time": 1700000000,
            "wmplay": "https://v/wm.mp4",
            "play": "https://v/plain.mp4",
            "wm_size": 300,
            "size": 200,
            "play_count": 1234567,
            "author": {"id": "1", "unique_id": "handle", "nickname": "Nick", "avatar": "https://a"}
        })))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn post_returns_normalized_result() {
        let response = video_app()
            .oneshot(post_json(r#"{"url": "https://www.tiktok.com/@u/video/1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["status"], json!(true));
        assert_eq!(body["developer"], json!("@dev"));
        assert_eq!(body["duration"], json!("9 Seconds"));
        assert_eq!(body["stats"]["views"], json!("1.234.567"));
        assert_eq!(
            body["data"],
            json!([
                {"type": "watermark", "url": "https://v/wm.mp4"},
                {"type": "nowatermark", "url": "https://v/plain.mp4"}
            ])
        );
    }

    #[tokio::test]
    async fn get_and_post_are_byte_identical() {
        let app = video_app();

        let via_get = app
            .clone()
            .oneshot(get("/?url=https%3A%2F%2Fwww.tiktok.com%2F%40u%2Fvideo%2F1"))
            .await
            .unwrap();
        let via_post = app
            .oneshot(post_json(r#"{"url": "https://www.tiktok.com/@u/video/1"}"#))
            .await
            .unwrap();

        assert_eq!(via_get.status(), StatusCode::OK);
        assert_eq!(via_post.status(), StatusCode::OK);
        assert_eq!(body_bytes(via_get).await, body_bytes(via_post).await);
    }

    #[tokio::test]
    async fn post_without_url_is_bad_request() {
        for body in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": null}"#] {
            let response = video_app().oneshot(post_json(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_cors(&response);
            assert_eq!(
                body_json(response).await,
                json!({
                    "status": false,
                    "developer": "@dev",
                    "message": "URL parameter is required"
                })
            );
        }
    }

    #[tokio::test]
    async fn get_with_empty_url_is_bad_request() {
        let response = video_app().oneshot(get("/?url=")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], json!(false));
    }

    #[tokio::test]
    async fn invalid_json_body_is_server_error() {
        let response = video_app().oneshot(post_json("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], json!(false));
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn null_body_is_server_error_other_non_objects_are_bad_request() {
        let response = video_app().oneshot(post_json("null")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = body_json(response).await;
        assert_eq!(body["status"], json!(false));
        assert_eq!(
            body["message"],
            json!("Invalid request body: cannot read url of null")
        );

        for body in [r#"[]"#, r#""https://x""#, "42"] {
            let response = video_app().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn extraction_failure_is_server_error() {
        let response = app_with(StubExtractor::empty())
            .oneshot(get("/?url=https://x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": false,
                "developer": "@dev",
                "message": "TikTok download failed: Failed to fetch TikTok data"
            })
        );

        let response = app_with(StubExtractor::failing("connection refused"))
            .oneshot(post_json(r#"{"url": "https://x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["message"],
            json!("TikTok download failed: connection refused")
        );
    }

    #[tokio::test]
    async fn options_is_empty_preflight() {
        for uri in ["/", "/api", "/anything"] {
            let request = Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = video_app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            assert!(body_bytes(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn other_requests_get_the_web_page() {
        let requests = vec![
            get("/"),
            get("/some/page"),
            get("/api"),
            get("/?other=1"),
            Request::builder()
                .method("POST")
                .uri("/elsewhere")
                .body(Body::from(r#"{"url": "https://x"}"#))
                .unwrap(),
            Request::builder()
                .method("DELETE")
                .uri("/api?url=https://x")
                .body(Body::empty())
                .unwrap(),
        ];

        for request in requests {
            let response = video_app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            assert!(response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html"));
            let body = body_bytes(response).await;
            assert_eq!(body, Bytes::from_static(INDEX_HTML.as_bytes()));
        }
    }

    #[tokio::test]
    async fn get_url_works_on_any_path() {
        let response = video_app()
            .oneshot(get("/api?url=https://www.tiktok.com/@u/video/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], json!("7106594312292453675"));
    }

    #[test]
    fn test_url_from_body() {
        assert_eq!(url_from_body(&json!({})), None);
        assert_eq!(url_from_body(&json!({"url": ""})), None);
        assert_eq!(url_from_body(&json!({"url": false})), None);
        assert_eq!(url_from_body(&json!({"url": 0})), None);
        assert_eq!(url_from_body(&json!([1, 2])), None);
        assert_eq!(
            url_from_body(&json!({"url": "https://x"})),
            Some("https://x".to_string())
        );
        assert_eq!(url_from_body(&json!({"url": 123})), Some("123".to_string()));
    }
}
