use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, PIXEL_PNG};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_and_query() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/echo?q=a+b&q=c")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.query.as_deref(), Some("q=a+b&q=c"));
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_headers_and_body() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header("x-token", "abc")
                .body("x=1&y=2".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "x=1&y=2");
    assert!(echo
        .headers
        .contains(&("x-token".to_string(), "abc".to_string())));
    assert!(echo.headers.contains(&(
        "content-type".to_string(),
        "application/x-www-form-urlencoded".to_string()
    )));
}

// --- lines ---

#[tokio::test]
async fn lines_returns_multiline_body() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/lines").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"first\nsecond\nthird\n");
}

// --- image ---

#[tokio::test]
async fn image_serves_png_with_content_type() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/image").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], PIXEL_PNG);
}

// --- status ---

#[tokio::test]
async fn status_echoes_requested_code() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/status/404")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"status 404");
}

#[tokio::test]
async fn status_rejects_unknown_code_as_500() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/status/9999")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
