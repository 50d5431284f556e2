use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Segments};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_raw_path_and_query() {
    let resp = app()
        .oneshot(empty_request("GET", "/plop?arg1=%2F%251&page=0&size=10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/plop");
    assert_eq!(echo.query.as_deref(), Some("arg1=%2F%251&page=0&size=10"));
}

#[tokio::test]
async fn echo_decodes_params_in_order() {
    let resp = app()
        .oneshot(empty_request("GET", "/people?sort=name,asc&sort=age,desc&q=a%20b"))
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(
        echo.params,
        vec![
            ("sort".to_string(), "name,asc".to_string()),
            ("sort".to_string(), "age,desc".to_string()),
            ("q".to_string(), "a b".to_string()),
        ]
    );
}

#[tokio::test]
async fn echo_without_query() {
    let resp = app().oneshot(empty_request("DELETE", "/todos/1")).await.unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.query, None);
    assert!(echo.params.is_empty());
}

#[tokio::test]
async fn echo_reflects_body_and_headers() {
    let req = Request::builder()
        .method("POST")
        .uri("/todos")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("x-trace", "abc")
        .body(r#"{"title":"Buy milk"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, r#"{"title":"Buy milk"}"#);
    assert_eq!(echo.header("content-type"), Some("application/json"));
    assert_eq!(echo.header("x-trace"), Some("abc"));
}

#[tokio::test]
async fn echo_accepts_any_method() {
    for method in ["PUT", "PATCH", "OPTIONS"] {
        let resp = app().oneshot(empty_request(method, "/anything")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
    }
}

// --- segments ---

#[tokio::test]
async fn segments_decode_encoded_slash() {
    let resp = app()
        .oneshot(empty_request("GET", "/segments/1%2Fabc/2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let segments: Segments = body_json(resp).await;
    assert_eq!(segments.first, "1/abc");
    assert_eq!(segments.second, "2");
}

#[tokio::test]
async fn segments_with_extra_segment_falls_back_to_echo() {
    let resp = app()
        .oneshot(empty_request("GET", "/segments/1/abc/2"))
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.path, "/segments/1/abc/2");
}

#[tokio::test]
async fn echo_body_is_json_object() {
    let resp = app().oneshot(empty_request("GET", "/status")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["method"], "GET");
    assert_eq!(value["path"], "/status");
}
