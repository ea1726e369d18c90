use reqwest::{Method, StatusCode};

use crate::helpers::TestApp;

#[tokio::test]
async fn root_serves_index_page() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{}", content_type);

    let body = res.text().await.expect("Failed to read body");
    assert!(body.contains("<form id=\"contact-form\">"));
}

#[tokio::test]
async fn root_answers_head_requests() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::HEAD, "")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn static_asset_is_served() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "styles.css")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::spawn().await;

    for (method, path) in [
        (Method::GET, "does-not-exist.html"),
        (Method::POST, "styles.css"),
        (Method::POST, "unknown"),
    ] {
        let res = app
            .request(method.clone(), path)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::NOT_FOUND, res.status(), "{} /{}", method, path);
    }
}
