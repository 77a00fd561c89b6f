use serde_json::{json, Value};

mod common;
use common::{setup_test_db, test_server};

#[tokio::test]
async fn root_serves_a_single_embedded_main_document() {
    let server = test_server(setup_test_db().await);

    let response = server.get("/").await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains(r#"<iframe src="/main.html" width="100%" height="100%">"#));
    assert_eq!(body.matches("<iframe").count(), 1);
}

#[tokio::test]
async fn container_fills_the_viewport_with_zero_margin() {
    let server = test_server(setup_test_db().await);

    let body = server.get("/").await.text();
    assert!(body.contains("height: 100vh; margin: 0"));
    assert!(body.contains("html, body { height: 100%; margin: 0; }"));
}

#[tokio::test]
async fn unknown_paths_render_nothing() {
    let server = test_server(setup_test_db().await);

    for path in ["/about", "/recipes", "/main", "/shell"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        assert!(
            !response.text().contains("<iframe"),
            "no embedded document expected at {}",
            path
        );
    }
}

#[tokio::test]
async fn contact_route_stays_disabled() {
    let server = test_server(setup_test_db().await);

    server.get("/contact").await.assert_status_not_found();
}

#[tokio::test]
async fn repeated_visits_render_the_same_document() {
    let server = test_server(setup_test_db().await);

    let first = server.get("/").await.text();
    let second = server.get("/").await.text();

    assert_eq!(first, second);
    assert_eq!(second.matches("<iframe").count(), 1);
}

#[tokio::test]
async fn embedded_documents_are_served_statically() {
    let server = test_server(setup_test_db().await);

    let main = server.get("/main.html").await;
    main.assert_status_ok();
    assert!(main.text().contains("<html"));

    let contact = server.get("/contact.html").await;
    contact.assert_status_ok();
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let server = test_server(setup_test_db().await);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
}
