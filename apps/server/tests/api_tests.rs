//! End-to-end tests of the HTTP API against an in-process service.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{App, test, web};
use demo_server::monitoring::{Fetcher, MonitorService, ProbeRecord};
use demo_server::{AppState, routes};
use serde_json::{Value, json};

/// Answers every probe with a 200 without touching the network
struct FixedFetcher;

#[async_trait::async_trait]
impl Fetcher for FixedFetcher {
    async fn fetch(&self, _url: &str) -> ProbeRecord {
        ProbeRecord::response(200, "<html>ok</html>", 500)
    }
}

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(MonitorService::new(Arc::new(FixedFetcher))))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(routes::cors())
                .app_data($state.clone())
                .configure(routes::configure)
                .default_service(web::to(routes::serve_static)),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let response = test::call_service(&$app, $req.to_request()).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_health() {
    let state = state();
    let app = init_app!(state);

    let response = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_cross_origin_requests_are_allowed() {
    let state = state();
    let app = init_app!(state);
    let origin = "http://frontend.example";

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/users").insert_header(("Origin", origin)).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let allowed = response.headers().get("access-control-allow-origin").unwrap().to_str().unwrap();
    assert!(allowed == origin || allowed == "*", "unexpected allowed origin {allowed}");

    let preflight = test::call_service(
        &app,
        test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/url-monitors")
            .insert_header(("Origin", origin))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .to_request(),
    )
    .await;
    assert!(preflight.status().is_success());
    assert!(preflight.headers().contains_key("access-control-allow-methods"));
}

#[actix_web::test]
async fn test_monitor_lifecycle() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/url-monitors")
            .set_json(json!({ "url": "http://example.com", "minInterval": 60, "maxInterval": 120 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["url"], "http://example.com");
    assert_eq!(body["data"]["minInterval"], 60);
    assert_eq!(body["data"]["maxInterval"], 120);
    let id = body["data"]["id"].as_u64().unwrap();

    // the first probe is fired right away
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/url-monitors"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], id);
    let records = body["data"][0]["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["statusCode"], 200);
    assert_eq!(records[0]["response"], "<html>ok</html>");

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/api/url-monitors/{id}")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = send!(app, test::TestRequest::delete().uri(&format!("/api/url-monitors/{id}")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());
    assert!(!state.monitors.is_active(id));

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/url-monitors"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send!(app, test::TestRequest::delete().uri(&format!("/api/url-monitors/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_monitor_with_inverted_bounds_is_rejected() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/url-monitors")
            .set_json(json!({ "url": "http://example.com", "minInterval": 10, "maxInterval": 5 }))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("minInterval"));
    assert!(state.monitors.is_empty());
}

#[actix_web::test]
async fn test_monitor_with_missing_fields_is_rejected() {
    let state = state();
    let app = init_app!(state);

    for payload in [
        json!({ "minInterval": 1, "maxInterval": 2 }),
        json!({ "url": "http://example.com", "maxInterval": 2 }),
        json!({ "url": "", "minInterval": 1, "maxInterval": 2 }),
    ] {
        let (status, body) =
            send!(app, test::TestRequest::post().uri("/api/url-monitors").set_json(payload));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    assert!(state.monitors.is_empty());
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/url-monitors")
            .insert_header(ContentType::json())
            .set_payload("{\"url\": ")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_delete_unknown_monitor() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(app, test::TestRequest::delete().uri("/api/url-monitors/12345"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send!(app, test::TestRequest::delete().uri("/api/url-monitors/not-a-number"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_crud() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/users"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/users/1"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/users/99"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Dave", "age": 35, "email": "dave@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["message"], "User created");

    let (status, body) = send!(
        app,
        test::TestRequest::put().uri("/api/users/4").set_json(json!({ "email": "d@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Dave");
    assert_eq!(body["data"]["email"], "d@example.com");

    let (status, _) =
        send!(app, test::TestRequest::put().uri("/api/users/99").set_json(json!({ "age": 1 })));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(app, test::TestRequest::delete().uri("/api/users/4"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");

    let (status, _) = send!(app, test::TestRequest::delete().uri("/api/users/4"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/users").set_json(json!({ "age": 35 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.users.len(), 3);
}

#[actix_web::test]
async fn test_messages_and_stats() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/messages").set_json(json!({ "content": "hi there" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert!(body["data"]["createdAt"].is_string());

    let (status, _) =
        send!(app, test::TestRequest::post().uri("/api/messages").set_json(json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/messages"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["content"], "hi there");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/stats"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userCount"], 3);
    assert_eq!(body["data"]["messageCount"], 1);
    assert_eq!(body["data"]["monitorCount"], 0);
    assert_eq!(body["data"]["server"], "actix-web");
}

#[actix_web::test]
async fn test_unmatched_path_without_static_dir() {
    let state = state();
    let app = init_app!(state);

    let (status, body) = send!(app, test::TestRequest::get().uri("/dashboard"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_static_files_and_index_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>demo</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

    let state = web::Data::new(
        AppState::new(MonitorService::new(Arc::new(FixedFetcher)))
            .with_static_dir(Some(dir.path().to_path_buf())),
    );
    let app = init_app!(state);

    let response = test::call_service(&app, test::TestRequest::get().uri("/app.js").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().get("content-type").unwrap().to_str().unwrap().contains("javascript")
    );
    assert_eq!(test::read_body(response).await, "console.log(1)");

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/some/page").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(test::read_body(response).await, "<h1>demo</h1>");

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/missing").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
