use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf_kernel::settings::Settings;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let registry = bookshelf_app::registry();
    bookshelf_http::build_router(&registry, &Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request build"),
        )
        .await
        .expect("request execution");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, "").await
}

async fn post(app: &Router, body: &str) -> (StatusCode, String) {
    send(app, Method::POST, "/books", body).await
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("valid json response")
}

#[tokio::test]
async fn list_all_returns_seeded_books_in_order() {
    let app = app();
    let (status, body) = get(&app, "/books?all=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse(&body),
        json!({
            "data": [
                {"id": 1, "title": "Go in Action", "author": "William Kennedy", "pages": 300},
                {"id": 2, "title": "Go Web Programming", "author": "SauSheong Chang", "pages": 350},
                {"id": 3, "title": "Go Programming Language", "author": "Alln Donovan", "pages": 400}
            ],
            "total": 3
        })
    );
}

#[tokio::test]
async fn fetch_by_id_returns_single_book() {
    let app = app();
    let (status, body) = get(&app, "/books?id=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse(&body),
        json!({"id": 2, "title": "Go Web Programming", "author": "SauSheong Chang", "pages": 350})
    );
}

#[tokio::test]
async fn fetch_unknown_id_is_not_found() {
    let app = app();
    assert_eq!(
        get(&app, "/books?id=999").await,
        (StatusCode::NOT_FOUND, "Book not found".to_string())
    );
}

#[tokio::test]
async fn fetch_malformed_id_is_bad_request() {
    let app = app();
    assert_eq!(
        get(&app, "/books?id=abc").await,
        (StatusCode::BAD_REQUEST, "Invalid book ID".to_string())
    );
}

#[tokio::test]
async fn fetch_without_query_requires_id() {
    let app = app();
    let expected = (StatusCode::BAD_REQUEST, "Missing book ID".to_string());
    assert_eq!(get(&app, "/books").await, expected);
    assert_eq!(get(&app, "/books?id=").await, expected);
    assert_eq!(get(&app, "/books?all=false").await, expected);
}

#[tokio::test]
async fn all_takes_precedence_over_id() {
    let app = app();
    let (status, body) = get(&app, "/books?id=999&all=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["total"], 3);
}

#[tokio::test]
async fn create_appends_and_is_retrievable() {
    let app = app();

    let (status, body) = post(&app, r#"{"title":"X","author":"Y","pages":10}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = parse(&body);
    assert_eq!(created, json!({"id": 4, "title": "X", "author": "Y", "pages": 10}));

    let (_, body) = get(&app, "/books?all=true").await;
    let listing = parse(&body);
    assert_eq!(listing["total"], 4);
    assert_eq!(listing["data"][3], created);

    let (status, body) = get(&app, "/books?id=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), created);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app();
    let (status, body) = post(&app, r#"{"id":1,"title":"X","author":"Y","pages":10}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse(&body)["id"], 4);
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let app = app();
    let expected = (StatusCode::BAD_REQUEST, "Missing or invalid fields".to_string());
    assert_eq!(post(&app, r#"{"pages":10}"#).await, expected);
    assert_eq!(post(&app, r#"{"title":"X","author":"Y","pages":0}"#).await, expected);
    assert_eq!(post(&app, "{}").await, expected);

    let (_, body) = get(&app, "/books?all=true").await;
    assert_eq!(parse(&body)["total"], 3);
}

#[tokio::test]
async fn create_with_null_values_fails_validation() {
    let app = app();
    let expected = (StatusCode::BAD_REQUEST, "Missing or invalid fields".to_string());
    assert_eq!(
        post(&app, r#"{"title":null,"author":"Y","pages":10}"#).await,
        expected
    );
    assert_eq!(post(&app, "null").await, expected);

    let (_, body) = get(&app, "/books?all=true").await;
    assert_eq!(parse(&body)["total"], 3);
}

#[tokio::test]
async fn create_reads_only_the_first_json_value() {
    let app = app();
    let (status, body) = post(&app, r#"{"title":"X","author":"Y","pages":10} trailing"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse(&body)["id"], 4);
}

#[tokio::test]
async fn create_with_unknown_field_is_invalid_json() {
    let app = app();
    let expected = (StatusCode::BAD_REQUEST, "Invalid JSON payload".to_string());
    assert_eq!(
        post(&app, r#"{"title":"X","author":"Y","pages":10,"isbn":"1"}"#).await,
        expected
    );
    assert_eq!(post(&app, "not json").await, expected);
    assert_eq!(post(&app, "").await, expected);
    assert_eq!(post(&app, r#"{"title":"X","author":"Y","pages":"ten"}"#).await, expected);
    assert_eq!(post(&app, r#"{"Title":"X","author":"Y","pages":10}"#).await, expected);
    assert_eq!(
        post(&app, r#"{"title":"X","title":"Z","author":"Y","pages":10}"#).await,
        expected
    );
}

#[tokio::test]
async fn create_accepts_body_without_json_content_type() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/books")
                .body(Body::from(r#"{"title":"X","author":"Y","pages":10}"#))
                .expect("request build"),
        )
        .await
        .expect("request execution");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unsupported_method_is_not_allowed() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/books", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn error_responses_carry_error_headers() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/books?id=999")
                .body(Body::empty())
                .expect("request build"),
        )
        .await
        .expect("request execution");

    assert_eq!(response.headers()["x-error-code"], "not_found");
    assert!(response.headers().contains_key("x-trace-id"));
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = app();
    assert_eq!(get(&app, "/healthz").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(
        get(&app, "/books/health").await,
        (StatusCode::OK, "books module is healthy".to_string())
    );
}

#[tokio::test]
async fn openapi_document_lists_books_paths() {
    let app = app();
    let (status, body) = get(&app, "/docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let doc = parse(&body);
    assert!(doc["paths"]["/books"]["get"].is_object());
    assert!(doc["paths"]["/books"]["post"].is_object());
    assert!(doc["paths"]["/books/health"]["get"].is_object());
    assert!(doc["components"]["schemas"]["Book"].is_object());
}
