//! Request handlers for `/books`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;

use super::models::{Book, BookListResponse, NewBook};
use super::store::BookStore;

pub const MISSING_BOOK_ID: &str = "Missing book ID";
pub const INVALID_BOOK_ID: &str = "Invalid book ID";
pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const INVALID_JSON_PAYLOAD: &str = "Invalid JSON payload";
pub const INVALID_FIELDS: &str = "Missing or invalid fields";

/// Route table for the books module, relative to its mount path.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(fetch_books).post(create_book))
        .route("/health", get(health_check))
        .with_state(store)
}

/// Query parameters understood by `GET /books`; the first occurrence of a key wins.
#[derive(Debug, Default, PartialEq, Eq)]
struct BookQuery {
    all: Option<String>,
    id: Option<String>,
}

impl BookQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "all" => &mut query.all,
                "id" => &mut query.id,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    fn wants_all(&self) -> bool {
        self.all.as_deref() == Some("true")
    }
}

/// `GET /books?all=true` lists every book, `GET /books?id=N` fetches one.
async fn fetch_books(
    State(store): State<Arc<BookStore>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = BookQuery::from_pairs(pairs);

    if query.wants_all() {
        let response = BookListResponse::from(store.list().await);
        return Ok(Json(response).into_response());
    }

    let raw_id = match query.id.as_deref() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AppError::bad_request(MISSING_BOOK_ID)),
    };

    let id: i64 = raw_id.parse().map_err(|err| {
        tracing::debug!(id = %raw_id, error = %err, "book id is not an integer");
        AppError::bad_request(INVALID_BOOK_ID)
    })?;

    match store.get(id).await {
        Some(book) => Ok(Json(book).into_response()),
        None => Err(AppError::not_found(BOOK_NOT_FOUND)),
    }
}

/// `POST /books` validates the payload, stores it and returns the created book.
///
/// The body is read as JSON whatever its content type; only the first JSON value counts.
async fn create_book(
    State(store): State<Arc<BookStore>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let new_book = NewBook::from_json(&body).map_err(|err| {
        tracing::debug!(error = %err, "rejected book payload");
        AppError::bad_request(INVALID_JSON_PAYLOAD)
    })?;

    let invalid = new_book.invalid_fields();
    if !invalid.is_empty() {
        tracing::debug!(fields = ?invalid, "book payload failed validation");
        return Err(AppError::bad_request(INVALID_FIELDS));
    }

    let book = store.insert(new_book).await;
    tracing::info!(id = book.id, title = %book.title, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}
