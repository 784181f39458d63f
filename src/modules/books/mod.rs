pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};

use store::BookStore;

/// Books module: the `/books` catalogue backed by an in-memory store
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn mount_path(&self) -> String {
        "/books".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List all books or fetch one by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "all",
                                "in": "query",
                                "required": false,
                                "description": "`true` returns the whole catalogue",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "id",
                                "in": "query",
                                "required": false,
                                "description": "Id of the book to fetch, required unless `all=true`",
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The catalogue, or a single book when `id` is given",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "oneOf": [
                                                { "$ref": "#/components/schemas/BookListResponse" },
                                                { "$ref": "#/components/schemas/Book" }
                                            ]
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing book ID / Invalid book ID",
                                "content": {
                                    "text/plain": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "text/plain": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "The stored book with its assigned id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Invalid JSON payload / Missing or invalid fields",
                                "content": {
                                    "text/plain": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Identifier assigned by the store"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "pages": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Page count"
                            }
                        },
                        "required": ["title", "author", "pages"]
                    },
                    "BookListResponse": {
                        "type": "object",
                        "properties": {
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            },
                            "total": {
                                "type": "integer",
                                "description": "Number of books in `data`"
                            }
                        },
                        "required": ["data", "total"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Ignored; the store assigns ids"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book, non-empty"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book, non-empty"
                            },
                            "pages": {
                                "type": "integer",
                                "format": "int64",
                                "minimum": 1,
                                "description": "Page count"
                            }
                        },
                        "required": ["title", "author", "pages"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped"
        );
        Ok(())
    }
}

/// Create a books module backed by the seeded catalogue
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(BookStore::seeded())))
}
