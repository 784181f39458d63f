//! In-memory book storage shared by the request handlers.

use tokio::sync::RwLock;

use super::models::{Book, NewBook};

struct Shelf {
    books: Vec<Book>,
    next_id: i64,
}

/// Ordered collection of books guarded by a single lock.
///
/// Id assignment and append happen under the same write guard.
pub struct BookStore {
    shelf: RwLock<Shelf>,
}

impl BookStore {
    /// Create a store holding `books` in the given order
    pub fn new(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        Self {
            shelf: RwLock::new(Shelf { books, next_id }),
        }
    }

    /// Create a store with the catalogue's three starting entries
    pub fn seeded() -> Self {
        Self::new(vec![
            Book::new(1, "Go in Action", "William Kennedy", 300),
            Book::new(2, "Go Web Programming", "SauSheong Chang", 350),
            Book::new(3, "Go Programming Language", "Alln Donovan", 400),
        ])
    }

    /// Snapshot of every book in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.shelf.read().await.books.clone()
    }

    /// First book with the given id
    pub async fn get(&self, id: i64) -> Option<Book> {
        self.shelf
            .read()
            .await
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    /// Append a book under a freshly assigned id and return it
    pub async fn insert(&self, new_book: NewBook) -> Book {
        let mut shelf = self.shelf.write().await;
        let book = Book {
            id: shelf.next_id,
            title: new_book.title,
            author: new_book.author,
            pages: new_book.pages,
        };
        shelf.next_id += 1;
        shelf.books.push(book.clone());
        book
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::seeded()
    }
}
