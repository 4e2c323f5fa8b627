pub use in_memory_books_repository::InMemoryBookRepository;

use rand::Rng;

use crate::api::{Book, BookDetails, BookId, BookSummary, ListBooksQuery};

mod in_memory_books_repository;

const BOOK_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const BOOK_ID_LENGTH: usize = 16;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Book {0} missing from repository right after insert")]
    NotPersisted(BookId),

    #[error("Other error {0}")]
    Other(String),
}

/// Generates a random url-safe book id, collisions are not checked
pub fn generate_book_id() -> BookId {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LENGTH)
        .map(|_| BOOK_ID_ALPHABET[rng.gen_range(0..BOOK_ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// Predicates applied when listing books, all supplied ones must match
pub struct BookFilter {
    /// Lowercased substring of the book name
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = &self.name {
            if !book.name.to_lowercase().contains(name) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.reading != Some(reading) {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.finished != finished {
                return false;
            }
        }
        true
    }
}

impl From<ListBooksQuery> for BookFilter {
    fn from(query: ListBooksQuery) -> Self {
        Self {
            name: query.name.map(|name| name.to_lowercase()),
            reading: query.reading.as_deref().map(query_flag),
            finished: query.finished.as_deref().map(query_flag),
        }
    }
}

/// Query flags are decimal numbers: a value parsing as 1 (`1`, `1.0`) is true, everything else false
fn query_flag(value: &str) -> bool {
    value.trim().parse::<f64>().map(|v| v == 1.0).unwrap_or(false)
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Adds book to repository, returns an id assigned to the book
    async fn add_book(&self, details: BookDetails) -> Result<BookId, BookRepositoryError>;
    /// Lists books matching the filter in insertion order
    async fn list_books(&self, filter: &BookFilter)
        -> Result<Vec<BookSummary>, BookRepositoryError>;
    /// Retrieves the full book record
    async fn get_book(&self, book_id: &str) -> Result<Book, BookRepositoryError>;
    /// Replaces all details of the book, keeping its id and insertion time
    async fn update_book(
        &self,
        book_id: &str,
        details: BookDetails,
    ) -> Result<(), BookRepositoryError>;
    /// Removes the book from repository
    async fn delete_book(&self, book_id: &str) -> Result<(), BookRepositoryError>;
}

#[cfg(test)]
mod book_filter_tests {
    use chrono::Utc;

    use super::*;

    fn book(name: &str, reading: Option<bool>, finished: bool) -> Book {
        let now = Utc::now();
        Book {
            id: generate_book_id(),
            name: name.to_string(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: Some(10),
            read_page: Some(if finished { 10 } else { 1 }),
            finished,
            reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generated_ids_are_16_url_safe_chars() {
        let id = generate_book_id();
        assert_eq!(id.len(), 16);
        assert!(id.bytes().all(|c| BOOK_ID_ALPHABET.contains(&c)));
        assert_ne!(id, generate_book_id());
    }

    #[test]
    fn test_query_flags() {
        assert!(query_flag("1"));
        assert!(query_flag("1.0"));
        assert!(!query_flag("0"));
        assert!(!query_flag("true"));
        assert!(!query_flag("0x1"));
        assert!(!query_flag(""));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = BookFilter::default();
        assert!(filter.matches(&book("x", None, false)));
        assert!(filter.matches(&book("y", Some(true), true)));
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let filter = BookFilter::from(ListBooksQuery {
            name: Some("DiCk".to_string()),
            ..ListBooksQuery::default()
        });
        assert!(filter.matches(&book("Moby Dick", None, false)));
        assert!(!filter.matches(&book("Dune", None, false)));
    }

    #[test]
    fn test_reading_filter_skips_books_without_flag() {
        let filter = BookFilter::from(ListBooksQuery {
            reading: Some("0".to_string()),
            ..ListBooksQuery::default()
        });
        assert!(filter.matches(&book("a", Some(false), false)));
        assert!(!filter.matches(&book("b", Some(true), false)));
        assert!(!filter.matches(&book("c", None, false)));
    }

    #[test]
    fn test_filters_are_combined() {
        let filter = BookFilter::from(ListBooksQuery {
            name: Some("dune".to_string()),
            reading: Some("1".to_string()),
            finished: Some("1".to_string()),
        });
        assert!(filter.matches(&book("Dune", Some(true), true)));
        assert!(!filter.matches(&book("Dune", Some(true), false)));
        assert!(!filter.matches(&book("Dune", Some(false), true)));
        assert!(!filter.matches(&book("Emma", Some(true), true)));
    }
}
