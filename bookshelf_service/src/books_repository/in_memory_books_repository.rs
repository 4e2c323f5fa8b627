use chrono::Utc;

use crate::api::{Book, BookDetails, BookId, BookSummary};
use crate::books_repository::{
    generate_book_id, BookFilter, BookRepository, BookRepositoryError,
};

/// Keeps books in insertion order for the lifetime of the process
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: parking_lot::RwLock<Vec<Book>>,
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn add_book(&self, details: BookDetails) -> Result<BookId, BookRepositoryError> {
        let id = generate_book_id();
        let mut locked_books = self.books.write();
        locked_books.push(Book::new(id.clone(), details, Utc::now()));

        if locked_books.iter().any(|book| book.id == id) {
            Ok(id)
        } else {
            Err(BookRepositoryError::NotPersisted(id))
        }
    }

    async fn list_books(
        &self,
        filter: &BookFilter,
    ) -> Result<Vec<BookSummary>, BookRepositoryError> {
        Ok(self
            .books
            .read()
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::to_summary)
            .collect())
    }

    async fn get_book(&self, book_id: &str) -> Result<Book, BookRepositoryError> {
        self.books
            .read()
            .iter()
            .find(|book| book.id == book_id)
            .cloned()
            .ok_or_else(|| BookRepositoryError::NotFound(book_id.to_string()))
    }

    async fn update_book(
        &self,
        book_id: &str,
        details: BookDetails,
    ) -> Result<(), BookRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .iter_mut()
            .find(|book| book.id == book_id)
            .ok_or_else(|| BookRepositoryError::NotFound(book_id.to_string()))?;
        book.replace_details(details, Utc::now());
        Ok(())
    }

    async fn delete_book(&self, book_id: &str) -> Result<(), BookRepositoryError> {
        let mut locked_books = self.books.write();
        let index = locked_books
            .iter()
            .position(|book| book.id == book_id)
            .ok_or_else(|| BookRepositoryError::NotFound(book_id.to_string()))?;
        locked_books.remove(index);
        Ok(())
    }
}
