use anyhow::{bail, Context};
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    AddBookResponse, Book, BookId, BookPayload, BookSummary, Envelope, GetAllBooksResponse,
    GetBookResponse, ListBooksQuery,
};

pub struct BookshelfClient {
    url: String,
    client: ClientWithMiddleware,
}

/// Pulls the message out of an error envelope, falls back to the status code
async fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .json::<Envelope<()>>()
        .await
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| status.to_string())
}

impl BookshelfClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /books endpoint
    /// Returns id assigned to the new book
    pub async fn add_book(&self, payload: &BookPayload) -> anyhow::Result<BookId> {
        let response = self
            .client
            .post(format!("{}/books", self.url))
            .json(payload)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            bail!("Failed to add book {}", error_message(response).await)
        }

        let envelope: Envelope<AddBookResponse> = response.json().await?;
        Ok(envelope
            .data
            .context("No book id in add book response")?
            .book_id)
    }

    /// Calls GET /books endpoint with the given filters
    pub async fn list_books(&self, query: &ListBooksQuery) -> anyhow::Result<Vec<BookSummary>> {
        let response = self
            .client
            .get(format!("{}/books", self.url))
            .query(query)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to list books {}", error_message(response).await)
        }

        let envelope: Envelope<GetAllBooksResponse> = response.json().await?;
        Ok(envelope.data.map(|data| data.books).unwrap_or_default())
    }

    /// Calls GET /books/{book_id} endpoint
    /// Returns None if the book is not in the repository
    pub async fn get_book(&self, book_id: &str) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(format!("{}/books/{}", self.url, book_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            let envelope: Envelope<GetBookResponse> = response.json().await?;
            Ok(envelope.data.map(|data| data.book))
        } else {
            bail!("Failed to get book {}", error_message(response).await)
        }
    }

    /// Calls PUT /books/{book_id} endpoint
    /// Returns false if the book was not found
    pub async fn update_book(&self, book_id: &str, payload: &BookPayload) -> anyhow::Result<bool> {
        let response = self
            .client
            .put(format!("{}/books/{}", self.url, book_id))
            .json(payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to update book {}", error_message(response).await)
        }
    }

    /// Calls DELETE /books/{book_id} endpoint
    /// Returns false if the book was not found
    pub async fn delete_book(&self, book_id: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/books/{}", self.url, book_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to delete book {}", error_message(response).await)
        }
    }
}
