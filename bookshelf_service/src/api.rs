use chrono::{DateTime, Utc};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

use crate::timestamp;

pub type BookId = String;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Book record as it is stored and returned by `GET /books/{book_id}`
pub struct Book {
    pub id: BookId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    #[serde(with = "timestamp::serializer")]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "timestamp::serializer")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a new record from validated details, both timestamps set to `now`
    pub fn new(id: BookId, details: BookDetails, now: DateTime<Utc>) -> Self {
        let finished = details.is_finished();
        Self {
            id,
            name: details.name,
            year: details.year,
            author: details.author,
            summary: details.summary,
            publisher: details.publisher,
            page_count: details.page_count,
            read_page: details.read_page,
            finished,
            reading: details.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field, keeps `id` and `inserted_at`
    pub fn replace_details(&mut self, details: BookDetails, now: DateTime<Utc>) {
        self.finished = details.is_finished();
        self.name = details.name;
        self.year = details.year;
        self.author = details.author;
        self.summary = details.summary;
        self.publisher = details.publisher;
        self.page_count = details.page_count;
        self.read_page = details.read_page;
        self.reading = details.reading;
        self.updated_at = now;
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Struct containing book id, name and publisher, used when listing books
pub struct BookSummary {
    pub id: BookId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// Request body of `POST /books` and `PUT /books/{book_id}`.
/// Every field is optional on the wire, `validate` decides what is acceptable.
pub struct BookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
}

#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Please provide the book name")]
    MissingName,

    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

impl BookPayload {
    /// Checks the payload in the order clients rely on: name first, then page counts
    pub fn validate(self) -> Result<BookDetails, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingName)?;

        if let (Some(read_page), Some(page_count)) = (self.read_page, self.page_count) {
            if read_page > page_count {
                return Err(ValidationError::ReadPageExceedsPageCount);
            }
        }

        Ok(BookDetails {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// Validated book fields supplied by a client
pub struct BookDetails {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookDetails {
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Query string of `GET /books`
pub struct ListBooksQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Wrapper of every response body produced by the service
pub struct Envelope<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: Option<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message,
            data,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddBookResponse {
    pub book_id: BookId,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GetAllBooksResponse {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GetBookResponse {
    pub book: Book,
}
