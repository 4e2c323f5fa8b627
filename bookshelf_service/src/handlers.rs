use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    AddBookResponse, BookId, BookPayload, Envelope, GetAllBooksResponse, GetBookResponse,
    ListBooksQuery,
};
use crate::books_repository::{BookFilter, BookRepository, BookRepositoryError};

fn fail(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::<()>::fail(message))
}

fn success_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()>::success(Some(message.to_string()), None))
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn add_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    payload: web::Json<BookPayload>,
) -> Result<HttpResponse, Error> {
    let details = match payload.into_inner().validate() {
        Ok(details) => details,
        Err(err) => {
            tracing::warn!("Add book rejected: {}", err);
            return Ok(fail(
                StatusCode::BAD_REQUEST,
                format!("Failed to add book. {}", err),
            ));
        }
    };

    Ok(match books_repository.add_book(details).await {
        Ok(book_id) => {
            tracing::info!(%book_id, "Book added");
            HttpResponse::Created()
                .append_header((LOCATION, format!("/books/{}", book_id)))
                .json(Envelope::success(
                    Some("Book added successfully".to_string()),
                    Some(AddBookResponse { book_id }),
                ))
        }
        Err(err) => {
            tracing::error!("Add book failed {}", err);
            HttpResponse::InternalServerError().json(Envelope::<()>::error("Failed to add book"))
        }
    })
}

#[api_v2_operation]
pub async fn get_all_books(
    books_repository: Data<Arc<dyn BookRepository>>,
    query: web::Query<ListBooksQuery>,
) -> Result<HttpResponse, Error> {
    let filter = BookFilter::from(query.into_inner());
    Ok(match books_repository.list_books(&filter).await {
        Ok(books) => HttpResponse::Ok().json(Envelope::success(
            None,
            Some(GetAllBooksResponse { books }),
        )),
        Err(err) => {
            tracing::error!("Get all books failed {}", err);
            HttpResponse::InternalServerError().json(Envelope::<()>::error("Failed to list books"))
        }
    })
}

#[api_v2_operation]
pub async fn get_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();
    Ok(match books_repository.get_book(&book_id).await {
        Ok(book) => HttpResponse::Ok().json(Envelope::success(None, Some(GetBookResponse { book }))),
        Err(BookRepositoryError::NotFound(_)) => fail(StatusCode::NOT_FOUND, "Book not found"),
        Err(err) => {
            tracing::error!("Get book failed {}", err);
            HttpResponse::InternalServerError().json(Envelope::<()>::error("Failed to get book"))
        }
    })
}

#[api_v2_operation]
pub async fn update_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
    payload: web::Json<BookPayload>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();
    let details = match payload.into_inner().validate() {
        Ok(details) => details,
        Err(err) => {
            tracing::warn!(book_id = %book_id, "Update book rejected: {}", err);
            return Ok(fail(
                StatusCode::BAD_REQUEST,
                format!("Failed to update book. {}", err),
            ));
        }
    };

    Ok(match books_repository.update_book(&book_id, details).await {
        Ok(()) => {
            tracing::info!(book_id = %book_id, "Book updated");
            success_message("Book updated successfully")
        }
        Err(BookRepositoryError::NotFound(_)) => fail(
            StatusCode::NOT_FOUND,
            "Failed to update book. Id not found",
        ),
        Err(err) => {
            tracing::error!("Update book failed {}", err);
            HttpResponse::InternalServerError()
                .json(Envelope::<()>::error("Failed to update book"))
        }
    })
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();
    Ok(match books_repository.delete_book(&book_id).await {
        Ok(()) => {
            tracing::info!(book_id = %book_id, "Book deleted");
            success_message("Book deleted successfully")
        }
        Err(BookRepositoryError::NotFound(_)) => fail(
            StatusCode::NOT_FOUND,
            "Failed to delete book. Id not found",
        ),
        Err(err) => {
            tracing::error!("Delete book failed {}", err);
            HttpResponse::InternalServerError()
                .json(Envelope::<()>::error("Failed to delete book"))
        }
    })
}
