//! # Handlers de Libros
//! src/handlers/books.rs
//!
//! - `GET /api/books`
//! - `POST /api/books`
//! - `DELETE /api/books/{id}`

use super::parse_json;
use crate::error::{ApiError, ApiResult, CatalogError};
use crate::http::{Request, Response, StatusCode};
use crate::state::AppState;
use serde::Deserialize;

/// Prefijo de `DELETE /api/books/{id}`
pub const BOOK_PATH_PREFIX: &str = "/api/books/";

#[derive(Debug, Deserialize)]
struct NewBook {
    id: i64,
    title: String,
    author: String,
}

/// Handler para `GET /api/books`
///
/// Arreglo de libros, el más reciente primero.
pub fn list_books_handler(_req: &Request, state: &AppState) -> ApiResult {
    let body = state.catalog().books_json().map_err(ApiError::Encode)?;
    Ok(Response::json(StatusCode::Ok, &body))
}

/// Handler para `POST /api/books`
///
/// # Body
/// ```json
/// {"id": 1, "title": "Dune", "author": "Herbert"}
/// ```
///
/// `id` debe ser positivo y `title`/`author` no vacíos. Responde 201.
pub fn add_book_handler(req: &Request, state: &AppState) -> ApiResult {
    let book: NewBook = parse_json(req)?;

    if book.id <= 0 || book.title.is_empty() || book.author.is_empty() {
        return Err(ApiError::InvalidBookData);
    }

    state.catalog().add_book(book.id, &book.title, &book.author);
    Ok(Response::success(StatusCode::Created))
}

/// Handler para `DELETE /api/books/{id}`
///
/// No toca los préstamos que referencian al libro.
pub fn delete_book_handler(req: &Request, state: &AppState) -> ApiResult {
    let raw_id = req
        .path()
        .strip_prefix(BOOK_PATH_PREFIX)
        .unwrap_or_default();
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::InvalidBookId(raw_id.to_string()))?;

    if !state.catalog().delete_book(id) {
        return Err(CatalogError::BookNotFound(id).into());
    }

    Ok(Response::success(StatusCode::Ok))
}
