//! # Handlers de la API
//! src/handlers/mod.rs
//!
//! Endpoints de la API JSON:
//! - `books`: listar, agregar y eliminar libros
//! - `loans`: listar préstamos, prestar y devolver
//! - `auth`: login y cambio de credenciales
//!
//! Los bodies se decodifican con serde: el orden de los campos y los campos
//! extra no importan, los campos requeridos y sus tipos sí.

pub mod auth;
pub mod books;
pub mod loans;

pub use auth::{login_handler, reset_password_handler};
pub use books::{add_book_handler, delete_book_handler, list_books_handler};
pub use loans::{issue_handler, list_loans_handler, return_handler};

use crate::error::ApiError;
use crate::http::Request;
use serde::de::DeserializeOwned;

/// Decodifica el body JSON del request
fn parse_json<T: DeserializeOwned>(request: &Request) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(request.body())?)
}

/// Rechaza strings vacíos o solo con espacios
fn require_non_empty(value: &str, message: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(message));
    }
    Ok(())
}
