//! # Libro
//! src/catalog/book.rs

use serde::Serialize;

/// Entrada del catálogo
///
/// Se serializa como `{"id":1,"title":"Dune","author":"Herbert","available":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Identificador elegido por el cliente (no se valida que sea único)
    pub id: i64,
    pub title: String,
    pub author: String,
    /// `false` mientras haya un préstamo activo
    pub available: bool,
}

impl Book {
    /// Libro nuevo, disponible
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            available: true,
        }
    }
}
