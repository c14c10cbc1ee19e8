//! # Errores
//! src/error.rs
//!
//! Tres niveles de error:
//! - [`CatalogError`]: reglas del catálogo y de las credenciales
//! - [`ApiError`]: errores de la capa HTTP (body, path, validación)
//! - [`ConfigError`]: configuración inválida al arrancar

use crate::http::{Response, StatusCode};
use thiserror::Error;

/// Errores del catálogo
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    #[error("Book already issued: {0}")]
    BookUnavailable(i64),

    #[error("Book not found in active loans: {0}")]
    LoanNotFound(i64),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid old password")]
    InvalidOldPassword,

    #[error("Loan period out of range: {0} days")]
    LoanPeriodOutOfRange(u32),
}

/// Errores que un handler convierte en respuesta
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid book data")]
    InvalidBookData,

    #[error("Invalid book id: {0}")]
    InvalidBookId(String),

    #[error("Invalid request: {0}")]
    Validation(&'static str),

    #[error("Failed to encode response: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    /// Código HTTP asociado al error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_)
            | ApiError::InvalidBookData
            | ApiError::InvalidBookId(_)
            | ApiError::Validation(_) => StatusCode::BadRequest,
            ApiError::Encode(_) => StatusCode::InternalServerError,
            ApiError::Catalog(err) => match err {
                CatalogError::BookNotFound(_) | CatalogError::LoanNotFound(_) => {
                    StatusCode::NotFound
                }
                CatalogError::BookUnavailable(_) => StatusCode::Conflict,
                CatalogError::InvalidCredentials | CatalogError::InvalidOldPassword => {
                    StatusCode::Unauthorized
                }
                CatalogError::LoanPeriodOutOfRange(_) => StatusCode::BadRequest,
            },
        }
    }

    /// `{"success":false,"error":"..."}` con el código de [`ApiError::status`]
    pub fn into_response(self) -> Response {
        Response::error(self.status(), &self.to_string())
    }
}

/// Resultado de un handler
pub type ApiResult = Result<Response, ApiError>;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Port must be > 0")]
    InvalidPort,

    #[error("Buffer size must be >= {min} bytes, got {got}")]
    BufferTooSmall { min: usize, got: usize },

    #[error("Admin user must not be empty")]
    EmptyAdminUser,

    #[error("Admin password must not be empty")]
    EmptyAdminPassword,
}
