//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Códigos de estado que usa la API de la biblioteca:
//!
//! - **2xx**: Éxito (200 OK, 201 Created)
//! - **4xx**: Error del cliente (400, 401, 404, 409)
//! - **5xx**: Error del servidor (500)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created - Se agregó un libro al catálogo
    Created = 201,

    /// 400 Bad Request - Body ausente, JSON inválido o campos inválidos
    BadRequest = 400,

    /// 401 Unauthorized - Credenciales que no coinciden
    Unauthorized = 401,

    /// 404 Not Found - Ruta, libro o préstamo inexistente
    NotFound = 404,

    /// 409 Conflict - El libro ya está prestado
    Conflict = 409,

    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::Unauthorized.reason_phrase(), "Unauthorized");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::Conflict => "Conflict",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
