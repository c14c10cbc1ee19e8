//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes para
//! enviarlas al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 201 Created\r\n
//! Content-Type: application/json\r\n
//! Access-Control-Allow-Origin: *\r\n
//! Content-Length: 16\r\n
//! \r\n
//! {"success":true}
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use library_server::http::{Response, StatusCode};
//!
//! let response = Response::success(StatusCode::Created).with_cors();
//! let text = String::from_utf8(response.to_bytes()).unwrap();
//!
//! assert!(text.starts_with("HTTP/1.1 201 Created\r\n"));
//! assert!(text.ends_with("\r\n\r\n{\"success\":true}"));
//! ```

use super::StatusCode;
use serde::Serialize;

/// Métodos que anuncian los headers CORS
pub const CORS_ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";

/// Headers que el navegador puede mandar en peticiones cross-origin
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción. `Content-Length` no se guarda aquí:
    /// se calcula desde el body al serializar.
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta (builder)
    ///
    /// Si el header ya existe, se sobrescribe conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Descarta el body; los headers quedan intactos
    pub fn clear_body(&mut self) {
        self.body.clear();
    }

    /// Respuesta JSON con el código indicado
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::http::{Response, StatusCode};
    ///
    /// let response = Response::json(StatusCode::Ok, "[]");
    /// assert_eq!(response.header("Content-Type"), Some("application/json"));
    /// ```
    pub fn json(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// Respuesta de texto plano
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// `{"success":true}` con el código indicado
    pub fn success(status: StatusCode) -> Self {
        Self::json(status, r#"{"success":true}"#)
    }

    /// Crea una respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"success":false,"error":"mensaje"}`. El mensaje se
    /// escapa, así que puede contener comillas o saltos de línea.
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "Book not found");
    /// assert_eq!(response.body(), br#"{"success":false,"error":"Book not found"}"#);
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody {
            success: false,
            error: message,
        })
        .unwrap_or_else(|_| String::from(r#"{"success":false}"#));
        Self::json(status, &body)
    }

    /// 404 en texto plano para rutas desconocidas
    pub fn not_found() -> Self {
        Self::text(StatusCode::NotFound, "Not Found")
    }

    /// Respuesta al preflight CORS (`OPTIONS`): 200 sin body
    pub fn preflight() -> Self {
        Self::new(StatusCode::Ok).with_cors()
    }

    /// Agrega los headers CORS permisivos
    pub fn with_cors(mut self) -> Self {
        self.add_cors_headers();
        self
    }

    /// Versión mutable de [`Response::with_cors`]
    pub fn add_cors_headers(&mut self) {
        self.add_header("Access-Control-Allow-Origin", "*");
        self.add_header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS);
        self.add_header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS);
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden de inserción, y al final `Content-Length`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        result.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene un header (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body como texto (lossy)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.header("Content-Type").is_none());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_header_overwrites() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("content-type", "application/json");

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert_eq!(text.to_ascii_lowercase().matches("content-type:").count(), 1);
    }

    #[test]
    fn test_error_response_escapes_message() {
        let response = Response::error(StatusCode::BadRequest, "bad \"quote\"");

        assert_eq!(response.status(), StatusCode::BadRequest);
        let value: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "bad \"quote\"");
    }

    #[test]
    fn test_not_found_is_plain_text() {
        let response = Response::not_found();
        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.body(), b"Not Found");
    }

    #[test]
    fn test_to_bytes_envelope() {
        let response = Response::success(StatusCode::Created).with_cors();
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with(
            "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nAccess-Control-Allow-Origin: *\r\n"
        ));
        assert!(text.contains("Access-Control-Allow-Methods: GET, POST, DELETE, OPTIONS\r\n"));
        assert!(text.contains("Access-Control-Allow-Headers: Content-Type\r\n"));
        assert!(text.ends_with("Content-Length: 16\r\n\r\n{\"success\":true}"));
    }

    #[test]
    fn test_preflight_has_empty_body() {
        let response = Response::preflight();
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Access-Control-Allow-Methods: GET, POST, DELETE, OPTIONS\r\n"));
        assert!(text.ends_with("Content-Length: 0\r\n\r\n"));
        assert!(response.header("Content-Type").is_none());
    }
}
