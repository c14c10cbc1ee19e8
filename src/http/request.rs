//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser mínimo de HTTP/1.x: el request completo llega en un único buffer.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /api/books HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"id":1,"title":"Dune","author":"Herbert"}
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: todo lo que sigue al separador, sin interpretar

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre headers y body
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP reconocidos
///
/// HEAD, PUT y PATCH no tienen rutas: el router les responde 404 (a HEAD
/// sin body) en lugar de un error de parseo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    OPTIONS,
}

impl Method {
    /// Parsea un método HTTP desde un string (sensible a mayúsculas)
    fn from_token(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path de la petición sin query (ej: "/api/books")
    path: String,

    /// Query parameters parseados (ej: {"q": "dune"})
    query_params: HashMap<String, String>,

    /// Headers HTTP tal como llegaron
    headers: HashMap<String, String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,

    /// Bytes que siguen al separador de headers
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid request line format")]
    InvalidRequestLine,

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Empty request")]
    EmptyRequest,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use library_server::http::{Method, Request};
    ///
    /// let raw = b"POST /api/return HTTP/1.1\r\nHost: x\r\n\r\n{\"bookId\":1}";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::POST);
    /// assert_eq!(request.path(), "/api/return");
    /// assert_eq!(request.body(), b"{\"bookId\":1}");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, body) = match find_subslice(buffer, HEADER_TERMINATOR) {
            Some(pos) => (&buffer[..pos], &buffer[pos + HEADER_TERMINATOR.len()..]),
            None => (buffer, &[][..]),
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidRequestLine)?;

        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head.split("\r\n");
        let request_line = lines.next().ok_or(ParseError::EmptyRequest)?;

        let (method, path, query_params, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            path,
            query_params,
            headers,
            version,
            body: body.to_vec(),
        })
    }

    /// Formato: `GET /path?query HTTP/1.1`
    fn parse_request_line(
        line: &str,
    ) -> Result<(Method, String, HashMap<String, String>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        let [method, target, version] = parts.as_slice() else {
            return Err(ParseError::InvalidRequestLine);
        };

        let method = Method::from_token(method)?;
        let (path, query_params) = Self::parse_path_and_query(target);

        if *version != "HTTP/1.0" && *version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version.to_string()));
        }

        Ok((method, path, query_params, version.to_string()))
    }

    /// Ejemplo: "/api/books?limit=10" → ("/api/books", {"limit": "10"})
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_query_string(query)),
            None => (target.to_string(), HashMap::new()),
        }
    }

    fn parse_query_string(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|param| !param.is_empty())
            .map(|param| match param.split_once('=') {
                Some((key, value)) => (key.to_string(), Self::url_decode(value)),
                None => (param.to_string(), String::new()),
            })
            .collect()
    }

    // Solo espacios; no hay rutas que dependan de la query
    fn url_decode(s: &str) -> String {
        s.replace("%20", " ").replace('+', " ")
    }

    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_string(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene un header específico (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
