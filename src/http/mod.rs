//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Implementación mínima de HTTP/1.1 sin librerías de alto nivel:
//!
//! - Parsing de requests (un request por conexión, leído de una vez)
//! - Construcción de responses con headers CORS
//! - Códigos de estado
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! Access-Control-Allow-Origin: *\r\n
//! Content-Length: 2\r\n
//! \r\n
//! []
//! ```

pub mod request;
pub mod response;
pub mod status;

// Permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
