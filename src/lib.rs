//! # Library Server
//! src/lib.rs
//!
//! Servidor HTTP mínimo con una API JSON para el catálogo de libros y los
//! préstamos de una biblioteca. Todo el estado vive en memoria.
//!
//! ## Arquitectura
//!
//! - `http`: parsing de requests y construcción de responses
//! - `router`: enrutamiento (método, path) → handler
//! - `handlers`: endpoints de libros, préstamos y credenciales
//! - `catalog`: libros, préstamos y credenciales en memoria
//! - `state`: estado compartido entre conexiones
//! - `server`: ciclo de aceptación TCP
//! - `config`: CLI y variables de entorno
//! - `error`: tipos de error y su mapeo a códigos HTTP
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use library_server::config::Config;
//! use library_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("bind");
//! server.run().expect("accept loop");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod state;
