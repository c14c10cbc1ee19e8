//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Lee el request en una sola lectura y lo parsea
//! 4. Despacha al router, escribe la respuesta y cierra

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{build_router, Server};
