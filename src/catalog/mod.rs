//! # Catálogo de la Biblioteca
//! src/catalog/mod.rs
//!
//! Estado en memoria del servidor:
//! - `book`: entradas del catálogo
//! - `loan`: préstamos activos
//! - `store`: el [`Catalog`] que es dueño de ambas colecciones
//! - `credentials`: usuario y contraseña del administrador
//!
//! Nada se persiste; todo se pierde al reiniciar.

pub mod book;
pub mod credentials;
pub mod loan;
pub mod store;

pub use book::Book;
pub use credentials::Credentials;
pub use loan::Loan;
pub use store::Catalog;
