//! # Estado Compartido
//! src/state.rs
//!
//! Estado que reciben todos los handlers. Cada conexión puede correr en su
//! propio thread, así que catálogo y credenciales van detrás de un `Mutex`
//! que se mantiene tomado durante toda la operación.

use crate::catalog::{Catalog, Credentials};
use crate::config::Config;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct AppState {
    catalog: Mutex<Catalog>,
    credentials: Mutex<Credentials>,
}

impl AppState {
    pub fn new(catalog: Catalog, credentials: Credentials) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            credentials: Mutex::new(credentials),
        }
    }

    /// Catálogo vacío con las credenciales iniciales de la configuración
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Catalog::new(),
            Credentials::new(config.admin_user.as_str(), &config.admin_password),
        )
    }

    /// Bloquea el catálogo. Un lock envenenado se recupera.
    pub fn catalog(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bloquea las credenciales
    pub fn credentials(&self) -> MutexGuard<'_, Credentials> {
        self.credentials.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
