//! # Credenciales del Administrador
//! src/catalog/credentials.rs
//!
//! Un único par usuario/contraseña para todo el proceso. No hay sesiones:
//! cada login es una comparación nueva contra los valores actuales.
//!
//! La contraseña se guarda como digest SHA-256, nunca en claro.

use crate::error::CatalogError;
use sha2::{Digest, Sha256};

/// Usuario y contraseña por defecto
pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password_digest: Vec<u8>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_digest: digest(password),
        }
    }

    /// Compara usuario y contraseña (sensible a mayúsculas)
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::catalog::Credentials;
    ///
    /// let credentials = Credentials::new("admin", "secret");
    /// assert!(credentials.verify("admin", "secret"));
    /// assert!(!credentials.verify("Admin", "secret"));
    /// ```
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password_matches(password)
    }

    /// Reemplaza usuario y contraseña si `old_password` coincide con la actual
    ///
    /// El usuario actual no se pide: basta con conocer la contraseña.
    pub fn reset(
        &mut self,
        old_password: &str,
        new_username: &str,
        new_password: &str,
    ) -> Result<(), CatalogError> {
        if !self.password_matches(old_password) {
            return Err(CatalogError::InvalidOldPassword);
        }

        self.username = new_username.to_string();
        self.password_digest = digest(new_password);
        Ok(())
    }

    fn password_matches(&self, password: &str) -> bool {
        digest(password) == self.password_digest
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USER, DEFAULT_ADMIN_PASSWORD)
    }
}

// Sin el digest, para que no termine en los logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn digest(password: &str) -> Vec<u8> {
    Sha256::digest(password.as_bytes()).to_vec()
}
