//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables de
//! entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./library_server --port 8080 --admin-user admin --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9000 ADMIN_PASSWORD=secret ./library_server
//! ```

use crate::catalog::credentials::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USER};
use crate::error::ConfigError;
use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing::info;

/// Tamaño mínimo del buffer de lectura: una request line razonable
pub const MIN_BUFFER_SIZE: usize = 64;

/// Configuración del servidor de la biblioteca
#[derive(Debug, Clone, Parser)]
#[command(name = "library_server")]
#[command(about = "Servidor HTTP con API JSON para el catálogo y los préstamos de una biblioteca")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Bytes que se leen por conexión (el request entero debe caber)
    #[arg(long = "buffer-size", default_value = "4096", env = "BUFFER_SIZE")]
    pub buffer_size: usize,

    // === Credenciales ===

    /// Usuario inicial del administrador
    #[arg(long = "admin-user", default_value = DEFAULT_ADMIN_USER, env = "ADMIN_USER")]
    pub admin_user: String,

    /// Contraseña inicial del administrador
    #[arg(
        long = "admin-password",
        default_value = DEFAULT_ADMIN_PASSWORD,
        env = "ADMIN_PASSWORD",
        hide_env_values = true
    )]
    pub admin_password: String,

    // === Ejecución ===

    /// Atender las conexiones una por una en el thread del accept
    #[arg(long, env = "SEQUENTIAL", value_parser = BoolishValueParser::new())]
    pub sequential: bool,

    /// Nivel de log por defecto (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Configuración por defecto en `127.0.0.1`, puerto asignado por el SO
    ///
    /// Pensada para tests que levantan el servidor en el mismo proceso.
    pub fn ephemeral() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            ..Self::default()
        }
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use library_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(ConfigError::BufferTooSmall {
                min: MIN_BUFFER_SIZE,
                got: self.buffer_size,
            });
        }
        if self.admin_user.is_empty() {
            return Err(ConfigError::EmptyAdminUser);
        }
        if self.admin_password.is_empty() {
            return Err(ConfigError::EmptyAdminPassword);
        }

        Ok(())
    }

    /// Resumen de la configuración al arrancar (sin la contraseña)
    pub fn log_summary(&self) {
        info!(address = %self.address(), "Red");
        info!(
            buffer_size = self.buffer_size,
            mode = if self.sequential { "secuencial" } else { "un thread por conexión" },
            "Conexiones"
        );
        info!(admin_user = %self.admin_user, "Credenciales iniciales");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            buffer_size: 4096,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            sequential: false,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.buffer_size, 4096);
        assert_eq!(config.admin_user, "admin");
        assert_eq!(config.admin_password, "admin");
        assert!(!config.sequential);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_ephemeral() {
        let config = Config::ephemeral();
        assert_eq!(config.address(), "127.0.0.1:0");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = Config::ephemeral();
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }

    #[test]
    fn test_validate_buffer_too_small() {
        let mut config = Config::default();
        config.buffer_size = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::BufferTooSmall { min: 64, got: 10 })
        );

        config.buffer_size = MIN_BUFFER_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_admin() {
        let mut config = Config::default();
        config.admin_user.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyAdminUser));

        let mut config = Config::default();
        config.admin_password.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyAdminPassword));
    }

    #[test]
    fn test_parse_cli_flags() {
        let config = Config::try_parse_from([
            "library_server",
            "--port",
            "9000",
            "--admin-user",
            "root",
            "--sequential",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.admin_user, "root");
        assert!(config.sequential);
    }

    #[test]
    fn test_sequential_from_env_accepts_shell_values() {
        for (value, expected) in [("1", true), ("yes", true), ("true", true), ("0", false), ("off", false)] {
            std::env::set_var("SEQUENTIAL", value);
            let parsed = Config::try_parse_from(["library_server"]);
            std::env::remove_var("SEQUENTIAL");

            assert_eq!(parsed.unwrap().sequential, expected, "SEQUENTIAL={}", value);
        }
    }

    #[test]
    fn test_config_log_summary() {
        // Sin subscriber instalado; no debe entrar en pánico
        Config::default().log_summary();
    }
}
