//! # Library Server - Entry Point
//! src/main.rs

use anyhow::Context;
use library_server::config::Config;
use library_server::server::Server;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::new();

    // RUST_LOG tiene prioridad sobre --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("library_server={}", config.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Library Server v{}", env!("CARGO_PKG_VERSION"));

    config.validate().context("configuración inválida")?;
    config.log_summary();

    let server = Server::bind(config).context("no se pudo abrir el puerto")?;
    server.run().context("el ciclo de aceptación terminó")?;

    Ok(())
}
