//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Ciclo de aceptación: una conexión, una lectura, una respuesta, cierre.
//! No hay keep-alive ni pipelining. Por defecto cada conexión se atiende en
//! su propio thread; con `--sequential` se atienden una por una en el
//! thread del accept.

use crate::config::Config;
use crate::handlers;
use crate::handlers::books::BOOK_PATH_PREFIX;
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::Router;
use crate::state::AppState;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn};

/// Router con todas las rutas de la API
pub fn build_router() -> Router {
    let mut router = Router::new();

    // Libros
    router.register(Method::GET, "/api/books", handlers::list_books_handler);
    router.register(Method::POST, "/api/books", handlers::add_book_handler);
    router.register_prefix(Method::DELETE, BOOK_PATH_PREFIX, handlers::delete_book_handler);

    // Préstamos
    router.register(Method::GET, "/api/students", handlers::list_loans_handler);
    router.register(Method::POST, "/api/issue", handlers::issue_handler);
    router.register(Method::POST, "/api/return", handlers::return_handler);

    // Credenciales
    router.register(Method::POST, "/api/login", handlers::login_handler);
    router.register(Method::POST, "/api/reset-password", handlers::reset_password_handler);

    router
}

/// Servidor HTTP de la biblioteca
pub struct Server {
    config: Config,
    router: Arc<Router>,
    state: Arc<AppState>,
    listener: TcpListener,
    next_request_id: AtomicU64,
}

impl Server {
    /// Hace bind en `config.address()` con un catálogo vacío
    ///
    /// Un error aquí es fatal para el proceso.
    pub fn bind(config: Config) -> std::io::Result<Self> {
        let state = AppState::from_config(&config);
        Self::with_state(config, state)
    }

    /// Igual que [`Server::bind`] pero con un estado ya armado
    pub fn with_state(config: Config, state: AppState) -> std::io::Result<Self> {
        let address = config.address();
        info!(%address, "Iniciando servidor");

        let listener = TcpListener::bind(&address)?;

        Ok(Self {
            config,
            router: Arc::new(build_router()),
            state: Arc::new(state),
            listener,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Acepta conexiones hasta que el listener falle
    ///
    /// Los errores de una conexión se registran y no detienen el ciclo.
    pub fn run(&self) -> std::io::Result<()> {
        info!(address = %self.local_addr()?, "Servidor escuchando");

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!(error = %e, "Error al aceptar conexión");
                    continue;
                }
            };

            let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
            let buffer_size = self.config.buffer_size;

            if self.config.sequential {
                Self::serve(stream, &self.router, &self.state, buffer_size, request_id);
            } else {
                let router = Arc::clone(&self.router);
                let state = Arc::clone(&self.state);
                thread::spawn(move || {
                    Self::serve(stream, &router, &state, buffer_size, request_id);
                });
            }
        }

        Ok(())
    }

    fn serve(
        stream: TcpStream,
        router: &Router,
        state: &AppState,
        buffer_size: usize,
        request_id: u64,
    ) {
        let _span = info_span!("request", id = request_id).entered();

        if let Err(e) = Self::handle_connection(stream, router, state, buffer_size) {
            error!(error = %e, "Error en la conexión");
        }
    }

    /// Lee un único buffer, responde y cierra
    fn handle_connection(
        mut stream: TcpStream,
        router: &Router,
        state: &AppState,
        buffer_size: usize,
    ) -> std::io::Result<()> {
        let start = Instant::now();

        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let mut buffer = vec![0u8; buffer_size];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            debug!(%peer, "Conexión cerrada sin datos");
            return Ok(());
        }

        let (response, method, path) = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                debug!(
                    version = request.version(),
                    host = request.header("Host"),
                    content_type = request.header("Content-Type"),
                    body_len = request.body().len(),
                    "Request parseado"
                );
                let response = router.route(&request, state);
                (response, request.method().as_str(), request.path().to_string())
            }
            Err(e) => {
                warn!(%peer, error = %e, "Request inválido");
                let response = Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e))
                    .with_cors();
                (response, "-", "-".to_string())
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let status = response.status();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_success() {
            info!(%peer, method, path = %path, status = status.as_u16(), latency_ms, "Request atendido");
        } else if status.is_client_error() {
            warn!(%peer, method, path = %path, status = status.as_u16(), latency_ms, "Request atendido");
        } else {
            error!(%peer, method, path = %path, status = status.as_u16(), latency_ms, "Request atendido");
        }

        Ok(())
    }
}
