//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea pares (método, path) a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Result<Response, ApiError> → Response + CORS
//! ```
//!
//! - `OPTIONS` a cualquier path responde el preflight CORS.
//! - Los paths se comparan exactos, salvo las rutas registradas como
//!   prefijo (`DELETE /api/books/{id}`).
//! - Sin handler para el par → `404` en texto plano.
//! - Las respuestas a `HEAD` van sin body.

use crate::error::ApiResult;
use crate::http::{Method, Request, Response};
use crate::state::AppState;
use tracing::warn;

/// Tipo de función handler
///
/// Un handler recibe el request y el estado compartido. Los errores se
/// convierten en respuesta en [`Router::route`].
pub type Handler = fn(&Request, &AppState) -> ApiResult;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(expected) => expected == path,
            PathPattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

/// Router que mapea (método, path) a handlers
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una ruta de path exacto
    ///
    /// # Ejemplo
    /// ```
    /// use library_server::error::ApiResult;
    /// use library_server::http::{Method, Request, Response, StatusCode};
    /// use library_server::router::Router;
    /// use library_server::state::AppState;
    ///
    /// fn ping(_req: &Request, _state: &AppState) -> ApiResult {
    ///     Ok(Response::json(StatusCode::Ok, r#"{"pong":true}"#))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "/api/ping", ping);
    ///
    /// let request = Request::parse(b"GET /api/ping HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request, &AppState::default());
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// ```
    pub fn register(&mut self, method: Method, path: &str, handler: Handler) {
        self.push(method, PathPattern::Exact(path.to_string()), handler);
    }

    /// Registra una ruta que acepta cualquier path con ese prefijo
    pub fn register_prefix(&mut self, method: Method, prefix: &str, handler: Handler) {
        self.push(method, PathPattern::Prefix(prefix.to_string()), handler);
    }

    fn push(&mut self, method: Method, pattern: PathPattern, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Las rutas se revisan en orden de registro.
    pub fn route(&self, request: &Request, state: &AppState) -> Response {
        if request.method() == Method::OPTIONS {
            return Self::finish(Response::preflight());
        }

        let path = request.path();
        let route = self
            .routes
            .iter()
            .find(|route| route.method == request.method() && route.pattern.matches(path));

        let response = match route {
            Some(route) => (route.handler)(request, state).unwrap_or_else(|err| {
                warn!(
                    method = request.method().as_str(),
                    path,
                    status = err.status().as_u16(),
                    error = %err,
                    "Request rechazado"
                );
                err.into_response()
            }),
            None => Response::not_found(),
        };

        let mut response = Self::finish(response.with_cors());
        if request.method() == Method::HEAD {
            response.clear_body();
        }
        response
    }

    /// Headers comunes a todas las respuestas
    fn finish(mut response: Response) -> Response {
        response.add_header("Connection", "close");
        response
    }
}
