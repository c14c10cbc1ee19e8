//! # Handlers de Autenticación
//! src/handlers/auth.rs
//!
//! No hay sesiones ni tokens: `login` solo compara contra las credenciales
//! actuales y `reset-password` las reemplaza.

use super::{parse_json, require_non_empty};
use crate::error::{ApiResult, CatalogError};
use crate::http::{Request, Response, StatusCode};
use crate::state::AppState;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest {
    old_password: String,
    new_username: String,
    new_password: String,
}

/// Handler para `POST /api/login`
///
/// `{"username": "...", "password": "..."}` → 200 si coinciden, 401 si no.
pub fn login_handler(req: &Request, state: &AppState) -> ApiResult {
    let login: LoginRequest = parse_json(req)?;

    if !state.credentials().verify(&login.username, &login.password) {
        return Err(CatalogError::InvalidCredentials.into());
    }

    info!(username = %login.username, "Login exitoso");
    Ok(Response::success(StatusCode::Ok))
}

/// Handler para `POST /api/reset-password`
///
/// # Body
/// ```json
/// {"oldPassword": "admin", "newUsername": "root", "newPassword": "secret"}
/// ```
///
/// 401 si `oldPassword` no es la contraseña actual.
pub fn reset_password_handler(req: &Request, state: &AppState) -> ApiResult {
    let reset: ResetPasswordRequest = parse_json(req)?;
    require_non_empty(&reset.new_username, "newUsername must not be empty")?;
    require_non_empty(&reset.new_password, "newPassword must not be empty")?;

    state
        .credentials()
        .reset(&reset.old_password, &reset.new_username, &reset.new_password)?;

    info!(username = %reset.new_username, "Credenciales del administrador actualizadas");
    Ok(Response::success(StatusCode::Ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn post(path: &str, body: &str) -> Request {
        let raw = format!("POST {} HTTP/1.1\r\n\r\n{}", path, body);
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn login(state: &AppState, body: &str) -> ApiResult {
        login_handler(&post("/api/login", body), state)
    }

    fn reset(state: &AppState, body: &str) -> ApiResult {
        reset_password_handler(&post("/api/reset-password", body), state)
    }

    #[test]
    fn test_login_default_credentials() {
        let state = AppState::default();

        let response = login(&state, r#"{"username":"admin","password":"admin"}"#).unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let state = AppState::default();

        let err = login(&state, r#"{"username":"Admin","password":"admin"}"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::Unauthorized);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_login_missing_fields() {
        let state = AppState::default();

        let err = login(&state, r#"{"username":"admin"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
        assert_eq!(err.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_reset_then_login_with_new_credentials() {
        let state = AppState::default();

        reset(
            &state,
            r#"{"oldPassword":"admin","newUsername":"root","newPassword":"hunter2"}"#,
        )
        .unwrap();

        assert!(login(&state, r#"{"username":"admin","password":"admin"}"#).is_err());
        assert!(login(&state, r#"{"username":"root","password":"hunter2"}"#).is_ok());
    }

    #[test]
    fn test_reset_wrong_old_password() {
        let state = AppState::default();

        let err = reset(
            &state,
            r#"{"oldPassword":"nope","newUsername":"root","newPassword":"hunter2"}"#,
        )
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::Unauthorized);
        assert!(login(&state, r#"{"username":"admin","password":"admin"}"#).is_ok());
    }

    #[test]
    fn test_reset_rejects_missing_or_empty_fields() {
        let state = AppState::default();

        for body in [
            r#"{"oldPassword":"admin","newUsername":"root"}"#,
            r#"{"oldPassword":"admin","newUsername":"","newPassword":"x"}"#,
            r#"{"oldPassword":"admin","newUsername":"root","newPassword":""}"#,
        ] {
            let err = reset(&state, body).unwrap_err();
            assert_eq!(err.status(), StatusCode::BadRequest, "body: {}", body);
        }
        assert!(login(&state, r#"{"username":"admin","password":"admin"}"#).is_ok());
    }
}
