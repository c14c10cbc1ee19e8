//! # Handlers de Préstamos
//! src/handlers/loans.rs
//!
//! - `GET /api/students` (opcional `?overdue=true`)
//! - `POST /api/issue`
//! - `POST /api/return`

use super::{parse_json, require_non_empty};
use crate::error::{ApiError, ApiResult, CatalogError};
use crate::http::{Request, Response, StatusCode};
use crate::state::AppState;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueRequest {
    book_id: i64,
    student_name: String,
    days: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReturnRequest {
    book_id: i64,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Handler para `GET /api/students`
///
/// Préstamos activos, el más reciente primero. Con `?overdue=true` solo
/// los vencidos a la fecha de hoy.
pub fn list_loans_handler(req: &Request, state: &AppState) -> ApiResult {
    let catalog = state.catalog();
    let body = match req.query_param("overdue") {
        Some("true") | Some("1") => catalog.overdue_loans_json(today()),
        _ => catalog.loans_json(),
    }
    .map_err(ApiError::Encode)?;

    Ok(Response::json(StatusCode::Ok, &body))
}

/// Handler para `POST /api/issue`
///
/// # Body
/// ```json
/// {"bookId": 1, "studentName": "Alice", "days": 14}
/// ```
///
/// # Respuestas
/// - 200 `{"success":true}`: préstamo creado, vence hoy + `days`
/// - 404: el libro no existe
/// - 409: el libro ya está prestado
pub fn issue_handler(req: &Request, state: &AppState) -> ApiResult {
    let issue: IssueRequest = parse_json(req)?;
    require_non_empty(&issue.student_name, "studentName must not be empty")?;

    state
        .catalog()
        .issue_book(issue.book_id, &issue.student_name, today(), issue.days)?;

    Ok(Response::success(StatusCode::Ok))
}

/// Handler para `POST /api/return`
///
/// # Body
/// ```json
/// {"bookId": 1}
/// ```
///
/// 404 si no hay préstamo activo para ese libro.
pub fn return_handler(req: &Request, state: &AppState) -> ApiResult {
    let ret: ReturnRequest = parse_json(req)?;

    if !state.catalog().return_book(ret.book_id) {
        return Err(CatalogError::LoanNotFound(ret.book_id).into());
    }

    Ok(Response::success(StatusCode::Ok))
}
