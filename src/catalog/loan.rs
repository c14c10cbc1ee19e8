//! # Préstamo
//! src/catalog/loan.rs
//!
//! Un préstamo activo vincula un libro con quien lo tiene. El título se copia
//! al momento del préstamo y no sigue cambios posteriores del libro.

use chrono::NaiveDate;
use serde::Serialize;

/// Préstamo activo
///
/// Formato JSON:
///
/// ```json
/// {"bookId":1,"name":"Alice","bookTitle":"Dune","dateIssued":"2025-11-22","dueDate":"2025-12-06"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub book_id: i64,
    #[serde(rename = "name")]
    pub student_name: String,
    pub book_title: String,
    pub date_issued: NaiveDate,
    pub due_date: NaiveDate,
}

impl Loan {
    /// Verifica si el préstamo está vencido en la fecha indicada
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date
    }
}
