//! # Almacén del Catálogo
//! src/catalog/store.rs
//!
//! Libros y préstamos en memoria. Ambas colecciones se recorren del más
//! reciente al más antiguo: un libro agregado después "tapa" a otro con el
//! mismo id en las búsquedas.
//!
//! Internamente se guardan en orden de inserción (`push`) y se leen en
//! reversa, así insertar es O(1).

use super::{Book, Loan};
use crate::error::CatalogError;
use chrono::{Days, NaiveDate};
use tracing::info;

/// Libros y préstamos activos
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
    loans: Vec<Loan>,
}

impl Catalog {
    /// Catálogo vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un libro disponible. No verifica ids duplicados.
    pub fn add_book(&mut self, id: i64, title: &str, author: &str) {
        self.books.push(Book::new(id, title, author));
        info!(id, title, author, "Libro agregado");
    }

    /// Primer libro con ese id, del más reciente al más antiguo
    pub fn find_book(&self, id: i64) -> Option<&Book> {
        self.books.iter().rev().find(|book| book.id == id)
    }

    fn find_book_mut(&mut self, id: i64) -> Option<&mut Book> {
        self.books.iter_mut().rev().find(|book| book.id == id)
    }

    /// Elimina el primer libro con ese id
    ///
    /// Los préstamos que lo referencian quedan intactos.
    pub fn delete_book(&mut self, id: i64) -> bool {
        match self.books.iter().rposition(|book| book.id == id) {
            Some(index) => {
                self.books.remove(index);
                info!(id, "Libro eliminado");
                true
            }
            None => false,
        }
    }

    /// Presta un libro disponible
    ///
    /// La fecha de devolución es `issued_on + days`. Si el libro no existe,
    /// ya está prestado o la fecha no es representable, no cambia nada.
    ///
    /// # Ejemplo
    /// ```
    /// use chrono::NaiveDate;
    /// use library_server::catalog::Catalog;
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.add_book(1, "Dune", "Herbert");
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 11, 22).unwrap();
    /// let loan = catalog.issue_book(1, "Alice", today, 14).unwrap();
    ///
    /// assert_eq!(loan.due_date, NaiveDate::from_ymd_opt(2025, 12, 6).unwrap());
    /// assert!(!catalog.find_book(1).unwrap().available);
    /// ```
    pub fn issue_book(
        &mut self,
        id: i64,
        student_name: &str,
        issued_on: NaiveDate,
        days: u32,
    ) -> Result<Loan, CatalogError> {
        let due_date = issued_on
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(CatalogError::LoanPeriodOutOfRange(days))?;

        let book = self
            .find_book_mut(id)
            .ok_or(CatalogError::BookNotFound(id))?;

        if !book.available {
            return Err(CatalogError::BookUnavailable(id));
        }
        book.available = false;

        let loan = Loan {
            book_id: id,
            student_name: student_name.to_string(),
            book_title: book.title.clone(),
            date_issued: issued_on,
            due_date,
        };
        self.loans.push(loan.clone());

        info!(id, student = student_name, due = %due_date, "Libro prestado");
        Ok(loan)
    }

    /// Cierra el préstamo más reciente de ese libro y lo marca disponible
    ///
    /// Retorna `false` si no había préstamo. Si el libro fue eliminado
    /// mientras estaba prestado, solo se borra el préstamo.
    pub fn return_book(&mut self, id: i64) -> bool {
        let Some(index) = self.loans.iter().rposition(|loan| loan.book_id == id) else {
            return false;
        };
        self.loans.remove(index);

        if let Some(book) = self.find_book_mut(id) {
            book.available = true;
        }

        info!(id, "Libro devuelto");
        true
    }

    /// Libros del más reciente al más antiguo
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().rev()
    }

    /// Préstamos activos del más reciente al más antiguo
    pub fn loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().rev()
    }

    /// Arreglo JSON de libros
    pub fn books_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.books().collect::<Vec<_>>())
    }

    /// Arreglo JSON de préstamos activos
    pub fn loans_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.loans().collect::<Vec<_>>())
    }

    /// Arreglo JSON de préstamos vencidos a la fecha indicada
    pub fn overdue_loans_json(&self, today: NaiveDate) -> serde_json::Result<String> {
        serde_json::to_string(
            &self
                .loans()
                .filter(|loan| loan.is_overdue(today))
                .collect::<Vec<_>>(),
        )
    }
}
