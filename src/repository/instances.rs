//! Book instances (physical copies) repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, LoanEntry, LoanStatus},
};

// Left joins throughout: a copy may exist with no book attached yet, and a
// book may have no author.
const LOAN_ENTRY_SELECT: &str = r#"
    SELECT i.id, i.book_id, i.imprint, i.due_back, i.status, i.borrower_id,
           b.title AS book_title,
           a.first_name AS author_first_name,
           a.last_name AS author_last_name
    FROM book_instances i
    LEFT JOIN books b ON b.id = i.book_id
    LEFT JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Get a copy joined with its book and author, for the renewal form
    pub async fn get_loan_entry(&self, id: Uuid) -> AppResult<LoanEntry> {
        let query = format!("{} WHERE i.id = $1", LOAN_ENTRY_SELECT);
        sqlx::query_as::<_, LoanEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Copies on loan to the given borrower, soonest due first
    pub async fn loans_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<LoanEntry>> {
        let query = format!(
            "{} WHERE i.borrower_id = $1 AND i.status = 'o' ORDER BY i.due_back",
            LOAN_ENTRY_SELECT
        );
        let entries = sqlx::query_as::<_, LoanEntry>(&query)
            .bind(borrower_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// All copies currently on loan, soonest due first
    pub async fn all_on_loan(&self) -> AppResult<Vec<LoanEntry>> {
        let query = format!("{} WHERE i.status = 'o' ORDER BY i.due_back", LOAN_ENTRY_SELECT);
        let entries = sqlx::query_as::<_, LoanEntry>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Set a copy's due date (the renewal write)
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $1 WHERE id = $2")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }

        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies with the given status
    pub async fn count_with_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
