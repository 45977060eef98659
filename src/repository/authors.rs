//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        lookups::Country,
    },
    repository::is_foreign_key_violation,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors, ordered by last name then first name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Get author by ID, with the country relation loaded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let mut author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        author.country = sqlx::query_as::<_, Country>(
            "SELECT id, name, code FROM countries WHERE id = $1",
        )
        .bind(author.country_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO authors (first_name, last_name, country_id, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.country_id)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing author. Absent fields keep their current value;
    /// an explicit null clears the nullable columns.
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        let result = sqlx::query(
            r#"
            UPDATE authors SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                country_id = CASE WHEN $3 THEN $4 ELSE country_id END,
                date_of_birth = CASE WHEN $5 THEN $6 ELSE date_of_birth END,
                date_of_death = CASE WHEN $7 THEN $8 ELSE date_of_death END
            WHERE id = $9
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.country_id.is_some())
        .bind(author.country_id.flatten())
        .bind(author.date_of_birth.is_some())
        .bind(author.date_of_birth.flatten())
        .bind(author.date_of_death.is_some())
        .bind(author.date_of_death.flatten())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete an author. Fails with `DeleteRestricted` while any book still
    /// references it (restrict-on-delete).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::DeleteRestricted(format!(
                        "Author {} is still referenced by at least one book",
                        id
                    ))
                } else {
                    e.into()
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
