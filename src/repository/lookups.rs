//! Lookup tables repository: genres, languages, countries

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::lookups::{Country, Genre, Language},
};

#[derive(Clone)]
pub struct LookupsRepository {
    pool: Pool<Postgres>,
}

impl LookupsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all genres by name
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    /// Count all genres
    pub async fn count_genres(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// List all languages by name
    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        let languages = sqlx::query_as::<_, Language>("SELECT id, name FROM languages ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(languages)
    }

    /// Find a language by its exact name
    pub async fn find_language_by_name(&self, name: &str) -> AppResult<Option<Language>> {
        let language = sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(language)
    }

    /// List all countries by name
    pub async fn list_countries(&self) -> AppResult<Vec<Country>> {
        let countries =
            sqlx::query_as::<_, Country>("SELECT id, name, code FROM countries ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(countries)
    }
}
