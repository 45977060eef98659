//! Author management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{
        Author, AuthorDetails, AuthorFormContext, CreateAuthor, UpdateAuthor, DEFAULT_DATE_OF_DEATH,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all authors
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get an author with the books referencing them
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetails { author, books })
    }

    /// Build the create form context
    pub async fn author_form_context(&self) -> AppResult<AuthorFormContext> {
        Ok(AuthorFormContext {
            countries: self.repository.lookups.list_countries().await?,
            initial_date_of_death: *DEFAULT_DATE_OF_DEATH,
        })
    }

    /// Create a new author. An omitted date of death falls back to the form
    /// placeholder.
    pub async fn create_author(&self, mut author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if author.date_of_death.is_none() {
            author.date_of_death = Some(*DEFAULT_DATE_OF_DEATH);
        }

        self.repository.authors.create(&author).await
    }

    /// Update an existing author
    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author (restricted while books reference them)
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
