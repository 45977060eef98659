//! Catalog (books) management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFormContext, BookSummary, CreateBook, UpdateBook},
    repository::Repository,
};

/// Fixed page size for the book list
pub const BOOKS_PER_PAGE: i64 = 5;

/// Name of the language pre-selected on the book create form
const DEFAULT_LANGUAGE_NAME: &str = "English";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, `BOOKS_PER_PAGE` per page
    pub async fn list_books(&self, page: i64) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.books.list(page, BOOKS_PER_PAGE).await
    }

    /// Get a book with its relations
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Build the create form context. The initial language is looked up by
    /// name at form-construction time; its absence is a hard failure of the
    /// create path, not a user-facing error.
    pub async fn book_form_context(&self) -> AppResult<BookFormContext> {
        let initial_language = self
            .repository
            .lookups
            .find_language_by_name(DEFAULT_LANGUAGE_NAME)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "No language named \"{}\" exists",
                    DEFAULT_LANGUAGE_NAME
                ))
            })?;

        Ok(BookFormContext {
            authors: self.repository.authors.list().await?,
            genres: self.repository.lookups.list_genres().await?,
            languages: self.repository.lookups.list_languages().await?,
            initial_language_id: initial_language.id,
        })
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book (restricted while copies reference it)
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
