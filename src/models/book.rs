//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::book_instance::BookInstance;
use super::lookups::{Genre, Language};

/// Full book model (DB + API)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[sqlx(skip)]
    #[serde(default)]
    pub instances: Vec<BookInstance>,
}

impl Book {
    /// Canonical detail address for this book
    pub fn absolute_url(&self) -> String {
        format!("/books/{}", self.id)
    }

    /// Comma-joined names of up to the first 3 genres, in stored order
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(3)
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    #[serde(default)]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// Genres attached in the given order
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request. Explicit allow-list: only these fields are editable
/// through the update route. `genre_ids`, when present, replaces the set.
/// For the nullable references an absent key keeps the stored value while an
/// explicit null clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<i32>)]
    pub author_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<i32>)]
    pub language_id: Option<Option<i32>>,
    pub genre_ids: Option<Vec<i32>>,
}

/// Context for the book create form: selectable choices and initial values.
/// `initial_language_id` is the id of the Language named "English".
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormContext {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub languages: Vec<Language>,
    pub initial_language_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_genres(names: &[&str]) -> Book {
        Book {
            id: 9,
            title: "1984".to_string(),
            summary: String::new(),
            isbn: "9780451524935".to_string(),
            author_id: None,
            language_id: None,
            author: None,
            language: None,
            genres: names
                .iter()
                .enumerate()
                .map(|(i, n)| Genre { id: i as i32 + 1, name: n.to_string() })
                .collect(),
            instances: Vec::new(),
        }
    }

    #[test]
    fn display_genre_joins_names_in_stored_order() {
        let book = book_with_genres(&["Dystopia", "Political Fiction"]);
        assert_eq!(book.display_genre(), "Dystopia, Political Fiction");
    }

    #[test]
    fn display_genre_caps_at_three() {
        let book = book_with_genres(&["A", "B", "C", "D", "E"]);
        assert_eq!(book.display_genre(), "A, B, C");
    }

    #[test]
    fn display_genre_empty_without_genres() {
        assert_eq!(book_with_genres(&[]).display_genre(), "");
    }

    #[test]
    fn label_and_url() {
        let book = book_with_genres(&[]);
        assert_eq!(book.to_string(), "1984");
        assert_eq!(book.absolute_url(), "/books/9");
    }

    #[test]
    fn update_distinguishes_absent_from_explicit_null() {
        let patch: UpdateBook = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.language_id, None);
        assert_eq!(patch.author_id, None);

        let patch: UpdateBook = serde_json::from_str(r#"{"language_id": null}"#).unwrap();
        assert_eq!(patch.language_id, Some(None));
        assert_eq!(patch.author_id, None);

        let patch: UpdateBook = serde_json::from_str(r#"{"author_id": 7}"#).unwrap();
        assert_eq!(patch.author_id, Some(Some(7)));
    }
}
