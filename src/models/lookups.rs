//! Lookup entities: genres, languages and countries.
//!
//! These tables are maintained directly in the database (there is no
//! user-facing CRUD surface for them); case-insensitive name uniqueness is
//! enforced by unique indexes on LOWER(name).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A book genre (e.g. Science Fiction, French Poetry)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    /// Canonical detail address for this genre
    pub fn absolute_url(&self) -> String {
        format!("/genres/{}", self.id)
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A book's natural language (e.g. English, French, Japanese)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

impl Language {
    /// Canonical detail address for this language
    pub fn absolute_url(&self) -> String {
        format!("/languages/{}", self.id)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An author's country, keyed by ISO 3166-1 alpha-3 code
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: String,
}

impl Country {
    /// Canonical detail address for this country
    pub fn absolute_url(&self) -> String {
        format!("/countries/{}", self.id)
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_labels_render_name() {
        let genre = Genre { id: 1, name: "Science Fiction".to_string() };
        assert_eq!(genre.to_string(), "Science Fiction");

        let country = Country { id: 2, name: "United Kingdom".to_string(), code: "GBR".to_string() };
        assert_eq!(country.to_string(), "United Kingdom");
        assert_eq!(country.absolute_url(), "/countries/2");
    }
}
