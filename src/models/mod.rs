//! Data models for the Biblio catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod lookups;
pub mod user;

/// Deserialize a patch field that must distinguish "absent" (keep the stored
/// value) from "explicit null" (clear the column). Used with
/// `#[serde(default)]`: a missing key stays `None`, a present key becomes
/// `Some(inner)` where `inner` is `None` for JSON null.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookSummary};
pub use book_instance::{BookInstance, LoanEntry, LoanStatus};
pub use lookups::{Country, Genre, Language};
pub use user::{Permission, User, UserClaims};
