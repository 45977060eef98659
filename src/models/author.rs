//! Author model and related types

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookSummary;
use super::lookups::Country;

/// Placeholder pre-filled in the create form when no date of death is given
pub static DEFAULT_DATE_OF_DEATH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2023, 11, 11).expect("valid placeholder date"));

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub country_id: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    // Loaded separately when the detail view asks for it
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl Author {
    /// Canonical detail address for this author
    pub fn absolute_url(&self) -> String {
        format!("/authors/{}", self.id)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.last_name, self.first_name)
    }
}

/// Author detail payload: the author plus the books referencing them
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<BookSummary>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,
    pub country_id: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    /// Defaults to the form placeholder when omitted
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request. Explicit allow-list: only these fields are
/// editable through the update route. For the nullable columns an absent key
/// keeps the stored value while an explicit null clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<i32>)]
    pub country_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub date_of_death: Option<Option<NaiveDate>>,
}

/// Context for the author create form: selectable countries and initial values
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorFormContext {
    pub countries: Vec<Country>,
    pub initial_date_of_death: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: &str, last: &str) -> Author {
        Author {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            country_id: None,
            date_of_birth: None,
            date_of_death: None,
            country: None,
        }
    }

    #[test]
    fn label_is_lastname_dot_firstname() {
        assert_eq!(author("George", "Orwell").to_string(), "Orwell. George");
    }

    #[test]
    fn absolute_url_points_at_detail_page() {
        assert_eq!(author("George", "Orwell").absolute_url(), "/authors/1");
    }

    #[test]
    fn placeholder_date_of_death() {
        assert_eq!(*DEFAULT_DATE_OF_DEATH, NaiveDate::from_ymd_opt(2023, 11, 11).unwrap());
    }

    #[test]
    fn update_distinguishes_absent_from_explicit_null() {
        let patch: UpdateAuthor = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.date_of_death, None);
        assert_eq!(patch.country_id, None);

        let patch: UpdateAuthor =
            serde_json::from_str(r#"{"date_of_death": null, "country_id": null}"#).unwrap();
        assert_eq!(patch.date_of_death, Some(None));
        assert_eq!(patch.country_id, Some(None));

        let patch: UpdateAuthor =
            serde_json::from_str(r#"{"date_of_death": "1950-01-21"}"#).unwrap();
        assert_eq!(
            patch.date_of_death,
            Some(NaiveDate::from_ymd_opt(1950, 1, 21))
        );
    }
}
