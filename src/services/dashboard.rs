//! Dashboard service: catalog-wide counts

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book_instance::LoanStatus,
    repository::Repository,
};

/// Word counted in book titles on the dashboard
pub const TITLE_FILTER_WORD: &str = "the";

/// The dashboard's flat set of counts
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    pub num_books_filtered: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather all dashboard counts
    pub async fn counts(&self) -> AppResult<DashboardCounts> {
        Ok(DashboardCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.instances.count().await?,
            num_instances_available: self
                .repository
                .instances
                .count_with_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.lookups.count_genres().await?,
            num_books_filtered: self
                .repository
                .books
                .count_title_containing(TITLE_FILTER_WORD)
                .await?,
        })
    }
}
