//! Business logic services

pub mod authors;
pub mod catalog;
pub mod dashboard;
pub mod loans;
pub mod sessions;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub loans: loans::LoansService,
    pub dashboard: dashboard::DashboardService,
    pub sessions: sessions::SessionStore,
}

impl Services {
    /// Create all services with the given repository and session store
    pub fn new(repository: Repository, sessions: sessions::SessionStore) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository),
            sessions,
        }
    }
}
