//! Biblio Library Catalog Server
//!
//! A Rust implementation of a library catalog: books, authors and physical
//! copies, with loan tracking (my loans, loans on issue, renewal) exposed as
//! a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
