//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod books;
pub mod dashboard;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::user::UserClaims};

/// Extractor for the authenticated caller. The policy middleware verifies
/// the bearer token and stashes the claims in request extensions; this just
/// picks them up.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserClaims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Authentication("Missing authentication".to_string()))
    }
}
