//! Caller identity: permissions and JWT claims.
//!
//! Token issuance (login) belongs to the authentication collaborator; this
//! server only verifies bearer tokens and reads the claims.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Named capabilities a caller may hold, checked per protected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// See every copy currently on loan
    ViewAllLoans,
    /// Renew a loan (set a new due date)
    CanRenew,
    AddAuthor,
    ChangeAuthor,
    DeleteAuthor,
    AddBook,
    ChangeBook,
    DeleteBook,
}

/// Borrower identity row. Accounts are provisioned by the authentication
/// collaborator; loans reference them through `book_instances.borrower_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub permissions: Vec<Permission>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Build claims for a caller, valid for `expiration_hours` from now
    pub fn new(user_id: i32, login: &str, permissions: Vec<Permission>, expiration_hours: u64) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: login.to_string(),
            user_id,
            permissions,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(expiration_hours as i64)).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Whether the caller holds the given permission
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_permissions() {
        let claims = UserClaims::new(
            7,
            "librarian",
            vec![Permission::ViewAllLoans, Permission::CanRenew],
            24,
        );
        let token = claims.create_token("test-secret").unwrap();
        let decoded = UserClaims::from_token(&token, "test-secret").unwrap();

        assert_eq!(decoded.user_id, 7);
        assert_eq!(decoded.sub, "librarian");
        assert!(decoded.has(Permission::CanRenew));
        assert!(!decoded.has(Permission::DeleteBook));
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let claims = UserClaims::new(1, "reader", vec![], 24);
        let token = claims.create_token("secret-a").unwrap();
        assert!(UserClaims::from_token(&token, "secret-b").is_err());
    }

    #[test]
    fn permissions_serialize_as_snake_case() {
        let json = serde_json::to_string(&Permission::ViewAllLoans).unwrap();
        assert_eq!(json, "\"view_all_loans\"");
        let json = serde_json::to_string(&Permission::CanRenew).unwrap();
        assert_eq!(json, "\"can_renew\"");
    }
}
