//! Declarative authorization policy.
//!
//! Every routed operation is listed here with its access requirement, and a
//! single middleware enforces the table: it decodes the bearer token where
//! one is needed, checks the required permission, and injects the verified
//! claims into the request for handlers that want the caller's identity.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    models::user::{Permission, UserClaims},
    AppState,
};

/// Routed operations of the catalog server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dashboard,
    ListBooks,
    BookDetail,
    ListAuthors,
    AuthorDetail,
    MyLoans,
    AllLoansOnIssue,
    RenewLoan,
    CreateAuthor,
    UpdateAuthor,
    DeleteAuthor,
    CreateBook,
    UpdateBook,
    DeleteBook,
}

/// What a caller must present for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Permission(Permission),
}

/// The policy table: operation → access requirement
pub fn access_for(operation: Operation) -> Access {
    match operation {
        Operation::Dashboard
        | Operation::ListBooks
        | Operation::BookDetail
        | Operation::ListAuthors
        | Operation::AuthorDetail => Access::Public,
        Operation::MyLoans => Access::Authenticated,
        Operation::AllLoansOnIssue => Access::Permission(Permission::ViewAllLoans),
        Operation::RenewLoan => Access::Permission(Permission::CanRenew),
        Operation::CreateAuthor => Access::Permission(Permission::AddAuthor),
        Operation::UpdateAuthor => Access::Permission(Permission::ChangeAuthor),
        Operation::DeleteAuthor => Access::Permission(Permission::DeleteAuthor),
        Operation::CreateBook => Access::Permission(Permission::AddBook),
        Operation::UpdateBook => Access::Permission(Permission::ChangeBook),
        Operation::DeleteBook => Access::Permission(Permission::DeleteBook),
    }
}

/// Denial shown for the all-loans page
pub const ALL_LOANS_DENIAL: &str = "Sorry, you do not have permission to access this page.";

const GENERIC_DENIAL: &str = "You do not have permission to perform this action.";

fn denial_message(operation: Operation) -> &'static str {
    match operation {
        Operation::AllLoansOnIssue => ALL_LOANS_DENIAL,
        _ => GENERIC_DENIAL,
    }
}

/// Middleware body: enforce the policy table for one operation
pub async fn enforce(
    operation: Operation,
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match access_for(operation) {
        Access::Public => {}
        access => {
            let claims = bearer_claims(req.headers(), &state.config.auth.jwt_secret)?;

            if let Access::Permission(required) = access {
                if !claims.has(required) {
                    tracing::debug!(
                        "Denied {:?} for user {}: missing {:?}",
                        operation,
                        claims.user_id,
                        required
                    );
                    return Err(AppError::Authorization(denial_message(operation).to_string()));
                }
            }

            req.extensions_mut().insert(claims);
        }
    }

    Ok(next.run(req).await)
}

/// Extract and verify the bearer token from request headers
fn bearer_claims(headers: &HeaderMap, secret: &str) -> AppResult<UserClaims> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..];

    UserClaims::from_token(token, secret).map_err(|e| AppError::Authentication(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_operations_are_public() {
        for op in [
            Operation::Dashboard,
            Operation::ListBooks,
            Operation::BookDetail,
            Operation::ListAuthors,
            Operation::AuthorDetail,
        ] {
            assert_eq!(access_for(op), Access::Public);
        }
    }

    #[test]
    fn my_loans_needs_identity_only() {
        assert_eq!(access_for(Operation::MyLoans), Access::Authenticated);
    }

    #[test]
    fn protected_operations_map_to_distinct_permissions() {
        assert_eq!(
            access_for(Operation::AllLoansOnIssue),
            Access::Permission(Permission::ViewAllLoans)
        );
        assert_eq!(
            access_for(Operation::RenewLoan),
            Access::Permission(Permission::CanRenew)
        );
        assert_eq!(
            access_for(Operation::DeleteAuthor),
            Access::Permission(Permission::DeleteAuthor)
        );
        assert_eq!(
            access_for(Operation::CreateBook),
            Access::Permission(Permission::AddBook)
        );
    }

    #[test]
    fn all_loans_page_has_its_own_denial_message() {
        assert_eq!(
            denial_message(Operation::AllLoansOnIssue),
            "Sorry, you do not have permission to access this page."
        );
        assert_ne!(denial_message(Operation::DeleteBook), ALL_LOANS_DENIAL);
    }

    #[test]
    fn bearer_claims_rejects_missing_and_malformed_headers() {
        let headers = HeaderMap::new();
        assert!(bearer_claims(&headers, "secret").is_err());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert!(bearer_claims(&headers, "secret").is_err());
    }

    #[test]
    fn bearer_claims_accepts_a_valid_token() {
        let claims = UserClaims::new(3, "reader", vec![Permission::CanRenew], 1);
        let token = claims.create_token("secret").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());

        let decoded = bearer_claims(&headers, "secret").unwrap();
        assert_eq!(decoded.user_id, 3);
        assert!(decoded.has(Permission::CanRenew));
    }
}
