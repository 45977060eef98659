//! Loan listing and renewal endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::LoanEntry,
    services::loans::{proposed_renewal_date, validate_renewal_date},
};

use super::AuthenticatedUser;

/// Renewal form state: the copy, the due date in play and any validation errors
#[derive(Serialize, ToSchema)]
pub struct RenewalFormResponse {
    pub instance: LoanEntry,
    pub due_back: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Renewal submission
#[derive(Deserialize, ToSchema)]
pub struct RenewalRequest {
    /// Proposed new due date
    pub due_back: NaiveDate,
}

/// Copies on loan to the authenticated caller
#[utoipa::path(
    get,
    path = "/mybooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's loans, soonest due first", body = Vec<LoanEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanEntry>>> {
    let loans = state.services.loans.my_loans(claims.user_id).await?;
    Ok(Json(loans))
}

/// All copies currently on loan, across all borrowers
#[utoipa::path(
    get,
    path = "/borrowed/",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All loans on issue, soonest due first", body = Vec<LoanEntry>),
        (status = 403, description = "Caller lacks the view-all-loans permission")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanEntry>>> {
    let loans = state.services.loans.all_on_loan().await?;
    Ok(Json(loans))
}

/// Renewal form for a copy, pre-filled with today + 3 weeks
#[utoipa::path(
    get,
    path = "/book/{instance_id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("instance_id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Renewal form with the proposed due date", body = RenewalFormResponse),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_book_form(
    State(state): State<crate::AppState>,
    Path(instance_id): Path<Uuid>,
) -> AppResult<Json<RenewalFormResponse>> {
    let instance = state.services.loans.get_loan_entry(instance_id).await?;

    Ok(Json(RenewalFormResponse {
        instance,
        due_back: proposed_renewal_date(Utc::now().date_naive()),
        errors: Vec::new(),
    }))
}

/// Renew a loan: set the submitted due date on the copy.
///
/// An unknown instance is a 404 before any form processing. An invalid date
/// re-presents the form with the entered value and the validation errors.
#[utoipa::path(
    post,
    path = "/book/{instance_id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("instance_id" = Uuid, Path, description = "Book instance ID")),
    request_body = RenewalRequest,
    responses(
        (status = 303, description = "Renewed; redirects to the all-loans page"),
        (status = 400, description = "Invalid date; form re-presented", body = RenewalFormResponse),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_book(
    State(state): State<crate::AppState>,
    Path(instance_id): Path<Uuid>,
    Json(form): Json<RenewalRequest>,
) -> AppResult<Response> {
    let instance = state.services.loans.get_loan_entry(instance_id).await?;

    let today = Utc::now().date_naive();
    let errors = validate_renewal_date(form.due_back, today);
    if !errors.is_empty() {
        let body = Json(RenewalFormResponse {
            instance,
            due_back: form.due_back,
            errors,
        });
        return Ok((StatusCode::BAD_REQUEST, body).into_response());
    }

    state.services.loans.renew(instance_id, form.due_back).await?;

    Ok(Redirect::to("/borrowed/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book_instance::LoanStatus;

    fn form(errors: Vec<String>) -> RenewalFormResponse {
        RenewalFormResponse {
            instance: LoanEntry {
                id: Uuid::nil(),
                book_id: Some(1),
                imprint: String::new(),
                due_back: None,
                status: LoanStatus::OnLoan,
                borrower_id: None,
                book_title: Some("1984".to_string()),
                author_first_name: None,
                author_last_name: None,
            },
            due_back: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            errors,
        }
    }

    #[test]
    fn clean_form_omits_the_errors_key() {
        let json = serde_json::to_value(form(Vec::new())).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["due_back"], "2024-01-22");
    }

    #[test]
    fn invalid_form_carries_its_errors() {
        let json =
            serde_json::to_value(form(vec!["Invalid date - renewal in past".to_string()])).unwrap();
        assert_eq!(json["errors"][0], "Invalid date - renewal in past");
    }
}
