//! Loan listing and renewal service

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::LoanEntry,
    repository::Repository,
};

/// Renewal horizon proposed on the form
const RENEWAL_WEEKS: i64 = 3;

/// Longest renewal a librarian may grant
const MAX_RENEWAL_WEEKS: i64 = 4;

/// Default due date proposed on the renewal form: today + 3 weeks
pub fn proposed_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(RENEWAL_WEEKS)
}

/// Validate a submitted renewal date. Returns the list of problems; empty
/// means the date is acceptable.
pub fn validate_renewal_date(date: NaiveDate, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    if date < today {
        errors.push("Invalid date - renewal in past".to_string());
    }
    if date > today + Duration::weeks(MAX_RENEWAL_WEEKS) {
        errors.push("Invalid date - renewal more than 4 weeks ahead".to_string());
    }

    errors
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to the given borrower, soonest due first
    pub async fn my_loans(&self, borrower_id: i32) -> AppResult<Vec<LoanEntry>> {
        self.repository.instances.loans_for_borrower(borrower_id).await
    }

    /// All copies currently on loan, soonest due first
    pub async fn all_on_loan(&self) -> AppResult<Vec<LoanEntry>> {
        self.repository.instances.all_on_loan().await
    }

    /// Get the copy the renewal form is about (not-found aborts the flow
    /// before any form processing)
    pub async fn get_loan_entry(&self, instance_id: Uuid) -> AppResult<LoanEntry> {
        self.repository.instances.get_loan_entry(instance_id).await
    }

    /// Persist a renewed due date for a copy
    pub async fn renew(&self, instance_id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        self.repository.instances.set_due_back(instance_id, due_back).await?;
        tracing::info!("Renewed book instance {} until {}", instance_id, due_back);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn proposed_date_is_three_weeks_out() {
        assert_eq!(proposed_renewal_date(date(2024, 1, 1)), date(2024, 1, 22));
    }

    #[test]
    fn renewal_in_past_is_rejected() {
        let errors = validate_renewal_date(date(2024, 1, 1), date(2024, 1, 2));
        assert_eq!(errors, vec!["Invalid date - renewal in past".to_string()]);
    }

    #[test]
    fn renewal_too_far_ahead_is_rejected() {
        let errors = validate_renewal_date(date(2024, 2, 1), date(2024, 1, 1));
        assert_eq!(
            errors,
            vec!["Invalid date - renewal more than 4 weeks ahead".to_string()]
        );
    }

    #[test]
    fn renewal_today_and_at_horizon_are_accepted() {
        assert!(validate_renewal_date(date(2024, 1, 1), date(2024, 1, 1)).is_empty());
        // exactly 4 weeks out
        assert!(validate_renewal_date(date(2024, 1, 29), date(2024, 1, 1)).is_empty());
    }
}
