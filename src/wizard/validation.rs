//! Transfer validation
//!
//! All rules run on every check so the user sees every problem at once.

use chrono::NaiveDate;

use crate::domain::draft::MAX_PURPOSE_LENGTH;
use crate::domain::{
    is_valid_bic, is_valid_iban, parse_money, FieldError, TransferDraft, ValidationErrors,
};

/// Validate a draft against the rules for its transfer kind.
///
/// `today` is the earliest acceptable execution date.
pub fn validate(draft: &TransferDraft, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.receiver().trim().is_empty() {
        errors.push(FieldError::ReceiverRequired);
    }

    if !is_valid_iban(draft.iban()) {
        errors.push(FieldError::InvalidIban);
    }

    if !draft.bic().is_empty() && !is_valid_bic(draft.bic()) {
        errors.push(FieldError::InvalidBic);
    }

    let purpose_len = draft.purpose().chars().count();
    if purpose_len > MAX_PURPOSE_LENGTH {
        errors.push(FieldError::PurposeTooLong(purpose_len));
    }

    if let Err(e) = parse_money(draft.amount()) {
        errors.push(FieldError::InvalidAmount(e));
    }

    if draft.kind().requires_execution_date() {
        // A typed date that failed to parse never reaches the draft, so
        // "unset" covers both missing and malformed input.
        match draft.execution_date() {
            None => errors.push(FieldError::DateFormat),
            Some(date) if date < today => errors.push(FieldError::DateInPast),
            Some(_) => {}
        }
    }

    errors
}
