//! Domain Error Types
//!
//! Field validation errors and rejected wizard transitions. None of these are
//! fatal; each one maps to something the user can see and fix.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::amount::AmountError;
use super::draft::{Field, MAX_PURPOSE_LENGTH};
use super::step::WizardStep;

/// A single field's validation failure. The display text is the message
/// shown next to the field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("Receiver is required.")]
    ReceiverRequired,

    #[error("Please enter a valid IBAN.")]
    InvalidIban,

    #[error("The BIC format is invalid.")]
    InvalidBic,

    #[error("Purpose must not exceed {MAX_PURPOSE_LENGTH} characters (got {0}).")]
    PurposeTooLong(usize),

    #[error("Please enter a positive amount.")]
    InvalidAmount(#[source] AmountError),

    /// Missing, or typed text that is not a real `DD.MM.YYYY` date
    #[error("Please choose a valid date (DD.MM.YYYY).")]
    DateFormat,

    #[error("The execution date must not be in the past.")]
    DateInPast,
}

impl FieldError {
    /// The field this error belongs to
    pub fn field(&self) -> Field {
        match self {
            Self::ReceiverRequired => Field::Receiver,
            Self::InvalidIban => Field::Iban,
            Self::InvalidBic => Field::Bic,
            Self::PurposeTooLong(_) => Field::Purpose,
            Self::InvalidAmount(_) => Field::Amount,
            Self::DateFormat | Self::DateInPast => Field::ExecutionDate,
        }
    }
}

/// Field name to message. Empty means the draft can be submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error under the field it belongs to
    pub fn push(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    /// Drop the error for one field; true if there was one
    pub fn clear_field(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with an error, in form order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, FieldError> {
        self.0.iter()
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.push(error);
        }
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Transition attempts the wizard refuses
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WizardError {
    /// Event not accepted in the current step; state is unchanged
    #[error("'{event}' is not possible on the {step} step")]
    InvalidTransition {
        step: WizardStep,
        event: &'static str,
    },

    /// Check found problems; the wizard stays on the input step
    #[error("Transfer has {count} invalid field(s): {0}", count = .0.len())]
    Invalid(ValidationErrors),
}

impl WizardError {
    pub fn invalid_transition(step: WizardStep, event: &'static str) -> Self {
        Self::InvalidTransition { step, event }
    }

    /// Validation failures, if that is what this is
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::InvalidTransition { .. } => None,
        }
    }
}
