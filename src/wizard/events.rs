//! Wizard events
//!
//! Everything that can happen to a wizard session, as discrete values
//! handled one at a time.

use chrono::NaiveDate;

use crate::domain::{BankInfo, Field, TransferKind};
use crate::lookup::LookupEvent;

/// Input to [`TransferWizard::handle`](super::TransferWizard::handle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// A keystroke-level change of a text field
    Edit { field: Field, value: String },
    /// Focus left a field
    Blur(Field),
    SelectKind(TransferKind),
    /// Raw execution-date text as typed
    TypeDate(String),
    /// A date chosen from the calendar picker
    PickDate(NaiveDate),
    /// The debounced provider call for `bic` has started
    LookupStarted { bic: String },
    /// The provider call for `bic` finished
    LookupResolved { bic: String, info: Option<BankInfo> },
    /// Input -> Summary, guarded by validation
    Check,
    /// Summary -> Input
    Back,
    /// Summary -> Success
    Execute,
    /// Success -> Input with an empty draft
    Reset,
}

impl WizardEvent {
    pub fn edit(field: Field, value: impl Into<String>) -> Self {
        Self::Edit {
            field,
            value: value.into(),
        }
    }

    /// Short name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "edit",
            Self::Blur(_) => "blur",
            Self::SelectKind(_) => "select_kind",
            Self::TypeDate(_) => "type_date",
            Self::PickDate(_) => "pick_date",
            Self::LookupStarted { .. } => "lookup_started",
            Self::LookupResolved { .. } => "lookup_resolved",
            Self::Check => "check",
            Self::Back => "back",
            Self::Execute => "execute",
            Self::Reset => "reset",
        }
    }
}

impl From<LookupEvent> for WizardEvent {
    fn from(event: LookupEvent) -> Self {
        match event {
            LookupEvent::Started { bic } => Self::LookupStarted { bic },
            LookupEvent::Resolved { bic, info } => Self::LookupResolved { bic, info },
        }
    }
}

/// What the wizard asks of the lookup gateway after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupCommand {
    /// Restart the quiet period for this BIC
    Schedule(String),
    /// Drop whatever is pending
    Cancel,
}
