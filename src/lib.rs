//! transfer_wizard Library
//!
//! Re-exports modules for integration testing and the terminal binary.

pub mod config;
pub mod console;
pub mod domain;
mod error;
pub mod lookup;
pub mod session;
pub mod wizard;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{
    Amount, AmountError, BankInfo, Field, FieldError, LookupState, SessionContext, TransferDraft,
    TransferKind, ValidationErrors, WizardError, WizardStep,
};
pub use lookup::{BankDirectory, BankLookupGateway, LookupError, LookupEvent, LookupSettings};
pub use session::TransferSession;
pub use wizard::{LookupCommand, TransferSummary, TransferWizard, WizardEvent};
