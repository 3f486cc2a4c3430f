//! Domain module
//!
//! Transfer draft, field-level validators and formatters.

pub mod amount;
pub mod context;
pub mod dates;
pub mod draft;
pub mod error;
pub mod identifiers;
pub mod step;
pub mod text;

pub use amount::{format_money, parse_money, Amount, AmountError};
pub use context::{LookupState, SessionContext};
pub use dates::{
    is_future_or_today, iso_to_local_display, iso_today, local_display_to_iso,
};
pub use draft::{BankInfo, Field, TransferDraft, TransferKind};
pub use error::{FieldError, ValidationErrors, WizardError};
pub use identifiers::{is_valid_bic, is_valid_iban};
pub use step::WizardStep;
pub use text::normalize_diacritics;
