//! Transfer wizard module
//!
//! Input -> Summary -> Success. Events come in one at a time; lookups the
//! wizard wants started or dropped come back out as [`LookupCommand`]s.

mod events;
mod machine;
mod summary;
mod validation;


pub use events::{LookupCommand, WizardEvent};
pub use machine::{HandleResult, TransferWizard};
pub use summary::TransferSummary;
pub use validation::validate;
