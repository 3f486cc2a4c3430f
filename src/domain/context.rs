//! Session Context
//!
//! Display-side state of one wizard session that is not part of the
//! transfer itself: the raw date text, and which BIC lookup is pending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the BIC lookup for the current draft stands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "bic", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    /// Quiet period running, provider not called yet
    Debouncing(String),
    /// Provider called, result outstanding
    InFlight(String),
}

impl LookupState {
    /// BIC this lookup was started for
    pub fn bic(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Debouncing(bic) | Self::InFlight(bic) => Some(bic),
        }
    }
}

/// Context for one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Correlation ID for log lines of this session
    pub session_id: Uuid,

    /// Date text exactly as typed; may be incomplete
    pub date_input: String,

    /// Pending or in-flight BIC lookup
    pub lookup: LookupState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            date_input: String::new(),
            lookup: LookupState::Idle,
        }
    }

    pub fn with_session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = session_id;
        self
    }

    /// Drive the "fetching bank details" indicator
    pub fn lookup_in_progress(&self) -> bool {
        matches!(self.lookup, LookupState::InFlight(_))
    }

    /// Back to the state of a fresh session, keeping the session ID
    pub fn reset(&mut self) {
        self.date_input.clear();
        self.lookup = LookupState::Idle;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
