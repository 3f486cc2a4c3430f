//! Wizard steps

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step of the transfer wizard.
///
/// `Input -> Summary -> Success`, with `Summary -> Input` (back) and
/// `Success -> Input` (reset). Nothing else is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Input,
    Summary,
    Success,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Summary => "summary",
            Self::Success => "success",
        }
    }

    /// Only the input step may change the draft
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Input)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
