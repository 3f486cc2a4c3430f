//! Read-only view of a checked transfer
//!
//! What the summary and success steps show. Built from a frozen draft; holds
//! display strings only.

use serde::Serialize;
use std::fmt;

use crate::domain::dates::to_local_display;
use crate::domain::{format_money, TransferDraft, TransferKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferSummary {
    pub kind: TransferKind,
    pub receiver: String,
    pub amount: String,
    pub iban: String,
    pub bic: String,
    /// Bank name with the city in parentheses, empty if unknown
    pub bank: String,
    pub purpose: String,
    /// Only for scheduled transfers
    pub execution_date: Option<String>,
}

impl TransferSummary {
    pub fn from_draft(draft: &TransferDraft) -> Self {
        let bank = match (draft.bank_name(), draft.bank_city()) {
            ("", _) => String::new(),
            (name, "") => name.to_string(),
            (name, city) => format!("{name} ({city})"),
        };

        let execution_date = if draft.kind().requires_execution_date() {
            draft.execution_date().map(to_local_display)
        } else {
            None
        };

        Self {
            kind: draft.kind(),
            receiver: draft.receiver().to_string(),
            amount: format_money(draft.amount()),
            iban: draft.iban().to_string(),
            bic: draft.bic().to_string(),
            bank,
            purpose: draft.purpose().to_string(),
            execution_date,
        }
    }
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kind:      {}", self.kind)?;
        writeln!(f, "Receiver:  {}", self.receiver)?;
        writeln!(f, "Amount:    {}", self.amount)?;
        writeln!(f, "IBAN:      {}", self.iban)?;
        writeln!(f, "BIC:       {}", self.bic)?;
        if !self.bank.is_empty() {
            writeln!(f, "Bank:      {}", self.bank)?;
        }
        writeln!(f, "Purpose:   {}", self.purpose)?;
        if let Some(date) = &self.execution_date {
            writeln!(f, "Execute on {date}")?;
        }
        Ok(())
    }
}
