//! Transfer draft
//!
//! The transfer request as it is being entered. The wizard mutates it while
//! the user is on the input step; summary and success only read it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates;
use super::identifiers::{MAX_BIC_LENGTH, MAX_IBAN_LENGTH};
use super::text::normalize_diacritics;

/// Longest allowed payment reference
pub const MAX_PURPOSE_LENGTH: usize = 140;

/// Kind of transfer; decides which fields are mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    #[default]
    Standard,
    /// Executed on a chosen future date
    Scheduled,
    /// Real-time transfer
    Instant,
}

impl TransferKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard transfer",
            Self::Scheduled => "Scheduled transfer",
            Self::Instant => "Instant transfer",
        }
    }

    pub fn requires_execution_date(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown transfer kind: {0}")]
pub struct UnknownTransferKind(pub String);

impl FromStr for TransferKind {
    type Err = UnknownTransferKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "scheduled" => Ok(Self::Scheduled),
            "instant" => Ok(Self::Instant),
            _ => Err(UnknownTransferKind(s.to_string())),
        }
    }
}

/// User-facing form fields. Also the keys of the validation error set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Receiver,
    Iban,
    Bic,
    Purpose,
    Amount,
    ExecutionDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Iban => "iban",
            Self::Bic => "bic",
            Self::Purpose => "purpose",
            Self::Amount => "amount",
            Self::ExecutionDate => "execution_date",
        }
    }

    /// Input cap applied while typing
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Self::Iban => Some(MAX_IBAN_LENGTH),
            Self::Bic => Some(MAX_BIC_LENGTH),
            Self::Purpose => Some(MAX_PURPOSE_LENGTH),
            _ => None,
        }
    }

    /// Fields upper-cased as they are typed
    pub fn is_upper_case(&self) -> bool {
        matches!(self, Self::Iban | Self::Bic)
    }

    /// Fields whose umlauts are transliterated on blur
    pub fn normalizes_on_blur(&self) -> bool {
        matches!(self, Self::Receiver | Self::Purpose)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receiver" => Ok(Self::Receiver),
            "iban" => Ok(Self::Iban),
            "bic" => Ok(Self::Bic),
            "purpose" => Ok(Self::Purpose),
            "amount" => Ok(Self::Amount),
            "execution_date" | "date" => Ok(Self::ExecutionDate),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Bank name and city resolved from a BIC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    #[serde(rename = "bankName")]
    pub bank_name: String,
    pub city: String,
}

/// The transfer being entered.
///
/// # Invariants
/// - `bank_name`/`bank_city` belong to the current `bic`; editing the BIC clears them
/// - `execution_date` is either unset or a real calendar date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferDraft {
    receiver: String,
    iban: String,
    bic: String,
    bank_name: String,
    bank_city: String,
    purpose: String,
    amount: String,
    kind: TransferKind,
    execution_date: Option<NaiveDate>,
}

impl TransferDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn bank_city(&self) -> &str {
        &self.bank_city
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    pub fn execution_date(&self) -> Option<NaiveDate> {
        self.execution_date
    }

    /// Committed execution date as ISO text, empty when unset
    pub fn execution_date_iso(&self) -> String {
        self.execution_date.map(dates::to_iso).unwrap_or_default()
    }

    /// Text value of an editable field
    pub fn text(&self, field: Field) -> String {
        match field {
            Field::Receiver => self.receiver.clone(),
            Field::Iban => self.iban.clone(),
            Field::Bic => self.bic.clone(),
            Field::Purpose => self.purpose.clone(),
            Field::Amount => self.amount.clone(),
            Field::ExecutionDate => self.execution_date_iso(),
        }
    }

    /// Store typed text, applying the field's case rule and length cap.
    ///
    /// Returns the stored value. Editing the BIC drops any bank info.
    pub(crate) fn set_text(&mut self, field: Field, value: &str) -> String {
        let mut value = if field.is_upper_case() {
            value.to_uppercase()
        } else {
            value.to_string()
        };
        if let Some(max) = field.max_len() {
            if let Some((idx, _)) = value.char_indices().nth(max) {
                value.truncate(idx);
            }
        }

        self.store(field, value.clone());
        value
    }

    /// Transliterate umlauts in a free-text field. The result may exceed the
    /// typing cap; validation reports that. Returns true if the text changed.
    pub(crate) fn normalize(&mut self, field: Field) -> bool {
        if !field.normalizes_on_blur() {
            return false;
        }
        let current = self.text(field);
        let normalized = normalize_diacritics(&current);
        if normalized == current {
            return false;
        }
        self.store(field, normalized);
        true
    }

    fn store(&mut self, field: Field, value: String) {
        match field {
            Field::Receiver => self.receiver = value,
            Field::Iban => self.iban = value,
            Field::Bic => {
                if self.bic != value {
                    self.clear_bank_info();
                }
                self.bic = value;
            }
            Field::Purpose => self.purpose = value,
            Field::Amount => self.amount = value,
            Field::ExecutionDate => self.execution_date = dates::parse_iso(&value),
        }
    }

    pub(crate) fn set_kind(&mut self, kind: TransferKind) {
        self.kind = kind;
    }

    pub(crate) fn set_execution_date(&mut self, date: Option<NaiveDate>) {
        self.execution_date = date;
    }

    pub(crate) fn set_bank_info(&mut self, info: BankInfo) {
        self.bank_name = info.bank_name;
        self.bank_city = info.city;
    }

    pub(crate) fn clear_bank_info(&mut self) {
        self.bank_name.clear();
        self.bank_city.clear();
    }
}
