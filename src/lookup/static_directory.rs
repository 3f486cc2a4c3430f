//! In-memory bank directory
//!
//! Used when no remote directory is configured, and by tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::{BankDirectory, BankInfo, LookupError};
use crate::domain::identifiers::MIN_BIC_LENGTH;

/// Head offices of a few large German banks
const BUILTIN_BANKS: &[(&str, &str, &str)] = &[
    ("DEUTDEFF", "Deutsche Bank", "Frankfurt am Main"),
    ("COBADEFF", "Commerzbank", "Frankfurt am Main"),
    ("INGDDEFF", "ING-DiBa", "Frankfurt am Main"),
    ("GENODEFF", "DZ Bank", "Frankfurt am Main"),
    ("HYVEDEMM", "UniCredit Bank (HypoVereinsbank)", "Munich"),
    ("BYLADEMM", "Bayerische Landesbank", "Munich"),
    ("MARKDEFF", "Deutsche Bundesbank", "Frankfurt am Main"),
    ("PBNKDEFF", "Postbank", "Bonn"),
    ("BELADEBE", "Berliner Sparkasse", "Berlin"),
];

/// Bank directory backed by a map from BIC to bank.
///
/// An 11-character BIC that is not listed falls back to its 8-character head
/// office entry.
#[derive(Debug, Clone, Default)]
pub struct StaticBankDirectory {
    banks: HashMap<String, BankInfo>,
    latency: Duration,
}

impl StaticBankDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory preloaded with well-known head offices
    pub fn builtin() -> Self {
        BUILTIN_BANKS
            .iter()
            .fold(Self::new(), |dir, (bic, name, city)| dir.with_bank(bic, name, city))
    }

    pub fn with_bank(mut self, bic: &str, bank_name: &str, city: &str) -> Self {
        self.banks.insert(
            bic.to_uppercase(),
            BankInfo {
                bank_name: bank_name.to_string(),
                city: city.to_string(),
            },
        );
        self
    }

    /// Simulated response time
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    fn find(&self, bic: &str) -> Option<BankInfo> {
        let bic = bic.to_uppercase();
        self.banks
            .get(&bic)
            .or_else(|| bic.get(..MIN_BIC_LENGTH).and_then(|head| self.banks.get(head)))
            .cloned()
    }
}

#[async_trait]
impl BankDirectory for StaticBankDirectory {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn lookup(&self, bic: &str) -> Result<Option<BankInfo>, LookupError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.find(bic))
    }
}
