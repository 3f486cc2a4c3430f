//! Bank lookup module
//!
//! Resolves a BIC to a bank name and city. The provider behind
//! [`BankDirectory`] is an external service; every way it can fail is
//! folded into "no bank info" by the [`BankLookupGateway`].

mod gateway;
mod http;
mod static_directory;

use async_trait::async_trait;

use crate::domain::identifiers::{is_valid_bic, MIN_BIC_LENGTH};

pub use crate::domain::BankInfo;
pub use gateway::{BankLookupGateway, LookupEvent, LookupSettings};
pub use http::HttpBankDirectory;
pub use static_directory::StaticBankDirectory;

/// Name providers use for codes they cannot resolve
const UNKNOWN_SENTINEL: &str = "Unknown";

/// Lookup provider failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// A source of bank details keyed by BIC
#[async_trait]
pub trait BankDirectory: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the provider does not know the code
    async fn lookup(&self, bic: &str) -> Result<Option<BankInfo>, LookupError>;
}

/// Only complete, well-formed BICs are worth a provider call
pub fn should_lookup(bic: &str) -> bool {
    bic.len() >= MIN_BIC_LENGTH && is_valid_bic(bic)
}

/// Treat empty answers and the provider's "Unknown" sentinel as not found
pub(crate) fn accept_answer(info: BankInfo) -> Option<BankInfo> {
    let name = info.bank_name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(UNKNOWN_SENTINEL) {
        return None;
    }
    Some(info)
}
