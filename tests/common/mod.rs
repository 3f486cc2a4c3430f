//! Common test utilities

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use transfer_wizard::lookup::{BankDirectory, BankInfo, LookupError};
use transfer_wizard::{Field, TransferSession, WizardEvent};

pub const VALID_IBAN: &str = "DE89370400440532013000";

pub fn bank(name: &str, city: &str) -> BankInfo {
    BankInfo {
        bank_name: name.to_string(),
        city: city.to_string(),
    }
}

/// Bank directory with a canned answer and response time per BIC.
///
/// Records every BIC it was asked for, in order.
#[derive(Clone, Default)]
pub struct ScriptedDirectory {
    answers: HashMap<String, (Duration, Result<Option<BankInfo>, LookupError>)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(self, bic: &str, info: BankInfo, latency: Duration) -> Self {
        self.answer(bic, Ok(Some(info)), latency)
    }

    pub fn failing(self, bic: &str, error: LookupError, latency: Duration) -> Self {
        self.answer(bic, Err(error), latency)
    }

    fn answer(
        mut self,
        bic: &str,
        result: Result<Option<BankInfo>, LookupError>,
        latency: Duration,
    ) -> Self {
        self.answers.insert(bic.to_string(), (latency, result));
        self
    }

    /// Shared view of the call log, usable after the directory moved into a session
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl BankDirectory for ScriptedDirectory {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn lookup(&self, bic: &str) -> Result<Option<BankInfo>, LookupError> {
        self.calls.lock().unwrap().push(bic.to_string());
        match self.answers.get(bic) {
            Some((latency, result)) => {
                if !latency.is_zero() {
                    tokio::time::sleep(*latency).await;
                }
                result.clone()
            }
            None => Ok(None),
        }
    }
}

pub fn calls(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Fill every mandatory field of a standard transfer except the BIC
pub fn fill_valid_form(session: &mut TransferSession) {
    for (field, value) in [
        (Field::Receiver, "Max Mustermann"),
        (Field::Iban, VALID_IBAN),
        (Field::Amount, "12,50"),
        (Field::Purpose, "Rechnung 4711"),
    ] {
        session.dispatch(WizardEvent::edit(field, value)).unwrap();
    }
}

/// Type `text` into the BIC field one character at a time
pub fn type_bic(session: &mut TransferSession, text: &str) {
    let mut typed = String::new();
    for c in text.chars() {
        typed.push(c);
        session.dispatch(WizardEvent::edit(Field::Bic, typed.clone())).unwrap();
    }
}
