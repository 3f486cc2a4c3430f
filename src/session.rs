//! Wizard session
//!
//! Wires a [`TransferWizard`] to a [`BankLookupGateway`]. User events go in
//! through [`TransferSession::dispatch`]; lookup progress comes back on the
//! gateway channel and is fed through the same path, so all state changes
//! happen one event at a time.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::{
    LookupState, SessionContext, TransferDraft, ValidationErrors, WizardError, WizardStep,
};
use crate::lookup::{BankDirectory, BankLookupGateway, LookupEvent, LookupSettings};
use crate::wizard::{LookupCommand, TransferSummary, TransferWizard, WizardEvent};

pub struct TransferSession {
    wizard: TransferWizard,
    context: SessionContext,
    gateway: BankLookupGateway,
    lookups: mpsc::UnboundedReceiver<LookupEvent>,
}

impl TransferSession {
    /// Must be created inside a tokio runtime
    pub fn new(directory: Arc<dyn BankDirectory>, settings: LookupSettings) -> Self {
        let (gateway, lookups) = BankLookupGateway::new(directory, settings);
        Self {
            wizard: TransferWizard::new(),
            context: SessionContext::new(),
            gateway,
            lookups,
        }
    }

    pub fn wizard(&self) -> &TransferWizard {
        &self.wizard
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn draft(&self) -> &TransferDraft {
        self.wizard.draft()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.wizard.errors()
    }

    pub fn summary(&self) -> Option<TransferSummary> {
        self.wizard.summary()
    }

    /// Handle one event and carry out the lookup command it produced
    pub fn dispatch(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        let name = event.name();
        let command = match self.wizard.handle(&mut self.context, event) {
            Ok(command) => command,
            Err(e) => {
                if matches!(e, WizardError::InvalidTransition { .. }) {
                    warn!(session_id = %self.context.session_id, event = name, error = %e, "Event rejected");
                }
                return Err(e);
            }
        };

        match command {
            Some(LookupCommand::Schedule(bic)) => self.gateway.schedule(bic),
            Some(LookupCommand::Cancel) => {
                self.gateway.cancel();
            }
            None => {}
        }
        Ok(())
    }

    /// Wait for the next lookup event and apply it. Pends while nothing is
    /// scheduled; cancel safe.
    pub async fn next_lookup(&mut self) -> Option<LookupEvent> {
        let event = self.lookups.recv().await?;
        self.apply_lookup(event.clone());
        Some(event)
    }

    /// Apply every lookup event that is already waiting. Returns how many.
    pub fn drain_lookups(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.lookups.try_recv() {
            self.apply_lookup(event);
            applied += 1;
        }
        applied
    }

    /// Wait until the lookup for the current BIC has been applied
    pub async fn settle(&mut self) {
        self.drain_lookups();
        while self.context.lookup != LookupState::Idle {
            if self.next_lookup().await.is_none() {
                break;
            }
        }
    }

    fn apply_lookup(&mut self, event: LookupEvent) {
        // Lookup events are never rejected; stale ones are dropped by the wizard
        let _ = self.dispatch(event.into());
    }
}
