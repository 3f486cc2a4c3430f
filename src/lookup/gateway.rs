//! Debounced lookup gateway
//!
//! One lookup task at a time, keyed by the BIC that triggered it. A new BIC
//! aborts the previous task; results travel back as [`LookupEvent`]s on a
//! channel and carry their BIC so the receiver can drop stale ones.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{accept_answer, BankDirectory, BankInfo};

/// Timing of the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSettings {
    /// Quiet period after the last BIC change before the provider is called
    pub debounce: Duration,
    /// Upper bound for one provider call
    pub timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Progress of a lookup, reported back to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    /// Quiet period over, provider called
    Started { bic: String },
    /// Provider answered; `None` covers not-found and every failure
    Resolved { bic: String, info: Option<BankInfo> },
}

impl LookupEvent {
    pub fn bic(&self) -> &str {
        match self {
            Self::Started { bic } | Self::Resolved { bic, .. } => bic,
        }
    }
}

struct PendingLookup {
    bic: String,
    handle: JoinHandle<()>,
}

/// Debounces BIC lookups against a [`BankDirectory`].
pub struct BankLookupGateway {
    directory: Arc<dyn BankDirectory>,
    settings: LookupSettings,
    events: mpsc::UnboundedSender<LookupEvent>,
    pending: Option<PendingLookup>,
}

impl BankLookupGateway {
    /// Create the gateway and the receiving end of its event channel
    pub fn new(
        directory: Arc<dyn BankDirectory>,
        settings: LookupSettings,
    ) -> (Self, mpsc::UnboundedReceiver<LookupEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let gateway = Self {
            directory,
            settings,
            events,
            pending: None,
        };
        (gateway, receiver)
    }

    /// BIC of the task currently pending or in flight
    pub fn pending_bic(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.bic.as_str())
    }

    /// Start the quiet period for `bic`, superseding any earlier lookup.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, bic: String) {
        self.cancel();

        let directory = Arc::clone(&self.directory);
        let events = self.events.clone();
        let settings = self.settings;
        let task_bic = bic.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(settings.debounce).await;

            if events
                .send(LookupEvent::Started {
                    bic: task_bic.clone(),
                })
                .is_err()
            {
                return;
            }

            let info = resolve(directory, &task_bic, settings.timeout).await;
            let _ = events.send(LookupEvent::Resolved {
                bic: task_bic,
                info,
            });
        });

        debug!(bic = %bic, debounce_ms = self.settings.debounce.as_millis() as u64, "Lookup scheduled");
        self.pending = Some(PendingLookup { bic, handle });
    }

    /// Drop the pending lookup, if any. Returns its BIC.
    pub fn cancel(&mut self) -> Option<String> {
        let pending = self.pending.take()?;
        if pending.handle.is_finished() {
            return None;
        }
        pending.handle.abort();
        debug!(bic = %pending.bic, "Lookup superseded");
        Some(pending.bic)
    }
}

impl Drop for BankLookupGateway {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

/// Aborts the wrapped task when dropped, including when the task holding it
/// is itself aborted.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Call the provider in its own task so that a panic or a hang in it ends up
/// as `None` here.
async fn resolve(directory: Arc<dyn BankDirectory>, bic: &str, timeout: Duration) -> Option<BankInfo> {
    let provider = directory.name();
    let call_bic = bic.to_string();
    let mut call = AbortOnDrop(tokio::spawn(async move { directory.lookup(&call_bic).await }));

    match tokio::time::timeout(timeout, &mut call.0).await {
        Ok(Ok(Ok(Some(answer)))) => {
            let accepted = accept_answer(answer);
            match &accepted {
                Some(found) => info!(provider, bic, bank = %found.bank_name, "Bank resolved"),
                None => info!(provider, bic, "Provider reported unknown BIC"),
            }
            accepted
        }
        Ok(Ok(Ok(None))) => {
            info!(provider, bic, "Bank not found");
            None
        }
        Ok(Ok(Err(e))) => {
            warn!(provider, bic, error = %e, "Bank lookup failed");
            None
        }
        Ok(Err(join_error)) => {
            warn!(provider, bic, error = %join_error, "Bank lookup task aborted");
            None
        }
        Err(_) => {
            warn!(provider, bic, timeout_ms = timeout.as_millis() as u64, "Bank lookup timed out");
            None
        }
    }
}
