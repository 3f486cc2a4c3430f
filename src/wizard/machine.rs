//! Transfer wizard state machine
//!
//! Owns the draft, the validation errors and the current step. Display-side
//! state lives in the [`SessionContext`] passed to every call.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::dates::{self, to_local_display};
use crate::domain::{
    BankInfo, Field, LookupState, SessionContext, TransferDraft, TransferKind, ValidationErrors,
    WizardError, WizardStep,
};
use crate::lookup::should_lookup;

use super::events::{LookupCommand, WizardEvent};
use super::summary::TransferSummary;
use super::validation::validate;

/// Result of handling one event
pub type HandleResult = Result<Option<LookupCommand>, WizardError>;

/// The transfer wizard
#[derive(Debug, Clone, Default)]
pub struct TransferWizard {
    step: WizardStep,
    draft: TransferDraft,
    errors: ValidationErrors,
}

impl TransferWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Read-only view for the summary and success steps
    pub fn summary(&self) -> Option<TransferSummary> {
        match self.step {
            WizardStep::Input => None,
            WizardStep::Summary | WizardStep::Success => {
                Some(TransferSummary::from_draft(&self.draft))
            }
        }
    }

    /// Earliest date the calendar picker should offer
    pub fn earliest_execution_date(&self) -> NaiveDate {
        dates::today()
    }

    /// Apply one event against today's date
    pub fn handle(&mut self, ctx: &mut SessionContext, event: WizardEvent) -> HandleResult {
        self.handle_at(ctx, event, dates::today())
    }

    /// Apply one event. `today` is only consulted by `Check`.
    pub fn handle_at(
        &mut self,
        ctx: &mut SessionContext,
        event: WizardEvent,
        today: NaiveDate,
    ) -> HandleResult {
        debug!(session_id = %ctx.session_id, step = %self.step, event = event.name(), "Handling event");

        match event {
            WizardEvent::Edit { field, value } => {
                self.require(WizardStep::Input, "edit")?;
                if field == Field::ExecutionDate {
                    self.type_date(ctx, value);
                    return Ok(None);
                }
                Ok(self.edit(ctx, field, &value))
            }
            WizardEvent::Blur(field) => {
                self.require(WizardStep::Input, "blur")?;
                if self.draft.normalize(field) {
                    debug!(session_id = %ctx.session_id, field = %field, "Normalized umlauts");
                }
                Ok(None)
            }
            WizardEvent::SelectKind(kind) => {
                self.require(WizardStep::Input, "select_kind")?;
                self.select_kind(kind);
                Ok(None)
            }
            WizardEvent::TypeDate(text) => {
                self.require(WizardStep::Input, "type_date")?;
                self.type_date(ctx, text);
                Ok(None)
            }
            WizardEvent::PickDate(date) => {
                self.require(WizardStep::Input, "pick_date")?;
                self.draft.set_execution_date(Some(date));
                ctx.date_input = to_local_display(date);
                self.errors.clear_field(Field::ExecutionDate);
                Ok(None)
            }
            WizardEvent::LookupStarted { bic } => {
                self.lookup_started(ctx, bic);
                Ok(None)
            }
            WizardEvent::LookupResolved { bic, info } => {
                self.lookup_resolved(ctx, bic, info);
                Ok(None)
            }
            WizardEvent::Check => self.check(ctx, today),
            WizardEvent::Back => {
                self.require(WizardStep::Summary, "back")?;
                self.step = WizardStep::Input;
                info!(session_id = %ctx.session_id, "Back to input");
                Ok(self.resume_lookup(ctx))
            }
            WizardEvent::Execute => {
                self.require(WizardStep::Summary, "execute")?;
                self.step = WizardStep::Success;
                info!(
                    session_id = %ctx.session_id,
                    kind = ?self.draft.kind(),
                    amount = self.draft.amount(),
                    "Transfer executed"
                );
                Ok(None)
            }
            WizardEvent::Reset => {
                self.require(WizardStep::Success, "reset")?;
                self.draft = TransferDraft::new();
                self.errors = ValidationErrors::new();
                ctx.reset();
                self.step = WizardStep::Input;
                info!(session_id = %ctx.session_id, "Started new transfer");
                Ok(Some(LookupCommand::Cancel))
            }
        }
    }

    fn require(&self, step: WizardStep, event: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::invalid_transition(self.step, event))
        }
    }

    fn edit(&mut self, ctx: &mut SessionContext, field: Field, value: &str) -> Option<LookupCommand> {
        let previous_bic = (field == Field::Bic).then(|| self.draft.bic().to_string());
        let stored = self.draft.set_text(field, value);
        self.errors.clear_field(field);

        match previous_bic {
            Some(previous) if previous != stored => Some(self.bic_changed(ctx, stored)),
            _ => None,
        }
    }

    /// The draft already dropped the old bank info; restart or drop the lookup.
    fn bic_changed(&mut self, ctx: &mut SessionContext, bic: String) -> LookupCommand {
        if should_lookup(&bic) {
            ctx.lookup = LookupState::Debouncing(bic.clone());
            LookupCommand::Schedule(bic)
        } else {
            ctx.lookup = LookupState::Idle;
            LookupCommand::Cancel
        }
    }

    fn select_kind(&mut self, kind: TransferKind) {
        self.draft.set_kind(kind);
        if !kind.requires_execution_date() {
            self.errors.clear_field(Field::ExecutionDate);
        }
    }

    /// Keep the raw text; commit only a complete, real date
    fn type_date(&mut self, ctx: &mut SessionContext, text: String) {
        self.draft.set_execution_date(dates::parse_local_display(&text));
        ctx.date_input = text;
        self.errors.clear_field(Field::ExecutionDate);
    }

    fn is_current(&self, ctx: &SessionContext, bic: &str) -> bool {
        self.step.is_editable() && self.draft.bic() == bic && ctx.lookup.bic() == Some(bic)
    }

    fn lookup_started(&mut self, ctx: &mut SessionContext, bic: String) {
        if !self.is_current(ctx, &bic) {
            debug!(session_id = %ctx.session_id, bic = %bic, "Ignoring start of stale lookup");
            return;
        }
        ctx.lookup = LookupState::InFlight(bic);
    }

    fn lookup_resolved(&mut self, ctx: &mut SessionContext, bic: String, info: Option<BankInfo>) {
        if !self.step.is_editable() || self.draft.bic() != bic {
            debug!(session_id = %ctx.session_id, bic = %bic, "Dropping stale lookup result");
            return;
        }
        if ctx.lookup == LookupState::InFlight(bic.clone()) {
            ctx.lookup = LookupState::Idle;
        }
        match info {
            Some(info) => {
                info!(session_id = %ctx.session_id, bic = %bic, bank = %info.bank_name, "Bank details applied");
                self.draft.set_bank_info(info);
            }
            None => {
                info!(session_id = %ctx.session_id, bic = %bic, "No bank details found");
                self.draft.clear_bank_info();
            }
        }
    }

    fn check(&mut self, ctx: &mut SessionContext, today: NaiveDate) -> HandleResult {
        self.require(WizardStep::Input, "check")?;

        self.errors = validate(&self.draft, today);
        if !self.errors.is_empty() {
            info!(
                session_id = %ctx.session_id,
                fields = %self.errors.fields().map(|f| f.as_str()).collect::<Vec<_>>().join(","),
                "Validation failed"
            );
            return Err(WizardError::Invalid(self.errors.clone()));
        }

        self.step = WizardStep::Summary;
        info!(session_id = %ctx.session_id, "Transfer checked");

        // The draft is frozen from here on
        if ctx.lookup == LookupState::Idle {
            Ok(None)
        } else {
            ctx.lookup = LookupState::Idle;
            Ok(Some(LookupCommand::Cancel))
        }
    }

    /// Coming back from the summary, fetch bank details a cancelled lookup never delivered
    fn resume_lookup(&mut self, ctx: &mut SessionContext) -> Option<LookupCommand> {
        let bic = self.draft.bic();
        if self.draft.bank_name().is_empty() && should_lookup(bic) {
            let bic = bic.to_string();
            ctx.lookup = LookupState::Debouncing(bic.clone());
            Some(LookupCommand::Schedule(bic))
        } else {
            None
        }
    }
}
