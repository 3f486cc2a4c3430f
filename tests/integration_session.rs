//! Session Integration Tests
//!
//! A wizard session wired to a bank directory, driven on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use chrono::Days;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

use transfer_wizard::domain::dates::{self, to_local_display};
use transfer_wizard::lookup::{LookupError, StaticBankDirectory};
use transfer_wizard::{
    Field, FieldError, LookupSettings, LookupState, TransferKind, TransferSession, WizardError,
    WizardEvent, WizardStep,
};

mod common;

use common::{bank, calls, fill_valid_form, type_bic, ScriptedDirectory};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn session_with(directory: ScriptedDirectory) -> TransferSession {
    TransferSession::new(Arc::new(directory), LookupSettings::default())
}

// =========================================================================
// Debounce
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_lookup_waits_for_quiet_period() {
    let directory = ScriptedDirectory::new().found(
        "COBADEFF",
        bank("Commerzbank", "Frankfurt am Main"),
        Duration::ZERO,
    );
    let log = directory.call_log();
    let mut session = session_with(directory);
    let start = Instant::now();

    type_bic(&mut session, "COBADEFF");
    assert_eq!(
        session.context().lookup,
        LookupState::Debouncing("COBADEFF".to_string())
    );

    tokio::time::sleep(ms(799)).await;
    assert!(calls(&log).is_empty());
    assert!(!session.context().lookup_in_progress());

    session.settle().await;

    let elapsed = start.elapsed();
    assert!(elapsed >= ms(800), "resolved after {elapsed:?}");
    assert!(elapsed < ms(850), "resolved after {elapsed:?}");
    assert_eq!(calls(&log), vec!["COBADEFF"]);
    assert_eq!(session.draft().bank_name(), "Commerzbank");
    assert_eq!(session.draft().bank_city(), "Frankfurt am Main");
    assert_eq!(session.context().lookup, LookupState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_bic_is_never_looked_up() {
    let directory = ScriptedDirectory::new()
        .found("COBADEFF", bank("Commerzbank", "Frankfurt am Main"), Duration::ZERO)
        .found("DEUTDEFF", bank("Deutsche Bank", "Frankfurt am Main"), Duration::ZERO);
    let log = directory.call_log();
    let mut session = session_with(directory);
    let start = Instant::now();

    type_bic(&mut session, "COBADEFF");
    tokio::time::sleep(ms(500)).await;
    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "DEUTDEFF")));

    session.settle().await;

    assert!(start.elapsed() >= ms(1300));
    assert_eq!(calls(&log), vec!["DEUTDEFF"]);
    assert_eq!(session.draft().bank_name(), "Deutsche Bank");
}

#[tokio::test(start_paused = true)]
async fn test_short_bic_cancels_pending_lookup() {
    let directory = ScriptedDirectory::new();
    let log = directory.call_log();
    let mut session = session_with(directory);

    type_bic(&mut session, "COBADEFF");
    tokio::time::sleep(ms(300)).await;
    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "COBADEF")));
    assert_eq!(session.context().lookup, LookupState::Idle);

    tokio::time::sleep(ms(2000)).await;
    assert_eq!(session.drain_lookups(), 0);
    assert!(calls(&log).is_empty());
}

// =========================================================================
// Stale results
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_result_for_previous_bic_is_discarded() {
    let directory = ScriptedDirectory::new()
        .found("AAAADEFF", bank("Bank A", "Aachen"), ms(2000))
        .found("BBBBDEFF", bank("Bank B", "Bremen"), ms(100));
    let log = directory.call_log();
    let mut session = session_with(directory);

    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "AAAADEFF")));
    tokio::time::sleep(ms(900)).await;
    assert_eq!(session.drain_lookups(), 1);
    assert!(session.context().lookup_in_progress());

    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "BBBBDEFF")));
    assert!(!session.context().lookup_in_progress());
    session.settle().await;
    assert_eq!(session.draft().bank_name(), "Bank B");

    // Long after A would have answered
    tokio::time::sleep(ms(5000)).await;
    assert_eq!(session.drain_lookups(), 0);
    assert_eq!(session.draft().bank_name(), "Bank B");
    assert_eq!(session.draft().bank_city(), "Bremen");
    assert_eq!(calls(&log), vec!["AAAADEFF", "BBBBDEFF"]);
}

#[tokio::test(start_paused = true)]
async fn test_queued_result_for_previous_bic_is_dropped() {
    let directory = ScriptedDirectory::new()
        .found("AAAADEFF", bank("Bank A", "Aachen"), Duration::ZERO)
        .found("BBBBDEFF", bank("Bank B", "Bremen"), Duration::ZERO);
    let mut session = session_with(directory);

    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "AAAADEFF")));
    // A finishes but nobody applies its events yet
    tokio::time::sleep(ms(900)).await;

    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "BBBBDEFF")));
    assert_eq!(session.drain_lookups(), 2);
    assert_eq!(session.draft().bank_name(), "");
    assert_eq!(
        session.context().lookup,
        LookupState::Debouncing("BBBBDEFF".to_string())
    );

    session.settle().await;
    assert_eq!(session.draft().bank_name(), "Bank B");
}

// =========================================================================
// Provider failures
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_leaves_form_submittable() {
    let directory = ScriptedDirectory::new().failing(
        "COBADEFF",
        LookupError::Transport("connection refused".to_string()),
        ms(50),
    );
    let mut session = session_with(directory);

    fill_valid_form(&mut session);
    type_bic(&mut session, "COBADEFF");
    session.settle().await;

    assert_eq!(session.draft().bank_name(), "");
    assert_eq!(session.context().lookup, LookupState::Idle);

    assert_ok!(session.dispatch(WizardEvent::Check));
    assert_eq!(session.step(), WizardStep::Summary);
    assert_eq!(session.summary().map(|s| s.bank), Some(String::new()));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_provider_times_out() {
    let directory = ScriptedDirectory::new().found(
        "COBADEFF",
        bank("Commerzbank", "Frankfurt am Main"),
        ms(60_000),
    );
    let mut session = session_with(directory);
    let start = Instant::now();

    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "COBADEFF")));
    session.settle().await;

    let elapsed = start.elapsed();
    assert!(elapsed >= ms(5800), "gave up after {elapsed:?}");
    assert!(elapsed < ms(6000), "gave up after {elapsed:?}");
    assert_eq!(session.draft().bank_name(), "");
    assert_eq!(session.context().lookup, LookupState::Idle);
}

// =========================================================================
// Step transitions
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_check_cancels_lookup_and_back_resumes_it() {
    let directory = ScriptedDirectory::new().found(
        "COBADEFF",
        bank("Commerzbank", "Frankfurt am Main"),
        ms(2000),
    );
    let log = directory.call_log();
    let mut session = session_with(directory);

    fill_valid_form(&mut session);
    assert_ok!(session.dispatch(WizardEvent::edit(Field::Bic, "COBADEFF")));
    tokio::time::sleep(ms(900)).await;
    session.drain_lookups();
    assert!(session.context().lookup_in_progress());

    assert_ok!(session.dispatch(WizardEvent::Check));
    assert_eq!(session.step(), WizardStep::Summary);
    assert_eq!(session.context().lookup, LookupState::Idle);

    tokio::time::sleep(ms(5000)).await;
    assert_eq!(session.drain_lookups(), 0);
    assert_eq!(session.draft().bank_name(), "");

    assert_ok!(session.dispatch(WizardEvent::Back));
    assert_eq!(
        session.context().lookup,
        LookupState::Debouncing("COBADEFF".to_string())
    );
    session.settle().await;

    assert_eq!(session.draft().bank_name(), "Commerzbank");
    assert_eq!(calls(&log), vec!["COBADEFF", "COBADEFF"]);
}

#[tokio::test(start_paused = true)]
async fn test_full_transfer_with_builtin_directory() {
    let mut session = TransferSession::new(
        Arc::new(StaticBankDirectory::builtin()),
        LookupSettings::default(),
    );
    let session_id = session.context().session_id;

    fill_valid_form(&mut session);
    type_bic(&mut session, "cobadeff");
    assert_eq!(session.draft().bic(), "COBADEFF");
    session.settle().await;

    assert_ok!(session.dispatch(WizardEvent::Check));
    let summary = session.summary().unwrap();
    assert_eq!(summary.bank, "Commerzbank (Frankfurt am Main)");
    assert_eq!(summary.amount, "12,50\u{a0}€");
    assert_eq!(summary.kind, TransferKind::Standard);

    // The summary is read-only
    let err = assert_err!(session.dispatch(WizardEvent::edit(Field::Amount, "99")));
    assert!(matches!(err, WizardError::InvalidTransition { .. }));
    assert_eq!(session.draft().amount(), "12,50");

    assert_ok!(session.dispatch(WizardEvent::Execute));
    assert_eq!(session.step(), WizardStep::Success);
    assert!(session.summary().is_some());

    assert_ok!(session.dispatch(WizardEvent::Reset));
    assert_eq!(session.step(), WizardStep::Input);
    assert_eq!(session.draft().receiver(), "");
    assert_eq!(session.draft().bic(), "");
    assert!(session.errors().is_empty());
    assert_eq!(session.context().session_id, session_id);
    assert_eq!(session.context().lookup, LookupState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_scheduled_transfer_dates() {
    let mut session = session_with(ScriptedDirectory::new());
    fill_valid_form(&mut session);
    assert_ok!(session.dispatch(WizardEvent::SelectKind(TransferKind::Scheduled)));

    assert_ok!(session.dispatch(WizardEvent::TypeDate("1.2.".to_string())));
    let err = assert_err!(session.dispatch(WizardEvent::Check));
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.get(Field::ExecutionDate), Some(&FieldError::DateFormat));

    let yesterday = dates::today().checked_sub_days(Days::new(1)).unwrap();
    assert_ok!(session.dispatch(WizardEvent::TypeDate(to_local_display(yesterday))));
    let err = assert_err!(session.dispatch(WizardEvent::Check));
    assert_eq!(
        err.validation_errors().unwrap().get(Field::ExecutionDate),
        Some(&FieldError::DateInPast)
    );

    let next_month = dates::today().checked_add_days(Days::new(30)).unwrap();
    assert_ok!(session.dispatch(WizardEvent::PickDate(next_month)));
    assert_eq!(session.context().date_input, to_local_display(next_month));
    assert_ok!(session.dispatch(WizardEvent::Check));
    assert_eq!(
        session.summary().unwrap().execution_date,
        Some(to_local_display(next_month))
    );
}
