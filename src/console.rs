//! Terminal front end
//!
//! Parses one input line into a [`Command`] and renders the wizard state
//! as plain text.

use std::fmt::Write;
use std::str::FromStr;

use crate::domain::dates::{parse_iso, to_local_display};
use crate::domain::draft::{UnknownField, UnknownTransferKind};
use crate::domain::{Field, SessionContext, TransferKind, WizardStep};
use crate::wizard::{TransferWizard, WizardEvent};

pub const HELP: &str = "\
Commands:
  set <field> <value>   edit receiver, iban, bic, purpose, amount or date
  blur <field>          leave a field (normalizes umlauts)
  kind <kind>           standard, scheduled or instant
  date <DD.MM.YYYY>     type the execution date
  pick <YYYY-MM-DD>     choose the execution date from the calendar
  check                 validate and show the summary
  back                  return to the input form
  execute               send the transfer
  reset                 start a new transfer
  show                  print the current state
  help                  print this text
  quit                  leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(WizardEvent),
    Show,
    Help,
    Quit,
}

/// Input line errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Field(#[from] UnknownField),

    #[error(transparent)]
    Kind(#[from] UnknownTransferKind),

    #[error("Invalid calendar date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = split_word(line);

        let event = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("field"));
                }
                WizardEvent::edit(field.parse()?, value)
            }
            "blur" => WizardEvent::Blur(required(rest, "field")?.parse()?),
            "kind" => WizardEvent::SelectKind(required(rest, "kind")?.parse()?),
            "date" => WizardEvent::TypeDate(rest.to_string()),
            "pick" => {
                let iso = required(rest, "date")?;
                let date = parse_iso(iso).ok_or_else(|| CommandError::InvalidDate(iso.to_string()))?;
                WizardEvent::PickDate(date)
            }
            "check" => WizardEvent::Check,
            "back" => WizardEvent::Back,
            "execute" => WizardEvent::Execute,
            "reset" => WizardEvent::Reset,
            "show" | "" => return Ok(Command::Show),
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        Ok(Command::Event(event))
    }
}

/// First word and the rest of the line, leading whitespace trimmed
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn required<'a>(s: &'a str, name: &'static str) -> Result<&'a str, CommandError> {
    let s = s.trim();
    if s.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(s)
    }
}

/// Render the current step as text
pub fn render(wizard: &TransferWizard, ctx: &SessionContext) -> String {
    let mut out = String::new();

    match wizard.step() {
        WizardStep::Input => render_input(&mut out, wizard, ctx),
        WizardStep::Summary => {
            out.push_str("[summary]\n");
            if let Some(summary) = wizard.summary() {
                let _ = write!(out, "{summary}");
            }
            out.push_str("Type 'execute' to send or 'back' to edit.\n");
        }
        WizardStep::Success => {
            out.push_str("[success] Transfer sent.\n");
            if let Some(summary) = wizard.summary() {
                let _ = write!(out, "{summary}");
            }
            out.push_str("Type 'reset' to start a new transfer.\n");
        }
    }

    out
}

fn render_input(out: &mut String, wizard: &TransferWizard, ctx: &SessionContext) {
    let draft = wizard.draft();
    let _ = writeln!(out, "[input] {}", draft.kind());

    for field in [Field::Receiver, Field::Iban, Field::Bic, Field::Purpose, Field::Amount] {
        let _ = write!(out, "  {:<15} {}", field.as_str(), draft.text(field));
        if field == Field::Bic {
            if ctx.lookup_in_progress() {
                out.push_str("  (looking up bank...)");
            } else if !draft.bank_name().is_empty() {
                let _ = write!(out, "  ({}", draft.bank_name());
                if !draft.bank_city().is_empty() {
                    let _ = write!(out, ", {}", draft.bank_city());
                }
                out.push(')');
            }
        }
        out.push('\n');
    }

    if draft.kind() == TransferKind::Scheduled {
        let _ = writeln!(
            out,
            "  {:<15} {}  (earliest {})",
            Field::ExecutionDate.as_str(),
            ctx.date_input,
            to_local_display(wizard.earliest_execution_date())
        );
    }

    if !wizard.errors().is_empty() {
        out.push_str("Errors:\n");
        for (field, error) in wizard.errors().iter() {
            let _ = writeln!(out, "  {field}: {error}");
        }
    }
}
