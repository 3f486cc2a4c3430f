//! transfer_wizard - interactive bank transfer form
//!
//! Reads commands from stdin, prints the form to stdout and logs to stderr.
//! Bank details are looked up in the background while the user types.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transfer_wizard::console::{self, Command, HELP};
use transfer_wizard::lookup::{BankDirectory, HttpBankDirectory, StaticBankDirectory};
use transfer_wizard::{AppResult, Config, TransferSession};

/// Initialize tracing/logging
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("transfer_wizard=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

/// Pick the remote directory if one is configured
fn build_directory(config: &Config) -> AppResult<Arc<dyn BankDirectory>> {
    match &config.bank_lookup_url {
        Some(url) => {
            let directory = HttpBankDirectory::new(
                url.clone(),
                config.bank_lookup_api_key.clone(),
                config.bank_lookup_timeout,
            )?;
            Ok(Arc::new(directory))
        }
        None => Ok(Arc::new(StaticBankDirectory::builtin())),
    }
}

/// Apply one input line. Returns `false` when the user wants to leave.
fn apply_line(session: &mut TransferSession, line: &str) -> AppResult<bool> {
    match line.parse::<Command>()? {
        Command::Event(event) => {
            session.dispatch(event)?;
            print!("{}", console::render(session.wizard(), session.context()));
        }
        Command::Show => print!("{}", console::render(session.wizard(), session.context())),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(config.log_json);

    let directory = build_directory(&config)?;
    let mut session = TransferSession::new(directory.clone(), config.lookup_settings());

    tracing::info!(
        session_id = %session.context().session_id,
        directory = directory.name(),
        environment = %config.environment,
        debounce_ms = config.lookup_debounce.as_millis() as u64,
        "Starting transfer wizard"
    );

    println!("{HELP}\n");
    print!("{}", console::render(session.wizard(), session.context()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match apply_line(&mut session, &line) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) if e.is_recoverable() => {
                        println!("{e}");
                        print!("{}", console::render(session.wizard(), session.context()));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Some(event) = session.next_lookup() => {
                // The progress indicator only matters while editing
                if session.step().is_editable() {
                    tracing::debug!(bic = event.bic(), "Lookup progress");
                    print!("{}", console::render(session.wizard(), session.context()));
                }
            }
        }
    }

    tracing::info!(session_id = %session.context().session_id, "Goodbye");
    Ok(())
}
