mod bootstrap;

use anyhow::Result;
use energy_assistant::engine::{AssistantEngine, TYPING_DELAY};
use energy_assistant::responder::Responder;
use energy_core::settings::Settings;
use energy_data::dataset::EnergyDataset;
use energy_data::loader::load_or_fallback;
use energy_ui::app::{App, ViewMode};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Energy Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Rate: ${}/kWh",
        settings.view,
        settings.theme,
        settings.rate_per_kwh
    );

    let records = load_or_fallback(settings.data_file.as_deref());
    let dataset = EnergyDataset::new(records);

    // Sign in. The home id doubles as the password in this dataset.
    let Some(home_id) = settings.home_id.clone() else {
        eprintln!("No home id supplied. Use --home-id <ID> to sign in.");
        eprintln!("Available homes: {}", dataset.home_ids().join(", "));
        std::process::exit(2);
    };
    let password = settings.effective_password().unwrap_or_default();

    let home_records = match dataset.login(&home_id, &password) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("Login failed: {err}");
            std::process::exit(1);
        }
    };

    let household_size = dataset.household_size(&home_id);
    let responder = Responder::new(
        home_id.clone(),
        home_records.clone(),
        household_size,
        settings.rate_per_kwh,
    );

    // One-shot question mode: answer on stdout and exit without the TUI.
    if let Some(question) = settings.ask.as_deref() {
        println!("{}", responder.answer(question));
        return Ok(());
    }

    let view_mode = match settings.view.as_str() {
        "assistant" => ViewMode::Assistant,
        _ => ViewMode::Dashboard,
    };

    let greeting = responder.greeting();
    let typing_delay = if settings.debug {
        Duration::ZERO
    } else {
        TYPING_DELAY
    };
    let engine = AssistantEngine::new(responder, typing_delay);
    let (question_tx, reply_rx, handle) = engine.start();

    let app = App::new(
        &settings.theme,
        view_mode,
        home_id,
        home_records,
        household_size,
        settings.rate_per_kwh,
        greeting,
    );

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(question_tx, reply_rx) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down assistant task");
            handle.abort();
        }
    }

    Ok(())
}
