//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use tokio::sync::mpsc;

use newsdesk_api::Backend;
use newsdesk_app::config::Settings;
use newsdesk_app::{handle_action, initial_action, signals, AppState, Message};
use newsdesk_core::prelude::*;

use super::{event, process, render, terminal};

/// Run the TUI against `backend` until the user quits
pub async fn run<B>(settings: Settings, backend: B) -> Result<()>
where
    B: Backend + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    info!("Connecting to {}", settings.api.base_url);
    let mut state = AppState::with_settings(settings);
    let backend = Arc::new(backend);

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_mouse() {
        // Keyboard editing still works
        warn!("Mouse capture unavailable: {}", e);
    }

    // Unified message channel (signal handler and background requests)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

    // Spawn signal handler (sends Message::Quit on SIGINT/SIGTERM)
    signals::spawn_signal_handler(msg_tx.clone());

    handle_action(initial_action(), Arc::clone(&backend), msg_tx.clone());

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &backend);

    terminal::disable_mouse();
    ratatui::restore();

    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }
    result
}

/// Main event loop
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    backend: &Arc<B>,
) -> Result<()>
where
    B: Backend + Sync + 'static,
{
    while !state.should_quit {
        // Results from background requests, signals
        while let Ok(msg) = msg_rx.try_recv() {
            process::process_message(state, msg, backend, &msg_tx);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events; a timeout yields a tick
        if let Some(message) = event::poll()? {
            process::process_message(state, message, backend, &msg_tx);
        }
    }

    info!("Quit requested");
    Ok(())
}
