use crate::app::{
    action::Action,
    dispatch::{self, Host},
    input::map_event_to_action,
    reducer,
    state::AppState,
    ui::{self, HostView},
};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::debug;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend, H: Host + HostView>(
    terminal: &mut Terminal<B>,
    app_state: AppState,
    host: &mut H,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, host, event_rx).await
}

/// Drives the app until quit or until `event_rx` closes.
///
/// Each iteration is one turn: deferred focus work queued by the previous
/// turn runs first, then the frame is drawn, then one event is handled.
pub async fn run_loop_with_events<B: Backend, H: Host + HostView>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState,
    host: &mut H,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let mut interval = interval(TICK_RATE);

    loop {
        // --- 1. Deferred Focus Work ---
        app_state.overlay.focus_mut().run_turn(host);

        // --- 2. Render ---
        terminal.draw(|f| {
            ui::draw(f, &app_state, &*host);
        })?;

        // --- 3. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            res = event_rx.recv() => match res {
                Some(Ok(event)) => map_event_to_action(event, &app_state, terminal.size()?),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        };

        let Some(action) = action else {
            continue;
        };

        // --- 4. Update (Reducer) ---
        let ticked = action == Action::Tick;
        let command = reducer::update(&mut app_state, action, &host.sources());

        if app_state.should_quit {
            break;
        }

        // --- 5. Side Effects ---
        let mut changed = ticked && host.tick();
        if let Some(cmd) = command {
            debug!(command = ?cmd, "dispatching command");
            dispatch::handle_command(cmd, host, app_state.overlay.focus_mut());
            changed = true;
        }

        // Open palettes follow the sources they were built from
        if changed {
            reducer::update(&mut app_state, Action::SourcesChanged, &host.sources());
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
