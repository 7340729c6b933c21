//! TUI Event Handling
//!
//! Handles keyboard input for the report viewer.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::app::App;

/// TUI event types
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Terminal tick (for updates)
    Tick,
    /// Keyboard input
    Key(KeyEvent),
    /// Window resize
    Resize(u16, u16),
}

/// Event handler for the TUI
pub struct EventHandler {
    /// Tick rate for updates
    tick_rate: Duration,
    /// Last tick time
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    /// Polls for the next event
    pub fn next_event(&mut self) -> anyhow::Result<Option<TuiEvent>> {
        let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(TuiEvent::Key(key))),
                Event::Resize(w, h) => Ok(Some(TuiEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            self.last_tick = Instant::now();
            Ok(Some(TuiEvent::Tick))
        }
    }
}

/// Handles a TUI event and updates the app state
pub fn handle_event(app: &mut App, event: TuiEvent) -> anyhow::Result<()> {
    match event {
        // Loader updates are drained by the event loop on every iteration.
        TuiEvent::Tick => {}
        TuiEvent::Key(key) => handle_key_event(app, key)?,
        TuiEvent::Resize(_, _) => {}
    }
    Ok(())
}

/// Handles keyboard input
fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Output
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::PageUp => app.scroll_up(),

        // Reloading
        KeyCode::Char('r') => app.reload_report(),
        KeyCode::Char('R') => app.reload_index(),

        _ => {}
    }

    Ok(())
}
