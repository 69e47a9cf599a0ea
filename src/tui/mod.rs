//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the phone,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! navigator itself runs on a tokio task (see `runtime`); this loop only
//! sends it commands and draws whatever snapshot it last published.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (enter pending or a cascade running): polls every ~33ms so
//!   reveals show up close to their deadlines.
//! - **Idle**: sleeps up to 500ms and only redraws on input, a new snapshot,
//!   or when the status-bar clock ticks over to a new minute.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::registry::ScreenRegistry;
use crate::core::state::App;
use crate::runtime;
use crate::tui::component::EventHandler;
use crate::tui::components::{Cursor, CursorEvent, HitArea, HitTarget, hit_test};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATING_POLL: Duration = Duration::from_millis(33);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Keyboard selection on the visible screen.
    pub cursor: Cursor,
    /// Screen the cursor was sized for; a different visible screen resets it.
    pub cursor_screen: String,
    pub clock: String,
    /// Clickable areas from the last frame.
    pub hits: Vec<HitArea>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(0, 1),
            cursor_screen: String::new(),
            clock: String::new(),
            hits: Vec::new(),
        }
    }

    /// Resize the cursor when the visible screen changes. Returns true if it did.
    pub fn sync_cursor(&mut self, app: &App) -> bool {
        let visible = app.view.visible_screen();
        if visible == self.cursor_screen {
            return false;
        }
        let len = if visible == app.registry.home() {
            app.registry.home_launchers().len()
        } else {
            app.registry.get(visible).map_or(0, |s| s.content.len())
        };
        self.cursor = Cursor::new(len, ui::cursor_columns(app));
        self.cursor_screen = visible.to_string();
        true
    }

    /// Store a new clock reading. Returns true if the displayed text changed.
    pub fn set_clock(&mut self, text: String) -> bool {
        if text == self.clock {
            return false;
        }
        self.clock = text;
        true
    }

    /// Map a terminal event to an action, if it means anything here.
    pub fn action_for(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        match event {
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Home => Some(Action::GoHome),
            TuiEvent::Resize => None,
            TuiEvent::Click(column, row) => match hit_test(&self.hits, *column, *row)? {
                HitTarget::Back => Some(Action::GoHome),
                HitTarget::Launcher(index) | HitTarget::Entry(index) => activate(app, index),
            },
            _ => match self.cursor.handle_event(event)? {
                CursorEvent::Moved(_) => None,
                CursorEvent::Activated(index) => activate(app, index),
            },
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// What activating item `index` of the visible screen does: open a launcher
/// on home, follow an entry's link elsewhere.
fn activate(app: &App, index: usize) -> Option<Action> {
    let visible = app.view.visible_screen();
    if visible == app.registry.home() {
        let launcher = app.registry.home_launchers().get(index).copied()?;
        return Some(Action::OpenApp(launcher.id.clone()));
    }
    let entry = app.registry.get(visible)?.content.get(index)?;
    entry.link.clone().map(Action::OpenApp)
}

/// "HH:MM", 24-hour.
pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Run the phone until the user quits. Must be called inside a tokio runtime.
pub fn run(config: ResolvedConfig, registry: ScreenRegistry) -> std::io::Result<()> {
    let registry = Arc::new(registry);
    let mut navigator = runtime::spawn(&registry, config.timing);
    let mut app = App::new(Arc::clone(&registry), navigator.view());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if let Some(view) = navigator.poll_view()
            && update(&mut app, Action::ViewUpdated(view)) == Effect::Redraw
        {
            needs_redraw = true;
        }
        if tui.sync_cursor(&app) {
            debug!("Cursor reset for '{}'", tui.cursor_screen);
            needs_redraw = true;
        }
        if tui.set_clock(format_clock(&chrono::Local::now())) {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while the navigator has work queued
        let timeout = if app.view.settled {
            IDLE_POLL
        } else {
            ANIMATING_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = tui.action_for(&event, &app) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Navigate(command) => navigator.send(command),
                Effect::Quit => should_quit = true,
                Effect::Redraw | Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    drop(navigator);
    ratatui::restore();
    Ok(())
}
