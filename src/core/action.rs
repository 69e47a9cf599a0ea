//! # Actions
//!
//! Everything that can happen in the phone becomes an `Action`.
//! User taps an icon? That's `Action::OpenApp("about")`.
//! The navigator settles on a new frame? That's `Action::ViewUpdated(view)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` for the adapter to carry out.
//! No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::state::{App, NavigatorView};

/// A navigation request, as delivered to whoever owns the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "target", rename_all = "snake_case")]
pub enum Command {
    OpenApp(String),
    GoHome,
}

impl Command {
    /// `"home"`-style shorthand used by the CLI: the home id maps to `GoHome`.
    pub fn parse(target: &str, home: &str) -> Self {
        if target == home {
            Command::GoHome
        } else {
            Command::OpenApp(target.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    OpenApp(String),
    GoHome,
    ViewUpdated(NavigatorView),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Navigate(Command),
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::OpenApp(target) => {
            if let Some(screen) = app.registry.get(&target) {
                app.status_message = screen.title.clone();
            } else {
                debug!("Forwarding open_app for unregistered screen '{}'", target);
            }
            Effect::Navigate(Command::OpenApp(target))
        }
        Action::GoHome => {
            app.status_message.clear();
            Effect::Navigate(Command::GoHome)
        }
        Action::ViewUpdated(view) => {
            if view == app.view {
                return Effect::None;
            }
            app.view = view;
            Effect::Redraw
        }
        Action::Quit => Effect::Quit,
    }
}
