//! # Application State
//!
//! Core state for the phone. Domain data only - no TUI-specific types.
//! Presentation state (selection, hit areas, clock text) lives in `tui`.
//!
//! ```text
//! App
//! ├── registry: Arc<ScreenRegistry>   // the fixed screen list
//! ├── view: NavigatorView             // latest navigator snapshot
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::navigator::{Phase, ScreenNavigator};
use crate::core::registry::ScreenRegistry;
use crate::core::surface::SurfaceBoard;

/// A frozen copy of the navigator and its board, safe to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorView {
    pub current: String,
    pub phase: Phase,
    /// No enter or reveal pending.
    pub settled: bool,
    pub board: SurfaceBoard,
}

impl NavigatorView {
    pub fn capture(navigator: &ScreenNavigator, board: &SurfaceBoard) -> Self {
        Self {
            current: navigator.current_screen().to_string(),
            phase: navigator.phase().clone(),
            settled: navigator.is_settled(),
            board: board.clone(),
        }
    }

    /// Placeholder shown before the navigator publishes its first frame.
    pub fn initial(registry: &ScreenRegistry) -> Self {
        Self {
            current: registry.home().to_string(),
            phase: Phase::Idle,
            settled: true,
            board: SurfaceBoard::from_registry(registry),
        }
    }

    /// The screen to draw: the active one, else the one being left.
    pub fn visible_screen(&self) -> &str {
        self.board
            .active_screens()
            .first()
            .copied()
            .unwrap_or(self.current.as_str())
    }

    /// True inside the window between exit and enter.
    pub fn in_transition(&self) -> bool {
        matches!(self.phase, Phase::TransitioningTo(_))
    }
}

pub struct App {
    pub registry: Arc<ScreenRegistry>,
    pub view: NavigatorView,
    pub status_message: String,
}

impl App {
    pub fn new(registry: Arc<ScreenRegistry>, view: NavigatorView) -> Self {
        Self {
            registry,
            view,
            status_message: String::new(),
        }
    }
}
