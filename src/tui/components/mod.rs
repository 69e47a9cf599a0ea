//! # TUI Components
//!
//! All UI components for the phone mock.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: clock, screen title, transition marker
//! - `HomeGrid`: launcher icons and the dock
//! - `ScreenView`: a content screen with its entries
//!
//! `HomeGrid` and `ScreenView` record the clickable areas they drew in a
//! `hits` field, read back by the event loop for mouse hit testing.
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Cursor`: keyboard selection over a grid or list
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file, shared hit-test types)
//! ├── status_bar.rs
//! ├── home_grid.rs
//! ├── screen_view.rs
//! └── cursor.rs
//! ```

use ratatui::layout::{Position, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod cursor;
pub mod home_grid;
pub mod screen_view;
pub mod status_bar;

pub use cursor::{Cursor, CursorEvent};
pub use home_grid::HomeGrid;
pub use screen_view::ScreenView;
pub use status_bar::StatusBar;

/// What a click on a drawn area means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Launcher `n` in home order (grid, then dock).
    Launcher(usize),
    /// Content entry `n` of the visible screen.
    Entry(usize),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    pub rect: Rect,
    pub target: HitTarget,
}

/// Hit test: the target drawn at a screen position, if any.
pub fn hit_test(hits: &[HitArea], column: u16, row: u16) -> Option<HitTarget> {
    let position = Position::new(column, row);
    hits.iter()
        .find(|h| h.rect.contains(position))
        .map(|h| h.target)
}

/// Cut `text` to at most `width` terminal cells, marking the cut with '…'.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
