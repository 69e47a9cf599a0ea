//! # Cursor
//!
//! Keyboard selection over `len` items laid out in rows of `columns`.
//! A list is just a grid with one column.

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    Moved(usize),
    Activated(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    len: usize,
    columns: usize,
}

impl Cursor {
    pub fn new(len: usize, columns: usize) -> Self {
        Self {
            index: 0,
            len,
            columns: columns.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn move_to(&mut self, index: usize) -> Option<CursorEvent> {
        if index == self.index || index >= self.len {
            return None;
        }
        self.index = index;
        Some(CursorEvent::Moved(index))
    }
}

impl EventHandler for Cursor {
    type Event = CursorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CursorEvent> {
        if self.is_empty() {
            return None;
        }
        match event {
            TuiEvent::Activate => Some(CursorEvent::Activated(self.index)),
            TuiEvent::Left => self.move_to(self.index.checked_sub(1)?),
            TuiEvent::Right => self.move_to(self.index + 1),
            TuiEvent::Up => self.move_to(self.index.checked_sub(self.columns)?),
            // Past the last full row, land on the last item rather than nowhere.
            TuiEvent::Down => {
                let below = self.index + self.columns;
                if below < self.len {
                    self.move_to(below)
                } else if self.index / self.columns < (self.len - 1) / self.columns {
                    self.move_to(self.len - 1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
