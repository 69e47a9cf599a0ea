//! # HomeGrid Component
//!
//! The home screen: launcher icons in a four-column grid, and a dock pinned
//! to the bottom. Launchers are indexed in home order (grid first, then
//! dock), the same order the navigator cascades them in. An icon whose
//! reveal hasn't fired yet leaves a blank cell.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::registry::{Placement, ScreenDescriptor};
use crate::tui::component::Component;
use crate::tui::components::{HitArea, HitTarget, fit_width};

pub const GRID_COLUMNS: usize = 4;
const CELL_HEIGHT: u16 = 3;
const DOCK_HEIGHT: u16 = 4;

pub struct HomeGrid<'a> {
    pub launchers: Vec<&'a ScreenDescriptor>,
    /// Per launcher, in the same order.
    pub revealed: Vec<bool>,
    pub selected: Option<usize>,
    pub dimmed: bool,
    /// Filled during render.
    pub hits: Vec<HitArea>,
}

impl<'a> HomeGrid<'a> {
    pub fn new(launchers: Vec<&'a ScreenDescriptor>, revealed: Vec<bool>) -> Self {
        Self {
            launchers,
            revealed,
            selected: None,
            dimmed: false,
            hits: Vec::new(),
        }
    }

    fn icon(&mut self, frame: &mut Frame, index: usize, area: Rect) {
        if !self.revealed.get(index).copied().unwrap_or(false) {
            return;
        }
        let screen = self.launchers[index];
        let mut style = Style::default().fg(Color::White);
        if self.selected == Some(index) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if self.dimmed {
            style = style.add_modifier(Modifier::DIM);
        }

        let lines = vec![
            Line::from(Span::styled(format!("[{}]", screen.icon), style.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(fit_width(&screen.title, area.width as usize), style)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        self.hits.push(HitArea {
            rect: area,
            target: HitTarget::Launcher(index),
        });
    }
}

impl Component for HomeGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let [grid_area, dock_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(DOCK_HEIGHT)]).areas(area);

        let cell_width = grid_area.width / GRID_COLUMNS as u16;
        let grid_count = self
            .launchers
            .iter()
            .take_while(|s| s.placement != Placement::Dock)
            .count();

        for index in 0..grid_count {
            let row = (index / GRID_COLUMNS) as u16;
            let col = (index % GRID_COLUMNS) as u16;
            let y = grid_area.y + 1 + row * CELL_HEIGHT;
            if y + CELL_HEIGHT > grid_area.bottom() {
                break;
            }
            let cell = Rect::new(grid_area.x + col * cell_width, y, cell_width, CELL_HEIGHT - 1);
            self.icon(frame, index, cell);
        }

        let dock = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let dock_inner = dock.inner(dock_area);
        frame.render_widget(dock, dock_area);

        let dock_count = self.launchers.len() - grid_count;
        if dock_count > 0 {
            let slots = Layout::horizontal(vec![Constraint::Fill(1); dock_count]).split(dock_inner);
            for (slot, index) in slots.iter().zip(grid_count..) {
                self.icon(frame, index, *slot);
            }
        }
    }
}
