//! # StatusBar Component
//!
//! The phone's top line: clock on the left, the visible screen's title in
//! the middle (inside the "island"), battery on the right.
//!
//! Purely presentational. While a transition is pending the title is
//! replaced with an ellipsis, which is the only hint the terminal gives of
//! the exit/enter window.

use crate::tui::component::Component;
use crate::tui::components::fit_width;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

const BATTERY: &str = "▮▮▮▯";

pub struct StatusBar {
    /// Preformatted clock, e.g. "09:41"
    pub clock: String,
    /// Title of the screen being shown
    pub title: String,
    pub transitioning: bool,
}

impl StatusBar {
    pub fn new(clock: String, title: String, transitioning: bool) -> Self {
        Self {
            clock,
            title,
            transitioning,
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [clock_area, island_area, battery_area] = Layout::horizontal([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(BATTERY.chars().count() as u16 + 1),
        ])
        .areas(area);

        frame.render_widget(
            Span::styled(self.clock.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            clock_area,
        );

        let label = if self.transitioning {
            "…".to_string()
        } else {
            fit_width(&self.title, island_area.width.saturating_sub(4) as usize)
        };
        let island = Paragraph::new(format!("( {label} )"))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(island, island_area);

        let battery = Paragraph::new(BATTERY)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Right);
        frame.render_widget(battery, battery_area);
    }
}
