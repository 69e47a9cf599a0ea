//! # ScreenView Component
//!
//! One content screen: a back header, then each entry as a bordered card.
//!
//! Unrevealed entries keep their slot but draw nothing, so cards don't jump
//! around while the cascade runs. When the entries don't fit, the view
//! scrolls just far enough to keep the selected one on screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::registry::{ContentEntry, ScreenDescriptor};
use crate::tui::component::Component;
use crate::tui::components::{HitArea, HitTarget, fit_width};

pub struct ScreenView<'a> {
    pub screen: &'a ScreenDescriptor,
    pub revealed: Vec<bool>,
    pub selected: Option<usize>,
    pub dimmed: bool,
    /// Filled during render.
    pub hits: Vec<HitArea>,
}

impl<'a> ScreenView<'a> {
    pub fn new(screen: &'a ScreenDescriptor, revealed: Vec<bool>) -> Self {
        Self {
            screen,
            revealed,
            selected: None,
            dimmed: false,
            hits: Vec::new(),
        }
    }

    fn base_style(&self) -> Style {
        if self.dimmed {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        }
    }

    fn card(&self, index: usize, entry: &'a ContentEntry) -> Paragraph<'a> {
        let selected = self.selected == Some(index);
        let border = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut heading = self.base_style().add_modifier(Modifier::BOLD);
        if selected {
            heading = heading.fg(Color::Cyan);
        }
        let mut title_line = Line::from(Span::styled(entry.heading.as_str(), heading));
        if entry.link.is_some() {
            title_line.push_span(Span::raw(" ›"));
        }

        Paragraph::new(entry.body.as_str())
            .style(self.base_style())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(title_line),
            )
            .wrap(Wrap { trim: true })
    }

    /// First entry to draw so that the selected one fits in `height` rows.
    fn scroll_offset(heights: &[u16], selected: Option<usize>, height: u16) -> usize {
        let Some(selected) = selected else { return 0 };
        let mut offset = 0;
        while offset < selected {
            let span = heights[offset..=selected]
                .iter()
                .fold(0u16, |total, h| total.saturating_add(*h));
            if span <= height {
                break;
            }
            offset += 1;
        }
        offset
    }
}

impl<'a> Component for ScreenView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let back = Span::styled("‹ Home", self.base_style().fg(Color::Blue));
        let title = Span::styled(
            fit_width(&self.screen.title, header_area.width.saturating_sub(10) as usize),
            self.base_style().add_modifier(Modifier::BOLD),
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![back, Span::raw("   "), title])),
            header_area,
        );
        self.hits.push(HitArea {
            rect: Rect::new(header_area.x, header_area.y, 6.min(header_area.width), 1),
            target: HitTarget::Back,
        });

        let screen: &'a ScreenDescriptor = self.screen;
        let entries = &screen.content;
        if entries.is_empty() {
            return;
        }
        let cards: Vec<Paragraph> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| self.card(i, e))
            .collect();
        let heights: Vec<u16> = cards
            .iter()
            .map(|c| c.line_count(body_area.width.saturating_sub(2)) as u16)
            .collect();

        let offset = Self::scroll_offset(&heights, self.selected, body_area.height);
        let mut y = body_area.y;
        for (index, card) in cards.into_iter().enumerate().skip(offset) {
            let height = heights[index];
            if y + height > body_area.bottom() {
                break;
            }
            let rect = Rect::new(body_area.x, y, body_area.width, height);
            y += height;
            if !self.revealed.get(index).copied().unwrap_or(false) {
                continue;
            }
            frame.render_widget(card, rect);
            if entries[index].link.is_some() {
                self.hits.push(HitArea {
                    rect,
                    target: HitTarget::Entry(index),
                });
            }
        }
    }
}
