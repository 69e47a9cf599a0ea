use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::home_grid::GRID_COLUMNS;
use crate::tui::components::{HomeGrid, ScreenView, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

pub const PHONE_WIDTH: u16 = 38;
pub const PHONE_HEIGHT: u16 = 30;
const HELP_TEXT: &str = "arrows move · enter open · esc home · q quit";

/// The phone's outer frame, centred in `area` and clamped to it.
pub fn phone_rect(area: Rect) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(PHONE_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [phone] = Layout::vertical([Constraint::Length(PHONE_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    phone
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let phone = phone_rect(frame.area());
    let shell = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Gray));
    let inner = shell.inner(phone);
    frame.render_widget(shell, phone);

    let [status_area, _, body_area, indicator_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let visible = app.view.visible_screen();
    // Nothing active means we're inside the exit/enter window.
    let dimmed = app.view.board.active_screens().is_empty();
    let revealed = app
        .view
        .board
        .state(visible)
        .map(|s| s.revealed.clone())
        .unwrap_or_default();
    let title = app
        .registry
        .get(visible)
        .map(|s| s.title.clone())
        .unwrap_or_default();

    let mut status = StatusBar::new(tui.clock.clone(), title, app.view.in_transition());
    status.render(frame, status_area);

    if visible == app.registry.home() {
        let mut grid = HomeGrid::new(app.registry.home_launchers(), revealed);
        grid.selected = Some(tui.cursor.index);
        grid.dimmed = dimmed;
        grid.render(frame, body_area);
        tui.hits = grid.hits;
    } else if let Some(screen) = app.registry.get(visible) {
        let mut view = ScreenView::new(screen, revealed);
        view.selected = Some(tui.cursor.index);
        view.dimmed = dimmed;
        view.render(frame, body_area);
        tui.hits = view.hits;
    } else {
        tui.hits.clear();
    }

    let indicator = Paragraph::new("━━━━━━━━")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(indicator, indicator_area);

    // Key help under the phone, when there's a spare row. Mid-transition it
    // names the screen being opened instead.
    let frame_area = frame.area();
    if phone.bottom() < frame_area.bottom() {
        let help_area = Rect::new(frame_area.x, phone.bottom(), frame_area.width, 1);
        let text = if app.view.in_transition() && !app.status_message.is_empty() {
            format!("opening {}", app.status_message)
        } else {
            HELP_TEXT.to_string()
        };
        let help = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, help_area);
    }
}

/// Columns the keyboard cursor should use for the visible screen.
pub fn cursor_columns(app: &App) -> usize {
    if app.view.visible_screen() == app.registry.home() {
        GRID_COLUMNS
    } else {
        1
    }
}
