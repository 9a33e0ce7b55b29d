//! Top-level UI layout: list or detail screen with status bar.

pub mod detail_view;
pub mod list_view;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Overlay, Screen};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];
    // Panels lose focus while an overlay takes input.
    let active = app.overlay == Overlay::None;

    f.render_widget(Block::default().style(theme::base()), f.area());

    match &app.screen {
        Screen::List(list) => {
            // Results on the left, query controls on the right.
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(main_area);
            let inner = framed(f, cols[0], " Restaurants ", active);
            list_view::render(f, inner, list);
            let inner = framed(f, cols[1], " Search & Filters ", active);
            sidebar::render(f, inner, &list.controller);
        }
        Screen::Detail(detail) => {
            let inner = framed(
                f,
                main_area,
                &format!(" Restaurant {} ", detail.id()),
                active,
            );
            detail_view::render(f, inner, detail);
        }
    }

    status_bar::render(f, status_area, app);

    // Overlays on top.
    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Input(field) => overlays::render_input(f, main_area, field, &app.input),
        Overlay::None => {}
    }
}

/// Draw a bordered block and return its inner area.
fn framed(f: &mut Frame, area: Rect, title: &str, active: bool) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(title.to_string())
        .title_style(theme::panel_title(active));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate to `max` characters, marking the cut with a trailing dot.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}.")
    }
}
