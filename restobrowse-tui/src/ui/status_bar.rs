//! Bottom status bar: backend URL, screen hints, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Screen, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match app.screen {
        Screen::List(_) => " j/k:move Enter:open n/p:page ?:help e:errors q:quit",
        Screen::Detail(_) => " Esc:back r:reload ?:help e:errors q:quit",
    };
    spans.push(Span::styled(format!(" {} |", app.api_url), theme::muted()));
    spans.push(Span::styled(hints, theme::muted()));

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
