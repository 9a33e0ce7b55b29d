//! Result list: one row per restaurant plus the pager line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::ListScreen;
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, list: &ListScreen) {
    let c = &list.controller;
    let q = c.query();
    let results = c.results();
    let mut lines: Vec<Line> = Vec::new();

    // Header
    let source = results.source.map(|k| k.label()).unwrap_or("none");
    lines.push(Line::from(vec![
        Span::styled(
            format!("Page {}/{} | {} per page | ", q.page(), c.total_pages(), q.per_page()),
            theme::muted(),
        ),
        Span::styled(format!("{} total", results.total), theme::accent()),
        Span::styled(format!(" ({source})"), theme::muted()),
    ]));
    if let Some(kind) = c.loading() {
        lines.push(Line::from(Span::styled(
            format!("Loading {}...", kind.label()),
            theme::warning(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    if results.items.is_empty() {
        lines.push(Line::from(Span::styled(
            "No restaurants to show.",
            theme::muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{:>8} {:<28} {:>6} {:>10}  {}", "ID", "Name", "Rating", "Cost/2", "Cuisines"),
            theme::accent_bold(),
        )));

        // Keep the cursor row visible.
        let visible = area.height.saturating_sub(3) as usize;
        let start = list.cursor.saturating_sub(visible.saturating_sub(1));
        let end = (start + visible).min(results.items.len());

        for (i, r) in results.items.iter().enumerate().take(end).skip(start) {
            let is_cursor = i == list.cursor;
            let style = if is_cursor {
                theme::accent().add_modifier(Modifier::REVERSED)
            } else {
                theme::text()
            };
            let rating_style = if is_cursor {
                style
            } else {
                theme::rating_style(r.aggregate_rating)
            };
            let rating = r
                .aggregate_rating
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".into());
            let cost = match (r.average_cost_for_two, r.currency.as_deref()) {
                (Some(v), Some(cur)) => format!("{v:.0} {}", truncate(cur, 3)),
                (Some(v), None) => format!("{v:.0}"),
                (None, _) => "-".into(),
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{:>8} ", r.id), style),
                Span::styled(format!("{:<28} ", truncate(&r.name, 28)), style),
                Span::styled(format!("{rating:>6} "), rating_style),
                Span::styled(format!("{cost:>10}  "), style),
                Span::styled(truncate(&r.cuisines.join(", "), 40), style),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
