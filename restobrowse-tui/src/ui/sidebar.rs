//! Query controls: name search, filters, location and image state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use restobrowse_core::ListController;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, c: &ListController) {
    let q = c.query();
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Search  [/]edit [S]reset");
    field(&mut lines, "Name", non_empty(q.search_name()));
    lines.push(Line::from(""));

    section(&mut lines, "Filters  [f]apply [F]reset");
    field(&mut lines, "Country", q.country_code().map(str::to_string));
    field(&mut lines, "Avg cost for 2", q.average_spent().map(|v| v.to_string()));
    let cuisines = (!q.cuisines().is_empty()).then(|| q.cuisines().join(", "));
    field(&mut lines, "Cuisines", cuisines);
    lines.push(Line::from(""));

    section(&mut lines, "Location  [g]search [G]reset");
    field(&mut lines, "Latitude", q.latitude().map(|v| v.to_string()));
    field(&mut lines, "Longitude", q.longitude().map(|v| v.to_string()));
    field(&mut lines, "Range km", q.range().map(|v| v.to_string()));
    lines.push(Line::from(""));

    section(&mut lines, "Image  [i]pick [m]upload [M]reset");
    let image = c.image().map(|img| {
        let status = if c.image_uploaded() { "uploaded" } else { "not uploaded" };
        format!("{} ({status})", img.file_name)
    });
    field(&mut lines, "File", image);
    if let Some(dish) = c.dish_info() {
        lines.push(Line::from(vec![
            Span::styled("  Looks like ", theme::muted()),
            Span::styled(dish.predicted_food.clone(), theme::positive()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", dish.cuisines.join(", ")),
            theme::accent(),
        )));
    }

    if let Some(err) = c.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last request failed: {err}"),
            theme::negative(),
        )));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn field<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: Option<String>) {
    let (text, style) = match value {
        Some(v) => (v, theme::accent()),
        None => ("-".to_string(), theme::muted()),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>15}: "), theme::muted()),
        Span::styled(text, style),
    ]));
}
