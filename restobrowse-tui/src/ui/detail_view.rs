//! Detail screen: the full record, or a terminal not-found / failure message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use restobrowse_core::{DetailController, DetailState, RestaurantDetail};

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, detail: &DetailController) {
    let mut lines: Vec<Line> = Vec::new();

    match detail.state() {
        DetailState::Loading => {
            lines.push(Line::from(Span::styled("Loading...", theme::warning())));
        }
        DetailState::NotFound => {
            lines.push(Line::from(Span::styled(
                format!("Restaurant {} was not found.", detail.id()),
                theme::negative(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[Esc]back", theme::muted())));
        }
        DetailState::Failed(msg) => {
            lines.push(Line::from(Span::styled(
                format!("Could not load restaurant: {msg}"),
                theme::negative(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[r]retry [Esc]back", theme::muted())));
        }
        DetailState::Loaded(r) => record_lines(&mut lines, r),
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn record_lines<'a>(lines: &mut Vec<Line<'a>>, r: &'a RestaurantDetail) {
    lines.push(Line::from(Span::styled(r.name.as_str(), theme::accent_bold())));
    lines.push(Line::from(Span::styled(r.address.as_str(), theme::muted())));
    lines.push(Line::from(""));

    // Rating badge in the backend's color.
    let rating = r
        .aggregate_rating
        .map(|v| format!(" {v:.1} "))
        .unwrap_or_else(|| " - ".into());
    let mut badge = vec![Span::styled(rating, theme::rating_badge(r.rating_color_or_default()))];
    if let Some(text) = &r.rating_text {
        badge.push(Span::styled(format!(" {text}"), theme::text()));
    }
    if let Some(votes) = r.votes {
        badge.push(Span::styled(format!("  ({votes} votes)"), theme::muted()));
    }
    lines.push(Line::from(badge));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Overview", theme::accent_bold())));
    detail_line(lines, "Cuisines", r.cuisines.join(", "));
    let cost = match (r.average_cost_for_two, &r.currency) {
        (Some(v), Some(cur)) => format!("{v:.0} {cur}"),
        (Some(v), None) => format!("{v:.0}"),
        (None, _) => "-".into(),
    };
    detail_line(lines, "Cost for two", cost);
    if let Some(range) = r.price_range {
        detail_line(lines, "Price range", "$".repeat(usize::from(range.max(1))));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Services", theme::accent_bold())));
    flag_line(lines, "Table booking", r.has_table_booking);
    flag_line(lines, "Online delivery", r.has_online_delivery);
    flag_line(lines, "Delivering now", r.is_delivering_now);
    flag_line(lines, "Switch to order menu", r.switch_to_order_menu);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Location", theme::accent_bold())));
    if let Some(loc) = r.locality_verbose.as_ref().or(r.locality.as_ref()) {
        detail_line(lines, "Locality", loc.clone());
    }
    if let Some(city) = &r.city {
        detail_line(lines, "City", city.clone());
    }
    if let (Some(lat), Some(lon)) = (r.latitude, r.longitude) {
        detail_line(lines, "Coordinates", format!("{lat:.5}, {lon:.5}"));
    }
    if let Some(code) = r.country_code {
        detail_line(lines, "Country code", code.to_string());
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[Esc]back [r]reload", theme::muted())));
}

fn detail_line<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>20}: "), theme::muted()),
        Span::styled(value, theme::text()),
    ]));
}

fn flag_line<'a>(lines: &mut Vec<Line<'a>>, label: &str, flag: Option<bool>) {
    let (text, style) = match flag {
        Some(true) => ("yes", theme::positive()),
        Some(false) => ("no", theme::negative()),
        None => ("-", theme::muted()),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>20}: "), theme::muted()),
        Span::styled(text, style),
    ]));
}
