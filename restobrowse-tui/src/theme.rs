//! Theme tokens for the restobrowse TUI
//!
//! Dark background with a warm accent. Rating colors come from the
//! backend as hex strings and are parsed here.
//!
//! # Color Palette
//! - **Accent**: Saffron (focus, headers, selected row)
//! - **Positive**: Basil green (good ratings, success)
//! - **Negative**: Chili red (errors, not found)
//! - **Warning**: Amber (status warnings, pending requests)
//! - **Muted**: Slate (secondary text)

use ratatui::style::{Color, Modifier, Style};

/// Fallback when the backend sends no rating color.
pub const DEFAULT_RATING_COLOR: Color = Color::Rgb(0, 87, 0);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::trattoria()
    }
}

impl Theme {
    pub const fn trattoria() -> Self {
        THEME
    }

    /// Color for an aggregate rating on the 0–5 scale.
    pub fn rating_color(&self, rating: f64) -> Color {
        match rating {
            r if r >= 4.0 => self.positive,
            r if r >= 3.0 => self.accent,
            r if r > 0.0 => self.warning,
            _ => self.muted,
        }
    }
}

const THEME: Theme = Theme {
    background: Color::Rgb(20, 18, 16),
    accent: Color::Rgb(244, 180, 0),
    positive: Color::Rgb(76, 175, 80),
    negative: Color::Rgb(229, 57, 53),
    warning: Color::Rgb(255, 167, 38),
    muted: Color::Rgb(120, 130, 140),
    text_primary: Color::White,
};

/// Screen fill.
pub fn base() -> Style {
    Style::default().bg(THEME.background)
}

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn rating_style(rating: Option<f64>) -> Style {
    match rating {
        Some(r) => Style::default().fg(THEME.rating_color(r)),
        None => muted(),
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into a terminal color.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Badge style for the rating block on the detail screen.
pub fn rating_badge(hex: &str) -> Style {
    let bg = parse_hex(hex).unwrap_or(DEFAULT_RATING_COLOR);
    Style::default()
        .bg(bg)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.accent, THEME.accent);
        assert_eq!(theme.background, Color::Rgb(20, 18, 16));
    }

    #[test]
    fn test_inactive_panels_are_muted() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
        assert_eq!(panel_title(false), muted());
        assert_eq!(base().bg, Some(THEME.background));
    }

    #[test]
    fn test_rating_color() {
        let theme = Theme::default();
        assert_eq!(theme.rating_color(4.5), theme.positive);
        assert_eq!(theme.rating_color(3.2), theme.accent);
        assert_eq!(theme.rating_color(2.1), theme.warning);
        assert_eq!(theme.rating_color(0.0), theme.muted);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#005700"), Some(Color::Rgb(0, 87, 0)));
        assert_eq!(parse_hex("3F7E00"), Some(Color::Rgb(63, 126, 0)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_rating_badge_falls_back() {
        assert_eq!(rating_badge("not a color").bg, Some(DEFAULT_RATING_COLOR));
    }
}
