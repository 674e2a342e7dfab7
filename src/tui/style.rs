//! Panel chrome styles.

use ratatui::style::{Color, Style};

/// Palette for borders and backgrounds; panel text brings its own colors.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const BORDER: Color = Color::DarkGray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Panel border style.
    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }
}
