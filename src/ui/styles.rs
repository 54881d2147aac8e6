use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Accent color used for headers, highlights, and status badges.
pub const ACCENT: Color = Color::Indexed(208);

pub const HIGH_COLOR: Color = Color::Green;
pub const LOW_COLOR: Color = Color::Red;
pub const WARNING_COLOR: Color = Color::Yellow;

/// Produce a dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

/// Dimmed text chunk for inline usage.
pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

/// Apply the accent and bold modifiers for list selections.
pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Title badge: dark text on the accent color.
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_selection_styles_differ() {
        assert_ne!(header_style(), selection_style());
        assert_eq!(header_style().bg, Some(ACCENT));
        assert_eq!(selection_style().fg, Some(ACCENT));
    }
}
