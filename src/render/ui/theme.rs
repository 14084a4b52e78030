//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Page heading
    pub heading: Style,

    /// Card title line
    pub card_title: Style,

    /// Border of an unselected card
    pub card_border: Color,

    /// Border of the selected card
    pub selected_border: Color,

    /// Rent estimate on each card
    pub price: Style,

    /// Highlighted manufacturer suggestion
    pub suggestion: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error panel text
    pub error_text: Color,

    /// Loading indicator and show-more hint
    pub accent: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            heading: Style::default().add_modifier(Modifier::BOLD),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_border: Color::DarkGray,
            selected_border: Color::Blue,
            price: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            suggestion: Style::default().fg(Color::White).bg(Color::Blue),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
            accent: Color::Cyan,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            heading: Style::default().add_modifier(Modifier::BOLD),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_border: Color::Reset,
            selected_border: Color::White,
            price: Style::default().add_modifier(Modifier::BOLD),
            suggestion: Style::default().add_modifier(Modifier::REVERSED),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
            accent: Color::White,
        }
    }
}
