//! UI state management structures
//!
//! Presentation-only state: selection, details panel, search prompt and status
//! message. Catalogue data lives in the controller and is passed to the renderer
//! alongside this struct.

use crate::catalogue::FilterCriteria;
use crate::constants::{DEFAULT_YEAR, FUELS};
use crate::input::{ScrollDirection, SearchPrompt};

/// Viewport state for rendering
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Index of the highlighted card
    pub selected: usize,

    /// Whether the details panel for the selected card is open
    pub details_open: bool,

    /// Search bar contents while it is being edited
    pub search_prompt: Option<SearchPrompt>,

    pub status_line: StatusLine,

    pub viewport_width: u16,
    pub viewport_height: u16,

    /// Year used for the rent estimate on each card
    pub current_year: i32,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16, current_year: i32) -> Self {
        Self {
            selected: 0,
            details_open: false,
            search_prompt: None,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
            current_year,
        }
    }

    /// Move the selection within `record_count` cards, stopping at either end.
    pub fn move_selection(&mut self, direction: ScrollDirection, steps: usize, record_count: usize) {
        if record_count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = match direction {
            ScrollDirection::Up => self.selected.saturating_sub(steps),
            ScrollDirection::Down => (self.selected + steps).min(record_count - 1),
        };
    }

    /// Keep the selection valid after the result set was replaced.
    pub fn clamp_selection(&mut self, record_count: usize) {
        if record_count == 0 {
            self.selected = 0;
            self.details_open = false;
        } else if self.selected >= record_count {
            self.selected = record_count - 1;
        }
    }

    /// Update terminal dimensions. Returns true if dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Format the status line: active filters, page, loading flag, then any message.
    pub fn format_status_line(&self, criteria: &FilterCriteria, page: u32, loading: bool) -> String {
        let mut parts = vec![
            format!("Fuel: {}", fuel_title(&criteria.fuel)),
            format!("Year: {}", year_title(criteria.year)),
            format!("Page {}", page),
        ];
        if loading {
            parts.push("Loading...".to_string());
        }
        if let Some(ref message) = self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }
}

/// Display title for a fuel filter value; unset shows "Any".
pub fn fuel_title(value: &str) -> &str {
    if value.is_empty() {
        return "Any";
    }
    FUELS
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.title)
        .unwrap_or(value)
}

/// Display title for a year filter value; unset shows the year actually queried.
pub fn year_title(year: u16) -> String {
    if year == 0 {
        format!("Any ({})", DEFAULT_YEAR)
    } else {
        year.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_creation() {
        let state = ViewState::new(80, 24, 2024);
        assert_eq!(state.selected, 0);
        assert!(!state.details_open);
        assert!(state.search_prompt.is_none());
        assert_eq!(state.viewport_width, 80);
        assert_eq!(state.viewport_height, 24);
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = ViewState::new(80, 24, 2024);
        state.move_selection(ScrollDirection::Up, 1, 5);
        assert_eq!(state.selected, 0);
        state.move_selection(ScrollDirection::Down, 3, 5);
        assert_eq!(state.selected, 3);
        state.move_selection(ScrollDirection::Down, 10, 5);
        assert_eq!(state.selected, 4);

        state.details_open = true;
        state.clamp_selection(2);
        assert_eq!(state.selected, 1);
        assert!(state.details_open);
        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
        assert!(!state.details_open);
    }

    #[test]
    fn test_status_line_format() {
        let mut status = StatusLine::new();
        let mut criteria = FilterCriteria::default();

        assert_eq!(
            status.format_status_line(&criteria, 1, false),
            "Fuel: Any | Year: 2022 | Page 1"
        );

        criteria.fuel = "Electricity".to_string();
        criteria.year = 0;
        status.set_message("No more cars to show");
        assert_eq!(
            status.format_status_line(&criteria, 2, true),
            "Fuel: Electricity | Year: Any (2022) | Page 2 | Loading... | No more cars to show"
        );

        status.clear_message();
        criteria.fuel = "Diesel".to_string();
        assert_eq!(
            status.format_status_line(&criteria, 3, false),
            "Fuel: Diesel | Year: Any (2022) | Page 3"
        );
    }

    #[test]
    fn test_filter_titles() {
        assert_eq!(fuel_title(""), "Any");
        assert_eq!(fuel_title("Gas"), "Gas");
        assert_eq!(year_title(0), "Any (2022)");
        assert_eq!(year_title(2019), "2019");
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = ViewState::new(80, 24, 2024);
        assert!(!state.update_terminal_size(80, 24));
        assert!(state.update_terminal_size(120, 30));
        assert_eq!((state.viewport_width, state.viewport_height), (120, 30));
    }
}
