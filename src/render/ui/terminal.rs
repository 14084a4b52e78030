//! Terminal UI implementation using ratatui
//!
//! Draws the catalogue page: heading, search bar, filter summary, the results
//! area (error panel, empty panel or card list with an optional details panel)
//! and the status line. Data comes from the controller; nothing here mutates it.

use crate::catalogue::{CarRecord, CatalogueController, CatalogueView};
use crate::error::Result;
use crate::input::{SearchField, SearchPrompt};
use crate::render::ui::state::{fuel_title, year_title, ViewState};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::ops::Range;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 4;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }
}

/// Draw the whole page into `frame`.
pub fn draw_catalogue(
    frame: &mut Frame,
    view_state: &ViewState,
    catalogue: &CatalogueController,
    theme: &ColorTheme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_heading(frame, chunks[0], theme);
    draw_search_bar(frame, chunks[1], view_state, catalogue);
    draw_results(frame, chunks[2], view_state, catalogue, theme);
    draw_status(frame, chunks[3], view_state, catalogue, theme);

    // Suggestions overlay the top of the results area while the search bar is open
    if let Some(prompt) = &view_state.search_prompt {
        draw_suggestions(frame, chunks[2], prompt, theme);
    }
}

fn draw_heading(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
    let heading = Paragraph::new(vec![
        Line::from(Span::styled("Car Catalogue", theme.heading)),
        Line::from("Explore the cars you might like"),
    ]);
    frame.render_widget(heading, area);
}

fn draw_search_bar(
    frame: &mut Frame,
    area: Rect,
    view_state: &ViewState,
    catalogue: &CatalogueController,
) {
    let criteria = catalogue.criteria();
    let (manufacturer, model, focus) = match &view_state.search_prompt {
        Some(prompt) => (
            prompt.manufacturer.as_str(),
            prompt.model.as_str(),
            Some(prompt.field),
        ),
        None => (criteria.manufacturer.as_str(), criteria.model.as_str(), None),
    };

    let field = |label: &'static str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        let shown = if value.is_empty() && !focused {
            "any".to_string()
        } else {
            value.to_string()
        };
        vec![Span::raw(label), Span::styled(shown, style)]
    };

    let mut spans = field(
        "Manufacturer: ",
        manufacturer,
        focus == Some(SearchField::Manufacturer),
    );
    spans.push(Span::raw("   "));
    spans.extend(field("Model: ", model, focus == Some(SearchField::Model)));
    spans.push(Span::raw("   "));
    spans.push(Span::raw(format!(
        "Fuel: {}   Year: {}",
        fuel_title(&criteria.fuel),
        year_title(criteria.year)
    )));

    let title = if focus.is_some() {
        " Search (Tab switch, Enter submit, Esc cancel) "
    } else {
        " Search (/) "
    };
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(bar, area);
}

fn draw_results(
    frame: &mut Frame,
    area: Rect,
    view_state: &ViewState,
    catalogue: &CatalogueController,
    theme: &ColorTheme,
) {
    match catalogue.view() {
        CatalogueView::Error(message) => {
            let panel = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Oops, something went wrong",
                    Style::default()
                        .fg(theme.error_text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(message.to_string()),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(panel, area);
        }
        CatalogueView::Empty => {
            let panel = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Oops, no results",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("No cars found."),
            ]);
            frame.render_widget(panel, area);
        }
        CatalogueView::Listing(records) => {
            draw_listing(frame, area, view_state, catalogue, records, theme)
        }
    }
}

fn draw_listing(
    frame: &mut Frame,
    area: Rect,
    view_state: &ViewState,
    catalogue: &CatalogueController,
    records: &[CarRecord],
    theme: &ColorTheme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let (cards_area, details_area) = if view_state.details_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);
        (columns[0], Some(columns[1]))
    } else {
        (rows[0], None)
    };

    let capacity = (cards_area.height / CARD_HEIGHT) as usize;
    let window = visible_window(view_state.selected, records.len(), capacity);
    for (slot, index) in window.enumerate() {
        let card_area = Rect {
            x: cards_area.x,
            y: cards_area.y + slot as u16 * CARD_HEIGHT,
            width: cards_area.width,
            height: CARD_HEIGHT,
        };
        let border = if index == view_state.selected {
            theme.selected_border
        } else {
            theme.card_border
        };
        let card = Paragraph::new(card_lines(&records[index], view_state.current_year, theme))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(card, card_area);
    }

    if let (Some(details_area), Some(record)) = (details_area, records.get(view_state.selected)) {
        let lines: Vec<Line> = record
            .fields()
            .into_iter()
            .map(|(name, value)| Line::from(format!("{name}: {value}")))
            .collect();
        let details = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", record.title())),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(details, details_area);
    }

    let mut footer = Vec::new();
    if catalogue.is_loading() {
        footer.push(Span::styled("Loading... ", Style::default().fg(theme.accent)));
    }
    if catalogue.show_more_offered() {
        footer.push(Span::styled(
            format!("[n] Show More (page {})", catalogue.page_number()),
            Style::default().fg(theme.accent),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[1]);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, prompt: &SearchPrompt, theme: &ColorTheme) {
    let suggestions = prompt.suggestions();
    if suggestions.is_empty() || area.height == 0 {
        return;
    }
    let lines: Vec<Line> = suggestions
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if prompt.highlighted == Some(i) {
                Line::from(Span::styled(name.to_string(), theme.suggestion))
            } else {
                Line::from(name.to_string())
            }
        })
        .collect();
    let overlay = Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2).min(32),
        height: (lines.len() as u16 + 2).min(area.height),
    };
    frame.render_widget(ratatui::widgets::Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        overlay,
    );
}

fn draw_status(
    frame: &mut Frame,
    area: Rect,
    view_state: &ViewState,
    catalogue: &CatalogueController,
    theme: &ColorTheme,
) {
    let text = view_state.status_line.format_status_line(
        catalogue.criteria(),
        catalogue.page_number(),
        catalogue.is_loading(),
    );
    let status = Paragraph::new(text).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));
    frame.render_widget(status, area);
}

/// Two content lines for a card.
fn card_lines(record: &CarRecord, current_year: i32, theme: &ColorTheme) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(record.title(), theme.card_title)];
    if let Some(rent) = record.daily_rent(current_year) {
        title.push(Span::raw("  "));
        title.push(Span::styled(format!("${rent}/day"), theme.price));
    }

    let mpg = record
        .city_mpg()
        .map(|mpg| format!("{mpg} MPG"))
        .unwrap_or_else(|| "- MPG".to_string());
    let specs = format!(
        "{} | {} | {}",
        record.transmission_label(),
        record.drive_label(),
        mpg
    );

    vec![Line::from(title), Line::from(specs)]
}

/// Indices of the cards to draw so that `selected` stays on screen.
fn visible_window(selected: usize, count: usize, capacity: usize) -> Range<usize> {
    if capacity == 0 || count == 0 {
        return 0..0;
    }
    let start = (selected + 1).saturating_sub(capacity).min(count.saturating_sub(1));
    start..(start + capacity).min(count)
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState, catalogue: &CatalogueController) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(|frame| draw_catalogue(frame, view_state, catalogue, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::ResultSet;
    use crate::error::AutocatError;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn screen(view_state: &ViewState, catalogue: &CatalogueController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let theme = ColorTheme::default();
        terminal
            .draw(|frame| draw_catalogue(frame, view_state, catalogue, &theme))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn listing(count: usize) -> ResultSet {
        ResultSet::from_json(json!((0..count)
            .map(|i| json!({
                "make": "toyota",
                "model": format!("corolla{i}"),
                "year": 2020,
                "city_mpg": 30,
                "transmission": "a",
                "drive": "fwd"
            }))
            .collect::<Vec<_>>()))
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        let mono = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(mono.theme.status_bg, ratatui::style::Color::Black);
    }

    #[test]
    fn empty_catalogue_shows_no_results() {
        let catalogue = CatalogueController::new();
        let text = screen(&ViewState::new(100, 30, 2024), &catalogue);
        assert!(text.contains("Car Catalogue"));
        assert!(text.contains("Oops, no results"));
        assert!(!text.contains("something went wrong"));
    }

    #[test]
    fn error_panel_takes_precedence() {
        let mut catalogue = CatalogueController::new();
        catalogue.complete_refresh(Ok(listing(3)));
        catalogue.complete_refresh(Err(AutocatError::fetch("network down")));

        let text = screen(&ViewState::new(100, 30, 2024), &catalogue);
        assert!(text.contains("Oops, something went wrong"));
        assert!(text.contains("network down"));
        assert!(!text.contains("Corolla0"));
    }

    #[test]
    fn listing_shows_cards_and_show_more() {
        let mut catalogue = CatalogueController::new();
        catalogue.complete_refresh(Ok(listing(10)));

        let text = screen(&ViewState::new(100, 30, 2024), &catalogue);
        // 50 + 30 * 0.1 + 4 * 0.05 = 53.2
        assert!(text.contains("Toyota Corolla0  $53/day"));
        assert!(text.contains("Automatic | FWD | 30 MPG"));
        assert!(text.contains("Show More (page 1)"));
    }

    #[test]
    fn short_page_hides_show_more() {
        let mut catalogue = CatalogueController::new();
        catalogue.complete_refresh(Ok(listing(3)));

        let text = screen(&ViewState::new(100, 30, 2024), &catalogue);
        assert!(text.contains("Toyota Corolla2"));
        assert!(!text.contains("Show More"));
    }

    #[test]
    fn details_panel_lists_fields() {
        let mut catalogue = CatalogueController::new();
        catalogue.complete_refresh(Ok(listing(2)));
        let mut view_state = ViewState::new(100, 30, 2024);
        view_state.selected = 1;
        view_state.details_open = true;

        let text = screen(&view_state, &catalogue);
        assert!(text.contains("model: corolla1"));
        assert!(text.contains("city mpg: 30"));
    }

    #[test]
    fn visible_window_follows_selection() {
        assert_eq!(visible_window(0, 10, 3), 0..3);
        assert_eq!(visible_window(2, 10, 3), 0..3);
        assert_eq!(visible_window(5, 10, 3), 3..6);
        assert_eq!(visible_window(9, 10, 3), 7..10);
        assert_eq!(visible_window(1, 2, 5), 0..2);
        assert_eq!(visible_window(0, 0, 5), 0..0);
        assert_eq!(visible_window(4, 10, 0), 0..0);
    }
}
