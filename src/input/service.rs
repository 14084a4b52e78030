//! High-level input service.
//!
//! Consumes raw terminal events, runs the catalogue key-binding state machine,
//! and yields domain-level `InputAction`s that the render coordinator consumes.

use crate::constants::matching_manufacturers;
use crate::error::Result;
use crate::input::raw::{self, RawInputEvent, ScrollDirection};
use log::error;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Maximum number of manufacturer suggestions offered under the search bar.
pub const MAX_SUGGESTIONS: usize = 6;

/// Current input mode (card browsing vs search bar editing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browse,
    Search { field: SearchField },
}

/// Which search bar input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Manufacturer,
    Model,
}

impl SearchField {
    fn toggled(self) -> Self {
        match self {
            SearchField::Manufacturer => SearchField::Model,
            SearchField::Model => SearchField::Manufacturer,
        }
    }
}

/// Direction to step through a filter's option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// Snapshot of the search bar while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPrompt {
    pub manufacturer: String,
    pub model: String,
    pub field: SearchField,
    /// Index into [`SearchPrompt::suggestions`] currently highlighted.
    pub highlighted: Option<usize>,
}

impl SearchPrompt {
    fn new(manufacturer: String, model: String) -> Self {
        Self {
            manufacturer,
            model,
            field: SearchField::Manufacturer,
            highlighted: None,
        }
    }

    /// Manufacturer suggestions for the current query; empty while editing the model.
    pub fn suggestions(&self) -> Vec<&'static str> {
        if self.field != SearchField::Manufacturer {
            return Vec::new();
        }
        let mut matches = matching_manufacturers(&self.manufacturer);
        matches.truncate(MAX_SUGGESTIONS);
        matches
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.field {
            SearchField::Manufacturer => &mut self.manufacturer,
            SearchField::Model => &mut self.model,
        }
    }

    fn move_highlight(&mut self, direction: ScrollDirection) {
        let count = self.suggestions().len();
        if count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match (self.highlighted, direction) {
            (None, ScrollDirection::Down) => 0,
            (None, ScrollDirection::Up) => count - 1,
            (Some(i), ScrollDirection::Down) => (i + 1) % count,
            (Some(i), ScrollDirection::Up) => (i + count - 1) % count,
        });
    }

    /// Replace the manufacturer with the highlighted suggestion, if any.
    fn accept_highlight(&mut self) -> bool {
        let picked = self
            .highlighted
            .and_then(|i| self.suggestions().get(i).copied());
        self.highlighted = None;
        match picked {
            Some(name) => {
                self.manufacturer = name.to_string();
                true
            }
            None => false,
        }
    }
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    MoveSelection {
        direction: ScrollDirection,
        steps: usize,
    },
    ToggleDetails,
    CycleFuel(CycleDirection),
    CycleYear(CycleDirection),
    ShowMore,
    Refresh,
    Quit,
    StartSearch(SearchPrompt),
    UpdateSearch(SearchPrompt),
    SubmitSearch {
        manufacturer: String,
        model: String,
    },
    CancelSearch,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key-binding state machine for the catalogue view.
pub struct InputStateMachine {
    state: InputState,
    prompt: SearchPrompt,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Browse,
            prompt: SearchPrompt::new(String::new(), String::new()),
        }
    }

    /// Seed the search bar with the values currently applied to the catalogue.
    pub fn set_applied_search(&mut self, manufacturer: &str, model: &str) {
        if self.state == InputState::Browse {
            self.prompt = SearchPrompt::new(manufacturer.to_string(), model.to_string());
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (self.state, key_event.code) {
            (_, KeyCode::Char('c')) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            (InputState::Browse, KeyCode::Char('j') | KeyCode::Down) if plain => {
                InputAction::MoveSelection {
                    direction: ScrollDirection::Down,
                    steps: 1,
                }
            }
            (InputState::Browse, KeyCode::Char('k') | KeyCode::Up) if plain => {
                InputAction::MoveSelection {
                    direction: ScrollDirection::Up,
                    steps: 1,
                }
            }
            (InputState::Browse, KeyCode::Enter) => InputAction::ToggleDetails,
            (InputState::Browse, KeyCode::Char('f')) if plain => {
                InputAction::CycleFuel(CycleDirection::Forward)
            }
            (InputState::Browse, KeyCode::Char('F')) if plain => {
                InputAction::CycleFuel(CycleDirection::Backward)
            }
            (InputState::Browse, KeyCode::Char('y')) if plain => {
                InputAction::CycleYear(CycleDirection::Forward)
            }
            (InputState::Browse, KeyCode::Char('Y')) if plain => {
                InputAction::CycleYear(CycleDirection::Backward)
            }
            (InputState::Browse, KeyCode::Char('n') | KeyCode::Char(' ')) if plain => {
                InputAction::ShowMore
            }
            (InputState::Browse, KeyCode::Char('r')) if plain => InputAction::Refresh,
            (InputState::Browse, KeyCode::Char('q')) if plain => InputAction::Quit,
            (InputState::Browse, KeyCode::Char('/')) if plain => {
                self.state = InputState::Search {
                    field: SearchField::Manufacturer,
                };
                self.prompt.field = SearchField::Manufacturer;
                self.prompt.highlighted = None;
                InputAction::StartSearch(self.prompt.clone())
            }
            (InputState::Search { field }, KeyCode::Tab | KeyCode::BackTab) => {
                let field = field.toggled();
                self.state = InputState::Search { field };
                self.prompt.field = field;
                self.prompt.highlighted = None;
                InputAction::UpdateSearch(self.prompt.clone())
            }
            (InputState::Search { .. }, KeyCode::Down) => {
                self.prompt.move_highlight(ScrollDirection::Down);
                InputAction::UpdateSearch(self.prompt.clone())
            }
            (InputState::Search { .. }, KeyCode::Up) => {
                self.prompt.move_highlight(ScrollDirection::Up);
                InputAction::UpdateSearch(self.prompt.clone())
            }
            (InputState::Search { .. }, KeyCode::Char(ch)) if plain && !ch.is_control() => {
                self.prompt.focused_buffer().push(ch);
                self.prompt.highlighted = None;
                InputAction::UpdateSearch(self.prompt.clone())
            }
            (InputState::Search { .. }, KeyCode::Backspace) => {
                self.prompt.focused_buffer().pop();
                self.prompt.highlighted = None;
                InputAction::UpdateSearch(self.prompt.clone())
            }
            (InputState::Search { .. }, KeyCode::Enter) => {
                if self.prompt.accept_highlight() {
                    return InputAction::UpdateSearch(self.prompt.clone());
                }
                self.state = InputState::Browse;
                InputAction::SubmitSearch {
                    manufacturer: self.prompt.manufacturer.trim().to_string(),
                    model: self.prompt.model.trim().to_string(),
                }
            }
            (InputState::Search { .. }, KeyCode::Esc) => {
                self.state = InputState::Browse;
                self.prompt.highlighted = None;
                InputAction::CancelSearch
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn get_prompt(&self) -> &SearchPrompt {
        &self.prompt
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
        }
    }

    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        Ok(raw::poll_event(timeout)?.and_then(|event| self.process_raw_event(event)))
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        raw::translate(event).and_then(|event| self.process_raw_event(event))
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll(direction) => InputAction::MoveSelection {
                direction,
                steps: 1,
            },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
    initial_search: (String, String),
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        service
            .state_machine
            .set_applied_search(&initial_search.0, &initial_search.1);
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
