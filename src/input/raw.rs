//! Low-level input collection: crossterm polling and translation into primitive
//! events that the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Direction of a wheel or arrow movement through the card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Scroll(ScrollDirection),
}

/// Translate a crossterm event, dropping the ones the catalogue ignores
/// (key releases, focus changes, pastes, mouse clicks).
pub fn translate(event: Event) -> Option<RawInputEvent> {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Some(RawInputEvent::Key(key_event))
        }
        Event::Resize(width, height) => Some(RawInputEvent::Resize { width, height }),
        Event::Mouse(mouse_event) => translate_mouse(mouse_event),
        _ => None,
    }
}

fn translate_mouse(mouse_event: MouseEvent) -> Option<RawInputEvent> {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => Some(RawInputEvent::Scroll(ScrollDirection::Up)),
        MouseEventKind::ScrollDown => Some(RawInputEvent::Scroll(ScrollDirection::Down)),
        _ => None,
    }
}

/// Retrieve the next relevant raw input event, blocking up to `timeout`.
pub fn poll_event(timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
    let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
    if !event::poll(poll_timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}
