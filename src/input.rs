//! Input subsystem: terminal event collection and the key-binding state machine.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input`
// rather than reaching into submodules.
pub use service::{
    spawn_input_thread, CycleDirection, InputAction, InputService, InputState, InputStateMachine,
    SearchField, SearchPrompt,
};
pub use raw::ScrollDirection;
