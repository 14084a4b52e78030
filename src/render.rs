//! Rendering subsystem: the coordinator between input, controller and fetch worker,
//! the channel protocol it speaks, and the terminal UI.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::RenderLoopState;
