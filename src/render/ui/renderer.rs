//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for rendering the catalogue and managing
//! terminal lifecycle hooks such as initialization and cleanup.

use crate::catalogue::CatalogueController;
use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Render the catalogue
    ///
    /// The renderer only reads: controller state for data and request flags,
    /// view state for selection, prompt and status message.
    fn render(&mut self, view_state: &ViewState, catalogue: &CatalogueController) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Enter the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
