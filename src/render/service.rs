//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, the catalogue
//! controller, and the fetch worker. Input actions mutate the controller (or the
//! view state); pending refreshes are then drained into `FetchCommand`s, and
//! worker responses are applied back to the controller as they arrive.

use crate::catalogue::{CatalogueController, FilterUpdate};
use crate::constants::{FUELS, YEARS_OF_PRODUCTION};
use crate::error::{AutocatError, Result};
use crate::input::{CycleDirection, InputAction};
use crate::render::protocol::{FetchCommand, FetchResponse, RequestId};
use crate::render::ui::ViewState;
use log::debug;
use tokio::sync::mpsc;

/// Tracks coordinator state that must persist across input actions and worker responses.
#[derive(Debug)]
pub struct RenderLoopState {
    next_request_id: RequestId,
}

impl Default for RenderLoopState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoopState {
    pub fn new() -> Self {
        Self { next_request_id: 1 }
    }

    /// Apply one input action. Returns false when the application should quit.
    pub fn process_action(
        &mut self,
        action: InputAction,
        catalogue: &mut CatalogueController,
        view_state: &mut ViewState,
    ) -> bool {
        match action {
            InputAction::Quit => return false,
            InputAction::MoveSelection { direction, steps } => {
                let count = catalogue.results().records().len();
                view_state.move_selection(direction, steps, count);
            }
            InputAction::ToggleDetails => {
                if !catalogue.is_empty() {
                    view_state.details_open = !view_state.details_open;
                }
            }
            InputAction::CycleFuel(direction) => {
                let values: Vec<&str> = FUELS.iter().map(|option| option.value).collect();
                let next = cycle(&values, catalogue.criteria().fuel.as_str(), direction).to_string();
                self.apply_filter(catalogue, view_state, FilterUpdate::Fuel(next));
            }
            InputAction::CycleYear(direction) => {
                let next = cycle(YEARS_OF_PRODUCTION, catalogue.criteria().year, direction);
                self.apply_filter(catalogue, view_state, FilterUpdate::Year(next));
            }
            InputAction::ShowMore => {
                if catalogue.show_more_offered() {
                    view_state.status_line.clear_message();
                    catalogue.show_more();
                } else {
                    view_state.status_line.set_message("No more cars to show");
                }
            }
            InputAction::Refresh => {
                view_state.status_line.clear_message();
                catalogue.request_refresh();
            }
            InputAction::StartSearch(prompt) | InputAction::UpdateSearch(prompt) => {
                view_state.search_prompt = Some(prompt);
            }
            InputAction::CancelSearch => {
                view_state.search_prompt = None;
            }
            InputAction::SubmitSearch {
                manufacturer,
                model,
            } => {
                view_state.search_prompt = None;
                if manufacturer.is_empty() && model.is_empty() {
                    view_state
                        .status_line
                        .set_message("Please provide some input");
                    return true;
                }
                self.apply_filter(catalogue, view_state, FilterUpdate::Manufacturer(manufacturer));
                self.apply_filter(catalogue, view_state, FilterUpdate::Model(model));
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        true
    }

    fn apply_filter(
        &self,
        catalogue: &mut CatalogueController,
        view_state: &mut ViewState,
        update: FilterUpdate,
    ) {
        view_state.status_line.clear_message();
        catalogue.set_filter(update);
        if catalogue.has_pending_refresh() {
            view_state.selected = 0;
            view_state.details_open = false;
        }
    }

    /// Send a fetch for the pending refresh, if any. Returns the request id used.
    pub async fn dispatch_pending(
        &mut self,
        catalogue: &mut CatalogueController,
        fetch_tx: &mpsc::Sender<FetchCommand>,
    ) -> Result<Option<RequestId>> {
        let Some(criteria) = catalogue.take_pending_refresh() else {
            return Ok(None);
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        debug!("dispatching request {} for {:?}", request_id, criteria);

        fetch_tx
            .send(FetchCommand::Load {
                request_id,
                criteria,
            })
            .await
            .map_err(|_| AutocatError::other("fetch worker unavailable"))?;
        Ok(Some(request_id))
    }

    /// Apply a worker response. Every response is applied, in arrival order.
    pub fn handle_response(
        &mut self,
        response: FetchResponse,
        catalogue: &mut CatalogueController,
        view_state: &mut ViewState,
    ) {
        debug!("request {} settled", response.request_id());
        catalogue.complete_refresh(response.into_outcome());
        view_state.clamp_selection(catalogue.results().records().len());
    }
}

/// Step from `current` to the neighbouring entry of `options`, wrapping around.
/// A value not in the list starts from the first entry.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, direction: CycleDirection) -> T {
    let position = options.iter().position(|option| *option == current);
    let len = options.len();
    let index = match (position, direction) {
        (None, _) => 0,
        (Some(i), CycleDirection::Forward) => (i + 1) % len,
        (Some(i), CycleDirection::Backward) => (i + len - 1) % len,
    };
    options[index]
}
