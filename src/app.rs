//! Application orchestration layer
//!
//! Wires the catalogue controller, the fetch worker, terminal input and the UI
//! renderer together, then runs the event loop: drain pending refreshes into
//! fetch commands, render, and wait for the next input action or worker response.

use crate::catalogue::{CatalogueController, FilterCriteria};
use crate::error::Result;
use crate::fetch::{fetch_worker_loop, ListingFetchService};
use crate::input::{spawn_input_thread, InputAction};
use crate::render::protocol::{FetchCommand, FetchResponse};
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const FETCH_CHANNEL_CAPACITY: usize = 32;

/// Application orchestrator - owns the controller and coordinates the other components
pub struct Application {
    catalogue: CatalogueController,
    service: Arc<dyn ListingFetchService>,
    ui_renderer: Box<dyn UIRenderer>,
    render_state: RenderLoopState,
    current_year: i32,
}

impl Application {
    pub fn new(
        service: Arc<dyn ListingFetchService>,
        ui_renderer: Box<dyn UIRenderer>,
        initial_criteria: FilterCriteria,
        current_year: i32,
    ) -> Self {
        Self {
            catalogue: CatalogueController::with_criteria(initial_criteria),
            service,
            ui_renderer,
            render_state: RenderLoopState::new(),
            current_year,
        }
    }

    pub fn catalogue(&self) -> &CatalogueController {
        &self.catalogue
    }

    /// Run against the real terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let criteria = self.catalogue.criteria();
        let input_thread = spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            INPUT_POLL_INTERVAL,
            (criteria.manufacturer.clone(), criteria.model.clone()),
        );

        let outcome = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            warn!("input thread panicked");
        }
        self.ui_renderer.cleanup()?;
        outcome
    }

    /// Event loop fed by an arbitrary source of input actions.
    ///
    /// Returns when a `Quit` action arrives or the input channel closes.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: mpsc::UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height, self.current_year);

        let (fetch_tx, fetch_rx) = mpsc::channel::<FetchCommand>(FETCH_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) =
            mpsc::channel::<FetchResponse>(FETCH_CHANNEL_CAPACITY);
        let worker = tokio::spawn(fetch_worker_loop(
            fetch_rx,
            response_tx,
            Arc::clone(&self.service),
        ));

        self.catalogue.mount();
        info!("catalogue mounted with {:?}", self.catalogue.criteria());

        let mut running = true;
        while running {
            self.render_state
                .dispatch_pending(&mut self.catalogue, &fetch_tx)
                .await?;
            self.ui_renderer.render(&view_state, &self.catalogue)?;

            tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => {
                        running = self.render_state.process_action(
                            action,
                            &mut self.catalogue,
                            &mut view_state,
                        );
                    }
                    None => running = false,
                },
                Some(response) = response_rx.recv() => {
                    self.render_state.handle_response(
                        response,
                        &mut self.catalogue,
                        &mut view_state,
                    );
                }
            }
        }

        debug!("event loop finished, stopping fetch worker");
        let _ = fetch_tx.send(FetchCommand::Shutdown).await;
        if let Err(err) = worker.await {
            warn!("fetch worker ended abnormally: {}", err);
        }
        Ok(())
    }
}
