use crate::fetch::service::ListingFetchService;
use crate::render::protocol::{FetchCommand, FetchResponse, RequestId};
use crate::catalogue::FilterCriteria;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinSet;

/// Run the fetch worker processing commands from the coordinator.
///
/// Each `Load` runs as its own task, so a slow request never blocks a newer
/// one and responses come back in completion order. Dropping the worker on
/// shutdown aborts whatever is still in flight.
pub async fn fetch_worker_loop(
    mut rx: Receiver<FetchCommand>,
    tx: Sender<FetchResponse>,
    service: Arc<dyn ListingFetchService>,
) {
    let mut state = WorkerState::new(service, tx);

    while let Some(cmd) = rx.recv().await {
        if state.handle_command(cmd).done {
            break;
        }
        state.reap_finished();
    }

    debug!("fetch worker stopping with {} request(s) in flight", state.in_flight());
}

struct WorkerState {
    service: Arc<dyn ListingFetchService>,
    tx: Sender<FetchResponse>,
    tasks: JoinSet<()>,
}

impl WorkerState {
    fn new(service: Arc<dyn ListingFetchService>, tx: Sender<FetchResponse>) -> Self {
        Self {
            service,
            tx,
            tasks: JoinSet::new(),
        }
    }

    fn handle_command(&mut self, cmd: FetchCommand) -> HandlerOutcome {
        match cmd {
            FetchCommand::Load {
                request_id,
                criteria,
            } => {
                self.spawn_fetch(request_id, criteria);
                HandlerOutcome::continue_running()
            }
            FetchCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    fn spawn_fetch(&mut self, request_id: RequestId, criteria: FilterCriteria) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            let response = match service.fetch(&criteria).await {
                Ok(results) => FetchResponse::Loaded {
                    request_id,
                    results,
                },
                Err(error) => FetchResponse::Failed { request_id, error },
            };
            if tx.send(response).await.is_err() {
                warn!("request {} finished after the coordinator went away", request_id);
            }
        });
    }

    fn reap_finished(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }

    fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

struct HandlerOutcome {
    done: bool,
}

impl HandlerOutcome {
    fn continue_running() -> Self {
        Self { done: false }
    }

    fn exit() -> Self {
        Self { done: true }
    }
}
