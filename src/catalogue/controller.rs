//! Catalogue controller
//!
//! Owns the filter criteria, the current result set and the request flags, and
//! turns filter changes into fetch requests. It performs no I/O itself: a
//! fetch is either awaited through [`CatalogueController::refresh`] or split
//! into [`begin_refresh`](CatalogueController::begin_refresh) /
//! [`complete_refresh`](CatalogueController::complete_refresh) so an event loop
//! can keep several attempts in flight.
//!
//! Attempts are not cancelled or ordered. Every completion clears the loading
//! flag and applies its own outcome, so the last one to resolve wins.

use crate::catalogue::criteria::{FilterCriteria, FilterUpdate};
use crate::catalogue::record::{CarRecord, ResultSet};
use crate::constants::{FETCH_FALLBACK_MESSAGE, PAGE_SIZE};
use crate::error::{AutocatError, Result};
use crate::fetch::ListingFetchService;
use log::{debug, warn};

/// Lifecycle of the most recent fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Error(String),
    Ready,
}

/// What the results area should show, in display precedence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogueView<'a> {
    /// A fetch failed; replaces the results area entirely.
    Error(&'a str),
    /// No records, or the payload was not a sequence.
    Empty,
    Listing(&'a [CarRecord]),
}

#[derive(Debug, Default)]
pub struct CatalogueController {
    criteria: FilterCriteria,
    results: ResultSet,
    loading: bool,
    error: Option<String>,
    has_settled: bool,
    mounted: bool,
    refresh_pending: bool,
}

impl CatalogueController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-filled criteria (e.g. from command-line flags).
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> RequestState {
        if self.loading {
            RequestState::Loading
        } else if let Some(message) = &self.error {
            RequestState::Error(message.clone())
        } else if self.has_settled {
            RequestState::Ready
        } else {
            RequestState::Idle
        }
    }

    /// Activate the view. Schedules exactly one refresh, however often it is called.
    pub fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            self.refresh_pending = true;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Change one filter field. A real change schedules a refresh.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        if self.criteria.apply(update) {
            self.refresh_pending = true;
        }
    }

    /// Grow the limit by one page and schedule a refetch of the whole set.
    pub fn show_more(&mut self) {
        let limit = self.criteria.with_defaults().limit;
        self.criteria.limit = limit + PAGE_SIZE;
        self.refresh_pending = true;
    }

    /// Schedule a refresh without changing any filter.
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.refresh_pending
    }

    /// Drain the pending-refresh flag.
    ///
    /// Any number of changes since the last drain collapse into one attempt.
    /// Returns the criteria to fetch with, after the attempt has been started.
    pub fn take_pending_refresh(&mut self) -> Option<FilterCriteria> {
        if std::mem::take(&mut self.refresh_pending) {
            Some(self.begin_refresh())
        } else {
            None
        }
    }

    /// Mark an attempt as started and return the effective criteria for it.
    pub fn begin_refresh(&mut self) -> FilterCriteria {
        self.loading = true;
        self.error = None;
        let effective = self.criteria.with_defaults();
        debug!("refresh started with {:?}", effective);
        effective
    }

    /// Apply the outcome of an attempt. Always clears the loading flag.
    ///
    /// On failure the previous results stay in place behind the error.
    pub fn complete_refresh(&mut self, outcome: Result<ResultSet>) {
        match outcome {
            Ok(results) => {
                debug!("refresh returned {:?} records", results.len());
                self.results = results;
            }
            Err(err) => {
                warn!("error fetching cars: {}", err);
                self.error = Some(failure_message(&err));
            }
        }
        self.has_settled = true;
        self.loading = false;
    }

    /// Run one complete attempt against `service`.
    pub async fn refresh(&mut self, service: &dyn ListingFetchService) {
        let criteria = self.begin_refresh();
        let outcome = service.fetch(&criteria).await;
        self.complete_refresh(outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// `limit > results.len()`; false when the results are not a sequence.
    ///
    /// True means the server returned fewer rows than asked for, i.e. the
    /// listing is exhausted. The name is kept from the pagination widget it drives.
    pub fn has_next(&self) -> bool {
        let limit = self.criteria.with_defaults().limit as usize;
        self.results.len().map_or(false, |len| limit > len)
    }

    /// The show-more control is offered only when `has_next` is false.
    pub fn can_show_more(&self) -> bool {
        !self.has_next()
    }

    /// Whether the show-more control is on screen: a listing is shown and
    /// `can_show_more` holds. Error and empty views never carry the control.
    pub fn show_more_offered(&self) -> bool {
        matches!(self.view(), CatalogueView::Listing(_)) && self.can_show_more()
    }

    pub fn page_number(&self) -> u32 {
        self.criteria.page_number()
    }

    pub fn view(&self) -> CatalogueView<'_> {
        if let Some(message) = &self.error {
            CatalogueView::Error(message)
        } else if self.is_empty() {
            CatalogueView::Empty
        } else {
            CatalogueView::Listing(self.results.records())
        }
    }
}

fn failure_message(err: &AutocatError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FETCH_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Records every call and replays scripted outcomes in order.
    #[derive(Default)]
    struct ScriptedService {
        calls: Mutex<Vec<FilterCriteria>>,
        outcomes: Mutex<VecDeque<Result<ResultSet>>>,
    }

    impl ScriptedService {
        fn returning(outcomes: Vec<Result<ResultSet>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcomes: Mutex::new(outcomes.into()),
            }
        }

        fn calls(&self) -> Vec<FilterCriteria> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingFetchService for ScriptedService {
        async fn fetch(&self, criteria: &FilterCriteria) -> Result<ResultSet> {
            self.calls.lock().unwrap().push(criteria.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ResultSet::default()))
        }
    }

    fn cars(count: usize) -> ResultSet {
        ResultSet::from_json(json!((0..count)
            .map(|i| json!({"make": "ford", "model": format!("model {i}")}))
            .collect::<Vec<_>>()))
    }

    /// Drain pending refreshes the way the event loop does, returning how many ran.
    async fn settle(controller: &mut CatalogueController, service: &ScriptedService) -> usize {
        let mut fired = 0;
        while let Some(criteria) = controller.take_pending_refresh() {
            let outcome = service.fetch(&criteria).await;
            controller.complete_refresh(outcome);
            fired += 1;
        }
        fired
    }

    #[tokio::test]
    async fn initial_mount_fetches_defaults_once() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::new();
        assert_eq!(controller.state(), RequestState::Idle);

        controller.mount();
        controller.mount();
        assert_eq!(settle(&mut controller, &service).await, 1);

        assert_eq!(
            service.calls(),
            vec![FilterCriteria {
                manufacturer: String::new(),
                model: String::new(),
                fuel: String::new(),
                year: 2022,
                limit: 10,
            }]
        );
    }

    #[tokio::test]
    async fn falsy_fields_are_replaced_before_fetch() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::with_criteria(FilterCriteria {
            year: 0,
            limit: 0,
            ..FilterCriteria::default()
        });

        controller.refresh(&service).await;

        let call = &service.calls()[0];
        assert_eq!(call.year, 2022);
        assert_eq!(call.limit, 10);
        assert_eq!(call.fuel, "");
    }

    #[tokio::test]
    async fn successful_fetch_populates_listing() {
        let service = ScriptedService::returning(vec![Ok(cars(5))]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;

        assert!(!controller.is_empty());
        assert_eq!(controller.error(), None);
        assert!(!controller.is_loading());
        assert_eq!(controller.state(), RequestState::Ready);
        assert!(matches!(controller.view(), CatalogueView::Listing(records) if records.len() == 5));
    }

    #[tokio::test]
    async fn failure_keeps_previous_results() {
        let service = ScriptedService::returning(vec![
            Ok(cars(3)),
            Err(AutocatError::fetch("network down")),
        ]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;
        let before = controller.results().clone();
        controller.refresh(&service).await;

        assert_eq!(controller.error(), Some("network down"));
        assert!(!controller.is_loading());
        assert_eq!(controller.results(), &before);
        assert_eq!(controller.view(), CatalogueView::Error("network down"));
        assert_eq!(controller.state(), RequestState::Error("network down".to_string()));
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let service = ScriptedService::returning(vec![Err(AutocatError::fetch(""))]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;

        assert_eq!(controller.error(), Some(FETCH_FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn next_success_clears_error() {
        let service = ScriptedService::returning(vec![
            Err(AutocatError::fetch("boom")),
            Ok(cars(1)),
        ]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;
        assert!(controller.error().is_some());
        controller.refresh(&service).await;

        assert_eq!(controller.error(), None);
        assert!(matches!(controller.view(), CatalogueView::Listing(_)));
    }

    #[tokio::test]
    async fn empty_response_shows_empty_view() {
        let service = ScriptedService::returning(vec![Ok(cars(0))]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;

        assert!(controller.is_empty());
        assert_eq!(controller.view(), CatalogueView::Empty);
        assert_eq!(controller.error(), None);
    }

    #[tokio::test]
    async fn non_sequence_payload_is_empty() {
        let service = ScriptedService::returning(vec![Ok(ResultSet::from_json(
            json!({"message": "Invalid API key"}),
        ))]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;

        assert!(controller.is_empty());
        assert!(!controller.has_next());
        assert_eq!(controller.view(), CatalogueView::Empty);
    }

    #[tokio::test]
    async fn setting_fuel_fires_one_fetch() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::new();
        controller.set_filter(FilterUpdate::Manufacturer("bmw".to_string()));
        controller.mount();
        settle(&mut controller, &service).await;

        controller.set_filter(FilterUpdate::Fuel("Electric".to_string()));
        assert_eq!(settle(&mut controller, &service).await, 1);

        let last = service.calls().pop().unwrap();
        assert_eq!(last.fuel, "Electric");
        assert_eq!(last.manufacturer, "bmw");
        assert_eq!(last.year, 2022);
        assert_eq!(last.limit, 10);
    }

    #[tokio::test]
    async fn unchanged_value_does_not_refetch() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::new();
        controller.mount();
        settle(&mut controller, &service).await;

        controller.set_filter(FilterUpdate::Year(2022));
        controller.set_filter(FilterUpdate::Model(String::new()));

        assert!(!controller.has_pending_refresh());
        assert_eq!(settle(&mut controller, &service).await, 0);
    }

    #[tokio::test]
    async fn batched_changes_fire_once() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::new();
        controller.mount();
        settle(&mut controller, &service).await;

        controller.set_filter(FilterUpdate::Manufacturer("audi".to_string()));
        controller.set_filter(FilterUpdate::Model("a4".to_string()));

        assert_eq!(settle(&mut controller, &service).await, 1);
        let last = service.calls().pop().unwrap();
        assert_eq!((last.manufacturer.as_str(), last.model.as_str()), ("audi", "a4"));
    }

    #[tokio::test]
    async fn show_more_grows_limit_by_one_page() {
        let service = ScriptedService::default();
        let mut controller = CatalogueController::new();
        controller.mount();
        settle(&mut controller, &service).await;

        controller.show_more();
        assert_eq!(controller.criteria().limit, 20);
        assert_eq!(controller.page_number(), 2);
        assert_eq!(settle(&mut controller, &service).await, 1);
        assert_eq!(service.calls().pop().unwrap().limit, 20);
    }

    #[tokio::test]
    async fn has_next_compares_limit_with_row_count() {
        let service = ScriptedService::returning(vec![Ok(cars(10)), Ok(cars(4))]);
        let mut controller = CatalogueController::new();

        controller.refresh(&service).await;
        assert!(!controller.has_next());
        assert!(controller.can_show_more());

        controller.refresh(&service).await;
        assert!(controller.has_next());
        assert!(!controller.can_show_more());
    }

    #[test]
    fn show_more_is_offered_only_with_a_listing() {
        let mut controller = CatalogueController::new();
        assert!(!controller.show_more_offered());

        controller.complete_refresh(Ok(cars(10)));
        assert!(controller.show_more_offered());

        controller.complete_refresh(Err(AutocatError::fetch("network down")));
        assert!(controller.can_show_more());
        assert!(!controller.show_more_offered());

        controller.begin_refresh();
        controller.complete_refresh(Ok(ResultSet::from_json(json!({"message": "nope"}))));
        assert_eq!(controller.view(), CatalogueView::Empty);
        assert!(controller.can_show_more());
        assert!(!controller.show_more_offered());
    }

    #[test]
    fn out_of_order_completions_settle() {
        let mut controller = CatalogueController::new();
        let _first = controller.begin_refresh();
        controller.set_filter(FilterUpdate::Fuel("Gas".to_string()));
        let second = controller.take_pending_refresh().unwrap();
        assert_eq!(second.fuel, "Gas");
        assert!(controller.is_loading());

        // The newer attempt resolves first, then the older one overwrites it.
        controller.complete_refresh(Ok(cars(2)));
        assert!(!controller.is_loading());
        controller.complete_refresh(Ok(cars(7)));

        assert!(!controller.is_loading());
        assert_eq!(controller.results().len(), Some(7));
        assert_eq!(controller.error(), None);
    }
}
