//! Request lifecycle for city searches.
//!
//! The controller is a plain state machine: starting a search hands back a
//! [`PendingSearch`] that the caller executes against a [`WeatherService`],
//! and the resulting [`Completion`] is fed back through
//! [`SearchController::complete`]. Every search gets a sequence number and
//! only the most recently issued one may settle the state, so overlapping
//! searches always end on the last city asked for.

use std::fmt;

use crate::{client::WeatherService, error::FetchError, model::WeatherSnapshot};

/// Monotonic id assigned to each search when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the interface is showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading { request: RequestId, city: String },
    Success(WeatherSnapshot),
    Error(String),
}

/// A search that has moved the controller to `Loading` and still needs its fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending search does nothing until it is executed"]
pub struct PendingSearch {
    pub id: RequestId,
    pub city: String,
}

impl PendingSearch {
    /// Run the fetch. Borrows only the service, so several may be in flight.
    pub async fn execute(self, service: &dyn WeatherService) -> Completion {
        let outcome = service.weather(&self.city).await;
        Completion { id: self.id, city: self.city, outcome }
    }
}

/// Result of a fetch, ready to be applied to the controller.
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub city: String,
    pub outcome: Result<WeatherSnapshot, FetchError>,
}

/// Whether a completion changed the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer search was issued in the meantime; the completion was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchController {
    input: String,
    state: RequestState,
    last_issued: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Text typed into the search box; does not start anything.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            RequestState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// The search box may only submit when nothing is loading.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Submit whatever is in the search box.
    ///
    /// Returns `None`, leaving everything untouched, while a search is loading
    /// or when the trimmed input is empty.
    pub fn submit(&mut self) -> Option<PendingSearch> {
        if !self.can_submit() {
            tracing::debug!("submit ignored while a search is loading");
            return None;
        }
        let city = self.input.trim().to_string();
        self.begin(city)
    }

    /// Quick-pick shortcut: fills the search box and starts immediately,
    /// even if another search is still loading.
    pub fn quick_search(&mut self, city: &str) -> Option<PendingSearch> {
        self.input = city.to_string();
        self.begin(city.trim().to_string())
    }

    fn begin(&mut self, city: String) -> Option<PendingSearch> {
        if city.is_empty() {
            return None;
        }

        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        tracing::debug!(request = %id, %city, "search started");

        self.state = RequestState::Loading { request: id, city: city.clone() };
        Some(PendingSearch { id, city })
    }

    /// Apply a finished fetch. Only the most recently issued search counts.
    pub fn complete(&mut self, completion: Completion) -> Resolution {
        let Completion { id, city, outcome } = completion;

        if id.get() != self.last_issued {
            tracing::debug!(request = %id, %city, latest = self.last_issued, "dropping stale result");
            return Resolution::Stale;
        }

        self.state = match outcome {
            Ok(snapshot) => {
                tracing::debug!(request = %id, %city, cache_hit = snapshot.cache_hit, "search succeeded");
                RequestState::Success(snapshot)
            }
            Err(err) => {
                tracing::warn!(request = %id, %city, error = %err, "search failed");
                RequestState::Error(err.user_message())
            }
        };
        Resolution::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::fixtures, testing::FakeService};
    use reqwest::StatusCode;

    fn ok(pending: &PendingSearch) -> Completion {
        Completion {
            id: pending.id,
            city: pending.city.clone(),
            outcome: Ok(fixtures::snapshot(&pending.city)),
        }
    }

    fn failed(pending: &PendingSearch, message: Option<&str>) -> Completion {
        Completion {
            id: pending.id,
            city: pending.city.clone(),
            outcome: Err(FetchError::Service {
                status: StatusCode::NOT_FOUND,
                message: message.map(str::to_string),
            }),
        }
    }

    #[test]
    fn starts_idle() {
        let ctl = SearchController::new();

        assert_eq!(ctl.state(), &RequestState::Idle);
        assert!(ctl.can_submit());
        assert!(ctl.snapshot().is_none());
        assert!(ctl.error().is_none());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut ctl = SearchController::new();

        ctl.set_input("   \t ");
        assert!(ctl.submit().is_none());
        assert!(ctl.quick_search("").is_none());
        assert_eq!(ctl.state(), &RequestState::Idle);

        let london = ctl.quick_search("London").expect("starts");
        ctl.complete(ok(&london));
        ctl.set_input("  ");
        assert!(ctl.submit().is_none());
        assert_eq!(ctl.snapshot().map(|s| s.name.as_str()), Some("London"));
    }

    #[test]
    fn submit_trims_city_and_enters_loading() {
        let mut ctl = SearchController::new();
        ctl.set_input("  Paris ");

        let pending = ctl.submit().expect("starts");

        assert_eq!(pending.city, "Paris");
        assert_eq!(
            ctl.state(),
            &RequestState::Loading { request: pending.id, city: "Paris".into() }
        );
        assert!(!ctl.can_submit());
    }

    #[test]
    fn submit_is_blocked_while_loading_but_quick_search_is_not() {
        let mut ctl = SearchController::new();
        ctl.set_input("Paris");
        let first = ctl.submit().expect("starts");

        ctl.set_input("Rome");
        assert!(ctl.submit().is_none());

        let second = ctl.quick_search("Tokyo").expect("shortcut always starts");
        assert!(second.id > first.id);
        assert_eq!(ctl.input(), "Tokyo");
    }

    #[test]
    fn new_search_clears_previous_snapshot_and_error() {
        let mut ctl = SearchController::new();

        let a = ctl.quick_search("Atlantis").expect("starts");
        ctl.complete(failed(&a, Some("city not found")));
        assert_eq!(ctl.error(), Some("city not found"));

        let b = ctl.quick_search("London").expect("starts");
        assert!(ctl.error().is_none());
        assert!(ctl.is_loading());
        ctl.complete(ok(&b));
        assert!(ctl.error().is_none());

        let _c = ctl.quick_search("Tokyo").expect("starts");
        assert!(ctl.snapshot().is_none());
        assert!(ctl.is_loading());
    }

    #[test]
    fn not_found_body_becomes_error_state() {
        let mut ctl = SearchController::new();
        let pending = ctl.quick_search("Atlantis").expect("starts");

        assert_eq!(ctl.complete(failed(&pending, Some("city not found"))), Resolution::Applied);
        assert_eq!(ctl.state(), &RequestState::Error("city not found".into()));
    }

    #[test]
    fn missing_error_message_uses_fallback() {
        let mut ctl = SearchController::new();
        let pending = ctl.quick_search("Atlantis").expect("starts");

        ctl.complete(failed(&pending, None));
        assert_eq!(ctl.error(), Some(crate::error::FETCH_FAILED));
    }

    #[test]
    fn later_issued_search_wins_when_it_finishes_last() {
        let mut ctl = SearchController::new();
        let london = ctl.quick_search("London").expect("starts");
        let tokyo = ctl.quick_search("Tokyo").expect("starts");

        assert_eq!(ctl.complete(ok(&london)), Resolution::Stale);
        assert!(ctl.is_loading());
        assert_eq!(ctl.complete(ok(&tokyo)), Resolution::Applied);

        assert_eq!(ctl.snapshot().map(|s| s.name.as_str()), Some("Tokyo"));
    }

    #[test]
    fn later_issued_search_wins_when_it_finishes_first() {
        let mut ctl = SearchController::new();
        let london = ctl.quick_search("London").expect("starts");
        let tokyo = ctl.quick_search("Tokyo").expect("starts");

        assert_eq!(ctl.complete(ok(&tokyo)), Resolution::Applied);
        assert_eq!(ctl.complete(failed(&london, Some("late failure"))), Resolution::Stale);

        assert_eq!(ctl.snapshot().map(|s| s.name.as_str()), Some("Tokyo"));
        assert!(ctl.error().is_none());
    }

    #[test]
    fn request_ids_increase() {
        let mut ctl = SearchController::new();
        let ids: Vec<u64> = ["a", "b", "c"]
            .iter()
            .filter_map(|c| ctl.quick_search(c))
            .map(|p| p.id.get())
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(RequestId(3).to_string(), "#3");
    }

    #[tokio::test]
    async fn execute_fetches_the_trimmed_city() {
        let svc = FakeService::new().with_city("New York");
        let mut ctl = SearchController::new();
        ctl.set_input("  New York  ");

        let pending = ctl.submit().expect("starts");
        let completion = pending.execute(&svc).await;
        ctl.complete(completion);

        assert_eq!(svc.requested(), vec!["New York".to_string()]);
        assert_eq!(ctl.snapshot().map(|s| s.name.as_str()), Some("New York"));
    }
}
