use std::sync::Arc;

use crate::{
    client::WeatherService,
    health::{self, HealthState},
    search::{Completion, PendingSearch, RequestState, Resolution, SearchController},
};

/// One interactive session: the service, its health and the search controller.
#[derive(Debug)]
pub struct Session {
    service: Arc<dyn WeatherService>,
    health: HealthState,
    controller: SearchController,
}

impl Session {
    pub fn new(service: Arc<dyn WeatherService>) -> Self {
        Self { service, health: HealthState::Unchecked, controller: SearchController::new() }
    }

    /// Probe the service once. Calling it again re-probes but never retries on its own.
    pub async fn startup(&mut self) -> &HealthState {
        self.health = health::probe(self.service.as_ref()).await;
        &self.health
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SearchController {
        &mut self.controller
    }

    pub fn state(&self) -> &RequestState {
        self.controller.state()
    }

    pub fn service(&self) -> Arc<dyn WeatherService> {
        Arc::clone(&self.service)
    }

    /// Submit the search box text and wait for it. `None` if nothing was issued.
    pub async fn submit(&mut self, text: &str) -> Option<Resolution> {
        self.controller.set_input(text);
        let pending = self.controller.submit()?;
        Some(self.run(pending).await)
    }

    /// Quick-pick a city and wait for it. `None` if nothing was issued.
    pub async fn quick_search(&mut self, city: &str) -> Option<Resolution> {
        let pending = self.controller.quick_search(city)?;
        Some(self.run(pending).await)
    }

    /// Apply a completion produced by [`PendingSearch::execute`] elsewhere.
    pub fn complete(&mut self, completion: Completion) -> Resolution {
        self.controller.complete(completion)
    }

    async fn run(&mut self, pending: PendingSearch) -> Resolution {
        let completion = pending.execute(self.service.as_ref()).await;
        self.controller.complete(completion)
    }
}
