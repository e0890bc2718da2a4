use crate::{client::WeatherService, model::ServerHealth};

/// Shown whenever the startup probe fails, whatever the cause.
pub const UNREACHABLE_SERVER: &str =
    "Unable to connect to weather server. Please ensure the server is running.";

/// Reachability of the weather service as seen by the startup probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HealthState {
    #[default]
    Unchecked,
    Online(ServerHealth),
    Unreachable(String),
}

impl HealthState {
    pub fn server(&self) -> Option<&ServerHealth> {
        match self {
            HealthState::Online(health) => Some(health),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            HealthState::Unreachable(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, HealthState::Online(_))
    }
}

/// Single best-effort probe of `GET /health`. No retry; the result never
/// blocks searching.
pub async fn probe(service: &dyn WeatherService) -> HealthState {
    match service.health().await {
        Ok(health) => {
            tracing::info!(cache_entries = health.cache_entries, "weather server online");
            HealthState::Online(health)
        }
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            HealthState::Unreachable(UNREACHABLE_SERVER.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeService;

    #[tokio::test]
    async fn healthy_server_is_recorded() {
        let svc = FakeService::new().with_health(Ok(12));

        let state = probe(&svc).await;

        assert!(state.is_online());
        assert_eq!(state.server().map(|h| h.cache_entries), Some(12));
        assert_eq!(state.error(), None);
        assert_eq!(svc.health_calls(), 1);
    }

    #[tokio::test]
    async fn any_failure_gives_the_fixed_message() {
        let svc = FakeService::new().with_health(Err(503));

        let state = probe(&svc).await;

        assert_eq!(state.error(), Some(UNREACHABLE_SERVER));
        assert!(state.server().is_none());
        assert_eq!(svc.health_calls(), 1);
    }

    #[tokio::test]
    async fn unreadable_health_body_counts_as_unreachable() {
        let svc = FakeService::new().with_garbled_health();

        let state = probe(&svc).await;

        assert_eq!(state, HealthState::Unreachable(UNREACHABLE_SERVER.to_string()));
        assert_eq!(svc.health_calls(), 1);
    }

    #[test]
    fn starts_unchecked() {
        let state = HealthState::default();
        assert_eq!(state, HealthState::Unchecked);
        assert!(!state.is_online());
        assert!(state.error().is_none());
    }
}
