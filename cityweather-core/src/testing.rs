//! In-memory [`WeatherService`] for unit tests.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    client::WeatherService,
    error::FetchError,
    model::{ServerHealth, WeatherSnapshot, fixtures},
};

#[derive(Debug, Clone)]
enum Reply {
    Found,
    Status(u16, Option<String>),
    Garbage,
}

#[derive(Debug, Clone, Copy)]
enum HealthReply {
    Online(u64),
    Status(u16),
    Garbage,
}

#[derive(Debug, Default)]
pub struct FakeService {
    health: Option<HealthReply>,
    cities: HashMap<String, Reply>,
    requested: Mutex<Vec<String>>,
    health_calls: Mutex<usize>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Ok(cache_entries)` or `Err(status)`.
    pub fn with_health(mut self, reply: Result<u64, u16>) -> Self {
        self.health = Some(match reply {
            Ok(cache_entries) => HealthReply::Online(cache_entries),
            Err(code) => HealthReply::Status(code),
        });
        self
    }

    /// `/health` answers 200 with a body that is not JSON.
    pub fn with_garbled_health(mut self) -> Self {
        self.health = Some(HealthReply::Garbage);
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.cities.insert(city.to_string(), Reply::Found);
        self
    }

    pub fn with_status(mut self, city: &str, status: u16, message: Option<&str>) -> Self {
        self.cities
            .insert(city.to_string(), Reply::Status(status, message.map(str::to_string)));
        self
    }

    pub fn with_garbage(mut self, city: &str) -> Self {
        self.cities.insert(city.to_string(), Reply::Garbage);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock").clone()
    }

    pub fn health_calls(&self) -> usize {
        *self.health_calls.lock().expect("lock")
    }
}

fn malformed() -> FetchError {
    FetchError::Malformed(
        serde_json::from_str::<serde_json::Value>("<html>").expect_err("not json"),
    )
}

fn status_error(code: u16, message: Option<String>) -> FetchError {
    FetchError::Service {
        status: StatusCode::from_u16(code).expect("valid status"),
        message,
    }
}

#[async_trait]
impl WeatherService for FakeService {
    async fn health(&self) -> Result<ServerHealth, FetchError> {
        *self.health_calls.lock().expect("lock") += 1;
        match self.health {
            Some(HealthReply::Online(cache_entries)) => Ok(ServerHealth {
                cache_entries,
                status: Some("healthy".into()),
                service: None,
                version: None,
                timestamp: None,
            }),
            Some(HealthReply::Status(code)) => Err(status_error(code, None)),
            Some(HealthReply::Garbage) => Err(malformed()),
            None => Err(status_error(503, None)),
        }
    }

    async fn weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.requested.lock().expect("lock").push(city.to_string());
        match self.cities.get(city) {
            Some(Reply::Found) => Ok(fixtures::snapshot(city)),
            Some(Reply::Status(code, message)) => Err(status_error(*code, message.clone())),
            Some(Reply::Garbage) => Err(malformed()),
            None => Err(status_error(404, Some("city not found".into()))),
        }
    }
}
