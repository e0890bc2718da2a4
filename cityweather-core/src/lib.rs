//! Core library for the `cityweather` client.
//!
//! This crate defines:
//! - Configuration (base URL, units, quick-pick cities)
//! - The weather service client and its data model
//! - The startup health probe and the search request lifecycle
//! - Normalization of raw readings into display values
//!
//! It is used by `cityweather-cli`, but holds no terminal code and can back other front-ends.

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod model;
pub mod normalize;
pub mod search;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpWeatherService, WeatherService};
pub use config::Config;
pub use error::FetchError;
pub use health::HealthState;
pub use model::{ServerHealth, WeatherSnapshot};
pub use normalize::Units;
pub use search::{PendingSearch, RequestId, RequestState, Resolution, SearchController};
pub use session::Session;
