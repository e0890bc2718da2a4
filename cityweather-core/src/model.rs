use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// Sentinel the weather service uses for "not available" on UV index and AQI.
pub const UNAVAILABLE: i32 = -1;

/// Metadata returned by `GET /health`.
///
/// Only `cache_entries` is load-bearing. The other fields are informational
/// and read leniently: a value of an unexpected shape becomes `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerHealth {
    pub cache_entries: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<DateTime<Utc>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One temperature reading in the units the service pre-computes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub celsius: f64,
    pub fahrenheit: f64,
    #[serde(default)]
    pub kelvin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp_celsius: f64,
    pub temp_fahrenheit: f64,
    #[serde(default)]
    pub temp_kelvin: Option<f64>,
    pub feels_like: TemperatureReading,
    pub temp_min: TemperatureReading,
    pub temp_max: TemperatureReading,
    pub humidity: u8,
    pub pressure: u32,
}

impl MainReadings {
    /// Current temperature as a reading, for unit-aware formatting.
    pub fn temperature(&self) -> TemperatureReading {
        TemperatureReading {
            celsius: self.temp_celsius,
            fahrenheit: self.temp_fahrenheit,
            kelvin: self.temp_kelvin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_ms: f64,
    pub speed_kmh: f64,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub degrees: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather for one city as served by `GET /weather`.
///
/// Only `name` is required. Nested blocks the service leaves out stay `None`
/// and the renderer skips them; `uv_index` and `aqi` fall back to
/// [`UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    #[serde(default)]
    pub visibility_meters: u32,
    #[serde(default = "unavailable_uv")]
    pub uv_index: f64,
    #[serde(default = "unavailable_aqi")]
    pub aqi: i32,
    #[serde(default)]
    pub air_quality: String,
    #[serde(default)]
    pub sunrise_time: String,
    #[serde(default)]
    pub sunset_time: String,
    #[serde(default)]
    pub local_time: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub cache_hit: bool,
}

fn unavailable_uv() -> f64 {
    f64::from(UNAVAILABLE)
}

fn unavailable_aqi() -> i32 {
    UNAVAILABLE
}

impl WeatherSnapshot {
    /// The leading condition, if the service reported any.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// UV index, or `None` for the sentinel.
    pub fn uv(&self) -> Option<f64> {
        (self.uv_index >= 0.0).then_some(self.uv_index)
    }

    /// AQI category with its label, or `None` for the sentinel.
    pub fn air_quality_index(&self) -> Option<(i32, &str)> {
        (self.aqi >= 0).then_some((self.aqi, self.air_quality.as_str()))
    }
}

/// Error body for non-success responses. Either field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error` wins over `message`; blank strings count as absent.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|s| !s.trim().is_empty())
            .or(self.message.filter(|s| !s.trim().is_empty()))
    }
}
