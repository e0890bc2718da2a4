//! Display-value derivation for a [`WeatherSnapshot`].
//!
//! Everything here is a pure, total function: each lookup has a documented
//! fallback and no input panics.

use serde::{Deserialize, Serialize};

use crate::model::{TemperatureReading, WeatherSnapshot, Wind};

/// Glyph for descriptions that are not in the icon table.
pub const FALLBACK_ICON: &str = "🌤️";

/// Glyph for country codes that are not in the flag table.
pub const FALLBACK_FLAG: &str = "🌍";

/// Rendered in place of a sentinel UV index or AQI.
pub const UNAVAILABLE_TEXT: &str = "N/A";

const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_METER: f64 = 3.280_84;
const MPH_PER_MS: f64 = 2.236_936;

/// Measurement system used for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `#rrggbb` color chosen by one of the banding functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    pub const GREEN: Color = Color("#00e400");
    pub const YELLOW: Color = Color("#ffff00");
    pub const ORANGE: Color = Color("#ff7e00");
    pub const RED: Color = Color("#ff0000");
    pub const VIOLET: Color = Color("#b567a4");
    pub const PURPLE: Color = Color("#8f3f97");
    pub const NEUTRAL: Color = Color("#636e72");

    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// Channels as `(r, g, b)`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

/// Text plus the color it should be drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredValue {
    pub text: String,
    pub color: Color,
}

/// Icon for a weather description; case-insensitive exact match.
pub fn weather_icon(description: &str) -> &'static str {
    match description.to_lowercase().as_str() {
        "clear sky" => "☀️",
        "few clouds" => "⛅",
        "scattered clouds" | "broken clouds" | "overcast clouds" => "☁️",
        "shower rain" => "🌦️",
        "rain" | "light rain" | "moderate rain" => "🌧️",
        "heavy rain" | "thunderstorm" => "⛈️",
        "snow" => "❄️",
        "light snow" => "🌨️",
        "mist" | "fog" | "haze" => "🌫️",
        "smoke" | "dust" | "sand" => "💨",
        _ => FALLBACK_ICON,
    }
}

/// Icon for the snapshot's leading condition, or the fallback when there is none.
pub fn snapshot_icon(snapshot: &WeatherSnapshot) -> &'static str {
    snapshot
        .primary_condition()
        .map_or(FALLBACK_ICON, |c| weather_icon(&c.description))
}

/// Flag glyph for an ISO 3166 alpha-2 code.
pub fn country_flag(code: &str) -> &'static str {
    match code {
        "GB" => "🇬🇧",
        "US" => "🇺🇸",
        "JP" => "🇯🇵",
        "FR" => "🇫🇷",
        "IN" => "🇮🇳",
        "AU" => "🇦🇺",
        "DE" => "🇩🇪",
        "CA" => "🇨🇦",
        "IT" => "🇮🇹",
        "ES" => "🇪🇸",
        "BR" => "🇧🇷",
        "RU" => "🇷🇺",
        "CN" => "🇨🇳",
        "MX" => "🇲🇽",
        "NL" => "🇳🇱",
        "SE" => "🇸🇪",
        "CH" => "🇨🇭",
        "BE" => "🇧🇪",
        "AT" => "🇦🇹",
        "NO" => "🇳🇴",
        "DK" => "🇩🇰",
        "FI" => "🇫🇮",
        "PL" => "🇵🇱",
        "PT" => "🇵🇹",
        "GR" => "🇬🇷",
        "CZ" => "🇨🇿",
        "IE" => "🇮🇪",
        "NZ" => "🇳🇿",
        "SG" => "🇸🇬",
        "TH" => "🇹🇭",
        "AE" => "🇦🇪",
        "SA" => "🇸🇦",
        _ => FALLBACK_FLAG,
    }
}

/// UV exposure category. Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvBand {
    /// Half-open bands `[0,3) [3,6) [6,8) [8,11) [11,inf)`. Anything below 3,
    /// NaN included, is `Low`.
    pub fn of(uv: f64) -> Self {
        if uv >= 11.0 {
            UvBand::Extreme
        } else if uv >= 8.0 {
            UvBand::VeryHigh
        } else if uv >= 6.0 {
            UvBand::High
        } else if uv >= 3.0 {
            UvBand::Moderate
        } else {
            UvBand::Low
        }
    }

    pub fn color(self) -> Color {
        match self {
            UvBand::Low => Color::GREEN,
            UvBand::Moderate => Color::YELLOW,
            UvBand::High => Color::ORANGE,
            UvBand::VeryHigh => Color::RED,
            UvBand::Extreme => Color::VIOLET,
        }
    }
}

pub fn uv_color(uv: f64) -> Color {
    UvBand::of(uv).color()
}

/// Color for an AQI category; anything outside 1..=5 is neutral.
pub fn aqi_color(aqi: i32) -> Color {
    match aqi {
        1 => Color::GREEN,
        2 => Color::YELLOW,
        3 => Color::ORANGE,
        4 => Color::RED,
        5 => Color::PURPLE,
        _ => Color::NEUTRAL,
    }
}

/// UV index for display: one decimal, or `N/A` for the sentinel.
pub fn uv_display(uv: f64) -> ColoredValue {
    if uv >= 0.0 {
        ColoredValue { text: format!("{uv:.1}"), color: uv_color(uv) }
    } else {
        unavailable()
    }
}

/// AQI label for display, or `N/A` for the sentinel.
pub fn aqi_display(aqi: i32, label: &str) -> ColoredValue {
    if aqi >= 0 {
        ColoredValue { text: label.to_string(), color: aqi_color(aqi) }
    } else {
        unavailable()
    }
}

fn unavailable() -> ColoredValue {
    ColoredValue { text: UNAVAILABLE_TEXT.to_string(), color: Color::NEUTRAL }
}

/// Round to one decimal, half away from zero. Never returns negative zero.
pub fn round_temp(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// `14.3°C` or `57.7°F`.
pub fn format_temperature(reading: &TemperatureReading, units: Units) -> String {
    match units {
        Units::Metric => format!("{}°C", round_temp(reading.celsius)),
        Units::Imperial => format!("{}°F", round_temp(reading.fahrenheit)),
    }
}

/// Metric distance: kilometres with one decimal from 1000 m up, whole metres below.
pub fn format_distance(meters: u32) -> String {
    if meters >= 1000 {
        format!("{:.1} km", f64::from(meters) / 1000.0)
    } else {
        format!("{meters} m")
    }
}

pub fn format_distance_in(meters: u32, units: Units) -> String {
    match units {
        Units::Metric => format_distance(meters),
        Units::Imperial => {
            let meters = f64::from(meters);
            if meters >= METERS_PER_MILE {
                format!("{:.1} mi", meters / METERS_PER_MILE)
            } else {
                format!("{:.0} ft", meters * FEET_PER_METER)
            }
        }
    }
}

/// Wind speed in km/h or mph, one decimal.
pub fn format_wind_speed(wind: &Wind, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.1} km/h", wind.speed_kmh),
        Units::Imperial => format!("{:.1} mph", wind.speed_ms * MPH_PER_MS),
    }
}

pub fn format_coordinate(degrees: f64) -> String {
    format!("{degrees:.4}°")
}

/// Upper-case the first character, leave the rest alone.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
