//! Human-friendly terminal output for health and search state.

use std::fmt::Write as _;

use chrono::Local;
use cityweather_core::{
    HealthState, RequestState, Units, WeatherSnapshot,
    normalize::{
        ColoredValue, aqi_display, capitalize_first, country_flag, format_coordinate,
        format_distance_in, format_temperature, format_wind_speed, snapshot_icon, uv_display,
    },
};

/// Wrap text in a 24-bit ANSI foreground color.
pub fn paint(value: &ColoredValue) -> String {
    let (r, g, b) = value.color.rgb();
    format!("\x1b[1;38;2;{r};{g};{b}m{}\x1b[0m", value.text)
}

pub fn render_health(health: &HealthState) -> String {
    match health {
        HealthState::Unchecked => "Server status unknown".to_string(),
        HealthState::Online(h) => {
            let mut line = format!("● Server online • {} cached cities", h.cache_entries);
            if let Some(version) = &h.version {
                let _ = write!(line, " • v{version}");
            }
            if let Some(ts) = h.timestamp {
                let _ = write!(line, " • checked {}", ts.with_timezone(&Local).format("%H:%M:%S"));
            }
            line
        }
        HealthState::Unreachable(message) => format!("⚠️  {message}"),
    }
}

pub fn render_state(state: &RequestState, units: Units) -> String {
    match state {
        RequestState::Idle => "Search for a city to see its weather.".to_string(),
        RequestState::Loading { city, .. } => format!("⏳ Fetching weather data for {city}..."),
        RequestState::Success(snapshot) => render_snapshot(snapshot, units),
        RequestState::Error(message) => format!("❌ Error: {message}"),
    }
}

pub fn render_snapshot(w: &WeatherSnapshot, units: Units) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}  {} {}", w.name, country_flag(&w.country), w.country);
    if w.cache_hit {
        out.push_str("  💾 Cached");
    }
    out.push('\n');

    let condition = w.primary_condition();
    let _ = writeln!(
        out,
        "{}  {}  {}",
        snapshot_icon(w),
        condition.map_or("", |c| c.main.as_str()),
        condition.map(|c| capitalize_first(&c.description)).unwrap_or_default(),
    );

    if let Some(main) = &w.main {
        let _ = writeln!(
            out,
            "  Temperature  {} ({})",
            format_temperature(&main.temperature(), units),
            format_temperature(&main.temperature(), units.toggled()),
        );
        let _ = writeln!(out, "  Feels like   {}", format_temperature(&main.feels_like, units));
        let _ = writeln!(
            out,
            "  Range        ↓ {}  ↑ {}",
            format_temperature(&main.temp_min, units),
            format_temperature(&main.temp_max, units),
        );
        let _ = writeln!(out, "  Humidity     {}%", main.humidity);
        let _ = writeln!(out, "  Pressure     {} hPa", main.pressure);
    }

    if let Some(wind) = &w.wind {
        let _ = writeln!(
            out,
            "  Wind         {} m/s {} ({})",
            wind.speed_ms,
            wind.direction,
            format_wind_speed(wind, units),
        );
    }
    if let Some(clouds) = &w.clouds {
        let _ = writeln!(out, "  Cloudiness   {}%", clouds.all);
    }
    let _ = writeln!(out, "  Visibility   {}", format_distance_in(w.visibility_meters, units));
    let _ = writeln!(out, "  UV index     {}", paint(&uv_display(w.uv_index)));

    let _ = write!(out, "  Air quality  {}", paint(&aqi_display(w.aqi, &w.air_quality)));
    if let Some((aqi, _)) = w.air_quality_index() {
        let _ = write!(out, " (AQI {aqi})");
    }
    out.push('\n');

    let _ = writeln!(out, "  Sunrise      {}", w.sunrise_time);
    let _ = writeln!(out, "  Sunset       {}", w.sunset_time);
    let _ = writeln!(out, "  Local time   {}", w.local_time);
    if let Some(coords) = &w.coordinates {
        let _ = writeln!(
            out,
            "  Coordinates  {}, {}",
            format_coordinate(coords.latitude),
            format_coordinate(coords.longitude),
        );
    }
    let _ = write!(out, "  Updated      {}", w.last_updated);

    out
}

/// Units line shown in the interactive menu.
pub fn units_label(units: Units) -> String {
    format!("Switch to {} units", units.toggled())
}
