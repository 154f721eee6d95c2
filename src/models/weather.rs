//! Current weather conditions as reported by the weather service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the current conditions at the lunch location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// "Feels like" temperature, in the units requested from the service
    pub apparent_temperature: f64,
    /// Chance of precipitation (0.0-1.0)
    #[serde(default)]
    pub precip_probability: f64,
    /// Precipitation intensity
    #[serde(default)]
    pub precip_intensity: f64,
    /// When the observation was taken
    #[serde(
        default,
        rename = "time",
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new(apparent_temperature: f64, precip_probability: f64, precip_intensity: f64) -> Self {
        Self {
            apparent_temperature,
            precip_probability,
            precip_intensity,
            observed_at: None,
        }
    }
}

/// Envelope of the weather service response; only `currently` is used
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub currently: WeatherSnapshot,
}
