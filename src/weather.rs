//! Weather gate
//!
//! Decides whether the weather is nice enough to walk to lunch or whether
//! delivery is the better call.

use tracing::{debug, info, instrument};

use crate::Result;
use crate::config::WeatherConfig;
use crate::http::{HttpGet, get_json};
use crate::models::weather::ForecastResponse;
use crate::models::{Coordinates, WeatherSnapshot};

/// Thresholds that separate walking weather from delivery weather
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherThresholds {
    pub min_apparent_temperature: f64,
    pub max_precip_chance: f64,
    pub max_precip_intensity: f64,
}

impl From<&WeatherConfig> for WeatherThresholds {
    fn from(config: &WeatherConfig) -> Self {
        Self {
            min_apparent_temperature: config.min_apparent_temperature,
            max_precip_chance: config.max_precip_chance,
            max_precip_intensity: config.max_precip_intensity,
        }
    }
}

/// Outcome of the weather check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherVerdict {
    /// Go out
    Good,
    /// Get delivery
    Bad,
}

/// Too cold, or both likely and heavy precipitation, makes the weather bad.
/// Light drizzle or an unlikely downpour alone does not.
#[must_use]
pub fn is_good(snapshot: &WeatherSnapshot, thresholds: &WeatherThresholds) -> bool {
    let too_cold = snapshot.apparent_temperature < thresholds.min_apparent_temperature;
    let wet = snapshot.precip_probability > thresholds.max_precip_chance
        && snapshot.precip_intensity > thresholds.max_precip_intensity;
    !(too_cold || wet)
}

/// Client for the forecast service's current conditions
pub struct WeatherClient<'a> {
    http: &'a dyn HttpGet,
    base_url: &'a str,
    api_key: &'a str,
    units: &'a str,
}

impl<'a> WeatherClient<'a> {
    #[must_use]
    pub fn new(http: &'a dyn HttpGet, config: &'a WeatherConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/'),
            api_key: config.api_key.as_deref().unwrap_or_default(),
            units: &config.units,
        }
    }

    fn current_url(&self, center: &Coordinates) -> String {
        format!(
            "{}/forecast/{}/{}?units={}&exclude=minutely,hourly,daily,alerts,flags",
            self.base_url,
            urlencoding::encode(self.api_key),
            center.to_path_segment(),
            urlencoding::encode(self.units)
        )
    }

    /// Current conditions at `center`
    #[instrument(skip(self), fields(lat = center.latitude, lon = center.longitude))]
    pub async fn current(&self, center: &Coordinates) -> Result<WeatherSnapshot> {
        let response: ForecastResponse = get_json(self.http, &self.current_url(center), &[]).await?;
        debug!(snapshot = ?response.currently, "Received current conditions");
        Ok(response.currently)
    }
}

/// Fetches the current conditions and applies the thresholds
pub struct WeatherGate<'a> {
    client: WeatherClient<'a>,
    thresholds: WeatherThresholds,
}

impl<'a> WeatherGate<'a> {
    #[must_use]
    pub fn new(http: &'a dyn HttpGet, config: &'a WeatherConfig) -> Self {
        Self {
            client: WeatherClient::new(http, config),
            thresholds: WeatherThresholds::from(config),
        }
    }

    /// A failed lookup is an error, never an implicit "good"
    pub async fn check(&self, center: &Coordinates) -> Result<WeatherVerdict> {
        let snapshot = self.client.current(center).await?;
        let verdict = if is_good(&snapshot, &self.thresholds) {
            WeatherVerdict::Good
        } else {
            WeatherVerdict::Bad
        };

        info!(
            apparent_temperature = snapshot.apparent_temperature,
            precip_probability = snapshot.precip_probability,
            precip_intensity = snapshot.precip_intensity,
            ?verdict,
            "Weather checked"
        );
        Ok(verdict)
    }
}
