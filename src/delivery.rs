//! Delivery search client

use serde::Deserialize;
use tracing::{info, instrument};

use crate::config::DeliveryConfig;
use crate::http::{HttpGet, get_json};
use crate::models::{Coordinates, DeliveryRestaurant};
use crate::{LunchError, Result};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    restaurants: Vec<DeliveryRestaurant>,
}

/// Client for the delivery search service
pub struct DeliveryClient<'a> {
    http: &'a dyn HttpGet,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> DeliveryClient<'a> {
    #[must_use]
    pub fn new(http: &'a dyn HttpGet, config: &'a DeliveryConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/'),
            api_key: config.api_key.as_deref().unwrap_or_default(),
        }
    }

    fn search_url(&self, center: &Coordinates) -> String {
        format!(
            "{}/restaurant/search?latitude={}&longitude={}&method=delivery",
            self.base_url, center.latitude, center.longitude
        )
    }

    /// Restaurants that deliver to `center`; the service filters by delivery area itself
    #[instrument(skip(self), fields(lat = center.latitude, lon = center.longitude))]
    pub async fn search(&self, center: &Coordinates) -> Result<Vec<DeliveryRestaurant>> {
        let response: SearchResponse =
            get_json(self.http, &self.search_url(center), &[("X-Access-Token", self.api_key)]).await?;

        info!(found = response.restaurants.len(), "Fetched delivery results");
        if response.restaurants.is_empty() {
            return Err(LunchError::no_candidates("Nobody delivers here right now"));
        }
        Ok(response.restaurants)
    }
}
