//! Dine-out search client
//!
//! The search service pages its results. All pages are gathered in order,
//! then narrowed to walking distance because the service's own radius
//! filter is loose.

use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument, warn};

use crate::config::DineOutConfig;
use crate::geo::GeographicSearch;
use crate::http::{HttpGet, get_json};
use crate::models::{Coordinates, DineOutRestaurant};
use crate::{LunchError, Result};

/// One page of search results
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(deserialize_with = "number_or_string")]
    pub results_found: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub results_start: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub results_shown: f64,
    #[serde(default)]
    pub restaurants: Vec<RestaurantEntry>,
}

/// Results are wrapped as `{"restaurant": {...}}`
#[derive(Debug, Deserialize)]
pub struct RestaurantEntry {
    pub restaurant: SearchRestaurant,
}

#[derive(Debug, Deserialize)]
pub struct SearchRestaurant {
    pub name: String,
    /// Comma separated, e.g. "Pizza, Italian"
    #[serde(default)]
    pub cuisines: String,
    #[serde(default)]
    pub url: String,
    pub location: SearchLocation,
}

#[derive(Debug, Deserialize)]
pub struct SearchLocation {
    #[serde(default)]
    pub address: String,
    #[serde(deserialize_with = "number_or_string")]
    pub latitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub longitude: f64,
}

/// The service sends some numbers as JSON strings
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl From<RestaurantEntry> for DineOutRestaurant {
    fn from(entry: RestaurantEntry) -> Self {
        let raw = entry.restaurant;
        Self {
            name: raw.name,
            cuisines: raw
                .cuisines
                .split(',')
                .map(str::trim)
                .filter(|cuisine| !cuisine.is_empty())
                .map(String::from)
                .collect(),
            address: raw.location.address,
            coordinates: Coordinates::new(raw.location.latitude, raw.location.longitude),
            url: raw.url,
        }
    }
}

/// Outcome of feeding one page to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// Keep the page and request the next offset
    Continue(u64),
    /// Keep the page; everything advertised has been fetched
    Done,
    /// The page did not move the offset forward; drop it and stop
    Stalled,
}

/// Offset state for walking the search pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    /// `None` before the first request
    pub offset: Option<u64>,
    /// Items accepted so far
    pub fetched: usize,
    /// Total advertised by the last page
    pub total: u64,
}

impl PaginationCursor {
    /// Advance past `page`.
    ///
    /// The next offset is `results_start + results_shown`. After the first
    /// page, a next offset of zero or one that does not move past the current
    /// offset marks a broken page, which would otherwise loop forever.
    pub fn advance(&mut self, page: &SearchPage) -> PageStep {
        let start = to_count(page.results_start);
        let next = start.saturating_add(to_count(page.results_shown));
        let total = to_count(page.results_found);

        if let Some(current) = self.offset {
            if next == 0 || next <= current {
                return PageStep::Stalled;
            }
        }

        self.total = total;
        self.fetched += page.restaurants.len();

        if self.fetched as u64 >= total || next >= total || next == 0 {
            return PageStep::Done;
        }

        self.offset = Some(next);
        PageStep::Continue(next)
    }
}

fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

/// Client for the paged dine-out search
pub struct DineOutClient<'a> {
    http: &'a dyn HttpGet,
    base_url: &'a str,
    api_key: &'a str,
    max_pages: u32,
}

impl<'a> DineOutClient<'a> {
    #[must_use]
    pub fn new(http: &'a dyn HttpGet, config: &'a DineOutConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/'),
            api_key: config.api_key.as_deref().unwrap_or_default(),
            max_pages: config.max_pages.max(1),
        }
    }

    fn page_url(&self, offset: Option<u64>, center: &Coordinates, radius_m: f64) -> String {
        let start = offset.map(|offset| format!("start={offset}&")).unwrap_or_default();
        format!(
            "{}/search?{start}lat={}&lon={}&radius={radius_m}&open=now&cft=1",
            self.base_url, center.latitude, center.longitude
        )
    }

    async fn fetch_page(&self, offset: Option<u64>, center: &Coordinates, radius_m: f64) -> Result<SearchPage> {
        let url = self.page_url(offset, center, radius_m);
        debug!(?offset, "Requesting search page");
        get_json(self.http, &url, &[("user-key", self.api_key)]).await
    }

    /// Every open restaurant the service reports around `center`, in page order.
    /// Any failed page fails the whole search, and so does running out of pages
    /// before the advertised total is reached.
    #[instrument(skip(self), fields(lat = center.latitude, lon = center.longitude))]
    pub async fn fetch_all(&self, center: &Coordinates, radius_m: f64) -> Result<Vec<DineOutRestaurant>> {
        let mut cursor = PaginationCursor::default();
        let mut restaurants: Vec<DineOutRestaurant> = Vec::new();
        let mut pages = 0;

        loop {
            let page = self.fetch_page(cursor.offset, center, radius_m).await?;
            pages += 1;

            let step = cursor.advance(&page);
            if step == PageStep::Stalled {
                warn!(
                    results_start = page.results_start,
                    results_shown = page.results_shown,
                    "Search page did not advance, stopping"
                );
                break;
            }

            restaurants.extend(page.restaurants.into_iter().map(DineOutRestaurant::from));

            match step {
                PageStep::Continue(_) if pages >= self.max_pages => {
                    warn!(pages, fetched = cursor.fetched, total = cursor.total, "Reached page limit");
                    return Err(LunchError::parse(format!(
                        "Search did not finish within {} pages",
                        self.max_pages
                    )));
                }
                PageStep::Continue(_) => {}
                PageStep::Done | PageStep::Stalled => break,
            }
        }

        let total = usize::try_from(cursor.total).unwrap_or(usize::MAX);
        if restaurants.len() > total {
            restaurants.truncate(total);
        }

        info!(pages, found = restaurants.len(), "Fetched dine-out results");
        Ok(restaurants)
    }

    /// Restaurants within `radius_m` of `center`
    pub async fn nearby(&self, center: &Coordinates, radius_m: f64) -> Result<Vec<DineOutRestaurant>> {
        let all = self.fetch_all(center, radius_m).await?;
        let fetched = all.len();
        let nearby = GeographicSearch::within_radius(all, center, radius_m);
        debug!(fetched, nearby = nearby.len(), "Filtered by walking distance");

        if nearby.is_empty() {
            return Err(LunchError::no_candidates("Nothing open within walking distance"));
        }
        Ok(nearby)
    }
}
