//! Restaurant records returned by the two search services

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A sit-down restaurant within walking distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DineOutRestaurant {
    pub name: String,
    pub cuisines: Vec<String>,
    pub address: String,
    pub coordinates: Coordinates,
    pub url: String,
}

/// A restaurant that delivers to the lunch location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRestaurant {
    pub name: String,
    #[serde(default)]
    pub food_types: Vec<String>,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub url: String,
}

/// Anything with a position the distance filter can measure
pub trait Located {
    fn coordinates(&self) -> Coordinates;
}

impl Located for DineOutRestaurant {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl Located for Coordinates {
    fn coordinates(&self) -> Coordinates {
        *self
    }
}
