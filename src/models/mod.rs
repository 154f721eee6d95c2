//! Data models for the lunch bot
//!
//! - Location: geographic coordinates
//! - Weather: current conditions at the lunch location
//! - Restaurant: search results from the dine-out and delivery services

pub mod location;
pub mod restaurant;
pub mod weather;

pub use location::Coordinates;
pub use restaurant::{DeliveryRestaurant, DineOutRestaurant, Located};
pub use weather::WeatherSnapshot;
