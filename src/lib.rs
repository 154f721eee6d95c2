//! `Lunchbot` - answers "where should we go for lunch?" in chat
//!
//! Checks the weather at the office, then suggests either a restaurant within
//! walking distance or one that delivers.

pub mod chat;
pub mod config;
pub mod delivery;
pub mod dine_out;
pub mod error;
pub mod format;
pub mod geo;
pub mod handler;
pub mod http;
pub mod models;
pub mod selector;
pub mod telemetry;
pub mod trigger;
pub mod weather;

// Re-export core types for public API
pub use chat::{ConsoleChat, IncomingMessage};
pub use config::LunchConfig;
pub use error::LunchError;
pub use format::{ERROR_MESSAGE, Suggestion};
pub use handler::{HandlerState, LunchHandler, Reply};
pub use http::{HttpGet, HttpResponse, ReqwestClient};
pub use models::{Coordinates, DeliveryRestaurant, DineOutRestaurant, WeatherSnapshot};
pub use selector::SelectionMode;
pub use weather::{WeatherThresholds, WeatherVerdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
