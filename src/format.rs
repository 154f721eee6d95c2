//! Reply text for a suggestion

use std::fmt::Display;

use crate::models::{DeliveryRestaurant, DineOutRestaurant};

/// Sent instead of a suggestion when anything along the way fails
pub const ERROR_MESSAGE: &str = "The internet is broken. Lunch is canceled.";

/// A restaurant picked for lunch, tagged with the branch that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// Weather is fine, walk there
    DineOut(DineOutRestaurant),
    /// Weather is bad, order in
    Delivery(DeliveryRestaurant),
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suggestion::DineOut(restaurant) => {
                writeln!(f)?;
                writeln!(f, "The weather looks fine, you should go out:")?;
                writeln!(f)?;
                writeln!(f, "{}", restaurant.name)?;
                writeln!(f, "Cuisines: {}", restaurant.cuisines.join(", "))?;
                writeln!(f, "{}", restaurant.address)?;
                writeln!(f, "{}", restaurant.url)
            }
            Suggestion::Delivery(restaurant) => {
                writeln!(f)?;
                writeln!(f, "Weather doesn't look great. Don't be a hero. Get delivery:")?;
                writeln!(f)?;
                writeln!(f, "{}", restaurant.name)?;
                writeln!(f, "Cuisines: {}", restaurant.food_types.join(", "))?;
                writeln!(f, "{}", restaurant.street_address)?;
                writeln!(f, "{}", restaurant.url)
            }
        }
    }
}
