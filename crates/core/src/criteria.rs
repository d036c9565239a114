use rand::Rng;
use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.344;
pub const DEFAULT_RADIUS_MILES: f64 = 5.5;
pub const FOOD_SUFFIX: &str = " food";
pub const FALLBACK_CUISINES: [&str; 3] = ["American", "Italian", "Asian"];

pub fn miles_to_meters(miles: f64) -> f64 {
    METERS_PER_MILE * miles
}

/// Free-text radius to miles. Anything that is not a finite float becomes the default; sign
/// and range are not checked.
pub fn parse_radius_miles(input: &str) -> f64 {
    input
        .parse::<f64>()
        .ok()
        .filter(|miles| miles.is_finite())
        .unwrap_or(DEFAULT_RADIUS_MILES)
}

/// Immutable search parameters captured from user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCriteria {
    pub food_type: String,
    pub radius_miles: f64,
}

impl SearchCriteria {
    pub fn new(food_type: impl Into<String>, radius_miles: f64) -> Self {
        Self {
            food_type: food_type.into(),
            radius_miles,
        }
    }

    pub fn from_input(food_type: &str, radius: &str) -> Self {
        Self::new(food_type, parse_radius_miles(radius))
    }

    pub fn radius_meters(&self) -> f64 {
        miles_to_meters(self.radius_miles)
    }

    pub fn has_explicit_food_type(&self) -> bool {
        !self.food_type.is_empty()
    }

    /// Query text for one search. Without an explicit food type a fallback cuisine is drawn
    /// on every call.
    pub fn food_query<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if self.has_explicit_food_type() {
            format!("{}{FOOD_SUFFIX}", self.food_type)
        } else {
            let cuisine = FALLBACK_CUISINES[rng.random_range(0..FALLBACK_CUISINES.len())];
            format!("{cuisine}{FOOD_SUFFIX}")
        }
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_RADIUS_MILES)
    }
}
