//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as "lat, lon" with four decimals
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A geocoded place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name as returned by the geocoder
    pub name: String,
    /// Country name
    pub country: Option<String>,
    /// First-level administrative area (state, region)
    pub admin1: Option<String>,
    pub coordinates: Coordinates,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            country: None,
            admin1: None,
            coordinates,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(
        name: impl Into<String>,
        country: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            country: Some(country.into()),
            ..Self::new(name, coordinates)
        }
    }

    /// "Name, Region, Country" with the missing parts left out
    #[must_use]
    pub fn display_name(&self) -> String {
        [
            Some(self.name.as_str()),
            self.admin1.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}
