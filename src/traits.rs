//! Core domain types and the distance source seam.
//!
//! These are intentionally minimal. Concrete sources (direct table,
//! great-circle estimator, composites) live in their own modules and
//! implement [`DistanceSource`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named stop in a planning request.
///
/// Names are the unique key within a session; coordinates are optional
/// reference data (a table-covered location needs none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    coords: Option<(f64, f64)>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("latitude {0} out of range [-90, 90]")]
    BadLatitude(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    BadLongitude(f64),
}

impl Location {
    /// A location without coordinates; usable only with table-backed sources.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coords: None,
        }
    }

    /// A location with a (latitude, longitude) pair in degrees.
    ///
    /// Malformed coordinates are a contract violation and fail immediately.
    pub fn with_coords(
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Self, LocationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::BadLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::BadLongitude(lon));
        }
        Ok(Self {
            name: name.into(),
            coords: Some((lat, lon)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// (latitude, longitude) in degrees, if known.
    pub fn coords(&self) -> Option<(f64, f64)> {
        self.coords
    }
}

/// Supplies a symmetric, non-negative distance between two locations in
/// kilometers, or `None` when the pair is unresolvable under this source.
///
/// Implementations must return `Some(0.0)` for a location paired with
/// itself and must be symmetric in their arguments.
pub trait DistanceSource {
    fn distance(&self, a: &Location, b: &Location) -> Option<f64>;
}
