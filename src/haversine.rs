//! Great-circle distance source (fallback when no measured distance exists).
//!
//! Straight-line estimate only; ignores roads, but available for any pair
//! of coordinate-bearing locations.

use crate::traits::{DistanceSource, Location};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (latitude, longitude) pairs in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp: floating-point noise can push the asin argument past 1.0
    // for near-antipodal pairs.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Coordinate-only distance source.
///
/// Resolves any pair where both ends carry coordinates; everything else
/// is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineSource;

impl DistanceSource for HaversineSource {
    fn distance(&self, a: &Location, b: &Location) -> Option<f64> {
        if a.name() == b.name() {
            return Some(0.0);
        }
        match (a.coords(), b.coords()) {
            (Some(from), Some(to)) => Some(haversine_km(from, to)),
            _ => None,
        }
    }
}
