//! Great-circle distance on a spherical Earth.
//!
//! The same function backs the `great_circle_km` SQL function registered on
//! every pooled SQLite connection and the in-memory test repository, so a
//! radius filter includes exactly the same rows in both.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Latitude, Longitude, TypeConstraintError};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated point on the globe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: Latitude,
    pub lon: Longitude,
}

impl Coordinates {
    /// Validates raw decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            lat: Latitude::new(lat)?,
            lon: Longitude::new(lon)?,
        })
    }

    /// Distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        great_circle_distance_km(self.lat.get(), self.lon.get(), other.lat.get(), other.lon.get())
    }
}

/// Spherical law of cosines.
///
/// The cosine term is clamped to `[-1, 1]` before `acos`: rounding can push it
/// just past 1 for identical points or past -1 for antipodal ones, which would
/// otherwise yield `NaN` and silently drop the row from any `<=` filter.
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let cos_angle = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}
