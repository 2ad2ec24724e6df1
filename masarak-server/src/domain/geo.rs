//! Geographic primitives: coordinates, great-circle distance, and the
//! Arabic display formatting the mobile client renders verbatim.

use std::fmt;

/// Error returned for out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// Earth radius used by the spherical-Earth Haversine approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 latitude/longitude pair, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be in [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be in [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Great-circle distance to another coordinate, in meters.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        haversine_distance_m(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between two coordinates, in meters.
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

/// Format a distance for display: meters below 1 km, else kilometers to
/// one decimal place, with Arabic unit suffixes.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}م", meters.round() as i64)
    } else {
        format!("{:.1}كم", meters / 1000.0)
    }
}

/// Format a duration in minutes for display, in Arabic.
pub fn format_duration(mins: i64) -> String {
    if mins < 60 {
        format!("{mins} دقيقة")
    } else {
        format!("{} ساعة {} دقيقة", mins / 60, mins % 60)
    }
}
