use crate::models::GeoPoint;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two locations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Known(f64),
    /// At least one side has no location
    Unknown,
}

impl Distance {
    /// Distance in kilometers, infinite when unknown
    #[inline]
    pub fn km(self) -> f64 {
        match self {
            Distance::Known(km) => km,
            Distance::Unknown => f64::INFINITY,
        }
    }

    pub fn known_km(self) -> Option<f64> {
        match self {
            Distance::Known(km) => Some(km),
            Distance::Unknown => None,
        }
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two optional locations
///
/// A missing location on either side gives `Distance::Unknown`.
#[inline]
pub fn distance_between(from: Option<GeoPoint>, to: Option<GeoPoint>) -> Distance {
    match (from, to) {
        (Some(a), Some(b)) => Distance::Known(haversine_distance(
            a.latitude,
            a.longitude,
            b.latitude,
            b.longitude,
        )),
        _ => Distance::Unknown,
    }
}
