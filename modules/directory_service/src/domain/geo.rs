//! Great-circle distance and radius filtering

use crate::contract::{Building, GeoPoint};
use rust_decimal::Decimal;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given in degrees
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let d_phi = (to.latitude - from.latitude).to_radians();
    let d_lambda = (to.longitude - from.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Building coordinates as a floating point location
pub fn building_location(building: &Building) -> Option<GeoPoint> {
    Some(GeoPoint::new(
        decimal_to_f64(building.latitude)?,
        decimal_to_f64(building.longitude)?,
    ))
}

// Goes through the decimal text so the result is the nearest f64, the same
// value a caller gets by parsing the coordinate from a query string.
fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value.to_string().parse().ok()
}

/// Whether `building` lies within `radius_m` meters of `center`
pub fn within_radius(center: GeoPoint, building: &Building, radius_m: f64) -> bool {
    building_location(building)
        .is_some_and(|location| haversine_distance(center, location) <= radius_m)
}
