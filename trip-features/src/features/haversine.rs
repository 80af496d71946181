use geo::Point;
use uom::si::f64::Length;

use crate::features::feature_error::FeatureError;

/// mean earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// great circle distance between two points in decimal degrees
/// (x = longitude, y = latitude), in kilometers.
///
/// uses the `asin(sqrt(a))` form of the haversine formula, which stays
/// well-conditioned for both coincident and antipodal points.
pub fn haversine_km(src: Point<f64>, dst: Point<f64>) -> f64 {
    let lon1 = src.x().to_radians();
    let lat1 = src.y().to_radians();
    let lon2 = dst.x().to_radians();
    let lat2 = dst.y().to_radians();

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1.0 for antipodes
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// [haversine_km] as a typed length.
pub fn haversine(src: Point<f64>, dst: Point<f64>) -> Length {
    Length::new::<uom::si::length::kilometer>(haversine_km(src, dst))
}

/// row-wise haversine distance between two same-length collections of points.
///
/// # Arguments
///
/// * `src` - first point of each pair
/// * `dst` - second point of each pair
///
/// # Returns
///
/// one distance per pair, or an error if the inputs differ in length
pub fn haversine_pairwise(
    src: &[Point<f64>],
    dst: &[Point<f64>],
) -> Result<Vec<Length>, FeatureError> {
    if src.len() != dst.len() {
        return Err(FeatureError::LengthMismatch(src.len(), dst.len()));
    }
    Ok(src
        .iter()
        .zip(dst.iter())
        .map(|(s, d)| haversine(*s, *d))
        .collect())
}
