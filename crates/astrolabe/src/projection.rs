//! Stereographic projection radii, after "The Astrolabe" by James E Morrison.
//!
//! Every radius is measured on the plate, with the south celestial pole as
//! the projection point. All angles are in degrees.

use crate::error::AstrolabeError;

/// Obliquity of the ecliptic, degrees.
pub const AXIAL_TILT: f64 = 23.4393;

/// Below this the almucantar denominator is treated as zero.
const DENOMINATOR_EPSILON: f64 = 1e-9;

fn tan_half_colatitude(dec: f64) -> f64 {
    ((90.0 - dec) / 2.0).to_radians().tan()
}

/// Radius of the equator, given the radius of the Tropic of Capricorn.
pub fn radius_equator(r_capricorn: f64) -> f64 {
    r_capricorn * tan_half_colatitude(AXIAL_TILT)
}

/// Radius of the Tropic of Cancer, given the radius of the equator.
pub fn radius_cancer(r_equator: f64) -> f64 {
    r_equator * tan_half_colatitude(AXIAL_TILT)
}

/// Radius of the circle of declination `dec`.
///
/// Unbounded as `dec` approaches -90 and zero at +90.
pub fn radius_declination(r_equator: f64, dec: f64) -> f64 {
    r_equator * tan_half_colatitude(dec)
}

/// Projected circle of constant altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Almucantar {
    /// Signed radius; negative when the circle encloses the projection point.
    pub radius: f64,
    /// Distance of the centre from the plate centre along the meridian.
    pub offset: f64,
}

/// Project the almucantar of `altitude` for an observer at `latitude`.
///
/// When `sin(latitude) + sin(altitude)` vanishes the almucantar passes
/// through the projection point and projects to a straight line, which is
/// reported as degenerate geometry.
pub fn almucantar(
    altitude: f64,
    r_equator: f64,
    latitude: f64,
) -> Result<Almucantar, AstrolabeError> {
    let (sin_alt, cos_alt) = altitude.to_radians().sin_cos();
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();

    let denominator = sin_lat + sin_alt;
    if denominator.abs() < DENOMINATOR_EPSILON {
        return Err(AstrolabeError::degenerate(format!(
            "almucantar {altitude}° at latitude {latitude}° projects to a straight line"
        )));
    }

    Ok(Almucantar {
        radius: r_equator * cos_alt / denominator,
        offset: r_equator * cos_lat / denominator,
    })
}
