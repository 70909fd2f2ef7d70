use log::debug;

use crate::error::AstrolabeError;
use crate::geometry::intersect;
use crate::geometry::Circle;
use crate::projection::radius_declination;
use crate::types::{Drawing, Stroke};

/// Meridian construction shared by every azimuth line of one latitude.
///
/// All constant-azimuth circles pass through the zenith and the nadir, so
/// their centres lie on the perpendicular bisector of that pair.
#[derive(Debug, Clone, Copy)]
pub struct AzimuthFrame {
    pub horizon: Circle,
    pub zenith: f64,
    pub nadir: f64,
}

impl AzimuthFrame {
    pub fn new(r_equator: f64, latitude: f64) -> Result<Self, AstrolabeError> {
        if latitude.to_radians().sin().abs() < 1e-9 {
            return Err(AstrolabeError::degenerate(
                "the horizon projects to a straight line at the equator",
            ));
        }

        let zenith = radius_declination(r_equator, latitude);
        let nadir = -radius_declination(r_equator, -latitude);

        // The horizon meets the meridian at declination ±(90 - latitude).
        let south = radius_declination(r_equator, latitude - 90.0);
        let north = -radius_declination(r_equator, 90.0 - latitude);
        let horizon = Circle::on_axis((south + north) / 2.0, (south - north).abs() / 2.0)?;

        Ok(Self {
            horizon,
            zenith,
            nadir,
        })
    }

    /// Meridian coordinate shared by every azimuth circle centre.
    pub fn center_x(&self) -> f64 {
        (self.zenith + self.nadir) / 2.0
    }

    pub fn half_span(&self) -> f64 {
        (self.zenith - self.nadir) / 2.0
    }

    /// Circle of constant azimuth `azimuth`, in [0, 90) degrees from the
    /// prime vertical.
    pub fn azimuth_circle(&self, azimuth: f64) -> Result<Circle, AstrolabeError> {
        if !(0.0..90.0).contains(&azimuth) {
            return Err(AstrolabeError::degenerate(format!(
                "azimuth {azimuth}° is outside [0, 90)"
            )));
        }
        let phi = azimuth.to_radians();
        let span = self.half_span();
        Circle::new([self.center_x(), span * phi.tan()], (span / phi.cos()).abs())
    }
}

/// Draw the azimuth line `azimuth` and its mirror across the meridian.
///
/// The arc runs clockwise from the second horizon crossing to the first,
/// cut short at the outer tropic when that comes first. Returns `Ok(None)`
/// when the circle never reaches the tropic; a circle that misses the
/// horizon is a hard error.
pub fn draw_azimuth(
    frame: &AzimuthFrame,
    boundary: &Circle,
    azimuth: f64,
    stroke: Stroke,
) -> Result<Option<[Drawing; 2]>, AstrolabeError> {
    let circle = frame.azimuth_circle(azimuth)?;

    let [h1, h2] = intersect::circles(&frame.horizon, &circle)
        .ok_or(AstrolabeError::MissingIntersection { azimuth })?;
    let end = circle.angle_of(h1);
    let mut start = circle.angle_of(h2);

    let Some([_, t2]) = intersect::circles(boundary, &circle) else {
        debug!("azimuth {azimuth}°: misses the tropic, skipped");
        return Ok(None);
    };
    let tropic = circle.angle_of(t2);
    if tropic > start {
        start = tropic;
    }

    debug!("azimuth {azimuth}°: arc {start:.3}° → {end:.3}°");
    let arc = Drawing::arc(&circle, start, end, stroke);
    let mut mirrored = arc.clone();
    mirrored.reflect_h();
    Ok(Some([arc, mirrored]))
}
