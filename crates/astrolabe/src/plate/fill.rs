use log::debug;

use crate::error::AstrolabeError;
use crate::geometry::intersect;
use crate::geometry::{Circle, Point};
use crate::projection;
use crate::types::{Collection, Drawing, Shade, Stroke};

/// Degrees between outline samples of a filled region.
const OUTLINE_STEP: f64 = 2.0;

/// Shade the plate: night across the whole tropic, day above the horizon.
pub fn day_night(
    work: &mut Collection,
    latitude: f64,
    r_equator: f64,
    capricorn: &Circle,
) -> Result<(), AstrolabeError> {
    let projected = projection::almucantar(0.0, r_equator, latitude)?;
    let horizon = Circle::on_axis(projected.offset, projected.radius.abs())?;

    let Some([chord, _]) = intersect::on_axis(capricorn, &horizon) else {
        // No crossing: both regions are plain circles.
        debug!("day/night: horizon does not cross the tropic");
        work.add(Drawing::circle(capricorn, Stroke::Thin).with_fill(Shade::Night));
        work.add(Drawing::circle(&horizon, Stroke::Thin).with_fill(Shade::Day));
        return Ok(());
    };

    // The day side of the chord is the side holding the horizon centre.
    let chord_x = chord[0];
    let side = horizon.center[0].signum();
    let day_side = |p: &Point| (p[0] - chord_x) * side > 0.0;

    let tropic_ring = capricorn.outline(OUTLINE_STEP);
    let tropic_day: Vec<Point> = tropic_ring.iter().copied().filter(|p| day_side(p)).collect();
    let horizon_day: Vec<Point> = horizon
        .outline(OUTLINE_STEP)
        .into_iter()
        .filter(|p| !day_side(p))
        .collect();
    debug!(
        "day/night: chord at x={chord_x:.3}, {} + {} day vertices",
        tropic_day.len(),
        horizon_day.len()
    );

    for (points, shade) in [
        (tropic_ring, Shade::Night),
        (tropic_day, Shade::Day),
        (horizon_day, Shade::Day),
    ] {
        if points.len() >= 3 {
            work.add(Drawing::Polygon {
                points,
                stroke: Stroke::Thin,
                fill: Some(shade),
            });
        }
    }
    Ok(())
}
