//! The rete: the rotating star map laid over the plate.
//!
//! Drawn at the plate's scale, so the outer ring sits on the Tropic of
//! Capricorn and the ecliptic touches both tropics. Outlines are emitted as
//! cut lines. Overlapping parts are not merged; that is left to the cutter.

use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::config::Config;
use crate::error::AstrolabeError;
use crate::geometry::{plate_angle, polar_point, Circle, Point};
use crate::labels::ZODIAC;
use crate::projection::{radius_cancer, radius_declination, radius_equator};
use crate::ticks::ticks;
use crate::types::{Collection, Drawing, Stroke};

const OUTER_RING_WIDTH: f64 = 8.0;
const ECLIPTIC_WIDTH: f64 = 10.0;
/// Depth of the bevel on the outer edge of the ecliptic.
const CHAMFER: f64 = 3.0;
/// Material left around the central hole.
const CENTRE_SURROUND: f64 = 4.0;
/// Bearing of the struts joining the outer ring to the ecliptic.
const OUTER_CUT_ANGLE: f64 = 26.0;
/// Stars fainter than this are left off.
pub const MAX_STAR_MAGNITUDE: f64 = 2.0;
/// Default pointer length as a fraction of the equator radius.
const POINTER_LENGTH: f64 = 0.2;

/// A star to mount on the rete. Coordinates are in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Star {
    pub name: String,
    pub right_ascension: f64,
    pub declination: f64,
    pub magnitude: f64,
}

impl Star {
    /// Load a list of stars from a JSON array.
    pub fn load_all(path: &Path) -> Result<Vec<Star>, AstrolabeError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

struct Scale {
    capricorn: f64,
    equator: f64,
    cancer: f64,
}

impl Scale {
    fn new(size: f64) -> Self {
        let equator = radius_equator(size);
        Self {
            capricorn: size,
            equator,
            cancer: radius_cancer(equator),
        }
    }

    /// The ecliptic spans from the far side of Cancer to Capricorn.
    fn ecliptic(&self) -> Result<Circle, AstrolabeError> {
        Circle::on_axis(
            (self.capricorn - self.cancer) / 2.0,
            (self.capricorn + self.cancer) / 2.0,
        )
    }
}

/// Closed outline of a bar of width `w` from the origin along `bearing`.
fn bar(length: f64, w: f64, bearing: f64) -> Drawing {
    let points = [
        [-w / 2.0, 0.0],
        [-w / 2.0, length],
        [w / 2.0, length],
        [w / 2.0, 0.0],
    ];
    let mut bar = Drawing::polyline(points.to_vec(), Stroke::Cut);
    bar.rotate(bearing);
    bar
}

fn outer_ring(scale: &Scale) -> Result<Collection, AstrolabeError> {
    let mut work = Collection::named("ring");
    let radius = scale.capricorn;
    let inner = radius - OUTER_RING_WIDTH;
    // The ring opens across the +x side, between the strut bearings.
    let start = 180.0 - OUTER_CUT_ANGLE;
    let end = OUTER_CUT_ANGLE;

    for r in [radius, inner] {
        work.add(Drawing::arc(&Circle::on_axis(0.0, r)?, start, end, Stroke::Cut));
    }
    for bearing in [start, end] {
        work.add(Drawing::polyline(
            vec![
                polar_point([0.0, 0.0], inner, bearing),
                polar_point([0.0, 0.0], radius, bearing),
            ],
            Stroke::Cut,
        ));
        work.add(bar(radius, OUTER_RING_WIDTH, bearing));
    }

    // Spine joining the ring, the centre and the ecliptic.
    let half = radius - 0.5;
    work.add(Drawing::polyline(
        vec![
            [-OUTER_RING_WIDTH, -half],
            [-OUTER_RING_WIDTH, half],
            [0.0, half],
            [0.0, -half],
        ],
        Stroke::Cut,
    ));
    Ok(work)
}

/// Where the ray from the rete centre along `bearing` meets the circle of
/// radius `radius` about `(x, 0)`.
fn ray_exit(x: f64, radius: f64, bearing: f64) -> Result<Point, AstrolabeError> {
    let (sin, cos) = bearing.to_radians().sin_cos();
    let disc = radius * radius - x * x * cos * cos;
    if radius <= x.abs() || disc < 0.0 {
        return Err(AstrolabeError::degenerate(format!(
            "ray at {bearing}° does not leave the circle r={radius} at x={x}"
        )));
    }
    let t = x * sin + disc.sqrt();
    Ok(polar_point([0.0, 0.0], t, bearing))
}

fn ecliptic(scale: &Scale) -> Result<Collection, AstrolabeError> {
    let mut work = Collection::named("ecliptic");
    let ring = scale.ecliptic()?;
    let x = ring.center[0];
    let r = ring.radius;

    work.add(Drawing::circle(&ring, Stroke::Cut));
    work.add(Drawing::circle(
        &Circle::new(ring.center, r - ECLIPTIC_WIDTH)?,
        Stroke::Cut,
    ));
    work.add(Drawing::circle(
        &Circle::new(ring.center, r - CHAMFER)?,
        Stroke::Thin,
    ));

    // Sign boundaries across the band, degrees on the chamfer.
    ticks(&mut work, ring.center, r - ECLIPTIC_WIDTH, r, 0.0, 360.0, 30.0, Stroke::Thin)?;
    ticks(&mut work, ring.center, r - CHAMFER, r, 0.0, 360.0, 5.0, Stroke::Thin)?;

    let rr = r - ECLIPTIC_WIDTH + 0.5;
    for (idx, sign) in ZODIAC.iter().enumerate() {
        let bearing = -20.0 - idx as f64 * 30.0;
        let pos = ray_exit(x, rr, bearing)?;
        let angle = plate_angle(ring.center, pos) + 5.0;
        work.add(Drawing::text(pos, *sign, ECLIPTIC_WIDTH / 2.0, Stroke::Thick).with_angle(angle));
    }
    Ok(work)
}

fn pointer(star: &Star, scale: &Scale, size: f64) -> Option<Collection> {
    if star.magnitude > MAX_STAR_MAGNITUDE {
        debug!("rete: {} too faint ({})", star.name, star.magnitude);
        return None;
    }
    let r = radius_declination(scale.equator, star.declination);
    if r > scale.capricorn {
        debug!("rete: {} lies beyond the tropic", star.name);
        return None;
    }

    let bearing = -star.right_ascension;
    let pos = polar_point([0.0, 0.0], r, bearing);
    let w = scale.equator / 6.0;
    let d = scale.equator * POINTER_LENGTH;

    let mut work = Collection::named(star.name.clone());
    let mut mount = Drawing::polyline(
        vec![
            [0.0, 0.0],
            [w, w / 2.0],
            [d, w / 2.0],
            [d, -w / 2.0],
            [w, -w / 2.0],
        ],
        Stroke::Cut,
    );
    mount.rotate(bearing - 90.0).translate(pos[0], pos[1]);
    work.add(mount);

    // Along the pointer, dropped half a line to sit on its centre.
    let height = size / 40.0;
    let tip = polar_point(pos, w, bearing);
    let anchor = polar_point(tip, height / 2.0, bearing + 90.0);
    work.add(
        Drawing::text(anchor, star.name.clone(), height, Stroke::Thick).with_angle(bearing - 90.0),
    );
    Some(work)
}

/// Compose the rete, mounting whichever of `stars` are bright enough and
/// fall inside the tropic.
pub fn rete(config: &Config, stars: &[Star]) -> Result<Collection, AstrolabeError> {
    let scale = Scale::new(config.size);
    let mut work = Collection::named("rete");

    work.add_group(outer_ring(&scale)?);
    work.add_group(ecliptic(&scale)?);

    let mut mounted = Collection::named("stars");
    for star in stars {
        if let Some(group) = pointer(star, &scale, config.size) {
            mounted.add_group(group);
        }
    }
    info!("rete: {} of {} stars mounted", mounted.len(), stars.len());
    work.add_group(mounted);

    let hole = config.hole_radius.unwrap_or(0.0);
    work.add(Drawing::circle(
        &Circle::on_axis(0.0, hole + CENTRE_SURROUND)?,
        Stroke::Cut,
    ));
    if hole > 0.0 {
        work.add(Drawing::circle(&Circle::on_axis(0.0, hole)?, Stroke::Cut));
    }
    Ok(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{arc_sweep, distance, sweep_contains};
    use approx::assert_abs_diff_eq;

    fn star(name: &str, ra: f64, dec: f64, magnitude: f64) -> Star {
        Star {
            name: name.into(),
            right_ascension: ra,
            declination: dec,
            magnitude,
        }
    }

    #[test]
    fn test_ecliptic_touches_both_tropics() {
        let scale = Scale::new(155.0);
        let ring = scale.ecliptic().unwrap();
        let east = ring.point_at(90.0);
        let west = ring.point_at(270.0);
        assert_abs_diff_eq!(east[0], 155.0, epsilon = 1e-9);
        assert_abs_diff_eq!(west[0], -66.7806802153582, epsilon = 1e-9);
    }

    #[test]
    fn test_outer_ring_opens_on_positive_x() {
        let work = rete(&Config::default(), &[]).unwrap();
        let ring = work.group("ring").unwrap();
        match &ring.items[0] {
            Drawing::Arc {
                startangle,
                endangle,
                radius,
                ..
            } => {
                assert_eq!(*radius, 155.0);
                assert_abs_diff_eq!(arc_sweep(*startangle, *endangle), 232.0, epsilon = 1e-9);
                assert!(!sweep_contains(*startangle, *endangle, 90.0));
                assert!(sweep_contains(*startangle, *endangle, 270.0));
            }
            other => panic!("expected Arc, got: {other:?}"),
        }
    }

    #[test]
    fn test_struts_follow_cut_angle() {
        let work = rete(&Config::default(), &[]).unwrap();
        let ring = work.group("ring").unwrap();
        let bars: Vec<&Drawing> = ring
            .items
            .iter()
            .filter(|d| matches!(d, Drawing::Polygon { points, .. } if points.len() == 4))
            .collect();
        // Two struts and the spine.
        assert_eq!(bars.len(), 3);
        if let Drawing::Polygon { points, .. } = bars[1] {
            let far = [
                (points[1][0] + points[2][0]) / 2.0,
                (points[1][1] + points[2][1]) / 2.0,
            ];
            assert_abs_diff_eq!(plate_angle([0.0, 0.0], far), 26.0, epsilon = 1e-9);
            assert_abs_diff_eq!(distance([0.0, 0.0], far), 155.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zodiac_labels_sit_inside_the_band() {
        let scale = Scale::new(155.0);
        let ring = scale.ecliptic().unwrap();
        let work = ecliptic(&scale).unwrap();
        let labels: Vec<(&str, Point)> = work
            .items
            .iter()
            .filter_map(|d| match d {
                Drawing::Text { text, pos, .. } => Some((text.as_str(), *pos)),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].0, "Aries");
        for (idx, (_, pos)) in labels.iter().enumerate() {
            let rr = ring.radius - ECLIPTIC_WIDTH + 0.5;
            assert_abs_diff_eq!(distance(ring.center, *pos), rr, epsilon = 1e-9);
            let bearing = -20.0 - idx as f64 * 30.0;
            let seen = plate_angle([0.0, 0.0], *pos);
            let gap = arc_sweep(bearing, seen).min(arc_sweep(seen, bearing));
            assert_abs_diff_eq!(gap, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ecliptic_tick_counts() {
        let work = ecliptic(&Scale::new(155.0)).unwrap();
        let ticks = work
            .items
            .iter()
            .filter(|d| matches!(d, Drawing::Polygon { .. }))
            .count();
        assert_eq!(ticks, 12 + 72);
    }

    #[test]
    fn test_ray_exit_rejects_outside_origin() {
        assert!(ray_exit(10.0, 5.0, 0.0).is_err());
        let p = ray_exit(0.0, 5.0, 30.0).unwrap();
        assert_abs_diff_eq!(distance([0.0, 0.0], p), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_star_filtering() {
        let stars = [
            star("Vega", 279.2, 38.8, 0.0),
            star("Faint", 10.0, 30.0, 3.5),
            star("Canopus", 96.0, -52.7, -0.7),
        ];
        let work = rete(&Config::default(), &stars).unwrap();
        let mounted = work.group("stars").unwrap();
        assert_eq!(mounted.len(), 1);
        assert!(work.group("Vega").is_some());
    }

    #[test]
    fn test_pointer_runs_outward_from_star() {
        let scale = Scale::new(155.0);
        let group = pointer(&star("Capella", 0.0, 46.0, 0.1), &scale, 155.0).unwrap();
        let r = radius_declination(scale.equator, 46.0);
        match &group.items[0] {
            Drawing::Polygon { points, .. } => {
                assert_abs_diff_eq!(points[0][0], 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(points[0][1], r, epsilon = 1e-9);
                let d = scale.equator * POINTER_LENGTH;
                let end = [
                    (points[2][0] + points[3][0]) / 2.0,
                    (points[2][1] + points[3][1]) / 2.0,
                ];
                assert_abs_diff_eq!(end[0], 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(end[1], r + d, epsilon = 1e-9);
            }
            other => panic!("expected Polygon, got: {other:?}"),
        }
        match &group.items[1] {
            Drawing::Text { text, angle, .. } => {
                assert_eq!(text, "Capella");
                assert_abs_diff_eq!(*angle, -90.0);
            }
            other => panic!("expected Text, got: {other:?}"),
        }
    }

    #[test]
    fn test_centre_mount_and_hole() {
        let config = Config {
            hole_radius: Some(2.5),
            ..Config::default()
        };
        let work = rete(&config, &[]).unwrap();
        let radii: Vec<f64> = work
            .items
            .iter()
            .filter_map(|d| match d {
                Drawing::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![6.5, 2.5]);

        let plain = rete(&Config::default(), &[]).unwrap();
        assert_eq!(
            plain
                .items
                .iter()
                .filter(|d| matches!(d, Drawing::Circle { .. }))
                .count(),
            1
        );
    }
}
