use log::{debug, warn};

use crate::error::AstrolabeError;
use crate::geometry::intersect;
use crate::geometry::{distance, Circle};
use crate::projection;
use crate::types::{Drawing, Stroke};

/// Draw the almucantar of `altitude`, trimmed to `boundary`.
///
/// Where the projected circle crosses the boundary only the part inside it
/// is drawn, as an arc. Otherwise the whole circle is drawn with its outline
/// start turned a quarter turn. Fails when the almucantar projects to a
/// straight line.
pub fn draw_almucantar(
    altitude: f64,
    latitude: f64,
    r_equator: f64,
    boundary: &Circle,
    stroke: Stroke,
) -> Result<Drawing, AstrolabeError> {
    let projected = projection::almucantar(altitude, r_equator, latitude)?;
    let circle = Circle::on_axis(projected.offset, projected.radius.abs())?;

    match intersect::on_axis(boundary, &circle) {
        Some([p1, p2]) if distance(p1, p2) > 1e-9 => {
            let start = circle.angle_of(p2);
            let end = circle.angle_of(p1);
            debug!("almucantar {altitude}°: arc {start:.3}° → {end:.3}°");
            Ok(Drawing::arc(&circle, start, end, stroke))
        }
        _ => {
            if distance(boundary.center, circle.center) + circle.radius > boundary.radius {
                warn!("almucantar {altitude}° does not fit inside the plate");
            } else {
                debug!("almucantar {altitude}°: full circle r={:.3}", circle.radius);
            }
            Ok(Drawing::circle(&circle, stroke).with_phase(90.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{arc_sweep, polar_point};
    use crate::projection::radius_equator;
    use approx::assert_abs_diff_eq;

    const SIZE: f64 = 155.0;
    const LATITUDE: f64 = 50.37;

    fn boundary() -> Circle {
        Circle::on_axis(0.0, SIZE).unwrap()
    }

    fn draw(altitude: f64, latitude: f64) -> Result<Drawing, AstrolabeError> {
        draw_almucantar(
            altitude,
            latitude,
            radius_equator(SIZE),
            &boundary(),
            Stroke::Thin,
        )
    }

    /// Endpoints sit on the boundary and the middle of the sweep inside it.
    fn assert_trimmed_inside(drawing: &Drawing) {
        match drawing {
            Drawing::Arc {
                center,
                radius,
                startangle,
                endangle,
                ..
            } => {
                for angle in [*startangle, *endangle] {
                    let p = polar_point(*center, *radius, angle);
                    assert_abs_diff_eq!(distance([0.0, 0.0], p), SIZE, epsilon = 1e-6);
                }
                let sweep = arc_sweep(*startangle, *endangle);
                assert!(sweep > 0.0);
                let mid = polar_point(*center, *radius, startangle + sweep / 2.0);
                assert!(distance([0.0, 0.0], mid) < SIZE);
            }
            other => panic!("expected Arc, got: {other:?}"),
        }
    }

    #[test]
    fn test_horizon_is_trimmed_to_plate() {
        let horizon = draw(0.0, LATITUDE).unwrap();
        assert_trimmed_inside(&horizon);
        match horizon {
            Drawing::Arc {
                center,
                radius,
                startangle,
                endangle,
                ..
            } => {
                assert_abs_diff_eq!(center[0], 84.25632490266013, epsilon = 1e-6);
                assert_abs_diff_eq!(radius, 132.09895427096743, epsilon = 1e-6);
                assert_abs_diff_eq!(startangle, -178.65, epsilon = 1e-2);
                assert_abs_diff_eq!(endangle, -1.35, epsilon = 1e-2);
            }
            other => panic!("expected Arc, got: {other:?}"),
        }
    }

    #[test]
    fn test_small_almucantar_is_full_circle() {
        match draw(45.0, LATITUDE).unwrap() {
            Drawing::Circle {
                center,
                radius,
                phase,
                stroke,
                ..
            } => {
                assert_abs_diff_eq!(center[0], 43.927, epsilon = 1e-3);
                assert_abs_diff_eq!(center[1], 0.0);
                assert_abs_diff_eq!(radius, 48.698, epsilon = 1e-3);
                assert_abs_diff_eq!(phase, 90.0);
                assert_eq!(stroke, Stroke::Thin);
            }
            other => panic!("expected Circle, got: {other:?}"),
        }
    }

    #[test]
    fn test_every_five_degrees_gives_eighteen_elements() {
        let drawings: Vec<Drawing> = (0..90)
            .step_by(5)
            .map(|a| draw(a as f64, LATITUDE).unwrap())
            .collect();
        assert_eq!(drawings.len(), 18);

        let arcs: Vec<&Drawing> = drawings
            .iter()
            .filter(|d| matches!(d, Drawing::Arc { .. }))
            .collect();
        assert_eq!(arcs.len(), 4);
        for arc in arcs {
            assert_trimmed_inside(arc);
        }
    }

    #[test]
    fn test_twilight_arcs_are_trimmed() {
        for altitude in [-6.0, -12.0, -18.0] {
            assert_trimmed_inside(&draw(altitude, LATITUDE).unwrap());
        }
    }

    #[test]
    fn test_southern_latitude_mirrors_the_meridian() {
        let horizon = draw(0.0, -LATITUDE).unwrap();
        assert_trimmed_inside(&horizon);
        match horizon {
            Drawing::Arc { center, .. } => assert!(center[0] < 0.0),
            other => panic!("expected Arc, got: {other:?}"),
        }
    }

    #[test]
    fn test_straight_line_almucantar_is_an_error() {
        let err = draw(-6.0, 6.0).unwrap_err();
        assert!(matches!(err, AstrolabeError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_zenith_point_is_degenerate() {
        assert!(draw(90.0, LATITUDE).is_err());
    }
}
