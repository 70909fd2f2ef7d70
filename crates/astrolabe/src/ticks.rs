use log::debug;

use crate::error::AstrolabeError;
use crate::geometry::{polar_point, Point};
use crate::types::{Collection, Drawing, Stroke};

/// Radial band a set of ticks spans.
#[derive(Debug, Clone, Copy)]
pub struct TickBand {
    pub inner: f64,
    pub outer: f64,
    pub step: f64,
    pub stroke: Stroke,
}

/// Add one radial segment from `r1` to `r2` for every angle `a1 + k·step`
/// below `a2`. Returns the number of ticks drawn.
///
/// The last tick is not snapped to `a2`; with a step that does not divide
/// the range it simply falls short of it.
#[allow(clippy::too_many_arguments)]
pub fn ticks(
    work: &mut Collection,
    center: Point,
    r1: f64,
    r2: f64,
    a1: f64,
    a2: f64,
    step: f64,
    stroke: Stroke,
) -> Result<usize, AstrolabeError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(AstrolabeError::InvalidConfig(format!(
            "tick step must be positive, got {step}"
        )));
    }
    if a1 > a2 {
        return Err(AstrolabeError::InvalidConfig(format!(
            "tick range is reversed: {a1}° > {a2}°"
        )));
    }

    let mut count = 0;
    loop {
        let a = a1 + count as f64 * step;
        if a >= a2 {
            break;
        }
        let inner = polar_point(center, r1, a);
        let outer = polar_point(center, r2, a);
        work.add(Drawing::polyline(vec![inner, outer], stroke));
        count += 1;
    }
    debug!("ticks: {count} from {a1}° to {a2}° every {step}°");
    Ok(count)
}

/// Graduate a full circle with one [`TickBand`].
pub fn full_circle(
    work: &mut Collection,
    center: Point,
    band: &TickBand,
) -> Result<usize, AstrolabeError> {
    ticks(
        work,
        center,
        band.inner,
        band.outer,
        0.0,
        360.0,
        band.step,
        band.stroke,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{distance, plate_angle};

    fn count(step: f64) -> usize {
        let mut work = Collection::new();
        ticks(&mut work, [0.0, 0.0], 10.0, 12.0, 0.0, 360.0, step, Stroke::Thin).unwrap()
    }

    #[test]
    fn test_dividing_step_counts() {
        assert_eq!(count(15.0), 24);
        assert_eq!(count(1.0), 360);
        assert_eq!(count(360.0 / 96.0), 96);
        assert_eq!(count(360.0 / 288.0), 288);
    }

    #[test]
    fn test_non_dividing_step_counts() {
        assert_eq!(count(7.0), 360 / 7 + 1);
        assert_eq!(count(25.0), 15);
        assert_eq!(count(500.0), 1);
    }

    #[test]
    fn test_tick_geometry() {
        let mut work = Collection::new();
        let center = [5.0, -5.0];
        ticks(&mut work, center, 10.0, 12.0, 30.0, 90.0, 30.0, Stroke::Thick).unwrap();
        assert_eq!(work.len(), 2);

        for (item, expected) in work.items.iter().zip([30.0, 60.0]) {
            match item {
                Drawing::Polygon { points, stroke, .. } => {
                    assert_eq!(points.len(), 2);
                    assert!((distance(center, points[0]) - 10.0).abs() < 1e-9);
                    assert!((distance(center, points[1]) - 12.0).abs() < 1e-9);
                    assert!((plate_angle(center, points[1]) - expected).abs() < 1e-9);
                    assert_eq!(*stroke, Stroke::Thick);
                }
                other => panic!("expected Polygon, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_range() {
        let mut work = Collection::new();
        let n = ticks(&mut work, [0.0, 0.0], 1.0, 2.0, 45.0, 45.0, 5.0, Stroke::Thin).unwrap();
        assert_eq!(n, 0);
        assert!(work.is_empty());
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let mut work = Collection::new();
        assert!(ticks(&mut work, [0.0, 0.0], 1.0, 2.0, 90.0, 0.0, 5.0, Stroke::Thin).is_err());
        assert!(ticks(&mut work, [0.0, 0.0], 1.0, 2.0, 0.0, 90.0, 0.0, Stroke::Thin).is_err());
        assert!(ticks(&mut work, [0.0, 0.0], 1.0, 2.0, 0.0, 90.0, -1.0, Stroke::Thin).is_err());
    }

    #[test]
    fn test_full_circle_band() {
        let mut work = Collection::new();
        let band = TickBand {
            inner: 155.0,
            outer: 170.5,
            step: 15.0,
            stroke: Stroke::Thick,
        };
        assert_eq!(full_circle(&mut work, [0.0, 0.0], &band).unwrap(), 24);
    }
}
