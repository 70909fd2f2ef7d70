//! Plane geometry shared by every generator.
//!
//! All angles on the plate use one convention: degrees measured from the
//! +y axis, increasing clockwise (a compass bearing drawn on the plate).
//! [`plate_angle`] and [`polar_point`] are the only two places that convert
//! between that convention and cartesian coordinates.

pub mod intersect;

use crate::error::AstrolabeError;

/// Smallest radius treated as a circle rather than a point.
pub const MIN_RADIUS: f64 = 1e-9;

/// A point in the plate plane, in millimetres.
pub type Point = [f64; 2];

/// Bearing of `point` as seen from `center`, in degrees within (-180, 180].
pub fn plate_angle(center: Point, point: Point) -> f64 {
    let dx = point[0] - center[0];
    let dy = point[1] - center[1];
    dx.atan2(dy).to_degrees()
}

/// Point at `radius` from `center` along the bearing `angle` (degrees).
pub fn polar_point(center: Point, radius: f64, angle: f64) -> Point {
    let (sin, cos) = angle.to_radians().sin_cos();
    [center[0] + radius * sin, center[1] + radius * cos]
}

/// Rotate a point clockwise about the origin by `degrees`.
pub fn rotate_point(p: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [p[0] * cos + p[1] * sin, -p[0] * sin + p[1] * cos]
}

pub fn translate_point(p: Point, dx: f64, dy: f64) -> Point {
    [p[0] + dx, p[1] + dy]
}

/// Mirror a point across the horizontal (x) axis.
pub fn reflect_point(p: Point) -> Point {
    [p[0], -p[1]]
}

/// Mirror a bearing across the horizontal axis.
pub fn reflect_angle(angle: f64) -> f64 {
    180.0 - angle
}

/// Clockwise sweep from `start` to `end`, in [0, 360).
pub fn arc_sweep(start: f64, end: f64) -> f64 {
    (end - start).rem_euclid(360.0)
}

/// True when `angle` lies on the clockwise sweep from `start` to `end`.
pub fn sweep_contains(start: f64, end: f64, angle: f64) -> bool {
    arc_sweep(start, angle) <= arc_sweep(start, end)
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// A circle with a finite radius of at least [`MIN_RADIUS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self, AstrolabeError> {
        if !radius.is_finite() || radius < MIN_RADIUS {
            return Err(AstrolabeError::degenerate(format!(
                "circle radius must be positive and finite, got {radius}"
            )));
        }
        if !center[0].is_finite() || !center[1].is_finite() {
            return Err(AstrolabeError::degenerate(format!(
                "circle centre must be finite, got ({}, {})",
                center[0], center[1]
            )));
        }
        Ok(Self { center, radius })
    }

    /// Circle centred on the x axis.
    pub fn on_axis(x: f64, radius: f64) -> Result<Self, AstrolabeError> {
        Self::new([x, 0.0], radius)
    }

    pub fn point_at(&self, angle: f64) -> Point {
        polar_point(self.center, self.radius, angle)
    }

    pub fn angle_of(&self, point: Point) -> f64 {
        plate_angle(self.center, point)
    }

    /// Sample the outline as a closed ring, one vertex every `step` degrees.
    pub fn outline(&self, step: f64) -> Vec<Point> {
        let segments = ((360.0 / step).ceil() as usize).max(3);
        (0..segments)
            .map(|k| self.point_at(360.0 * k as f64 / segments as f64))
            .collect()
    }
}
