use super::{distance, plate_angle, rotate_point, translate_point, Circle, Point};

/// Intersection of two circles whose centres both lie on the x axis.
///
/// Returns `None` when the circles are separate, nested, concentric or
/// coincident. Tangent circles yield two identical points.
pub fn intersect(x0: f64, r0: f64, x1: f64, r1: f64) -> Option<[Point; 2]> {
    let dx = x1 - x0;
    let d = dx.abs();

    if d > r0 + r1 {
        return None; // separate
    }
    if d < (r0 - r1).abs() {
        return None; // nested
    }
    if d == 0.0 {
        return None; // concentric or coincident
    }

    // Distance from the first centre to the radical line.
    let a = (r0 * r0 - r1 * r1 + d * d) / (2.0 * d);
    let x2 = x0 + dx * (a / d);

    // Rounding near tangency can push the radicand a hair below zero.
    let h = (r0 * r0 - a * a).max(0.0).sqrt();
    let ry = dx * (h / d);

    Some([[x2, ry], [x2, -ry]])
}

/// Intersection of two arbitrary circles.
///
/// The pair is moved so the first centre sits on the origin and the second
/// on the +x axis, solved with [`intersect`], then moved back.
pub fn intersect2(c1: Point, r1: f64, c2: Point, r2: f64) -> Option<[Point; 2]> {
    let turn = 90.0 - plate_angle(c1, c2);
    let d = distance(c1, c2);

    let [p1, p2] = intersect(0.0, r1, d, r2)?;
    let restore = |p: Point| translate_point(rotate_point(p, -turn), c1[0], c1[1]);
    Some([restore(p1), restore(p2)])
}

/// Axis-aligned intersection of two circles centred on the x axis.
pub fn on_axis(a: &Circle, b: &Circle) -> Option<[Point; 2]> {
    debug_assert!(a.center[1] == 0.0 && b.center[1] == 0.0);
    intersect(a.center[0], a.radius, b.center[0], b.radius)
}

/// General intersection of two circles.
pub fn circles(a: &Circle, b: &Circle) -> Option<[Point; 2]> {
    intersect2(a.center, a.radius, b.center, b.radius)
}
