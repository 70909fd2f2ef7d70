use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::config::Palette;
use crate::geometry::{
    polar_point, reflect_angle, reflect_point, rotate_point, sweep_contains, translate_point,
    Circle, Point,
};

/// Round a float to N decimal places.
pub fn round_f64(v: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (v * factor).round() / factor
}

/// Wrapper that rounds f64 to 6 decimal places on serialization.
fn serialize_f64_rounded<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_f64(*v, 6))
}

fn serialize_point<S: Serializer>(p: &Point, s: S) -> Result<S::Ok, S::Error> {
    let rounded = [round_f64(p[0], 6), round_f64(p[1], 6)];
    rounded.serialize(s)
}

fn serialize_points<S: Serializer>(points: &[Point], s: S) -> Result<S::Ok, S::Error> {
    let rounded: Vec<Point> = points
        .iter()
        .map(|p| [round_f64(p[0], 6), round_f64(p[1], 6)])
        .collect();
    rounded.serialize(s)
}

fn is_false(v: &bool) -> bool {
    !*v
}

// ─── Top-level document ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AstrolabeData {
    pub metadata: Metadata,
    pub palette: Palette,
    pub bbox: BBox,
    pub drawing: Collection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub parts: Vec<String>,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub latitude: f64,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub size: f64,
    pub primitives: usize,
}

// ─── Bounding Box ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BBox {
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub minx: f64,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub miny: f64,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub maxx: f64,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub maxy: f64,
}

impl BBox {
    pub fn empty() -> Self {
        Self {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: f64::NEG_INFINITY,
            maxy: f64::NEG_INFINITY,
        }
    }

    pub fn expand_point(&mut self, x: f64, y: f64) {
        self.minx = self.minx.min(x);
        self.miny = self.miny.min(y);
        self.maxx = self.maxx.max(x);
        self.maxy = self.maxy.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx
    }
}

// ─── Style tags ──────────────────────────────────────────────────────

/// Line class of a primitive. Display only; the geometry ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    #[default]
    Thick,
    Thin,
    Dotted,
    Cut,
}

/// Fill class for closed primitives, resolved through the [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shade {
    Night,
    Day,
    Body,
}

// ─── Drawing types ───────────────────────────────────────────────────

/// A drawing primitive, or a nested group of them.
///
/// Angles follow the plate convention: degrees from +y, clockwise. Arcs are
/// swept clockwise from `startangle` to `endangle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Drawing {
    Circle {
        #[serde(serialize_with = "serialize_point")]
        center: Point,
        #[serde(serialize_with = "serialize_f64_rounded")]
        radius: f64,
        /// Bearing at which the outline starts.
        #[serde(serialize_with = "serialize_f64_rounded")]
        phase: f64,
        stroke: Stroke,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Shade>,
    },
    Arc {
        #[serde(serialize_with = "serialize_point")]
        center: Point,
        #[serde(serialize_with = "serialize_f64_rounded")]
        radius: f64,
        #[serde(serialize_with = "serialize_f64_rounded")]
        startangle: f64,
        #[serde(serialize_with = "serialize_f64_rounded")]
        endangle: f64,
        stroke: Stroke,
    },
    Polygon {
        #[serde(serialize_with = "serialize_points")]
        points: Vec<Point>,
        stroke: Stroke,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Shade>,
    },
    Text {
        #[serde(serialize_with = "serialize_point")]
        pos: Point,
        text: String,
        #[serde(serialize_with = "serialize_f64_rounded")]
        height: f64,
        /// Clockwise rotation of the baseline from +x.
        #[serde(serialize_with = "serialize_f64_rounded")]
        angle: f64,
        #[serde(skip_serializing_if = "is_false")]
        mirrored: bool,
        stroke: Stroke,
    },
    Group(Collection),
}

impl Drawing {
    pub fn circle(circle: &Circle, stroke: Stroke) -> Self {
        Drawing::Circle {
            center: circle.center,
            radius: circle.radius,
            phase: 0.0,
            stroke,
            fill: None,
        }
    }

    pub fn arc(circle: &Circle, startangle: f64, endangle: f64, stroke: Stroke) -> Self {
        Drawing::Arc {
            center: circle.center,
            radius: circle.radius,
            startangle,
            endangle,
            stroke,
        }
    }

    /// Straight line through `points`.
    pub fn polyline(points: Vec<Point>, stroke: Stroke) -> Self {
        Drawing::Polygon {
            points,
            stroke,
            fill: None,
        }
    }

    pub fn text(pos: Point, text: impl Into<String>, height: f64, stroke: Stroke) -> Self {
        Drawing::Text {
            pos,
            text: text.into(),
            height,
            angle: 0.0,
            mirrored: false,
            stroke,
        }
    }

    /// Set the fill of a circle or polygon; other kinds are returned unchanged.
    pub fn with_fill(mut self, shade: Shade) -> Self {
        match &mut self {
            Drawing::Circle { fill, .. } | Drawing::Polygon { fill, .. } => *fill = Some(shade),
            _ => {}
        }
        self
    }

    /// Turn a circle's outline start about its own centre.
    pub fn with_phase(mut self, degrees: f64) -> Self {
        if let Drawing::Circle { phase, .. } = &mut self {
            *phase += degrees;
        }
        self
    }

    /// Set the baseline angle of a text label.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        if let Drawing::Text { angle, .. } = &mut self {
            *angle = degrees;
        }
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        match self {
            Drawing::Circle { center, .. } | Drawing::Arc { center, .. } => {
                *center = translate_point(*center, dx, dy);
            }
            Drawing::Polygon { points, .. } => {
                for p in points.iter_mut() {
                    *p = translate_point(*p, dx, dy);
                }
            }
            Drawing::Text { pos, .. } => *pos = translate_point(*pos, dx, dy),
            Drawing::Group(group) => {
                group.translate(dx, dy);
            }
        }
        self
    }

    /// Rotate clockwise about the origin.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        match self {
            Drawing::Circle { center, phase, .. } => {
                *center = rotate_point(*center, degrees);
                *phase += degrees;
            }
            Drawing::Arc {
                center,
                startangle,
                endangle,
                ..
            } => {
                *center = rotate_point(*center, degrees);
                *startangle += degrees;
                *endangle += degrees;
            }
            Drawing::Polygon { points, .. } => {
                for p in points.iter_mut() {
                    *p = rotate_point(*p, degrees);
                }
            }
            Drawing::Text { pos, angle, .. } => {
                *pos = rotate_point(*pos, degrees);
                *angle += degrees;
            }
            Drawing::Group(group) => {
                group.rotate(degrees);
            }
        }
        self
    }

    /// Mirror across the horizontal axis. Arcs keep their clockwise sweep.
    pub fn reflect_h(&mut self) -> &mut Self {
        match self {
            Drawing::Circle { center, phase, .. } => {
                *center = reflect_point(*center);
                *phase = reflect_angle(*phase);
            }
            Drawing::Arc {
                center,
                startangle,
                endangle,
                ..
            } => {
                *center = reflect_point(*center);
                let (start, end) = (*startangle, *endangle);
                *startangle = reflect_angle(end);
                *endangle = reflect_angle(start);
            }
            Drawing::Polygon { points, .. } => {
                for p in points.iter_mut() {
                    *p = reflect_point(*p);
                }
            }
            Drawing::Text {
                pos,
                angle,
                mirrored,
                ..
            } => {
                *pos = reflect_point(*pos);
                *angle = -*angle;
                *mirrored = !*mirrored;
            }
            Drawing::Group(group) => {
                group.reflect_h();
            }
        }
        self
    }

    fn expand_bbox(&self, bbox: &mut BBox) {
        match self {
            Drawing::Circle { center, radius, .. } => {
                bbox.expand_point(center[0] - radius, center[1] - radius);
                bbox.expand_point(center[0] + radius, center[1] + radius);
            }
            Drawing::Arc {
                center,
                radius,
                startangle,
                endangle,
                ..
            } => {
                for angle in [*startangle, *endangle] {
                    let p = polar_point(*center, *radius, angle);
                    bbox.expand_point(p[0], p[1]);
                }
                for angle in [0.0, 90.0, 180.0, 270.0] {
                    if sweep_contains(*startangle, *endangle, angle) {
                        let p = polar_point(*center, *radius, angle);
                        bbox.expand_point(p[0], p[1]);
                    }
                }
            }
            Drawing::Polygon { points, .. } => {
                for p in points {
                    bbox.expand_point(p[0], p[1]);
                }
            }
            Drawing::Text { pos, .. } => bbox.expand_point(pos[0], pos[1]),
            Drawing::Group(group) => {
                for item in &group.items {
                    item.expand_bbox(bbox);
                }
            }
        }
    }
}

/// An ordered, appendable tree of drawings.
///
/// Transforms are applied eagerly to every child and return the same
/// handle, so in a chain the last transform lands last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub items: Vec<Drawing>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, drawing: Drawing) -> &mut Self {
        self.items.push(drawing);
        self
    }

    /// Merge a sub-collection as a nested group.
    pub fn add_group(&mut self, group: Collection) -> &mut Self {
        self.items.push(Drawing::Group(group));
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        for item in self.items.iter_mut() {
            item.translate(dx, dy);
        }
        self
    }

    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        for item in self.items.iter_mut() {
            item.rotate(degrees);
        }
        self
    }

    pub fn reflect_h(&mut self) -> &mut Self {
        for item in self.items.iter_mut() {
            item.reflect_h();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All leaf primitives in drawing order, groups flattened.
    pub fn primitives(&self) -> Vec<&Drawing> {
        let mut out = Vec::new();
        collect_primitives(&self.items, &mut out);
        out
    }

    pub fn bbox(&self) -> BBox {
        let mut bbox = BBox::empty();
        for item in &self.items {
            item.expand_bbox(&mut bbox);
        }
        bbox
    }

    /// Find a nested group by name, depth first.
    pub fn group(&self, name: &str) -> Option<&Collection> {
        self.items.iter().find_map(|item| match item {
            Drawing::Group(group) if group.name.as_deref() == Some(name) => Some(group),
            Drawing::Group(group) => group.group(name),
            _ => None,
        })
    }
}

fn collect_primitives<'a>(items: &'a [Drawing], out: &mut Vec<&'a Drawing>) {
    for item in items {
        match item {
            Drawing::Group(group) => collect_primitives(&group.items, out),
            other => out.push(other),
        }
    }
}
