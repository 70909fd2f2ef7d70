//! The mater (body) of the astrolabe and its reverse side.

use log::info;

use crate::config::Config;
use crate::error::AstrolabeError;
use crate::geometry::{polar_point, Circle};
use crate::labels::{limb_degrees, HOURS, ZODIAC};
use crate::ticks::{full_circle, TickBand};
use crate::types::{Collection, Drawing, Shade, Stroke};

/// Radii of the limb rings, from the plate edge outward.
#[derive(Debug, Clone, Copy)]
struct Limb {
    inner: f64,
    mid: f64,
    small: f64,
    outer: f64,
}

impl Limb {
    fn new(config: &Config) -> Self {
        let inner = config.size;
        let outer = config.outer_radius();
        let mid = (inner + outer) / 2.0;
        let small = (mid + outer) / 2.0;
        Self {
            inner,
            mid,
            small,
            outer,
        }
    }

    /// Inner to outer: coarse, medium and fine graduations.
    fn bands(&self, steps: [f64; 3]) -> [TickBand; 3] {
        [
            TickBand {
                inner: self.inner,
                outer: self.mid,
                step: steps[0],
                stroke: Stroke::Thick,
            },
            TickBand {
                inner: self.mid,
                outer: self.small,
                step: steps[1],
                stroke: Stroke::Thick,
            },
            TickBand {
                inner: self.small,
                outer: self.outer,
                step: steps[2],
                stroke: Stroke::Thin,
            },
        ]
    }
}

/// Front of the mater: body outline, limb graduations and hour numerals.
pub fn mater(config: &Config) -> Result<Collection, AstrolabeError> {
    let limb = Limb::new(config);
    let origin = [0.0, 0.0];
    let mut work = Collection::named("mater");

    let body = Circle::on_axis(0.0, limb.outer)?;
    work.add(Drawing::circle(&body, Stroke::Cut).with_fill(Shade::Body));
    work.add(Drawing::circle(&Circle::on_axis(0.0, limb.mid)?, Stroke::Thick));
    work.add(Drawing::circle(&Circle::on_axis(0.0, limb.inner)?, Stroke::Thick));

    let steps = if config.clock {
        // Hours, quarters, five minutes.
        [360.0 / 24.0, 360.0 / 96.0, 360.0 / 288.0]
    } else {
        [15.0, 3.0, 1.0]
    };
    let mut ticks = 0;
    for band in limb.bands(steps) {
        ticks += full_circle(&mut work, origin, &band)?;
    }

    for (idx, angle) in (0..360).step_by(15).enumerate() {
        let a = angle as f64;

        if !config.clock {
            let mut label = Drawing::text(
                origin,
                limb_degrees(angle).to_string(),
                config.size / 35.0,
                Stroke::Thick,
            );
            let [x, y] = polar_point(origin, limb.small - 1.0, a);
            label.rotate(a).translate(x, y).rotate(0.3);
            work.add(label);
        }

        let mut hour = Drawing::text(origin, HOURS[idx % 12], config.size / 20.0, Stroke::Thick);
        let [x, y] = polar_point(origin, limb.mid - 2.0, a);
        hour.rotate(a + 3.0).translate(x, y).rotate(106.0);
        work.add(hour);
    }

    info!("mater: outer radius {:.1}, {ticks} ticks", limb.outer);
    Ok(work)
}

/// Back of the limb: ecliptic degree scale and zodiac names.
pub fn rear_limb(config: &Config) -> Result<Collection, AstrolabeError> {
    let limb = Limb::new(config);
    let origin = [0.0, 0.0];
    let mut work = Collection::named("rear_limb");

    work.add(Drawing::circle(&Circle::on_axis(0.0, limb.outer)?, Stroke::Cut));
    work.add(Drawing::circle(&Circle::on_axis(0.0, limb.mid)?, Stroke::Thick));

    for band in limb.bands([30.0, 5.0, 1.0]) {
        full_circle(&mut work, origin, &band)?;
    }

    let r = (limb.small + limb.mid) / 2.0 + (limb.small - limb.mid) / 3.0;
    for angle in (0..360).step_by(5) {
        let text = (angle % 30).to_string();
        // Shift left by the width of the digits so they centre on the tick.
        let bearing = 360.0 - angle as f64 - 1.3 * text.len() as f64;
        let mut label = Drawing::text(origin, text, config.size / 35.0, Stroke::Thick);
        let [x, y] = polar_point(origin, r, bearing);
        label.rotate(-(angle as f64)).translate(x, y);
        work.add(label);
    }

    let r = (limb.mid + limb.inner) / 2.0;
    for (idx, sign) in ZODIAC.iter().enumerate() {
        let angle = 180.0 + idx as f64 * 30.0 + 18.0;
        let mut label = Drawing::text(origin, *sign, config.size / 25.0, Stroke::Thick);
        let [x, y] = polar_point(origin, r, 360.0 - angle);
        label.rotate(-angle).translate(x, y);
        work.add(label);
    }

    Ok(work)
}

pub fn rear_plate(config: &Config) -> Result<Collection, AstrolabeError> {
    let mut work = Collection::named("rear_plate");
    work.add(Drawing::circle(&Circle::on_axis(0.0, config.size)?, Stroke::Thick));
    Ok(work)
}
