//! The climate plate: the latitude-specific network of almucantars and
//! azimuth lines, bounded by the Tropic of Capricorn.

pub mod almucantar;
pub mod azimuth;
pub mod fill;

use log::{debug, info};

use crate::config::Config;
use crate::error::AstrolabeError;
use crate::geometry::{polar_point, Circle};
use crate::labels::latitude_label;
use crate::projection::{radius_cancer, radius_equator};
use crate::types::{Collection, Drawing, Stroke};

use almucantar::draw_almucantar;
use azimuth::{draw_azimuth, AzimuthFrame};

/// Half-width of the locator key notch, degrees.
const KEY_ANGLE: f64 = 1.0;
/// Bearing of the locator key: the lower meridian.
const KEY_BEARING: f64 = 270.0;

/// Lines on a 10° multiple are drawn thick, the rest thin.
fn graduation_stroke(angle: u32) -> Stroke {
    if angle % 10 == 0 {
        Stroke::Thick
    } else {
        Stroke::Thin
    }
}

/// Compose the climate plate for `config`.
pub fn plate(config: &Config) -> Result<Collection, AstrolabeError> {
    let r_capricorn = config.size;
    let r_equator = radius_equator(r_capricorn);
    let r_cancer = radius_cancer(r_equator);
    let capricorn = Circle::on_axis(0.0, r_capricorn)?;

    let mut work = Collection::named("plate");

    if config.clock {
        let mut shading = Collection::named("shading");
        fill::day_night(&mut shading, config.latitude, r_equator, &capricorn)?;
        work.add_group(shading);
    }

    // Equator and tropics.
    for radius in [r_capricorn, r_equator, r_cancer] {
        work.add(Drawing::circle(&Circle::on_axis(0.0, radius)?, Stroke::Thick));
    }

    if let Some(hole) = config.hole_radius.filter(|h| *h > 0.0) {
        work.add(Drawing::circle(&Circle::on_axis(0.0, hole)?, Stroke::Cut));
    }

    // Quarters.
    work.add(Drawing::polyline(
        vec![[-r_capricorn, 0.0], [r_capricorn, 0.0]],
        Stroke::Thick,
    ));
    work.add(Drawing::polyline(
        vec![[0.0, -r_capricorn], [0.0, r_capricorn]],
        Stroke::Thick,
    ));

    if let Some(step) = config.almucantar_step {
        let mut almucantars = Collection::named("almucantars");
        for altitude in (0..90).step_by(step as usize) {
            almucantars.add(draw_almucantar(
                altitude as f64,
                config.latitude,
                r_equator,
                &capricorn,
                graduation_stroke(altitude),
            )?);
        }
        info!("plate: {} almucantars", almucantars.len());
        work.add_group(almucantars);
    }

    if !config.twilight.is_empty() {
        let mut twilight = Collection::named("twilight");
        for kind in &config.twilight {
            twilight.add(draw_almucantar(
                kind.altitude(),
                config.latitude,
                r_equator,
                &capricorn,
                Stroke::Dotted,
            )?);
        }
        work.add_group(twilight);
    }

    if let Some(step) = config.azimuth_step {
        let frame = AzimuthFrame::new(r_equator, config.latitude)?;
        let mut azimuths = Collection::named("azimuths");
        for angle in (0..90).step_by(step as usize) {
            let stroke = graduation_stroke(angle);
            match draw_azimuth(&frame, &capricorn, angle as f64, stroke)? {
                Some([arc, mirrored]) => {
                    azimuths.add(arc);
                    azimuths.add(mirrored);
                }
                None => debug!("plate: azimuth {angle}° lies outside the tropic"),
            }
        }
        info!("plate: {} azimuth arcs", azimuths.len());
        work.add_group(azimuths);
    }

    // Engrave the latitude along the lower meridian.
    let height = config.size / 20.0;
    let mut label = Drawing::text(
        [0.0, -r_equator * 1.15],
        latitude_label(config.latitude),
        height,
        Stroke::Thick,
    );
    label.rotate(90.0).translate(0.0, height * 0.8);
    work.add(label);

    Ok(work)
}

/// Cut outline of the plate with the locator key notch on the lower meridian.
pub fn outline(config: &Config) -> Result<Collection, AstrolabeError> {
    let size = config.size;
    let key_size = size * 0.98;
    let a1 = KEY_BEARING - KEY_ANGLE;
    let a2 = KEY_BEARING + KEY_ANGLE;

    let mut work = Collection::named("outline");
    // Leave space for the locator key.
    work.add(Drawing::arc(&Circle::on_axis(0.0, size)?, a2, a1, Stroke::Cut));
    // Top of the locator key.
    work.add(Drawing::arc(
        &Circle::on_axis(0.0, key_size)?,
        a1,
        a2,
        Stroke::Cut,
    ));
    for angle in [a1, a2] {
        work.add(Drawing::polyline(
            vec![
                polar_point([0.0, 0.0], size, angle),
                polar_point([0.0, 0.0], key_size, angle),
            ],
            Stroke::Cut,
        ));
    }
    Ok(work)
}
