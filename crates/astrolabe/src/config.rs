use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AstrolabeError;

/// Sun depression below the horizon that marks the end of twilight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Twilight {
    Civil,
    Nautical,
    Astronomical,
}

impl Twilight {
    pub const ALL: [Twilight; 3] = [Twilight::Civil, Twilight::Nautical, Twilight::Astronomical];

    /// Altitude of the twilight almucantar, degrees.
    pub fn altitude(self) -> f64 {
        match self {
            Twilight::Civil => -6.0,
            Twilight::Nautical => -12.0,
            Twilight::Astronomical => -18.0,
        }
    }
}

/// RGB fills for the shaded regions, components in 0..=1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub night: [f64; 3],
    pub day: [f64; 3],
    pub body: [f64; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            night: [0.65, 0.65, 1.0],
            day: [0.85, 0.85, 1.0],
            body: [0.9, 0.9, 0.2],
        }
    }
}

/// Everything needed to lay out one astrolabe. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Observer latitude, degrees north.
    pub latitude: f64,
    /// Radius of the Tropic of Capricorn, the edge of the plate (mm).
    pub size: f64,
    /// Outer radius of the limb. Defaults to 1.2 × `size`.
    pub outer: Option<f64>,
    /// Degrees between almucantars; `None` leaves them out.
    pub almucantar_step: Option<u32>,
    /// Degrees between azimuth lines; `None` leaves them out.
    pub azimuth_step: Option<u32>,
    /// Radius of the central hole, if one is cut.
    pub hole_radius: Option<f64>,
    pub twilight: BTreeSet<Twilight>,
    /// Shade day and night and graduate the limb in hours.
    pub clock: bool,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: 50.37,
            size: 155.0,
            outer: None,
            almucantar_step: Some(5),
            azimuth_step: Some(15),
            hole_radius: None,
            twilight: BTreeSet::new(),
            clock: false,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, AstrolabeError> {
        let data = std::fs::read(path)?;
        let config: Config = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer.unwrap_or(self.size * 1.2)
    }

    pub fn validate(&self) -> Result<(), AstrolabeError> {
        if !self.latitude.is_finite() || self.latitude.abs() >= 90.0 {
            return Err(AstrolabeError::InvalidConfig(format!(
                "latitude must lie strictly between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(AstrolabeError::InvalidConfig(format!(
                "size must be positive, got {}",
                self.size
            )));
        }
        let outer = self.outer_radius();
        if !outer.is_finite() || outer <= self.size {
            return Err(AstrolabeError::InvalidConfig(format!(
                "outer radius {outer} must exceed the plate size {}",
                self.size
            )));
        }
        for (name, step) in [
            ("almucantar", self.almucantar_step),
            ("azimuth", self.azimuth_step),
        ] {
            if step == Some(0) {
                return Err(AstrolabeError::InvalidConfig(format!(
                    "{name} step must be positive"
                )));
            }
        }
        if let Some(hole) = self.hole_radius {
            if !hole.is_finite() || hole < 0.0 || hole >= self.size {
                return Err(AstrolabeError::InvalidConfig(format!(
                    "hole radius must lie in [0, {}), got {hole}",
                    self.size
                )));
            }
        }
        Ok(())
    }
}
