pub mod config;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod mater;
pub mod plate;
pub mod projection;
pub mod rete;
pub mod ticks;
pub mod types;

use std::str::FromStr;

use config::Config;
use error::AstrolabeError;
use log::{debug, info};
use rete::Star;
use types::{AstrolabeData, Collection, Metadata};

/// A separately manufactured piece of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Climate plate for one latitude.
    Plate,
    /// Cut line of the plate, with its locator key.
    Outline,
    Mater,
    /// Back of the mater: limb scales and plate.
    Rear,
    Rete,
}

impl Part {
    pub const ALL: [Part; 5] = [Part::Plate, Part::Outline, Part::Mater, Part::Rear, Part::Rete];

    pub fn name(self) -> &'static str {
        match self {
            Part::Plate => "plate",
            Part::Outline => "outline",
            Part::Mater => "mater",
            Part::Rear => "rear",
            Part::Rete => "rete",
        }
    }
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Part::ALL
            .into_iter()
            .find(|p| p.name() == s.to_lowercase())
            .ok_or_else(|| {
                format!("Unknown part: {s}. Use: plate, outline, mater, rear, rete")
            })
    }
}

fn build(part: Part, config: &Config, stars: &[Star]) -> Result<Collection, AstrolabeError> {
    match part {
        Part::Plate => plate::plate(config),
        Part::Outline => plate::outline(config),
        Part::Mater => mater::mater(config),
        Part::Rear => {
            let mut work = Collection::named("rear");
            work.add_group(mater::rear_plate(config)?);
            work.add_group(mater::rear_limb(config)?);
            Ok(work)
        }
        Part::Rete => rete::rete(config, stars),
    }
}

/// Lay out the requested parts into a single drawing.
///
/// Each part becomes a named group of the root collection, in the order
/// given; repeats are generated once. `stars` are only used by the rete.
pub fn generate(
    parts: &[Part],
    config: &Config,
    stars: &[Star],
) -> Result<AstrolabeData, AstrolabeError> {
    config.validate()?;
    if parts.is_empty() {
        return Err(AstrolabeError::InvalidConfig("no parts requested".into()));
    }

    let mut drawing = Collection::new();
    let mut names = Vec::new();
    for &part in parts {
        if names.contains(&part.name().to_string()) {
            debug!("{} requested twice, skipping", part.name());
            continue;
        }
        info!("Generating {}", part.name());
        drawing.add_group(build(part, config, stars)?);
        names.push(part.name().to_string());
    }

    let primitives = drawing.primitives().len();
    info!("{primitives} primitives in {} parts", names.len());

    Ok(AstrolabeData {
        metadata: Metadata {
            parts: names,
            latitude: config.latitude,
            size: config.size,
            primitives,
        },
        palette: config.palette.clone(),
        bbox: drawing.bbox(),
        drawing,
    })
}
