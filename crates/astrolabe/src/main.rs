use std::path::PathBuf;

use astrolabe::config::{Config, Twilight};
use astrolabe::rete::Star;
use astrolabe::{generate, Part};
use clap::Parser;

#[derive(Parser)]
#[command(name = "astrolabe", about = "Lay out astrolabe parts as JSON drawings")]
struct Cli {
    /// Parts to generate (plate, outline, mater, rear, rete); defaults to plate
    parts: Vec<String>,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Observer latitude in degrees north
    #[arg(long)]
    lat: Option<f64>,

    /// Radius of the Tropic of Capricorn (mm)
    #[arg(long)]
    size: Option<f64>,

    /// Step in degrees between almucantars (0 leaves them out)
    #[arg(long)]
    almucantar: Option<u32>,

    /// Step in degrees between azimuth lines (0 leaves them out)
    #[arg(long)]
    azimuth: Option<u32>,

    /// Cut a central hole of this radius
    #[arg(long)]
    hole: Option<f64>,

    /// Civil twilight line
    #[arg(long)]
    civil: bool,

    /// Nautical twilight line
    #[arg(long)]
    nautical: bool,

    /// Astronomical twilight line
    #[arg(long)]
    astronomical: bool,

    /// Shade day and night and graduate the limb in hours
    #[arg(long)]
    clock: bool,

    /// JSON list of stars to mount on the rete
    #[arg(long)]
    stars: Option<PathBuf>,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn step(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };
    if let Some(lat) = cli.lat {
        config.latitude = lat;
    }
    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(n) = cli.almucantar {
        config.almucantar_step = step(n);
    }
    if let Some(n) = cli.azimuth {
        config.azimuth_step = step(n);
    }
    if cli.hole.is_some() {
        config.hole_radius = cli.hole;
    }
    for (flag, kind) in [
        (cli.civil, Twilight::Civil),
        (cli.nautical, Twilight::Nautical),
        (cli.astronomical, Twilight::Astronomical),
    ] {
        if flag {
            config.twilight.insert(kind);
        }
    }
    config.clock |= cli.clock;

    let parts: Vec<Part> = if cli.parts.is_empty() {
        vec![Part::Plate]
    } else {
        cli.parts
            .iter()
            .map(|s| s.parse::<Part>().unwrap_or_else(|e| fail(e)))
            .collect()
    };

    let stars = match &cli.stars {
        Some(path) => Star::load_all(path).unwrap_or_else(|e| fail(e)),
        None => Vec::new(),
    };

    let data = generate(&parts, &config, &stars).unwrap_or_else(|e| fail(e));

    let json = if cli.pretty {
        serde_json::to_string_pretty(&data)
    } else {
        serde_json::to_string(&data)
    }
    .unwrap_or_else(|e| fail(format!("JSON serialization failed: {e}")));

    if let Some(output_path) = cli.output {
        if let Err(e) = std::fs::write(&output_path, &json) {
            fail(format!("Failed to write output file: {e}"));
        }
        eprintln!("Written to {}", output_path.display());
    } else {
        println!("{json}");
    }
}
