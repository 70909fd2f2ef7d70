use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstrolabeError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("azimuth {azimuth}° does not intersect the horizon")]
    MissingIntersection { azimuth: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AstrolabeError {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry(message.into())
    }
}
