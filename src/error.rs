use thiserror::Error;

/// The primary error type for the geo_exif_locator crate.
#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Embedded metadata could not be parsed: {0}")]
    MalformedMetadata(#[from] crate::features::error::DecodeError),

    #[error("Metadata carries no GPS coordinates")]
    MissingGps,

    #[error("Address lookup unavailable: {0}")]
    GeocodingUnavailable(#[from] crate::features::error::GeocodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
