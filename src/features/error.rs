use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Could not read Exif metadata: {0}")]
    Exif(#[from] exif::Error),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Reverse geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reverse geocoding timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Reverse geocoding is disabled")]
    Disabled,
}
