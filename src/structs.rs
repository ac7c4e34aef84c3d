use crate::error::LocatorError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// The normalized metadata of one image, identical in shape for every
/// supported container format.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMetadata {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub map_link: Option<String>,
    pub make: String,
    pub model: String,
    pub software: String,
    pub datetime: String,
    pub captured_at: Option<NaiveDateTime>,
    pub host_computer: Option<String>,
    pub lens_make: Option<String>,
    pub lens_model: Option<String>,
    pub pixel_dimensions: Option<(u32, u32)>,
}

impl CanonicalMetadata {
    /// Both coordinates, or [`LocatorError::MissingGps`].
    pub fn coordinates(&self) -> Result<(f64, f64), LocatorError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(LocatorError::MissingGps),
        }
    }

    pub fn has_gps(&self) -> bool {
        self.coordinates().is_ok()
    }

    /// Returns the record with its resolved address attached. Records
    /// without coordinates are returned unchanged.
    #[must_use]
    pub fn with_address(self, address: Option<String>) -> Self {
        if !self.has_gps() {
            return self;
        }
        Self { address, ..self }
    }
}

/// Google Maps link for a coordinate pair.
pub fn map_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}
