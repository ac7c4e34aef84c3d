//! Runtime configuration for the locator.
//!
//! Everything that talks to the outside world (which geocoder, its endpoint,
//! the user agent it announces, how long to wait) lives here and is passed
//! explicitly to [`crate::MetadataLocator`].

use crate::error::LocatorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which reverse geocoder resolves coordinates to an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderKind {
    /// Nearest populated place from the bundled GeoNames dataset.
    #[default]
    Offline,
    /// OpenStreetMap Nominatim over HTTP.
    Nominatim,
    /// Never resolve addresses.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub geocoder: GeocoderKind,
    pub user_agent: String,
    pub nominatim_url: String,
    /// Preferred address language, sent as `accept-language`.
    pub language: String,
    pub geocode_timeout_secs: u64,
    /// Include unknown tags and maker notes when reading tag tables.
    pub details: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            geocoder: GeocoderKind::default(),
            user_agent: "geo_exif_locator".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            language: "en".to_string(),
            geocode_timeout_secs: 10,
            details: true,
        }
    }
}

impl LocatorConfig {
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }

    /// Loads a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, LocatorError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
