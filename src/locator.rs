use crate::LocatorError;
use crate::config::LocatorConfig;
use crate::features::geocode::{Geocoder, resolve_address};
use crate::features::normalize::try_extract_metadata;
use crate::features::report::{format_report, unavailable_message};
use crate::structs::CanonicalMetadata;
use bon::bon;

/// The main entry point for the extraction pipeline.
///
/// Holds the configuration and the reverse geocoder. It is designed to be
/// created once and reused for every image; each call works on its own
/// byte buffer and shares nothing mutable with other calls.
///
/// ```rust,no_run
/// # use geo_exif_locator::{MetadataLocator, LocatorError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), LocatorError> {
/// let locator = MetadataLocator::builder().build()?;
/// let bytes = std::fs::read("IMG_0798.HEIC")?;
/// println!("{}", locator.report(&bytes, "IMG_0798.HEIC").await);
/// # Ok(())
/// # }
/// ```
pub struct MetadataLocator {
    config: LocatorConfig,
    geocoder: Geocoder,
}

#[bon]
impl MetadataLocator {
    /// Constructs a `MetadataLocator` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `config: LocatorConfig` - (Default: [`LocatorConfig::default`]) Geocoder choice, its endpoint, user agent, language and timeout, and whether tag tables are read in detail.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::GeocodingUnavailable`] if the HTTP client for
    /// the Nominatim geocoder cannot be created.
    #[builder]
    pub fn new(#[builder(default)] config: LocatorConfig) -> Result<Self, LocatorError> {
        let geocoder = Geocoder::from_config(&config)?;
        Ok(Self { config, geocoder })
    }

    /// Extracts the canonical record without resolving an address.
    ///
    /// # Errors
    ///
    /// * [`LocatorError::UnsupportedFormat`] for extensions other than HEIC/HEIF/JPEG/PNG.
    /// * [`LocatorError::MalformedMetadata`] when the embedded metadata cannot be parsed.
    pub fn extract(&self, data: &[u8], filename: &str) -> Result<CanonicalMetadata, LocatorError> {
        try_extract_metadata(data, filename, self.config.details)
    }

    /// Extracts the record and, when it has coordinates, resolves its address.
    ///
    /// Returns `None` when no metadata could be extracted. A failed or slow
    /// address lookup does not fail the call; the record is returned with
    /// coordinates only.
    pub async fn locate(&self, data: &[u8], filename: &str) -> Option<CanonicalMetadata> {
        let metadata = match self.extract(data, filename) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("metadata unavailable for {filename}: {e}");
                return None;
            }
        };
        Some(resolve_address(&self.geocoder, metadata, self.config.geocode_timeout()).await)
    }

    /// Produces the text report for one image, or the unavailable message.
    pub async fn report(&self, data: &[u8], filename: &str) -> String {
        match self.locate(data, filename).await {
            Some(metadata) => format_report(&metadata),
            None => unavailable_message().to_string(),
        }
    }
}
