//! # Geo Exif Locator
//!
//! Extract where a photo was taken and what took it.
//!
//! This crate reads the embedded metadata of HEIC/HEIF, JPEG and PNG images,
//! normalizes it into a single [`CanonicalMetadata`] record and, when the
//! photo carries GPS coordinates, resolves them to a postal address.
//!
//! ## Key Features
//!
//! - **Two decoders**: HEIC/HEIF go through a container-aware Exif reader; JPEG and PNG through a flat tag-table reader.
//! - **GPS Location**: Converts degree/minute/second rationals to signed decimal degrees and builds a map link.
//! - **Reverse Geocoding**: Offline nearest-place lookup by default, OpenStreetMap Nominatim on request.
//! - **Device Information**: Make, model, software and capture time, with `"Unknown"` for anything missing.
//! - **Text Report**: A fixed-layout summary of everything found.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geo_exif_locator::MetadataLocator;
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let locator = MetadataLocator::builder().build()?;
//!
//!     let bytes = std::fs::read("IMG_7377.jpg")?;
//!     if let Some(metadata) = locator.locate(&bytes, "IMG_7377.jpg").await {
//!         println!("GPS: {:?}, {:?}", metadata.latitude, metadata.longitude);
//!         println!("Address: {:?}", metadata.address);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod locator;
pub mod structs;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{GeocoderKind, LocatorConfig};
pub use error::LocatorError;
pub use features::normalize::{extract_metadata, try_extract_metadata};
pub use features::report::format_report;
pub use locator::MetadataLocator;
pub use structs::CanonicalMetadata;
