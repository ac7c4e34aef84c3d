//! Format classification, decoder dispatch and normalization.
//!
//! This is where the two decoder paths converge: whichever decoder ran,
//! its [`RawFields`] go through [`normalize`], which converts the GPS
//! triples (applying the hemisphere sign once), fills in `"Unknown"` for
//! missing device fields and derives the map link.

use crate::error::LocatorError;
use crate::features::container::decode_container;
use crate::features::error::DecodeError;
use crate::features::fields::{GpsFields, RawFields};
use crate::features::rational::Axis;
use crate::features::tag_table::decode_tag_table;
use crate::structs::{CanonicalMetadata, UNKNOWN, map_link};
use chrono::NaiveDateTime;
use std::path::Path;

/// Which decoder handles a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// HEIF/HEIC: Exif embedded as an item in the container.
    Container,
    /// JPEG/PNG: Exif stored as a TIFF tag table in a segment or chunk.
    TagTable,
}

impl FileFormat {
    /// Classifies a file by its extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "heic" | "heif" => Some(Self::Container),
            "jpg" | "jpeg" | "png" => Some(Self::TagTable),
            _ => None,
        }
    }
}

/// The decoder pair used by [`decode_with`].
pub trait Decoders {
    fn container(&self, data: &[u8]) -> Result<RawFields, DecodeError>;
    fn tag_table(&self, data: &[u8], details: bool) -> Result<RawFields, DecodeError>;
}

/// The built-in decoders: direct field lookups for containers, the flat tag table otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifDecoders;

impl Decoders for ExifDecoders {
    fn container(&self, data: &[u8]) -> Result<RawFields, DecodeError> {
        decode_container(data)
    }

    fn tag_table(&self, data: &[u8], details: bool) -> Result<RawFields, DecodeError> {
        decode_tag_table(data, details)
    }
}

fn in_range(value: f64, axis: Axis) -> bool {
    value.is_finite() && value.abs() <= axis.limit()
}

/// Parses an EXIF datetime (`YYYY:MM:DD HH:MM:SS`, optionally with subseconds).
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Converts decoder output into the canonical record.
pub fn normalize(raw: RawFields) -> CanonicalMetadata {
    let (latitude, longitude) = match raw.gps {
        GpsFields::Gps {
            latitude,
            longitude,
        } => {
            let lat = latitude.to_decimal();
            let lon = longitude.to_decimal();
            if in_range(lat, Axis::Latitude) && in_range(lon, Axis::Longitude) {
                (Some(lat), Some(lon))
            } else {
                log::warn!("discarding out-of-range GPS coordinates ({lat}, {lon})");
                (None, None)
            }
        }
        GpsFields::NoGps => (None, None),
    };

    let device = raw.device;
    let captured_at = device.datetime.as_deref().and_then(parse_exif_datetime);
    let pixel_dimensions = device.pixel_width.zip(device.pixel_height);
    let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

    CanonicalMetadata {
        latitude,
        longitude,
        address: None,
        map_link: latitude.zip(longitude).map(|(lat, lon)| map_link(lat, lon)),
        make: or_unknown(device.make),
        model: or_unknown(device.model),
        software: or_unknown(device.software),
        datetime: or_unknown(device.datetime),
        captured_at,
        host_computer: device.host_computer,
        lens_make: device.lens_make,
        lens_model: device.lens_model,
        pixel_dimensions,
    }
}

/// Classifies, decodes and normalizes one image using the given decoders.
pub fn decode_with<D: Decoders>(
    decoders: &D,
    data: &[u8],
    filename: &str,
    details: bool,
) -> Result<CanonicalMetadata, LocatorError> {
    let format = FileFormat::from_filename(filename)
        .ok_or_else(|| LocatorError::UnsupportedFormat(filename.to_string()))?;
    log::debug!("decoding {filename} as {format:?}");

    let raw = match format {
        FileFormat::Container => decoders.container(data)?,
        FileFormat::TagTable => decoders.tag_table(data, details)?,
    };
    Ok(normalize(raw))
}

/// Extracts the canonical metadata of one image, reporting why it failed.
pub fn try_extract_metadata(
    data: &[u8],
    filename: &str,
    details: bool,
) -> Result<CanonicalMetadata, LocatorError> {
    decode_with(&ExifDecoders, data, filename, details)
}

/// Extracts the canonical metadata of one image.
///
/// Unsupported formats and unparseable metadata both yield `None`; the
/// reason is logged.
pub fn extract_metadata(data: &[u8], filename: &str) -> Option<CanonicalMetadata> {
    match try_extract_metadata(data, filename, true) {
        Ok(metadata) => Some(metadata),
        Err(LocatorError::UnsupportedFormat(name)) => {
            log::debug!("no decoder for {name}");
            None
        }
        Err(e) => {
            log::warn!("metadata unavailable for {filename}: {e}");
            None
        }
    }
}
