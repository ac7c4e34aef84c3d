//! The intermediate field set shared by both decoders.
//!
//! Decoders only report what they found. Defaults (`"Unknown"`, `N`/`E`
//! references already resolved into [`RawGpsField`]) and sign handling are
//! left to the normalizer so the two paths cannot drift apart.

use crate::features::rational::RawGpsField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpsFields {
    Gps {
        latitude: RawGpsField,
        longitude: RawGpsField,
    },
    #[default]
    NoGps,
}

impl GpsFields {
    /// Pairs two optional coordinates. Either one missing means no GPS.
    pub fn from_pair(latitude: Option<RawGpsField>, longitude: Option<RawGpsField>) -> Self {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self::Gps {
                latitude,
                longitude,
            },
            _ => Self::NoGps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceFields {
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    pub datetime: Option<String>,
    pub host_computer: Option<String>,
    pub lens_make: Option<String>,
    pub lens_model: Option<String>,
    pub pixel_width: Option<u32>,
    pub pixel_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFields {
    pub gps: GpsFields,
    pub device: DeviceFields,
}

/// Cleans an EXIF ASCII value: drops NUL padding and surrounding whitespace.
/// Empty results count as absent.
pub fn clean_ascii(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    (!text.is_empty()).then(|| text.to_string())
}
