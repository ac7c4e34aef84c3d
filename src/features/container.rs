//! Decoder for Exif blocks embedded in HEIF/HEIC containers, and the
//! tolerant Exif reader shared with the tag-table decoder.
//!
//! The container is handed to kamadak-exif, which locates the Exif item
//! and parses it into nested IFDs. GPS fields come from the GPS IFD,
//! device fields from the primary image directory.

use crate::features::error::DecodeError;
use crate::features::fields::{DeviceFields, GpsFields, RawFields, clean_ascii};
use crate::features::rational::{Axis, Hemisphere, Rational, RawGpsField};
use exif::{Context, Exif, In, Tag, Value};
use std::io::Cursor;

/// Not in kamadak-exif's named tag list.
pub const HOST_COMPUTER: Tag = Tag(Context::Tiff, 0x013C);

/// Parses the Exif block of any stream kamadak-exif recognizes.
///
/// `Ok(None)` means the container was recognized but carries no Exif.
/// Damaged directories are logged and the fields read before the damage
/// are kept; an unreadable container or TIFF header is an error.
pub fn read_exif(data: &[u8]) -> Result<Option<Exif>, DecodeError> {
    let mut reader = exif::Reader::new();
    reader.continue_on_error(true);

    match reader.read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => Ok(Some(exif)),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            for e in &errors {
                log::warn!("ignoring damaged Exif data: {e}");
            }
            Ok(Some(exif))
        }
        Err(exif::Error::NotFound(container)) => {
            log::debug!("{container} container carries no Exif block");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(values) => values.first().and_then(|v| clean_ascii(v)),
        _ => None,
    }
}

fn uint(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)?.value.get_uint(0)
}

fn gps_field(exif: &Exif, coord: Tag, reference: Tag, axis: Axis) -> Option<RawGpsField> {
    let Value::Rational(ref components) = exif.get_field(coord, In::PRIMARY)?.value else {
        return None;
    };
    let components: Vec<Rational> = components.iter().map(Rational::from).collect();
    let hemisphere = exif
        .get_field(reference, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Ascii(values) => values.first().map(|v| Hemisphere::parse(v, axis)),
            _ => None,
        })
        .unwrap_or(axis.default_hemisphere());
    RawGpsField::from_components(&components, hemisphere)
}

/// Maps parsed Exif directories onto the shared field set.
pub fn fields_from_exif(exif: &Exif) -> RawFields {
    let gps = GpsFields::from_pair(
        gps_field(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, Axis::Latitude),
        gps_field(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, Axis::Longitude),
    );

    RawFields {
        gps,
        device: DeviceFields {
            make: ascii(exif, Tag::Make),
            model: ascii(exif, Tag::Model),
            software: ascii(exif, Tag::Software),
            datetime: ascii(exif, Tag::DateTime),
            host_computer: ascii(exif, HOST_COMPUTER),
            lens_make: ascii(exif, Tag::LensMake),
            lens_model: ascii(exif, Tag::LensModel),
            pixel_width: uint(exif, Tag::PixelXDimension),
            pixel_height: uint(exif, Tag::PixelYDimension),
        },
    }
}

/// Decodes the Exif block embedded in an image container.
///
/// A container without any Exif item is not an error and yields empty
/// fields.
pub fn decode_container(data: &[u8]) -> Result<RawFields, DecodeError> {
    Ok(read_exif(data)?
        .map(|exif| fields_from_exif(&exif))
        .unwrap_or_default())
}
