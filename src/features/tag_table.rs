//! Flat tag-table view of the Exif metadata in JPEG, PNG and TIFF streams.
//!
//! kamadak-exif parses the TIFF structure; every field is then stored under
//! a group-prefixed name:
//!
//! | Directory | Prefix | Example |
//! |---|---|---|
//! | IFD0 | `Image` | `Image Make` |
//! | IFD1 | `Thumbnail` | `Thumbnail Compression` |
//! | Exif IFD | `EXIF` | `EXIF LensModel` |
//! | GPS IFD | `GPS` | `GPS GPSLatitude` |
//! | Interoperability IFD | `Interoperability` | `Interoperability InteroperabilityIndex` |
//!
//! With `details` enabled, tags without a known name are kept as
//! `"<prefix> Tag 0xNNNN"` and the maker note is kept as raw bytes.

use crate::features::container::{HOST_COMPUTER, read_exif};
use crate::features::error::DecodeError;
use crate::features::fields::{DeviceFields, GpsFields, RawFields, clean_ascii};
use crate::features::rational::{Axis, Hemisphere, Rational, RawGpsField};
use exif::{Context, Exif, Field, In, Tag, Value};
use std::collections::BTreeMap;

/// Names for tags kamadak-exif parses but does not name.
const EXTRA_NAMES: &[(Tag, &str)] = &[(HOST_COMPUTER, "HostComputer")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Image,
    Thumbnail,
    Exif,
    Gps,
    Interop,
}

impl Group {
    fn of(field: &Field) -> Option<Self> {
        if field.ifd_num == In::THUMBNAIL {
            return Some(Self::Thumbnail);
        }
        if field.ifd_num != In::PRIMARY {
            return None;
        }
        match field.tag.context() {
            Context::Tiff => Some(Self::Image),
            Context::Exif => Some(Self::Exif),
            Context::Gps => Some(Self::Gps),
            Context::Interop => Some(Self::Interop),
            _ => None,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Thumbnail => "Thumbnail",
            Self::Exif => "EXIF",
            Self::Gps => "GPS",
            Self::Interop => "Interoperability",
        }
    }
}

fn tag_name(tag: Tag) -> Option<String> {
    if tag.description().is_some() {
        return Some(tag.to_string());
    }
    EXTRA_NAMES
        .iter()
        .find_map(|&(known, name)| (known == tag).then(|| name.to_string()))
}

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    Undefined(Vec<u8>),
    /// Signed and floating-point values, rendered as text.
    Other(String),
}

impl TagValue {
    fn from_field(field: &Field) -> Self {
        match &field.value {
            Value::Byte(v) => Self::Byte(v.clone()),
            Value::Ascii(v) => Self::Ascii(
                v.first()
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .unwrap_or_default(),
            ),
            Value::Short(v) => Self::Short(v.clone()),
            Value::Long(v) => Self::Long(v.clone()),
            Value::Rational(v) => Self::Rational(v.iter().map(Rational::from).collect()),
            Value::Undefined(bytes, _) => Self::Undefined(bytes.clone()),
            _ => Self::Other(field.display_value().to_string()),
        }
    }

    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            Self::Rational(values) => Some(values),
            _ => None,
        }
    }

    /// The value as cleaned text. Byte and undefined values are accepted
    /// too, since some writers store references that way.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Ascii(s) => clean_ascii(s.as_bytes()),
            Self::Byte(bytes) | Self::Undefined(bytes) => clean_ascii(bytes),
            _ => None,
        }
    }

    pub fn first_uint(&self) -> Option<u32> {
        match self {
            Self::Byte(v) => v.first().map(|&x| u32::from(x)),
            Self::Short(v) => v.first().map(|&x| u32::from(x)),
            Self::Long(v) => v.first().copied(),
            _ => None,
        }
    }
}

/// Tags keyed by their group-prefixed name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    tags: BTreeMap<String, TagValue>,
}

impl TagTable {
    /// Flattens parsed Exif directories into named entries.
    pub fn from_exif(exif: &Exif, details: bool) -> Self {
        let mut table = Self::default();
        for field in exif.fields() {
            let Some(group) = Group::of(field) else {
                continue;
            };
            if field.tag == Tag::MakerNote && !details {
                continue;
            }
            let name = match tag_name(field.tag) {
                Some(name) => format!("{} {name}", group.prefix()),
                None if details => format!("{} Tag 0x{:04X}", group.prefix(), field.tag.number()),
                None => continue,
            };
            // The first occurrence wins, matching directory order.
            table
                .tags
                .entry(name)
                .or_insert_with(|| TagValue::from_field(field));
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(TagValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Reads the full tag table of an image byte stream.
///
/// A stream without Exif yields an empty table.
pub fn read_tag_table(data: &[u8], details: bool) -> Result<TagTable, DecodeError> {
    Ok(read_exif(data)?
        .map(|exif| TagTable::from_exif(&exif, details))
        .unwrap_or_default())
}

fn gps_field(table: &TagTable, coord: &str, reference: &str, axis: Axis) -> Option<RawGpsField> {
    let components = table.get(coord)?.as_rationals()?;
    let hemisphere = table
        .text(reference)
        .map_or(axis.default_hemisphere(), |r| {
            Hemisphere::parse(r.as_bytes(), axis)
        });
    RawGpsField::from_components(components, hemisphere)
}

/// Maps a tag table onto the shared field set.
pub fn fields_from_table(table: &TagTable) -> RawFields {
    let gps = GpsFields::from_pair(
        gps_field(table, "GPS GPSLatitude", "GPS GPSLatitudeRef", Axis::Latitude),
        gps_field(table, "GPS GPSLongitude", "GPS GPSLongitudeRef", Axis::Longitude),
    );
    let uint = |name: &str| table.get(name).and_then(TagValue::first_uint);

    RawFields {
        gps,
        device: DeviceFields {
            make: table.text("Image Make"),
            model: table.text("Image Model"),
            software: table.text("Image Software"),
            datetime: table.text("Image DateTime"),
            host_computer: table.text("Image HostComputer"),
            lens_make: table.text("EXIF LensMake"),
            lens_model: table.text("EXIF LensModel"),
            pixel_width: uint("EXIF PixelXDimension"),
            pixel_height: uint("EXIF PixelYDimension"),
        },
    }
}

/// Decodes the metadata of a JPEG, PNG or TIFF byte stream.
pub fn decode_tag_table(data: &[u8], details: bool) -> Result<RawFields, DecodeError> {
    let table = read_tag_table(data, details)?;
    log::debug!("tag table holds {} entries", table.len());
    Ok(fields_from_table(&table))
}
