//! Conversion of EXIF rationals and degree/minute/second triples to decimal degrees.
//!
//! Decoders hand over unsigned DMS triples together with their hemisphere
//! reference. The sign for southern and western coordinates is applied in
//! [`dms_to_decimal`] and nowhere else.

use serde::{Deserialize, Serialize};

/// An unsigned EXIF rational, as stored in the GPS IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    pub fn to_decimal(self) -> f64 {
        to_decimal(self)
    }
}

impl From<&exif::Rational> for Rational {
    fn from(r: &exif::Rational) -> Self {
        Self::new(r.num, r.denom)
    }
}

/// Converts a rational to `f64`. A zero denominator yields `0.0`.
pub fn to_decimal(rational: Rational) -> f64 {
    if rational.denom == 0 {
        return 0.0;
    }
    f64::from(rational.num) / f64::from(rational.denom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

/// Which coordinate a GPS field describes. Decides the default hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub const fn default_hemisphere(self) -> Hemisphere {
        match self {
            Self::Latitude => Hemisphere::North,
            Self::Longitude => Hemisphere::East,
        }
    }

    /// Largest magnitude a decimal coordinate on this axis may have.
    pub const fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

impl Hemisphere {
    /// Parses a GPS reference value such as `b"S\0"` or `"W"`.
    ///
    /// Only the first non-blank character counts. Anything unrecognised,
    /// or a reference that belongs to the other axis, falls back to the
    /// axis default.
    pub fn parse(raw: &[u8], axis: Axis) -> Self {
        let first = raw
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace() && *b != 0)
            .map(|b| b.to_ascii_uppercase());

        match (axis, first) {
            (Axis::Latitude, Some(b'N')) => Self::North,
            (Axis::Latitude, Some(b'S')) => Self::South,
            (Axis::Longitude, Some(b'E')) => Self::East,
            (Axis::Longitude, Some(b'W')) => Self::West,
            _ => axis.default_hemisphere(),
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

/// Composes `degrees + minutes/60 + seconds/3600`, negated for `S` and `W`.
pub fn dms_to_decimal(
    degrees: Rational,
    minutes: Rational,
    seconds: Rational,
    hemisphere: Hemisphere,
) -> f64 {
    let magnitude = to_decimal(seconds).mul_add(
        1.0 / 3600.0,
        to_decimal(minutes).mul_add(1.0 / 60.0, to_decimal(degrees)),
    );
    if hemisphere.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// One GPS coordinate as stored in EXIF: an unsigned DMS triple plus its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGpsField {
    pub dms: [Rational; 3],
    pub hemisphere: Hemisphere,
}

impl RawGpsField {
    /// Builds a field from decoded rationals. Returns `None` unless there
    /// are exactly three components.
    pub fn from_components(components: &[Rational], hemisphere: Hemisphere) -> Option<Self> {
        let dms: [Rational; 3] = components.try_into().ok()?;
        Some(Self { dms, hemisphere })
    }

    pub fn to_decimal(&self) -> f64 {
        let [d, m, s] = self.dms;
        dms_to_decimal(d, m, s, self.hemisphere)
    }
}
