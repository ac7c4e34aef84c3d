//! Synthetic image fixtures for unit tests.
//!
//! Builds minimal TIFF metadata blocks and wraps them in JPEG, PNG or HEIF
//! containers, so decoder tests do not depend on sample photos.

/// EXIF field types used by the fixtures.
#[derive(Debug, Clone)]
pub enum FixtureValue {
    Ascii(&'static str),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    Undefined(Vec<u8>),
}

impl FixtureValue {
    fn type_id(&self) -> u16 {
        match self {
            Self::Ascii(_) => 2,
            Self::Short(_) => 3,
            Self::Long(_) => 4,
            Self::Rational(_) => 5,
            Self::Undefined(_) => 7,
        }
    }

    fn count(&self) -> u32 {
        let n = match self {
            Self::Ascii(s) => s.len() + 1,
            Self::Short(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Rational(v) => v.len(),
            Self::Undefined(v) => v.len(),
        };
        n as u32
    }

    fn bytes(&self, big_endian: bool) -> Vec<u8> {
        let u16b = |v: u16| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        let u32b = |v: u32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        match self {
            Self::Ascii(s) => {
                let mut out = s.as_bytes().to_vec();
                out.push(0);
                out
            }
            Self::Short(v) => v.iter().flat_map(|x| u16b(*x)).collect(),
            Self::Long(v) => v.iter().flat_map(|x| u32b(*x)).collect(),
            Self::Rational(v) => v
                .iter()
                .flat_map(|(n, d)| u32b(*n).into_iter().chain(u32b(*d)))
                .collect(),
            Self::Undefined(v) => v.clone(),
        }
    }
}

/// Builds a TIFF block with IFD0 plus optional Exif and GPS sub-directories.
#[derive(Debug, Clone, Default)]
pub struct TiffFixture {
    pub big_endian: bool,
    pub ifd0: Vec<(u16, FixtureValue)>,
    pub exif: Vec<(u16, FixtureValue)>,
    pub gps: Vec<(u16, FixtureValue)>,
}

const EXIF_POINTER: u16 = 0x8769;
const GPS_POINTER: u16 = 0x8825;

impl TiffFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn ifd0(mut self, tag: u16, value: FixtureValue) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub fn exif(mut self, tag: u16, value: FixtureValue) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub fn gps(mut self, tag: u16, value: FixtureValue) -> Self {
        self.gps.push((tag, value));
        self
    }

    /// A block describing a phone photo taken at 40°26'46"N 79°58'56"W.
    pub fn pittsburgh() -> Self {
        Self::new()
            .ifd0(0x010F, FixtureValue::Ascii("Apple"))
            .ifd0(0x0110, FixtureValue::Ascii("iPhone 13 Pro"))
            .ifd0(0x0131, FixtureValue::Ascii("17.1"))
            .ifd0(0x0132, FixtureValue::Ascii("2023:10:05 14:22:01"))
            .gps(0x0001, FixtureValue::Ascii("N"))
            .gps(0x0002, FixtureValue::Rational(vec![(40, 1), (26, 1), (46, 1)]))
            .gps(0x0003, FixtureValue::Ascii("W"))
            .gps(0x0004, FixtureValue::Rational(vec![(79, 1), (58, 1), (56, 1)]))
    }

    pub fn build(&self) -> Vec<u8> {
        let be = self.big_endian;
        let u16b = |v: u16| if be { v.to_be_bytes() } else { v.to_le_bytes() };
        let u32b = |v: u32| if be { v.to_be_bytes() } else { v.to_le_bytes() };

        let mut ifd0 = self.ifd0.clone();
        if !self.exif.is_empty() {
            ifd0.push((EXIF_POINTER, FixtureValue::Long(vec![0])));
        }
        if !self.gps.is_empty() {
            ifd0.push((GPS_POINTER, FixtureValue::Long(vec![0])));
        }

        let mut dirs = vec![ifd0];
        if !self.exif.is_empty() {
            dirs.push(self.exif.clone());
        }
        if !self.gps.is_empty() {
            dirs.push(self.gps.clone());
        }
        for dir in &mut dirs {
            dir.sort_by_key(|(tag, _)| *tag);
        }

        // Offsets of every directory, each followed by its out-of-line data.
        let mut offsets = Vec::with_capacity(dirs.len());
        let mut cursor = 8usize;
        for dir in &dirs {
            offsets.push(cursor);
            cursor += dir_len(dir, be);
        }
        let exif_offset = (!self.exif.is_empty()).then(|| offsets[1]);
        let gps_offset = (!self.gps.is_empty()).then(|| offsets[offsets.len() - 1]);

        let mut out = Vec::with_capacity(cursor);
        out.extend_from_slice(if be { b"MM" } else { b"II" });
        out.extend_from_slice(&u16b(42));
        out.extend_from_slice(&u32b(8));

        for (dir, &start) in dirs.iter().zip(&offsets) {
            let mut data_cursor = start + 2 + 12 * dir.len() + 4;
            let mut data = Vec::new();
            out.extend_from_slice(&u16b(dir.len() as u16));
            for (tag, value) in dir {
                let value = match *tag {
                    EXIF_POINTER if start == offsets[0] => {
                        FixtureValue::Long(vec![exif_offset.unwrap_or(0) as u32])
                    }
                    GPS_POINTER if start == offsets[0] => {
                        FixtureValue::Long(vec![gps_offset.unwrap_or(0) as u32])
                    }
                    _ => value.clone(),
                };
                let bytes = value.bytes(be);
                out.extend_from_slice(&u16b(*tag));
                out.extend_from_slice(&u16b(value.type_id()));
                out.extend_from_slice(&u32b(value.count()));
                if bytes.len() <= 4 {
                    let mut inline = bytes.clone();
                    inline.resize(4, 0);
                    out.extend_from_slice(&inline);
                } else {
                    out.extend_from_slice(&u32b(data_cursor as u32));
                    data_cursor += padded(bytes.len());
                    data.extend_from_slice(&bytes);
                    if bytes.len() % 2 == 1 {
                        data.push(0);
                    }
                }
            }
            out.extend_from_slice(&u32b(0));
            out.extend_from_slice(&data);
        }
        out
    }
}

fn padded(len: usize) -> usize {
    len + len % 2
}

fn dir_len(dir: &[(u16, FixtureValue)], big_endian: bool) -> usize {
    let data: usize = dir
        .iter()
        .map(|(_, v)| v.bytes(big_endian).len())
        .filter(|len| *len > 4)
        .map(padded)
        .sum();
    2 + 12 * dir.len() + 4 + data
}

/// Wraps a TIFF block in a minimal JPEG: SOI, APP1 `Exif`, EOI.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    // An unrelated APP0 segment first, as real cameras write.
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// A JPEG with no metadata segment at all.
pub fn bare_jpeg() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Wraps a TIFF block in a PNG `eXIf` chunk. CRCs are left zeroed.
pub fn png_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    let mut chunk = |kind: &[u8; 4], data: &[u8]| {
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&[0, 0, 0, 0]);
    };
    chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
    chunk(b"eXIf", tiff);
    chunk(b"IEND", &[]);
    out
}

fn bmff_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out
}

fn full_box(kind: &[u8; 4], version: u8, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![version, 0, 0, 0];
    payload.extend_from_slice(body);
    bmff_box(kind, &payload)
}

/// A minimal HEIF file whose single item of type `item_type` is stored in
/// `mdat`, located through `iloc` by absolute file offset.
fn heif(item_type: &[u8; 4], item_data: &[u8]) -> Vec<u8> {
    let ftyp = bmff_box(b"ftyp", b"heic\0\0\0\0mif1heic");

    let meta = |data_offset: u32| {
        let mut hdlr = vec![0; 4];
        hdlr.extend_from_slice(b"pict");
        hdlr.extend_from_slice(&[0; 12]);
        hdlr.push(0);

        let mut infe = 1u16.to_be_bytes().to_vec();
        infe.extend_from_slice(&0u16.to_be_bytes());
        infe.extend_from_slice(item_type);
        infe.push(0);
        let mut iinf = 1u16.to_be_bytes().to_vec();
        iinf.extend_from_slice(&full_box(b"infe", 2, &infe));

        // offset_size 4, length_size 4, base_offset_size 0
        let mut iloc = vec![0x44, 0x00];
        iloc.extend_from_slice(&1u16.to_be_bytes());
        iloc.extend_from_slice(&1u16.to_be_bytes());
        iloc.extend_from_slice(&0u16.to_be_bytes());
        iloc.extend_from_slice(&1u16.to_be_bytes());
        iloc.extend_from_slice(&data_offset.to_be_bytes());
        iloc.extend_from_slice(&(item_data.len() as u32).to_be_bytes());

        let mut children = full_box(b"hdlr", 0, &hdlr);
        children.extend_from_slice(&full_box(b"iinf", 0, &iinf));
        children.extend_from_slice(&full_box(b"iloc", 0, &iloc));
        full_box(b"meta", 0, &children)
    };

    let data_offset = ftyp.len() + meta(0).len() + 8;
    let mut out = ftyp;
    out.extend_from_slice(&meta(data_offset as u32));
    out.extend_from_slice(&bmff_box(b"mdat", item_data));
    out
}

/// Wraps a TIFF block as the `Exif` item of a HEIF container.
pub fn heif_with_exif(tiff: &[u8]) -> Vec<u8> {
    // The item starts with the offset of the TIFF header within it.
    let mut item = 0u32.to_be_bytes().to_vec();
    item.extend_from_slice(tiff);
    heif(b"Exif", &item)
}

/// A HEIF container holding only an image item.
pub fn heif_without_exif() -> Vec<u8> {
    heif(b"hvc1", &[0, 0, 0, 4, 0x26, 0x01, 0xAF, 0x00])
}
