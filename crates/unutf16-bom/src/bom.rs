use std::fmt;

/// Number of bytes a UTF-16 byte-order mark occupies.
pub const BOM_LEN: usize = 2;

/// U+FEFF serialized little-endian.
pub const UTF16_LE_BOM: [u8; BOM_LEN] = [0xFF, 0xFE];

/// U+FEFF serialized big-endian.
pub const UTF16_BE_BOM: [u8; BOM_LEN] = [0xFE, 0xFF];

/// A recognized UTF-16 byte-order mark.
///
/// Only the two UTF-16 marks are recognized. Everything else, including
/// the UTF-8 mark `EF BB BF`, is treated as opaque bytes by the reader.
///
/// | Bytes   | Variant   |
/// |---------|-----------|
/// | `FF FE` | `Utf16Le` |
/// | `FE FF` | `Utf16Be` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bom {
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// UTF-16, big-endian code units.
    Utf16Be,
}

impl Bom {
    /// Match the leading bytes of a stream against the BOM table.
    ///
    /// Only the first [`BOM_LEN`] bytes are inspected; anything after
    /// them is ignored. A prefix shorter than [`BOM_LEN`] never matches.
    ///
    /// ```
    /// use unutf16_bom::Bom;
    ///
    /// assert_eq!(Bom::detect(&[0xFF, 0xFE, b'h', 0x00]), Some(Bom::Utf16Le));
    /// assert_eq!(Bom::detect(&[0xFE, 0xFF]), Some(Bom::Utf16Be));
    /// assert_eq!(Bom::detect(b"hello"), None);
    /// assert_eq!(Bom::detect(&[0xFF]), None);
    /// ```
    #[must_use]
    pub fn detect(prefix: &[u8]) -> Option<Self> {
        match prefix {
            [0xFF, 0xFE, ..] => Some(Self::Utf16Le),
            [0xFE, 0xFF, ..] => Some(Self::Utf16Be),
            _ => None,
        }
    }

    /// The mark as it appears on the wire.
    #[must_use]
    pub fn bytes(self) -> [u8; BOM_LEN] {
        match self {
            Self::Utf16Le => UTF16_LE_BOM,
            Self::Utf16Be => UTF16_BE_BOM,
        }
    }

    /// WHATWG name of the encoding this mark announces.
    #[must_use]
    pub fn encoding_name(self) -> &'static str {
        match self {
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
        }
    }
}

impl fmt::Display for Bom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding_name())
    }
}
