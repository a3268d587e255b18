//! Ziel-Encodings der serialisierten Ausgabe.
//!
//! Nur UTF-8 und UTF-16 (little-endian) sind zulaessig; alle anderen Namen
//! werden vor jeder Zustandsaenderung abgelehnt. Der Name wird
//! case-insensitiv verglichen (XML 1.0 4.3.3 erlaubt beide Schreibweisen).

use crate::{Error, Result};

/// Target text encoding of the serialized byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8; writes additionally fill the encoded byte buffer.
    Utf8,
    /// UTF-16 little-endian; the native buffer is the byte stream, no
    /// conversion step exists.
    Utf16,
}

impl Encoding {
    /// Parses an encoding name, case-insensitive.
    ///
    /// Alles ausser `UTF-8`/`UTF-16` liefert [`Error::UnsupportedEncoding`].
    pub fn parse(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("UTF-8") {
            Ok(Self::Utf8)
        } else if name.eq_ignore_ascii_case("UTF-16") {
            Ok(Self::Utf16)
        } else {
            Err(Error::UnsupportedEncoding(name.to_string()))
        }
    }

    /// Canonical name, as written into the encoding declaration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
        }
    }

    /// True when the target needs the separate encoded byte buffer.
    ///
    /// UTF-16 ist die native Darstellung selbst ("keine Konvertierung");
    /// nur Multi-Byte-Ziele fuehren den zweiten Puffer.
    pub(crate) fn uses_encoded_buffer(self) -> bool {
        matches!(self, Self::Utf8)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf16
    }
}
