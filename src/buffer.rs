//! Wachsende Ausgabepuffer fuer den Serializer.
//!
//! [`EncodedBuffer`] ist ein zero-initialisierter Bytepuffer mit freiem
//! Platz fuer einen Wide-Terminator hinter dem Cursor. [`DualBuffer`]
//! haelt den nativen UTF-16LE-Puffer und, nur fuer Multi-Byte-Ziele,
//! einen zweiten Puffer in der Zielkodierung.

use crate::encoding::Encoding;
use crate::{Error, Result};

/// Freiraum hinter dem Cursor: Platz fuer einen Wide-Terminator plus
/// Reserve, der nie beschrieben gezaehlt wird.
const TERMINATOR_SLACK: usize = 4;

/// Startkapazitaet eines frischen Puffers.
const DEFAULT_CAPACITY: usize = 0x2000;

// ============================================================
// EncodedBuffer
// ============================================================

/// Growable byte buffer that keeps `written <= capacity - 4` at all times.
///
/// Die Flaeche hinter `written` ist immer genullt, so dass ein
/// Wide-Terminator ohne Laengenbuchung dort liegen kann.
#[derive(Debug, Clone)]
pub struct EncodedBuffer {
    data: Vec<u8>,
    written: usize,
}

impl EncodedBuffer {
    /// Frischer Puffer mit Standardkapazitaet, komplett genullt.
    pub fn new() -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(DEFAULT_CAPACITY)
            .map_err(|_| Error::OutOfMemory { requested: DEFAULT_CAPACITY })?;
        data.resize(DEFAULT_CAPACITY, 0);
        Ok(Self { data, written: 0 })
    }

    /// Number of payload bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The payload written so far.
    pub fn as_written(&self) -> &[u8] {
        &self.data[..self.written]
    }

    /// Stellt sicher, dass `extra` Bytes plus Terminator-Reserve passen.
    ///
    /// Waechst auf `max(2 * kapazitaet, kapazitaet + extra)`; neuer Platz
    /// ist genullt. Fehlgeschlagene Allokation liefert
    /// [`Error::OutOfMemory`] ohne den Puffer anzutasten.
    fn ensure_capacity(&mut self, extra: usize) -> Result<()> {
        let needed = self.written + extra + TERMINATOR_SLACK;
        if needed <= self.data.len() {
            return Ok(());
        }
        let grown = usize::max(2 * self.data.len(), self.data.len() + extra);
        debug_assert!(grown >= needed);
        self.data
            .try_reserve_exact(grown - self.data.len())
            .map_err(|_| Error::OutOfMemory { requested: grown })?;
        self.data.resize(grown, 0);
        Ok(())
    }

    /// Haengt rohe Bytes an und rueckt den Cursor vor.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        self.data[self.written..self.written + bytes.len()].copy_from_slice(bytes);
        self.written += bytes.len();
        Ok(())
    }

    /// Haengt `text` als UTF-16LE-Code-Units an und legt dahinter einen
    /// Wide-Terminator ab, der nicht als geschrieben zaehlt.
    pub fn append_utf16(&mut self, text: &str) -> Result<()> {
        // Obergrenze: nie mehr Code-Units als UTF-8-Bytes
        self.ensure_capacity(text.len() * 2)?;
        for unit in text.encode_utf16() {
            let [lo, hi] = unit.to_le_bytes();
            self.data[self.written] = lo;
            self.data[self.written + 1] = hi;
            self.written += 2;
        }
        self.put_wide_terminator();
        Ok(())
    }

    /// Wide-NUL hinter dem Cursor, ohne `written` zu bewegen.
    fn put_wide_terminator(&mut self) {
        self.data[self.written] = 0;
        self.data[self.written + 1] = 0;
    }

    /// Verwirft den Inhalt und kehrt zur Standardkapazitaet zurueck.
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::new()?;
        Ok(())
    }
}

// ============================================================
// DualBuffer
// ============================================================

/// Which of the two buffers a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Only the native UTF-16 buffer.
    Native,
    /// Only the encoded buffer; silently dropped when none exists.
    Encoded,
    /// Both buffers.
    Both,
}

/// Paired output buffers of one writer instance.
///
/// Der native Puffer existiert immer und traegt UTF-16LE; der kodierte
/// Puffer existiert nur, wenn die Zielkodierung einen braucht (UTF-8).
/// Die Kodierung ist pro Instanz fix; ein Wechsel ersetzt die Instanz.
#[derive(Debug, Clone)]
pub struct DualBuffer {
    native: EncodedBuffer,
    encoded: Option<EncodedBuffer>,
}

impl DualBuffer {
    /// Leeres Pufferpaar fuer die gegebene Zielkodierung.
    pub fn new(encoding: Encoding) -> Result<Self> {
        let encoded = if encoding.uses_encoded_buffer() {
            Some(EncodedBuffer::new()?)
        } else {
            None
        };
        Ok(Self { native: EncodedBuffer::new()?, encoded })
    }

    /// Schreibt `text` in die von `mode` gewaehlten Puffer.
    ///
    /// Leerer Text ist ein No-op. `Encoded` ohne kodierten Puffer ebenso.
    pub fn write(&mut self, text: &str, mode: OutputMode) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if matches!(mode, OutputMode::Encoded | OutputMode::Both) {
            if let Some(encoded) = self.encoded.as_mut() {
                encoded.append(text.as_bytes())?;
            }
        }
        if matches!(mode, OutputMode::Native | OutputMode::Both) {
            self.native.append_utf16(text)?;
        }
        Ok(())
    }

    /// Bytes, die an eine Senke gehen: der kodierte Puffer, falls
    /// vorhanden, sonst der native.
    pub fn sink_bytes(&self) -> &[u8] {
        match &self.encoded {
            Some(encoded) => encoded.as_written(),
            None => self.native.as_written(),
        }
    }

    /// Rohinhalt des nativen UTF-16LE-Puffers.
    pub fn native_bytes(&self) -> &[u8] {
        self.native.as_written()
    }

    /// Decodes the native buffer back into a string.
    pub fn native_text(&self) -> Result<String> {
        let units: Vec<u16> = self
            .native
            .as_written()
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units)
            .map_err(|_| Error::internal("native buffer is not valid UTF-16"))
    }

    /// Verwirft beide Puffer und richtet sie fuer `encoding` neu ein.
    pub fn reset(&mut self, encoding: Encoding) -> Result<()> {
        *self = Self::new(encoding)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frischer_puffer_ist_genullt() {
        let buf = EncodedBuffer::new().unwrap();
        assert_eq!(buf.written(), 0);
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
        assert!(buf.as_written().is_empty());
        assert_eq!(buf.data[..4], [0, 0, 0, 0]);
    }

    #[test]
    fn append_rueckt_cursor_vor() {
        let mut buf = EncodedBuffer::new().unwrap();
        buf.append(b"abc").unwrap();
        buf.append(b"de").unwrap();
        assert_eq!(buf.as_written(), b"abcde");
        assert_eq!(buf.written(), 5);
    }

    #[test]
    fn invariante_haelt_unter_wachstum() {
        let mut buf = EncodedBuffer::new().unwrap();
        let chunk = [0x41_u8; 1000];
        for _ in 0..40 {
            buf.append(&chunk).unwrap();
            assert!(buf.written() <= buf.capacity() - TERMINATOR_SLACK);
        }
        assert_eq!(buf.written(), 40_000);
    }

    #[test]
    fn wachstum_verdoppelt_mindestens() {
        let mut buf = EncodedBuffer::new().unwrap();
        buf.append(&[0x20; DEFAULT_CAPACITY - TERMINATOR_SLACK]).unwrap();
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
        // Ein Byte mehr kippt in die Verdopplung
        buf.append(&[0x21]).unwrap();
        assert_eq!(buf.capacity(), 2 * DEFAULT_CAPACITY);
    }

    #[test]
    fn wachstum_nimmt_groesseren_bedarf() {
        let mut buf = EncodedBuffer::new().unwrap();
        let big = vec![0x42_u8; 3 * DEFAULT_CAPACITY];
        buf.append(&big).unwrap();
        // max(2 * 0x2000, 0x2000 + 3 * 0x2000) = 4 * 0x2000
        assert_eq!(buf.capacity(), 4 * DEFAULT_CAPACITY);
        assert_eq!(buf.as_written(), &big[..]);
    }

    #[test]
    fn utf16_anhang_mit_terminator() {
        let mut buf = EncodedBuffer::new().unwrap();
        buf.append_utf16("Ab").unwrap();
        assert_eq!(buf.as_written(), &[0x41, 0x00, 0x62, 0x00]);
        // Terminator liegt hinter dem Cursor, ungezaehlt
        assert_eq!(buf.written(), 4);
        assert_eq!(buf.data[4..6], [0, 0]);
    }

    #[test]
    fn utf16_surrogatpaare() {
        let mut buf = EncodedBuffer::new().unwrap();
        buf.append_utf16("\u{1D11E}").unwrap();
        assert_eq!(buf.as_written(), &[0x34, 0xD8, 0x1E, 0xDD]);
    }

    #[test]
    fn reset_stellt_standardkapazitaet_her() {
        let mut buf = EncodedBuffer::new().unwrap();
        buf.append(&[0x55; 5 * DEFAULT_CAPACITY]).unwrap();
        buf.reset().unwrap();
        assert_eq!(buf.written(), 0);
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn dual_utf16_hat_keinen_kodierten_puffer() {
        let mut dual = DualBuffer::new(Encoding::Utf16).unwrap();
        dual.write("hi", OutputMode::Both).unwrap();
        // Senke sieht den nativen Puffer
        assert_eq!(dual.sink_bytes(), &[0x68, 0x00, 0x69, 0x00]);
        assert_eq!(dual.native_text().unwrap(), "hi");
    }

    #[test]
    fn dual_utf8_fuellt_beide() {
        let mut dual = DualBuffer::new(Encoding::Utf8).unwrap();
        dual.write("hi", OutputMode::Both).unwrap();
        assert_eq!(dual.sink_bytes(), b"hi");
        assert_eq!(dual.native_bytes(), &[0x68, 0x00, 0x69, 0x00]);
        assert_eq!(dual.native_text().unwrap(), "hi");
    }

    #[test]
    fn moduswahl_trennt_puffer() {
        let mut dual = DualBuffer::new(Encoding::Utf8).unwrap();
        dual.write("nur-nativ", OutputMode::Native).unwrap();
        dual.write("nur-kodiert", OutputMode::Encoded).unwrap();
        assert_eq!(dual.sink_bytes(), b"nur-kodiert");
        assert_eq!(dual.native_text().unwrap(), "nur-nativ");
    }

    #[test]
    fn encoded_ohne_puffer_ist_noop() {
        let mut dual = DualBuffer::new(Encoding::Utf16).unwrap();
        dual.write("weg", OutputMode::Encoded).unwrap();
        assert!(dual.sink_bytes().is_empty());
        assert!(dual.native_bytes().is_empty());
    }

    #[test]
    fn leerer_text_ist_noop() {
        let mut dual = DualBuffer::new(Encoding::Utf8).unwrap();
        dual.write("", OutputMode::Both).unwrap();
        assert!(dual.sink_bytes().is_empty());
        assert!(dual.native_bytes().is_empty());
    }

    #[test]
    fn reset_wechselt_kodierung() {
        let mut dual = DualBuffer::new(Encoding::Utf16).unwrap();
        dual.write("alt", OutputMode::Both).unwrap();
        dual.reset(Encoding::Utf8).unwrap();
        assert!(dual.native_bytes().is_empty());
        dual.write("neu", OutputMode::Both).unwrap();
        assert_eq!(dual.sink_bytes(), b"neu");
    }
}
