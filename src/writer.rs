//! Der Serializer-Kern: Strukturereignisse rein, XML-Text raus.
//!
//! [`XmlWriter`] haelt das Pufferpaar, die Konfiguration und den offenen
//! Start-Tag zusammen und entscheidet pro Ereignis, was in die Puffer
//! und was zur Senke geht.

use std::io::Write;

use log::{debug, trace, warn};

use crate::buffer::{DualBuffer, OutputMode};
use crate::config::{NameChecks, WriterConfig};
use crate::encoding::Encoding;
use crate::escape::escape_text;
use crate::event::SaxEvent;
use crate::prolog;
use crate::{Error, Result};

/// UTF-16LE-Signatur; geht direkt an die Senke, nie durch die Puffer.
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// io::Error → Error Konvertierung.
fn io_err(e: std::io::Error) -> Error {
    Error::Io(e.to_string())
}

/// Incremental XML serializer driven by SAX-style structural events.
///
/// Ohne gebundene Senke sammelt sich die Ausgabe im Speicher und ist
/// ueber [`output`](Self::output) abholbar; mit Senke schieben Flushes
/// jeweils nur die noch nicht ausgelieferten Bytes nach.
pub struct XmlWriter {
    config: WriterConfig,
    encoding: Encoding,
    buffer: DualBuffer,
    /// Offener Start-Tag, dessen schliessende Klammer noch aussteht.
    element: Option<Box<str>>,
    dest: Option<Box<dyn Write>>,
    /// Bytes der Senken-Repraesentation, die schon ausgeliefert sind.
    dest_written: usize,
}

impl XmlWriter {
    /// Writer mit Default-Konfiguration, Ausgabe in den Speicher.
    pub fn new() -> Result<Self> {
        Self::with_config(WriterConfig::default())
    }

    /// Writer mit vorbereiteter Konfiguration.
    pub fn with_config(config: WriterConfig) -> Result<Self> {
        let encoding = Encoding::default();
        Ok(Self {
            config,
            encoding,
            buffer: DualBuffer::new(encoding)?,
            element: None,
            dest: None,
            dest_written: 0,
        })
    }

    // ============================================================
    // Properties
    // ============================================================

    /// Name der aktiven Zielkodierung.
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    /// Wechselt die Zielkodierung: validieren, flushen, neu aufbauen.
    ///
    /// Ein unbekannter Name schlaegt fehl, ohne Puffer, Kodierung oder
    /// Konfiguration anzutasten.
    pub fn set_encoding(&mut self, name: &str) -> Result<()> {
        let encoding = match Encoding::parse(name) {
            Ok(encoding) => encoding,
            Err(e) => {
                debug!("[saxw] Kodierung abgelehnt: {name:?}");
                return Err(e);
            }
        };
        self.flush_buffer()?;
        self.encoding = encoding;
        self.config.mark_changed();
        self.reset_buffer()
    }

    /// Deklarierte XML-Version.
    pub fn version(&self) -> &str { self.config.version() }
    /// Setzt die deklarierte Version; leer ist unzulaessig.
    pub fn set_version(&mut self, version: &str) -> Result<()> { self.config.set_version(version) }

    /// Byte-order mark fuer UTF-16-Senken.
    pub fn byte_order_mark(&self) -> bool { self.config.byte_order_mark() }
    /// Schaltet die BOM-Ausgabe.
    pub fn set_byte_order_mark(&mut self, value: bool) { self.config.set_byte_order_mark(value); }

    /// Character Data wird roh statt escaped geschrieben.
    pub fn disable_output_escaping(&self) -> bool { self.config.disable_output_escaping() }
    /// Schaltet das Escaping von Character Data.
    pub fn set_disable_output_escaping(&mut self, value: bool) { self.config.set_disable_output_escaping(value); }

    /// Indent-Flag; wird angenommen, wirkt aber nicht auf die Ausgabe.
    pub fn indent(&self) -> bool { self.config.indent() }
    /// Setzt das (wirkungslose) Indent-Flag.
    pub fn set_indent(&mut self, value: bool) { self.config.set_indent(value); }

    /// Unterdrueckung der XML-Deklaration.
    pub fn omit_xml_declaration(&self) -> bool { self.config.omit_xml_declaration() }
    /// Schaltet die XML-Deklaration (und damit auch die BOM).
    pub fn set_omit_xml_declaration(&mut self, value: bool) { self.config.set_omit_xml_declaration(value); }

    /// Standalone-Flag der Deklaration.
    pub fn standalone(&self) -> bool { self.config.standalone() }
    /// Setzt das Standalone-Flag.
    pub fn set_standalone(&mut self, value: bool) { self.config.set_standalone(value); }

    /// Aktiver Namens-Pruefmodus (nur bei der Konstruktion waehlbar).
    pub fn name_checks(&self) -> NameChecks { self.config.name_checks() }

    // ============================================================
    // Ausgabeziel
    // ============================================================

    /// Bindet eine Byte-Senke: Restbytes gehen noch an die alte
    /// Ausgabe, dann wird verworfen und neu gebunden.
    pub fn set_output(&mut self, dest: impl Write + 'static) -> Result<()> {
        self.flush_buffer()?;
        self.dest = Some(Box::new(dest));
        self.config.mark_changed();
        self.reset_buffer()
    }

    /// Loest die Senke und kehrt zur In-Memory-Ausgabe zurueck.
    pub fn detach_output(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.dest = None;
        self.config.mark_changed();
        self.reset_buffer()
    }

    /// Ob gerade eine Senke gebunden ist.
    pub fn has_output_sink(&self) -> bool {
        self.dest.is_some()
    }

    /// Der komplette gepufferte Text, wenn keine Senke gebunden ist.
    ///
    /// Mit Senke liegt die Ausgabe dort; dieser Aufruf schlaegt dann
    /// fehl, ohne zu flushen.
    pub fn output(&mut self) -> Result<String> {
        if self.dest.is_some() {
            return Err(Error::OutputRedirected);
        }
        self.flush_buffer()?;
        self.buffer.native_text()
    }

    /// Schliesst einen offenen Tag und liefert neue Bytes an die Senke.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_buffer()
    }

    // ============================================================
    // SAX-Ereignisse
    // ============================================================

    /// Beginn eines Dokuments.
    ///
    /// Eine seit der letzten Dokumentgrenze geaenderte Konfiguration
    /// verwirft hier die gepufferte Ausgabe; Setter selbst verwerfen
    /// nie sofort. Danach Deklaration und ggf. die BOM zur Senke.
    pub fn start_document(&mut self) -> Result<()> {
        if self.config.take_changed() {
            self.reset_buffer()?;
        }
        if self.config.omit_xml_declaration() {
            return Ok(());
        }
        prolog::write_declaration(&mut self.buffer, &self.config, self.encoding)?;
        if self.encoding == Encoding::Utf16 && self.config.byte_order_mark() {
            if let Some(dest) = self.dest.as_mut() {
                // Signatur umgeht die Pufferung; Schreibfehler werden
                // hier ignoriert
                let _ = dest.write(&UTF16LE_BOM);
            }
        }
        Ok(())
    }

    /// Ende eines Dokuments: Konfigurationsflag loeschen, dann flushen.
    pub fn end_document(&mut self) -> Result<()> {
        self.config.clear_changed();
        self.flush_buffer()
    }

    /// Oeffnet ein Element und schreibt seine Attribute in
    /// Aufrufreihenfolge.
    ///
    /// Die schliessende Klammer bleibt aufgeschoben, bis das naechste
    /// Ereignis zwischen `>` und `/>` entscheidet. Attributwerte werden
    /// immer escaped.
    pub fn start_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.check_name(name, "start_element")?;
        self.close_open_tag()?;
        self.element = Some(name.into());
        self.buffer.write("<", OutputMode::Both)?;
        self.buffer.write(name, OutputMode::Both)?;
        for (attr_name, attr_value) in attributes {
            self.buffer.write(" ", OutputMode::Both)?;
            self.buffer.write(attr_name, OutputMode::Both)?;
            self.buffer.write("=\"", OutputMode::Both)?;
            self.buffer.write(&escape_text(attr_value), OutputMode::Both)?;
            self.buffer.write("\"", OutputMode::Both)?;
        }
        Ok(())
    }

    /// Schliesst ein Element.
    ///
    /// Direkt nach dem passenden Start-Tag (gleicher Name, nichts
    /// dazwischen) faellt die Ausgabe zu `/>` zusammen, sonst wird
    /// `</name>` geschrieben. Ein offener, nicht passender Start-Tag
    /// bekommt hier kein implizites `>`; leere Namen schliessen nie
    /// selbst.
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.check_name(name, "end_element")?;
        if !name.is_empty() && self.element.as_deref() == Some(name) {
            self.buffer.write("/>", OutputMode::Both)?;
        } else {
            self.buffer.write("</", OutputMode::Both)?;
            self.buffer.write(name, OutputMode::Both)?;
            self.buffer.write(">", OutputMode::Both)?;
        }
        self.element = None;
        Ok(())
    }

    /// Character Data; schliesst zuerst einen offenen Start-Tag mit `>`.
    ///
    /// Leerer Text ist danach ein No-op. Escaped wird, solange die
    /// Konfiguration es nicht abschaltet.
    pub fn characters(&mut self, text: &str) -> Result<()> {
        self.close_open_tag()?;
        self.element = None;
        if text.is_empty() {
            return Ok(());
        }
        if self.config.disable_output_escaping() {
            self.buffer.write(text, OutputMode::Both)
        } else {
            self.buffer.write(&escape_text(text), OutputMode::Both)
        }
    }

    /// Wendet ein einzelnes Ereignis an.
    pub fn write_event(&mut self, event: &SaxEvent) -> Result<()> {
        match event {
            SaxEvent::StartDocument => self.start_document(),
            SaxEvent::EndDocument => self.end_document(),
            SaxEvent::StartElement { name, attributes } => {
                let attrs: Vec<(&str, &str)> = attributes
                    .iter()
                    .map(|attr| (&*attr.name, &*attr.value))
                    .collect();
                self.start_element(name, &attrs)
            }
            SaxEvent::EndElement { name } => self.end_element(name),
            SaxEvent::Characters { text } => self.characters(text),
        }
    }

    // ============================================================
    // Intern
    // ============================================================

    /// Leere Namen je nach Pruefmodus zurueckweisen.
    fn check_name(&self, name: &str, operation: &'static str) -> Result<()> {
        if name.is_empty() && self.config.name_checks() == NameChecks::Strict {
            return Err(Error::empty_qname(operation));
        }
        Ok(())
    }

    /// Haengt das aufgeschobene `>` eines offenen Start-Tags an,
    /// ohne den Tag-Zustand zu loeschen.
    fn close_open_tag(&mut self) -> Result<()> {
        if self.element.is_some() {
            self.buffer.write(">", OutputMode::Both)?;
        }
        Ok(())
    }

    /// Offenen Tag schliessen, dann neue Bytes zur Senke schieben.
    fn flush_buffer(&mut self) -> Result<()> {
        self.close_open_tag()?;
        self.element = None;
        self.write_to_sink()
    }

    /// Liefert den noch nicht ausgelieferten Teil der
    /// Senken-Repraesentation aus.
    ///
    /// `dest_written` darf die Puffergroesse nie uebersteigen; der Fall
    /// ist ein Buchfuehrungsfehler und nicht behebbar. Ein leeres Delta
    /// ist ein No-op, nur UTF-8 setzt trotzdem einen leeren
    /// Schreibaufruf ab.
    fn write_to_sink(&mut self) -> Result<()> {
        let Some(dest) = self.dest.as_mut() else {
            return Ok(());
        };
        let bytes = self.buffer.sink_bytes();
        if self.dest_written > bytes.len() {
            return Err(Error::FlushOverrun {
                offset: self.dest_written,
                written: bytes.len(),
            });
        }
        if self.dest_written == bytes.len() && self.encoding != Encoding::Utf8 {
            return Ok(());
        }
        let offset = self.dest_written;
        let delta = bytes.len() - offset;
        trace!("[saxw] Flush: {delta} Bytes ab Offset {offset}");
        match dest.write(&bytes[offset..]) {
            Ok(count) => {
                // Kurze Schreibvorgaenge lassen den Rest fuer den
                // naechsten Flush stehen
                self.dest_written += count;
                Ok(())
            }
            Err(e) => {
                warn!("[saxw] Senke verweigert Schreiben: {e}");
                Err(io_err(e))
            }
        }
    }

    /// Verwirft beide Puffer, einen noch offenen Start-Tag und die
    /// Flush-Buchfuehrung.
    fn reset_buffer(&mut self) -> Result<()> {
        self.buffer.reset(self.encoding)?;
        self.element = None;
        self.dest_written = 0;
        Ok(())
    }
}

impl Drop for XmlWriter {
    /// Restbytes gehen beim Zerstoeren noch zur Senke; Fehler sind
    /// hier nicht mehr zustellbar.
    fn drop(&mut self) {
        let _ = self.flush_buffer();
    }
}

/// Serialisiert eine komplette Ereignisfolge in einen String.
pub fn serialize_events(events: &[SaxEvent], config: WriterConfig) -> Result<String> {
    let mut writer = XmlWriter::with_config(config)?;
    for event in events {
        writer.write_event(event)?;
    }
    writer.output()
}
