//! Writer-Konfiguration: die Property-Flaeche des Serializers.
//!
//! Jede nachtraegliche Mutation (auch von Encoding/Ziel, siehe
//! [`XmlWriter`](crate::XmlWriter)) setzt das interne `changed`-Flag. Der
//! Writer konsumiert es genau einmal pro `start_document` und verwirft dann
//! die gepufferte Ausgabe; Setter selbst verwerfen nie sofort.

use crate::{Error, Result};

/// How qualified names in `start_element`/`end_element` are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameChecks {
    /// Empty qualified names are rejected with
    /// [`Error::EmptyQName`](crate::Error::EmptyQName).
    Strict,
    /// Empty qualified names are written through as given.
    ///
    /// Ein leerer Name nimmt nie am Self-Closing-Vergleich teil; das
    /// schliessende Tag wird immer ausgeschrieben.
    Lenient,
}

/// Configuration properties of the XML writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    pub(crate) byte_order_mark: bool,
    pub(crate) disable_output_escaping: bool,
    pub(crate) indent: bool,
    pub(crate) omit_xml_declaration: bool,
    pub(crate) standalone: bool,
    pub(crate) version: String,
    pub(crate) name_checks: NameChecks,
    /// Seit der letzten Dokumentgrenze geaendert.
    pub(crate) changed: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            byte_order_mark: true,
            disable_output_escaping: false,
            indent: false,
            omit_xml_declaration: false,
            standalone: false,
            version: "1.0".to_string(),
            name_checks: NameChecks::Strict,
            changed: false,
        }
    }
}

impl WriterConfig {
    /// Konfiguration mit Default-Werten.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Getter ---

    /// Byte-order mark for UTF-16 sink output (default: on).
    pub fn byte_order_mark(&self) -> bool { self.byte_order_mark }
    /// Character data is written raw instead of escaped.
    pub fn disable_output_escaping(&self) -> bool { self.disable_output_escaping }
    /// Indentation flag; accepted but has no effect on output.
    pub fn indent(&self) -> bool { self.indent }
    /// Suppress the `<?xml ...?>` declaration (and with it the BOM).
    pub fn omit_xml_declaration(&self) -> bool { self.omit_xml_declaration }
    /// Value of the `standalone` pseudo-attribute in the declaration.
    pub fn standalone(&self) -> bool { self.standalone }
    /// Declared XML version (default "1.0").
    pub fn version(&self) -> &str { &self.version }
    /// Active qualified-name validation mode.
    pub fn name_checks(&self) -> NameChecks { self.name_checks }

    // --- Builder-Setter (Fluent API, fuer die Konstruktion) ---

    /// Setzt das BOM-Flag.
    pub fn with_byte_order_mark(mut self, value: bool) -> Self { self.byte_order_mark = value; self }
    /// Schaltet das Escaping von Character Data ab.
    pub fn with_disable_output_escaping(mut self, value: bool) -> Self { self.disable_output_escaping = value; self }
    /// Setzt das (wirkungslose) Indent-Flag.
    pub fn with_indent(mut self, value: bool) -> Self { self.indent = value; self }
    /// Unterdrueckt die XML-Deklaration.
    pub fn with_omit_xml_declaration(mut self, value: bool) -> Self { self.omit_xml_declaration = value; self }
    /// Setzt das Standalone-Flag.
    pub fn with_standalone(mut self, value: bool) -> Self { self.standalone = value; self }
    /// Setzt den Namens-Pruefmodus.
    pub fn with_name_checks(mut self, mode: NameChecks) -> Self { self.name_checks = mode; self }

    // --- Mutable Setter (markieren `changed`) ---

    /// Setzt das BOM-Flag.
    pub fn set_byte_order_mark(&mut self, value: bool) { self.byte_order_mark = value; self.changed = true; }
    /// Schaltet das Escaping von Character Data ab oder an.
    pub fn set_disable_output_escaping(&mut self, value: bool) { self.disable_output_escaping = value; self.changed = true; }
    /// Setzt das (wirkungslose) Indent-Flag.
    pub fn set_indent(&mut self, value: bool) { self.indent = value; self.changed = true; }
    /// Unterdrueckt die XML-Deklaration oder stellt sie wieder her.
    pub fn set_omit_xml_declaration(&mut self, value: bool) { self.omit_xml_declaration = value; self.changed = true; }
    /// Setzt das Standalone-Flag.
    pub fn set_standalone(&mut self, value: bool) { self.standalone = value; self.changed = true; }

    /// Setzt die deklarierte Version; leere Werte sind unzulaessig
    /// (XML 1.0 2.8).
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        if version.is_empty() {
            return Err(Error::EmptyVersion);
        }
        self.version = version.to_string();
        self.changed = true;
        Ok(())
    }

    // --- Dirty-Flag ---

    /// Markiert die Konfiguration als geaendert.
    pub(crate) fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Liest das Flag und setzt es zurueck (einmal pro `start_document`).
    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Setzt das Flag zurueck (Dokumentgrenze).
    pub(crate) fn clear_changed(&mut self) {
        self.changed = false;
    }
}
