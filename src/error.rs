//! Central error types of the writer.
//!
//! Variants cite the external document they enforce (XML 1.0 Fifth Edition,
//! SAX2 ContentHandler contract) where one applies.

use core::fmt;
use std::borrow::Cow;

/// All failure conditions the writer can report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A qualified name required by the content-handler contract is empty
    /// (XML 1.0 3.1: tags carry a Name).
    ///
    /// Nur unter [`NameChecks::Strict`](crate::NameChecks::Strict); der
    /// Lenient-Modus schreibt leere Namen unveraendert durch.
    EmptyQName {
        /// Die Operation, die den Namen verlangt hat (leer wenn unbekannt).
        operation: Cow<'static, str>,
    },
    /// The declared version string is empty (XML 1.0 2.8 requires VersionNum).
    EmptyVersion,
    /// The requested target encoding is not one of the two supported names.
    ///
    /// Wird vor jeder Zustandsaenderung geprueft: Puffer und aktives
    /// Encoding bleiben bei Ablehnung unangetastet.
    UnsupportedEncoding(String),
    /// Buffered output was requested while a sink owns the bytes.
    OutputRedirected,
    /// Growing an output buffer failed.
    OutOfMemory {
        /// Angeforderte Gesamtgroesse in Bytes.
        requested: usize,
    },
    /// Ein IO-Fehler beim Schreiben an die Senke.
    Io(String),
    /// The sink offset overran the buffer high-water mark (internal
    /// bookkeeping violation, not reachable by any valid call sequence).
    FlushOverrun { offset: usize, written: usize },
    /// An internal invariant was violated (never expected).
    InternalFault(Cow<'static, str>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQName { operation } => {
                if operation.is_empty() {
                    write!(f, "empty qualified name (XML 1.0 3.1)")
                } else {
                    write!(f, "empty qualified name in {operation} (XML 1.0 3.1)")
                }
            }
            Self::EmptyVersion => write!(f, "version string must not be empty (XML 1.0 2.8)"),
            Self::UnsupportedEncoding(name) => {
                write!(f, "unsupported encoding '{name}' (supported: UTF-8, UTF-16)")
            }
            Self::OutputRedirected => write!(
                f,
                "buffered output is not available while a sink is attached; read from the sink"
            ),
            Self::OutOfMemory { requested } => {
                write!(f, "output buffer growth to {requested} bytes failed")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::FlushOverrun { offset, written } => write!(
                f,
                "sink offset {offset} exceeds buffered length {written} (bookkeeping bug)"
            ),
            Self::InternalFault(msg) => write!(f, "internal fault: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Erstellt einen `EmptyQName` Fehler mit Operations-Kontext.
    pub fn empty_qname(operation: impl Into<Cow<'static, str>>) -> Self {
        Self::EmptyQName {
            operation: operation.into(),
        }
    }

    /// Erstellt einen `InternalFault` Fehler mit Nachricht.
    pub(crate) fn internal(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InternalFault(msg.into())
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
