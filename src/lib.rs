//! saxw – incremental SAX-event-driven XML text serializer
//!
//! # Beispiel
//!
//! ```
//! use saxw::XmlWriter;
//!
//! let mut writer = XmlWriter::new().unwrap();
//! writer.start_document().unwrap();
//! writer.start_element("greeting", &[("lang", "en")]).unwrap();
//! writer.characters("Hello").unwrap();
//! writer.end_element("greeting").unwrap();
//! writer.end_document().unwrap();
//!
//! let text = writer.output().unwrap();
//! assert!(text.starts_with("<?xml version=\"1.0\""));
//! assert!(text.ends_with("<greeting lang=\"en\">Hello</greeting>"));
//! ```

pub mod buffer;
pub mod config;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod event;
pub mod prolog;
pub mod writer;

pub use error::{Error, Result};

// Public API: Writer
pub use writer::{serialize_events, XmlWriter};

// Public API: Konfiguration
pub use config::{NameChecks, WriterConfig};

// Public API: Events
pub use event::{Attribute, SaxEvent};

// Public API: Bausteine
pub use buffer::{DualBuffer, EncodedBuffer, OutputMode};
pub use encoding::Encoding;
pub use escape::escape_text;
