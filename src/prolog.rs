//! Die `<?xml ...?>`-Deklaration am Dokumentanfang.

use crate::buffer::{DualBuffer, OutputMode};
use crate::config::WriterConfig;
use crate::encoding::Encoding;
use crate::Result;

/// Schreibt die Deklaration in fester Segmentfolge in beide Puffer.
///
/// Der native Puffer traegt immer den Namen `UTF-16`, der kodierte den
/// Namen der Zielkodierung. Abgeschlossen wird mit CRLF.
pub fn write_declaration(
    buffer: &mut DualBuffer,
    config: &WriterConfig,
    encoding: Encoding,
) -> Result<()> {
    buffer.write("<?xml version=\"", OutputMode::Both)?;
    buffer.write(config.version(), OutputMode::Both)?;
    buffer.write("\"", OutputMode::Both)?;

    buffer.write(" encoding=\"", OutputMode::Both)?;
    buffer.write(Encoding::Utf16.name(), OutputMode::Native)?;
    buffer.write(encoding.name(), OutputMode::Encoded)?;
    buffer.write("\"", OutputMode::Both)?;

    if config.standalone() {
        buffer.write(" standalone=\"yes\"?>\r\n", OutputMode::Both)?;
    } else {
        buffer.write(" standalone=\"no\"?>\r\n", OutputMode::Both)?;
    }
    Ok(())
}
