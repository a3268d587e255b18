//! XML-Entity-Escaping fuer Attributwerte und Character Data.
//!
//! Mit memchr-SIMD: grosse Bloecke ohne Sonderzeichen werden in einem
//! Stueck uebernommen.

use memchr::{memchr, memchr3};
use std::borrow::Cow;

/// Startgroesse des Ausgabepuffers, sobald ersetzt werden muss.
const MIN_ESCAPED_ALLOC: usize = 100;

/// Position des naechsten zu ersetzenden Bytes ab `from`.
fn next_special(bytes: &[u8], from: usize) -> Option<usize> {
    let hay = &bytes[from..];
    let rel = match (memchr3(b'<', b'&', b'>', hay), memchr(b'"', hay)) {
        (Some(a), Some(q)) => usize::min(a, q),
        (Some(a), None) => a,
        (None, Some(q)) => q,
        (None, None) => return None,
    };
    Some(from + rel)
}

/// Replaces `<` `&` `"` `>` with their predefined entities (XML 1.0 4.6);
/// everything else is copied unchanged. Input without any of the four
/// comes back borrowed.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(mut pos) = next_special(bytes, 0) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(usize::max(2 * text.len(), MIN_ESCAPED_ALLOC));
    let mut start = 0;
    loop {
        out.push_str(&text[start..pos]);
        out.push_str(match bytes[pos] {
            b'<' => "&lt;",
            b'&' => "&amp;",
            b'"' => "&quot;",
            _ => "&gt;",
        });
        start = pos + 1;
        match next_special(bytes, start) {
            Some(next) => pos = next,
            None => {
                out.push_str(&text[start..]);
                break;
            }
        }
    }
    Cow::Owned(out)
}
