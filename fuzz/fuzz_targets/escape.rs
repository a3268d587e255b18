#![no_main]
use libfuzzer_sys::fuzz_target;
use saxw::escape_text;

fuzz_target!(|data: &[u8]| {
    // Laengenbeziehung und Vollstaendigkeit des Escapings gegen
    // beliebige UTF-8-Eingaben.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let escaped = escape_text(text);

    let lt = text.matches('<').count();
    let amp = text.matches('&').count();
    let quot = text.matches('"').count();
    let gt = text.matches('>').count();
    assert_eq!(
        escaped.len(),
        text.len() + 3 * lt + 4 * amp + 5 * quot + 3 * gt
    );

    // Nur `&` darf im Ergebnis stehen bleiben (als Entity-Anfang)
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    assert!(!escaped.contains('"'));
});
