#![no_main]
use libfuzzer_sys::fuzz_target;
use saxw::{Error, WriterConfig, XmlWriter};

fuzz_target!(|data: &[u8]| {
    // Interpretiert die Eingabe als Ereignis-Skript. Der Writer darf
    // dabei weder panicken noch seine Flush-Buchfuehrung ueberholen.
    let Ok(mut writer) = XmlWriter::with_config(WriterConfig::default()) else {
        return;
    };
    if writer.set_output(Vec::new()).is_err() {
        return;
    }

    let mut names: Vec<String> = Vec::new();
    for chunk in data.chunks(2) {
        let op = chunk[0] % 8;
        let arg = *chunk.get(1).unwrap_or(&0);
        let result = match op {
            0 => writer.start_document(),
            1 => writer.end_document(),
            2 => {
                let name = format!("e{arg}");
                let r = writer.start_element(&name, &[("a", "v\"<")]);
                names.push(name);
                r
            }
            3 => {
                let name = names.pop().unwrap_or_else(|| format!("e{arg}"));
                writer.end_element(&name)
            }
            4 => writer.characters("text & <mehr>"),
            5 => writer.flush(),
            6 => writer.set_encoding(if arg % 2 == 0 { "UTF-8" } else { "UTF-16" }),
            7 => {
                writer.set_standalone(arg % 2 == 0);
                Ok(())
            }
            _ => unreachable!(),
        };
        if let Err(e) = result {
            assert!(!matches!(e, Error::FlushOverrun { .. }));
        }
    }
});
