//! Strukturereignisse im Stil eines SAX2-ContentHandlers.
//!
//! Ein Dokument ist eine flache Folge solcher Ereignisse; der Writer
//! verarbeitet sie inkrementell in Aufrufreihenfolge.

use std::rc::Rc;

/// Ein Attribut eines Start-Elements: qualifizierter Name plus Wert.
///
/// Die Reihenfolge der Attribute im Ereignis ist die Ausgabereihenfolge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name as it appears in the serialized text.
    pub name: Rc<str>,
    /// The attribute value, unescaped.
    pub value: Rc<str>,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// One structural event of a document stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    /// Beginning of the document; may emit the XML declaration.
    StartDocument,
    /// End of the document; flushes buffered output.
    EndDocument,
    /// Opening tag with its attributes. The closing bracket stays
    /// deferred until the next event.
    StartElement {
        name: Rc<str>,
        attributes: Vec<Attribute>,
    },
    /// Closing tag; collapses to `<name/>` when it directly follows the
    /// matching start element.
    EndElement { name: Rc<str> },
    /// Character data, escaped unless escaping is disabled.
    Characters { text: Rc<str> },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Konstruktion Tests ====================

    #[test]
    fn start_element_konstruktion() {
        let event = SaxEvent::StartElement {
            name: "book".into(),
            attributes: vec![Attribute::new("id", "42")],
        };
        let SaxEvent::StartElement { name, attributes } = event else {
            panic!("Expected StartElement");
        };

        assert_eq!(&*name, "book");
        assert_eq!(attributes.len(), 1);
        assert_eq!(&*attributes[0].name, "id");
        assert_eq!(&*attributes[0].value, "42");
    }

    #[test]
    fn end_element_konstruktion() {
        let event = SaxEvent::EndElement { name: "book".into() };
        let SaxEvent::EndElement { name } = event else {
            panic!("Expected EndElement");
        };

        assert_eq!(&*name, "book");
    }

    #[test]
    fn characters_konstruktion() {
        let event = SaxEvent::Characters { text: "Hello, World!".into() };
        let SaxEvent::Characters { text } = event else {
            panic!("Expected Characters");
        };

        assert_eq!(&*text, "Hello, World!");
    }

    /// Attribute behalten die Aufrufreihenfolge.
    #[test]
    fn attribute_reihenfolge_bleibt() {
        let attributes = vec![
            Attribute::new("z", "1"),
            Attribute::new("a", "2"),
            Attribute::new("m", "3"),
        ];
        let names: Vec<&str> = attributes.iter().map(|a| &*a.name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    // ==================== Clone und Eq Tests ====================

    #[test]
    fn events_are_clone() {
        let events = [
            SaxEvent::StartDocument,
            SaxEvent::EndDocument,
            SaxEvent::StartElement {
                name: "test".into(),
                attributes: vec![Attribute::new("attr", "val")],
            },
            SaxEvent::EndElement { name: "test".into() },
            SaxEvent::Characters { text: "text".into() },
        ];

        for event in &events {
            assert_eq!(event, &event.clone());
        }
    }

    #[test]
    fn events_have_debug() {
        let debug = format!("{:?}", SaxEvent::StartDocument);
        assert!(debug.contains("StartDocument"));

        let se = SaxEvent::StartElement { name: "test".into(), attributes: Vec::new() };
        let debug = format!("{:?}", se);
        assert!(debug.contains("StartElement"));
        assert!(debug.contains("test"));
    }

    // ==================== Edge Cases ====================

    /// Characters mit leerem String sind valide.
    #[test]
    fn characters_leerer_string() {
        let event = SaxEvent::Characters { text: "".into() };
        let SaxEvent::Characters { text } = event else {
            panic!("Expected Characters");
        };

        assert!(text.is_empty());
    }

    /// Leere Namen sind darstellbar; ob sie akzeptiert werden,
    /// entscheidet der Writer.
    #[test]
    fn leerer_name_darstellbar() {
        let event = SaxEvent::EndElement { name: "".into() };
        let SaxEvent::EndElement { name } = event else {
            panic!("Expected EndElement");
        };

        assert!(name.is_empty());
    }
}
