//! Shared quick-xml helpers for the WordprocessingML parts.

use quick_xml::events::BytesStart;

use crate::model::ParagraphProperties;

/// Local names of the currently open elements, outermost first.
///
/// Elements are matched by local name so documents using a prefix other
/// than `w:` parse the same way.
#[derive(Debug, Default)]
pub(crate) struct ElementPath {
    names: Vec<Vec<u8>>,
}

impl ElementPath {
    pub(crate) fn push(&mut self, local_name: &[u8]) {
        self.names.push(local_name.to_vec());
    }

    pub(crate) fn pop(&mut self) {
        self.names.pop();
    }

    /// Innermost open element.
    pub(crate) fn parent(&self) -> Option<&[u8]> {
        self.names.last().map(Vec::as_slice)
    }

    /// Whether the innermost open elements are exactly `suffix`.
    pub(crate) fn ends_with(&self, suffix: &[&[u8]]) -> bool {
        if suffix.len() > self.names.len() {
            return false;
        }
        self.names[self.names.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(open, want)| open.as_slice() == *want)
    }
}

/// Get an attribute value by local name.
pub(crate) fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return Some(match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
            });
        }
    }
    None
}

/// Get a numeric attribute value by local name.
pub(crate) fn num_attr<T: std::str::FromStr>(e: &BytesStart, key: &[u8]) -> Option<T> {
    attr(e, key).and_then(|v| v.trim().parse().ok())
}

/// Read an on/off property: a bare element means on.
pub(crate) fn on_off(e: &BytesStart) -> bool {
    match attr(e, b"val") {
        Some(val) => !matches!(val.as_str(), "0" | "false" | "off"),
        None => true,
    }
}

/// Apply one child element of a `w:pPr` or `w:numPr` to `props`.
///
/// `parent` is the local name of the element containing `e`; callers make
/// sure that element belongs to the properties being read.
pub(crate) fn read_paragraph_property(
    props: &mut ParagraphProperties,
    parent: &[u8],
    e: &BytesStart,
) {
    let name = e.local_name();
    match (parent, name.as_ref()) {
        (b"pPr", b"outlineLvl") => {
            props.outline_level = num_attr(e, b"val");
        }
        (b"pPr", b"jc") => {
            props.justification = attr(e, b"val");
        }
        (b"pPr", b"ind") => {
            if let Some(left) = num_attr(e, b"left").or_else(|| num_attr(e, b"start")) {
                props.indent_left = Some(left);
            }
            if let Some(hanging) = num_attr(e, b"hanging") {
                props.indent_hanging = Some(hanging);
            }
        }
        (b"pPr", b"keepNext") => {
            props.keep_next = Some(on_off(e));
        }
        (b"numPr", b"numId") => {
            props.numbering.num_id = num_attr(e, b"val");
        }
        (b"numPr", b"ilvl") => {
            props.numbering.ilvl = num_attr(e, b"val");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(xml: &str) -> BytesStart<'static> {
        let mut reader = quick_xml::Reader::from_str(xml);
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::Start(e) | quick_xml::events::Event::Empty(e) => {
                    return e.into_owned()
                }
                quick_xml::events::Event::Eof => panic!("no element in {xml}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_element_path() {
        let mut path = ElementPath::default();
        path.push(b"p");
        path.push(b"pPr");
        assert!(path.ends_with(&[b"p", b"pPr"]));
        assert!(!path.ends_with(&[b"body", b"p", b"pPr"]));
        assert_eq!(path.parent(), Some(&b"pPr"[..]));
        path.pop();
        assert!(path.ends_with(&[b"p"]));
    }

    #[test]
    fn test_attributes_match_any_prefix() {
        let e = start(r#"<x:outlineLvl xmlns:x="urn:test" x:val="2"/>"#);
        assert_eq!(attr(&e, b"val").as_deref(), Some("2"));
        assert_eq!(num_attr::<u8>(&e, b"val"), Some(2));
    }

    #[test]
    fn test_on_off() {
        assert!(on_off(&start(r#"<w:keepNext/>"#)));
        assert!(!on_off(&start(r#"<w:keepNext w:val="0"/>"#)));
        assert!(!on_off(&start(r#"<w:keepNext w:val="false"/>"#)));
        assert!(on_off(&start(r#"<w:keepNext w:val="on"/>"#)));
    }

    #[test]
    fn test_read_paragraph_property() {
        let mut props = ParagraphProperties::default();
        read_paragraph_property(&mut props, b"pPr", &start(r#"<w:outlineLvl w:val="1"/>"#));
        read_paragraph_property(&mut props, b"numPr", &start(r#"<w:numId w:val="7"/>"#));
        read_paragraph_property(&mut props, b"numPr", &start(r#"<w:ilvl w:val="2"/>"#));
        read_paragraph_property(
            &mut props,
            b"pPr",
            &start(r#"<w:ind w:left="720" w:hanging="360"/>"#),
        );
        // Wrong parent is ignored
        read_paragraph_property(&mut props, b"rPr", &start(r#"<w:jc w:val="center"/>"#));

        assert_eq!(props.outline_level, Some(1));
        assert_eq!(props.numbering.num_id, Some(7));
        assert_eq!(props.numbering.ilvl, Some(2));
        assert_eq!(props.indent_left, Some(720));
        assert_eq!(props.indent_hanging, Some(360));
        assert_eq!(props.justification, None);
    }
}
