//! Paragraph extraction from word/document.xml.

use quick_xml::events::Event;

use super::xml::{attr, read_paragraph_property, ElementPath};
use crate::error::{Error, Result};
use crate::model::SourceParagraph;

/// Read every `w:p` of the main document part, in document order.
///
/// Paragraphs nested in tables, text boxes or content controls are included
/// at the position of their start tag. Only the paragraph's own `w:pPr` is
/// read as direct formatting; run properties of the paragraph mark and
/// tracked property changes are skipped.
///
/// # Errors
///
/// Fails with [`Error::XmlParse`] when the XML is malformed or the root
/// element is not `w:document`.
pub fn parse_paragraphs(xml: &str) -> Result<Vec<SourceParagraph>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    // Keep whitespace from xml:space="preserve" runs
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut path = ElementPath::default();
    let mut paragraphs: Vec<SourceParagraph> = Vec::new();
    // Indexes into `paragraphs` of the w:p elements currently open
    let mut open: Vec<usize> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if !saw_root {
                    check_root(name.as_ref())?;
                    saw_root = true;
                }
                if name.as_ref() == b"p" {
                    open.push(paragraphs.len());
                    paragraphs.push(SourceParagraph {
                        index: paragraphs.len(),
                        ..Default::default()
                    });
                } else if let Some(&current) = open.last() {
                    read_paragraph_element(&mut paragraphs[current], &e, &path);
                }
                path.push(name.as_ref());
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if !saw_root {
                    check_root(name.as_ref())?;
                    saw_root = true;
                }
                if name.as_ref() == b"p" {
                    paragraphs.push(SourceParagraph {
                        index: paragraphs.len(),
                        ..Default::default()
                    });
                } else if let Some(&current) = open.last() {
                    read_paragraph_element(&mut paragraphs[current], &e, &path);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(&current) = open.last() {
                    if path.parent() == Some(&b"t"[..]) {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::XmlParse(err.to_string()))?;
                        paragraphs[current].text.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(&current) = open.last() {
                    if path.parent() == Some(&b"t"[..]) {
                        paragraphs[current]
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Ok(Event::End(e)) => {
                path.pop();
                if e.local_name().as_ref() == b"p" {
                    open.pop();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::XmlParse("document part has no root element".to_string()));
    }

    Ok(paragraphs)
}

fn check_root(local_name: &[u8]) -> Result<()> {
    if local_name == b"document" {
        Ok(())
    } else {
        Err(Error::XmlParse(format!(
            "expected w:document root, found '{}'",
            String::from_utf8_lossy(local_name)
        )))
    }
}

/// Handle an element inside the innermost open paragraph.
fn read_paragraph_element(
    para: &mut SourceParagraph,
    e: &quick_xml::events::BytesStart,
    path: &ElementPath,
) {
    let name = e.local_name();
    if path.ends_with(&[b"p", b"pPr"]) {
        if name.as_ref() == b"pStyle" {
            para.style_id = attr(e, b"val").filter(|v| !v.is_empty());
        } else {
            read_paragraph_property(&mut para.direct, b"pPr", e);
        }
    } else if path.ends_with(&[b"p", b"pPr", b"numPr"]) {
        read_paragraph_property(&mut para.direct, b"numPr", e);
    } else if name.as_ref() == b"tab" && path.parent() == Some(&b"r"[..]) {
        para.text.push('\t');
    }
}
