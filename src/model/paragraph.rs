//! Paragraph models: source records, resolved records and evaluation results.

use serde::{Deserialize, Serialize};

use super::properties::ParagraphProperties;

/// Highest valid outline or numbering level.
pub const MAX_LEVEL: u8 = 8;

/// Sentinel reported by the `i32` accessors when a value does not apply.
pub const NOT_APPLICABLE: i32 = -1;

/// Convert an optional level to the `-1` / `0..=9` reporting convention.
///
/// Anything outside 0-9 is clamped to the sentinel.
pub fn level_or_sentinel(level: Option<u8>) -> i32 {
    match level {
        Some(level) if level <= 9 => i32::from(level),
        _ => NOT_APPLICABLE,
    }
}

/// A paragraph as read from `word/document.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceParagraph {
    /// Position in document order (0-based)
    pub index: usize,
    /// Raw text content
    pub text: String,
    /// `w:pStyle` reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Direct formatting from the paragraph's own `w:pPr`
    #[serde(default, skip_serializing_if = "ParagraphProperties::is_empty")]
    pub direct: ParagraphProperties,
}

impl SourceParagraph {
    /// Create a paragraph with text only.
    pub fn with_text(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the style reference.
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Set the direct formatting.
    pub fn with_direct(mut self, direct: ParagraphProperties) -> Self {
        self.direct = direct;
        self
    }
}

/// An effective (numId, ilvl) pair after the property cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberingRef {
    /// Numbering instance id (`w:num/@w:numId`), never zero
    pub num_id: u32,
    /// Level within the instance, raw from the document
    pub ilvl: u8,
}

/// A paragraph after property resolution, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParagraph {
    /// Position in document order
    pub index: usize,
    /// Raw text content
    pub text: String,
    /// Style that supplied the style tier (explicit or default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Effective outline level, raw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u8>,
    /// Effective numbering reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    /// Set when the paragraph's style chain is cyclic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_error: Option<String>,
    /// All effective properties
    pub properties: ParagraphProperties,
}

/// Presentation class of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParagraphKind {
    /// Structural heading at outline level 0-8
    Heading { level: u8 },
    /// Numbered or bulleted list item at numbering level 0-8
    ListItem { level: u8 },
    /// Neither
    #[default]
    Plain,
}

/// Rendered numbering label of a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum Label {
    /// The paragraph carries no label (plain text, or a heading without numbering)
    #[default]
    NotApplicable,
    /// A label was expected but the numbering reference did not resolve
    Unresolved,
    /// The label text Word would render
    Text(String),
}

impl Label {
    /// The rendered text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Label::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether a label applies to the paragraph at all.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Label::NotApplicable)
    }
}

/// Final result for one paragraph of an evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedParagraph {
    /// Position in document order
    pub index: usize,
    /// Raw text content
    pub text: String,
    /// Style that supplied the style tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Classification
    pub kind: ParagraphKind,
    /// Effective numbering reference, independent of label success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    /// Rendered label
    pub label: Label,
    /// Set when the paragraph's style chain is cyclic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_error: Option<String>,
}

impl EvaluatedParagraph {
    /// Check if this paragraph is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ParagraphKind::Heading { .. })
    }

    /// Heading level, if this is a heading.
    pub fn heading_level_opt(&self) -> Option<u8> {
        match self.kind {
            ParagraphKind::Heading { level } => Some(level),
            _ => None,
        }
    }

    /// Heading level (0-based), or -1.
    pub fn heading_level(&self) -> i32 {
        level_or_sentinel(self.heading_level_opt())
    }

    /// Check if this paragraph is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, ParagraphKind::ListItem { .. })
    }

    /// List level, if this is a list item.
    pub fn list_level_opt(&self) -> Option<u8> {
        match self.kind {
            ParagraphKind::ListItem { level } => Some(level),
            _ => None,
        }
    }

    /// List level (0-based), or -1.
    pub fn list_level(&self) -> i32 {
        level_or_sentinel(self.list_level_opt())
    }

    /// Raw numbering instance id, if any.
    pub fn num_id(&self) -> Option<u32> {
        self.numbering.map(|n| n.num_id)
    }

    /// Numbering instance id, or -1.
    pub fn numbering_id(&self) -> i32 {
        self.num_id()
            .and_then(|id| i32::try_from(id).ok())
            .unwrap_or(NOT_APPLICABLE)
    }

    /// Raw numbering level (ilvl), or -1 when absent or out of range.
    pub fn num_level(&self) -> i32 {
        level_or_sentinel(self.numbering.map(|n| n.ilvl))
    }

    /// The rendered label, if one was produced.
    pub fn rendered_label(&self) -> Option<&str> {
        self.label.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(kind: ParagraphKind, numbering: Option<NumberingRef>) -> EvaluatedParagraph {
        EvaluatedParagraph {
            index: 0,
            text: "text".to_string(),
            style_id: None,
            kind,
            numbering,
            label: Label::NotApplicable,
            style_error: None,
        }
    }

    #[test]
    fn test_level_sentinel() {
        assert_eq!(level_or_sentinel(None), -1);
        assert_eq!(level_or_sentinel(Some(0)), 0);
        assert_eq!(level_or_sentinel(Some(9)), 9);
        assert_eq!(level_or_sentinel(Some(10)), -1);
        assert_eq!(level_or_sentinel(Some(255)), -1);
    }

    #[test]
    fn test_plain_paragraph_reports_sentinels() {
        let para = evaluated(ParagraphKind::Plain, None);
        assert!(!para.is_heading());
        assert!(!para.is_list_item());
        assert_eq!(para.heading_level(), -1);
        assert_eq!(para.list_level(), -1);
        assert_eq!(para.numbering_id(), -1);
        assert_eq!(para.num_level(), -1);
        assert_eq!(para.rendered_label(), None);
    }

    #[test]
    fn test_heading_exposes_raw_numbering() {
        let para = evaluated(
            ParagraphKind::Heading { level: 1 },
            Some(NumberingRef { num_id: 4, ilvl: 1 }),
        );
        assert!(para.is_heading());
        assert_eq!(para.heading_level(), 1);
        assert_eq!(para.list_level(), -1);
        assert_eq!(para.numbering_id(), 4);
        assert_eq!(para.num_level(), 1);
    }

    #[test]
    fn test_label_states() {
        assert!(!Label::NotApplicable.is_applicable());
        assert!(Label::Unresolved.is_applicable());
        assert_eq!(Label::Unresolved.as_text(), None);
        assert_eq!(Label::Text("1.".into()).as_text(), Some("1."));
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ParagraphKind::ListItem { level: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"list_item","level":2}"#);

        let json = serde_json::to_string(&Label::Text("a)".into())).unwrap();
        assert_eq!(json, r#"{"state":"text","text":"a)"}"#);
    }
}
