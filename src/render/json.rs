//! JSON renderer implementation.

use crate::error::Result;
use crate::model::EvaluatedParagraph;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert evaluated paragraphs to a JSON array.
pub fn to_json(paragraphs: &[EvaluatedParagraph], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(paragraphs)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(paragraphs)?,
    };
    Ok(json)
}

/// Convert evaluated paragraphs to JSON with default formatting.
pub fn to_json_default(paragraphs: &[EvaluatedParagraph]) -> Result<String> {
    to_json(paragraphs, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Label, NumberingRef, ParagraphKind};

    fn sample() -> Vec<EvaluatedParagraph> {
        vec![EvaluatedParagraph {
            index: 0,
            text: "Scope".to_string(),
            style_id: Some("Heading1".to_string()),
            kind: ParagraphKind::Heading { level: 0 },
            numbering: Some(NumberingRef { num_id: 1, ilvl: 0 }),
            label: Label::Text("1.".to_string()),
            style_error: None,
        }]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"text\": \"Scope\""));
        assert!(json.contains("\"type\": \"heading\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"label\":{\"state\":\"text\",\"text\":\"1.\"}"));
    }

    #[test]
    fn test_to_json_default() {
        let json = to_json_default(&sample()).unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_paragraphs_roundtrip() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let parsed: Vec<EvaluatedParagraph> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
