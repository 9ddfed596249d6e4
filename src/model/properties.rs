//! Typed paragraph property records and their merge rules.

use serde::{Deserialize, Serialize};

/// Numbering reference as written in a `w:numPr` element.
///
/// Both fields are optional and merge independently: a paragraph may set
/// only `w:ilvl` and inherit `w:numId` from its style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingProperties {
    /// `w:numId`; zero means numbering is explicitly removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_id: Option<u32>,
    /// `w:ilvl`, raw from the document (not range-checked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilvl: Option<u8>,
}

impl NumberingProperties {
    /// Whether neither field is set.
    pub fn is_empty(&self) -> bool {
        self.num_id.is_none() && self.ilvl.is_none()
    }

    /// Merge with another set (other takes precedence, per field).
    pub fn overlay(&mut self, other: &NumberingProperties) {
        if other.num_id.is_some() {
            self.num_id = other.num_id;
        }
        if other.ilvl.is_some() {
            self.ilvl = other.ilvl;
        }
    }
}

/// Paragraph properties that take part in the style cascade.
///
/// Every field is optional; `None` means "not set at this tier" and lets a
/// lower-precedence tier supply the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    /// `w:outlineLvl` (0-8 are headings, 9 is body text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u8>,
    /// `w:numPr`
    #[serde(default, skip_serializing_if = "NumberingProperties::is_empty")]
    pub numbering: NumberingProperties,
    /// `w:jc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    /// `w:ind w:left` (or `w:start`) in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_left: Option<i32>,
    /// `w:ind w:hanging` in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_hanging: Option<i32>,
    /// `w:keepNext`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_next: Option<bool>,
}

impl ParagraphProperties {
    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        *self == ParagraphProperties::default()
    }

    /// Merge with another ParagraphProperties (other takes precedence).
    ///
    /// Only the fields `other` explicitly sets are replaced. This is the
    /// single merge used for based-on chains and for the
    /// direct > style > defaults paragraph precedence.
    pub fn overlay(&mut self, other: &ParagraphProperties) {
        if other.outline_level.is_some() {
            self.outline_level = other.outline_level;
        }
        self.numbering.overlay(&other.numbering);
        if other.justification.is_some() {
            self.justification = other.justification.clone();
        }
        if other.indent_left.is_some() {
            self.indent_left = other.indent_left;
        }
        if other.indent_hanging.is_some() {
            self.indent_hanging = other.indent_hanging;
        }
        if other.keep_next.is_some() {
            self.keep_next = other.keep_next;
        }
    }

    /// Return a copy of `self` with `other` layered on top.
    pub fn overlaid(&self, other: &ParagraphProperties) -> ParagraphProperties {
        let mut merged = self.clone();
        merged.overlay(other);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_per_field() {
        let mut base = ParagraphProperties {
            outline_level: Some(0),
            justification: Some("center".to_string()),
            keep_next: Some(true),
            ..Default::default()
        };
        let higher = ParagraphProperties {
            justification: Some("left".to_string()),
            ..Default::default()
        };

        base.overlay(&higher);
        assert_eq!(base.outline_level, Some(0));
        assert_eq!(base.justification.as_deref(), Some("left"));
        assert_eq!(base.keep_next, Some(true));
    }

    #[test]
    fn test_numbering_fields_merge_independently() {
        let mut style = NumberingProperties {
            num_id: Some(3),
            ilvl: Some(0),
        };
        style.overlay(&NumberingProperties {
            num_id: None,
            ilvl: Some(2),
        });
        assert_eq!(style.num_id, Some(3));
        assert_eq!(style.ilvl, Some(2));
    }

    #[test]
    fn test_empty_overlay_keeps_everything() {
        let base = ParagraphProperties {
            outline_level: Some(4),
            indent_left: Some(720),
            ..Default::default()
        };
        let merged = base.overlaid(&ParagraphProperties::default());
        assert_eq!(merged, base);
        assert!(ParagraphProperties::default().is_empty());
        assert!(!merged.is_empty());
    }
}
