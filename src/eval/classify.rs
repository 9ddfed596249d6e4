//! Heading / list item / plain classification.

use crate::docx::{LevelDefinition, NumberingCatalog};
use crate::model::{NumberingRef, ParagraphKind, ResolvedParagraph, MAX_LEVEL};

/// Classification of one resolved paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Heading, list item or plain
    pub kind: ParagraphKind,
    /// The paragraph's resolved numbering level, if its reference resolved
    pub level: Option<LevelDefinition>,
}

/// Classify a paragraph from its effective properties.
///
/// An outline level 0-8 makes a heading, even when the paragraph also has
/// numbering. Otherwise a numbering reference whose level resolves to a
/// format other than `none` makes a list item. Everything else is plain.
pub fn classify(resolved: &ResolvedParagraph, numbering: &NumberingCatalog) -> Classification {
    let level = resolved
        .numbering
        .and_then(|num_ref| lookup_level(numbering, num_ref, resolved.index));

    let kind = match (resolved.outline_level, resolved.numbering, level.as_ref()) {
        (Some(outline), _, _) if outline <= MAX_LEVEL => ParagraphKind::Heading { level: outline },
        (_, Some(num_ref), Some(def)) if !def.format.is_none() => {
            ParagraphKind::ListItem { level: num_ref.ilvl }
        }
        _ => ParagraphKind::Plain,
    };

    Classification { kind, level }
}

/// Resolve a data-supplied reference, treating bad levels as absent.
fn lookup_level(
    numbering: &NumberingCatalog,
    num_ref: NumberingRef,
    index: usize,
) -> Option<LevelDefinition> {
    if num_ref.ilvl > MAX_LEVEL {
        log::debug!(
            "Paragraph {} uses numbering level {} of list {}, outside 0-8",
            index,
            num_ref.ilvl,
            num_ref.num_id
        );
        return None;
    }
    match numbering.resolve_level(num_ref.num_id, num_ref.ilvl) {
        Ok(level) => level,
        Err(err) => {
            log::error!("Numbering lookup failed for paragraph {}: {}", index, err);
            None
        }
    }
}
