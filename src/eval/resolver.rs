//! Paragraph property resolution (direct > style chain > document defaults).

use unicode_normalization::UnicodeNormalization;

use crate::docx::{NumberingCatalog, StyleCatalog, StyleKind};
use crate::model::{NumberingRef, ParagraphProperties, ResolvedParagraph, SourceParagraph};
use crate::options::EvaluatorOptions;

/// Computes effective properties for paragraphs of one document.
///
/// Each property is resolved on its own: the highest tier that sets a field
/// wins that field, whatever tiers supply the others.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'a> {
    styles: &'a StyleCatalog,
    numbering: &'a NumberingCatalog,
    options: &'a EvaluatorOptions,
}

impl<'a> PropertyResolver<'a> {
    /// Create a resolver over a document's catalogs.
    pub fn new(
        styles: &'a StyleCatalog,
        numbering: &'a NumberingCatalog,
        options: &'a EvaluatorOptions,
    ) -> Self {
        Self {
            styles,
            numbering,
            options,
        }
    }

    /// Resolve one paragraph.
    pub fn resolve(&self, para: &SourceParagraph) -> ResolvedParagraph {
        let style_id = para.style_id.clone().or_else(|| {
            self.options
                .use_default_paragraph_style
                .then(|| self.styles.default_paragraph.clone())
                .flatten()
        });

        let mut style_error = None;
        let style_props = match style_id.as_deref() {
            Some(id) => match self.styles.get(id) {
                Some(style) if style.kind != StyleKind::Paragraph => {
                    log::debug!(
                        "Paragraph {} references {:?} style '{}'",
                        para.index,
                        style.kind,
                        id
                    );
                    ParagraphProperties::default()
                }
                found => {
                    if found.is_none() {
                        log::debug!("Paragraph {} references unknown style '{}'", para.index, id);
                    }
                    self.styles.resolve_style(id).unwrap_or_else(|err| {
                        style_error = Some(err.to_string());
                        ParagraphProperties::default()
                    })
                }
            },
            None => ParagraphProperties::default(),
        };

        let properties = self
            .styles
            .defaults
            .overlaid(&style_props)
            .overlaid(&para.direct);

        let numbering = self.numbering_ref(&properties, style_id.as_deref());

        let text = if self.options.normalize_text {
            para.text.nfc().collect()
        } else {
            para.text.clone()
        };

        ResolvedParagraph {
            index: para.index,
            text,
            style_id,
            outline_level: properties.outline_level,
            numbering,
            style_error,
            properties,
        }
    }

    /// Turn the merged `w:numPr` fields into a reference.
    ///
    /// `numId` 0 removes numbering. A missing `ilvl` takes the level linked
    /// to the paragraph's style, else level 0.
    fn numbering_ref(
        &self,
        properties: &ParagraphProperties,
        style_id: Option<&str>,
    ) -> Option<NumberingRef> {
        let num_id = properties.numbering.num_id.filter(|id| *id != 0)?;
        let ilvl = properties
            .numbering
            .ilvl
            .or_else(|| style_id.and_then(|s| self.numbering.level_for_style(num_id, s)))
            .unwrap_or(0);
        Some(NumberingRef { num_id, ilvl })
    }
}
