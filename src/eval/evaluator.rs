//! Document-level evaluation entry point.

use std::path::Path;

use crate::container::OoxmlContainer;
use crate::docx::{
    parse_paragraphs, NumberingCatalog, StyleCatalog, DOCUMENT_PART, NUMBERING_PART, STYLES_PART,
};
use crate::error::Result;
use crate::model::{EvaluatedParagraph, ResolvedParagraph, SourceParagraph};
use crate::options::EvaluatorOptions;

use super::classify::{classify, Classification};
use super::counter::NumberingCounter;
use super::resolver::PropertyResolver;

/// Evaluates paragraph styles and numbering for one document.
///
/// Catalogs and paragraphs are read once at construction and never change
/// afterwards, so an evaluator can be shared between threads. Each
/// [`pass`](Self::pass) owns its own numbering counters.
///
/// # Example
///
/// ```no_run
/// use unstyle::StyleEvaluator;
///
/// let evaluator = StyleEvaluator::open("report.docx")?;
/// for para in evaluator.pass() {
///     if let Some(level) = para.heading_level_opt() {
///         println!("H{} {}", level + 1, para.text);
///     }
/// }
/// # Ok::<(), unstyle::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StyleEvaluator {
    styles: StyleCatalog,
    numbering: NumberingCatalog,
    paragraphs: Vec<SourceParagraph>,
    options: EvaluatorOptions,
}

impl StyleEvaluator {
    /// Open a DOCX file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, EvaluatorOptions::default())
    }

    /// Open a DOCX file.
    pub fn open_with_options(path: impl AsRef<Path>, options: EvaluatorOptions) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(&container, options)
    }

    /// Evaluate a DOCX package held in memory.
    pub fn from_bytes(data: Vec<u8>, options: EvaluatorOptions) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(&container, options)
    }

    /// Read the parts the evaluator needs from an open package.
    ///
    /// A missing `word/document.xml` is fatal. The styles and numbering
    /// parts are optional.
    pub fn from_container(container: &OoxmlContainer, options: EvaluatorOptions) -> Result<Self> {
        let document_xml = container.read_xml(DOCUMENT_PART)?;
        let styles_xml = container.read_optional_xml(STYLES_PART)?;
        let numbering_xml = container.read_optional_xml(NUMBERING_PART)?;

        Self::from_parts(
            &document_xml,
            styles_xml.as_deref(),
            numbering_xml.as_deref(),
            options,
        )
    }

    /// Build an evaluator from raw part contents.
    ///
    /// Unparsable styles or numbering parts are logged and replaced by empty
    /// catalogs; an unparsable document part is an error.
    pub fn from_parts(
        document_xml: &str,
        styles_xml: Option<&str>,
        numbering_xml: Option<&str>,
        options: EvaluatorOptions,
    ) -> Result<Self> {
        let styles = match styles_xml {
            Some(xml) => StyleCatalog::parse(xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable {}: {}", STYLES_PART, e);
                StyleCatalog::default()
            }),
            None => StyleCatalog::default(),
        };

        let numbering = match numbering_xml {
            Some(xml) => NumberingCatalog::parse(xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable {}: {}", NUMBERING_PART, e);
                NumberingCatalog::default()
            }),
            None => NumberingCatalog::default(),
        };

        let paragraphs = parse_paragraphs(document_xml)?;
        log::debug!(
            "Loaded {} paragraphs, {} styles, {} numbering instances",
            paragraphs.len(),
            styles.len(),
            numbering.instances.len()
        );

        Ok(Self::new(styles, numbering, paragraphs, options))
    }

    /// Build an evaluator from already-constructed catalogs.
    pub fn new(
        styles: StyleCatalog,
        mut numbering: NumberingCatalog,
        paragraphs: Vec<SourceParagraph>,
        options: EvaluatorOptions,
    ) -> Self {
        numbering.link_styles(&styles);
        Self {
            styles,
            numbering,
            paragraphs,
            options,
        }
    }

    /// Style catalog of the document.
    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    /// Numbering catalog of the document.
    pub fn numbering(&self) -> &NumberingCatalog {
        &self.numbering
    }

    /// Paragraphs in document order.
    pub fn paragraphs(&self) -> &[SourceParagraph] {
        &self.paragraphs
    }

    /// Evaluation options.
    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Resolve one paragraph's effective properties.
    ///
    /// Stateless: may be called for any paragraph in any order.
    pub fn resolve(&self, para: &SourceParagraph) -> ResolvedParagraph {
        PropertyResolver::new(&self.styles, &self.numbering, &self.options).resolve(para)
    }

    /// Classify a resolved paragraph. Stateless.
    pub fn classify(&self, resolved: &ResolvedParagraph) -> Classification {
        classify(resolved, &self.numbering)
    }

    /// Start a fresh in-order pass over the document.
    pub fn pass(&self) -> EvaluationPass<'_> {
        EvaluationPass {
            evaluator: self,
            resolver: PropertyResolver::new(&self.styles, &self.numbering, &self.options),
            paragraphs: self.paragraphs.iter(),
            counter: NumberingCounter::new(),
        }
    }

    /// Evaluate every paragraph.
    pub fn evaluate(&self) -> Vec<EvaluatedParagraph> {
        self.pass().collect()
    }
}

/// One in-order evaluation of a document's paragraphs.
///
/// Labels depend on every numbered paragraph before them, so a pass only
/// moves forward and always starts from the first paragraph.
#[derive(Debug)]
pub struct EvaluationPass<'a> {
    evaluator: &'a StyleEvaluator,
    resolver: PropertyResolver<'a>,
    paragraphs: std::slice::Iter<'a, SourceParagraph>,
    counter: NumberingCounter,
}

impl Iterator for EvaluationPass<'_> {
    type Item = EvaluatedParagraph;

    fn next(&mut self) -> Option<Self::Item> {
        let para = self.paragraphs.next()?;
        let resolved = self.resolver.resolve(para);
        let classification = classify(&resolved, &self.evaluator.numbering);
        let label = self.counter.label_for(
            &resolved,
            &classification,
            &self.evaluator.numbering,
            &self.evaluator.options,
        );

        Some(EvaluatedParagraph {
            index: resolved.index,
            text: resolved.text,
            style_id: resolved.style_id,
            kind: classification.kind,
            numbering: resolved.numbering,
            label,
            style_error: resolved.style_error,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paragraphs.size_hint()
    }
}

impl ExactSizeIterator for EvaluationPass<'_> {}
