//! WordprocessingML part readers.
//!
//! This module turns the three parts the evaluator needs into lookup
//! tables and paragraph records:
//!
//! - `word/styles.xml` → [`StyleCatalog`]
//! - `word/numbering.xml` → [`NumberingCatalog`]
//! - `word/document.xml` → [`SourceParagraph`](crate::model::SourceParagraph)s

pub mod document;
pub mod numbering;
pub mod styles;
mod xml;

pub use document::parse_paragraphs;
pub use numbering::{
    AbstractNumbering, LevelDefinition, LevelOverride, NumberingCatalog, NumberingInstance,
    RestartPolicy,
};
pub use styles::{StyleCatalog, StyleDefinition, StyleKind};

/// Path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Path of the style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";
/// Path of the numbering definitions part.
pub const NUMBERING_PART: &str = "word/numbering.xml";
