//! # unstyle
//!
//! Effective paragraph style and numbering evaluation for Word documents.
//!
//! For every paragraph of a DOCX file this library works out whether Word
//! presents it as a heading, a list item or plain text, at which level, and
//! which numbering label ("2.1.", "III.", "•") Word would render for it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unstyle::evaluate_file;
//!
//! for para in evaluate_file("document.docx")? {
//!     if para.is_heading() {
//!         println!("H{} {:?} {}", para.heading_level(), para.rendered_label(), para.text);
//!     }
//! }
//! # Ok::<(), unstyle::Error>(())
//! ```
//!
//! ## Step by Step
//!
//! ```no_run
//! use unstyle::{EvaluatorOptions, StyleEvaluator};
//!
//! let options = EvaluatorOptions::new().with_legal_numbering(false);
//! let evaluator = StyleEvaluator::open_with_options("report.docx", options)?;
//!
//! // Stateless lookups
//! let first = &evaluator.paragraphs()[0];
//! let resolved = evaluator.resolve(first);
//! let class = evaluator.classify(&resolved);
//! println!("{:?}", class.kind);
//!
//! // In-order pass with numbering counters
//! for para in evaluator.pass() {
//!     println!("{:?} {}", para.label, para.text);
//! }
//! # Ok::<(), unstyle::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod eval;
pub mod model;
pub mod options;
pub mod render;

// Re-exports
pub use container::OoxmlContainer;
pub use docx::{NumberingCatalog, StyleCatalog};
pub use error::{Error, Result};
pub use eval::{Classification, EvaluationPass, StyleEvaluator};
pub use model::{
    EvaluatedParagraph, Label, NumberFormat, NumberingRef, ParagraphKind, ParagraphProperties,
    ResolvedParagraph, SourceParagraph,
};
pub use options::EvaluatorOptions;

use std::path::Path;

/// Evaluate every paragraph of a DOCX file with default options.
///
/// # Example
///
/// ```no_run
/// use unstyle::evaluate_file;
///
/// let paragraphs = evaluate_file("document.docx")?;
/// println!("Paragraphs: {}", paragraphs.len());
/// # Ok::<(), unstyle::Error>(())
/// ```
pub fn evaluate_file(path: impl AsRef<Path>) -> Result<Vec<EvaluatedParagraph>> {
    Ok(StyleEvaluator::open(path)?.evaluate())
}

/// Evaluate every paragraph of a DOCX package held in memory.
///
/// # Example
///
/// ```no_run
/// use unstyle::evaluate_bytes;
///
/// let data = std::fs::read("document.docx")?;
/// let paragraphs = evaluate_bytes(&data)?;
/// # Ok::<(), unstyle::Error>(())
/// ```
pub fn evaluate_bytes(data: &[u8]) -> Result<Vec<EvaluatedParagraph>> {
    Ok(StyleEvaluator::from_bytes(data.to_vec(), EvaluatorOptions::default())?.evaluate())
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
