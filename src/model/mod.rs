//! Data model shared by the parsers and the evaluator.
//!
//! Parsers turn WordprocessingML parts into these records, the evaluator
//! resolves and classifies them, and renderers turn the results into output.

mod format;
mod paragraph;
mod properties;

pub use format::*;
pub use paragraph::*;
pub use properties::*;
