//! Output rendering for evaluated paragraphs.
//!
//! # Example
//!
//! ```no_run
//! use unstyle::{evaluate_file, render::*};
//!
//! let paragraphs = evaluate_file("document.docx")?;
//!
//! // Console report of headings and list items
//! let report = to_text(&paragraphs, &RenderOptions::default());
//!
//! // JSON
//! let json = to_json(&paragraphs, JsonFormat::Pretty)?;
//! # Ok::<(), unstyle::Error>(())
//! ```

mod json;
mod options;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use options::RenderOptions;
pub use text::{label_line, to_text};
