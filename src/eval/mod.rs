//! Style and numbering evaluation.
//!
//! Evaluation runs in three stages per paragraph:
//!
//! 1. [`PropertyResolver`] merges direct formatting, the style chain and
//!    document defaults.
//! 2. [`classify`] decides heading / list item / plain and the level.
//! 3. [`NumberingCounter`] advances counters in document order and renders
//!    the label.
//!
//! Stages 1 and 2 are stateless. Stage 3 lives inside an [`EvaluationPass`].

mod classify;
mod counter;
mod evaluator;
mod resolver;

pub use classify::{classify, Classification};
pub use counter::{normalize_bullet_text, render_label, CounterState, NumberingCounter};
pub use evaluator::{EvaluationPass, StyleEvaluator};
pub use resolver::PropertyResolver;
