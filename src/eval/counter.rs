//! Numbering counters and label rendering.
//!
//! Counters are the only order-dependent state of an evaluation: one
//! [`CounterState`] belongs to exactly one pass over one document and is fed
//! paragraphs strictly in document order.

use std::collections::HashMap;

use crate::docx::{LevelDefinition, NumberingCatalog};
use crate::model::{Label, NumberFormat, NumberingRef, ParagraphKind, ResolvedParagraph, MAX_LEVEL};
use crate::options::EvaluatorOptions;

use super::classify::Classification;

const LEVELS: usize = MAX_LEVEL as usize + 1;

/// Per-instance counters. `None` marks a level not used since its last reset.
#[derive(Debug, Clone, Default)]
pub struct CounterState {
    counters: HashMap<u32, [Option<u32>; LEVELS]>,
}

impl CounterState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, if it has been used since its last reset.
    pub fn value(&self, num_id: u32, ilvl: u8) -> Option<u32> {
        self.counters
            .get(&num_id)
            .and_then(|slots| slots.get(usize::from(ilvl)).copied().flatten())
    }

    /// Increment the counter for `num_ref` and reset deeper levels whose
    /// restart policy fires. Returns the new value.
    ///
    /// The first increment after a reset yields the level's start value.
    pub fn advance(
        &mut self,
        num_ref: NumberingRef,
        level: &LevelDefinition,
        numbering: &NumberingCatalog,
    ) -> u32 {
        let own = usize::from(num_ref.ilvl.min(MAX_LEVEL));
        let slots = self.counters.entry(num_ref.num_id).or_insert([None; LEVELS]);

        let value = match slots[own] {
            Some(current) => current.saturating_add(1),
            None => level.start,
        };
        slots[own] = Some(value);

        for deeper in (own + 1)..LEVELS {
            let depth = deeper as u8;
            let restart = numbering
                .resolve_level(num_ref.num_id, depth)
                .ok()
                .flatten()
                .map(|l| l.restart)
                .unwrap_or_default();
            if restart.restarts_on(depth, own as u8) {
                slots[deeper] = None;
            }
        }

        value
    }

    /// Forget all counters.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

/// Produces labels for classified paragraphs in document order.
#[derive(Debug, Default)]
pub struct NumberingCounter {
    state: CounterState,
}

impl NumberingCounter {
    /// Create a counter with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter values seen so far.
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Compute the label for the next paragraph, advancing counters when the
    /// paragraph is numbered.
    ///
    /// Plain paragraphs never touch the counters. Headings use their
    /// numbering reference like list items do; a heading without one has no
    /// label and a heading whose reference does not resolve is unresolved.
    pub fn label_for(
        &mut self,
        resolved: &ResolvedParagraph,
        classification: &Classification,
        numbering: &NumberingCatalog,
        options: &EvaluatorOptions,
    ) -> Label {
        if classification.kind == ParagraphKind::Plain {
            return Label::NotApplicable;
        }
        let Some(num_ref) = resolved.numbering else {
            return Label::NotApplicable;
        };
        let Some(level) = classification.level.as_ref() else {
            return Label::Unresolved;
        };

        self.state.advance(num_ref, level, numbering);
        Label::Text(render_label(&self.state, num_ref, level, numbering, options))
    }
}

/// Render a level's template against the current counters.
///
/// `%1`-`%9` are replaced by the counter of that level formatted with that
/// level's number format (decimal throughout when the current level is
/// legal-style). A level with no value since its reset shows its start
/// value. Bullet levels render their template text verbatim, both as the
/// label itself and when another level's template refers to them.
pub fn render_label(
    state: &CounterState,
    num_ref: NumberingRef,
    level: &LevelDefinition,
    numbering: &NumberingCatalog,
    options: &EvaluatorOptions,
) -> String {
    match level.format {
        NumberFormat::Bullet => return bullet_text(level, options),
        NumberFormat::None => return String::new(),
        _ => {}
    }

    let legal = level.is_legal && options.honor_legal_numbering;
    let mut label = String::with_capacity(level.text.len() + 4);
    let mut chars = level.text.chars().peekable();

    while let Some(c) = chars.next() {
        let placeholder = match (c, chars.peek()) {
            ('%', Some(d @ '1'..='9')) => d.to_digit(10),
            _ => None,
        };
        let Some(position) = placeholder else {
            label.push(c);
            continue;
        };
        chars.next();

        let target = (position - 1) as u8;
        let target_level = if target == level.level {
            Some(level.clone())
        } else {
            numbering
                .resolve_level(num_ref.num_id, target)
                .ok()
                .flatten()
        };
        let start = target_level.as_ref().map_or(1, |l| l.start);
        let value = state.value(num_ref.num_id, target).unwrap_or(start);

        match target_level {
            Some(ref l) if l.format.is_bullet() => label.push_str(&bullet_text(l, options)),
            _ if legal => label.push_str(&value.to_string()),
            Some(l) => label.push_str(&l.format.format(value)),
            None => label.push_str(&value.to_string()),
        }
    }

    label
}

/// The literal glyph of a bullet level; its counter is never shown.
fn bullet_text(level: &LevelDefinition, options: &EvaluatorOptions) -> String {
    if options.normalize_symbol_bullets {
        normalize_bullet_text(&level.text)
    } else {
        level.text.clone()
    }
}

/// Map Symbol/Wingdings private-use code points in bullet text to their
/// Unicode look-alikes.
pub fn normalize_bullet_text(text: &str) -> String {
    text.chars().map(symbol_to_unicode).collect()
}

fn symbol_to_unicode(c: char) -> char {
    match c as u32 {
        0xF0B7 => '\u{2022}',
        0xF0A7 => '\u{25AA}',
        0xF0A8 => '\u{25CB}',
        0xF0D8 => '\u{27A2}',
        0xF0FC => '\u{2713}',
        0xF076 => '\u{2756}',
        cp @ 0xF020..=0xF0FF => char::from_u32(cp - 0xF000).unwrap_or(c),
        _ => c,
    }
}
