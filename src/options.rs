//! Evaluation options configuration.

/// Options controlling how paragraphs are resolved and labels rendered.
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    /// Paragraphs without `w:pStyle` use the document's default paragraph style
    pub use_default_paragraph_style: bool,

    /// Map Symbol/Wingdings private-use bullet characters to Unicode
    pub normalize_symbol_bullets: bool,

    /// Render every placeholder as decimal on levels flagged `w:isLgl`
    pub honor_legal_numbering: bool,

    /// NFC-normalize paragraph text
    pub normalize_text: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            use_default_paragraph_style: true,
            normalize_symbol_bullets: true,
            honor_legal_numbering: true,
            normalize_text: false,
        }
    }
}

impl EvaluatorOptions {
    /// Create new evaluator options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to the default paragraph style for unstyled paragraphs.
    pub fn with_default_paragraph_style(mut self, enabled: bool) -> Self {
        self.use_default_paragraph_style = enabled;
        self
    }

    /// Map private-use bullet glyphs to Unicode.
    pub fn with_symbol_bullets(mut self, normalize: bool) -> Self {
        self.normalize_symbol_bullets = normalize;
        self
    }

    /// Honor `w:isLgl` on numbering levels.
    pub fn with_legal_numbering(mut self, honor: bool) -> Self {
        self.honor_legal_numbering = honor;
        self
    }

    /// NFC-normalize paragraph text.
    pub fn with_normalized_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = EvaluatorOptions::default();
        assert!(opts.use_default_paragraph_style);
        assert!(opts.normalize_symbol_bullets);
        assert!(opts.honor_legal_numbering);
        assert!(!opts.normalize_text);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = EvaluatorOptions::new()
            .with_default_paragraph_style(false)
            .with_symbol_bullets(false)
            .with_normalized_text(true);

        assert!(!opts.use_default_paragraph_style);
        assert!(!opts.normalize_symbol_bullets);
        assert!(opts.honor_legal_numbering);
        assert!(opts.normalize_text);
    }
}
