//! Report rendering options.

/// Options for the console report.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Also print plain paragraphs
    pub include_plain: bool,

    /// Print the paragraph's style id under its level line
    pub show_style: bool,

    /// Separate paragraphs with a blank line
    pub paragraph_spacing: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include plain paragraphs in the report.
    pub fn with_plain(mut self, include: bool) -> Self {
        self.include_plain = include;
        self
    }

    /// Show style ids.
    pub fn with_style(mut self, show: bool) -> Self {
        self.show_style = show;
        self
    }

    /// Set blank-line spacing between paragraphs.
    pub fn with_spacing(mut self, spacing: bool) -> Self {
        self.paragraph_spacing = spacing;
        self
    }
}
