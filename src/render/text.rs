//! Console report renderer.

use crate::model::{EvaluatedParagraph, Label, ParagraphKind};

use super::options::RenderOptions;

/// Render evaluated paragraphs as the line-oriented console report.
///
/// Headings print `Level N Heading`, `Num level X` and `Num id Y`; list
/// items print `Level N bullet` and `Num id Y`. Both are followed by the
/// label line (when a label applies) and the paragraph text.
pub fn to_text(paragraphs: &[EvaluatedParagraph], options: &RenderOptions) -> String {
    let mut output = String::new();

    for para in paragraphs {
        let mut lines: Vec<String> = Vec::with_capacity(5);
        match para.kind {
            ParagraphKind::Heading { .. } => {
                lines.push(format!("Level {} Heading", para.heading_level()));
                lines.push(format!("Num level {}", para.num_level()));
                lines.push(format!("Num id {}", para.numbering_id()));
            }
            ParagraphKind::ListItem { .. } => {
                lines.push(format!("Level {} bullet", para.list_level()));
                lines.push(format!("Num id {}", para.numbering_id()));
            }
            ParagraphKind::Plain if options.include_plain => {}
            ParagraphKind::Plain => continue,
        }

        if options.show_style {
            if let Some(ref style) = para.style_id {
                lines.push(format!("Style {}", style));
            }
        }
        if let Some(line) = label_line(&para.label) {
            lines.push(line);
        }
        lines.push(para.text.clone());

        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        if options.paragraph_spacing {
            output.push('\n');
        }
    }

    output
}

/// The label line for a paragraph, or `None` when no label applies.
pub fn label_line(label: &Label) -> Option<String> {
    match label {
        Label::NotApplicable => None,
        Label::Unresolved => Some("(no label)".to_string()),
        Label::Text(text) => Some(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NumberingRef;

    fn para(kind: ParagraphKind, numbering: Option<(u32, u8)>, label: Label, text: &str) -> EvaluatedParagraph {
        EvaluatedParagraph {
            index: 0,
            text: text.to_string(),
            style_id: Some("Style1".to_string()),
            kind,
            numbering: numbering.map(|(num_id, ilvl)| NumberingRef { num_id, ilvl }),
            label,
            style_error: None,
        }
    }

    #[test]
    fn test_heading_and_list_lines() {
        let paragraphs = vec![
            para(
                ParagraphKind::Heading { level: 0 },
                Some((1, 0)),
                Label::Text("1.".to_string()),
                "Scope",
            ),
            para(
                ParagraphKind::ListItem { level: 1 },
                Some((3, 1)),
                Label::Text("a)".to_string()),
                "Item",
            ),
        ];
        let report = to_text(&paragraphs, &RenderOptions::default());
        assert_eq!(
            report,
            "Level 0 Heading\nNum level 0\nNum id 1\n1.\nScope\nLevel 1 bullet\nNum id 3\na)\nItem\n"
        );
    }

    #[test]
    fn test_heading_without_numbering() {
        let paragraphs = vec![para(
            ParagraphKind::Heading { level: 2 },
            None,
            Label::NotApplicable,
            "Title",
        )];
        let report = to_text(&paragraphs, &RenderOptions::default());
        assert_eq!(report, "Level 2 Heading\nNum level -1\nNum id -1\nTitle\n");
    }

    #[test]
    fn test_unresolved_label() {
        let paragraphs = vec![para(
            ParagraphKind::Heading { level: 0 },
            Some((42, 0)),
            Label::Unresolved,
            "Title",
        )];
        let report = to_text(&paragraphs, &RenderOptions::default());
        assert!(report.contains("Num id 42\n(no label)\nTitle\n"));
    }

    #[test]
    fn test_plain_paragraphs() {
        let paragraphs = vec![para(ParagraphKind::Plain, None, Label::NotApplicable, "Body")];
        assert_eq!(to_text(&paragraphs, &RenderOptions::default()), "");

        let options = RenderOptions::new().with_plain(true).with_style(true);
        assert_eq!(to_text(&paragraphs, &options), "Style Style1\nBody\n");
    }
}
