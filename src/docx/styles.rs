//! DOCX styles parsing and based-on resolution.

use std::collections::{HashMap, HashSet};

use quick_xml::events::Event;

use super::xml::{attr, read_paragraph_property, ElementPath};
use crate::error::{Error, Result};
use crate::model::ParagraphProperties;

/// Style kind (`w:style/@w:type`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StyleKind {
    #[default]
    Paragraph,
    Character,
    Table,
    Numbering,
}

/// A parsed style definition.
#[derive(Debug, Clone, Default)]
pub struct StyleDefinition {
    /// Style ID (e.g., "Heading1")
    pub id: String,
    /// Style name (e.g., "heading 1")
    pub name: String,
    /// Style kind
    pub kind: StyleKind,
    /// Based on another style
    pub based_on: Option<String>,
    /// Paragraph properties set directly on this style
    pub properties: ParagraphProperties,
    /// Marked `w:default="1"`
    pub is_default: bool,
}

impl StyleDefinition {
    /// Create a paragraph style.
    pub fn paragraph(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the parent style.
    pub fn based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    /// Set the style's own properties.
    pub fn with_properties(mut self, properties: ParagraphProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// Collection of styles from styles.xml.
///
/// Immutable once built; lookups never mutate it, so one catalog can be
/// shared by concurrent passes over the same document.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    /// Styles by ID
    pub styles: HashMap<String, StyleDefinition>,
    /// Default paragraph style
    pub default_paragraph: Option<String>,
    /// Document-wide paragraph defaults (`w:docDefaults/w:pPrDefault`)
    pub defaults: ParagraphProperties,
}

impl StyleCatalog {
    /// Parse styles from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut catalog = StyleCatalog::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut path = ElementPath::default();
        let mut current: Option<StyleDefinition> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    catalog.read_element(&e, &path, &mut current);
                    path.push(e.local_name().as_ref());
                }
                Ok(Event::Empty(e)) => {
                    catalog.read_element(&e, &path, &mut current);
                    // A self-closing w:style has no End event
                    if e.local_name().as_ref() == b"style" && path.ends_with(&[b"styles"]) {
                        catalog.finish_style(&mut current);
                    }
                }
                Ok(Event::End(e)) => {
                    path.pop();
                    if e.local_name().as_ref() == b"style" {
                        catalog.finish_style(&mut current);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(catalog)
    }

    /// Handle one opening or empty element.
    fn read_element(
        &mut self,
        e: &quick_xml::events::BytesStart,
        path: &ElementPath,
        current: &mut Option<StyleDefinition>,
    ) {
        let name = e.local_name();
        if name.as_ref() == b"style" && path.ends_with(&[b"styles"]) {
            *current = Some(StyleDefinition {
                id: attr(e, b"styleId").unwrap_or_default(),
                kind: match attr(e, b"type").as_deref() {
                    Some("character") => StyleKind::Character,
                    Some("table") => StyleKind::Table,
                    Some("numbering") => StyleKind::Numbering,
                    _ => StyleKind::Paragraph,
                },
                is_default: attr(e, b"default").is_some_and(|v| v == "1" || v == "true"),
                ..Default::default()
            });
            return;
        }

        if path.ends_with(&[b"docDefaults", b"pPrDefault", b"pPr"])
            || path.ends_with(&[b"docDefaults", b"pPrDefault", b"pPr", b"numPr"])
        {
            if let Some(parent) = path.parent() {
                read_paragraph_property(&mut self.defaults, parent, e);
            }
            return;
        }

        let Some(style) = current.as_mut() else {
            return;
        };

        if path.ends_with(&[b"style"]) {
            match name.as_ref() {
                b"name" => style.name = attr(e, b"val").unwrap_or_default(),
                b"basedOn" => style.based_on = attr(e, b"val").filter(|v| !v.is_empty()),
                _ => {}
            }
        } else if path.ends_with(&[b"style", b"pPr"]) || path.ends_with(&[b"style", b"pPr", b"numPr"])
        {
            if let Some(parent) = path.parent() {
                read_paragraph_property(&mut style.properties, parent, e);
            }
        }
    }

    fn finish_style(&mut self, current: &mut Option<StyleDefinition>) {
        if let Some(style) = current.take() {
            self.insert(style);
        }
    }

    /// Add a style, tracking the default paragraph style.
    pub fn insert(&mut self, style: StyleDefinition) {
        if style.id.is_empty() {
            log::debug!("Skipping style without w:styleId");
            return;
        }
        if style.is_default && style.kind == StyleKind::Paragraph {
            self.default_paragraph = Some(style.id.clone());
        }
        self.styles.insert(style.id.clone(), style);
    }

    /// Get a style by ID without resolving inheritance.
    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the catalog holds no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The based-on chain of a style, leaf first.
    ///
    /// The walk stops at a style without a parent, at a parent id that is
    /// not defined, or at a parent of a different kind. Revisiting a style
    /// already on the chain is a cycle and fails for `id`. An unknown `id`
    /// yields an empty chain.
    pub fn chain(&self, id: &str) -> Result<Vec<&StyleDefinition>> {
        let mut chain = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut next = self.styles.get(id);

        while let Some(style) = next {
            if !visited.insert(style.id.as_str()) {
                log::warn!(
                    "Style '{}' has a based-on cycle through '{}'",
                    id,
                    style.id
                );
                return Err(Error::StyleCycle {
                    style_id: id.to_string(),
                });
            }
            chain.push(style);
            next = match style.based_on.as_deref() {
                Some(parent) => {
                    match self.styles.get(parent) {
                        Some(found) if found.kind != style.kind => {
                            log::debug!(
                                "Style '{}' is based on '{}' of a different kind ({:?})",
                                style.id,
                                parent,
                                found.kind
                            );
                            None
                        }
                        Some(found) => Some(found),
                        None => {
                            log::debug!(
                                "Style '{}' is based on unknown style '{}'",
                                style.id,
                                parent
                            );
                            None
                        }
                    }
                }
                None => None,
            };
        }

        Ok(chain)
    }

    /// Effective properties of a style, merged root to leaf.
    ///
    /// Each style in the chain overrides only the fields it sets itself.
    /// Unknown ids resolve to the empty property set.
    pub fn resolve_style(&self, id: &str) -> Result<ParagraphProperties> {
        let chain = self.chain(id)?;
        let mut resolved = ParagraphProperties::default();
        for style in chain.iter().rev() {
            resolved.overlay(&style.properties);
        }
        Ok(resolved)
    }
}
