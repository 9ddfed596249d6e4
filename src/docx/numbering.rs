//! DOCX numbering (list) parsing and level resolution.

use std::collections::{BTreeMap, HashMap};

use quick_xml::events::{BytesStart, Event};

use super::styles::StyleCatalog;
use super::xml::{attr, num_attr, on_off, ElementPath};
use crate::error::{Error, Result};
use crate::model::{NumberFormat, MAX_LEVEL};

/// When a level's counter goes back to its start value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Restart whenever any shallower level is used
    #[default]
    AfterShallower,
    /// Never restart (`w:lvlRestart w:val="0"`)
    Never,
    /// Restart only when a level at or above this 0-based index is used
    AfterLevel(u8),
}

impl RestartPolicy {
    /// Parse `w:lvlRestart/@w:val` (1-based, 0 means never).
    pub fn from_val(val: u8) -> Self {
        match val {
            0 => RestartPolicy::Never,
            k => RestartPolicy::AfterLevel(k - 1),
        }
    }

    /// Whether a level at `own_level` restarts when `used_level` is incremented.
    pub fn restarts_on(&self, own_level: u8, used_level: u8) -> bool {
        if used_level >= own_level {
            return false;
        }
        match self {
            RestartPolicy::AfterShallower => true,
            RestartPolicy::Never => false,
            RestartPolicy::AfterLevel(k) => used_level <= *k,
        }
    }
}

/// A numbering level definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDefinition {
    /// Level index (0-8)
    pub level: u8,
    /// Number format
    pub format: NumberFormat,
    /// Level text template (e.g., "%1.", "%1.%2.")
    pub text: String,
    /// Start value
    pub start: u32,
    /// Restart policy
    pub restart: RestartPolicy,
    /// Paragraph style linked to this level
    pub p_style: Option<String>,
    /// Legal numbering: placeholders render as decimal
    pub is_legal: bool,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self {
            level: 0,
            format: NumberFormat::Decimal,
            text: String::new(),
            start: 1,
            restart: RestartPolicy::AfterShallower,
            p_style: None,
            is_legal: false,
        }
    }
}

impl LevelDefinition {
    /// Create a level with a format and template.
    pub fn new(level: u8, format: NumberFormat, text: impl Into<String>) -> Self {
        Self {
            level,
            format,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the start value.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set the restart policy.
    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }
}

/// Abstract numbering definition.
#[derive(Debug, Clone, Default)]
pub struct AbstractNumbering {
    /// Abstract numbering ID
    pub id: u32,
    /// Levels by index (0-8)
    pub levels: BTreeMap<u8, LevelDefinition>,
    /// `w:styleLink`: this definition backs a numbering style
    pub style_link: Option<String>,
    /// `w:numStyleLink`: levels come from the definition behind this style
    pub num_style_link: Option<String>,
}

/// Per-level override inside a numbering instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelOverride {
    /// `w:startOverride`
    pub start: Option<u32>,
    /// `w:lvl` replacing the abstract level entirely
    pub level: Option<LevelDefinition>,
}

/// Concrete numbering instance (`w:num`).
#[derive(Debug, Clone, Default)]
pub struct NumberingInstance {
    /// Numbering ID referenced by paragraphs
    pub id: u32,
    /// Abstract numbering ID
    pub abstract_id: u32,
    /// Overrides by level index
    pub overrides: BTreeMap<u8, LevelOverride>,
}

/// Collection of numbering definitions.
///
/// Pure lookup table once built: counters live in the evaluation pass, not
/// here.
#[derive(Debug, Clone, Default)]
pub struct NumberingCatalog {
    /// Abstract numbering definitions
    pub abstracts: HashMap<u32, AbstractNumbering>,
    /// Numbering instances
    pub instances: HashMap<u32, NumberingInstance>,
}

/// Owner of the `w:lvl` currently being read.
enum LevelOwner {
    Abstract,
    Override,
}

/// In-progress elements while reading numbering.xml.
#[derive(Default)]
struct NumberingReader {
    catalog: NumberingCatalog,
    current_abstract: Option<AbstractNumbering>,
    current_num: Option<NumberingInstance>,
    current_override: Option<(u8, LevelOverride)>,
    current_level: Option<(LevelOwner, LevelDefinition)>,
}

impl NumberingReader {
    /// Handle an opening or empty element.
    fn open(&mut self, e: &BytesStart, path: &ElementPath) {
        let name = e.local_name();
        match (path.parent(), name.as_ref()) {
            (Some(b"numbering"), b"abstractNum") => {
                self.current_abstract = num_attr(e, b"abstractNumId").map(|id| AbstractNumbering {
                    id,
                    ..Default::default()
                });
                if self.current_abstract.is_none() {
                    log::debug!("Skipping w:abstractNum without a numeric id");
                }
            }
            (Some(b"numbering"), b"num") => {
                self.current_num = num_attr(e, b"numId").map(|id| NumberingInstance {
                    id,
                    ..Default::default()
                });
                if self.current_num.is_none() {
                    log::debug!("Skipping w:num without a numeric id");
                }
            }
            (Some(b"abstractNum"), b"styleLink") => {
                if let Some(abstract_num) = self.current_abstract.as_mut() {
                    abstract_num.style_link = attr(e, b"val");
                }
            }
            (Some(b"abstractNum"), b"numStyleLink") => {
                if let Some(abstract_num) = self.current_abstract.as_mut() {
                    abstract_num.num_style_link = attr(e, b"val");
                }
            }
            (Some(b"abstractNum"), b"lvl") => {
                self.current_level = Some((LevelOwner::Abstract, new_level(e)));
            }
            (Some(b"num"), b"abstractNumId") => {
                if let (Some(num), Some(abstract_id)) =
                    (self.current_num.as_mut(), num_attr(e, b"val"))
                {
                    num.abstract_id = abstract_id;
                }
            }
            (Some(b"num"), b"lvlOverride") => {
                self.current_override = num_attr(e, b"ilvl")
                    .filter(|ilvl| *ilvl <= MAX_LEVEL)
                    .map(|ilvl| (ilvl, LevelOverride::default()));
            }
            (Some(b"lvlOverride"), b"startOverride") => {
                if let Some((_, ovr)) = self.current_override.as_mut() {
                    ovr.start = num_attr(e, b"val");
                }
            }
            (Some(b"lvlOverride"), b"lvl") => {
                if let Some((ilvl, _)) = self.current_override.as_ref() {
                    let mut level = new_level(e);
                    level.level = *ilvl;
                    self.current_level = Some((LevelOwner::Override, level));
                }
            }
            // mc:Fallback carries the numFmt older readers understand
            (Some(parent), child) if parent == b"lvl" || parent == b"Fallback" => {
                if let Some((_, level)) = self.current_level.as_mut() {
                    read_level_property(level, child, e);
                }
            }
            _ => {}
        }
    }

    /// Handle the end of an element (or an empty element that was opened).
    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"abstractNum" => {
                if let Some(abstract_num) = self.current_abstract.take() {
                    self.catalog.abstracts.insert(abstract_num.id, abstract_num);
                }
            }
            b"num" => {
                if let Some(num) = self.current_num.take() {
                    self.catalog.instances.insert(num.id, num);
                }
            }
            b"lvlOverride" => {
                if let (Some((ilvl, ovr)), Some(num)) =
                    (self.current_override.take(), self.current_num.as_mut())
                {
                    num.overrides.insert(ilvl, ovr);
                }
            }
            b"lvl" => match self.current_level.take() {
                Some((LevelOwner::Abstract, level)) => {
                    if let Some(abstract_num) = self.current_abstract.as_mut() {
                        abstract_num.levels.insert(level.level, level);
                    }
                }
                Some((LevelOwner::Override, level)) => {
                    if let Some((_, ovr)) = self.current_override.as_mut() {
                        ovr.level = Some(level);
                    }
                }
                None => {}
            },
            _ => {}
        }
    }
}

impl NumberingCatalog {
    /// Parse numbering from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut path = ElementPath::default();
        let mut state = NumberingReader::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    state.open(&e, &path);
                    path.push(e.local_name().as_ref());
                }
                Ok(Event::Empty(e)) => {
                    state.open(&e, &path);
                    state.close(e.local_name().as_ref());
                }
                Ok(Event::End(e)) => {
                    path.pop();
                    state.close(e.local_name().as_ref());
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(state.catalog)
    }

    /// Fill in abstract definitions that borrow their levels through
    /// `w:numStyleLink`.
    ///
    /// The linked numbering style names a `w:numId` in its properties; the
    /// levels of that instance's abstract definition are copied over. Only
    /// one hop is followed.
    pub fn link_styles(&mut self, styles: &StyleCatalog) {
        let mut borrowed = Vec::new();
        for abstract_num in self.abstracts.values() {
            let Some(link) = abstract_num.num_style_link.as_deref() else {
                continue;
            };
            let target = styles
                .resolve_style(link)
                .ok()
                .and_then(|props| props.numbering.num_id)
                .and_then(|num_id| self.instances.get(&num_id))
                .and_then(|num| self.abstracts.get(&num.abstract_id))
                .filter(|target| target.id != abstract_num.id);

            match target {
                Some(target) => borrowed.push((abstract_num.id, target.levels.clone())),
                None => log::debug!(
                    "Abstract numbering {} links to style '{}' which has no numbering",
                    abstract_num.id,
                    link
                ),
            }
        }

        for (id, levels) in borrowed {
            if let Some(abstract_num) = self.abstracts.get_mut(&id) {
                abstract_num.levels = levels;
            }
        }
    }

    /// Get a numbering instance by ID.
    pub fn instance(&self, num_id: u32) -> Option<&NumberingInstance> {
        self.instances.get(&num_id)
    }

    /// Whether the catalog holds no numbering instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Resolve the effective level definition for `(num_id, ilvl)`.
    ///
    /// A `w:lvl` override replaces the abstract level as a whole; a
    /// `w:startOverride` then replaces only the start value. Dangling
    /// instance or abstract references give `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `ilvl` above 8 is a caller bug and returns [`Error::LevelOutOfRange`].
    pub fn resolve_level(&self, num_id: u32, ilvl: u8) -> Result<Option<LevelDefinition>> {
        if ilvl > MAX_LEVEL {
            return Err(Error::LevelOutOfRange(ilvl));
        }

        let Some(instance) = self.instances.get(&num_id) else {
            log::debug!("Numbering instance {} is not defined", num_id);
            return Ok(None);
        };
        let Some(abstract_num) = self.abstracts.get(&instance.abstract_id) else {
            log::debug!(
                "Numbering instance {} references undefined abstract numbering {}",
                num_id,
                instance.abstract_id
            );
            return Ok(None);
        };

        let ovr = instance.overrides.get(&ilvl);
        let level = match ovr.and_then(|o| o.level.as_ref()) {
            Some(replacement) => Some(replacement.clone()),
            None => abstract_num.levels.get(&ilvl).cloned(),
        };

        Ok(level.map(|mut level| {
            if let Some(start) = ovr.and_then(|o| o.start) {
                level.start = start;
            }
            level
        }))
    }

    /// The level of `num_id` whose `w:pStyle` names `style_id`.
    pub fn level_for_style(&self, num_id: u32, style_id: &str) -> Option<u8> {
        let instance = self.instances.get(&num_id)?;
        let from_overrides = instance.overrides.iter().find_map(|(ilvl, ovr)| {
            ovr.level
                .as_ref()
                .filter(|l| l.p_style.as_deref() == Some(style_id))
                .map(|_| *ilvl)
        });
        from_overrides.or_else(|| {
            self.abstracts
                .get(&instance.abstract_id)?
                .levels
                .values()
                .find(|l| l.p_style.as_deref() == Some(style_id))
                .map(|l| l.level)
        })
    }
}

/// Start a level from its `w:lvl` element.
fn new_level(e: &BytesStart) -> LevelDefinition {
    let level = num_attr(e, b"ilvl").unwrap_or(0);
    LevelDefinition {
        level,
        ..Default::default()
    }
}

/// Apply one child element of a `w:lvl`.
fn read_level_property(level: &mut LevelDefinition, child: &[u8], e: &BytesStart) {
    match child {
        b"start" => level.start = num_attr(e, b"val").unwrap_or(1),
        b"numFmt" => {
            if let Some(tag) = attr(e, b"val") {
                level.format = NumberFormat::from_tag(&tag);
            }
        }
        b"lvlText" => level.text = attr(e, b"val").unwrap_or_default(),
        b"lvlRestart" => {
            if let Some(val) = num_attr(e, b"val") {
                level.restart = RestartPolicy::from_val(val);
            }
        }
        b"pStyle" => level.p_style = attr(e, b"val"),
        b"isLgl" => level.is_legal = on_off(e),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::styles::StyleDefinition;
    use crate::model::{NumberingProperties, ParagraphProperties};

    const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
             xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
    <w:abstractNum w:abstractNumId="0">
        <w:multiLevelType w:val="multilevel"/>
        <w:lvl w:ilvl="0">
            <w:start w:val="1"/>
            <w:numFmt w:val="decimal"/>
            <w:pStyle w:val="Heading1"/>
            <w:lvlText w:val="%1."/>
            <w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr>
        </w:lvl>
        <w:lvl w:ilvl="1">
            <w:start w:val="1"/>
            <w:numFmt w:val="lowerLetter"/>
            <w:lvlText w:val="%1.%2."/>
            <w:lvlRestart w:val="0"/>
            <w:isLgl/>
        </w:lvl>
    </w:abstractNum>
    <w:abstractNum w:abstractNumId="1">
        <w:lvl w:ilvl="0">
            <w:start w:val="1"/>
            <w:numFmt w:val="bullet"/>
            <w:lvlText w:val="•"/>
        </w:lvl>
        <w:lvl w:ilvl="1">
            <mc:AlternateContent>
                <mc:Choice Requires="w14">
                    <w:numFmt w:val="custom" w:format="001, 002, 003, ..."/>
                </mc:Choice>
                <mc:Fallback>
                    <w:numFmt w:val="decimalZero"/>
                </mc:Fallback>
            </mc:AlternateContent>
            <w:lvlText w:val="%2"/>
        </w:lvl>
    </w:abstractNum>
    <w:num w:numId="1">
        <w:abstractNumId w:val="0"/>
    </w:num>
    <w:num w:numId="2">
        <w:abstractNumId w:val="0"/>
        <w:lvlOverride w:ilvl="0">
            <w:startOverride w:val="5"/>
        </w:lvlOverride>
        <w:lvlOverride w:ilvl="1">
            <w:lvl w:ilvl="1">
                <w:numFmt w:val="upperRoman"/>
                <w:lvlText w:val="(%2)"/>
            </w:lvl>
        </w:lvlOverride>
    </w:num>
    <w:num w:numId="3">
        <w:abstractNumId w:val="1"/>
    </w:num>
    <w:num w:numId="9">
        <w:abstractNumId w:val="42"/>
    </w:num>
</w:numbering>"#;

    #[test]
    fn test_parse_numbering() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();

        assert_eq!(map.abstracts.len(), 2);
        assert_eq!(map.instances.len(), 4);

        let abstract_num = map.abstracts.get(&0).unwrap();
        assert_eq!(abstract_num.levels.len(), 2);
        let lvl0 = &abstract_num.levels[&0];
        assert_eq!(lvl0.format, NumberFormat::Decimal);
        assert_eq!(lvl0.text, "%1.");
        assert_eq!(lvl0.p_style.as_deref(), Some("Heading1"));
        let lvl1 = &abstract_num.levels[&1];
        assert_eq!(lvl1.format, NumberFormat::LowerLetter);
        assert_eq!(lvl1.restart, RestartPolicy::Never);
        assert!(lvl1.is_legal);
    }

    #[test]
    fn test_alternate_content_uses_fallback() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        let level = map.resolve_level(3, 1).unwrap().unwrap();
        assert_eq!(level.format, NumberFormat::DecimalZero);
        assert_eq!(level.text, "%2");
    }

    #[test]
    fn test_resolve_plain_instance() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        let level = map.resolve_level(1, 0).unwrap().unwrap();
        assert_eq!(level.start, 1);
        assert_eq!(level.text, "%1.");
        assert!(map.resolve_level(3, 0).unwrap().unwrap().format.is_bullet());
    }

    #[test]
    fn test_level_override_replaces_whole_level() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        let level = map.resolve_level(2, 1).unwrap().unwrap();

        assert_eq!(level.format, NumberFormat::UpperRoman);
        assert_eq!(level.text, "(%2)");
        // Fields the override did not set fall back to defaults, not to
        // the abstract level
        assert_eq!(level.restart, RestartPolicy::AfterShallower);
        assert!(!level.is_legal);
    }

    #[test]
    fn test_start_override_keeps_abstract_level() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        let level = map.resolve_level(2, 0).unwrap().unwrap();
        assert_eq!(level.start, 5);
        assert_eq!(level.text, "%1.");
        assert_eq!(level.format, NumberFormat::Decimal);
    }

    #[test]
    fn test_dangling_references_are_absent() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        assert!(map.resolve_level(77, 0).unwrap().is_none());
        assert!(map.resolve_level(9, 0).unwrap().is_none());
        assert!(map.resolve_level(1, 5).unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_level_is_rejected() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        assert!(matches!(
            map.resolve_level(1, 9),
            Err(Error::LevelOutOfRange(9))
        ));
    }

    #[test]
    fn test_level_for_style() {
        let map = NumberingCatalog::parse(NUMBERING_XML).unwrap();
        assert_eq!(map.level_for_style(1, "Heading1"), Some(0));
        assert_eq!(map.level_for_style(1, "Heading2"), None);
        assert_eq!(map.level_for_style(404, "Heading1"), None);
    }

    #[test]
    fn test_restart_policy() {
        assert!(RestartPolicy::AfterShallower.restarts_on(2, 0));
        assert!(RestartPolicy::AfterShallower.restarts_on(2, 1));
        assert!(!RestartPolicy::AfterShallower.restarts_on(2, 2));
        assert!(!RestartPolicy::Never.restarts_on(2, 0));

        let after_first = RestartPolicy::from_val(1);
        assert_eq!(after_first, RestartPolicy::AfterLevel(0));
        assert!(after_first.restarts_on(2, 0));
        assert!(!after_first.restarts_on(2, 1));
        assert_eq!(RestartPolicy::from_val(0), RestartPolicy::Never);
    }

    #[test]
    fn test_num_style_link() {
        let xml = r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:abstractNum w:abstractNumId="10">
        <w:styleLink w:val="LegalList"/>
        <w:lvl w:ilvl="0">
            <w:numFmt w:val="upperRoman"/>
            <w:lvlText w:val="%1."/>
        </w:lvl>
    </w:abstractNum>
    <w:abstractNum w:abstractNumId="11">
        <w:numStyleLink w:val="LegalList"/>
    </w:abstractNum>
    <w:num w:numId="20"><w:abstractNumId w:val="10"/></w:num>
    <w:num w:numId="21"><w:abstractNumId w:val="11"/></w:num>
</w:numbering>"#;
        let mut map = NumberingCatalog::parse(xml).unwrap();
        assert!(map.resolve_level(21, 0).unwrap().is_none());

        let mut styles = StyleCatalog::default();
        styles.insert(
            StyleDefinition::paragraph("LegalList").with_properties(ParagraphProperties {
                numbering: NumberingProperties {
                    num_id: Some(20),
                    ilvl: None,
                },
                ..Default::default()
            }),
        );
        map.link_styles(&styles);

        let level = map.resolve_level(21, 0).unwrap().unwrap();
        assert_eq!(level.format, NumberFormat::UpperRoman);
    }

    #[test]
    fn test_empty_xml() {
        let map = NumberingCatalog::parse("").unwrap();
        assert!(map.is_empty());
    }
}
