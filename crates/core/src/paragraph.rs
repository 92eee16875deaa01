//! Paragraph classification.
//!
//! A paragraph's computed properties come from four layers, highest first:
//! its own declarations, the level style of the list it is numbered with
//! directly, its paragraph style, and the level style of the list its
//! paragraph style is numbered with.

use crate::records::{ParagraphRecord, RunRecord};
use crate::{PassConfig, PassError};
use quire_numbering::{
    NumberingError, NumberingLookup, ResolvedNumbering, is_recognized_marker, render_marker,
};
use quire_style::{CascadeError, ResolvedStyles, StyleParseError, parse_points};
use quire_types::{LIST_INSTANCE_KEY, LIST_LEVEL_KEY, ListInstanceId, PropertyMap, StyleId};

/// A list instance and zero-based level.
pub type NumberingReference = (ListInstanceId, usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub computed: PropertyMap,
    /// `margin-left + text-indent`, in points.
    pub indentation: f32,
    pub numbering: Option<NumberingReference>,
    pub is_list_item: bool,
}

/// Reads the numbering reference keys of a property map.
pub fn numbering_reference(
    properties: &PropertyMap,
) -> Result<Option<NumberingReference>, PassError> {
    let Some(instance) = properties.get(LIST_INSTANCE_KEY) else {
        return Ok(None);
    };
    let level = match properties.get(LIST_LEVEL_KEY) {
        None => 0,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| StyleParseError::InvalidValue {
                property: LIST_LEVEL_KEY.to_string(),
                value: raw.to_string(),
            })?,
    };
    Ok(Some((ListInstanceId::from(instance), level)))
}

fn length(computed: &PropertyMap, key: &str) -> Result<f32, PassError> {
    match computed.get(key) {
        Some(value) => Ok(parse_points(key, value)?),
        None => Ok(0.0),
    }
}

pub struct ParagraphClassifier<'a> {
    styles: &'a ResolvedStyles,
    numbering: &'a ResolvedNumbering,
    config: &'a PassConfig,
}

impl<'a> ParagraphClassifier<'a> {
    pub fn new(
        styles: &'a ResolvedStyles,
        numbering: &'a ResolvedNumbering,
        config: &'a PassConfig,
    ) -> Self {
        Self {
            styles,
            numbering,
            config,
        }
    }

    /// The resolved map of a style, empty for no style.
    pub fn style_properties(&self, style: Option<&StyleId>) -> Result<PropertyMap, PassError> {
        let Some(id) = style else {
            return Ok(PropertyMap::new());
        };
        self.styles.properties(id).cloned().ok_or_else(|| {
            CascadeError::UnresolvedReference {
                from: None,
                missing: id.clone(),
            }
            .into()
        })
    }

    fn level_style(&self, reference: Option<&NumberingReference>) -> Result<PropertyMap, PassError> {
        let Some((instance, level)) = reference else {
            return Ok(PropertyMap::new());
        };
        if instance.is_none_marker() {
            return Ok(PropertyMap::new());
        }
        let resolved = self
            .numbering
            .instance(instance)
            .ok_or_else(|| NumberingError::UnresolvedInstance(instance.clone()))?;
        Ok(resolved
            .level(*level)
            .map(|l| l.style.clone())
            .unwrap_or_default())
    }

    /// A literal marker must match the recognized marker shapes. Without one,
    /// the level's own template is rendered at its start values and checked
    /// instead.
    fn marker_recognized(&self, marker: Option<&str>, reference: &NumberingReference) -> bool {
        if let Some(literal) = marker {
            return is_recognized_marker(literal);
        }
        let (id, level) = reference;
        let Some(instance) = self.numbering.instance(id) else {
            return false;
        };
        let starts: Vec<u32> = (0..=*level)
            .map(|l| instance.level(l).map_or(1, |d| d.start))
            .collect();
        render_marker(&instance.levels, &starts).is_some_and(|m| is_recognized_marker(&m))
    }

    pub fn classify(
        &self,
        paragraph: &ParagraphRecord,
        own: &PropertyMap,
    ) -> Result<Classification, PassError> {
        let style = self.style_properties(paragraph.style.as_ref())?;
        let own_reference = numbering_reference(own)?;
        let style_reference = numbering_reference(&style)?;

        let computed = self
            .level_style(style_reference.as_ref())?
            .overlay(&style)
            .overlay(&self.level_style(own_reference.as_ref())?)
            .overlay(own);

        let indentation = length(&computed, "margin-left")? + length(&computed, "text-indent")?;
        let numbering = own_reference.or(style_reference);
        let is_list_item = match &numbering {
            Some(reference) => {
                !reference.0.is_none_marker()
                    && !self.config.is_heading(paragraph.style.as_ref())
                    && self.marker_recognized(paragraph.marker.as_deref(), reference)
            }
            None => false,
        };

        Ok(Classification {
            computed,
            indentation,
            numbering,
            is_list_item,
        })
    }

    /// The full property set of one run: the paragraph style, overlaid by the
    /// run's own declarations, overlaid by its character style.
    pub fn run_properties(
        &self,
        paragraph_style: &PropertyMap,
        run: &RunRecord,
    ) -> Result<PropertyMap, PassError> {
        let own = crate::records::to_properties(&run.declarations)?;
        let character = self.style_properties(run.style.as_ref())?;
        Ok(paragraph_style.overlay(&own).overlay(&character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_numbering::{
        AbstractListDefinition, LevelDefinition, ListInstance, NumberFormat, NumberingResolver,
        NumberingSet,
    };
    use quire_style::{CascadeResolver, StyleKind, StyleRule, StyleSet};

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs.iter().copied().collect()
    }

    struct Fixture {
        styles: ResolvedStyles,
        numbering: ResolvedNumbering,
        config: PassConfig,
    }

    fn fixture() -> Fixture {
        let style_set = StyleSet::new(vec![
            StyleRule::new("Normal", StyleKind::Paragraph, props(&[("color", "black")])),
            StyleRule::new(
                "ListStyle",
                StyleKind::Paragraph,
                props(&[
                    ("-list-instance", "S"),
                    ("-list-level", "0"),
                    ("color", "green"),
                    ("margin-left", "10pt"),
                ]),
            )
            .based_on("Normal"),
            StyleRule::new("Heading1", StyleKind::Paragraph, props(&[])),
            StyleRule::new("Strong", StyleKind::Character, props(&[("font-weight", "bold")])),
        ])
        .unwrap();
        let styles = CascadeResolver::new(&style_set).resolve_all().unwrap();

        let mut own_level = LevelDefinition::new(NumberFormat::Decimal, "%1.", 1);
        own_level.properties = props(&[("margin-left", "36pt"), ("text-indent", "-18pt")]);
        let mut style_level = LevelDefinition::new(NumberFormat::Decimal, "%1.", 1);
        style_level.properties = props(&[("color", "red"), ("font-style", "italic")]);
        let set = NumberingSet::new(
            vec![
                AbstractListDefinition::with_levels("Own", vec![Some(own_level)]),
                AbstractListDefinition::with_levels("Sty", vec![Some(style_level)]),
                AbstractListDefinition::with_levels(
                    "Legal",
                    vec![Some(LevelDefinition::new(NumberFormat::Decimal, "Article %1", 1))],
                ),
            ],
            vec![
                ListInstance::new("P", "Own"),
                ListInstance::new("S", "Sty"),
                ListInstance::new("X", "Legal"),
            ],
        )
        .unwrap();
        let numbering = NumberingResolver::new(&set, &styles).resolve_all().unwrap();
        let config = PassConfig {
            heading_styles: vec![StyleId::from("Heading1")],
            ..PassConfig::default()
        };
        Fixture {
            styles,
            numbering,
            config,
        }
    }

    fn paragraph(style: Option<&str>, marker: Option<&str>) -> ParagraphRecord {
        ParagraphRecord {
            style: style.map(StyleId::from),
            marker: marker.map(str::to_string),
            ..ParagraphRecord::default()
        }
    }

    #[test]
    fn test_computed_precedence() {
        let f = fixture();
        let classifier = ParagraphClassifier::new(&f.styles, &f.numbering, &f.config);

        let own = props(&[("-list-instance", "P"), ("font-style", "normal")]);
        let c = classifier
            .classify(&paragraph(Some("ListStyle"), Some("1.\t")), &own)
            .unwrap();

        // own > own level style > paragraph style > style level style
        assert_eq!(c.computed.get("font-style"), Some("normal"));
        assert_eq!(c.computed.get("margin-left"), Some("36pt"));
        assert_eq!(c.computed.get("color"), Some("green"));
        assert_eq!(c.indentation, 18.0);
        assert_eq!(c.numbering, Some((ListInstanceId::from("P"), 0)));
        assert!(c.is_list_item);
    }

    #[test]
    fn test_numbering_through_paragraph_style() {
        let f = fixture();
        let classifier = ParagraphClassifier::new(&f.styles, &f.numbering, &f.config);
        let c = classifier
            .classify(&paragraph(Some("ListStyle"), None), &PropertyMap::new())
            .unwrap();
        assert_eq!(c.numbering, Some((ListInstanceId::from("S"), 0)));
        assert_eq!(c.computed.get("font-style"), Some("italic"));
        assert_eq!(c.indentation, 10.0);
        assert!(c.is_list_item);
    }

    #[test]
    fn test_non_list_paragraphs() {
        let f = fixture();
        let classifier = ParagraphClassifier::new(&f.styles, &f.numbering, &f.config);

        // Explicitly unnumbered.
        let own = props(&[("-list-instance", "0")]);
        let c = classifier
            .classify(&paragraph(Some("ListStyle"), Some("1.\t")), &own)
            .unwrap();
        assert!(!c.is_list_item);

        // Heading styles are never list items.
        let own = props(&[("-list-instance", "P")]);
        let c = classifier
            .classify(&paragraph(Some("Heading1"), Some("1.\t")), &own)
            .unwrap();
        assert!(!c.is_list_item);

        // Unrecognized literal marker.
        let c = classifier
            .classify(&paragraph(None, Some("(1)\t")), &own)
            .unwrap();
        assert!(!c.is_list_item);

        // Unrecognized rendered marker.
        let own = props(&[("-list-instance", "X")]);
        let c = classifier.classify(&paragraph(None, None), &own).unwrap();
        assert!(!c.is_list_item);
    }

    #[test]
    fn test_bad_references_are_fatal() {
        let _ = env_logger::builder().is_test(true).try_init();
        let f = fixture();
        let classifier = ParagraphClassifier::new(&f.styles, &f.numbering, &f.config);

        let err = classifier
            .classify(&paragraph(Some("Nope"), None), &PropertyMap::new())
            .unwrap_err();
        assert!(err.is_unresolved_reference());

        let own = props(&[("-list-instance", "Q")]);
        let err = classifier.classify(&paragraph(None, None), &own).unwrap_err();
        assert!(err.is_unresolved_reference());

        let own = props(&[("-list-instance", "P"), ("-list-level", "two")]);
        let err = classifier.classify(&paragraph(None, None), &own).unwrap_err();
        assert!(matches!(err, PassError::Value(_)));
    }

    #[test]
    fn test_run_properties_merge_order() {
        let f = fixture();
        let classifier = ParagraphClassifier::new(&f.styles, &f.numbering, &f.config);
        let paragraph_style = props(&[("color", "black"), ("font-weight", "normal")]);
        let run = RunRecord {
            text: "x".into(),
            style: Some(StyleId::from("Strong")),
            declarations: vec![
                ("font-weight".into(), "light".into()),
                ("color".into(), "blue".into()),
            ],
        };
        let merged = classifier.run_properties(&paragraph_style, &run).unwrap();
        assert_eq!(
            merged,
            props(&[("color", "blue"), ("font-weight", "bold")])
        );
    }
}
