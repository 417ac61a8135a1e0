//! Lehrplan 21 (cantonal XML) standard
//!
//! The XML nests fachbereich → (fach) → kompetenzbereich →
//! handlungs_themenaspekt → kompetenz → kompetenzstufe. Only the
//! kompetenzstufe knows which cycles it applies to, so the whole path down to
//! it is copied under every listed cycle root.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, instrument, trace};

use super::{
    Curriculum, CurriculumContext, DataStructureDescription, TermSource, TermTypeDescription,
};
use crate::application::ApplicationResult;
use crate::domain::{
    Dictionary, DictionaryEntry, DomainError, DomainResult, LangString, Lp21Attributes, Standard,
    StandardAttributes, Term, TermArena,
};

const CYCLE_TYPE: &str = "zyklus";
const ROOT_ELEMENT: &str = "lehrplan";
const NAME_ELEMENT: &str = "bezeichnung";
const CYCLE_ELEMENT: &str = "zyklus";
const LEAF_TYPE: &str = "kompetenzstufe";
const CYCLES: [u8; 3] = [1, 2, 3];

/// Element names that become terms, outermost first.
const TERM_ELEMENTS: &[&str] = &[
    "fachbereich",
    "fach",
    "kompetenzbereich",
    "handlungs_themenaspekt",
    "kompetenz",
    LEAF_TYPE,
];

/// Just enough of an XML element to walk the document twice.
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(e: &BytesStart<'_>) -> ApplicationResult<Self> {
        let mut element = XmlElement {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn read_document(payload: &str) -> ApplicationResult<XmlElement> {
    let mut reader = Reader::from_str(payload);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut document: Option<XmlElement> = None;

    let mut close = |stack: &mut Vec<XmlElement>, element: XmlElement| match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => document = Some(element),
    };

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(XmlElement::from_start(e)?),
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e)?;
                close(&mut stack, element);
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close(&mut stack, element);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    document.ok_or_else(|| {
        DomainError::InvalidDataStructure("LP21 payload has no root element".into()).into()
    })
}

/// Names by language, or the id when the element has none.
fn element_name(element: &XmlElement, id: &str) -> LangString {
    let names: Vec<(String, String)> = element
        .children_named(NAME_ELEMENT)
        .map(|n| {
            let lang = n.attribute("sprache").unwrap_or("de").to_string();
            (lang, n.text.trim().to_string())
        })
        .collect();
    if names.is_empty() {
        LangString::plain(id)
    } else {
        LangString::localized(names)
    }
}

fn element_cycles(element: &XmlElement, id: &str) -> DomainResult<Vec<u8>> {
    element
        .children_named(CYCLE_ELEMENT)
        .map(|c| {
            c.text
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|n| CYCLES.contains(n))
                .ok_or_else(|| {
                    DomainError::InvalidDataStructure(format!(
                        "{id}: invalid cycle '{}'",
                        c.text.trim()
                    ))
                })
        })
        .collect()
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The Lehrplan 21 standard.
#[derive(Debug, Default)]
pub struct Lp21Curriculum {
    dictionary: Dictionary,
    tree: TermArena,
}

impl Lp21Curriculum {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(payload))]
    pub fn parse(payload: &str, context: CurriculumContext) -> ApplicationResult<Self> {
        context.ensure(CurriculumContext::Lp21Xml)?;
        let document = read_document(payload)?;
        if document.name != ROOT_ELEMENT {
            return Err(DomainError::InvalidDataStructure(format!(
                "expected <{ROOT_ELEMENT}>, found <{}>",
                document.name
            ))
            .into());
        }
        let version = document.attribute("version").map(str::to_string);

        let mut curriculum = Self::new();
        for cycle in CYCLES {
            curriculum.dictionary.insert(
                DictionaryEntry::new(
                    cycle.to_string(),
                    CYCLE_TYPE,
                    LangString::plain(format!("Zyklus {cycle}")),
                )
                .with_version(version.clone()),
            );
        }

        let mut tree = TermArena::with_root(Term::root(Standard::Lp21));
        let root = tree
            .root()
            .ok_or_else(|| DomainError::InvalidDataStructure("empty LP21 tree".into()))?;
        for cycle in CYCLES {
            let id = cycle.to_string();
            let term = curriculum.term_factory(CYCLE_TYPE, &id, curriculum.term_name(&id));
            tree.append_term(root, term)?;
        }

        let mut path: Vec<(String, String)> = Vec::new();
        for child in &document.children {
            curriculum.visit(child, version.as_deref(), &mut path, &mut tree)?;
        }
        curriculum.tree = tree;
        debug!(
            "Lp21Curriculum::parse: {} entries, {} terms",
            curriculum.dictionary.len(),
            curriculum.tree.len()
        );
        Ok(curriculum)
    }

    /// Register `element` and, at a kompetenzstufe, fan its path out per cycle.
    fn visit(
        &mut self,
        element: &XmlElement,
        version: Option<&str>,
        path: &mut Vec<(String, String)>,
        tree: &mut TermArena,
    ) -> DomainResult<()> {
        if !TERM_ELEMENTS.contains(&element.name.as_str()) {
            trace!("ignoring <{}>", element.name);
            return Ok(());
        }
        let id = element
            .attribute("id")
            .ok_or_else(|| {
                DomainError::InvalidDataStructure(format!("<{}> without id", element.name))
            })?
            .to_string();
        let cycles = element_cycles(element, &id)?;
        self.dictionary.insert(
            DictionaryEntry::new(id.as_str(), element.name.as_str(), element_name(element, &id))
                .with_code(element.attribute("code").map(str::to_string))
                .with_url(element.attribute("url").map(str::to_string))
                .with_version(version.map(str::to_string))
                .with_school_years(split_list(element.attribute("schuljahre")))
                .with_cycles(cycles.clone()),
        );

        path.push((element.name.clone(), id));
        if element.name == LEAF_TYPE {
            for cycle in &cycles {
                self.insert_path(tree, *cycle, path)?;
            }
        } else {
            for child in &element.children {
                self.visit(child, version, path, tree)?;
            }
        }
        path.pop();
        Ok(())
    }

    /// Walk `path` below the cycle root, reusing children with the same id.
    fn insert_path(
        &self,
        tree: &mut TermArena,
        cycle: u8,
        path: &[(String, String)],
    ) -> DomainResult<()> {
        let root = tree.root().ok_or(DomainError::UnknownTerm)?;
        let mut parent = tree
            .find_child_by_identifier(root, &cycle.to_string())
            .ok_or(DomainError::UnknownTerm)?;
        for (term_type, id) in path {
            parent = match tree.find_child_by_identifier(parent, id) {
                Some(existing) => existing,
                None => {
                    let term = self.term_factory(term_type, id, self.term_name(id));
                    tree.append_term(parent, term)?
                }
            };
        }
        Ok(())
    }

    pub fn describe_data_structure() -> Vec<DataStructureDescription> {
        vec![
            DataStructureDescription::new("root", &[CYCLE_TYPE]),
            DataStructureDescription::new(CYCLE_TYPE, &["fachbereich"]),
            DataStructureDescription::new("fachbereich", &["fach", "kompetenzbereich"]),
            DataStructureDescription::new("fach", &["kompetenzbereich"]),
            DataStructureDescription::new("kompetenzbereich", &["handlungs_themenaspekt"]),
            DataStructureDescription::new("handlungs_themenaspekt", &["kompetenz"]),
            DataStructureDescription::new("kompetenz", &[LEAF_TYPE]),
            DataStructureDescription::new(LEAF_TYPE, &[]),
        ]
    }

    pub fn describe_term_types() -> Vec<TermTypeDescription> {
        [
            (CYCLE_TYPE, "Zyklus"),
            ("fachbereich", "Fachbereich"),
            ("fach", "Fach"),
            ("kompetenzbereich", "Kompetenzbereich"),
            ("handlungs_themenaspekt", "Handlungs-/Themenaspekt"),
            ("kompetenz", "Kompetenz"),
            (LEAF_TYPE, "Kompetenzstufe"),
        ]
        .into_iter()
        .map(|(term_type, name)| {
            TermTypeDescription::new(term_type, LangString::localized([("de", name)]), None)
        })
        .collect()
    }
}

impl TermSource for Lp21Curriculum {
    fn standard(&self) -> Standard {
        Standard::Lp21
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn sources(&self) -> &[&'static str] {
        &["lp21"]
    }

    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term {
        let attributes = self
            .dictionary
            .get(id)
            .map(|entry| Lp21Attributes {
                code: entry.code.clone(),
                url: entry.url.clone(),
                version: entry.version.clone(),
                cycles: entry.cycles.clone(),
                school_years: entry.school_years.clone(),
            })
            .unwrap_or_default();
        Term::new(Standard::Lp21, term_type, id, Some(name))
            .with_attributes(StandardAttributes::Lp21(attributes))
    }
}

impl Curriculum for Lp21Curriculum {
    fn tree(&self) -> &TermArena {
        &self.tree
    }

    fn replace_tree(&mut self, tree: TermArena) {
        self.tree = tree;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_xml_when_reading_then_element_tree_keeps_text_and_attributes() {
        let document = read_document(
            r#"<lehrplan version="1.0"><fachbereich id="fb1" code="D"><bezeichnung sprache="de">Deutsch &amp; Co</bezeichnung></fachbereich><leer/></lehrplan>"#,
        )
        .unwrap();

        assert_eq!(document.name, "lehrplan");
        assert_eq!(document.attribute("version"), Some("1.0"));
        assert_eq!(document.children.len(), 2);
        let fachbereich = &document.children[0];
        assert_eq!(fachbereich.attribute("code"), Some("D"));
        assert_eq!(element_name(fachbereich, "fb1").get("de"), Some("Deutsch & Co"));
        assert_eq!(element_name(&document.children[1], "x"), LangString::plain("x"));
    }

    #[test]
    fn given_out_of_range_cycle_when_reading_cycles_then_invalid_data_structure() {
        let document =
            read_document("<kompetenzstufe id=\"s1\"><zyklus>4</zyklus></kompetenzstufe>").unwrap();
        assert!(matches!(
            element_cycles(&document, "s1"),
            Err(DomainError::InvalidDataStructure(_))
        ));
    }

    #[test]
    fn given_comma_separated_years_when_splitting_then_trimmed_items() {
        assert_eq!(split_list(Some("1, 2,,3")), vec!["1", "2", "3"]);
        assert!(split_list(None).is_empty());
    }
}
