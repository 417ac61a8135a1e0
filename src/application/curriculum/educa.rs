//! educa vocabulary standard
//!
//! The definition lists vocabularies, each a flat list of terms pointing at
//! their parent. Parents may be defined after their children.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{
    Curriculum, CurriculumContext, DataStructureDescription, TermSource, TermTypeDescription,
    DISCIPLINE_TYPE,
};
use crate::application::ApplicationResult;
use crate::domain::{Dictionary, DictionaryEntry, LangString, Standard, Term, TermArena};

const SCHOOL_LEVELS_VOCABULARY: &str = "educa_school_levels";
const SCHOOL_SUBJECTS_VOCABULARY: &str = "educa_school_subjects";
const CONTEXT_TYPE: &str = "context";
const SCHOOL_LEVEL_TYPE: &str = "school_level";
const PLACEHOLDER_TYPE: &str = "placeholder";

/// Identifiers retired from the vocabulary and their replacements.
const DEPRECATED_IDENTIFIERS: &[(&str, &str)] = &[
    ("pre_school", "cycle_1"),
    ("primary_school", "cycle_2"),
    ("lower_secondary", "cycle_3"),
    ("natural_sciences", "nature_human_society"),
];

#[derive(Debug, Deserialize)]
struct VocabularyPayload {
    #[serde(default)]
    vocabularies: Vec<VocabularyDefinition>,
}

#[derive(Debug, Deserialize)]
struct VocabularyDefinition {
    #[serde(alias = "id")]
    identifier: String,
    #[serde(default)]
    name: Option<LangString>,
    #[serde(default)]
    terms: Vec<TermDefinition>,
}

#[derive(Debug, Deserialize)]
struct TermDefinition {
    #[serde(alias = "id")]
    identifier: String,
    #[serde(default)]
    name: Option<LangString>,
    #[serde(default)]
    parents: Vec<String>,
    #[serde(default)]
    deprecated: bool,
}

/// Type of a term, from its vocabulary and whether it has a parent.
fn derive_term_type(vocabulary: &str, has_parent: bool) -> &'static str {
    match (vocabulary, has_parent) {
        (SCHOOL_LEVELS_VOCABULARY, false) => CONTEXT_TYPE,
        (SCHOOL_LEVELS_VOCABULARY, true) => SCHOOL_LEVEL_TYPE,
        _ => DISCIPLINE_TYPE,
    }
}

/// Parse a vocabulary payload into a dictionary and tree.
///
/// Shared with the classification system, whose definition uses the same format.
#[instrument(level = "debug", skip(payload))]
pub(crate) fn parse_vocabularies(
    payload: &str,
    standard: Standard,
) -> ApplicationResult<(Dictionary, TermArena)> {
    let definition: VocabularyPayload = serde_json::from_str(payload)?;
    let mut dictionary = Dictionary::new();
    let mut tree = TermArena::with_root(Term::root(standard));
    let Some(root) = tree.root() else {
        return Ok((dictionary, tree));
    };

    for vocabulary in definition.vocabularies {
        let vocabulary_id = vocabulary.identifier.as_str();
        let vocabulary_name = vocabulary
            .name
            .clone()
            .unwrap_or_else(|| LangString::plain(vocabulary_id));
        dictionary.insert(DictionaryEntry::new(
            vocabulary_id,
            vocabulary_id,
            vocabulary_name.clone(),
        ));
        let vocabulary_idx = tree.append_term(
            root,
            Term::new(standard, vocabulary_id, vocabulary_id, Some(vocabulary_name)),
        )?;

        // Terms seen so far (or promised as someone's parent) in this vocabulary.
        let mut registry: HashMap<String, Index> = HashMap::new();
        let mut placeholders: HashSet<Index> = HashSet::new();

        for definition in vocabulary.terms {
            if definition.deprecated {
                debug!("skipping deprecated term {}", definition.identifier);
                continue;
            }
            let parent_id = definition.parents.first();
            let term_type = derive_term_type(vocabulary_id, parent_id.is_some());
            let name = definition
                .name
                .unwrap_or_else(|| LangString::plain(definition.identifier.as_str()));
            let term = Term::new(
                standard,
                term_type,
                definition.identifier.as_str(),
                Some(name.clone()),
            );
            let idx = match registry.get(&definition.identifier) {
                Some(&placeholder) if placeholders.remove(&placeholder) => {
                    tree.upgrade_detached(placeholder, term)?;
                    placeholder
                }
                Some(_) => {
                    warn!("duplicate term {} in {}", definition.identifier, vocabulary_id);
                    continue;
                }
                None => {
                    let idx = tree.insert_detached(term);
                    registry.insert(definition.identifier.clone(), idx);
                    idx
                }
            };
            dictionary.insert(DictionaryEntry::new(
                definition.identifier.as_str(),
                term_type,
                name,
            ));

            let parent_idx = match parent_id {
                None => vocabulary_idx,
                Some(parent_id) => match registry.get(parent_id) {
                    Some(&parent_idx) => parent_idx,
                    None => {
                        let stub = tree.insert_detached(Term::new(
                            standard,
                            PLACEHOLDER_TYPE,
                            parent_id.as_str(),
                            None,
                        ));
                        registry.insert(parent_id.clone(), stub);
                        placeholders.insert(stub);
                        stub
                    }
                },
            };
            tree.add_child(parent_idx, idx)?;
        }

        if !placeholders.is_empty() {
            warn!(
                "{}: {} parent(s) never defined, their subtrees are dropped",
                vocabulary_id,
                placeholders.len()
            );
        }
    }

    let pruned = tree.prune_detached();
    debug!(
        "parse_vocabularies: {} entries, {} terms, {} pruned",
        dictionary.len(),
        tree.len(),
        pruned
    );
    Ok((dictionary, tree))
}

/// The educa standard.
#[derive(Debug)]
pub struct EducaCurriculum {
    dictionary: Dictionary,
    tree: TermArena,
    deprecations: HashMap<String, String>,
}

impl Default for EducaCurriculum {
    fn default() -> Self {
        Self::new()
    }
}

impl EducaCurriculum {
    /// An empty curriculum: no dictionary, empty tree.
    pub fn new() -> Self {
        Self {
            dictionary: Dictionary::new(),
            tree: TermArena::new(),
            deprecations: DEPRECATED_IDENTIFIERS
                .iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
        }
    }

    pub fn parse(payload: &str, context: CurriculumContext) -> ApplicationResult<Self> {
        context.ensure(CurriculumContext::EducaJson)?;
        let (dictionary, tree) = parse_vocabularies(payload, Standard::Educa)?;
        Ok(Self {
            dictionary,
            tree,
            ..Self::new()
        })
    }

    /// Replace the deprecation table (`old id → canonical id`).
    pub fn with_deprecations<I, A, B>(mut self, deprecations: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.deprecations = deprecations
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect();
        self
    }

    pub fn describe_data_structure() -> Vec<DataStructureDescription> {
        vec![
            DataStructureDescription::new(
                "root",
                &[SCHOOL_LEVELS_VOCABULARY, SCHOOL_SUBJECTS_VOCABULARY],
            ),
            DataStructureDescription::new(SCHOOL_LEVELS_VOCABULARY, &[CONTEXT_TYPE]),
            DataStructureDescription::new(CONTEXT_TYPE, &[SCHOOL_LEVEL_TYPE]),
            DataStructureDescription::new(SCHOOL_LEVEL_TYPE, &[SCHOOL_LEVEL_TYPE]),
            DataStructureDescription::new(SCHOOL_SUBJECTS_VOCABULARY, &[DISCIPLINE_TYPE]),
            DataStructureDescription::new(DISCIPLINE_TYPE, &[DISCIPLINE_TYPE]),
        ]
    }

    pub fn describe_term_types() -> Vec<TermTypeDescription> {
        vec![
            TermTypeDescription::new(
                CONTEXT_TYPE,
                LangString::localized([("de", "Kontext"), ("fr", "Contexte")]),
                Some(LangString::localized([
                    ("de", "Bildungskontext, z.B. obligatorische Schule"),
                    ("fr", "Contexte de formation, p.ex. scolarité obligatoire"),
                ])),
            ),
            TermTypeDescription::new(
                SCHOOL_LEVEL_TYPE,
                LangString::localized([("de", "Schulstufe"), ("fr", "Degré scolaire")]),
                None,
            ),
            TermTypeDescription::new(
                DISCIPLINE_TYPE,
                LangString::localized([("de", "Fachbereich"), ("fr", "Discipline")]),
                None,
            ),
        ]
    }
}

impl TermSource for EducaCurriculum {
    fn standard(&self) -> Standard {
        Standard::Educa
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn sources(&self) -> &[&'static str] {
        &["educa"]
    }

    fn resolve_identifier(&self, id: &str) -> String {
        self.deprecations
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term {
        Term::new(Standard::Educa, term_type, id, Some(name))
    }
}

impl Curriculum for EducaCurriculum {
    fn tree(&self) -> &TermArena {
        &self.tree
    }

    fn replace_tree(&mut self, tree: TermArena) {
        self.tree = tree;
    }
}
