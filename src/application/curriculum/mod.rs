//! Curriculum standards folded into one term tree
//!
//! Every standard parses its own definition payload into a [`Dictionary`] and
//! a tree, and can rebuild that tree from LOM classification data. Lookups
//! always go through the dictionary so that stale names or types in stored
//! records never reach the tree.

mod any;
mod classification;
mod educa;
mod lp21;
mod per;
pub mod reconstruct;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    ascii_dump, Classification, Dictionary, DictionaryEntry, DomainError, DomainResult,
    LangString, Standard, TaxonTreeRecord, Term, TermArena,
};

pub use any::AnyCurriculum;
pub use classification::ClassificationSystemCurriculum;
pub use educa::EducaCurriculum;
pub use lp21::Lp21Curriculum;
pub use per::PerCurriculum;

/// Returned by name/type lookups for unknown identifiers.
pub const NOT_AVAILABLE: &str = "n/a";

/// Term type that forms independent branches during path reconstruction.
pub const DISCIPLINE_TYPE: &str = "discipline";

/// Payload format selector, one per standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurriculumContext {
    EducaJson,
    Lp21Xml,
    PerApi,
    ClassificationSystemJson,
}

impl CurriculumContext {
    pub fn name(&self) -> &'static str {
        match self {
            CurriculumContext::EducaJson => "educa",
            CurriculumContext::Lp21Xml => "lp21",
            CurriculumContext::PerApi => "per",
            CurriculumContext::ClassificationSystemJson => "classification_system",
        }
    }

    pub fn standard(&self) -> Standard {
        match self {
            CurriculumContext::EducaJson => Standard::Educa,
            CurriculumContext::Lp21Xml => Standard::Lp21,
            CurriculumContext::PerApi => Standard::Per,
            CurriculumContext::ClassificationSystemJson => Standard::ClassificationSystem,
        }
    }

    pub fn all() -> [CurriculumContext; 4] {
        [
            CurriculumContext::EducaJson,
            CurriculumContext::Lp21Xml,
            CurriculumContext::PerApi,
            CurriculumContext::ClassificationSystemJson,
        ]
    }

    /// Static parent → child type relations of the standard.
    pub fn describe_data_structure(&self) -> Vec<DataStructureDescription> {
        match self {
            CurriculumContext::EducaJson => EducaCurriculum::describe_data_structure(),
            CurriculumContext::Lp21Xml => Lp21Curriculum::describe_data_structure(),
            CurriculumContext::PerApi => PerCurriculum::describe_data_structure(),
            CurriculumContext::ClassificationSystemJson => {
                ClassificationSystemCurriculum::describe_data_structure()
            }
        }
    }

    /// Static list of the standard's term types.
    pub fn describe_term_types(&self) -> Vec<TermTypeDescription> {
        match self {
            CurriculumContext::EducaJson => EducaCurriculum::describe_term_types(),
            CurriculumContext::Lp21Xml => Lp21Curriculum::describe_term_types(),
            CurriculumContext::PerApi => PerCurriculum::describe_term_types(),
            CurriculumContext::ClassificationSystemJson => {
                ClassificationSystemCurriculum::describe_term_types()
            }
        }
    }

    /// Fail with [`DomainError::InvalidContext`] unless `self == expected`.
    pub(crate) fn ensure(self, expected: CurriculumContext) -> DomainResult<()> {
        if self == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidContext(format!(
                "{} cannot parse a {} payload",
                expected.standard(),
                self.name()
            )))
        }
    }
}

impl fmt::Display for CurriculumContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CurriculumContext {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "educa" | "educa_json" => Ok(CurriculumContext::EducaJson),
            "lp21" | "lp21_xml" => Ok(CurriculumContext::Lp21Xml),
            "per" | "per_api" => Ok(CurriculumContext::PerApi),
            "classification_system" | "classification system" => {
                Ok(CurriculumContext::ClassificationSystemJson)
            }
            other => Err(DomainError::InvalidContext(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataStructureDescription {
    #[serde(rename = "type")]
    pub term_type: String,
    pub child_types: Vec<String>,
}

impl DataStructureDescription {
    pub(crate) fn new(term_type: &str, child_types: &[&str]) -> Self {
        Self {
            term_type: term_type.to_string(),
            child_types: child_types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermTypeDescription {
    #[serde(rename = "type")]
    pub term_type: String,
    pub name: LangString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LangString>,
}

impl TermTypeDescription {
    pub(crate) fn new(term_type: &str, name: LangString, description: Option<LangString>) -> Self {
        Self {
            term_type: term_type.to_string(),
            name,
            description,
        }
    }
}

/// Dictionary-backed lookups and term construction.
///
/// This is everything tree reconstruction needs from a standard.
pub trait TermSource {
    fn standard(&self) -> Standard;

    fn dictionary(&self) -> &Dictionary;

    /// Taxonomy source names this standard accepts.
    fn sources(&self) -> &[&'static str];

    /// Apply deprecation remapping (`old id → canonical id`).
    fn resolve_identifier(&self, id: &str) -> String {
        id.to_string()
    }

    /// Dictionary entry for `id`, after identifier resolution.
    fn lookup(&self, id: &str) -> Option<&DictionaryEntry> {
        self.dictionary().get(&self.resolve_identifier(id))
    }

    fn term_type(&self, id: &str) -> String {
        self.lookup(id)
            .map(|entry| entry.term_type.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    fn term_name(&self, id: &str) -> LangString {
        self.lookup(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| LangString::plain(NOT_AVAILABLE))
    }

    /// Build a fresh term carrying current dictionary data.
    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term;

    fn recognizes_source(&self, source: &LangString) -> bool {
        self.sources().iter().any(|name| source.contains_value(name))
    }
}

/// A loaded curriculum: dictionary plus the current tree.
pub trait Curriculum: TermSource {
    fn tree(&self) -> &TermArena;

    /// Replace the tree wholesale; indices into the old tree become stale.
    fn replace_tree(&mut self, tree: TermArena);

    /// Root term of the current tree.
    fn root_term(&self) -> Option<&Term> {
        self.tree().root_term()
    }

    /// Rebuild the tree from flat taxonomy paths (LOM-CH field 9).
    fn set_tree_based_on_taxon_path(
        &mut self,
        records: &[Classification],
        purpose: &str,
    ) -> DomainResult<&mut Self>
    where
        Self: Sized,
    {
        let tree = reconstruct::tree_from_taxon_paths(&*self, records, purpose)?;
        self.replace_tree(tree);
        Ok(self)
    }

    /// Rebuild the tree from nested taxonomy trees (LOM-CH field 10).
    fn set_tree_based_on_taxon_tree(&mut self, records: &[TaxonTreeRecord]) -> DomainResult<&mut Self>
    where
        Self: Sized,
    {
        let tree = reconstruct::tree_from_taxon_trees(&*self, records)?;
        self.replace_tree(tree);
        Ok(self)
    }

    fn ascii_dump(&self) -> String {
        ascii_dump(self.tree())
    }
}

/// Standards that can translate terms into another standard's vocabulary.
pub trait MapsTerms {
    fn map_term(&self, source: Standard, target: Standard, term: &Term) -> Option<Term>;

    fn map_identifier(&self, source: Standard, target: Standard, id: &str) -> Option<String>;
}
