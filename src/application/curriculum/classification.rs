//! Classification system (LOM-CH v1.0) standard
//!
//! Uses the vocabulary payload format of educa. Stored LOM records may still
//! carry educa identifiers, so lookups fall back to the translated identifier.

use tracing::trace;

use super::educa::parse_vocabularies;
use super::{
    Curriculum, CurriculumContext, DataStructureDescription, EducaCurriculum, MapsTerms,
    TermSource, TermTypeDescription,
};
use crate::application::mapper::{CrossStandardMapper, LEGACY_CONTEXT};
use crate::application::ApplicationResult;
use crate::domain::{
    ContextAttributes, Dictionary, DictionaryEntry, LangString, Standard, StandardAttributes,
    Term, TermArena,
};

/// The classification system standard.
#[derive(Debug, Default)]
pub struct ClassificationSystemCurriculum {
    dictionary: Dictionary,
    tree: TermArena,
    mapper: CrossStandardMapper,
}

impl ClassificationSystemCurriculum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(payload: &str, context: CurriculumContext) -> ApplicationResult<Self> {
        context.ensure(CurriculumContext::ClassificationSystemJson)?;
        let (dictionary, tree) = parse_vocabularies(payload, Standard::ClassificationSystem)?;
        Ok(Self {
            dictionary,
            tree,
            ..Self::new()
        })
    }

    pub fn with_mapper(mut self, mapper: CrossStandardMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn mapper(&self) -> &CrossStandardMapper {
        &self.mapper
    }

    pub fn describe_data_structure() -> Vec<DataStructureDescription> {
        EducaCurriculum::describe_data_structure()
    }

    pub fn describe_term_types() -> Vec<TermTypeDescription> {
        EducaCurriculum::describe_term_types()
    }
}

impl TermSource for ClassificationSystemCurriculum {
    fn standard(&self) -> Standard {
        Standard::ClassificationSystem
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn sources(&self) -> &[&'static str] {
        &["classification system", LEGACY_CONTEXT]
    }

    fn lookup(&self, id: &str) -> Option<&DictionaryEntry> {
        self.dictionary.get(id).or_else(|| {
            let mapped =
                self.mapper
                    .map_identifier(Standard::Educa, Standard::ClassificationSystem, id)?;
            trace!("lookup: {} not found, trying {}", id, mapped);
            self.dictionary.get(&mapped)
        })
    }

    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term {
        Term::new(Standard::ClassificationSystem, term_type, id, Some(name)).with_attributes(
            StandardAttributes::ClassificationSystem(ContextAttributes {
                context: Some(LEGACY_CONTEXT.to_string()),
            }),
        )
    }
}

impl Curriculum for ClassificationSystemCurriculum {
    fn tree(&self) -> &TermArena {
        &self.tree
    }

    fn replace_tree(&mut self, tree: TermArena) {
        self.tree = tree;
    }
}

impl MapsTerms for ClassificationSystemCurriculum {
    fn map_term(&self, source: Standard, target: Standard, term: &Term) -> Option<Term> {
        self.mapper.map_term(source, target, term)
    }

    fn map_identifier(&self, source: Standard, target: Standard, id: &str) -> Option<String> {
        self.mapper.map_identifier(source, target, id)
    }
}
