//! Runtime dispatch over the four standards

use tracing::instrument;

use super::{
    ClassificationSystemCurriculum, Curriculum, CurriculumContext, EducaCurriculum,
    Lp21Curriculum, MapsTerms, PerCurriculum, TermSource,
};
use crate::application::ApplicationResult;
use crate::domain::{Dictionary, DictionaryEntry, LangString, Standard, Term, TermArena};
use crate::infrastructure::DefinitionFetcher;

/// A curriculum of any standard, chosen by [`CurriculumContext`] at load time.
#[derive(Debug)]
pub enum AnyCurriculum {
    Educa(EducaCurriculum),
    Lp21(Lp21Curriculum),
    Per(PerCurriculum),
    ClassificationSystem(ClassificationSystemCurriculum),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            AnyCurriculum::Educa($inner) => $body,
            AnyCurriculum::Lp21($inner) => $body,
            AnyCurriculum::Per($inner) => $body,
            AnyCurriculum::ClassificationSystem($inner) => $body,
        }
    };
}

impl AnyCurriculum {
    /// Parse `payload` in the format `context` names.
    ///
    /// Only the remote API format uses `fetcher`.
    #[instrument(level = "debug", skip(payload, fetcher))]
    pub fn parse(
        context: CurriculumContext,
        payload: &str,
        fetcher: &dyn DefinitionFetcher,
    ) -> ApplicationResult<Self> {
        Ok(match context {
            CurriculumContext::EducaJson => Self::Educa(EducaCurriculum::parse(payload, context)?),
            CurriculumContext::Lp21Xml => Self::Lp21(Lp21Curriculum::parse(payload, context)?),
            CurriculumContext::PerApi => {
                Self::Per(PerCurriculum::parse(payload, context, fetcher)?)
            }
            CurriculumContext::ClassificationSystemJson => Self::ClassificationSystem(
                ClassificationSystemCurriculum::parse(payload, context)?,
            ),
        })
    }

    pub fn context(&self) -> CurriculumContext {
        match self {
            Self::Educa(_) => CurriculumContext::EducaJson,
            Self::Lp21(_) => CurriculumContext::Lp21Xml,
            Self::Per(_) => CurriculumContext::PerApi,
            Self::ClassificationSystem(_) => CurriculumContext::ClassificationSystemJson,
        }
    }

    /// Term mapping, for standards that support it.
    pub fn as_mapper(&self) -> Option<&dyn MapsTerms> {
        match self {
            Self::ClassificationSystem(c) => Some(c),
            _ => None,
        }
    }
}

impl TermSource for AnyCurriculum {
    fn standard(&self) -> Standard {
        dispatch!(self, c => c.standard())
    }

    fn dictionary(&self) -> &Dictionary {
        dispatch!(self, c => c.dictionary())
    }

    fn sources(&self) -> &[&'static str] {
        dispatch!(self, c => c.sources())
    }

    fn resolve_identifier(&self, id: &str) -> String {
        dispatch!(self, c => c.resolve_identifier(id))
    }

    fn lookup(&self, id: &str) -> Option<&DictionaryEntry> {
        dispatch!(self, c => c.lookup(id))
    }

    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term {
        dispatch!(self, c => c.term_factory(term_type, id, name))
    }
}

impl Curriculum for AnyCurriculum {
    fn tree(&self) -> &TermArena {
        dispatch!(self, c => c.tree())
    }

    fn replace_tree(&mut self, tree: TermArena) {
        dispatch!(self, c => c.replace_tree(tree))
    }
}
