//! Term translation between the educa vocabulary and the classification system
//!
//! The classification system (LOM-CH v1.0) predates educa and spells multi-word
//! identifiers with spaces where educa uses underscores. A handful of concepts
//! were renamed outright; those go through an explicit table.

use regex::Regex;
use tracing::trace;

use crate::domain::{HasContext, Standard, StandardAttributes, Term};

/// Context tag of the classification system.
pub const LEGACY_CONTEXT: &str = "LOM-CHv1.0";
/// Context tag from which identifiers use the educa convention.
pub const CURRENT_CONTEXT: &str = "LOM-CHv1.2";

const CONTEXT_VERSION_PATTERN: &str = r"v(\d+)\.(\d+)$";

/// (classification system, educa)
const RENAMES: &[(&str, &str)] = &[
    ("motion health", "sport"),
    ("mathematics", "maths"),
    ("people and environment", "nature_human_society"),
    ("design", "textile_and_technical_design"),
    ("media and ict", "media_and_informatics"),
    ("home economics", "economics_work_household"),
];

/// Bidirectional term mapper between two curriculum standards.
#[derive(Debug, Clone)]
pub struct CrossStandardMapper {
    renames: Vec<(String, String)>,
    threshold: (u32, u32),
    version_regex: Regex,
}

impl Default for CrossStandardMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossStandardMapper {
    pub fn new() -> Self {
        let version_regex = Regex::new(CONTEXT_VERSION_PATTERN).unwrap();
        let threshold = parse_version(&version_regex, CURRENT_CONTEXT).unwrap_or((1, 2));
        Self {
            renames: RENAMES
                .iter()
                .map(|(legacy, current)| (legacy.to_string(), current.to_string()))
                .collect(),
            threshold,
            version_regex,
        }
    }

    /// Replace the rename table; pairs are (classification system, educa).
    pub fn with_renames<I, A, B>(mut self, renames: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.renames = renames
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect();
        self
    }

    /// Translate `term` from `source` to `target`.
    ///
    /// Returns `None` for pairs this mapper does not know. Type and name are
    /// carried over; the identifier and context tag are translated.
    pub fn map_term(&self, source: Standard, target: Standard, term: &Term) -> Option<Term> {
        match (source, target) {
            (Standard::ClassificationSystem, Standard::Educa) => {
                let id = self.to_educa(term.id());
                Some(self.rebuild(term, target, id, CURRENT_CONTEXT))
            }
            (Standard::Educa, Standard::ClassificationSystem) => {
                if self.is_migrated(term.context()) {
                    trace!("map_term: {} already uses the educa convention", term.id());
                    let context = term.context().unwrap_or(CURRENT_CONTEXT).to_string();
                    return Some(self.rebuild(term, target, term.id().to_string(), &context));
                }
                let id = self.to_classification(term.id());
                Some(self.rebuild(term, target, id, LEGACY_CONTEXT))
            }
            _ => None,
        }
    }

    /// Translate a bare identifier through a throwaway term.
    pub fn map_identifier(&self, source: Standard, target: Standard, id: &str) -> Option<String> {
        let term = Term::new(source, "", id, None);
        self.map_term(source, target, &term)
            .map(|mapped| mapped.id().to_string())
    }

    fn to_educa(&self, id: &str) -> String {
        self.renames
            .iter()
            .find(|(legacy, _)| legacy == id)
            .map(|(_, current)| current.clone())
            .unwrap_or_else(|| id.replace(' ', "_"))
    }

    fn to_classification(&self, id: &str) -> String {
        self.renames
            .iter()
            .find(|(_, current)| current == id)
            .map(|(legacy, _)| legacy.clone())
            .unwrap_or_else(|| id.replace('_', " "))
    }

    fn is_migrated(&self, context: Option<&str>) -> bool {
        context
            .and_then(|tag| parse_version(&self.version_regex, tag))
            .is_some_and(|version| version >= self.threshold)
    }

    fn rebuild(&self, term: &Term, target: Standard, id: String, context: &str) -> Term {
        let mut attributes = StandardAttributes::empty(target);
        if let StandardAttributes::Educa(attrs) | StandardAttributes::ClassificationSystem(attrs) =
            &mut attributes
        {
            attrs.set_context(Some(context.to_string()));
        }
        Term::new(target, term.term_type(), id, term.name().cloned()).with_attributes(attributes)
    }
}

fn parse_version(regex: &Regex, tag: &str) -> Option<(u32, u32)> {
    let caps = regex.captures(tag)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}
