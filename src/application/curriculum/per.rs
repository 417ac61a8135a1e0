//! Plan d'études romand (remote API) standard
//!
//! The API exposes a paginated index of learning objectives. Each objective
//! detail names its cycle, domain and discipline by numeric id; the tree
//! cycle → domaine → discipline → objectif is assembled from those ids.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use super::{
    Curriculum, CurriculumContext, DataStructureDescription, TermSource, TermTypeDescription,
    DISCIPLINE_TYPE,
};
use crate::application::{ApplicationResult, FetchResultExt};
use crate::domain::{
    Dictionary, DictionaryEntry, DomainError, DomainResult, LangString, PerAttributes, Standard,
    StandardAttributes, Term, TermArena,
};
use crate::infrastructure::DefinitionFetcher;

const CYCLE_TYPE: &str = "cycle";
const DOMAIN_TYPE: &str = "domaine";
const OBJECTIVE_TYPE: &str = "objectif";
const CYCLES: [u8; 3] = [1, 2, 3];

#[derive(Debug, Deserialize)]
struct ObjectiveIndex {
    #[serde(default)]
    objectifs: Vec<ObjectiveLink>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveLink {
    id: Value,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    id: Value,
    nom: LangString,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDetail {
    id: Value,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    titre: Option<LangString>,
    #[serde(default)]
    url: Option<String>,
    cycle: Value,
    domaine: NamedRef,
    discipline: NamedRef,
    #[serde(default)]
    annees: Vec<Value>,
    #[serde(default)]
    cantons: Vec<String>,
}

/// Numeric or string identifiers, as the API is not consistent.
fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cycle_number(value: &Value, objective: &str) -> DomainResult<u8> {
    id_string(value)
        .parse::<u8>()
        .ok()
        .filter(|n| CYCLES.contains(n))
        .ok_or_else(|| {
            DomainError::InvalidDataStructure(format!(
                "objective {objective} references cycle {value}"
            ))
        })
}

fn cycle_key(cycle: u8) -> String {
    format!("cycles-{cycle}")
}

fn domain_key(cycle: u8, domain: &str) -> String {
    format!("{}-domaines-{domain}", cycle_key(cycle))
}

fn discipline_key(cycle: u8, domain: &str, discipline: &str) -> String {
    format!("{}-disciplines-{discipline}", domain_key(cycle, domain))
}

fn objective_key(objective: &str) -> String {
    format!("objectifs-{objective}")
}

/// The Plan d'études romand standard.
#[derive(Debug, Default)]
pub struct PerCurriculum {
    dictionary: Dictionary,
    tree: TermArena,
}

impl PerCurriculum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the first index page; further pages and every objective
    /// detail are fetched through `fetcher`.
    #[instrument(level = "debug", skip(payload, fetcher))]
    pub fn parse(
        payload: &str,
        context: CurriculumContext,
        fetcher: &dyn DefinitionFetcher,
    ) -> ApplicationResult<Self> {
        context.ensure(CurriculumContext::PerApi)?;

        let mut curriculum = Self::new();
        let mut tree = TermArena::with_root(Term::root(Standard::Per));
        let mut visited_pages: HashSet<String> = HashSet::new();
        let mut page: ObjectiveIndex = serde_json::from_str(payload)?;

        loop {
            for link in &page.objectifs {
                let id = id_string(&link.id);
                let locator = link
                    .href
                    .clone()
                    .unwrap_or_else(|| format!("objectifs/{id}"));
                trace!("fetching objective {}", locator);
                let body = fetcher.fetch(&locator).with_locator_context(&locator)?;
                let detail: ObjectiveDetail = serde_json::from_str(&body)?;
                curriculum.add_objective(&mut tree, &detail)?;
            }

            let Some(next) = page.next.take() else {
                break;
            };
            if !visited_pages.insert(next.clone()) {
                return Err(DomainError::InvalidDataStructure(format!(
                    "pagination loops back to {next}"
                ))
                .into());
            }
            let body = fetcher.fetch(&next).with_locator_context(&next)?;
            page = serde_json::from_str(&body)?;
        }

        curriculum.tree = tree;
        debug!(
            "PerCurriculum::parse: {} entries, {} terms",
            curriculum.dictionary.len(),
            curriculum.tree.len()
        );
        Ok(curriculum)
    }

    fn add_objective(&mut self, tree: &mut TermArena, detail: &ObjectiveDetail) -> DomainResult<()> {
        let objective_id = id_string(&detail.id);
        let cycle = cycle_number(&detail.cycle, &objective_id)?;
        let domain_id = id_string(&detail.domaine.id);
        let discipline_id = id_string(&detail.discipline.id);

        let chain = [
            DictionaryEntry::new(
                cycle_key(cycle),
                CYCLE_TYPE,
                LangString::localized([("fr", format!("Cycle {cycle}"))]),
            )
            .with_cycles(vec![cycle]),
            DictionaryEntry::new(
                domain_key(cycle, &domain_id),
                DOMAIN_TYPE,
                detail.domaine.nom.clone(),
            )
            .with_cycles(vec![cycle]),
            DictionaryEntry::new(
                discipline_key(cycle, &domain_id, &discipline_id),
                DISCIPLINE_TYPE,
                detail.discipline.nom.clone(),
            )
            .with_cycles(vec![cycle]),
            DictionaryEntry::new(
                objective_key(&objective_id),
                OBJECTIVE_TYPE,
                detail
                    .titre
                    .clone()
                    .unwrap_or_else(|| LangString::plain(objective_id.as_str())),
            )
            .with_code(detail.code.clone())
            .with_url(detail.url.clone())
            .with_cycles(vec![cycle])
            .with_cantons(detail.cantons.clone())
            .with_school_years(detail.annees.iter().map(id_string).collect()),
        ];

        let mut parent = tree.root().ok_or(DomainError::UnknownTerm)?;
        for entry in chain {
            let (id, term_type) = (entry.id.clone(), entry.term_type.clone());
            self.dictionary.insert_if_absent(entry);
            parent = match tree.find_child_by_identifier(parent, &id) {
                Some(existing) => existing,
                None => {
                    let term = self.term_factory(&term_type, &id, self.term_name(&id));
                    tree.append_term(parent, term)?
                }
            };
        }
        Ok(())
    }

    pub fn describe_data_structure() -> Vec<DataStructureDescription> {
        vec![
            DataStructureDescription::new("root", &[CYCLE_TYPE]),
            DataStructureDescription::new(CYCLE_TYPE, &[DOMAIN_TYPE]),
            DataStructureDescription::new(DOMAIN_TYPE, &[DISCIPLINE_TYPE]),
            DataStructureDescription::new(DISCIPLINE_TYPE, &[OBJECTIVE_TYPE]),
            DataStructureDescription::new(OBJECTIVE_TYPE, &[]),
        ]
    }

    pub fn describe_term_types() -> Vec<TermTypeDescription> {
        [
            (CYCLE_TYPE, "Cycle"),
            (DOMAIN_TYPE, "Domaine"),
            (DISCIPLINE_TYPE, "Discipline"),
            (OBJECTIVE_TYPE, "Objectif d'apprentissage"),
        ]
        .into_iter()
        .map(|(term_type, name)| {
            TermTypeDescription::new(term_type, LangString::localized([("fr", name)]), None)
        })
        .collect()
    }
}

impl TermSource for PerCurriculum {
    fn standard(&self) -> Standard {
        Standard::Per
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn sources(&self) -> &[&'static str] {
        &["per"]
    }

    fn term_factory(&self, term_type: &str, id: &str, name: LangString) -> Term {
        let attributes = self
            .dictionary
            .get(id)
            .map(|entry| PerAttributes {
                code: entry.code.clone(),
                url: entry.url.clone(),
                cycles: entry.cycles.clone(),
                cantons: entry.cantons.clone(),
                school_years: entry.school_years.clone(),
            })
            .unwrap_or_default();
        Term::new(Standard::Per, term_type, id, Some(name))
            .with_attributes(StandardAttributes::Per(attributes))
    }
}

impl Curriculum for PerCurriculum {
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
    use serde_json::json;

    #[test]
    fn given_numeric_ids_when_composing_keys_then_globally_unique_paths() {
        assert_eq!(cycle_key(2), "cycles-2");
        assert_eq!(domain_key(2, "7"), "cycles-2-domaines-7");
        assert_eq!(
            discipline_key(2, "7", "31"),
            "cycles-2-domaines-7-disciplines-31"
        );
        assert_eq!(objective_key("112"), "objectifs-112");
    }

    #[test]
    fn given_cycle_value_when_validating_then_only_one_to_three_accepted() {
        assert_eq!(cycle_number(&json!(3), "o1"), Ok(3));
        assert_eq!(cycle_number(&json!("1"), "o1"), Ok(1));
        assert!(matches!(
            cycle_number(&json!(4), "o1"),
            Err(DomainError::InvalidDataStructure(_))
        ));
        assert!(cycle_number(&json!(null), "o1").is_err());
    }

    #[test]
    fn given_mixed_id_values_when_stringifying_then_no_quotes() {
        assert_eq!(id_string(&json!(12)), "12");
        assert_eq!(id_string(&json!("12")), "12");
    }
}
