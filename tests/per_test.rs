//! Plan d'études romand parsing through a fetcher

use dsb_client::application::{
    AnyCurriculum, ApplicationError, Curriculum, CurriculumContext, PerCurriculum, TermSource,
};
use dsb_client::domain::DomainError;
use dsb_client::infrastructure::InMemoryFetcher;
use dsb_client::util::testing;
use serde_json::json;

fn objective(id: u32, cycle: u32, domain: u32, discipline: u32) -> String {
    json!({
        "id": id,
        "code": format!("L{cycle}-{id}"),
        "titre": {"fr": format!("Objectif {id}")},
        "url": format!("https://example.org/objectifs/{id}"),
        "cycle": cycle,
        "domaine": {"id": domain, "nom": {"fr": "Langues"}},
        "discipline": {"id": discipline, "nom": {"fr": "Français"}},
        "annees": [1, 2],
        "cantons": ["VD", "GE"]
    })
    .to_string()
}

fn first_page() -> String {
    json!({
        "objectifs": [{"id": 11, "href": "objectifs/11"}, {"id": 12}],
        "next": "objectifs?page=2"
    })
    .to_string()
}

fn fetcher() -> InMemoryFetcher {
    InMemoryFetcher::new()
        .with(
            "objectifs?page=2",
            json!({"objectifs": [{"id": 21}], "next": null}).to_string(),
        )
        .with("objectifs/11", objective(11, 1, 7, 31))
        .with("objectifs/12", objective(12, 1, 7, 31))
        .with("objectifs/21", objective(21, 2, 7, 31))
}

#[test]
fn given_paginated_index_when_parsing_then_all_objectives_are_placed() {
    testing::init_test_setup();

    // Act
    let curriculum =
        PerCurriculum::parse(&first_page(), CurriculumContext::PerApi, &fetcher()).unwrap();

    // Assert
    assert_eq!(
        curriculum.ascii_dump(),
        [
            "--- root:root",
            "    +-- cycle:cycles-1",
            "        +-- domaine:cycles-1-domaines-7",
            "            +-- discipline:cycles-1-domaines-7-disciplines-31",
            "                +-- objectif:objectifs-11",
            "                +-- objectif:objectifs-12",
            "    +-- cycle:cycles-2",
            "        +-- domaine:cycles-2-domaines-7",
            "            +-- discipline:cycles-2-domaines-7-disciplines-31",
            "                +-- objectif:objectifs-21",
        ]
        .join("\n")
    );
}

#[test]
fn given_objective_detail_when_parsing_then_attributes_reach_dictionary_and_terms() {
    let curriculum =
        PerCurriculum::parse(&first_page(), CurriculumContext::PerApi, &fetcher()).unwrap();

    let entry = curriculum.lookup("objectifs-21").unwrap();
    assert_eq!(entry.code.as_deref(), Some("L2-21"));
    assert_eq!(entry.cycles, vec![2]);
    assert_eq!(entry.school_years, vec!["1", "2"]);
    assert_eq!(curriculum.term_name("cycles-2-domaines-7").get("fr"), Some("Langues"));

    let tree = curriculum.tree();
    let idx = tree
        .find_child_by_identifier_recursive(tree.root().unwrap(), "objectifs-21")
        .unwrap();
    let attributes = tree.term(idx).unwrap().per().cloned().unwrap();
    assert_eq!(attributes.cantons, vec!["VD", "GE"]);
    assert_eq!(
        attributes.url.as_deref(),
        Some("https://example.org/objectifs/21")
    );
}

#[test]
fn given_objective_in_unknown_cycle_when_parsing_then_invalid_data_structure() {
    let page = json!({"objectifs": [{"id": 5}]}).to_string();
    let fetcher = InMemoryFetcher::new().with("objectifs/5", objective(5, 4, 1, 1));

    let result = PerCurriculum::parse(&page, CurriculumContext::PerApi, &fetcher);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidDataStructure(_)))
    ));
}

#[test]
fn given_pagination_cycle_when_parsing_then_invalid_data_structure() {
    let page = json!({"objectifs": [], "next": "objectifs?page=2"}).to_string();
    let fetcher = InMemoryFetcher::new().with(
        "objectifs?page=2",
        json!({"objectifs": [], "next": "objectifs?page=2"}).to_string(),
    );

    let result = PerCurriculum::parse(&page, CurriculumContext::PerApi, &fetcher);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidDataStructure(_)))
    ));
}

#[test]
fn given_unreachable_objective_when_parsing_then_fetch_error_names_locator() {
    let page = json!({"objectifs": [{"id": 99}]}).to_string();

    let result = PerCurriculum::parse(&page, CurriculumContext::PerApi, &InMemoryFetcher::new());

    match result {
        Err(ApplicationError::Fetch { locator, .. }) => assert_eq!(locator, "objectifs/99"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn given_per_context_when_parsing_through_any_curriculum_then_fetcher_is_used() {
    let curriculum =
        AnyCurriculum::parse(CurriculumContext::PerApi, &first_page(), &fetcher()).unwrap();

    assert_eq!(curriculum.context(), CurriculumContext::PerApi);
    assert_eq!(curriculum.term_type("objectifs-11"), "objectif");
    assert!(curriculum.as_mapper().is_none());
}
