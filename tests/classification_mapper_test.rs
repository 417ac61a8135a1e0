//! Classification system curriculum and term mapping to and from educa

use dsb_client::application::{
    AnyCurriculum, ClassificationSystemCurriculum, CrossStandardMapper, Curriculum,
    CurriculumContext, MapsTerms, TermSource,
};
use dsb_client::domain::{Classification, LangString, Standard, Term};
use dsb_client::infrastructure::InMemoryFetcher;
use dsb_client::util::testing;
use rstest::rstest;

const CLASSIFICATION: &str = r#"{"vocabularies": [{"identifier": "school subjects", "terms": [
    {"identifier": "motion health", "name": {"de": "Bewegung und Sport"}},
    {"identifier": "languages", "name": {"de": "Sprachen"}},
    {"identifier": "foreign languages", "parents": ["languages"]}
]}]}"#;

fn classification() -> ClassificationSystemCurriculum {
    testing::init_test_setup();
    ClassificationSystemCurriculum::parse(CLASSIFICATION, CurriculumContext::ClassificationSystemJson)
        .expect("parse classification payload")
}

#[test]
fn given_sport_when_mapping_educa_to_classification_then_motion_health() {
    let mapper = CrossStandardMapper::new();

    let mapped = mapper.map_identifier(Standard::Educa, Standard::ClassificationSystem, "sport");

    assert_eq!(mapped.as_deref(), Some("motion health"));
}

#[rstest]
#[case(Standard::ClassificationSystem, Standard::Educa, "people and environment", "nature_human_society")]
#[case(Standard::ClassificationSystem, Standard::Educa, "visual arts", "visual_arts")]
#[case(Standard::Educa, Standard::ClassificationSystem, "foreign_languages", "foreign languages")]
#[case(Standard::Educa, Standard::ClassificationSystem, "maths", "mathematics")]
fn given_identifier_when_mapping_then_rename_table_before_convention(
    #[case] source: Standard,
    #[case] target: Standard,
    #[case] id: &str,
    #[case] expected: &str,
) {
    let mapper = CrossStandardMapper::new();

    assert_eq!(
        mapper.map_identifier(source, target, id).as_deref(),
        Some(expected)
    );
}

#[test]
fn given_term_when_mapping_to_educa_then_type_and_name_are_kept() {
    // Arrange
    let term = Term::new(
        Standard::ClassificationSystem,
        "discipline",
        "motion health",
        Some(LangString::localized([("de", "Bewegung und Sport")])),
    );

    // Act
    let mapped = classification()
        .map_term(Standard::ClassificationSystem, Standard::Educa, &term)
        .unwrap();

    // Assert
    assert_eq!(mapped.id(), "sport");
    assert_eq!(mapped.term_type(), "discipline");
    assert_eq!(mapped.standard(), Standard::Educa);
    assert_eq!(mapped.context(), Some("LOM-CHv1.2"));
    assert_eq!(mapped.name(), term.name());
}

#[test]
fn given_custom_rename_table_when_mapping_then_only_custom_pairs_apply() {
    let mapper = CrossStandardMapper::new().with_renames([("body", "sport")]);

    assert_eq!(
        mapper
            .map_identifier(Standard::Educa, Standard::ClassificationSystem, "sport")
            .as_deref(),
        Some("body")
    );
    assert_eq!(
        mapper
            .map_identifier(Standard::Educa, Standard::ClassificationSystem, "maths")
            .as_deref(),
        Some("maths")
    );
}

#[test]
fn given_educa_identifiers_when_looking_up_then_classification_entries_are_found() {
    let curriculum = classification();

    assert_eq!(curriculum.term_type("sport"), "discipline");
    assert_eq!(
        curriculum.term_name("foreign_languages"),
        LangString::plain("foreign languages")
    );
    assert_eq!(curriculum.term_type("maths"), "n/a");
}

#[test]
fn given_legacy_source_paths_when_rebuilding_then_recognized_and_tagged() {
    // Arrange
    let mut curriculum = classification();
    let records = [Classification::from_ids(
        "discipline",
        "LOM-CHv1.0",
        &[&["languages", "foreign languages"]],
    )];

    // Act
    curriculum
        .set_tree_based_on_taxon_path(&records, "discipline")
        .unwrap();

    // Assert
    assert_eq!(
        curriculum.ascii_dump(),
        "--- root:root\n    +-- discipline:languages\n        +-- discipline:foreign languages"
    );
    let tree = curriculum.tree();
    let languages = tree.children(tree.root().unwrap()).unwrap()[0];
    assert_eq!(tree.term(languages).unwrap().context(), Some("LOM-CHv1.0"));
}

#[test]
fn given_classification_context_when_parsing_through_any_curriculum_then_mapper_is_exposed() {
    let curriculum = AnyCurriculum::parse(
        CurriculumContext::ClassificationSystemJson,
        CLASSIFICATION,
        &InMemoryFetcher::new(),
    )
    .unwrap();

    let mapper = curriculum.as_mapper().expect("classification system maps terms");
    assert_eq!(
        mapper
            .map_identifier(Standard::Educa, Standard::ClassificationSystem, "sport")
            .as_deref(),
        Some("motion health")
    );
    assert_eq!(curriculum.standard(), Standard::ClassificationSystem);
}
