//! Filesystem mirror of the definition sources

use std::fs;
use std::io;
use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use dsb_client::application::{
    AnyCurriculum, ApplicationError, Curriculum, CurriculumContext, TermSource,
};
use dsb_client::infrastructure::{DefinitionFetcher, FsFetcher};

#[test]
fn given_api_locators_when_resolving_then_mapped_to_json_files() {
    let fetcher = FsFetcher::new("/mirror");

    assert_eq!(
        fetcher.resolve("objectifs/12").unwrap(),
        PathBuf::from("/mirror/objectifs/12.json")
    );
    assert_eq!(
        fetcher.resolve("/objectifs?page=2").unwrap(),
        PathBuf::from("/mirror/objectifs_page_2.json")
    );
    assert_eq!(
        fetcher.resolve("lp21.xml").unwrap(),
        PathBuf::from("/mirror/lp21.xml")
    );
}

#[rstest]
#[case("../secrets")]
#[case("objectifs/../../etc/passwd")]
#[case("//etc/passwd/..")]
fn given_locator_leaving_base_dir_when_resolving_then_rejected(#[case] locator: &str) {
    let fetcher = FsFetcher::new("/mirror");

    let err = fetcher.resolve(locator).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn given_payload_href_outside_mirror_when_parsing_per_then_fetch_error() {
    // Arrange: a file next to the mirror that an href tries to reach
    let outer = TempDir::new().unwrap();
    let mirror = outer.path().join("mirror");
    fs::create_dir(&mirror).unwrap();
    fs::write(
        outer.path().join("3.json"),
        r#"{"id": 3, "cycle": 2, "domaine": {"id": 1, "nom": {"fr": "Arts"}},
            "discipline": {"id": 4, "nom": {"fr": "Musique"}}}"#,
    )
    .unwrap();
    let index = r#"{"objectifs": [{"id": 3, "href": "../3"}]}"#;
    let fetcher = FsFetcher::new(&mirror);

    // Act
    let result = AnyCurriculum::parse(CurriculumContext::PerApi, index, &fetcher);

    // Assert
    match result {
        Err(ApplicationError::Fetch { locator, source }) => {
            assert_eq!(locator, "../3");
            assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
        }
        other => panic!("expected fetch error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn given_empty_file_when_fetching_then_error_instead_of_empty_payload() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("educa.json"), "  \n").unwrap();
    let fetcher = FsFetcher::new(dir.path());

    let err = fetcher.fetch("educa.json").unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn given_missing_file_when_fetching_then_not_found() {
    let dir = TempDir::new().unwrap();
    let fetcher = FsFetcher::new(dir.path());

    let err = fetcher.fetch("objectifs/1").unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn given_api_mirror_on_disk_when_parsing_per_then_objectives_are_read_from_files() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("objectifs")).unwrap();
    fs::write(
        dir.path().join("objectifs.json"),
        r#"{"objectifs": [{"id": 3, "href": "objectifs/3"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("objectifs/3.json"),
        r#"{"id": 3, "cycle": 2, "domaine": {"id": 1, "nom": {"fr": "Arts"}},
            "discipline": {"id": 4, "nom": {"fr": "Musique"}}}"#,
    )
    .unwrap();
    let fetcher = FsFetcher::new(dir.path());
    let index = fetcher.fetch("objectifs").unwrap();

    // Act
    let curriculum = AnyCurriculum::parse(CurriculumContext::PerApi, &index, &fetcher).unwrap();

    // Assert
    assert_eq!(curriculum.term_type("cycles-2-domaines-1-disciplines-4"), "discipline");
    assert_eq!(curriculum.tree().len(), 5);
}
