//! End-to-end pipeline tests against a mock OpenAlex API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openalex_harvest::config::Config;
use openalex_harvest::models::Work;
use openalex_harvest::pipeline::Harvester;

/// One page envelope with an optional next cursor.
fn page_json(results: Vec<serde_json::Value>, next_cursor: Option<&str>) -> serde_json::Value {
    json!({
        "results": results,
        "meta": {"next_cursor": next_cursor}
    })
}

/// Mount an institutions page for the default "Illinois" filter.
async fn mount_institutions(mock_server: &MockServer, results: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/institutions"))
        .and(query_param("filter", "display_name.search:Illinois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(results, None)))
        .mount(mock_server)
        .await;
}

/// Mount a single works page for one institution id.
async fn mount_works(mock_server: &MockServer, id: &str, results: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param(
            "filter",
            format!("authorships.institutions.id:{id},open_access.is_oa:true"),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(results, None)))
        .mount(mock_server)
        .await;
}

/// Build a harvester writing into a temp directory; returns the output path.
fn test_harvester(mock_server: &MockServer, dir: &tempfile::TempDir) -> Harvester {
    let mut config = Config::for_testing(&mock_server.uri());
    config.output_path = dir.path().join("out.json");
    Harvester::new(config).unwrap()
}

#[tokio::test]
async fn test_single_institution_single_work() {
    let mock_server = MockServer::start().await;

    mount_institutions(
        &mock_server,
        vec![json!({"id": "I1", "display_name": "University of Illinois"})],
    )
    .await;
    mount_works(
        &mock_server,
        "I1",
        vec![json!({
            "title": "T",
            "abstract_inverted_index": {"a": [0]},
            "authorships": [{"author": {"display_name": "A. Author"}}]
        })],
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let harvester = test_harvester(&mock_server, &dir);
    let summary = harvester.run().await.unwrap();

    assert_eq!(summary.institutions, 1);
    assert_eq!(summary.works, 1);

    let written = std::fs::read_to_string(dir.path().join("out.json")).unwrap();

    // Shape, order-insensitive.
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        parsed,
        json!([{
            "title": "T",
            "abstract": {"a": [0]},
            "authors": ["A. Author"],
            "institution": "I1",
            "institution_name": "University of Illinois"
        }])
    );

    // Exact bytes: 2-space-indented JSON in declared field order.
    let expected = Work {
        title: Some("T".to_string()),
        r#abstract: Some([("a".to_string(), vec![0])].into_iter().collect()),
        authors: vec!["A. Author".to_string()],
        institution: "I1".to_string(),
        institution_name: "University of Illinois".to_string(),
    };
    assert_eq!(written, serde_json::to_string_pretty(&vec![expected]).unwrap());
}

#[tokio::test]
async fn test_institution_name_attachment() {
    let mock_server = MockServer::start().await;

    mount_institutions(
        &mock_server,
        vec![
            json!({"id": "I1", "display_name": "University of Illinois"}),
            json!({"id": "I2", "display_name": "Illinois State University"}),
        ],
    )
    .await;
    mount_works(
        &mock_server,
        "I1",
        vec![
            json!({"title": "W1", "authorships": []}),
            json!({"title": "W2", "authorships": []}),
        ],
    )
    .await;
    mount_works(&mock_server, "I2", vec![json!({"title": "W3", "authorships": []})]).await;

    let dir = tempfile::tempdir().unwrap();
    let summary = test_harvester(&mock_server, &dir).run().await.unwrap();
    assert_eq!(summary.works, 3);

    let written = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    let works: Vec<Work> = serde_json::from_str(&written).unwrap();

    // Every work's institution_name matches the institution it was fetched for.
    for work in &works {
        let expected_name = match work.institution.as_str() {
            "I1" => "University of Illinois",
            "I2" => "Illinois State University",
            other => panic!("unexpected institution {other}"),
        };
        assert_eq!(work.institution_name, expected_name);
    }

    // Institutions are processed in discovery order.
    let titles: Vec<&str> = works.iter().map(|w| w.title.as_deref().unwrap()).collect();
    assert_eq!(titles, vec!["W1", "W2", "W3"]);
}

#[tokio::test]
async fn test_no_matching_institutions_writes_empty_array() {
    let mock_server = MockServer::start().await;

    mount_institutions(&mock_server, vec![]).await;

    let dir = tempfile::tempdir().unwrap();
    let summary = test_harvester(&mock_server, &dir).run().await.unwrap();

    assert_eq!(summary.institutions, 0);
    assert_eq!(summary.works, 0);

    let written = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert_eq!(written, "[]");
}

#[tokio::test]
async fn test_repeated_runs_are_byte_identical() {
    let mock_server = MockServer::start().await;

    mount_institutions(
        &mock_server,
        vec![json!({"id": "I1", "display_name": "University of Illinois"})],
    )
    .await;
    mount_works(
        &mock_server,
        "I1",
        vec![json!({
            "title": "T",
            "abstract_inverted_index": {"zeta": [1], "alpha": [0]},
            "authorships": [{"author": {"display_name": "A. Author"}}]
        })],
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let harvester = test_harvester(&mock_server, &dir);

    harvester.run().await.unwrap();
    let first = std::fs::read(dir.path().join("out.json")).unwrap();

    harvester.run().await.unwrap();
    let second = std::fs::read(dir.path().join("out.json")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_output_overwrites_previous_file() {
    let mock_server = MockServer::start().await;

    mount_institutions(&mock_server, vec![]).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    std::fs::write(&out, "stale contents from a previous run").unwrap();

    test_harvester(&mock_server, &dir).run().await.unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "[]");
}

#[tokio::test]
async fn test_fetch_failure_aborts_without_output() {
    let mock_server = MockServer::start().await;

    mount_institutions(
        &mock_server,
        vec![json!({"id": "I1", "display_name": "University of Illinois"})],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = test_harvester(&mock_server, &dir).run().await;

    assert!(result.is_err());
    assert!(!dir.path().join("out.json").exists());
}
