//! Integration test for the query → import flow
//!
//! Runs the real orchestrator against a wiremock automation server and a
//! filesystem job store:
//! 1. Discovery of a nested listing with folder inference
//! 2. Import with success, duplicate and missing selections
//! 3. Rollback after a failed configuration fetch
//! 4. Credential pass-through as HTTP basic auth

use std::sync::Arc;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobferry_import::{FsJobStore, HttpRemoteFetcher, ImportOrchestrator, RemoteClientConfig};
use jobferry_types::JobStore;

const LISTING_TREE: &str = "jobs[name,url,description]";

fn listing_mock(at_path: &str, body: String) -> Mock {
    Mock::given(method("GET"))
        .and(path(at_path))
        .and(query_param("tree", LISTING_TREE))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
}

async fn setup() -> (MockServer, tempfile::TempDir, ImportOrchestrator) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FsJobStore::open(dir.path().join("jobs")).await.unwrap();
    let fetcher = HttpRemoteFetcher::new(RemoteClientConfig::default()).unwrap();
    let orchestrator = ImportOrchestrator::new(Arc::new(store), Arc::new(fetcher));
    (server, dir, orchestrator)
}

/// Mounts a root listing with leaf `demo` and folder `tools` holding leaf
/// `deploy`
async fn mount_listing(server: &MockServer) {
    let uri = server.uri();
    listing_mock(
        "/api/xml",
        format!(
            "<hudson>\
             <job><name>demo</name><url>{uri}/job/demo/</url>\
             <description>Demo build</description></job>\
             <job><name>tools</name><url>{uri}/job/tools/</url></job>\
             </hudson>"
        ),
    )
    .mount(server)
    .await;

    listing_mock("/job/demo/api/xml", "<freeStyleProject/>".to_string())
        .mount(server)
        .await;

    listing_mock(
        "/job/tools/api/xml",
        format!(
            "<folder><job><name>deploy</name>\
             <url>{uri}/job/tools/job/deploy/</url></job></folder>"
        ),
    )
    .mount(server)
    .await;

    listing_mock(
        "/job/tools/job/deploy/api/xml",
        "<freeStyleProject/>".to_string(),
    )
    .mount(server)
    .await;
}

#[tokio::test]
async fn discovers_nested_listing_with_folder_inference() {
    let (server, _dir, orchestrator) = setup().await;
    mount_listing(&server).await;

    let outcome = orchestrator.query(&server.uri(), None, None).await.unwrap();
    assert!(outcome.query_status.is_none());
    assert_eq!(outcome.jobs.len(), 2);

    let demo = outcome.jobs.iter().find(|j| j.name == "demo").unwrap();
    assert_eq!(demo.description, "Demo build");
    assert!(!demo.hidden);
    assert!(demo.children.is_empty());

    // `tools` is a folder, but its leaf child keeps it visible.
    let tools = outcome.jobs.iter().find(|j| j.name == "tools").unwrap();
    assert!(!tools.hidden);
    assert_eq!(tools.children.len(), 1);
    assert_eq!(tools.children[0].name, "deploy");
}

#[tokio::test]
async fn imports_selection_and_skips_unknown_urls() {
    let (server, dir, orchestrator) = setup().await;
    mount_listing(&server).await;

    Mock::given(method("GET"))
        .and(path("/job/demo/config.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<project><description>demo</description></project>"),
        )
        .mount(&server)
        .await;

    orchestrator.query(&server.uri(), None, None).await.unwrap();

    let statuses = orchestrator
        .import(&[
            format!("{}/job/demo/", server.uri()),
            format!("{}/job/missing/", server.uri()),
        ])
        .await;

    // The unknown selection leaves no trace.
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].job.name, "demo");
    assert!(statuses[0].status.is_success());

    let config = std::fs::read(dir.path().join("jobs/demo/config.xml")).unwrap();
    assert_eq!(
        config,
        b"<project><description>demo</description></project>"
    );
}

#[tokio::test]
async fn duplicate_local_name_is_rejected_without_a_config_fetch() {
    let (server, dir, orchestrator) = setup().await;
    mount_listing(&server).await;

    // Config endpoint must never be hit for a duplicate.
    Mock::given(method("GET"))
        .and(path("/job/demo/config.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<project/>"))
        .expect(0)
        .mount(&server)
        .await;

    let store = FsJobStore::open(dir.path().join("jobs")).await.unwrap();
    store
        .create_job("demo", bytes::Bytes::from_static(b"<project/>"))
        .await
        .unwrap();

    orchestrator.query(&server.uri(), None, None).await.unwrap();
    let statuses = orchestrator
        .import(&[format!("{}/job/demo/", server.uri())])
        .await;

    assert_eq!(
        statuses[0].status,
        jobferry_types::ImportStatus::DuplicateName
    );
}

#[tokio::test]
async fn failed_config_fetch_leaves_no_local_job_behind() {
    let (server, dir, orchestrator) = setup().await;
    mount_listing(&server).await;

    Mock::given(method("GET"))
        .and(path("/job/demo/config.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    orchestrator.query(&server.uri(), None, None).await.unwrap();
    let statuses = orchestrator
        .import(&[format!("{}/job/demo/", server.uri())])
        .await;

    assert!(matches!(
        statuses[0].status,
        jobferry_types::ImportStatus::Failed { .. }
    ));
    assert!(!dir.path().join("jobs/demo").exists());
}

#[tokio::test]
async fn credentials_are_passed_through_as_basic_auth() {
    let (server, _dir, orchestrator) = setup().await;

    // "admin:secret" in basic-auth form.
    Mock::given(method("GET"))
        .and(path("/api/xml"))
        .and(query_param("tree", LISTING_TREE))
        .and(header("Authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<hudson/>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = orchestrator
        .query(
            &server.uri(),
            Some("admin".to_string()),
            Some("secret".to_string()),
        )
        .await
        .unwrap();
    assert!(outcome.query_status.is_none());
    assert!(outcome.jobs.is_empty());
}

#[tokio::test]
async fn unreachable_subtree_does_not_blank_the_query() {
    let (server, _dir, orchestrator) = setup().await;
    let uri = server.uri();

    listing_mock(
        "/api/xml",
        format!(
            "<hudson>\
             <job><name>ok</name><url>{uri}/job/ok/</url></job>\
             <job><name>broken</name><url>{uri}/job/broken/</url></job>\
             </hudson>"
        ),
    )
    .mount(&server)
    .await;
    listing_mock("/job/ok/api/xml", "<freeStyleProject/>".to_string())
        .mount(&server)
        .await;
    // No mock for /job/broken/api/xml: wiremock answers 404.

    let outcome = orchestrator.query(&server.uri(), None, None).await.unwrap();
    assert!(outcome.query_status.is_none());
    assert_eq!(outcome.jobs.len(), 2);

    let broken = outcome.jobs.iter().find(|j| j.name == "broken").unwrap();
    assert!(broken.children.is_empty());
    assert!(!broken.hidden);
}
