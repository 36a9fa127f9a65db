mod common;

use afdb_console::screens::{contracts, ingestion, onboarding, query, role, taxonomy};
use afdb_console::{ConsoleError, SessionStore};

use common::MockState;

#[tokio::test]
async fn test_taxonomy_add_and_list() {
    let state = MockState::default();
    let base = common::spawn(state).await;
    let client = common::client(&base, SessionStore::new());

    assert!(taxonomy::list_paths(&client).await.unwrap().is_empty());
    let paths = taxonomy::add_path(&client, "Manufacturing / QA / PPAP")
        .await
        .unwrap();
    assert_eq!(paths, vec!["Manufacturing/QA/PPAP".to_string()]);

    let err = taxonomy::add_path(&client, "  ").await.unwrap_err();
    assert!(matches!(err, ConsoleError::MalformedInput(_)));
}

#[tokio::test]
async fn test_assumed_role_session_is_sent_afterwards() {
    let state = MockState::default();
    let base = common::spawn(state.clone()).await;
    let session = SessionStore::new();
    let client = common::client(&base, session.clone());

    let response = role::assume_role(
        &client,
        &role::AssumeRoleRequest {
            person_id: "u1".to_string(),
            roles: vec!["QA-Lead".to_string()],
            scope_ids: vec![1, 2],
        },
    )
    .await
    .unwrap();
    assert_eq!(response.session_id, "sess-u1-2");
    assert_eq!(session.session_id().await.as_deref(), Some("sess-u1-2"));

    query::run_query(&client, query::EXAMPLE_QUERY).await.unwrap();
    role::end_session(&client).await;
    query::run_query(&client, query::EXAMPLE_QUERY).await.unwrap();

    let seen = state.sessions_seen.lock().await.clone();
    assert_eq!(
        seen,
        vec![None, Some("sess-u1-2".to_string()), None]
    );
}

#[tokio::test]
async fn test_assume_role_requires_person() {
    let client = common::client("http://127.0.0.1:9", SessionStore::new());
    let err = role::assume_role(
        &client,
        &role::AssumeRoleRequest {
            person_id: " ".to_string(),
            roles: Vec::new(),
            scope_ids: Vec::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ConsoleError::MalformedInput(_)));
}

#[tokio::test]
async fn test_query_result_is_opaque_json() {
    let base = common::spawn(MockState::default()).await;
    let client = common::client(&base, SessionStore::new());

    let result = query::run_query(&client, "FIND ANYTHING").await.unwrap();
    assert_eq!(result["ql"], "FIND ANYTHING");
    assert_eq!(result["hits"][0]["id"], "doc-1");
}

#[tokio::test]
async fn test_register_contract_reloads_table() {
    let state = MockState::default();
    let base = common::spawn(state).await;
    let client = common::client(&base, SessionStore::new());

    let rows = contracts::register_contract(
        &client,
        contracts::DataContract {
            producer: "jira".to_string(),
            schema_hash: "cafebabe".to_string(),
            pii_fields: contracts::parse_pii_fields("email, phone"),
        },
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pii_fields, vec!["email", "phone"]);
    assert_eq!(contracts::list_contracts(&client).await.unwrap(), rows);
}

#[tokio::test]
async fn test_ingest_uploads_file_artifacts() {
    let state = MockState::default();
    let base = common::spawn(state.clone()).await;
    let client = common::client(&base, SessionStore::new());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warrant.md");
    std::fs::write(&path, "# PPAP warrant").unwrap();

    let artifact = ingestion::read_artifact(&path).await.unwrap();
    let result = ingestion::upload(
        &client,
        ingestion::IngestionManifest {
            source_app: "confluence".to_string(),
            org_unit_hint: Some("Manufacturing/QA".to_string()),
        },
        vec![artifact],
    )
    .await
    .unwrap();
    assert_eq!(result["ingested"], 1);

    let uploads = state.uploads.lock().await;
    assert_eq!(uploads[0].artifacts[0].id, "warrant.md");
    assert_eq!(uploads[0].artifacts[0].text, "# PPAP warrant");
    assert_eq!(
        uploads[0].manifest.org_unit_hint.as_deref(),
        Some("Manufacturing/QA")
    );
}

#[tokio::test]
async fn test_onboarding_leaves_a_session() {
    let state = MockState::default();
    let base = common::spawn(state.clone()).await;
    let session = SessionStore::new();
    let client = common::client(&base, session.clone());

    let report = onboarding::run(&client, &onboarding::OnboardingRequest::default())
        .await
        .unwrap();
    assert_eq!(report.session_id, "sess-u1-1");
    assert_eq!(report.contracts, 1);
    assert_eq!(session.session_id().await.as_deref(), Some("sess-u1-1"));
    assert_eq!(
        state.contracts.lock().await[0],
        onboarding::starter_contract()
    );
}
