//! End-to-end pipeline runs against wiremock collaborators.
//!
//! One mock server stands in for all four external services (login/search,
//! photo CDN, classification, chat completion); the data directory and sheet
//! live in a tempdir.

use std::path::Path;

use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadlens_core::{AppConfig, Environment};
use leadlens_pipeline::{run_pipeline, wipe_run_state};
use leadlens_sheet::read_rows;

// b"JPEGDATA" in standard base64, as the filter stage posts it.
const PHOTO_BYTES: &[u8] = b"JPEGDATA";
const PHOTO_BASE64: &str = "SlBFR0RBVEE=";

fn test_config(server_uri: &str, root: &Path) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "info".to_string(),
        site_base_url: server_uri.to_string(),
        site_username: "user@example.com".to_string(),
        site_password: "hunter2".to_string(),
        vision_base_url: server_uri.to_string(),
        vision_api_key: "vision-key".to_string(),
        vision_model_id: "bald-rflsm/1".to_string(),
        vision_negative_label: "not_bald".to_string(),
        llm_base_url: server_uri.to_string(),
        llm_api_key: "sk-test".to_string(),
        llm_model: "gpt-4-turbo".to_string(),
        llm_max_tokens: 1500,
        data_dir: root.join("data"),
        sheet_path: root.join("linkedin_profiles.csv"),
        request_timeout_secs: 5,
        user_agent: "leadlens-test/0.1".to_string(),
    }
}

fn search_page_html(server_uri: &str) -> String {
    format!(
        r#"<div class="display-flex align-items-center">
             <a class="app-aware-link" href="https://x/in/designer"><span>Jane Designer</span></a>
             <img class="presence-entity__image" src="{server_uri}/photos/y.jpg" alt="Jane Designer">
           </div>"#
    )
}

/// Mounts login, one search page for query "designer", and the photo CDN.
async fn mount_site(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/results/people/"))
        .and(query_param("keywords", "designer"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page_html(&server.uri())))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/photos/y.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PHOTO_BYTES.to_vec()))
        .mount(server)
        .await;
}

async fn mount_classifier(server: &MockServer, label: &str) {
    Mock::given(method("POST"))
        .and(path("/bald-rflsm/1"))
        .and(query_param("api_key", "vision-key"))
        .and(body_string(PHOTO_BASE64.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{ "class": label, "confidence": 0.93 }]
        })))
        .mount(server)
        .await;
}

async fn mount_chat(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn positive_match_flows_through_to_report() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_classifier(&server, "bald").await;
    mount_chat(&server, "Sorun: thinning\nÇözüm: transplant").await;

    let root = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), root.path());

    let report = run_pipeline(&config, "designer", 1).await.unwrap();

    assert_eq!(report.scraped, 1);
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.index, 0);
    assert_eq!(row.name, "Jane Designer");
    assert_eq!(row.profile_link, "https://x/in/designer");
    assert_eq!(row.class_label.as_deref(), Some("bald"));
    assert_eq!(row.issue.as_deref(), Some("thinning"));
    assert_eq!(row.solution.as_deref(), Some("transplant"));
    assert!(row.message.contains("thinning"));
    assert!(row.message.contains("transplant"));

    // Image retained on disk, classification persisted in the sheet.
    assert!(config.data_dir.join("0.jpg").exists());
    let rows = read_rows(&config.sheet_path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].class.as_deref(), Some("bald"));
}

#[tokio::test]
async fn negative_match_is_deleted_and_excluded() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_classifier(&server, "not_bald").await;
    mount_chat(&server, "Sorun: unused\nÇözüm: unused").await;

    let root = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), root.path());

    let report = run_pipeline(&config, "designer", 1).await.unwrap();

    assert_eq!(report.scraped, 1);
    assert!(report.rows.is_empty());
    assert!(!config.data_dir.join("0.jpg").exists());
    let rows = read_rows(&config.sheet_path).unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn wipe_then_rerun_leaves_no_carry_over() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_classifier(&server, "bald").await;
    mount_chat(&server, "Sorun: thinning\nÇözüm: transplant").await;

    let root = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), root.path());

    run_pipeline(&config, "designer", 1).await.unwrap();
    wipe_run_state(&config).unwrap();
    assert!(!config.data_dir.exists());
    assert!(!config.sheet_path.exists());

    // Stale state planted before a run must not survive it either.
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::write(config.data_dir.join("99.jpg"), b"stale").unwrap();

    let report = run_pipeline(&config, "designer", 1).await.unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].index, 0);
    assert!(!config.data_dir.join("99.jpg").exists());
    let rows = read_rows(&config.sheet_path).unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn failed_login_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), root.path());

    let result = run_pipeline(&config, "designer", 1).await;
    assert!(result.is_err(), "expected the run to abort on auth failure");
    // Nothing past the wipe step ran.
    assert!(!config.sheet_path.exists());
}
