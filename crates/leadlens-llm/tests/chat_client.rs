//! Wiremock-backed tests for the chat client and the caption stage.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadlens_core::{AppConfig, Environment};
use leadlens_llm::{caption_directory, ChatClient, LlmError};

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "info".to_string(),
        site_base_url: "https://unused.invalid".to_string(),
        site_username: "user@example.com".to_string(),
        site_password: "hunter2".to_string(),
        vision_base_url: "https://unused.invalid".to_string(),
        vision_api_key: "vision-key".to_string(),
        vision_model_id: "bald-rflsm/1".to_string(),
        vision_negative_label: "not_bald".to_string(),
        llm_base_url: "https://unused.invalid".to_string(),
        llm_api_key: "sk-test".to_string(),
        llm_model: "gpt-4-turbo".to_string(),
        llm_max_tokens: 1500,
        data_dir: "./data".into(),
        sheet_path: "./linkedin_profiles.csv".into(),
        request_timeout_secs: 5,
        user_agent: "leadlens-test/0.1".to_string(),
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn complete_sends_bearer_auth_and_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config();
    let client = ChatClient::with_base_url(&config, &server.uri()).unwrap();
    let text = client.complete("system", "user").await.unwrap();
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn complete_non_2xx_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = test_config();
    let client = ChatClient::with_base_url(&config, &server.uri()).unwrap();
    let result = client.complete("system", "user").await;
    assert!(
        matches!(result, Err(LlmError::UnexpectedStatus { status: 429, .. })),
        "expected UnexpectedStatus(429), got: {result:?}"
    );
}

#[tokio::test]
async fn complete_missing_content_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let config = test_config();
    let client = ChatClient::with_base_url(&config, &server.uri()).unwrap();
    let result = client.complete("system", "user").await;
    assert!(
        matches!(result, Err(LlmError::MalformedResponse(_))),
        "expected MalformedResponse, got: {result:?}"
    );
}

#[tokio::test]
async fn caption_directory_parses_labeled_lines_in_index_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Sorun: thinning\nÇözüm: transplant")),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("2.jpg"), b"B").unwrap();
    std::fs::write(dir.path().join("0.png"), b"A").unwrap();
    std::fs::write(dir.path().join("skip.gif"), b"C").unwrap();

    let config = test_config();
    let client = ChatClient::with_base_url(&config, &server.uri()).unwrap();
    let records = caption_directory(&client, dir.path()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 0);
    assert_eq!(records[1].index, 2);
    assert_eq!(records[0].issue.as_deref(), Some("thinning"));
    assert_eq!(records[0].solution.as_deref(), Some("transplant"));
}

#[tokio::test]
async fn caption_directory_tolerates_partial_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Sorun: thinning")))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0.jpg"), b"A").unwrap();

    let config = test_config();
    let client = ChatClient::with_base_url(&config, &server.uri()).unwrap();
    let records = caption_directory(&client, dir.path()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].issue.as_deref(), Some("thinning"));
    assert!(records[0].solution.is_none());
}
