use std::sync::Arc;
use std::time::Duration;

use data_auditor::application::RecordAuditor;
use data_auditor::domain::audit_result::{DataIssueType, FlagSeverity};
use data_auditor::domain::audit_schema::audit_schema;
use data_auditor::domain::error::AppError;
use data_auditor::domain::llm_config::LLMConfig;
use data_auditor::domain::record::Record;
use data_auditor::infrastructure::llm_clients::{GeminiClient, LLMClient};
use data_auditor::interfaces::console::Console;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn config_for(server: &MockServer) -> LLMConfig {
    LLMConfig {
        base_url: format!("{}/v1beta/models", server.uri()),
        ..LLMConfig::default()
    }
    .with_api_key("test-key")
}

fn candidate_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 80, "candidatesTokenCount": 30, "totalTokenCount": 110 }
    })
}

fn bob() -> Record {
    Record::new()
        .with_field("id", 102)
        .with_field("name", "Bob Smith")
        .with_field("city", "Boston")
        .with_field("spend_usd", 1200)
        .with_field("is_premium", false)
}

#[tokio::test]
async fn test_generate_json_sends_structured_output_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "rules" }] },
            "contents": [{ "role": "user", "parts": [{ "text": "Audit this customer record: {}" }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "OBJECT" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("{\"ok\":true}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeminiClient::try_new(Duration::from_secs(5)).unwrap();
    let text = client
        .generate_json(
            &config_for(&mock_server),
            "rules",
            "Audit this customer record: {}",
            &json!({ "type": "OBJECT" }),
        )
        .await
        .unwrap();

    assert_eq!(text, "{\"ok\":true}");
}

#[tokio::test]
async fn test_generate_json_surfaces_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::try_new(Duration::from_secs(5)).unwrap();
    let err = client
        .generate_json(&config_for(&mock_server), "rules", "user", &json!({}))
        .await
        .unwrap_err();

    match err {
        AppError::LLMError(msg) => {
            assert!(msg.contains("429"));
            assert!(msg.contains("RESOURCE_EXHAUSTED"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_generate_json_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_reply("{}"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = GeminiClient::try_new(Duration::from_millis(300)).unwrap();
    let err = client
        .generate_json(&config_for(&mock_server), "rules", "user", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
}

#[tokio::test]
async fn test_api_key_stays_out_of_error_messages() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);
    drop(mock_server);

    let client = GeminiClient::try_new(Duration::from_secs(2)).unwrap();
    let err = client
        .generate_json(&config, "rules", "user", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_auditor_round_trips_record_id_through_gemini() {
    let mock_server = MockServer::start().await;

    let reply = json!({
        "record_id": 102,
        "data_issue_type": "LogicalError",
        "flag_severity": "MEDIUM",
        "recommended_action": "Confirm premium status or correct spend."
    });

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [{
                    "text": "Audit this customer record: {\"id\":102,\"name\":\"Bob Smith\",\"city\":\"Boston\",\"spend_usd\":1200,\"is_premium\":false}"
                }]
            }],
            "generationConfig": { "responseSchema": audit_schema().as_value() }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply(&reply.to_string())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeminiClient::try_new(Duration::from_secs(5)).unwrap();
    let (console, output) = Console::captured();
    let auditor = RecordAuditor::new(Arc::new(client), config_for(&mock_server), console);

    let result = auditor.audit(&bob(), audit_schema()).await;

    assert_eq!(result.record_id, Some(102));
    assert_eq!(result.data_issue_type, Some(DataIssueType::LogicalError));
    assert_eq!(result.flag_severity, Some(FlagSeverity::Medium));
    assert!(output.contents().is_empty());
}

#[tokio::test]
async fn test_auditor_falls_back_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::try_new(Duration::from_secs(5)).unwrap();
    let (console, output) = Console::captured();
    let auditor = RecordAuditor::new(Arc::new(client), config_for(&mock_server), console);

    let result = auditor.audit(&bob(), audit_schema()).await;

    assert!(result.is_system_error());
    assert!(result.is_high_severity());
    assert_eq!(result.record_id, Some(102));
    assert_eq!(result.recommended_action.as_deref(), Some("Manual review required."));
    assert!(output
        .contents()
        .starts_with("  [ERROR] AI analysis failed for ID 102: LLM error: API error (500"));
}
