//! Integration tests for the Telegram transport

use crate::test_utils::{mock_send_message, CHAT_ID, TOKEN};
use rsi_monitor::config::ChatCredentials;
use rsi_monitor::error::PipelineError;
use rsi_monitor::services::notifier::{MessageTransport, ParseMode};
use rsi_monitor::services::telegram::TelegramTransport;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> ChatCredentials {
    ChatCredentials {
        token: TOKEN.to_string(),
        chat_id: CHAT_ID.to_string(),
    }
}

fn transport(server: &MockServer) -> TelegramTransport {
    TelegramTransport::new(server.uri(), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn posts_markdown_message_to_bot_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_json(json!({
            "chat_id": CHAT_ID,
            "text": "*hello*",
            "parse_mode": "Markdown"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server)
        .send_message(&credentials(), "*hello*", ParseMode::Markdown)
        .await
        .expect("delivered");
}

#[tokio::test]
async fn plain_mode_omits_parse_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"chat_id": CHAT_ID, "text": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server)
        .send_message(&credentials(), "hi", ParseMode::Plain)
        .await
        .expect("delivered");
}

#[tokio::test]
async fn api_rejection_is_delivery_failure() {
    let server = MockServer::start().await;
    mock_send_message(
        &server,
        401,
        json!({"ok": false, "error_code": 401, "description": "Unauthorized"}),
    )
    .await;

    let err = transport(&server)
        .send_message(&credentials(), "hi", ParseMode::Markdown)
        .await
        .unwrap_err();

    match err {
        PipelineError::DeliveryFailure(message) => {
            assert!(message.contains("Unauthorized"));
            assert!(!message.contains(TOKEN));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_delivery_failure() {
    let transport =
        TelegramTransport::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("client");

    let err = transport
        .send_message(&credentials(), "hi", ParseMode::Markdown)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::DeliveryFailure(_)));
    assert!(!err.to_string().contains(TOKEN));
}
