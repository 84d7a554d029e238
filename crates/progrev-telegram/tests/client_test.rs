use progrev_telegram::{
    ChatAction, HttpTelegramClient, ParseMode, TelegramApi, TelegramError, WebhookConfig,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:TEST-token";

async fn client(server: &MockServer) -> HttpTelegramClient {
    let uri = server.uri();
    HttpTelegramClient::new(SecretString::from(TOKEN), Some(uri.as_str())).unwrap()
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

fn sent_message(chat_id: i64, text: &str) -> serde_json::Value {
    json!({
        "message_id": 77,
        "chat": {"id": chat_id, "type": "private"},
        "date": 1700000000,
        "text": text
    })
}

#[tokio::test]
async fn get_me_decodes_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getMe")))
        .respond_with(ok(json!({
            "id": 1, "is_bot": true, "first_name": "Архитектор", "username": "progrev_bot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client(&server).await.get_me().await.unwrap();
    assert!(me.is_bot);
    assert_eq!(me.username.as_deref(), Some("progrev_bot"));
}

#[tokio::test]
async fn send_message_includes_parse_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_json(json!({
            "chat_id": 42,
            "text": "<b>День 1</b>",
            "parse_mode": "HTML"
        })))
        .respond_with(ok(sent_message(42, "День 1")))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server)
        .await
        .send_message(42, "<b>День 1</b>", ParseMode::Html)
        .await
        .unwrap();
    assert_eq!(message.chat.id, 42);
}

#[tokio::test]
async fn plain_send_message_omits_parse_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_json(json!({ "chat_id": 42, "text": "a < b" })))
        .respond_with(ok(sent_message(42, "a < b")))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .send_message(42, "a < b", ParseMode::Plain)
        .await
        .unwrap();
}

#[tokio::test]
async fn api_error_carries_code_and_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities: Unexpected end tag at byte offset 3"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .send_message(42, "</b>", ParseMode::Html)
        .await
        .unwrap_err();

    assert!(err.is_entity_parse_error());
    assert!(matches!(
        err,
        TelegramError::Api {
            method: "sendMessage",
            code: 400,
            ..
        }
    ));
}

#[tokio::test]
async fn errors_never_leak_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).await.get_me().await.unwrap_err();

    assert!(matches!(err, TelegramError::Decode { .. }));
    assert!(!format!("{err:?}").contains("TEST-token"));
    assert!(!format!("{:?}", client(&server).await).contains("TEST-token"));
}

#[tokio::test]
async fn send_chat_action_typing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendChatAction")))
        .and(body_json(json!({ "chat_id": 42, "action": "typing" })))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .send_chat_action(42, ChatAction::Typing)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_webhook_sends_secret_and_allowed_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/setWebhook")))
        .and(body_json(json!({
            "url": "https://bot.example.com/webhook",
            "allowed_updates": ["message"],
            "drop_pending_updates": true,
            "secret_token": "hook-secret"
        })))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let config = WebhookConfig {
        url: "https://bot.example.com/webhook".to_owned(),
        allowed_updates: vec!["message".to_owned()],
        drop_pending_updates: true,
        secret_token: Some(SecretString::from("hook-secret")),
    };
    client(&server).await.set_webhook(&config).await.unwrap();
}

#[tokio::test]
async fn delete_webhook_and_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/deleteWebhook")))
        .and(body_json(json!({ "drop_pending_updates": true })))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getWebhookInfo")))
        .respond_with(ok(json!({
            "url": "",
            "has_custom_certificate": false,
            "pending_update_count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    client.delete_webhook(true).await.unwrap();
    let info = client.get_webhook_info().await.unwrap();
    assert!(info.url.is_empty());
    assert_eq!(info.pending_update_count, 3);
}

#[tokio::test]
async fn get_updates_sends_offset_and_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_partial_json(json!({
            "offset": 101,
            "timeout": 0,
            "allowed_updates": ["message"]
        })))
        .respond_with(ok(json!([
            {"update_id": 101, "message": sent_message(5, "привет")},
            {"update_id": 102}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let updates = client(&server)
        .await
        .get_updates(Some(101), 0, &["message".to_owned()])
        .await
        .unwrap();

    assert_eq!(updates.len(), 2);
    assert_eq!(
        updates[0].message.as_ref().and_then(|m| m.text()),
        Some("привет")
    );
    assert!(updates[1].message.is_none());
}
