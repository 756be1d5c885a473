use homework_engine::{DeliveryError, Messenger, TelegramMessenger, TelegramSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn messenger_for(server: &MockServer) -> TelegramMessenger {
    let settings = TelegramSettings {
        base_url: server.uri(),
        ..TelegramSettings::default()
    };
    TelegramMessenger::new(settings, "123:abc").unwrap()
}

#[tokio::test]
async fn send_message_posts_chat_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({"chat_id": "42", "text": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    messenger_for(&server)
        .send_message("42", "hello")
        .await
        .expect("delivered");
}

#[tokio::test]
async fn telegram_error_description_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = messenger_for(&server)
        .send_message("42", "hello")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Rejected {
            code: 400,
            description: "Bad Request: chat not found".to_string(),
        }
    );
}

#[tokio::test]
async fn non_json_reply_is_a_delivery_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = messenger_for(&server)
        .send_message("42", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Rejected { code: 502, .. }));
}

#[tokio::test]
async fn request_errors_do_not_leak_the_token() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let settings = TelegramSettings {
        base_url: uri,
        ..TelegramSettings::default()
    };
    let messenger = TelegramMessenger::new(settings, "123:secret").unwrap();
    let err = messenger.send_message("42", "hello").await.unwrap_err();
    assert!(matches!(err, DeliveryError::Request(_)));
    assert!(!err.to_string().contains("secret"));
}
