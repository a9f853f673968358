use std::time::Duration;

use folio_engine::{ApiSettings, ChatAnswer, ContactPayload, FailureKind, PortfolioApi, ReqwestApi};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    settings_api(server, ApiSettings::default())
}

fn settings_api(server: &MockServer, settings: ApiSettings) -> ReqwestApi {
    ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        ..settings
    })
    .expect("api client")
}

fn payload() -> ContactPayload {
    ContactPayload {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: "Hello".to_string(),
        message: "Let's talk".to_string(),
        ..ContactPayload::default()
    }
}

#[tokio::test]
async fn contact_posts_json_with_headers_and_accepts_ok_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "",
            "company": "",
            "project_type": "",
            "budget": "",
            "subject": "Hello",
            "message": "Let's talk",
            "website": "",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "message": "Thanks!" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = api_for(&server)
        .submit_contact(&payload())
        .await
        .expect("contact ok");
    assert_eq!(ack.message.as_deref(), Some("Thanks!"));
}

#[tokio::test]
async fn contact_error_reply_is_application_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Spam detected" })))
        .mount(&server)
        .await;

    let err = api_for(&server).submit_contact(&payload()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Application {
            status: 400,
            detail: Some("Spam detected".to_string()),
        }
    );
}

#[tokio::test]
async fn contact_ok_false_is_application_failure_even_on_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": false, "message": "Try later" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).submit_contact(&payload()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Application {
            status: 200,
            detail: Some("Try later".to_string()),
        }
    );
}

#[tokio::test]
async fn non_json_reply_is_protocol_failure_regardless_of_status() {
    for status in [200, 500] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_raw("<html>Internal error</html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let err = api_for(&server).submit_contact(&payload()).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Protocol, "status {status}");
    }
}

#[tokio::test]
async fn malformed_json_is_protocol_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"ok\": tru", "application/json"))
        .mount(&server)
        .await;

    let err = api_for(&server).submit_contact(&payload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Protocol);
}

#[tokio::test]
async fn slow_contact_reply_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({ "ok": true })),
        )
        .mount(&server)
        .await;

    let api = settings_api(
        &server,
        ApiSettings {
            contact_timeout: Duration::from_millis(50),
            ..ApiSettings::default()
        },
    );
    let err = api.submit_contact(&payload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "x".repeat(64) })))
        .mount(&server)
        .await;

    let api = settings_api(
        &server,
        ApiSettings {
            max_reply_bytes: 16,
            ..ApiSettings::default()
        },
    );
    let err = api.send_chat("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Protocol);
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let api = ReqwestApi::new(ApiSettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..ApiSettings::default()
    })
    .expect("api client");

    let err = api.send_chat("hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn chat_posts_message_and_returns_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({ "message": "Hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there" })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = api_for(&server).send_chat("Hello").await.expect("chat ok");
    assert_eq!(
        answer,
        ChatAnswer {
            response: Some("Hi there".to_string())
        }
    );
}

#[tokio::test]
async fn chat_without_response_field_is_still_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let answer = api_for(&server).send_chat("Hello").await.expect("chat ok");
    assert_eq!(answer.response, None);
}

#[tokio::test]
async fn chat_error_field_is_application_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "overloaded" })))
        .mount(&server)
        .await;

    let err = api_for(&server).send_chat("Hello").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Application {
            status: 200,
            detail: Some("overloaded".to_string()),
        }
    );
}

#[tokio::test]
async fn slow_chat_reply_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({ "response": "late" })),
        )
        .mount(&server)
        .await;

    let api = settings_api(
        &server,
        ApiSettings {
            chat_timeout: Duration::from_millis(50),
            ..ApiSettings::default()
        },
    );
    let err = api.send_chat("Hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestApi::new(ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
