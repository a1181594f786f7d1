//! Blocking provider tests
//!
//! The mock server runs on its own multi-thread runtime so the blocking
//! provider can drive its requests from a plain test thread.

use tokio::runtime::Runtime;
use wechat_mp_code::blocking::CodeProvider;
use wechat_mp_code::client::WechatClient;
use wechat_mp_code::{ProtocolError, WechatError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_server(runtime: &Runtime, image_response: ResponseTemplate) -> MockServer {
    runtime.block_on(async {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cgi-bin/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "T1",
                "expires_in": 7200
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/wxa/getwxacodeunlimit"))
            .and(query_param("access_token", "T1"))
            .respond_with(image_response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    })
}

fn create_test_provider(mock_server: &MockServer) -> CodeProvider {
    let client = WechatClient::builder()
        .appid("wx1234567890abcdef")
        .secret("secret1234567890ab")
        .base_url(mock_server.uri())
        .build()
        .unwrap();
    CodeProvider::with_client(client, "id=42", 430).unwrap()
}

#[test]
fn test_blocking_fetch_code_image() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(
        &runtime,
        ResponseTemplate::new(200)
            .insert_header("content-type", "image/jpeg")
            .set_body_bytes(vec![0xFF, 0xD8, 0xFF]),
    );

    let mut provider = create_test_provider(&mock_server);
    let image = provider.fetch_code_image().unwrap();

    assert_eq!(image, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(provider.access_token(), Some("T1"));
    assert_eq!(provider.scene(), "id=42");
    assert_eq!(provider.width(), 430);

    runtime.block_on(mock_server.verify());
}

#[test]
fn test_blocking_not_image() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(
        &runtime,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 40001,
            "errmsg": "invalid credential"
        })),
    );

    let mut provider = create_test_provider(&mock_server);
    let err = provider.fetch_code_image().unwrap_err();

    assert!(matches!(
        err,
        WechatError::Protocol(ProtocolError::NotImage { .. })
    ));

    runtime.block_on(mock_server.verify());
}

#[test]
fn test_blocking_keeps_token_across_conversion() {
    let runtime = Runtime::new().unwrap();
    let mock_server = runtime.block_on(async {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi-bin/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "T1",
                "expires_in": 7200
            })))
            .mount(&mock_server)
            .await;
        mock_server
    });

    let mut provider = create_test_provider(&mock_server);
    provider.fetch_access_token().unwrap();

    let provider = provider.into_async();
    assert_eq!(provider.access_token(), Some("T1"));
}
