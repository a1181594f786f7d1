//! WeChat HTTP Client
//!
//! Provides HTTP client wrapper for WeChat API calls.

use http::header::CONTENT_TYPE;
use http::StatusCode;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::error::WechatError;
use crate::types::{AppId, AppSecret};

use super::WechatClientBuilder;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// A fully read response: the `Content-Type` header and the body.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// WeChat API Client
///
/// Holds the app credentials and the reqwest connection pool. Cloning is
/// cheap and clones share the pool.
#[derive(Clone)]
pub struct WechatClient {
    http: Client,
    appid: AppId,
    secret: AppSecret,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for WechatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatClient")
            .field("appid", &self.appid)
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl WechatClient {
    /// Create a client for the production API with default transport settings.
    ///
    /// Performs no network I/O.
    pub fn new(appid: impl Into<AppId>, secret: impl Into<AppSecret>) -> Self {
        Self::from_parts(
            Client::new(),
            appid.into(),
            secret.into(),
            DEFAULT_BASE_URL.to_string(),
        )
    }

    /// Create a new client builder
    pub fn builder() -> WechatClientBuilder {
        WechatClientBuilder::default()
    }

    pub(crate) fn from_parts(
        http: Client,
        appid: AppId,
        secret: AppSecret,
        base_url: String,
    ) -> Self {
        Self {
            http,
            appid,
            secret,
            base_url,
            middleware_executor: None,
        }
    }

    /// Get the appid
    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    /// Get the app secret
    pub(crate) fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn append_access_token(path: &str, access_token: &str) -> String {
        let encoded = utf8_percent_encode(access_token, NON_ALPHANUMERIC);
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}access_token={encoded}")
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    /// Send the request and read the whole body.
    ///
    /// The HTTP status is not checked; callers judge the payload.
    async fn execute(&self, request: reqwest::Request) -> Result<RawResponse, WechatError> {
        let response = self
            .send_request(request)
            .await
            .map_err(WechatError::Network)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        let body = response.bytes().await.map_err(WechatError::Io)?;

        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }

    /// GET `path` with the given query parameters.
    pub(crate) async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, WechatError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .get(url)
            .query(query)
            .build()
            .map_err(WechatError::Network)?;
        self.execute(request).await
    }

    /// POST `body` as JSON to `path` (which may carry its own query string).
    pub(crate) async fn post_json_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, WechatError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .post(url)
            .json(body)
            .build()
            .map_err(WechatError::Network)?;
        self.execute(request).await
    }
}

impl tower::Service<reqwest::Request> for WechatClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WechatClient {
        WechatClient::builder()
            .appid(AppId::new("wx1234567890abcdef"))
            .secret(AppSecret::new("secret1234567890ab"))
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_uses_default_base_url() {
        let client = WechatClient::new("wx1234567890abcdef", "secret1234567890ab");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.appid(), "wx1234567890abcdef");
        assert_eq!(client.secret(), "secret1234567890ab");
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = WechatClient::new("wx1234567890abcdef", "secret1234567890ab");
        let debug = format!("{:?}", client);
        assert!(debug.contains("wx1234567890abcdef"));
        assert!(!debug.contains("secret1234567890ab"));
    }

    #[test]
    fn test_append_access_token() {
        assert_eq!(
            WechatClient::append_access_token("/wxa/getwxacodeunlimit", "abc"),
            "/wxa/getwxacodeunlimit?access_token=abc"
        );
        assert_eq!(
            WechatClient::append_access_token("/a?x=1", "abc"),
            "/a?x=1&access_token=abc"
        );
    }

    #[test]
    fn test_append_access_token_encodes() {
        assert_eq!(
            WechatClient::append_access_token("/a", "a+b/c=&"),
            "/a?access_token=a%2Bb%2Fc%3D%26"
        );
    }

    #[tokio::test]
    async fn test_get_raw_reads_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .and(query_param("k", "v"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_bytes(b"hello".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let raw = client_for(&server).get_raw("/echo", &[("k", "v")]).await.unwrap();

        assert_eq!(raw.status, StatusCode::OK);
        assert_eq!(raw.content_type.as_deref(), Some("text/plain"));
        assert_eq!(raw.body, b"hello");
    }

    #[tokio::test]
    async fn test_post_json_raw_sets_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .expect(1)
            .mount(&server)
            .await;

        let raw = client_for(&server)
            .post_json_raw("/submit", &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        assert_eq!(raw.body, vec![1u8, 2, 3]);
        assert!(raw.content_type.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = WechatClient::builder()
            .appid(AppId::new("wx1234567890abcdef"))
            .secret(AppSecret::new("secret1234567890ab"))
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();

        let result = client.get_raw("/cgi-bin/token", &[]).await;

        assert!(matches!(result, Err(WechatError::Network(_))));
    }
}
