//! Unlimited mini program code (`wxacode.getUnlimited`)
//!
//! [`CodeProvider`] refreshes the access token and then requests the code
//! image, once per call.

use log::debug;

use crate::client::{RawResponse, WechatClient};
use crate::error::{ApiErrorBody, ProtocolError, WechatError};
use crate::token::request_access_token;
use crate::types::{AccessToken, AppId, AppSecret, CodeRequest};

pub(crate) const CODE_PATH: &str = "/wxa/getwxacodeunlimit";

/// Generates mini program code images for one scene.
///
/// Operations take `&mut self`: a provider serves one caller at a time.
/// Create one per task if codes are generated concurrently; the underlying
/// [`WechatClient`] can be cloned and shares its connection pool.
///
/// ```rust,ignore
/// use wechat_mp_code::CodeProvider;
///
/// let mut provider = CodeProvider::new("wx1234567890abcdef", "secret", "id=42", 430);
/// let image = provider.fetch_code_image().await?;
/// std::fs::write("code.jpg", image)?;
/// ```
#[derive(Debug, Clone)]
pub struct CodeProvider {
    client: WechatClient,
    scene: String,
    width: u32,
    access_token: Option<AccessToken>,
}

impl CodeProvider {
    /// Create a provider against the production API.
    ///
    /// Nothing is validated and no request is made until a fetch is invoked.
    pub fn new(
        appid: impl Into<AppId>,
        secret: impl Into<AppSecret>,
        scene: impl Into<String>,
        width: u32,
    ) -> Self {
        Self::with_client(WechatClient::new(appid, secret), scene, width)
    }

    /// Create a provider on top of a configured client (base URL, timeouts,
    /// middleware).
    pub fn with_client(client: WechatClient, scene: impl Into<String>, width: u32) -> Self {
        Self {
            client,
            scene: scene.into(),
            width,
            access_token: None,
        }
    }

    pub fn client(&self) -> &WechatClient {
        &self.client
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Token stored by the last successful [`fetch_access_token`](Self::fetch_access_token).
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(AccessToken::as_str)
    }

    /// Fetch a fresh access token and store it, replacing the previous one.
    ///
    /// The stored token is only replaced once the response decodes. An
    /// upstream error object decodes into an empty token, which is stored.
    ///
    /// # Errors
    /// `Network`, `Io` or `Decode`; see [`request_access_token`].
    pub async fn fetch_access_token(&mut self) -> Result<(), WechatError> {
        let response = request_access_token(&self.client).await?;
        self.access_token = Some(AccessToken::new(response.access_token));
        Ok(())
    }

    /// Fetch the code image for this provider's scene and width.
    ///
    /// Always refreshes the access token first. Returns the body exactly as
    /// received; the image format is not checked.
    ///
    /// # Errors
    /// - any error from [`fetch_access_token`](Self::fetch_access_token), unchanged
    /// - `WechatError::Network` / `WechatError::Io` for the image request
    /// - `WechatError::Protocol` when the response has no `Content-Type` or is
    ///   not an image; in the latter case the upstream `errcode`/`errmsg` is
    ///   attached when the body parses as one
    pub async fn fetch_code_image(&mut self) -> Result<Vec<u8>, WechatError> {
        self.fetch_access_token().await?;

        let token = self.access_token().unwrap_or_default();
        let path = WechatClient::append_access_token(CODE_PATH, token);
        let request = CodeRequest::new(self.scene.clone(), self.width);

        let raw = self.client.post_json_raw(&path, &request).await?;
        let image = into_image(raw)?;

        debug!("received code image for scene {:?} ({} bytes)", self.scene, image.len());
        Ok(image)
    }
}

fn into_image(raw: RawResponse) -> Result<Vec<u8>, WechatError> {
    let content_type = raw
        .content_type
        .ok_or(ProtocolError::MissingContentType)?;

    if !content_type.contains("image") {
        return Err(ProtocolError::NotImage {
            upstream: ApiErrorBody::parse(&raw.body),
            content_type,
        }
        .into());
    }

    Ok(raw.body)
}
