//! Blocking facade over [`crate::CodeProvider`]
//!
//! Each provider owns a current-thread tokio runtime and blocks the calling
//! thread on every fetch. Do not call it from inside an async runtime; use
//! the async [`crate::CodeProvider`] there.

use tokio::runtime::{Builder, Runtime};

use crate::client::WechatClient;
use crate::error::WechatError;
use crate::types::{AppId, AppSecret};

/// Synchronous [`crate::CodeProvider`].
#[derive(Debug)]
pub struct CodeProvider {
    inner: crate::CodeProvider,
    runtime: Runtime,
}

impl CodeProvider {
    /// Create a provider against the production API.
    ///
    /// # Errors
    /// `WechatError::Config` if the runtime cannot be started.
    pub fn new(
        appid: impl Into<AppId>,
        secret: impl Into<AppSecret>,
        scene: impl Into<String>,
        width: u32,
    ) -> Result<Self, WechatError> {
        Self::from_async(crate::CodeProvider::new(appid, secret, scene, width))
    }

    /// Create a provider on top of a configured client.
    ///
    /// # Errors
    /// `WechatError::Config` if the runtime cannot be started.
    pub fn with_client(
        client: WechatClient,
        scene: impl Into<String>,
        width: u32,
    ) -> Result<Self, WechatError> {
        Self::from_async(crate::CodeProvider::with_client(client, scene, width))
    }

    /// Wrap an existing async provider, keeping its stored token.
    ///
    /// # Errors
    /// `WechatError::Config` if the runtime cannot be started.
    pub fn from_async(inner: crate::CodeProvider) -> Result<Self, WechatError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| WechatError::Config(format!("failed to start runtime: {e}")))?;

        Ok(Self { inner, runtime })
    }

    pub fn scene(&self) -> &str {
        self.inner.scene()
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.inner.access_token()
    }

    /// See [`crate::CodeProvider::fetch_access_token`].
    pub fn fetch_access_token(&mut self) -> Result<(), WechatError> {
        self.runtime.block_on(self.inner.fetch_access_token())
    }

    /// See [`crate::CodeProvider::fetch_code_image`].
    pub fn fetch_code_image(&mut self) -> Result<Vec<u8>, WechatError> {
        self.runtime.block_on(self.inner.fetch_code_image())
    }

    /// Unwrap into the async provider.
    pub fn into_async(self) -> crate::CodeProvider {
        self.inner
    }
}
