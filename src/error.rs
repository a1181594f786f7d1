use serde::Deserialize;
use thiserror::Error;

/// WeChat mini program code client error types
#[derive(Debug, Error)]
pub enum WechatError {
    /// The request could not be built or sent.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Io(#[source] reqwest::Error),

    /// The token endpoint returned a body that is not valid JSON.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The code endpoint did not answer with an image.
    #[error("WeChat protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WechatError {
    /// Returns the upstream `errcode`/`errmsg` pair when the code endpoint
    /// answered with a parseable error object instead of an image.
    pub fn upstream(&self) -> Option<&ApiErrorBody> {
        match self {
            WechatError::Protocol(ProtocolError::NotImage { upstream, .. }) => upstream.as_ref(),
            _ => None,
        }
    }
}

/// Failure modes of the code image response
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response header Content-Type not found")]
    MissingContentType,

    #[error("response error (Content-Type: {content_type})")]
    NotImage {
        content_type: String,
        upstream: Option<ApiErrorBody>,
    },
}

/// Error object WeChat returns in place of an image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub errcode: i32,
    #[serde(default)]
    pub errmsg: String,
}

impl ApiErrorBody {
    /// Best-effort parse; anything without an `errcode` yields `None`.
    pub(crate) fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
