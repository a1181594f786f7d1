use std::fmt;

use serde::{Deserialize, Serialize};

/// WeChat Mini Program AppID
///
/// Accepted as given; WeChat rejects malformed ids at the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// WeChat Mini Program AppSecret
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret([REDACTED])")
    }
}

impl From<&str> for AppSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for AppSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// WeChat Access Token
///
/// May be empty when the token endpoint answered with an error object.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_id_accepts_anything() {
        assert_eq!(AppId::new("wx1234567890abcdef").as_str(), "wx1234567890abcdef");
        assert_eq!(AppId::from("short").as_str(), "short");
        assert_eq!(AppId::from(String::new()).as_str(), "");
    }

    #[test]
    fn test_app_secret_debug_is_redacted() {
        let secret = AppSecret::from("super_secret_value");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super_secret_value"));
        assert_eq!(secret.as_str(), "super_secret_value");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("token1234567890abcdef");
        assert!(!format!("{:?}", token).contains("token1234567890abcdef"));
        assert!(!token.is_empty());
        assert!(AccessToken::new("").is_empty());
    }
}
