//! Access token exchange for WeChat API
//!
//! A single round trip to `/cgi-bin/token`. Nothing is cached here: callers
//! decide what to keep.

use log::{debug, warn};

use crate::client::WechatClient;
use crate::error::WechatError;
use crate::types::AccessTokenResponse;

pub(crate) const TOKEN_PATH: &str = "/cgi-bin/token";
const GRANT_TYPE: &str = "client_credential";

/// Exchange the client's credentials for a fresh access token.
///
/// An upstream error object (no `access_token` field) or a `null` body is
/// not an error here; it decodes into an empty token.
///
/// # Errors
/// - `WechatError::Network` if the request cannot be sent
/// - `WechatError::Io` if the body cannot be read
/// - `WechatError::Decode` if the body is not JSON
pub async fn request_access_token(
    client: &WechatClient,
) -> Result<AccessTokenResponse, WechatError> {
    let query = [
        ("grant_type", GRANT_TYPE),
        ("appid", client.appid()),
        ("secret", client.secret()),
    ];

    let raw = client.get_raw(TOKEN_PATH, &query).await?;
    let response = serde_json::from_slice::<Option<AccessTokenResponse>>(&raw.body)?
        .unwrap_or_default();

    if response.access_token.is_empty() {
        warn!(
            "token endpoint returned no access_token (status {})",
            raw.status
        );
    } else {
        debug!("access token refreshed, expires in {}s", response.expires_in);
    }

    Ok(response)
}
