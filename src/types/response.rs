use serde::{Deserialize, Deserializer};

/// Body of `GET /cgi-bin/token`
///
/// Both fields default when absent or `null`: WeChat answers failed
/// credential exchanges with an `errcode` object, which decodes into an
/// empty token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires_in: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
