use std::{collections::HashMap, str::FromStr};

use serde::Deserialize;

use crate::{TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// Represents response of the access token exchange.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl FromStr for TokenResponse {
    type Err = TokenReaderError;

    fn from_str(s: &str) -> TokenReaderResult<Self> {
        read_oauth_token(s)
    }
}

/// Decode an `application/x-www-form-urlencoded` token body.
pub(crate) fn read_oauth_token(text: &str) -> TokenReaderResult<TokenResponse> {
    let mut pairs = url::form_urlencoded::parse(text.trim().as_bytes())
        .into_owned()
        .collect::<HashMap<String, String>>();
    let oauth_token = pairs.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = pairs.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: pairs,
        }),
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_KEY,
            text.to_string(),
        )),
        (_, None) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text.to_string(),
        )),
    }
}
