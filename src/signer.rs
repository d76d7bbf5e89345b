use std::borrow::Cow;

use crate::{ArgumentError, ArgumentResult, SecretsProvider, OAUTH_KEY_PREFIX};
use http::Method;
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use url::Url;

/// Which key pair signs a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Consumer key and secret only. Used for the username/password exchange.
    XAuth,
    /// Consumer pair plus the access token pair.
    Token,
}

#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    mode: AuthMode,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    /// Fails when `mode` is `Token` and either half of the token pair is
    /// missing.
    pub fn new(
        secrets: &'a TSecretsProvider,
        mode: AuthMode,
        parameters: OAuthParameters<'a>,
    ) -> ArgumentResult<Self> {
        if mode == AuthMode::Token {
            match secrets.get_token_option_pair() {
                (None, _) => return Err(ArgumentError::MissingAccessToken),
                (_, None) => return Err(ArgumentError::MissingAccessTokenSecret),
                _ => {}
            }
        }
        Ok(Signer {
            secrets,
            mode,
            parameters,
        })
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Builds the `Authorization` header value.
    ///
    /// `payload` is the urlencoded query (when `is_url_query`) or form body.
    pub fn generate_signature(
        self,
        method: Method,
        url: Url,
        payload: &str,
        is_url_query: bool,
    ) -> String {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = match self.mode {
            AuthMode::XAuth => (None, None),
            AuthMode::Token => self.secrets.get_token_option_pair(),
        };
        let options = self.parameters.build_options(token);

        // oauth1-request wants every parameter in ascending key order, with
        // the oauth_* block inserted at its sorted position.
        let mut params: Vec<(Cow<str>, Cow<str>)> =
            url::form_urlencoded::parse(payload.as_bytes())
                .filter(|(key, _)| !key.starts_with(OAUTH_KEY_PREFIX))
                .collect();
        params.sort();
        let split = params.partition_point(|(key, _)| &**key < OAUTH_KEY_PREFIX);
        let (before_oauth, after_oauth) = params.split_at(split);

        let mut signer = if is_url_query {
            OAuthSigner::with_signature_method(
                HmacSha1,
                method.as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        } else {
            OAuthSigner::form_with_signature_method(
                HmacSha1,
                method.as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        };
        for (key, value) in before_oauth {
            signer.parameter(key, value);
        }
        let mut signer = signer.oauth_parameters(consumer_key, &options);
        for (key, value) in after_oauth {
            signer.parameter(key, value);
        }

        signer.finish().authorization
    }
}

/// Optional oauth_* values. Nonce and timestamp are generated when unset.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
    version: bool,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// When `true`, `oauth_version="1.0"` is sent. Otherwise it is omitted.
    pub fn version<T>(self, version: T) -> Self
    where
        T: Into<bool>,
    {
        OAuthParameters {
            version: version.into(),
            ..self
        }
    }

    fn build_options<'b>(&'b self, token: Option<&'b str>) -> Options<'b> {
        let mut opt = Options::new();

        // NOTE: items must be added by alphabetical order
        if let Some(ref callback) = self.callback {
            opt.callback(callback.as_ref());
        }
        if let Some(ref nonce) = self.nonce {
            opt.nonce(nonce.as_ref());
        }
        if let Some(timestamp) = self.timestamp {
            opt.timestamp(timestamp);
        }
        if let Some(token) = token {
            opt.token(token);
        }
        opt.version(self.version);

        opt
    }
}
