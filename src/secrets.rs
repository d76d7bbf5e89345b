use crate::{ArgumentError, ArgumentResult};

/// Source of the key pairs used for signing.
pub trait SecretsProvider {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str);

    fn get_token_option_pair<'a>(&'a self) -> (Option<&'a str>, Option<&'a str>);

    fn get_token_pair_option<'a>(&'a self) -> Option<(&'a str, &'a str)> {
        match self.get_token_option_pair() {
            (Some(token), Some(secret)) => Some((token, secret)),
            _ => None,
        }
    }
}

/// Consumer identity plus the optional access token pair.
///
/// The token and its secret are always both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: Option<String>,
    access_token_secret: Option<String>,
}

impl Credentials {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> ArgumentResult<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        let consumer_key = consumer_key.into();
        let consumer_secret = consumer_secret.into();
        if consumer_key.is_empty() {
            return Err(ArgumentError::MissingConsumerKey);
        }
        if consumer_secret.is_empty() {
            return Err(ArgumentError::MissingConsumerSecret);
        }
        Ok(Credentials {
            consumer_key,
            consumer_secret,
            access_token: None,
            access_token_secret: None,
        })
    }

    /// Attaches an access token pair. Empty strings count as absent, and
    /// supplying only one half is rejected.
    pub fn token<TKey, TSecret>(
        self,
        access_token: Option<TKey>,
        access_token_secret: Option<TSecret>,
    ) -> ArgumentResult<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        let access_token = access_token.map(Into::into).filter(|s| !s.is_empty());
        let access_token_secret = access_token_secret
            .map(Into::into)
            .filter(|s| !s.is_empty());
        match (access_token, access_token_secret) {
            (Some(token), Some(secret)) => Ok(Credentials {
                access_token: Some(token),
                access_token_secret: Some(secret),
                ..self
            }),
            (None, None) => Ok(self),
            _ => Err(ArgumentError::IncompleteAccessToken),
        }
    }

    pub(crate) fn set_token_pair(&mut self, access_token: String, access_token_secret: String) {
        self.access_token = Some(access_token);
        self.access_token_secret = Some(access_token_secret);
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn access_token_secret(&self) -> Option<&str> {
        self.access_token_secret.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some() && self.access_token_secret.is_some()
    }
}

impl SecretsProvider for Credentials {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_option_pair<'a>(&'a self) -> (Option<&'a str>, Option<&'a str>) {
        (
            self.access_token.as_deref(),
            self.access_token_secret.as_deref(),
        )
    }
}
