use std::time::Duration;

use crate::DEFAULT_TIMEOUT;

/// Construction-time settings for [`crate::Instapaper`]. Every field is
/// optional.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub(crate) base_url: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) access_token: Option<String>,
    pub(crate) access_token_secret: Option<String>,
    pub(crate) oauth_callback_path: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: None,
            timeout: Some(DEFAULT_TIMEOUT),
            access_token: None,
            access_token_secret: None,
            oauth_callback_path: None,
            username: None,
            password: None,
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Point the client at another API root, e.g. a local test server.
    pub fn base_url<T: Into<String>>(self, base_url: T) -> Self {
        ClientOptions {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    /// Per-request deadline. `None` waits indefinitely.
    pub fn timeout(self, timeout: Option<Duration>) -> Self {
        ClientOptions { timeout, ..self }
    }

    pub fn access_token<T: Into<String>>(self, access_token: T) -> Self {
        ClientOptions {
            access_token: Some(access_token.into()),
            ..self
        }
    }

    pub fn access_token_secret<T: Into<String>>(self, access_token_secret: T) -> Self {
        ClientOptions {
            access_token_secret: Some(access_token_secret.into()),
            ..self
        }
    }

    pub fn oauth_callback_path<T: Into<String>>(self, path: T) -> Self {
        ClientOptions {
            oauth_callback_path: Some(path.into()),
            ..self
        }
    }

    /// Login used by [`crate::Instapaper::authenticate_with_login`].
    pub fn login<U, P>(self, username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        ClientOptions {
            username: Some(username.into()),
            password: Some(password.into()),
            ..self
        }
    }
}

/// Per-call settings for [`crate::Instapaper::authenticate_url_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticateUrlOptions {
    pub(crate) oauth_callback_path: Option<String>,
}

impl AuthenticateUrlOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the client's callback path.
    pub fn oauth_callback_path<T: Into<String>>(self, path: T) -> Self {
        AuthenticateUrlOptions {
            oauth_callback_path: Some(path.into()),
        }
    }
}

/// Optional parameters of `bookmarks/add`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkOptions {
    title: Option<String>,
    description: Option<String>,
    folder_id: Option<String>,
    resolve_final_url: Option<bool>,
    extra: Vec<(String, String)>,
}

impl BookmarkOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn title<T: Into<String>>(self, title: T) -> Self {
        BookmarkOptions {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn description<T: Into<String>>(self, description: T) -> Self {
        BookmarkOptions {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn folder_id<T: ToString>(self, folder_id: T) -> Self {
        BookmarkOptions {
            folder_id: Some(folder_id.to_string()),
            ..self
        }
    }

    pub fn resolve_final_url(self, resolve: bool) -> Self {
        BookmarkOptions {
            resolve_final_url: Some(resolve),
            ..self
        }
    }

    /// Any other parameter, passed through verbatim.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// The form body for `url` with these options, in a fixed order.
    pub(crate) fn to_form(&self, url: &str) -> Vec<(String, String)> {
        let mut form = vec![("url".to_string(), url.to_string())];
        let known = [
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("folder_id", self.folder_id.clone()),
            (
                "resolve_final_url",
                self.resolve_final_url
                    .map(|r| if r { "1" } else { "0" }.to_string()),
            ),
        ];
        for (key, value) in known.iter() {
            if let Some(value) = value {
                form.push((key.to_string(), value.clone()));
            }
        }
        form.extend(self.extra.iter().cloned());
        form
    }
}
