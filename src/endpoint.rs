use std::{fmt, str::FromStr};

use serde::Serialize;
use url::Url;

use crate::{ArgumentError, Result};

/// Logical API operations and the paths they live at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    OAuthAccessToken,
    AccountVerifyCredentials,
    BookmarksList,
    BookmarksUpdateReadProgress,
    BookmarksAdd,
    BookmarksDelete,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::OAuthAccessToken,
        Endpoint::AccountVerifyCredentials,
        Endpoint::BookmarksList,
        Endpoint::BookmarksUpdateReadProgress,
        Endpoint::BookmarksAdd,
        Endpoint::BookmarksDelete,
    ];

    /// Path relative to the versioned base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::OAuthAccessToken => "/oauth/access_token",
            Endpoint::AccountVerifyCredentials => "/account/verify_credentials",
            Endpoint::BookmarksList => "/bookmarks/list",
            Endpoint::BookmarksUpdateReadProgress => "/bookmarks/update_read_progress",
            Endpoint::BookmarksAdd => "/bookmarks/add",
            Endpoint::BookmarksDelete => "/bookmarks/delete",
        }
    }

    /// Dotted name such as `bookmarks.add`.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::OAuthAccessToken => "oauth.access_token",
            Endpoint::AccountVerifyCredentials => "account.verify_credentials",
            Endpoint::BookmarksList => "bookmarks.list",
            Endpoint::BookmarksUpdateReadProgress => "bookmarks.update_read_progress",
            Endpoint::BookmarksAdd => "bookmarks.add",
            Endpoint::BookmarksDelete => "bookmarks.delete",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = ArgumentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Endpoint::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| ArgumentError::UnknownEndpoint(s.to_string()))
    }
}

/// Join `base`, `endpoint` and an optional query into a request URL.
///
/// The endpoint gets a leading `/` when it has none. `query` is appended only
/// when it serializes into at least one key/value pair.
pub fn prepare_url<Q>(base: &str, endpoint: &str, query: Option<&Q>) -> Result<Url>
where
    Q: Serialize + ?Sized,
{
    if endpoint.is_empty() {
        return Err(ArgumentError::MissingEndpoint.into());
    }
    let separator = if endpoint.starts_with('/') { "" } else { "/" };
    let mut url = format!("{}{}{}", base.trim_end_matches('/'), separator, endpoint);

    if let Some(query) = query {
        match serde_urlencoded::to_string(query) {
            Ok(q) if !q.is_empty() => {
                url.push('?');
                url.push_str(&q);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(error = %err, "query parameters are not key/value pairs, skipping");
            }
        }
    }

    Ok(Url::parse(&url)?)
}
