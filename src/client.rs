use http::Method;
use parking_lot::RwLock;
use reqwest::{Client as ReqwestClient, Url};
use serde::Serialize;

use crate::{
    normalize, prepare_url, ArgumentError, AuthMode, AuthenticateUrlOptions, Bookmark,
    BookmarkOptions, ClientOptions, Credentials, Dispatcher, Endpoint, NormalizedResponse,
    OAuthParameters, RecordKind, Result, TokenResponse, Transport, User, DEFAULT_BASE_URL,
    X_AUTH_MODE_CLIENT_AUTH, X_AUTH_MODE_KEY, X_AUTH_PASSWORD_KEY, X_AUTH_USERNAME_KEY,
};

/// Instapaper API client.
///
/// Every operation resolves to a `Result`; precondition failures are
/// returned as `Error::Argument` before anything is sent.
#[derive(Debug)]
pub struct Instapaper<T = ReqwestClient> {
    dispatcher: Dispatcher<T>,
    base_url: String,
    credentials: RwLock<Credentials>,
    oauth_callback_path: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl Instapaper<ReqwestClient> {
    /// Constructs a client with default options.
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Result<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Self::with_options(consumer_key, consumer_secret, ClientOptions::default())
    }

    /// Constructs a client with the given options.
    ///
    /// # Errors
    ///
    /// Fails when either consumer value is empty, or when `options` carries
    /// only one half of the access token pair.
    pub fn with_options<TKey, TSecret>(
        consumer_key: TKey,
        consumer_secret: TSecret,
        options: ClientOptions,
    ) -> Result<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Self::with_transport(ReqwestClient::new(), consumer_key, consumer_secret, options)
    }
}

impl<T> Instapaper<T>
where
    T: Transport,
{
    /// Constructs a client that sends its requests through `transport`.
    pub fn with_transport<TKey, TSecret>(
        transport: T,
        consumer_key: TKey,
        consumer_secret: TSecret,
        options: ClientOptions,
    ) -> Result<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        let credentials = Credentials::new(consumer_key, consumer_secret)?
            .token(options.access_token, options.access_token_secret)?;
        Ok(Instapaper {
            dispatcher: Dispatcher::new(transport).timeout(options.timeout),
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            credentials: RwLock::new(credentials),
            oauth_callback_path: options.oauth_callback_path,
            username: options.username,
            password: options.password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    /// A snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    /// The stored access token pair, if any.
    pub fn access_token_pair(&self) -> Option<(String, String)> {
        let credentials = self.credentials();
        match (credentials.access_token(), credentials.access_token_secret()) {
            (Some(token), Some(secret)) => Some((token.to_string(), secret.to_string())),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().has_token()
    }

    pub fn oauth_callback_path(&self) -> Option<&str> {
        self.oauth_callback_path.as_deref()
    }

    pub fn set_oauth_callback_path<P: Into<String>>(&mut self, path: P) {
        self.oauth_callback_path = Some(path.into());
    }

    /// [`prepare_url`] against this client's base URL.
    pub fn prepare_url<Q>(&self, endpoint: &str, query: Option<&Q>) -> Result<Url>
    where
        Q: Serialize + ?Sized,
    {
        prepare_url(&self.base_url, endpoint, query)
    }

    /// Exchange a username and password for an access token pair (xAuth).
    ///
    /// On success the pair is stored on the client and used to sign every
    /// later call.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let body = login_form(username, password)?;
        let url = self.prepare_url(Endpoint::OAuthAccessToken.path(), None::<&()>)?;
        let credentials = self.credentials();
        let request = self
            .dispatcher
            .request(
                Method::POST,
                url,
                &credentials,
                AuthMode::XAuth,
                OAuthParameters::new(),
            )?
            .form(&body);
        let text = self.dispatcher.dispatch(request).await?;
        let token: TokenResponse = text.parse()?;

        self.credentials
            .write()
            .set_token_pair(token.oauth_token.clone(), token.oauth_token_secret.clone());
        tracing::info!(consumer_key = %credentials.consumer_key(), "access token acquired");
        Ok(token)
    }

    /// [`Instapaper::authenticate`] with the login given in [`ClientOptions`].
    pub async fn authenticate_with_login(&self) -> Result<TokenResponse> {
        let username = self.username.as_deref().unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();
        self.authenticate(username, password).await
    }

    /// The access token URL for the three-legged flow.
    ///
    /// # Errors
    ///
    /// Requires an OAuth callback path, configured on the client or given
    /// in `options`.
    pub fn authenticate_url(&mut self) -> Result<Url> {
        self.authenticate_url_with(AuthenticateUrlOptions::default())
    }

    /// [`Instapaper::authenticate_url`], storing the callback path from
    /// `options` when one is given.
    pub fn authenticate_url_with(&mut self, options: AuthenticateUrlOptions) -> Result<Url> {
        if let Some(path) = options.oauth_callback_path {
            self.oauth_callback_path = Some(path);
        }
        if self.oauth_callback_path.is_none() {
            return Err(ArgumentError::MissingCallbackPath.into());
        }
        self.prepare_url(Endpoint::OAuthAccessToken.path(), None::<&()>)
    }

    /// The account the access token belongs to.
    pub async fn get_user(&self) -> Result<User> {
        let empty: [(&str, &str); 0] = [];
        self.call(Method::POST, Endpoint::AccountVerifyCredentials, &empty)
            .await?
            .single(RecordKind::User)?
            .parse()
    }

    /// Save `url` with no further options.
    pub async fn add_bookmark(&self, url: &str) -> Result<Bookmark> {
        self.add_bookmark_with(url, &BookmarkOptions::default())
            .await
    }

    /// Save `url` with a title, description, folder, etc.
    pub async fn add_bookmark_with(
        &self,
        url: &str,
        options: &BookmarkOptions,
    ) -> Result<Bookmark> {
        if url.is_empty() {
            return Err(ArgumentError::MissingUrl.into());
        }
        let form = options.to_form(url);
        self.call(Method::POST, Endpoint::BookmarksAdd, &form)
            .await?
            .single(RecordKind::Bookmark)?
            .parse()
    }

    /// Signed call to any endpoint with the stored access token.
    ///
    /// `params` go to the query string for GET and to the form body
    /// otherwise.
    pub async fn call<P>(
        &self,
        method: Method,
        endpoint: Endpoint,
        params: &P,
    ) -> Result<NormalizedResponse>
    where
        P: Serialize + ?Sized,
    {
        let url = self.prepare_url(endpoint.path(), None::<&()>)?;
        let credentials = self.credentials();
        let request = self.dispatcher.request(
            method.clone(),
            url,
            &credentials,
            AuthMode::Token,
            OAuthParameters::new(),
        )?;
        let request = if method == Method::GET {
            request.query(params)
        } else {
            request.form(params)
        };
        let outcome = self.dispatcher.dispatch(request).await.map(Into::into);
        normalize(outcome)
    }
}

fn login_form(username: &str, password: &str) -> Result<[(&'static str, String); 3]> {
    if username.is_empty() {
        return Err(ArgumentError::MissingUsername.into());
    }
    if password.is_empty() {
        return Err(ArgumentError::MissingPassword.into());
    }
    Ok([
        (X_AUTH_USERNAME_KEY, username.to_string()),
        (X_AUTH_PASSWORD_KEY, password.to_string()),
        (X_AUTH_MODE_KEY, X_AUTH_MODE_CLIENT_AUTH.to_string()),
    ])
}
