use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type ArgumentResult<T> = std::result::Result<T, ArgumentError>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument : {0}")]
    Argument(#[from] ArgumentError),
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("server responded with status {status} : {data}")]
    Http { status: u16, data: String },
    /// Decoded `{error_code, message}` record. Displays the message only.
    #[error("{message}")]
    Api { code: Option<i64>, message: String },
    #[error("response has malformed format : {0}")]
    MalformedResponse(String),
    #[error("An error occurred processing the request.")]
    EmptyResponse,
    #[error("response contained no {0} record")]
    UnexpectedResponse(String),
    #[error("record could not be decoded : {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url : {0}")]
    Url(#[from] url::ParseError),
}

/// Precondition violations, reported before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("You must provide a consumer key.")]
    MissingConsumerKey,
    #[error("You must provide a consumer secret.")]
    MissingConsumerSecret,
    #[error("You must provide BOTH an access token and an access token secret.")]
    IncompleteAccessToken,
    #[error("An access token is required. Authenticate first or supply one to the client.")]
    MissingAccessToken,
    #[error("An access token secret is required. Authenticate first or supply one to the client.")]
    MissingAccessTokenSecret,
    #[error("You must provide a username.")]
    MissingUsername,
    #[error("You must provide a password.")]
    MissingPassword,
    #[error("No OAuth callback path provided.")]
    MissingCallbackPath,
    #[error("You must provide a URL.")]
    MissingUrl,
    #[error("You must provide an endpoint.")]
    MissingEndpoint,
    #[error("unknown endpoint {0}")]
    UnknownEndpoint(String),
}

#[derive(Error, Debug, Clone)]
pub enum TokenReaderError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
}

impl Error {
    /// Returns the precondition that was violated, if any.
    pub fn argument(&self) -> Option<&ArgumentError> {
        match self {
            Error::Argument(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
