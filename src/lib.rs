/*!
instapaper-oauth1: an Instapaper API client signed with OAuth 1.0a.

Requests are signed by [oauth1-request](https://crates.io/crates/oauth1-request)
and sent with [reqwest](https://crates.io/crates/reqwest). Responses, which
the API delivers as flat arrays of `type`-tagged records, are grouped by kind
before the typed record is handed back.

# How to use

## Logging in with xAuth

```no_run
use instapaper_oauth1::Instapaper;

# async fn run() -> instapaper_oauth1::Result<()> {
let client = Instapaper::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")?;

// exchanges the login for an access token pair and keeps it on the client
let token = client.authenticate("user@example.com", "[PASSWORD]").await?;
println!("token: {}", token.oauth_token);

let user = client.get_user().await?;
println!("signed in as {}", user.username);
# Ok(())
# }
```

## Saving a bookmark with a known token

```no_run
use instapaper_oauth1::{BookmarkOptions, ClientOptions, Instapaper};

# async fn run() -> instapaper_oauth1::Result<()> {
let options = ClientOptions::new()
    .access_token("[ACCESS_TOKEN]")
    .access_token_secret("[TOKEN_SECRET]");
let client = Instapaper::with_options("[CONSUMER_KEY]", "[CONSUMER_SECRET]", options)?;

let bookmark = client
    .add_bookmark_with(
        "https://example.com/article",
        &BookmarkOptions::new().title("An article").resolve_final_url(true),
    )
    .await?;
println!("saved as {}", bookmark.bookmark_id);
# Ok(())
# }
```
*/
mod client;
mod dispatch;
mod endpoint;
mod error;
mod model;
mod normalize;
mod options;
mod request;
mod secrets;
mod signer;
mod token_reader;

// exposed to external program
pub use client::Instapaper;
pub use dispatch::{Dispatcher, HttpResponse, Transport, DEFAULT_TIMEOUT};
pub use endpoint::{prepare_url, Endpoint};
pub use error::{
    ArgumentError, ArgumentResult, Error, Result, TokenReaderError, TokenReaderResult,
};
pub use model::{Bookmark, User};
pub use normalize::{normalize, NormalizedResponse, RawResponse, Record, RecordKind};
pub use options::{AuthenticateUrlOptions, BookmarkOptions, ClientOptions};
pub use request::RequestBuilder;
pub use secrets::{Credentials, SecretsProvider};
pub use signer::{AuthMode, OAuthParameters, Signer};
pub use token_reader::TokenResponse;

// exposed constant variables
/// Versioned API root.
pub const DEFAULT_BASE_URL: &str = "https://www.instapaper.com/api/1";
/// Represents `x_auth_username`.
pub const X_AUTH_USERNAME_KEY: &str = "x_auth_username";
/// Represents `x_auth_password`.
pub const X_AUTH_PASSWORD_KEY: &str = "x_auth_password";
/// Represents `x_auth_mode`.
pub const X_AUTH_MODE_KEY: &str = "x_auth_mode";
/// The only `x_auth_mode` the API accepts.
pub const X_AUTH_MODE_CLIENT_AUTH: &str = "client_auth";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
