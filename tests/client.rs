//! Client operations against a canned API that records what it was sent.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use instapaper_oauth1::{
    ArgumentError, BookmarkOptions, ClientOptions, Endpoint, Error, HttpResponse, Instapaper,
    RecordKind, Result, Transport, DEFAULT_TIMEOUT,
};
use reqwest::{header::AUTHORIZATION, Request};

const VERIFY_CREDENTIALS: &str = "/api/1/account/verify_credentials";
const ACCESS_TOKEN: &str = "/api/1/oauth/access_token";
const BOOKMARKS_ADD: &str = "/api/1/bookmarks/add";
const BOOKMARKS_LIST: &str = "/api/1/bookmarks/list";

#[derive(Debug, Clone)]
struct Sent {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: String,
    body: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Default)]
struct StubApi {
    responses: HashMap<&'static str, HttpResponse>,
    sent: Mutex<Vec<Sent>>,
}

impl StubApi {
    fn respond(mut self, path: &'static str, status: u16, body: &str) -> Self {
        self.responses.insert(
            path,
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubApi {
    async fn send(&self, request: Request) -> Result<HttpResponse> {
        let sent = Sent {
            method: request.method().clone(),
            path: request.url().path().to_string(),
            query: request.url().query().map(str::to_string),
            authorization: request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default(),
            timeout: request.timeout().copied(),
        };
        let response = self
            .responses
            .get(sent.path.as_str())
            .cloned()
            .unwrap_or(HttpResponse {
                status: 404,
                body: String::new(),
            });
        self.sent.lock().unwrap().push(sent);
        Ok(response)
    }
}

fn client(api: StubApi, options: ClientOptions) -> Instapaper<StubApi> {
    Instapaper::with_transport(api, "testConsumerKey", "testConsumerSecret", options).unwrap()
}

fn authorized() -> ClientOptions {
    ClientOptions::new()
        .access_token("AA")
        .access_token_secret("BB")
}

#[tokio::test]
async fn authenticate_stores_token_pair() {
    let api = StubApi::default().respond(
        ACCESS_TOKEN,
        200,
        "oauth_token=AA&oauth_token_secret=BB",
    );
    let client = client(api, ClientOptions::new());
    assert!(!client.is_authenticated());

    let token = client.authenticate("user", "pass").await.unwrap();
    assert_eq!(token.oauth_token, "AA");
    assert_eq!(token.oauth_token_secret, "BB");
    assert_eq!(
        client.access_token_pair(),
        Some(("AA".to_string(), "BB".to_string()))
    );

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(
        sent[0].body,
        "x_auth_username=user&x_auth_password=pass&x_auth_mode=client_auth"
    );
    assert!(sent[0].authorization.starts_with("OAuth "));
    assert!(sent[0]
        .authorization
        .contains("oauth_consumer_key=\"testConsumerKey\""));
    assert!(!sent[0].authorization.contains("oauth_token="));
}

#[tokio::test]
async fn authenticate_checks_login_before_sending() {
    let client = client(StubApi::default(), ClientOptions::new());

    let err = client.authenticate("", "pass").await.unwrap_err();
    assert_eq!(err.argument(), Some(&ArgumentError::MissingUsername));
    let err = client.authenticate("user", "").await.unwrap_err();
    assert_eq!(err.argument(), Some(&ArgumentError::MissingPassword));
    let err = client.authenticate_with_login().await.unwrap_err();
    assert_eq!(err.argument(), Some(&ArgumentError::MissingUsername));

    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn authenticate_with_preset_login() {
    let api = StubApi::default().respond(
        ACCESS_TOKEN,
        200,
        "oauth_token=aabbccdd&oauth_token_secret=efgh1234",
    );
    let client = client(api, ClientOptions::new().login("preset", "secret"));

    client.authenticate_with_login().await.unwrap();
    assert_eq!(
        client.access_token_pair(),
        Some(("aabbccdd".to_string(), "efgh1234".to_string()))
    );
    assert!(client.transport().sent()[0]
        .body
        .starts_with("x_auth_username=preset&x_auth_password=secret"));
}

#[tokio::test]
async fn authenticate_forwards_failure() {
    let message = "oauth_timestamp is too far away; we believe it is now 1341088595, you sent 0";
    let api = StubApi::default().respond(ACCESS_TOKEN, 401, message);
    let client = client(api, ClientOptions::new());

    match client.authenticate("user", "pass").await.unwrap_err() {
        Error::Http { status, data } => {
            assert_eq!(status, 401);
            assert_eq!(data, message);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn authenticate_rejects_body_without_token() {
    let api = StubApi::default().respond(ACCESS_TOKEN, 200, "oauth_token_secret=BB");
    let client = client(api, ClientOptions::new());

    let err = client.authenticate("user", "pass").await.unwrap_err();
    assert!(matches!(err, Error::TokenReader(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn get_user_returns_user_without_type() {
    let api = StubApi::default()
        .respond(ACCESS_TOKEN, 200, "oauth_token=AA&oauth_token_secret=BB")
        .respond(
            VERIFY_CREDENTIALS,
            200,
            r#"[{"type":"user","user_id":"12345678","username":"x"}]"#,
        );
    let client = client(api, ClientOptions::new());
    client.authenticate("user", "pass").await.unwrap();

    let user = client.get_user().await.unwrap();
    assert_eq!(user.user_id, "12345678");
    assert_eq!(user.username, "x");
    assert!(!user.extra.contains_key("type"));

    let sent = client.transport().sent();
    assert_eq!(sent[1].method, Method::POST);
    assert_eq!(sent[1].path, VERIFY_CREDENTIALS);
    assert!(sent[1].authorization.contains("oauth_token=\"AA\""));
}

#[tokio::test]
async fn get_user_surfaces_api_error() {
    let api = StubApi::default().respond(
        VERIFY_CREDENTIALS,
        403,
        r#"[{"type":"error","error_code":403,"message":"Not logged in"}]"#,
    );
    let client = client(api, authorized());

    let err = client.get_user().await.unwrap_err();
    assert!(err.is_api_error());
    assert_eq!(err.to_string(), "Not logged in");
}

#[tokio::test]
async fn add_bookmark_requires_token_before_sending() {
    let client = client(StubApi::default(), ClientOptions::new());

    let err = client.add_bookmark("http://x").await.unwrap_err();
    assert_eq!(err.argument(), Some(&ArgumentError::MissingAccessToken));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn add_bookmark_requires_url() {
    let client = client(StubApi::default(), authorized());

    let err = client.add_bookmark("").await.unwrap_err();
    assert_eq!(err.argument(), Some(&ArgumentError::MissingUrl));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn add_bookmark_posts_options() {
    let api = StubApi::default().respond(
        BOOKMARKS_ADD,
        200,
        r#"[{"type":"meta"},{"type":"bookmark","bookmark_id":4242,"url":"http://x","title":"X"}]"#,
    );
    let client = client(api, authorized());

    let options = BookmarkOptions::new()
        .title("X")
        .folder_id(7)
        .resolve_final_url(true);
    let bookmark = client.add_bookmark_with("http://x", &options).await.unwrap();
    assert_eq!(bookmark.bookmark_id, "4242");
    assert_eq!(bookmark.title.as_deref(), Some("X"));

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, BOOKMARKS_ADD);
    assert_eq!(
        sent[0].body,
        "url=http%3A%2F%2Fx&title=X&folder_id=7&resolve_final_url=1"
    );
    assert!(sent[0].authorization.contains("oauth_token=\"AA\""));
}

#[tokio::test]
async fn add_bookmark_error_record_in_success_body() {
    let api = StubApi::default().respond(
        BOOKMARKS_ADD,
        200,
        r#"[{"type":"error","error_code":1240,"message":"Invalid URL specified"}]"#,
    );
    let client = client(api, authorized());

    match client.add_bookmark("nope").await.unwrap_err() {
        Error::Api { code, message } => {
            assert_eq!(code, Some(1240));
            assert_eq!(message, "Invalid URL specified");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn generic_get_call_uses_query() {
    let api = StubApi::default().respond(
        BOOKMARKS_LIST,
        200,
        r#"[{"type":"meta"},{"type":"user","user_id":1,"username":"x"},
            {"type":"bookmark","bookmark_id":1,"url":"http://a"},
            {"type":"bookmark","bookmark_id":2,"url":"http://b"}]"#,
    );
    let client = client(api, authorized());

    let normalized = client
        .call(Method::GET, Endpoint::BookmarksList, &[("limit", "2")])
        .await
        .unwrap();
    assert_eq!(normalized.bookmarks().len(), 2);
    assert!(normalized.get(&RecordKind::Meta).is_some());
    assert!(normalized.get(&RecordKind::Folder).is_none());

    let sent = client.transport().sent();
    assert_eq!(sent[0].method, Method::GET);
    assert_eq!(sent[0].query.as_deref(), Some("limit=2"));
    assert!(sent[0].body.is_empty());
}

#[tokio::test]
async fn unknown_path_surfaces_http_error() {
    let client = client(StubApi::default(), authorized());

    let err = client
        .call(Method::POST, Endpoint::BookmarksDelete, &[("bookmark_id", "1")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http { status: 404, .. }));
}

#[tokio::test]
async fn call_with_unencodable_params_sends_nothing() {
    let client = client(StubApi::default(), authorized());

    let err = client
        .call(Method::POST, Endpoint::BookmarksAdd, &[("tags", vec![1, 2])])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Reqwest(_)));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn timeout_reaches_each_request() {
    let user = r#"[{"type":"user","user_id":1,"username":"x"}]"#;

    let default = client(
        StubApi::default().respond(VERIFY_CREDENTIALS, 200, user),
        authorized(),
    );
    default.get_user().await.unwrap();
    assert_eq!(default.transport().sent()[0].timeout, Some(DEFAULT_TIMEOUT));
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));

    let custom = client(
        StubApi::default().respond(VERIFY_CREDENTIALS, 200, user),
        authorized().timeout(Some(Duration::from_secs(5))),
    );
    custom.get_user().await.unwrap();
    assert_eq!(
        custom.transport().sent()[0].timeout,
        Some(Duration::from_secs(5))
    );

    let unbounded = client(
        StubApi::default().respond(ACCESS_TOKEN, 200, "oauth_token=AA&oauth_token_secret=BB"),
        ClientOptions::new().timeout(None),
    );
    unbounded.authenticate("user", "pass").await.unwrap();
    assert_eq!(unbounded.transport().sent()[0].timeout, None);
}
