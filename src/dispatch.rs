use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::{Client as ReqwestClient, Request, Url};

use crate::{AuthMode, Error, OAuthParameters, RequestBuilder, Result, SecretsProvider, Signer};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends signed requests over the wire.
///
/// Implemented for `reqwest::Client`; tests plug in a stub.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<HttpResponse>;
}

#[async_trait]
impl Transport for ReqwestClient {
    async fn send(&self, request: Request) -> Result<HttpResponse> {
        let response = ReqwestClient::execute(self, request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Builds signed requests and hands them to a [`Transport`].
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    builder: ReqwestClient,
    transport: T,
    timeout: Option<Duration>,
}

impl<T> Dispatcher<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Dispatcher {
            builder: ReqwestClient::new(),
            transport,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Overrides the per-request timeout. `None` disables it.
    pub fn timeout(self, timeout: Option<Duration>) -> Self {
        Dispatcher { timeout, ..self }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a signed request.
    ///
    /// # Errors
    ///
    /// In `AuthMode::Token`, fails before anything is sent when the token or
    /// its secret is missing.
    pub fn request<'a, S>(
        &self,
        method: Method,
        url: Url,
        secrets: &'a S,
        mode: AuthMode,
        parameters: OAuthParameters<'a>,
    ) -> Result<RequestBuilder<'a, S>>
    where
        S: SecretsProvider,
    {
        let signer = Signer::new(secrets, mode, parameters)?;
        let inner = self.builder.request(method.clone(), url.clone());
        let builder = RequestBuilder::new(inner, method, url, signer);
        Ok(match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }

    /// Sign and send the request, returning the raw body of a 2xx response.
    ///
    /// Any other status becomes `Error::Http` carrying the body as `data`.
    /// Transport failures are returned unchanged.
    pub async fn dispatch<S>(&self, request: RequestBuilder<'_, S>) -> Result<String>
    where
        S: SecretsProvider,
    {
        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching signed request");
        let request = request.build()?;
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "response received");

        if (200..300).contains(&response.status) {
            Ok(response.body)
        } else {
            Err(Error::Http {
                status: response.status,
                data: response.body,
            })
        }
    }
}
