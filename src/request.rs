// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::time::Duration;

use http::{header::AUTHORIZATION, Method};
use reqwest::{Request, RequestBuilder as ReqwestRequestBuilder, Url};
use serde::Serialize;

use crate::{Result, SecretsProvider, Signer};

/// A `reqwest` request builder that tracks what the OAuth signature has to
/// cover: method, URL with its query, and the urlencoded form body.
pub struct RequestBuilder<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    method: Method,
    inner: ReqwestRequestBuilder,
    signer: Signer<'a, TSecretsProvider>,
    url: Url,
    body: String,
}

impl<'a, TSecretsProvider> RequestBuilder<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub(crate) fn new(
        builder: ReqwestRequestBuilder,
        method: Method,
        url: Url,
        signer: Signer<'a, TSecretsProvider>,
    ) -> Self {
        RequestBuilder {
            inner: builder,
            method,
            url,
            body: String::new(),
            signer,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The urlencoded form body captured so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append query parameters. Values that do not serialize into key/value
    /// pairs are ignored.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        {
            let mut pairs = self.url.query_pairs_mut();
            let serializer = serde_urlencoded::Serializer::new(&mut pairs);
            let _ = query.serialize(serializer);
        }
        if let Some("") = self.url.query() {
            self.url.set_query(None);
        }
        self.inner = self.inner.query(query);
        self
    }

    /// Send a urlencoded form body.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(body) => {
                self.inner = self.inner.form(form);
                self.body = body;
                self
            }
            Err(err) => {
                // reqwest keeps the error and reports it from `build()`
                tracing::debug!(error = %err, "form body could not be encoded");
                self.inner = self.inner.form(form);
                self
            }
        }
    }

    /// Applies a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Sign the request and return the inner `reqwest` builder with its
    /// `Authorization` header set.
    pub fn generate_signature(self) -> ReqwestRequestBuilder {
        let (is_query, url, payload) = match self.url.query() {
            None | Some("") => (false, self.url.clone(), self.body.as_str()),
            Some(q) => {
                let mut pure_url = self.url.clone();
                pure_url.set_query(None);
                (true, pure_url, q)
            }
        };
        let signature = self
            .signer
            .generate_signature(self.method, url, payload, is_query);
        self.inner.header(AUTHORIZATION, signature)
    }

    /// Sign and build the request.
    pub fn build(self) -> Result<Request> {
        Ok(self.generate_signature().build()?)
    }
}
