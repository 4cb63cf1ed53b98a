//
//  gerrit-client
//  client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # The Root Gerrit Client
//!
//! [`GerritClient`] is the entry point of the crate. It owns the
//! [`Transport`] (HTTP session, credentials, retry policy) and the base
//! URL, and hands out typed accessors for the server's resource
//! families.
//!
//! Endpoints are always addressed through the authenticated path: the
//! constant `/a` segment is inserted between the base URL and every
//! endpoint, so `/projects/demo` becomes
//! `https://gerrit.example.com/a/projects/demo`.
//!
//! # Example
//!
//! ```rust,no_run
//! use gerrit_client::{GerritClient, RefCollection};
//!
//! let gerrit = GerritClient::builder("https://gerrit.example.com")
//!     .basic_auth("admin", "secret")
//!     .max_retries(2)
//!     .build()?;
//!
//! let project = gerrit.projects().get("demo")?;
//! let mut branches = project.branches();
//! for name in branches.keys()? {
//!     println!("{name}");
//! }
//! # Ok::<(), gerrit_client::GerritError>(())
//! ```

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::accounts::Accounts;
use crate::changes::Changes;
use crate::config::ServerConfig;
use crate::error::GerritError;
use crate::groups::Groups;
use crate::projects::Projects;
use crate::transport::{Body, Decoded, Transport, TransportOptions};
use crate::util::strip_trailing_slash;

/// Path segment for Gerrit's authenticated REST API.
pub const AUTH_SUFFIX: &str = "/a";

/// A connected Gerrit client.
///
/// Cheap accessors ([`projects`](Self::projects),
/// [`changes`](Self::changes), ...) return typed resource modules that
/// borrow this client; handles hydrated from server responses keep the
/// same borrow, so nothing built from a client can outlive it.
#[derive(Debug)]
pub struct GerritClient {
    base_url: String,
    transport: Transport,
}

/// Builder for [`GerritClient`].
///
/// Collects credentials and transport options; nothing touches the
/// network until the first call through the built client.
pub struct GerritClientBuilder {
    base_url: String,
    options: TransportOptions,
}

impl GerritClientBuilder {
    /// HTTP basic-auth credentials, sent on every call.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.options.username = Some(username.into());
        self.options.password = Some(password.into());
        self
    }

    /// Verify the server's TLS certificate (default `true`).
    pub fn ssl_verify(mut self, verify: bool) -> Self {
        self.options.ssl_verify = verify;
        self
    }

    /// PEM-encoded client certificate and key.
    pub fn client_cert_pem(mut self, pem: Vec<u8>) -> Self {
        self.options.cert_pem = Some(pem);
        self
    }

    /// Connect/read timeout applied to every call (default 60 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Retry connection-level failures up to `retries` times. HTTP error
    /// statuses are never retried.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.options.max_retries = Some(retries);
        self
    }

    /// Static cookie value sent as a `Cookie` header on every call.
    pub fn auth_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.options.auth_cookie = Some(cookie.into());
        self
    }

    /// Validates the base URL and builds the HTTP session.
    pub fn build(self) -> Result<GerritClient, GerritError> {
        Url::parse(&self.base_url)?;
        Ok(GerritClient {
            base_url: strip_trailing_slash(&self.base_url).to_string(),
            transport: Transport::new(self.options)?,
        })
    }
}

impl GerritClient {
    /// Starts building a client for the Gerrit server at `base_url`
    /// (scheme and host, e.g. `https://gerrit.example.com`). Trailing
    /// slashes are stripped.
    pub fn builder(base_url: impl Into<String>) -> GerritClientBuilder {
        GerritClientBuilder {
            base_url: base_url.into(),
            options: TransportOptions::default(),
        }
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The complete URL for a service endpoint, including the
    /// authenticated path segment.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, AUTH_SUFFIX, endpoint)
    }

    /// Project resources (`/projects/...`).
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    /// Change resources (`/changes/...`).
    pub fn changes(&self) -> Changes<'_> {
        Changes::new(self)
    }

    /// Account resources (`/accounts/...`).
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    /// Group resources (`/groups/...`).
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    /// Server configuration resources (`/config/server/...`).
    pub fn config(&self) -> ServerConfig<'_> {
        ServerConfig::new(self)
    }

    // Crate-internal verb helpers. Resource modules build endpoint
    // strings and forward here; the transport classifies every outcome.

    pub(crate) fn get(&self, endpoint: &str) -> Result<Decoded, GerritError> {
        self.transport.get(&self.endpoint_url(endpoint), &[])
    }

    pub(crate) fn get_query(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Decoded, GerritError> {
        self.transport.get(&self.endpoint_url(endpoint), query)
    }

    pub(crate) fn get_json(&self, endpoint: &str) -> Result<serde_json::Value, GerritError> {
        self.get(endpoint)?.into_json(endpoint)
    }

    pub(crate) fn get_json_query(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, GerritError> {
        self.get_query(endpoint, query)?.into_json(endpoint)
    }

    pub(crate) fn get_string(&self, endpoint: &str) -> Result<String, GerritError> {
        self.get(endpoint)?.into_string(endpoint)
    }

    pub(crate) fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Decoded, GerritError> {
        let value = serde_json::to_value(body)?;
        self.transport
            .post(&self.endpoint_url(endpoint), Body::Json(&value))
    }

    pub(crate) fn post_text(&self, endpoint: &str, body: &str) -> Result<Decoded, GerritError> {
        self.transport
            .post(&self.endpoint_url(endpoint), Body::Text(body))
    }

    pub(crate) fn post_empty(&self, endpoint: &str) -> Result<Decoded, GerritError> {
        self.transport.post(&self.endpoint_url(endpoint), Body::Empty)
    }

    pub(crate) fn put_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Decoded, GerritError> {
        let value = serde_json::to_value(body)?;
        self.transport
            .put(&self.endpoint_url(endpoint), Body::Json(&value))
    }

    pub(crate) fn put_text(&self, endpoint: &str, body: &str) -> Result<Decoded, GerritError> {
        self.transport
            .put(&self.endpoint_url(endpoint), Body::Text(body))
    }

    pub(crate) fn put_empty(&self, endpoint: &str) -> Result<Decoded, GerritError> {
        self.transport.put(&self.endpoint_url(endpoint), Body::Empty)
    }

    pub(crate) fn delete(&self, endpoint: &str) -> Result<Decoded, GerritError> {
        self.transport
            .delete(&self.endpoint_url(endpoint), Body::Empty)
    }

    pub(crate) fn delete_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Decoded, GerritError> {
        let value = serde_json::to_value(body)?;
        self.transport
            .delete(&self.endpoint_url(endpoint), Body::Json(&value))
    }
}
