//
//  gerrit-client
//  transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Transport for the Gerrit REST API
//!
//! This module owns the HTTP session: authentication, TLS options, the
//! per-call timeout, bounded retries for connection-level failures, and
//! response decoding. It is the only place in the crate that touches
//! raw HTTP statuses; every exchange comes back as a [`Decoded`] body or
//! a classified [`GerritError`].
//!
//! ## Response decoding
//!
//! Gerrit prefixes JSON responses with the anti-XSSI sentinel `)]}'`
//! followed by a newline, which must be stripped before parsing. The
//! decoder:
//!
//! - strips the sentinel when present and the content type is JSON
//! - returns [`Decoded::Empty`] for empty bodies
//! - returns [`Decoded::Text`] when the content type is not JSON
//! - fails with [`GerritError::Decode`] when a JSON content type carries
//!   a body that does not parse (never silently degraded to text)
//!
//! ## Retries
//!
//! When `max_retries` is configured, connection-level failures (connect
//! errors and timeouts) are retried transparently up to the bound. HTTP
//! error statuses are never retried; they are classified and reported
//! once.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use crate::error::{GerritError, HttpReply};

/// The anti-XSSI sentinel Gerrit prepends to JSON response bodies.
pub const XSSI_PREFIX: &str = ")]}'\n";

/// Configuration for [`Transport::new`].
///
/// Collected once at client construction; every call made through the
/// resulting transport uses the same credentials, TLS settings and
/// timeout.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Basic-auth username, sent on every call when set together with
    /// `password`.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Verify the server's TLS certificate. Defaults to `true`.
    pub ssl_verify: bool,
    /// Optional client certificate, PEM-encoded (certificate + key).
    pub cert_pem: Option<Vec<u8>>,
    /// Connect/read timeout applied to every call.
    pub timeout: Duration,
    /// Bounded retry count for connection-level failures. `None`
    /// disables retries.
    pub max_retries: Option<u32>,
    /// Optional static cookie value sent as a `Cookie` header.
    pub auth_cookie: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            ssl_verify: true,
            cert_pem: None,
            timeout: Duration::from_secs(60),
            max_retries: None,
            auth_cookie: None,
        }
    }
}

/// A decoded response body.
///
/// Most endpoints return JSON; a few (file patches, reflogs rendered as
/// text) return plain text, and mutations frequently return nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A parsed JSON value, sentinel already stripped.
    Json(Value),
    /// A non-JSON body, returned verbatim (trimmed).
    Text(String),
    /// An empty body.
    Empty,
}

impl Decoded {
    /// Extracts the JSON value, failing with [`GerritError::Payload`]
    /// when the endpoint produced something else.
    pub fn into_json(self, url: &str) -> Result<Value, GerritError> {
        match self {
            Decoded::Json(value) => Ok(value),
            _ => Err(GerritError::Payload {
                expected: "json",
                url: url.to_string(),
            }),
        }
    }

    /// Extracts a string payload. Accepts a JSON string (the common
    /// Gerrit shape for scalar endpoints such as `/description`), plain
    /// text, or an empty body (as an empty string).
    pub fn into_string(self, url: &str) -> Result<String, GerritError> {
        match self {
            Decoded::Json(Value::String(text)) => Ok(text),
            Decoded::Text(text) => Ok(text),
            Decoded::Empty => Ok(String::new()),
            Decoded::Json(_) => Err(GerritError::Payload {
                expected: "string",
                url: url.to_string(),
            }),
        }
    }
}

/// Request body shapes the API uses.
///
/// Almost everything is JSON; a handful of endpoints (uploading an SSH
/// public key) take a raw text body with a plain-text content type.
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    /// A JSON body with `Content-Type: application/json`.
    Json(&'a Value),
    /// A raw text body with `Content-Type: text/plain`.
    Text(&'a str),
    /// No body.
    Empty,
}

/// Carries out HTTP requests against the Gerrit server.
///
/// One `Transport` owns one [`reqwest::blocking::Client`], so the
/// underlying connection pool is reused across calls. All calls block
/// the calling thread until the exchange completes or times out.
#[derive(Debug)]
pub struct Transport {
    http: Client,
    username: Option<String>,
    password: Option<String>,
    auth_cookie: Option<String>,
    max_retries: u32,
}

impl Transport {
    /// Builds the HTTP session from the given options.
    pub fn new(options: TransportOptions) -> Result<Self, GerritError> {
        let mut builder = Client::builder()
            .user_agent(concat!("gerrit-client/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(options.timeout)
            .timeout(options.timeout);

        if !options.ssl_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(pem) = &options.cert_pem {
            builder = builder.identity(reqwest::Identity::from_pem(pem)?);
        }

        Ok(Self {
            http: builder.build()?,
            username: options.username,
            password: options.password,
            auth_cookie: options.auth_cookie,
            max_retries: options.max_retries.unwrap_or(0),
        })
    }

    /// GET with optional query pairs.
    pub fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Decoded, GerritError> {
        self.execute(|| self.request(Method::GET, url, Body::Empty).query(query))
    }

    /// POST with the given body.
    pub fn post(&self, url: &str, body: Body<'_>) -> Result<Decoded, GerritError> {
        self.execute(|| self.request(Method::POST, url, body))
    }

    /// PUT with the given body.
    pub fn put(&self, url: &str, body: Body<'_>) -> Result<Decoded, GerritError> {
        self.execute(|| self.request(Method::PUT, url, body))
    }

    /// DELETE, optionally with a JSON body (a few Gerrit endpoints take
    /// deletion options).
    pub fn delete(&self, url: &str, body: Body<'_>) -> Result<Decoded, GerritError> {
        self.execute(|| self.request(Method::DELETE, url, body))
    }

    fn request(&self, method: Method, url: &str, body: Body<'_>) -> RequestBuilder {
        let mut request = self.http.request(method, url);

        request = match body {
            Body::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .json(value),
            Body::Text(text) => request
                .header(CONTENT_TYPE, "text/plain")
                .body(text.to_string()),
            Body::Empty => request,
        };

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password));
        }
        if let Some(cookie) = &self.auth_cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        request
    }

    /// Sends the request, retrying connection-level failures up to the
    /// configured bound, and decodes the response.
    fn execute(&self, make: impl Fn() -> RequestBuilder) -> Result<Decoded, GerritError> {
        let mut attempt = 0u32;
        loop {
            match make().send() {
                Ok(response) => return Self::decode_response(response),
                Err(err) if attempt < self.max_retries && is_connection_failure(&err) => {
                    attempt += 1;
                    warn!(attempt, max = self.max_retries, error = %err, "retrying request after connection failure");
                }
                Err(err) => return Err(GerritError::Network(err)),
            }
        }
    }

    fn decode_response(response: reqwest::blocking::Response) -> Result<Decoded, GerritError> {
        let status = response.status();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response.text()?;

        if !status.is_success() {
            return Err(GerritError::from_http(HttpReply {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                url,
                body: text,
            }));
        }

        decode_body(&content_type, &text, &url)
    }
}

fn is_connection_failure(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Decodes a successful response body: strips the anti-XSSI sentinel
/// and parses JSON when the content type says so.
pub(crate) fn decode_body(
    content_type: &str,
    text: &str,
    url: &str,
) -> Result<Decoded, GerritError> {
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decoded::Empty);
    }
    if media_type != "application/json" {
        return Ok(Decoded::Text(trimmed.to_string()));
    }

    let payload = trimmed.strip_prefix(XSSI_PREFIX).unwrap_or(trimmed);
    serde_json::from_str(payload)
        .map(Decoded::Json)
        .map_err(|source| GerritError::Decode {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    const URL: &str = "https://gerrit.example.com/a/projects/demo/branches/";

    #[test]
    fn test_sentinel_is_stripped_before_parsing() {
        let body = ")]}'\n{\"ref\": \"refs/heads/main\"}";
        let with = decode_body("application/json", body, URL).unwrap();
        let without =
            decode_body("application/json", "{\"ref\": \"refs/heads/main\"}", URL).unwrap();
        assert_eq!(with, without);
        assert_eq!(with, Decoded::Json(json!({"ref": "refs/heads/main"})));
    }

    #[test]
    fn test_empty_body_decodes_to_empty() {
        assert_eq!(decode_body("application/json", "", URL).unwrap(), Decoded::Empty);
        assert_eq!(decode_body("application/json", "  \n", URL).unwrap(), Decoded::Empty);
    }

    #[test]
    fn test_non_json_content_type_returns_text() {
        let decoded = decode_body("text/plain", "base64payload==", URL).unwrap();
        assert_eq!(decoded, Decoded::Text("base64payload==".to_string()));
    }

    #[test]
    fn test_invalid_json_with_json_content_type_is_a_decode_error() {
        let err = decode_body("application/json", ")]}'\n{not json", URL).unwrap_err();
        assert!(matches!(err, GerritError::Decode { .. }));
    }

    #[test]
    fn test_content_type_parameters_are_ignored() {
        let body = ")]}'\n[1, 2, 3]";
        let decoded = decode_body("application/json; charset=utf-8", body, URL).unwrap();
        assert_eq!(decoded, Decoded::Json(json!([1, 2, 3])));
    }

    #[test]
    fn test_connection_failures_are_retried_up_to_the_bound() {
        // A listener that accepts and then stays silent: every attempt
        // connects, times out, and counts one accept.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming() {
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });

        let transport = Transport::new(TransportOptions {
            timeout: Duration::from_millis(200),
            max_retries: Some(2),
            ..TransportOptions::default()
        })
        .unwrap();

        let err = transport
            .get(&format!("http://{addr}/a/config/server/version"), &[])
            .unwrap_err();
        assert!(matches!(err, GerritError::Network(_)));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_http_error_statuses_are_never_retried() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/a/config/server/version")
            .with_status(500)
            .with_body("internal error")
            .expect(1)
            .create();

        let transport = Transport::new(TransportOptions {
            max_retries: Some(3),
            ..TransportOptions::default()
        })
        .unwrap();

        let err = transport
            .get(&format!("{}/a/config/server/version", server.url()), &[])
            .unwrap_err();
        assert!(matches!(err, GerritError::Server(_)));
        mock.assert();
    }

    #[test]
    fn test_into_string_accepts_json_strings_and_text() {
        let url = URL;
        assert_eq!(
            Decoded::Json(json!("stable")).into_string(url).unwrap(),
            "stable"
        );
        assert_eq!(
            Decoded::Text("raw".to_string()).into_string(url).unwrap(),
            "raw"
        );
        assert_eq!(Decoded::Empty.into_string(url).unwrap(), "");
        assert!(matches!(
            Decoded::Json(json!({"a": 1})).into_string(url),
            Err(GerritError::Payload { expected: "string", .. })
        ));
    }
}
