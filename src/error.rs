//
//  gerrit-client
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Error Taxonomy for Gerrit API Operations
//!
//! Every failure in this crate is classified exactly once into a
//! [`GerritError`] variant. HTTP statuses are mapped at the transport
//! boundary ([`GerritError::from_http`]); nothing above the transport
//! re-inspects raw status codes.
//!
//! # Classification
//!
//! | Status | Variant |
//! |--------|---------|
//! | 400 | [`GerritError::Validation`] |
//! | 403 | [`GerritError::Auth`] |
//! | 404 | [`GerritError::NotFound`] |
//! | 405 | [`GerritError::NotAllowed`] |
//! | 409 | [`GerritError::Conflict`] |
//! | other 4xx | [`GerritError::Client`] |
//! | 5xx | [`GerritError::Server`] |
//!
//! Connection and decoding failures are distinct from any HTTP status
//! ([`GerritError::Network`], [`GerritError::Decode`]), and caller
//! contract violations that never reach the network get their own
//! variants ([`GerritError::InvalidRef`], [`GerritError::InvalidBaseUrl`]).

use std::fmt;

use thiserror::Error;

/// The server side of a failed HTTP exchange.
///
/// Carries the status code, the canonical reason phrase, the request URL
/// and the raw response body, so callers can report exactly what the
/// server said without re-issuing the call.
#[derive(Debug, Clone)]
pub struct HttpReply {
    /// HTTP status code of the response.
    pub status: u16,
    /// Canonical reason phrase (e.g. "Not Found").
    pub reason: String,
    /// The URL the request was sent to.
    pub url: String,
    /// Raw response body, unparsed. Gerrit returns plain-text error
    /// messages, so this is usually human-readable.
    pub body: String,
}

impl fmt::Display for HttpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} for url: {}", self.status, self.reason, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body.trim())?;
        }
        Ok(())
    }
}

/// Unified error type for all Gerrit API operations.
#[derive(Error, Debug)]
pub enum GerritError {
    /// 400 Bad Request: the request is not understood by the server due
    /// to malformed syntax, missing required input fields, or options
    /// that cannot be used together.
    #[error("validation error: {0}")]
    Validation(HttpReply),

    /// 403 Forbidden: the operation is not allowed because the calling
    /// user does not have sufficient permissions.
    #[error("permission denied: {0}")]
    Auth(HttpReply),

    /// 404 Not Found: the resource does not exist.
    #[error("not found: {0}")]
    NotFound(HttpReply),

    /// 405 Method Not Allowed: the resource exists but does not support
    /// the operation.
    #[error("method not allowed: {0}")]
    NotAllowed(HttpReply),

    /// 409 Conflict: the current state of the resource does not allow
    /// the operation (duplicate, already submitted, ...).
    #[error("conflict: {0}")]
    Conflict(HttpReply),

    /// Any other 4xx response.
    #[error("client error: {0}")]
    Client(HttpReply),

    /// Any 5xx response.
    #[error("server error: {0}")]
    Server(HttpReply),

    /// A connection-level failure (connect, timeout, TLS) distinct from
    /// any HTTP status.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server declared a JSON content type but the body failed to
    /// parse. Never silently degraded to text.
    #[error("invalid json from {url}: {source}")]
    Decode {
        /// The endpoint the malformed payload came from.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A request body failed to serialize to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A well-formed response could not be copied into a typed handle.
    #[error("failed to hydrate {kind}: {source}")]
    Hydrate {
        /// The resource kind being hydrated.
        kind: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The response payload had the wrong shape for the endpoint (e.g.
    /// plain text where a JSON object was required).
    #[error("unexpected {expected} payload from {url}")]
    Payload {
        /// What the caller expected ("json object", "string", ...).
        expected: &'static str,
        /// The endpoint that produced the payload.
        url: String,
    },

    /// A ref was looked up in a collection snapshot and is absent.
    /// This is the collection-level translation of "not found": it names
    /// the missing ref instead of an HTTP exchange.
    #[error("{kind} {name} not found")]
    UnknownRef {
        /// Resource kind ("branch", "tag", "file").
        kind: &'static str,
        /// The ref or path that was requested.
        name: String,
    },

    /// A caller supplied a ref without the collection's required prefix.
    /// This is a contract violation, not a server response, and never
    /// reaches the network.
    #[error("{kind} ref must start with {prefix}: {name}")]
    InvalidRef {
        /// Resource kind ("branch", "tag").
        kind: &'static str,
        /// The required prefix (e.g. `refs/heads/`).
        prefix: &'static str,
        /// The offending ref.
        name: String,
    },

    /// The base URL handed to the client builder does not parse.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl GerritError {
    /// Classifies a non-2xx HTTP reply into the error taxonomy.
    ///
    /// This is the single place status codes are interpreted; see the
    /// module docs for the mapping table.
    pub fn from_http(reply: HttpReply) -> Self {
        match reply.status {
            400 => Self::Validation(reply),
            403 => Self::Auth(reply),
            404 => Self::NotFound(reply),
            405 => Self::NotAllowed(reply),
            409 => Self::Conflict(reply),
            status if status >= 500 => Self::Server(reply),
            _ => Self::Client(reply),
        }
    }

    /// Returns the HTTP reply for server-classified errors, `None` for
    /// transport-level and contract failures.
    pub fn http_reply(&self) -> Option<&HttpReply> {
        match self {
            Self::Validation(reply)
            | Self::Auth(reply)
            | Self::NotFound(reply)
            | Self::NotAllowed(reply)
            | Self::Conflict(reply)
            | Self::Client(reply)
            | Self::Server(reply) => Some(reply),
            _ => None,
        }
    }
}
