//
//  gerrit-client
//  config/caches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The server cache registry. Listed as a JSON object keyed by cache
//! name, so the bulk listing injects each key into its record.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;

/// Declared fields of a cache record. `name` is injected from the
/// listing key.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheInfo {
    /// Cache name; plugin caches carry a `plugin-` prefix.
    pub name: String,
    /// `MEM` or `DISK`.
    #[serde(default, rename = "type")]
    pub cache_type: Option<String>,
    /// Entry counts per storage tier.
    #[serde(default)]
    pub entries: Option<Value>,
    /// Average time spent on a cache miss.
    #[serde(default)]
    pub average_get: Option<String>,
    /// Hit ratios per storage tier.
    #[serde(default)]
    pub hit_ratio: Option<Value>,
}

impl Entity for CacheInfo {
    const KIND: &'static str = "cache";
    const FIELDS: &'static [&'static str] =
        &["name", "type", "entries", "average_get", "hit_ratio"];
}

/// A typed handle for one server cache.
pub struct Cache<'g> {
    /// The hydrated cache record.
    pub info: CacheInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Cache<'g> {
    pub(crate) fn new(info: CacheInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// Flushes the cache.
    pub fn flush(&self) -> Result<(), GerritError> {
        let endpoint = format!("/config/server/caches/{}/flush", self.info.name);
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the `/config/server/caches/` endpoints.
pub struct Caches<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Caches<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Lists the caches of the server, plugin caches included.
    pub fn list(&self) -> Result<Vec<Cache<'g>>, GerritError> {
        let endpoint = "/config/server/caches/";
        let value = self.gerrit.get_json(endpoint)?;
        let map = match value {
            Value::Object(map) => map,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json object",
                    url: endpoint.to_string(),
                })
            }
        };
        let mut caches = Vec::with_capacity(map.len());
        for (name, mut record) in map {
            if let Some(fields) = record.as_object_mut() {
                fields.insert("name".to_string(), Value::String(name));
            }
            caches.push(Cache::new(hydrate(record)?, self.gerrit));
        }
        Ok(caches)
    }

    /// Retrieves information about one cache.
    pub fn get(&self, name: &str) -> Result<Cache<'g>, GerritError> {
        let endpoint = format!("/config/server/caches/{name}");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Cache::new(hydrate(value)?, self.gerrit))
    }

    /// Flushes one cache by name.
    pub fn flush(&self, name: &str) -> Result<(), GerritError> {
        let endpoint = format!("/config/server/caches/{name}/flush");
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }

    /// Flushes all caches at once.
    pub fn flush_all(&self) -> Result<(), GerritError> {
        self.operation(&json!({ "operation": "FLUSH_ALL" }))
    }

    /// Performs a bulk cache operation.
    ///
    /// `input` is the CacheOperationInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-config.html#cache-operation-input>
    pub fn operation(&self, input: &Value) -> Result<(), GerritError> {
        self.gerrit.post_json("/config/server/caches/", input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_list_injects_cache_names() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/config/server/caches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{
                    "accounts": {"type": "MEM", "average_get": "2.8ms"},
                    "diff": {"type": "DISK"}
                }"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let caches = gerrit.config().caches().list().unwrap();
        assert_eq!(caches.len(), 2);
        assert!(caches.iter().any(|c| c.info.name == "accounts"));
    }

    #[test]
    fn test_flush_all_posts_the_operation() {
        let mut server = mockito::Server::new();
        let post = server
            .mock("POST", "/a/config/server/caches/")
            .match_body(mockito::Matcher::Json(json!({ "operation": "FLUSH_ALL" })))
            .with_status(200)
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        gerrit.config().caches().flush_all().unwrap();
        post.assert();
    }
}
