//
//  gerrit-client
//  entity.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Resource Hydration
//!
//! Turns decoded JSON objects into typed handles. Every resource kind
//! declares an explicit allow-list of field names ([`Entity::FIELDS`]);
//! hydration copies only declared fields and drops everything else with
//! a diagnostic. Unknown keys are never stored and are not part of a
//! handle's identity.
//!
//! Context needed to address follow-up calls (owning project, change id,
//! revision id, the root client) is not smuggled through the JSON; the
//! typed handles take it as explicit constructor arguments and borrow
//! the [`GerritClient`](crate::GerritClient), so a handle cannot outlive
//! the client it calls through.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::GerritError;

/// A typed record hydrated from a server JSON object.
///
/// Implementors are plain data structs with optional fields; `FIELDS`
/// is the fixed allow-list of JSON keys the kind accepts.
pub trait Entity: DeserializeOwned {
    /// Resource kind name, used in diagnostics and errors.
    const KIND: &'static str;
    /// The allow-list of JSON keys copied into the record.
    const FIELDS: &'static [&'static str];
}

/// Hydrates one JSON object into a typed record.
///
/// Keys absent from the allow-list are removed before deserialization,
/// each with a `debug!` diagnostic. On well-formed input this is a pure
/// field-copy and cannot fail; a type mismatch between the server and
/// the declared schema surfaces as [`GerritError::Hydrate`].
pub fn hydrate<T: Entity>(mut value: Value) -> Result<T, GerritError> {
    if let Value::Object(ref mut map) = value {
        map.retain(|key, _| {
            let declared = T::FIELDS.contains(&key.as_str());
            if !declared {
                debug!(kind = T::KIND, field = %key, "dropping undeclared field from server response");
            }
            declared
        });
    }
    serde_json::from_value(value).map_err(|source| GerritError::Hydrate {
        kind: T::KIND,
        source,
    })
}

/// Hydrates a JSON array into an ordered sequence of typed records,
/// skipping null and empty entries.
pub fn hydrate_list<T: Entity>(values: Vec<Value>) -> Result<Vec<T>, GerritError> {
    let mut results = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Null => continue,
            Value::Object(ref map) if map.is_empty() => continue,
            value => results.push(hydrate(value)?),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize)]
    struct Sample {
        #[serde(rename = "ref")]
        ref_name: String,
        #[serde(default)]
        revision: Option<String>,
    }

    impl Entity for Sample {
        const KIND: &'static str = "sample";
        const FIELDS: &'static [&'static str] = &["ref", "revision"];
    }

    #[test]
    fn test_hydrate_copies_declared_fields() {
        let sample: Sample = hydrate(json!({
            "ref": "refs/heads/main",
            "revision": "76016386a0d8ecc7b6be212424978bb45959d668",
        }))
        .unwrap();
        assert_eq!(sample.ref_name, "refs/heads/main");
        assert_eq!(
            sample.revision.as_deref(),
            Some("76016386a0d8ecc7b6be212424978bb45959d668")
        );
    }

    #[test]
    fn test_hydrate_drops_undeclared_fields() {
        // An unknown key must not break hydration and must not leak into
        // the record; deny_unknown_fields would reject it, so the drop
        // has to happen before deserialization.
        #[derive(Debug, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Strict {
            #[serde(rename = "ref")]
            #[allow(dead_code)]
            ref_name: String,
        }
        impl Entity for Strict {
            const KIND: &'static str = "strict";
            const FIELDS: &'static [&'static str] = &["ref"];
        }

        let result: Result<Strict, _> = hydrate(json!({
            "ref": "refs/heads/main",
            "web_links": [{"name": "gitweb"}],
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_hydrate_list_preserves_order_and_skips_empty_entries() {
        let samples: Vec<Sample> = hydrate_list(vec![
            json!({"ref": "refs/heads/a"}),
            Value::Null,
            json!({}),
            json!({"ref": "refs/heads/b"}),
        ])
        .unwrap();
        let refs: Vec<&str> = samples.iter().map(|s| s.ref_name.as_str()).collect();
        assert_eq!(refs, ["refs/heads/a", "refs/heads/b"]);
    }
}
