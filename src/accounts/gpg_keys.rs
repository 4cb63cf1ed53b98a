//
//  gerrit-client
//  accounts/gpg_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! GPG keys of an account. Listed as a JSON object keyed by key id, so
//! the bulk listing injects each key into its record.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;

/// Declared fields of a GPG key record. `id` is injected from the
/// listing key.
#[derive(Debug, Clone, Deserialize)]
pub struct GpgKeyInfo {
    /// 8-character hex key id.
    pub id: String,
    /// 40-character hex fingerprint.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// OpenPGP user ids associated with the key.
    #[serde(default)]
    pub user_ids: Option<Value>,
    /// ASCII-armored public key.
    #[serde(default)]
    pub key: Option<String>,
    /// Server-side trust status of the key.
    #[serde(default)]
    pub status: Option<String>,
    /// Problems found when checking the key.
    #[serde(default)]
    pub problems: Option<Value>,
}

impl Entity for GpgKeyInfo {
    const KIND: &'static str = "gpg key";
    const FIELDS: &'static [&'static str] =
        &["id", "fingerprint", "user_ids", "key", "status", "problems"];
}

/// A typed handle for one GPG key, contextualized with its account.
pub struct GpgKey<'g> {
    /// The hydrated key record.
    pub info: GpgKeyInfo,
    username: String,
    gerrit: &'g GerritClient,
}

impl<'g> GpgKey<'g> {
    pub(crate) fn new(info: GpgKeyInfo, username: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            username,
            gerrit,
        }
    }

    /// Deletes the key from the account.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/gpgkeys/{}", self.username, self.info.id);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the GPG keys of one account.
pub struct GpgKeys<'g> {
    username: String,
    gerrit: &'g GerritClient,
}

impl<'g> GpgKeys<'g> {
    pub(crate) fn new(username: String, gerrit: &'g GerritClient) -> Self {
        Self { username, gerrit }
    }

    /// Lists the GPG keys of the account.
    pub fn list(&self) -> Result<Vec<GpgKey<'g>>, GerritError> {
        let endpoint = format!("/accounts/{}/gpgkeys", self.username);
        let value = self.gerrit.get_json(&endpoint)?;
        let map = match value {
            Value::Object(map) => map,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json object",
                    url: endpoint,
                })
            }
        };
        let mut keys = Vec::with_capacity(map.len());
        for (id, mut record) in map {
            if let Some(fields) = record.as_object_mut() {
                fields.insert("id".to_string(), Value::String(id));
            }
            keys.push(GpgKey::new(
                hydrate(record)?,
                self.username.clone(),
                self.gerrit,
            ));
        }
        Ok(keys)
    }

    /// Retrieves one GPG key by id.
    pub fn get(&self, id: &str) -> Result<GpgKey<'g>, GerritError> {
        let endpoint = format!("/accounts/{}/gpgkeys/{}", self.username, id);
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(GpgKey::new(
            hydrate(value)?,
            self.username.clone(),
            self.gerrit,
        ))
    }

    /// Adds and/or deletes GPG keys in one call. The response maps each
    /// added key id to its record.
    ///
    /// `input` is the GpgKeysInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-accounts.html#gpg-keys-input>
    pub fn modify(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/accounts/{}/gpgkeys", self.username);
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }
}
