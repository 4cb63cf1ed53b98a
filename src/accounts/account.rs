//
//  gerrit-client
//  accounts/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-account handle.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::accounts::{AccountInfo, Emails, GpgKeys};
use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// Declared fields of an SSH key record.
#[derive(Debug, Clone, Deserialize)]
pub struct SshKeyInfo {
    /// Sequence number of the key within the account.
    pub seq: i64,
    /// The complete public key line.
    #[serde(default)]
    pub ssh_public_key: Option<String>,
    /// Base64-encoded key material.
    #[serde(default)]
    pub encoded_key: Option<String>,
    /// Key algorithm, e.g. `ssh-ed25519`.
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Key comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Whether the server considers the key valid.
    #[serde(default)]
    pub valid: Option<bool>,
}

impl Entity for SshKeyInfo {
    const KIND: &'static str = "ssh key";
    const FIELDS: &'static [&'static str] = &[
        "seq",
        "ssh_public_key",
        "encoded_key",
        "algorithm",
        "comment",
        "valid",
    ];
}

/// A typed handle for one account.
///
/// Setters keep the handle's record in sync: where the server answers
/// with a canonical value (name, username) that value wins; elsewhere
/// the requested value is stored.
pub struct Account<'g> {
    /// The hydrated account record.
    pub info: AccountInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Account<'g> {
    pub(crate) fn new(info: AccountInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// The username this handle addresses.
    pub fn username(&self) -> &str {
        &self.info.username
    }

    /// Sets the full name of the account. Realms that do not allow
    /// name changes reject the call with [`GerritError::NotAllowed`].
    pub fn set_name(&mut self, name: &str) -> Result<String, GerritError> {
        let endpoint = format!("/accounts/{}/name", self.username());
        let canonical = self
            .gerrit
            .put_json(&endpoint, &json!({ "name": name }))?
            .into_string(&endpoint)?;
        self.info.name = Some(canonical.clone());
        Ok(canonical)
    }

    /// Deletes the full name of the account.
    pub fn delete_name(&mut self) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/name", self.username());
        self.gerrit.delete(&endpoint)?;
        self.info.name = None;
        Ok(())
    }

    /// Sets the username. Realms that do not allow username changes
    /// reject the call with [`GerritError::NotAllowed`]. The handle
    /// addresses the canonical new username afterwards.
    pub fn set_username(&mut self, username: &str) -> Result<String, GerritError> {
        let endpoint = format!("/accounts/{}/username", self.username());
        let canonical = self
            .gerrit
            .put_json(&endpoint, &json!({ "username": username }))?
            .into_string(&endpoint)?;
        self.info.username = canonical.clone();
        Ok(canonical)
    }

    /// Retrieves the status line of the account; empty when unset.
    pub fn status(&self) -> Result<String, GerritError> {
        let endpoint = format!("/accounts/{}/status", self.username());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the status line of the account and stores it on the handle.
    pub fn set_status(&mut self, status: &str) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/status", self.username());
        self.gerrit
            .put_json(&endpoint, &json!({ "status": status }))?;
        self.info.status = Some(status.to_string());
        Ok(())
    }

    /// Checks whether the account is active; the server answers `"ok"`
    /// for active accounts and an empty body otherwise.
    pub fn get_active(&self) -> Result<String, GerritError> {
        let endpoint = format!("/accounts/{}/active", self.username());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the account state to active.
    pub fn set_active(&self) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/active", self.username());
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Sets the account state to inactive. An already inactive account
    /// surfaces as [`GerritError::Conflict`].
    pub fn delete_active(&self) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/active", self.username());
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }

    /// Returns the SSH keys of the account.
    pub fn list_ssh_keys(&self) -> Result<Vec<SshKeyInfo>, GerritError> {
        let endpoint = format!("/accounts/{}/sshkeys", self.username());
        let value = self.gerrit.get_json(&endpoint)?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint,
                })
            }
        };
        hydrate_list::<SshKeyInfo>(rows)
    }

    /// Retrieves one SSH key by sequence number.
    pub fn get_ssh_key(&self, seq: i64) -> Result<SshKeyInfo, GerritError> {
        let endpoint = format!("/accounts/{}/sshkeys/{}", self.username(), seq);
        let value = self.gerrit.get_json(&endpoint)?;
        hydrate(value)
    }

    /// Adds an SSH key. The public key goes over the wire as the raw
    /// plain-text request body, not JSON.
    pub fn add_ssh_key(&self, ssh_key: &str) -> Result<SshKeyInfo, GerritError> {
        let endpoint = format!("/accounts/{}/sshkeys", self.username());
        let value = self.gerrit.post_text(&endpoint, ssh_key)?.into_json(&endpoint)?;
        hydrate(value)
    }

    /// Deletes one SSH key by sequence number.
    pub fn delete_ssh_key(&self, seq: i64) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/sshkeys/{}", self.username(), seq);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }

    /// The email addresses of the account.
    pub fn emails(&self) -> Emails<'g> {
        Emails::new(self.username().to_string(), self.gerrit)
    }

    /// The GPG keys of the account.
    pub fn gpg_keys(&self) -> GpgKeys<'g> {
        GpgKeys::new(self.username().to_string(), self.gerrit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    fn account(gerrit: &GerritClient) -> Account<'_> {
        let info: AccountInfo =
            serde_json::from_value(json!({ "username": "john.doe", "name": "John" })).unwrap();
        Account::new(info, gerrit)
    }

    #[test]
    fn test_set_name_stores_the_canonical_value() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/accounts/john.doe/name")
            .match_body(mockito::Matcher::Json(json!({ "name": "john doe" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n\"John Doe\"")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut account = account(&gerrit);
        assert_eq!(account.set_name("john doe").unwrap(), "John Doe");
        assert_eq!(account.info.name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_set_name_rejected_by_the_realm() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/accounts/john.doe/name")
            .with_status(405)
            .with_header("content-type", "text/plain")
            .with_body("realm does not allow editing names")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut account = account(&gerrit);
        match account.set_name("other").unwrap_err() {
            GerritError::NotAllowed(reply) => assert_eq!(reply.status, 405),
            other => panic!("expected NotAllowed, got {other:?}"),
        }
        assert_eq!(account.info.name.as_deref(), Some("John"));
    }

    #[test]
    fn test_set_status_stores_the_requested_value() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/accounts/john.doe/status")
            .with_status(204)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut account = account(&gerrit);
        account.set_status("out of office").unwrap();
        assert_eq!(account.info.status.as_deref(), Some("out of office"));
    }

    #[test]
    fn test_add_ssh_key_sends_the_raw_body() {
        let mut server = mockito::Server::new();
        let post = server
            .mock("POST", "/a/accounts/john.doe/sshkeys")
            .match_header("content-type", "text/plain")
            .match_body("ssh-ed25519 AAAAC3Nza john@host")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"seq": 2, "algorithm": "ssh-ed25519", "comment": "john@host",
                    "valid": true}"#
            ))
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let key = account(&gerrit)
            .add_ssh_key("ssh-ed25519 AAAAC3Nza john@host")
            .unwrap();
        assert_eq!(key.seq, 2);
        assert_eq!(key.valid, Some(true));
        post.assert();
    }
}
