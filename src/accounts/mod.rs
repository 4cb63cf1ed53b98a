//
//  gerrit-client
//  accounts/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Account Resources
//!
//! Account lookup and the per-account handle, including SSH key,
//! email and GPG key management.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

mod account;
mod emails;
mod gpg_keys;

pub use account::{Account, SshKeyInfo};
pub use emails::{Email, EmailInfo, Emails};
pub use gpg_keys::{GpgKey, GpgKeyInfo, GpgKeys};

/// Declared fields of an account record.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Username, used to address the account in endpoints.
    pub username: String,
    /// Numeric account id.
    #[serde(default, rename = "_account_id")]
    pub account_id: Option<i64>,
    /// Full display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Preferred email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Registration timestamp.
    #[serde(default)]
    pub registered_on: Option<String>,
    /// Free-form status line ("out of office" etc.).
    #[serde(default)]
    pub status: Option<String>,
}

impl Entity for AccountInfo {
    const KIND: &'static str = "account";
    const FIELDS: &'static [&'static str] = &[
        "username",
        "_account_id",
        "name",
        "email",
        "registered_on",
        "status",
    ];
}

/// The AccountInput entity for [`Accounts::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-accounts.html#account-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

/// Entry point for `/accounts/` endpoints.
pub struct Accounts<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Accounts<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Queries accounts visible to the caller, in suggest mode.
    pub fn search(&self, query: &str) -> Result<Vec<Account<'g>>, GerritError> {
        let endpoint = "/accounts/";
        let value = self
            .gerrit
            .get_json_query(endpoint, &[("suggest", ""), ("q", query)])?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<AccountInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Account::new(info, self.gerrit))
            .collect())
    }

    /// Resolves the calling account and returns its detail record.
    pub fn whoami(&self) -> Result<Account<'g>, GerritError> {
        let endpoint = "/accounts/self";
        let value = self.gerrit.get_json(endpoint)?;
        let me: AccountInfo = hydrate(value)?;
        self.get(&me.username)
    }

    /// Retrieves the detail record of an account.
    pub fn get(&self, username: &str) -> Result<Account<'g>, GerritError> {
        let endpoint = format!("/accounts/{username}/detail");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Account::new(hydrate(value)?, self.gerrit))
    }

    /// Creates a new account.
    pub fn create(&self, username: &str, input: &AccountInput) -> Result<Account<'g>, GerritError> {
        let endpoint = format!("/accounts/{username}");
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Account::new(hydrate(value)?, self.gerrit))
    }
}
