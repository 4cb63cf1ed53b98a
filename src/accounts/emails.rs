//
//  gerrit-client
//  accounts/emails.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Email addresses of an account.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;

/// Declared fields of an email record.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailInfo {
    /// The email address.
    pub email: String,
    /// Whether this is the preferred address of the account.
    #[serde(default)]
    pub preferred: Option<bool>,
    /// Whether a confirmation is still pending.
    #[serde(default)]
    pub pending_confirmation: Option<bool>,
}

impl Entity for EmailInfo {
    const KIND: &'static str = "email";
    const FIELDS: &'static [&'static str] = &["email", "preferred", "pending_confirmation"];
}

/// A typed handle for one email address, contextualized with its
/// account.
pub struct Email<'g> {
    /// The hydrated email record.
    pub info: EmailInfo,
    username: String,
    gerrit: &'g GerritClient,
}

impl<'g> Email<'g> {
    pub(crate) fn new(info: EmailInfo, username: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            username,
            gerrit,
        }
    }

    /// Makes this the preferred address of the account.
    pub fn set_preferred(&self) -> Result<(), GerritError> {
        let endpoint = format!(
            "/accounts/{}/emails/{}/preferred",
            self.username, self.info.email
        );
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Deletes the address from the account.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/emails/{}", self.username, self.info.email);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the email addresses of one account.
pub struct Emails<'g> {
    username: String,
    gerrit: &'g GerritClient,
}

impl<'g> Emails<'g> {
    pub(crate) fn new(username: String, gerrit: &'g GerritClient) -> Self {
        Self { username, gerrit }
    }

    /// Lists the addresses configured for the account.
    pub fn list(&self) -> Result<Vec<Email<'g>>, GerritError> {
        let endpoint = format!("/accounts/{}/emails", self.username);
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
        rows.into_iter()
            .map(|record| {
                Ok(Email::new(
                    hydrate(record)?,
                    self.username.clone(),
                    self.gerrit,
                ))
            })
            .collect()
    }

    /// Retrieves one address of the account.
    pub fn get(&self, email: &str) -> Result<Email<'g>, GerritError> {
        let endpoint = format!("/accounts/{}/emails/{}", self.username, email);
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Email::new(
            hydrate(value)?,
            self.username.clone(),
            self.gerrit,
        ))
    }

    /// Makes the given address the preferred one.
    pub fn set_preferred(&self, email: &str) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/emails/{}/preferred", self.username, email);
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Deletes the given address from the account.
    pub fn delete(&self, email: &str) -> Result<(), GerritError> {
        let endpoint = format!("/accounts/{}/emails/{}", self.username, email);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_list_hydrates_email_records() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/accounts/jane/emails")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"[{"email": "jane@example.com", "preferred": true},
                    {"email": "jane@corp.example.com", "pending_confirmation": true}]"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let emails = Emails::new("jane".to_string(), &gerrit).list().unwrap();
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].info.preferred, Some(true));
        assert_eq!(emails[1].info.email, "jane@corp.example.com");
    }

    #[test]
    fn test_set_preferred_puts_to_the_preferred_endpoint() {
        let mut server = mockito::Server::new();
        let put = server
            .mock("PUT", "/a/accounts/jane/emails/jane@example.com/preferred")
            .with_status(201)
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        Emails::new("jane".to_string(), &gerrit)
            .set_preferred("jane@example.com")
            .unwrap();
        put.assert();
    }
}
