//
//  gerrit-client
//  groups/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-group handle.
//!
//! Most endpoints here only exist for Gerrit internal groups; called on
//! an external group the server rejects them with 405, which surfaces
//! as [`GerritError::NotAllowed`].

use serde_json::{json, Value};

use crate::accounts::AccountInfo;
use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list};
use crate::error::GerritError;
use crate::groups::GroupInfo;

/// A typed handle for one group.
///
/// Setters keep the handle's record in sync with the server's canonical
/// response values.
pub struct Group<'g> {
    /// The hydrated group record.
    pub info: GroupInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Group<'g> {
    pub(crate) fn new(info: GroupInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// The group UUID.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Renames the group. The server's canonical name is stored on the
    /// handle and returned.
    pub fn rename(&mut self, name: &str) -> Result<String, GerritError> {
        let endpoint = format!("/groups/{}/name", self.id());
        let canonical = self
            .gerrit
            .put_json(&endpoint, &json!({ "name": name }))?
            .into_string(&endpoint)?;
        self.info.name = Some(canonical.clone());
        Ok(canonical)
    }

    /// Sets the description of the group.
    pub fn set_description(&mut self, description: &str) -> Result<String, GerritError> {
        let endpoint = format!("/groups/{}/description", self.id());
        let canonical = self
            .gerrit
            .put_json(&endpoint, &json!({ "description": description }))?
            .into_string(&endpoint)?;
        self.info.description = Some(canonical.clone());
        Ok(canonical)
    }

    /// Deletes the description of the group.
    pub fn delete_description(&mut self) -> Result<(), GerritError> {
        let endpoint = format!("/groups/{}/description", self.id());
        self.gerrit.delete(&endpoint)?;
        self.info.description = None;
        Ok(())
    }

    /// Sets the options of the group and stores the resulting record.
    ///
    /// `input` is the GroupOptionsInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-groups.html#group-options-input>
    pub fn set_options(&mut self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/groups/{}/options", self.id());
        let options = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        self.info.options = Some(options.clone());
        Ok(options)
    }

    /// Sets the owner group; the handle's owner fields follow the
    /// server's response. Returns the new owner's record.
    pub fn set_owner(&mut self, owner: &str) -> Result<GroupInfo, GerritError> {
        let endpoint = format!("/groups/{}/owner", self.id());
        let value = self
            .gerrit
            .put_json(&endpoint, &json!({ "owner": owner }))?
            .into_json(&endpoint)?;
        let new_owner: GroupInfo = hydrate(value)?;
        self.info.owner = new_owner.name.clone();
        self.info.owner_id = Some(new_owner.id.clone());
        Ok(new_owner)
    }

    /// Gets the audit log of the group.
    pub fn audit_log(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/groups/{}/log.audit", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Adds or updates the group in the secondary index.
    pub fn index(&self) -> Result<(), GerritError> {
        let endpoint = format!("/groups/{}/index", self.id());
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }

    /// Lists the direct members of the group.
    pub fn list_members(&self) -> Result<Vec<AccountInfo>, GerritError> {
        let endpoint = format!("/groups/{}/members/", self.id());
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
        hydrate_list::<AccountInfo>(rows)
    }

    /// Retrieves one member by account id or username.
    pub fn get_member(&self, account: &str) -> Result<AccountInfo, GerritError> {
        let endpoint = format!("/groups/{}/members/{}", self.id(), account);
        let value = self.gerrit.get_json(&endpoint)?;
        hydrate(value)
    }

    /// Adds a user as member of the group.
    pub fn add_member(&self, username: &str) -> Result<AccountInfo, GerritError> {
        let endpoint = format!("/groups/{}/members/{}", self.id(), username);
        let value = self.gerrit.put_empty(&endpoint)?.into_json(&endpoint)?;
        hydrate(value)
    }

    /// Removes a user from the group.
    pub fn remove_member(&self, username: &str) -> Result<(), GerritError> {
        let endpoint = format!("/groups/{}/members/{}", self.id(), username);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }

    /// Lists the direct subgroups of the group.
    pub fn list_subgroups(&self) -> Result<Vec<GroupInfo>, GerritError> {
        let endpoint = format!("/groups/{}/groups/", self.id());
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
        hydrate_list::<GroupInfo>(rows)
    }

    /// Retrieves one subgroup.
    pub fn get_subgroup(&self, id: &str) -> Result<GroupInfo, GerritError> {
        let endpoint = format!("/groups/{}/groups/{}", self.id(), id);
        let value = self.gerrit.get_json(&endpoint)?;
        hydrate(value)
    }

    /// Adds an internal or external group as subgroup.
    pub fn add_subgroup(&self, id: &str) -> Result<GroupInfo, GerritError> {
        let endpoint = format!("/groups/{}/groups/{}", self.id(), id);
        let value = self.gerrit.put_empty(&endpoint)?.into_json(&endpoint)?;
        hydrate(value)
    }

    /// Removes a subgroup.
    pub fn remove_subgroup(&self, id: &str) -> Result<(), GerritError> {
        let endpoint = format!("/groups/{}/groups/{}", self.id(), id);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    fn group(gerrit: &GerritClient) -> Group<'_> {
        let info: GroupInfo = serde_json::from_value(json!({
            "id": "af01a8cb",
            "name": "Old Committers",
            "owner": "Administrators"
        }))
        .unwrap();
        Group::new(info, gerrit)
    }

    #[test]
    fn test_rename_stores_the_canonical_name() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/groups/af01a8cb/name")
            .match_body(mockito::Matcher::Json(json!({ "name": "My Committers" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n\"My Committers\"")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut group = group(&gerrit);
        assert_eq!(group.rename("My Committers").unwrap(), "My Committers");
        assert_eq!(group.info.name.as_deref(), Some("My Committers"));
    }

    #[test]
    fn test_rename_on_an_external_group_is_not_allowed() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/groups/af01a8cb/name")
            .with_status(405)
            .with_header("content-type", "text/plain")
            .with_body("not an internal group")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut group = group(&gerrit);
        match group.rename("Other").unwrap_err() {
            GerritError::NotAllowed(reply) => assert_eq!(reply.status, 405),
            other => panic!("expected NotAllowed, got {other:?}"),
        }
        assert_eq!(group.info.name.as_deref(), Some("Old Committers"));
    }

    #[test]
    fn test_set_owner_updates_both_owner_fields() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/groups/af01a8cb/owner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"id\": \"6a1e70e1\", \"name\": \"Service Users\"}")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut group = group(&gerrit);
        let owner = group.set_owner("Service Users").unwrap();
        assert_eq!(owner.id, "6a1e70e1");
        assert_eq!(group.info.owner.as_deref(), Some("Service Users"));
        assert_eq!(group.info.owner_id.as_deref(), Some("6a1e70e1"));
    }
}
