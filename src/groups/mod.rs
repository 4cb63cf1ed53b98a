//
//  gerrit-client
//  groups/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Group Resources
//!
//! Internal group lookup and administration. The server lists groups
//! as a JSON object keyed by name, so the bulk listing injects each key
//! into its record before hydration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

mod group;

pub use group::Group;

/// Declared fields of a group record.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupInfo {
    /// URL-encoded group UUID, used to address the group in endpoints.
    pub id: String,
    /// Group name. Injected from the listing key for bulk listings.
    #[serde(default)]
    pub name: Option<String>,
    /// URL to the group's page on the server.
    #[serde(default)]
    pub url: Option<String>,
    /// Group options (visibility).
    #[serde(default)]
    pub options: Option<Value>,
    /// Group description.
    #[serde(default)]
    pub description: Option<String>,
    /// Legacy numeric group id.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Name of the owning group.
    #[serde(default)]
    pub owner: Option<String>,
    /// UUID of the owning group.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_on: Option<String>,
}

impl Entity for GroupInfo {
    const KIND: &'static str = "group";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "url",
        "options",
        "description",
        "group_id",
        "owner",
        "owner_id",
        "created_on",
    ];
}

/// The GroupInput entity for [`Groups::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-groups.html#group-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

/// Entry point for `/groups/` endpoints.
pub struct Groups<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Groups<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Lists the groups accessible by the caller.
    pub fn list(&self) -> Result<Vec<Group<'g>>, GerritError> {
        let endpoint = "/groups/";
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
        let mut groups = Vec::with_capacity(map.len());
        for (name, mut record) in map {
            if let Some(fields) = record.as_object_mut() {
                fields.insert("name".to_string(), Value::String(name));
            }
            groups.push(Group::new(hydrate(record)?, self.gerrit));
        }
        Ok(groups)
    }

    /// Queries groups by name fragment (`inname:`).
    pub fn search(&self, name: &str) -> Result<Vec<Group<'g>>, GerritError> {
        let endpoint = "/groups/";
        let query = format!("inname:{name}");
        let value = self.gerrit.get_json_query(endpoint, &[("query", &query)])?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<GroupInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Group::new(info, self.gerrit))
            .collect())
    }

    /// Retrieves a group by UUID.
    pub fn get(&self, id: &str) -> Result<Group<'g>, GerritError> {
        let endpoint = format!("/groups/{id}");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Group::new(hydrate(value)?, self.gerrit))
    }

    /// Creates a new internal group.
    pub fn create(&self, name: &str, input: &GroupInput) -> Result<Group<'g>, GerritError> {
        let endpoint = format!("/groups/{name}");
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Group::new(hydrate(value)?, self.gerrit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_list_injects_group_names() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/groups/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{
                    "Administrators": {"id": "af01a8cb", "group_id": 1},
                    "Service Users": {"id": "6a1e70e1", "group_id": 2}
                }"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let groups = gerrit.groups().list().unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups
            .iter()
            .any(|g| g.info.name.as_deref() == Some("Administrators")));
    }
}
