//
//  gerrit-client
//  changes/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Change Resources
//!
//! Searching, fetching and creating changes, plus the per-change handle
//! with its reviewer, revision and change-edit sub-resources.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

mod change;
mod comments;
mod drafts;
mod edit;
mod files;
mod reviewers;
mod revision;

pub use change::Change;
pub use comments::{Comment, CommentInfo, Comments};
pub use drafts::{Draft, DraftInfo, Drafts};
pub use edit::{Edit, EditInfo};
pub use files::{File, FileInfo, Files};
pub use reviewers::{Reviewer, ReviewerInfo, Reviewers};
pub use revision::Revision;

/// Declared fields of a change record.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeInfo {
    /// Change id in the triplet form `project~branch~I...`.
    pub id: String,
    /// Owning project.
    #[serde(default)]
    pub project: Option<String>,
    /// Destination branch (without the `refs/heads/` prefix).
    #[serde(default)]
    pub branch: Option<String>,
    /// The Change-Id footer value.
    #[serde(default)]
    pub change_id: Option<String>,
    /// Subject of the current patch set.
    #[serde(default)]
    pub subject: Option<String>,
    /// `NEW`, `MERGED` or `ABANDONED`.
    #[serde(default)]
    pub status: Option<String>,
    /// Topic the change belongs to, if any.
    #[serde(default)]
    pub topic: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    /// Last-update timestamp.
    #[serde(default)]
    pub updated: Option<String>,
    /// Whether the change can currently be merged.
    #[serde(default)]
    pub mergeable: Option<bool>,
    /// Inserted lines of the current patch set.
    #[serde(default)]
    pub insertions: Option<i64>,
    /// Deleted lines of the current patch set.
    #[serde(default)]
    pub deletions: Option<i64>,
    /// The legacy numeric change id.
    #[serde(default, rename = "_number")]
    pub number: Option<i64>,
    /// The owner account.
    #[serde(default)]
    pub owner: Option<Value>,
}

impl Entity for ChangeInfo {
    const KIND: &'static str = "change";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "project",
        "branch",
        "change_id",
        "subject",
        "status",
        "topic",
        "created",
        "updated",
        "mergeable",
        "insertions",
        "deletions",
        "_number",
        "owner",
    ];
}

/// The ChangeInput entity for [`Changes::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#change-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangeInput {
    pub project: String,
    pub branch: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_in_progress: Option<bool>,
}

/// Entry point for `/changes/` endpoints.
pub struct Changes<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Changes<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Queries changes visible to the caller, e.g.
    /// `q=status:open+project:demo`.
    pub fn search(&self, query: &[(&str, &str)]) -> Result<Vec<Change<'g>>, GerritError> {
        let endpoint = "/changes/";
        let value = self.gerrit.get_json_query(endpoint, query)?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<ChangeInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Change::new(info, self.gerrit))
            .collect())
    }

    /// Retrieves a change by id (numeric, Change-Id or triplet form).
    pub fn get(&self, id: &str) -> Result<Change<'g>, GerritError> {
        let endpoint = format!("/changes/{id}");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    /// Creates a new change.
    pub fn create(&self, input: &ChangeInput) -> Result<Change<'g>, GerritError> {
        let endpoint = "/changes/";
        let value = self.gerrit.post_json(endpoint, input)?.into_json(endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    /// Deletes a change.
    pub fn delete(&self, id: &str) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{id}");
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_get_missing_change_surfaces_not_found_with_the_id() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/99999")
            .with_status(404)
            .with_header("content-type", "text/plain")
            .with_body("Not found: 99999")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        match gerrit.changes().get("99999").unwrap_err() {
            GerritError::NotFound(reply) => {
                assert_eq!(reply.status, 404);
                assert!(reply.url.ends_with("/a/changes/99999"));
                assert_eq!(reply.body, "Not found: 99999");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_input_surfaces_validation_with_server_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/a/changes/")
            .with_status(400)
            .with_header("content-type", "text/plain")
            .with_body("branch must be non-empty")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let input = ChangeInput {
            project: "demo".to_string(),
            ..Default::default()
        };
        match gerrit.changes().create(&input).unwrap_err() {
            GerritError::Validation(reply) => {
                assert_eq!(reply.status, 400);
                assert_eq!(reply.body, "branch must be non-empty");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_search_hydrates_ordered_handles() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/?q=status%3Aopen")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"[
                    {"id": "demo~main~I1", "subject": "first", "_number": 1,
                     "unknown_server_field": true},
                    {"id": "demo~main~I2", "subject": "second", "_number": 2}
                ]"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let changes = gerrit.changes().search(&[("q", "status:open")]).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].info.number, Some(1));
        assert_eq!(changes[1].info.subject.as_deref(), Some("second"));
    }
}
