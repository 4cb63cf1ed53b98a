//
//  gerrit-client
//  changes/reviewers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The reviewer collection of a change.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// Declared fields of a reviewer record.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewerInfo {
    /// Username, used to address the reviewer in endpoints.
    pub username: String,
    /// Numeric account id.
    #[serde(default, rename = "_account_id")]
    pub account_id: Option<i64>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Preferred email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Current approvals, keyed by label.
    #[serde(default)]
    pub approvals: Option<Value>,
}

impl Entity for ReviewerInfo {
    const KIND: &'static str = "reviewer";
    const FIELDS: &'static [&'static str] =
        &["username", "_account_id", "name", "email", "approvals"];
}

/// A typed handle for one reviewer, contextualized with its change.
#[derive(Debug)]
pub struct Reviewer<'g> {
    /// The hydrated reviewer record.
    pub info: ReviewerInfo,
    change: String,
    gerrit: &'g GerritClient,
}

impl<'g> Reviewer<'g> {
    pub(crate) fn new(info: ReviewerInfo, change: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            change,
            gerrit,
        }
    }

    /// Deletes the reviewer from the change. With an input the removal
    /// goes through the `delete` sub-endpoint, which accepts
    /// notification options.
    ///
    /// `input` is the DeleteReviewerInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#delete-reviewer-input>
    pub fn delete(&self, input: Option<&Value>) -> Result<(), GerritError> {
        match input {
            Some(input) => {
                let endpoint = format!(
                    "/changes/{}/reviewers/{}/delete",
                    self.change, self.info.username
                );
                self.gerrit.post_json(&endpoint, input)?;
            }
            None => {
                let endpoint =
                    format!("/changes/{}/reviewers/{}", self.change, self.info.username);
                self.gerrit.delete(&endpoint)?;
            }
        }
        Ok(())
    }

    /// Lists the reviewer's votes on the change.
    pub fn list_votes(&self) -> Result<Value, GerritError> {
        let endpoint = format!(
            "/changes/{}/reviewers/{}/votes/",
            self.change, self.info.username
        );
        self.gerrit.get_json(&endpoint)
    }

    /// Deletes a single vote. The reviewer stays listed on the change
    /// even when their last vote is removed.
    ///
    /// `input` is the DeleteVoteInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#delete-vote-input>
    pub fn delete_vote(&self, label: &str, input: Option<&Value>) -> Result<(), GerritError> {
        match input {
            Some(input) => {
                let endpoint = format!(
                    "/changes/{}/reviewers/{}/votes/{}/delete",
                    self.change, self.info.username, label
                );
                self.gerrit.post_json(&endpoint, input)?;
            }
            None => {
                let endpoint = format!(
                    "/changes/{}/reviewers/{}/votes/{}",
                    self.change, self.info.username, label
                );
                self.gerrit.delete(&endpoint)?;
            }
        }
        Ok(())
    }
}

/// Entry point for the `/changes/{id}/reviewers/` endpoints.
pub struct Reviewers<'g> {
    change: String,
    gerrit: &'g GerritClient,
}

impl<'g> Reviewers<'g> {
    pub(crate) fn new(change: String, gerrit: &'g GerritClient) -> Self {
        Self { change, gerrit }
    }

    /// Lists the reviewers of the change.
    pub fn list(&self) -> Result<Vec<Reviewer<'g>>, GerritError> {
        let endpoint = format!("/changes/{}/reviewers/", self.change);
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
        let infos = hydrate_list::<ReviewerInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Reviewer::new(info, self.change.clone(), self.gerrit))
            .collect())
    }

    /// Retrieves a reviewer by account id, name, username or email. The
    /// server answers with a one-element list.
    pub fn get(&self, query: &str) -> Result<Reviewer<'g>, GerritError> {
        let endpoint = format!("/changes/{}/reviewers/{}", self.change, query);
        let value = self.gerrit.get_json(&endpoint)?;
        let first = match value {
            Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
            _ => {
                return Err(GerritError::UnknownRef {
                    kind: "reviewer",
                    name: query.to_string(),
                })
            }
        };
        Ok(Reviewer::new(
            hydrate(first)?,
            self.change.clone(),
            self.gerrit,
        ))
    }

    /// Adds one user or all members of one group as reviewer; returns
    /// the server's result record.
    ///
    /// `input` is the ReviewerInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#reviewer-input>
    pub fn add(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/reviewers", self.change);
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_get_unwraps_the_single_element_list() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/demo~main~I1/reviewers/john.doe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"[{"username": "john.doe", "_account_id": 1000096,
                    "approvals": {"Code-Review": "+1"}}]"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let reviewers = Reviewers::new("demo~main~I1".to_string(), &gerrit);
        let reviewer = reviewers.get("john.doe").unwrap();
        assert_eq!(reviewer.info.username, "john.doe");
        assert_eq!(reviewer.info.account_id, Some(1000096));
    }

    #[test]
    fn test_get_with_empty_answer_reports_unknown_reviewer() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/demo~main~I1/reviewers/nobody")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n[]")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let reviewers = Reviewers::new("demo~main~I1".to_string(), &gerrit);
        match reviewers.get("nobody").unwrap_err() {
            GerritError::UnknownRef { kind, name } => {
                assert_eq!(kind, "reviewer");
                assert_eq!(name, "nobody");
            }
            other => panic!("expected UnknownRef, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_without_input_uses_the_plain_endpoint() {
        let mut server = mockito::Server::new();
        let delete = server
            .mock("DELETE", "/a/changes/demo~main~I1/reviewers/john.doe")
            .with_status(204)
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let info: ReviewerInfo =
            serde_json::from_value(serde_json::json!({ "username": "john.doe" })).unwrap();
        let reviewer = Reviewer::new(info, "demo~main~I1".to_string(), &gerrit);
        reviewer.delete(None).unwrap();
        delete.assert();
    }
}
