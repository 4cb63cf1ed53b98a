//
//  gerrit-client
//  changes/edit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The change-edit handle.
//!
//! A change edit is a server-side draft revision of a change. At most
//! one edit exists per change and calling user; the handle addresses it
//! through `/changes/{id}/edit` without any revision id.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;
use crate::transport::Decoded;
use crate::util::escape_path_segment;

/// Declared fields of a change-edit record.
#[derive(Debug, Clone, Deserialize)]
pub struct EditInfo {
    /// The edit ref, e.g. `refs/users/00/1000000/edit-1/1`.
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Revision the edit is based on.
    #[serde(default)]
    pub base_revision: Option<String>,
    /// Patch set number the edit is based on.
    #[serde(default)]
    pub base_patch_set_number: Option<i64>,
    /// The commit of the edit.
    #[serde(default)]
    pub commit: Option<Value>,
}

impl Entity for EditInfo {
    const KIND: &'static str = "edit";
    const FIELDS: &'static [&'static str] =
        &["ref", "base_revision", "base_patch_set_number", "commit"];
}

/// A typed handle for the change edit of one change.
pub struct Edit<'g> {
    change: String,
    gerrit: &'g GerritClient,
}

impl<'g> Edit<'g> {
    pub(crate) fn new(change: String, gerrit: &'g GerritClient) -> Self {
        Self { change, gerrit }
    }

    fn file_endpoint(&self, path: &str, tail: &str) -> String {
        format!(
            "/changes/{}/edit/{}{}",
            self.change,
            escape_path_segment(path),
            tail
        )
    }

    /// Retrieves the edit record, or `None` when no edit exists for the
    /// calling user (the server answers with an empty body).
    pub fn info(&self) -> Result<Option<EditInfo>, GerritError> {
        let endpoint = format!("/changes/{}/edit", self.change);
        match self.gerrit.get(&endpoint)? {
            Decoded::Empty => Ok(None),
            decoded => Ok(Some(hydrate(decoded.into_json(&endpoint)?)?)),
        }
    }

    /// Gets the content of a file from the edit, as the base64 string
    /// the server returns.
    pub fn file_content(&self, path: &str) -> Result<String, GerritError> {
        self.gerrit.get_string(&self.file_endpoint(path, ""))
    }

    /// Retrieves meta data of a file from the edit.
    pub fn file_metadata(&self, path: &str) -> Result<Value, GerritError> {
        self.gerrit.get_json(&self.file_endpoint(path, "/meta"))
    }

    /// Puts new content into a file of the edit. The body goes over the
    /// wire as plain text.
    pub fn put_file_content(&self, path: &str, content: &str) -> Result<(), GerritError> {
        self.gerrit
            .put_text(&self.file_endpoint(path, ""), content)?;
        Ok(())
    }

    /// Restores a file to its state in the revision the edit is based
    /// on.
    pub fn restore_file(&self, path: &str) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit", self.change);
        self.gerrit
            .post_json(&endpoint, &json!({ "restore_path": path }))?;
        Ok(())
    }

    /// Renames a file within the edit.
    pub fn rename_file(&self, old_path: &str, new_path: &str) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit", self.change);
        self.gerrit.post_json(
            &endpoint,
            &json!({ "old_path": old_path, "new_path": new_path }),
        )?;
        Ok(())
    }

    /// Deletes a file from the edit.
    pub fn delete_file(&self, path: &str) -> Result<(), GerritError> {
        self.gerrit.delete(&self.file_endpoint(path, ""))?;
        Ok(())
    }

    /// Retrieves the commit message of the edit, as the base64 string
    /// the server returns.
    pub fn commit_message(&self) -> Result<String, GerritError> {
        let endpoint = format!("/changes/{}/edit:message", self.change);
        self.gerrit.get_string(&endpoint)
    }

    /// Replaces the commit message of the edit.
    ///
    /// `input` is the ChangeEditMessageInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#change-edit-message-input>
    pub fn set_commit_message(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit:message", self.change);
        self.gerrit.put_json(&endpoint, input)?;
        Ok(())
    }

    /// Promotes the edit to a regular patch set.
    ///
    /// `input` is the PublishChangeEditInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#publish-change-edit-input>
    pub fn publish(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit:publish", self.change);
        self.gerrit.post_json(&endpoint, input)?;
        Ok(())
    }

    /// Rebases the edit on top of the latest patch set. The server
    /// answers 409 when the edit is already based on it, surfaced as
    /// [`GerritError::Conflict`].
    pub fn rebase(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit:rebase", self.change);
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }

    /// Discards the edit.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/edit", self.change);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_info_is_none_when_no_edit_exists() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/demo~main~I1/edit")
            .with_status(204)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let edit = Edit::new("demo~main~I1".to_string(), &gerrit);
        assert!(edit.info().unwrap().is_none());
    }

    #[test]
    fn test_info_hydrates_the_edit_record() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/demo~main~I1/edit")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"ref": "refs/users/00/1000000/edit-1/1",
                    "base_patch_set_number": 1,
                    "fetch": {}}"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let edit = Edit::new("demo~main~I1".to_string(), &gerrit);
        let info = edit.info().unwrap().unwrap();
        assert_eq!(info.ref_name, "refs/users/00/1000000/edit-1/1");
        assert_eq!(info.base_patch_set_number, Some(1));
    }

    #[test]
    fn test_put_file_content_sends_plain_text_to_the_escaped_path() {
        let mut server = mockito::Server::new();
        let put = server
            .mock("PUT", "/a/changes/demo~main~I1/edit/src%2Fwidget.rs")
            .match_header("content-type", "text/plain")
            .match_body("fn main() {}")
            .with_status(204)
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let edit = Edit::new("demo~main~I1".to_string(), &gerrit);
        edit.put_file_content("src/widget.rs", "fn main() {}").unwrap();
        put.assert();
    }

    #[test]
    fn test_rebase_surfaces_conflict_when_already_current() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/a/changes/demo~main~I1/edit:rebase")
            .with_status(409)
            .with_body("change edit is already based on latest patch set")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let edit = Edit::new("demo~main~I1".to_string(), &gerrit);
        let err = edit.rebase().unwrap_err();
        assert!(matches!(err, crate::GerritError::Conflict(_)));
    }
}
