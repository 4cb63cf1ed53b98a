//
//  gerrit-client
//  projects/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-commit handle of a project.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::Entity;
use crate::error::GerritError;
use crate::util::escape_path_segment;

/// Declared fields of a commit record.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    /// The commit id (SHA-1).
    pub commit: String,
    /// Parent commits.
    #[serde(default)]
    pub parents: Option<Value>,
    /// Author identity.
    #[serde(default)]
    pub author: Option<Value>,
    /// Committer identity.
    #[serde(default)]
    pub committer: Option<Value>,
    /// First line of the commit message.
    #[serde(default)]
    pub subject: Option<String>,
    /// Full commit message.
    #[serde(default)]
    pub message: Option<String>,
}

impl Entity for CommitInfo {
    const KIND: &'static str = "commit";
    const FIELDS: &'static [&'static str] = &[
        "commit",
        "parents",
        "author",
        "committer",
        "subject",
        "message",
    ];
}

/// A typed handle for one commit, contextualized with its project.
pub struct Commit<'g> {
    /// The hydrated commit record.
    pub info: CommitInfo,
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Commit<'g> {
    pub(crate) fn new(info: CommitInfo, project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            project,
            gerrit,
        }
    }

    /// The commit id.
    pub fn id(&self) -> &str {
        &self.info.commit
    }

    /// Gets the branches and tags in which the commit is present.
    pub fn include_in(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/commits/{}/in", self.project, self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Gets the content of a file at this commit, as the base64 string
    /// the server returns.
    pub fn file_content(&self, path: &str) -> Result<String, GerritError> {
        let endpoint = format!(
            "/projects/{}/commits/{}/files/{}/content",
            self.project,
            self.id(),
            escape_path_segment(path),
        );
        self.gerrit.get_string(&endpoint)
    }

    /// Cherry-picks the commit to a destination branch.
    ///
    /// `input` is the CherryPickInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#cherrypick-input>
    pub fn cherry_pick(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/commits/{}/cherrypick", self.project, self.id());
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Lists the files changed by the commit relative to its parent.
    pub fn changed_files(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/commits/{}/files/", self.project, self.id());
        self.gerrit.get_json(&endpoint)
    }
}
