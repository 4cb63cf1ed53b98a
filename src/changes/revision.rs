//
//  gerrit-client
//  changes/revision.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-revision (patch set) handle of a change.

use serde_json::Value;

use crate::changes::{Comments, Drafts, Files};
use crate::client::GerritClient;
use crate::entity::hydrate;
use crate::error::GerritError;
use crate::projects::CommitInfo;
use crate::util::escape_path_segment;

/// A typed handle for one revision of a change.
///
/// The revision id may be `current`, a patch set number, or a commit
/// id; the server resolves it on every call.
pub struct Revision<'g> {
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> Revision<'g> {
    pub(crate) fn new(change: String, revision: String, gerrit: &'g GerritClient) -> Self {
        Self {
            change,
            revision,
            gerrit,
        }
    }

    fn endpoint(&self, tail: &str) -> String {
        format!(
            "/changes/{}/revisions/{}/{}",
            self.change, self.revision, tail
        )
    }

    /// Retrieves the parsed commit of the revision.
    pub fn commit(&self) -> Result<CommitInfo, GerritError> {
        let endpoint = self.endpoint("commit");
        let value = self.gerrit.get_json(&endpoint)?;
        hydrate(value)
    }

    /// Retrieves the description of the patch set; empty when unset.
    pub fn description(&self) -> Result<String, GerritError> {
        let endpoint = self.endpoint("description");
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the description of the patch set.
    ///
    /// `input` is the DescriptionInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#description-input>
    pub fn set_description(&self, input: &Value) -> Result<String, GerritError> {
        let endpoint = self.endpoint("description");
        self.gerrit.put_json(&endpoint, input)?.into_string(&endpoint)
    }

    /// Lists the commits a merge commit would integrate into the target
    /// branch.
    pub fn merge_list(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("mergelist");
        self.gerrit.get_json(&endpoint)
    }

    /// Retrieves the actions the caller may perform on the revision.
    pub fn actions(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("actions");
        self.gerrit.get_json(&endpoint)
    }

    /// Retrieves the review of the revision.
    pub fn review(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("review");
        self.gerrit.get_json(&endpoint)
    }

    /// Sets a review on the revision: publishes drafts, sets labels,
    /// adds reviewers or CCs. Posting on a change edit surfaces as
    /// [`GerritError::Conflict`].
    ///
    /// `input` is the ReviewInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#review-input>
    pub fn set_review(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("review");
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Retrieves the changes that depend on, or are dependencies of,
    /// the revision.
    pub fn related_changes(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("related");
        self.gerrit.get_json(&endpoint)
    }

    /// Rebases the revision.
    ///
    /// `input` is the RebaseInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#rebase-input>
    pub fn rebase(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("rebase");
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Submits the revision. A revision that is not current, or that a
    /// submit rule rejects, surfaces as [`GerritError::Conflict`].
    pub fn submit(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("submit");
        self.gerrit.post_empty(&endpoint)?.into_json(&endpoint)
    }

    /// Gets the formatted patch of the revision as base64 text. With a
    /// path, only the diff of that file is returned.
    pub fn patch(&self, path: Option<&str>) -> Result<String, GerritError> {
        let endpoint = self.endpoint("patch");
        let decoded = match path {
            Some(path) => {
                let escaped = escape_path_segment(path);
                self.gerrit.get_query(&endpoint, &[("path", &escaped)])?
            }
            None => self.gerrit.get(&endpoint)?,
        };
        decoded.into_string(&endpoint)
    }

    /// Gets the submit method the server will use and whether the
    /// change is currently mergeable.
    pub fn mergeable(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("mergeable");
        self.gerrit.get_json(&endpoint)
    }

    /// Gets the method the server will use to submit (merge) the
    /// change.
    pub fn submit_type(&self) -> Result<String, GerritError> {
        let endpoint = self.endpoint("submit_type");
        self.gerrit.get_string(&endpoint)
    }

    /// Cherry-picks the revision to a destination branch.
    ///
    /// `input` is the CherryPickInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#cherrypick-input>
    pub fn cherry_pick(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("cherrypick");
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Lists the reviewers of the revision.
    pub fn list_reviewers(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("reviewers");
        self.gerrit.get_json(&endpoint)
    }

    /// The published comments of this revision.
    pub fn comments(&self) -> Comments<'g> {
        Comments::new(self.change.clone(), self.revision.clone(), self.gerrit)
    }

    /// The calling user's draft comments on this revision.
    pub fn drafts(&self) -> Drafts<'g> {
        Drafts::new(self.change.clone(), self.revision.clone(), self.gerrit)
    }

    /// The file collection of this revision.
    pub fn files(&self) -> Files<'g> {
        Files::new(self.change.clone(), self.revision.clone(), self.gerrit)
    }
}
