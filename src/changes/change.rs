//
//  gerrit-client
//  changes/change.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-change handle.

use serde_json::{json, Value};

use crate::changes::{ChangeInfo, Edit, Reviewers, Revision};
use crate::client::GerritClient;
use crate::entity::hydrate;
use crate::error::GerritError;

/// A typed handle for one change.
///
/// State-transition endpoints (`abandon`, `restore`, `submit`, ...)
/// return a fresh handle hydrated from the server's response, so the
/// caller always sees the post-transition record.
#[derive(Debug)]
pub struct Change<'g> {
    /// The hydrated change record.
    pub info: ChangeInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Change<'g> {
    pub(crate) fn new(info: ChangeInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// The change id in triplet form.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Retrieves the topic of the change; empty when unset.
    pub fn topic(&self) -> Result<String, GerritError> {
        let endpoint = format!("/changes/{}/topic", self.id());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the topic of the change. The server's canonical value is
    /// stored on the handle and returned.
    pub fn set_topic(&mut self, topic: &str) -> Result<String, GerritError> {
        let endpoint = format!("/changes/{}/topic", self.id());
        let canonical = self
            .gerrit
            .put_json(&endpoint, &json!({ "topic": topic }))?
            .into_string(&endpoint)?;
        self.info.topic = Some(canonical.clone());
        Ok(canonical)
    }

    /// Deletes the topic of the change.
    pub fn delete_topic(&mut self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/topic", self.id());
        self.gerrit.delete(&endpoint)?;
        self.info.topic = None;
        Ok(())
    }

    /// Checks whether the change is a pure revert of the change it
    /// references in `revertOf`.
    pub fn pure_revert(&self, commit: &str) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/pure_revert", self.id());
        self.gerrit.get_json_query(&endpoint, &[("o", commit)])
    }

    /// Abandons the change.
    pub fn abandon(&self) -> Result<Change<'g>, GerritError> {
        self.transition("abandon")
    }

    /// Restores an abandoned change.
    pub fn restore(&self) -> Result<Change<'g>, GerritError> {
        self.transition("restore")
    }

    /// Rebases the change. A change that cannot be rebased, e.g. due to
    /// conflicts, surfaces as [`GerritError::Conflict`] with the server's
    /// message in the reply body.
    ///
    /// `input` is the RebaseInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#rebase-input>
    pub fn rebase(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        self.transition_with("rebase", input)
    }

    /// Moves the change to a different destination branch.
    ///
    /// `input` is the MoveInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#move-input>
    pub fn move_to(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        self.transition_with("move", input)
    }

    /// Reverts the change; the returned handle is the new revert change.
    ///
    /// `input` is the RevertInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#revert-input>
    pub fn revert(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        self.transition_with("revert", input)
    }

    /// Submits the change. A submit rule that rejects the change
    /// surfaces as [`GerritError::Conflict`].
    ///
    /// `input` is the SubmitInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#submit-input>
    pub fn submit(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        self.transition_with("submit", input)
    }

    fn transition(&self, action: &str) -> Result<Change<'g>, GerritError> {
        let endpoint = format!("/changes/{}/{}", self.id(), action);
        let value = self.gerrit.post_empty(&endpoint)?.into_json(&endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    fn transition_with(&self, action: &str, input: &Value) -> Result<Change<'g>, GerritError> {
        let endpoint = format!("/changes/{}/{}", self.id(), action);
        let value = self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    /// Deletes the change.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}", self.id());
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }

    /// Retrieves the branches and tags the change is included in.
    pub fn include_in(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/in", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Adds or updates the change in the secondary index.
    pub fn index(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/index", self.id());
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }

    /// Lists the published comments of all revisions, keyed by file
    /// path.
    pub fn list_comments(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/comments", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Lists the calling user's draft comments of all revisions, keyed
    /// by file path.
    pub fn list_drafts(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/drafts", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Performs consistency checks on the change; the returned record
    /// carries a `problems` field.
    pub fn consistency_check(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/check", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Performs consistency checks and fixes what can be fixed
    /// automatically.
    ///
    /// `input` is the FixInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#fix-input>
    pub fn fix(&self, input: Option<&Value>) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/check", self.id());
        let decoded = match input {
            Some(input) => self.gerrit.post_json(&endpoint, input)?,
            None => self.gerrit.post_empty(&endpoint)?,
        };
        decoded.into_json(&endpoint)
    }

    /// Marks the change as not ready for review yet.
    ///
    /// `input` is the WorkInProgressInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#work-in-progress-input>
    pub fn set_work_in_progress(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/wip", self.id());
        self.gerrit.post_json(&endpoint, input)?;
        Ok(())
    }

    /// Marks the change as ready for review.
    pub fn set_ready_for_review(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/ready", self.id());
        self.gerrit.post_json(&endpoint, input)?;
        Ok(())
    }

    /// Marks the change private. Only open changes can be marked
    /// private.
    ///
    /// `input` is the PrivateInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#private-input>
    pub fn mark_private(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/private", self.id());
        self.gerrit.post_json(&endpoint, input)?;
        Ok(())
    }

    /// Marks the change non-private. A change that is already public
    /// surfaces as [`GerritError::Conflict`].
    pub fn unmark_private(&self, input: Option<&Value>) -> Result<(), GerritError> {
        match input {
            Some(input) => {
                let endpoint = format!("/changes/{}/private.delete", self.id());
                self.gerrit.post_json(&endpoint, input)?;
            }
            None => {
                let endpoint = format!("/changes/{}/private", self.id());
                self.gerrit.delete(&endpoint)?;
            }
        }
        Ok(())
    }

    /// Marks the change as reviewed for the calling user's dashboard.
    pub fn mark_as_reviewed(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/reviewed", self.id());
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Marks the change as unreviewed for the calling user's dashboard.
    pub fn mark_as_unreviewed(&self) -> Result<(), GerritError> {
        let endpoint = format!("/changes/{}/unreviewed", self.id());
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Gets the hashtags associated with the change.
    pub fn hashtags(&self) -> Result<Vec<String>, GerritError> {
        let endpoint = format!("/changes/{}/hashtags", self.id());
        let value = self.gerrit.get_json(&endpoint)?;
        serde_json::from_value(value).map_err(|source| GerritError::Decode {
            url: endpoint,
            source,
        })
    }

    /// Adds and/or removes hashtags; returns the resulting set.
    ///
    /// `input` is the HashtagsInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#hashtags-input>
    pub fn set_hashtags(&self, input: &Value) -> Result<Vec<String>, GerritError> {
        let endpoint = format!("/changes/{}/hashtags", self.id());
        let value = self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)?;
        serde_json::from_value(value).map_err(|source| GerritError::Decode {
            url: endpoint,
            source,
        })
    }

    /// Lists all messages of the change with detailed account
    /// information.
    pub fn list_messages(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/messages", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Retrieves one change message.
    pub fn get_message(&self, message_id: &str) -> Result<Value, GerritError> {
        let endpoint = format!("/changes/{}/messages/{}", self.id(), message_id);
        self.gerrit.get_json(&endpoint)
    }

    /// Deletes a change message. With an input the message is replaced
    /// through the `delete` sub-endpoint instead of removed outright.
    ///
    /// `input` is the DeleteChangeMessageInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#delete-change-message-input>
    pub fn delete_message(
        &self,
        message_id: &str,
        input: Option<&Value>,
    ) -> Result<(), GerritError> {
        match input {
            Some(input) => {
                let endpoint = format!("/changes/{}/messages/{}/delete", self.id(), message_id);
                self.gerrit.post_json(&endpoint, input)?;
            }
            None => {
                let endpoint = format!("/changes/{}/messages/{}", self.id(), message_id);
                self.gerrit.delete(&endpoint)?;
            }
        }
        Ok(())
    }

    /// The reviewer collection of this change.
    pub fn reviewers(&self) -> Reviewers<'g> {
        Reviewers::new(self.info.id.clone(), self.gerrit)
    }

    /// A revision handle for the given revision id (`current`, a patch
    /// set number, or a commit id).
    pub fn revision(&self, revision_id: &str) -> Revision<'g> {
        Revision::new(self.info.id.clone(), revision_id.to_string(), self.gerrit)
    }

    /// The change-edit handle of this change.
    pub fn edit(&self) -> Edit<'g> {
        Edit::new(self.info.id.clone(), self.gerrit)
    }
}
