//
//  gerrit-client
//  projects/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The per-project handle.

use serde_json::Value;

use crate::changes::Change;
use crate::client::GerritClient;
use crate::entity::hydrate;
use crate::error::GerritError;
use crate::projects::{Branches, Commit, Dashboards, Labels, ProjectInfo, Tags};

/// A typed handle for one project.
///
/// Hydrated from a `/projects/` response; carries the root client so
/// follow-up endpoints can be addressed without re-supplying the
/// project name.
pub struct Project<'g> {
    /// The hydrated project record.
    pub info: ProjectInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Project<'g> {
    pub(crate) fn new(info: ProjectInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// URL-encoded project name, as used in endpoint paths.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// The branch collection of this project (`refs/heads/`).
    pub fn branches(&self) -> Branches<'g> {
        Branches::new(self.info.id.clone(), self.gerrit)
    }

    /// The tag collection of this project (`refs/tags/`).
    pub fn tags(&self) -> Tags<'g> {
        Tags::new(self.info.id.clone(), self.gerrit)
    }

    /// The custom dashboards of this project.
    pub fn dashboards(&self) -> Dashboards<'g> {
        Dashboards::new(self.info.id.clone(), self.gerrit)
    }

    /// The label definitions of this project.
    pub fn labels(&self) -> Labels<'g> {
        Labels::new(self.info.id.clone(), self.gerrit)
    }

    /// Retrieves a commit of the project.
    pub fn commit(&self, commit_id: &str) -> Result<Commit<'g>, GerritError> {
        let endpoint = format!("/projects/{}/commits/{}", self.id(), commit_id);
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Commit::new(hydrate(value)?, self.info.id.clone(), self.gerrit))
    }

    /// Retrieves the description of the project.
    pub fn description(&self) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/description", self.id());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the description of the project.
    ///
    /// `input` is the ProjectDescriptionInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#project-description-input>
    pub fn set_description(&self, input: &Value) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/description", self.id());
        self.gerrit.put_json(&endpoint, input)?.into_string(&endpoint)
    }

    /// Deletes the description of the project.
    pub fn delete_description(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/description", self.id());
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }

    /// Retrieves the name of the project's parent project. For the
    /// `All-Projects` root project an empty string is returned.
    pub fn parent(&self) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/parent", self.id());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets the parent project.
    ///
    /// `input` is the ProjectParentInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#project-parent-input>
    pub fn set_parent(&self, input: &Value) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/parent", self.id());
        self.gerrit.put_json(&endpoint, input)?.into_string(&endpoint)
    }

    /// Retrieves the name of the branch to which HEAD points.
    pub fn head(&self) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/HEAD", self.id());
        self.gerrit.get_string(&endpoint)
    }

    /// Sets HEAD for the project to the given fully-qualified ref.
    pub fn set_head(&self, ref_name: &str) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/HEAD", self.id());
        self.gerrit
            .put_json(&endpoint, &serde_json::json!({ "ref": ref_name }))?
            .into_string(&endpoint)
    }

    /// Gets configuration information about the project, including
    /// fields inherited from parent projects.
    pub fn config(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/config", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Sets the configuration of the project.
    ///
    /// `input` is the ConfigInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#config-input>
    pub fn set_config(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/config", self.id());
        self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Returns statistics for the repository of the project.
    pub fn statistics(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/statistics.git", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Runs the Git garbage collection for the repository of the
    /// project; returns the server's progress output.
    ///
    /// `input` is the GCInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#gc-input>
    pub fn run_garbage_collection(&self, input: &Value) -> Result<String, GerritError> {
        let endpoint = format!("/projects/{}/gc", self.id());
        self.gerrit.post_json(&endpoint, input)?.into_string(&endpoint)
    }

    /// Marks commits as banned for the project.
    ///
    /// `input` is the BanInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#ban-input>
    pub fn ban_commits(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/ban", self.id());
        self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Lists the access rights for the project.
    pub fn access_rights(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/access", self.id());
        self.gerrit.get_json(&endpoint)
    }

    /// Sets access rights for the project using the diff schema provided
    /// by ProjectAccessInput.
    pub fn set_access_rights(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/access", self.id());
        self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)
    }

    /// Like [`set_access_rights`](Self::set_access_rights), but creates
    /// a pending change for review and returns its handle.
    pub fn create_access_rights_change(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        let endpoint = format!("/projects/{}/access:review", self.id());
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    /// Creates a change for review against this project.
    ///
    /// `input` is the ChangeInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#change-input>
    pub fn create_change(&self, input: &Value) -> Result<Change<'g>, GerritError> {
        let endpoint = format!("/projects/{}/create.change", self.id());
        let value = self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Change::new(hydrate(value)?, self.gerrit))
    }

    /// Runs access checks for other users, e.g.
    /// `[("account", "1000096"), ("ref", "refs/heads/main")]`.
    pub fn check_access(&self, options: &[(&str, &str)]) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/check.access", self.id());
        self.gerrit.get_json_query(&endpoint, options)
    }

    /// Adds or updates the project (and children, if specified) in the
    /// secondary index.
    ///
    /// `input` is the IndexProjectInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#index-project-input>
    pub fn index(&self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/index", self.id());
        self.gerrit.post_json(&endpoint, input)?;
        Ok(())
    }

    /// Re-indexes all changes of the project.
    pub fn index_all_changes(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/index.changes", self.id());
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }

    /// Deletes the project. Requires the `delete-project` plugin on the
    /// server.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/delete-project~delete", self.id());
        self.gerrit.post_empty(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(gerrit: &GerritClient) -> Project<'_> {
        let info: ProjectInfo = serde_json::from_value(json!({ "id": "demo" })).unwrap();
        Project::new(info, gerrit)
    }

    #[test]
    fn test_rejected_put_surfaces_validation_with_the_server_body() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/projects/demo/description")
            .match_body(mockito::Matcher::Json(json!({ "description": "" })))
            .with_status(400)
            .with_body("description must not be empty")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let err = project(&gerrit)
            .set_description(&json!({ "description": "" }))
            .unwrap_err();
        match err {
            GerritError::Validation(reply) => {
                assert_eq!(reply.status, 400);
                assert_eq!(reply.body, "description must not be empty");
                assert!(reply.url.ends_with("/a/projects/demo/description"));
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }
}
