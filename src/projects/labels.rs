//
//  gerrit-client
//  projects/labels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Label definitions of a project. Reading requires access to the
//! project's `refs/meta/config` branch; writing requires write access
//! to it.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// Declared fields of a label definition.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelInfo {
    /// Label name, e.g. `Code-Review`.
    pub name: String,
    /// Label function, e.g. `MaxWithBlock`.
    #[serde(default)]
    pub function: Option<String>,
    /// Allowed values, keyed by score.
    #[serde(default)]
    pub values: Option<Value>,
    /// The default score.
    #[serde(default)]
    pub default_value: Option<i64>,
    /// Whether child projects can override the label.
    #[serde(default)]
    pub can_override: Option<bool>,
    /// Score-copy rules applied on new patch sets.
    #[serde(default)]
    pub copy_values: Option<Value>,
    #[serde(default)]
    pub copy_min_score: Option<bool>,
    #[serde(default)]
    pub copy_max_score: Option<bool>,
    #[serde(default)]
    pub copy_all_scores_if_no_change: Option<bool>,
    #[serde(default)]
    pub copy_all_scores_if_no_code_change: Option<bool>,
    #[serde(default)]
    pub copy_all_scores_on_trivial_rebase: Option<bool>,
    #[serde(default)]
    pub copy_all_scores_on_merge_first_parent_update: Option<bool>,
    /// Whether the label can be voted on after submit.
    #[serde(default)]
    pub allow_post_submit: Option<bool>,
    /// Whether the uploader's own approval is ignored.
    #[serde(default)]
    pub ignore_self_approval: Option<bool>,
}

impl Entity for LabelInfo {
    const KIND: &'static str = "label";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "function",
        "values",
        "default_value",
        "can_override",
        "copy_values",
        "copy_min_score",
        "copy_max_score",
        "copy_all_scores_if_no_change",
        "copy_all_scores_if_no_code_change",
        "copy_all_scores_on_trivial_rebase",
        "copy_all_scores_on_merge_first_parent_update",
        "allow_post_submit",
        "ignore_self_approval",
    ];
}

/// A typed handle for one label definition, contextualized with its
/// project.
pub struct Label<'g> {
    /// The hydrated label definition.
    pub info: LabelInfo,
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Label<'g> {
    pub(crate) fn new(info: LabelInfo, project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            project,
            gerrit,
        }
    }

    /// Updates the definition, storing the server's record locally.
    /// Properties absent from the input are left unmodified.
    ///
    /// `input` is the LabelDefinitionInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#label-definition-input>
    pub fn set(&mut self, input: &Value) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/labels/{}", self.project, self.info.name);
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        self.info = hydrate(value)?;
        Ok(())
    }

    /// Deletes the definition from the project.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/labels/{}", self.project, self.info.name);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the label definitions of one project.
pub struct Labels<'g> {
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Labels<'g> {
    pub(crate) fn new(project: String, gerrit: &'g GerritClient) -> Self {
        Self { project, gerrit }
    }

    /// Lists the labels defined in the project.
    pub fn list(&self) -> Result<Vec<Label<'g>>, GerritError> {
        let endpoint = format!("/projects/{}/labels/", self.project);
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
        let infos = hydrate_list::<LabelInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Label::new(info, self.project.clone(), self.gerrit))
            .collect())
    }

    /// Retrieves one label definition by name.
    pub fn get(&self, name: &str) -> Result<Label<'g>, GerritError> {
        let endpoint = format!("/projects/{}/labels/{}", self.project, name);
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Label::new(
            hydrate(value)?,
            self.project.clone(),
            self.gerrit,
        ))
    }

    /// Creates a label definition in the project. When a label with the
    /// name already exists its definition is updated instead.
    ///
    /// `input` is the LabelDefinitionInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#label-definition-input>
    pub fn create(&self, name: &str, input: &Value) -> Result<Label<'g>, GerritError> {
        let endpoint = format!("/projects/{}/labels/{}", self.project, name);
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Label::new(
            hydrate(value)?,
            self.project.clone(),
            self.gerrit,
        ))
    }

    /// Deletes one label definition by name.
    pub fn delete(&self, name: &str) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/labels/{}", self.project, name);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;
    use serde_json::json;

    #[test]
    fn test_create_puts_the_definition_and_hydrates_it() {
        let mut server = mockito::Server::new();
        let put = server
            .mock("PUT", "/a/projects/demo/labels/Verified")
            .match_body(mockito::Matcher::Json(json!({
                "values": { " 0": "No score", "+1": "Verified", "-1": "Fails" },
                "commit_message": "Create Verified label"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"name": "Verified", "function": "MaxWithBlock", "default_value": 0,
                    "values": { " 0": "No score", "+1": "Verified", "-1": "Fails" }}"#
            ))
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let label = Labels::new("demo".to_string(), &gerrit)
            .create(
                "Verified",
                &json!({
                    "values": { " 0": "No score", "+1": "Verified", "-1": "Fails" },
                    "commit_message": "Create Verified label"
                }),
            )
            .unwrap();
        assert_eq!(label.info.function.as_deref(), Some("MaxWithBlock"));
        put.assert();
    }

    #[test]
    fn test_set_stores_the_servers_record() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/a/projects/demo/labels/Code-Review")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"name": "Code-Review", "ignore_self_approval": true}"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let info: LabelInfo = serde_json::from_value(json!({ "name": "Code-Review" })).unwrap();
        let mut label = Label::new(info, "demo".to_string(), &gerrit);
        label
            .set(&json!({ "ignore_self_approval": true }))
            .unwrap();
        assert_eq!(label.info.ignore_self_approval, Some(true));
    }

    #[test]
    fn test_write_without_config_access_is_refused() {
        let mut server = mockito::Server::new();
        server
            .mock("DELETE", "/a/projects/demo/labels/Verified")
            .with_status(403)
            .with_body("write refs/meta/config not permitted")
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let err = Labels::new("demo".to_string(), &gerrit)
            .delete("Verified")
            .unwrap_err();
        assert!(matches!(err, crate::GerritError::Auth(_)));
    }
}
