//
//  gerrit-client
//  projects/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Project Resources
//!
//! Listing, searching and creating projects, plus the per-project
//! handle with its branch/tag collections, dashboards and labels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

mod branches;
mod commit;
mod dashboards;
mod labels;
mod project;
mod tags;

pub use branches::{Branch, BranchInfo, BranchInput, Branches, BRANCH_PREFIX};
pub use commit::{Commit, CommitInfo};
pub use dashboards::{Dashboard, DashboardInfo, Dashboards};
pub use labels::{Label, LabelInfo, Labels};
pub use project::Project;
pub use tags::{Tag, TagInfo, TagInput, Tags, TAG_PREFIX};

/// Declared fields of a project record.
///
/// Values are populated only for keys present in both the server JSON
/// and this schema; everything else the server sends is dropped with a
/// diagnostic.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    /// URL-encoded project name, used to address project endpoints.
    pub id: String,
    /// Display name of the project.
    #[serde(default)]
    pub name: Option<String>,
    /// Project state (`ACTIVE`, `READ_ONLY`, `HIDDEN`).
    #[serde(default)]
    pub state: Option<String>,
    /// Links to the project in external sites.
    #[serde(default)]
    pub web_links: Option<Value>,
}

impl Entity for ProjectInfo {
    const KIND: &'static str = "project";
    const FIELDS: &'static [&'static str] = &["id", "name", "state", "web_links"];
}

/// The ProjectInput entity for [`Projects::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#project-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_empty_commit: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub branches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub owners: Vec<String>,
}

/// Entry point for `/projects/` endpoints.
pub struct Projects<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Projects<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Lists the projects accessible by the caller.
    pub fn list(&self) -> Result<Vec<Project<'g>>, GerritError> {
        let endpoint = "/projects/?all";
        let value = self.gerrit.get_json(endpoint)?;
        // The listing is a map of project name to ProjectInfo.
        let rows = match value {
            Value::Object(map) => map.into_iter().map(|(_, row)| row).collect(),
            _ => {
                return Err(GerritError::Payload {
                    expected: "json object",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<ProjectInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Project::new(info, self.gerrit))
            .collect())
    }

    /// Queries projects visible to the caller, e.g. `name:demo` or
    /// `state:active`.
    pub fn search(&self, query: &str) -> Result<Vec<Project<'g>>, GerritError> {
        let endpoint = "/projects/";
        let value = self.gerrit.get_json_query(endpoint, &[("query", query)])?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<ProjectInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Project::new(info, self.gerrit))
            .collect())
    }

    /// Retrieves a project by name.
    pub fn get(&self, project_name: &str) -> Result<Project<'g>, GerritError> {
        let endpoint = format!("/projects/{project_name}");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Project::new(hydrate(value)?, self.gerrit))
    }

    /// Creates a new project.
    pub fn create(
        &self,
        project_name: &str,
        input: &ProjectInput,
    ) -> Result<Project<'g>, GerritError> {
        let endpoint = format!("/projects/{project_name}");
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Project::new(hydrate(value)?, self.gerrit))
    }
}
