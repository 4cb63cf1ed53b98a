//
//  gerrit-client
//  projects/dashboards.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Custom dashboards of a project. A dashboard can be defined on the
//! project itself or inherited from a parent project.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// Declared fields of a dashboard record.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardInfo {
    /// Dashboard id, `<ref>:<path>` within `refs/meta/dashboards/*`.
    pub id: String,
    /// The ref the dashboard is defined on.
    #[serde(default, rename = "ref")]
    pub ref_name: Option<String>,
    /// Path of the dashboard file within the ref.
    #[serde(default)]
    pub path: Option<String>,
    /// Dashboard description.
    #[serde(default)]
    pub description: Option<String>,
    /// URL under which the dashboard can be opened.
    #[serde(default)]
    pub url: Option<String>,
    /// Whether this is the project's default dashboard.
    #[serde(default)]
    pub is_default: Option<bool>,
    /// Dashboard title.
    #[serde(default)]
    pub title: Option<String>,
    /// The sections of the dashboard.
    #[serde(default)]
    pub sections: Option<Value>,
}

impl Entity for DashboardInfo {
    const KIND: &'static str = "dashboard";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "ref",
        "path",
        "description",
        "url",
        "is_default",
        "title",
        "sections",
    ];
}

/// A typed handle for one dashboard, contextualized with its project.
pub struct Dashboard<'g> {
    /// The hydrated dashboard record.
    pub info: DashboardInfo,
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Dashboard<'g> {
    pub(crate) fn new(info: DashboardInfo, project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            project,
            gerrit,
        }
    }

    /// Deletes the dashboard from the project.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/dashboards/{}", self.project, self.info.id);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the dashboards of one project.
pub struct Dashboards<'g> {
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Dashboards<'g> {
    pub(crate) fn new(project: String, gerrit: &'g GerritClient) -> Self {
        Self { project, gerrit }
    }

    /// Lists the custom dashboards of the project.
    pub fn list(&self) -> Result<Vec<Dashboard<'g>>, GerritError> {
        let endpoint = format!("/projects/{}/dashboards/", self.project);
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
        let infos = hydrate_list::<DashboardInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Dashboard::new(info, self.project.clone(), self.gerrit))
            .collect())
    }

    /// Retrieves one dashboard, defined on the project or inherited.
    pub fn get(&self, id: &str) -> Result<Dashboard<'g>, GerritError> {
        let endpoint = format!("/projects/{}/dashboards/{}", self.project, id);
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Dashboard::new(
            hydrate(value)?,
            self.project.clone(),
            self.gerrit,
        ))
    }

    /// Creates (or updates) a dashboard on the project.
    ///
    /// `input` is the DashboardInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#dashboard-input>
    pub fn create(&self, id: &str, input: &Value) -> Result<Dashboard<'g>, GerritError> {
        let endpoint = format!("/projects/{}/dashboards/{}", self.project, id);
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Dashboard::new(
            hydrate(value)?,
            self.project.clone(),
            self.gerrit,
        ))
    }

    /// Deletes one dashboard by id.
    pub fn delete(&self, id: &str) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/dashboards/{}", self.project, id);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}
