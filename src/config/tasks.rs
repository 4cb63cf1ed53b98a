//
//  gerrit-client
//  config/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The background task queue of the server.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// Declared fields of a task record.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInfo {
    /// Task id (hex).
    pub id: String,
    /// `DONE`, `CANCELLED`, `RUNNING`, `READY`, `SLEEPING` or `OTHER`.
    #[serde(default)]
    pub state: Option<String>,
    /// Description of the task.
    #[serde(default)]
    pub command: Option<String>,
    /// Start time of the task.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Work queue the task runs on.
    #[serde(default)]
    pub queue_name: Option<String>,
    /// Remaining delay in milliseconds for sleeping tasks.
    #[serde(default)]
    pub delay: Option<i64>,
}

impl Entity for TaskInfo {
    const KIND: &'static str = "task";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "state",
        "command",
        "start_time",
        "queue_name",
        "delay",
    ];
}

/// A typed handle for one background task.
pub struct Task<'g> {
    /// The hydrated task record.
    pub info: TaskInfo,
    gerrit: &'g GerritClient,
}

impl<'g> Task<'g> {
    pub(crate) fn new(info: TaskInfo, gerrit: &'g GerritClient) -> Self {
        Self { info, gerrit }
    }

    /// Kills the task, removing it from the work queue.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/config/server/tasks/{}", self.info.id);
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// Entry point for the `/config/server/tasks/` endpoints.
pub struct Tasks<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> Tasks<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Lists the tasks the daemon is performing or will perform soon.
    pub fn list(&self) -> Result<Vec<Task<'g>>, GerritError> {
        let endpoint = "/config/server/tasks/";
        let value = self.gerrit.get_json(endpoint)?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json array",
                    url: endpoint.to_string(),
                })
            }
        };
        let infos = hydrate_list::<TaskInfo>(rows)?;
        Ok(infos
            .into_iter()
            .map(|info| Task::new(info, self.gerrit))
            .collect())
    }

    /// Retrieves one task by id.
    pub fn get(&self, id: &str) -> Result<Task<'g>, GerritError> {
        let endpoint = format!("/config/server/tasks/{id}");
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Task::new(hydrate(value)?, self.gerrit))
    }

    /// Kills one task by id.
    pub fn delete(&self, id: &str) -> Result<(), GerritError> {
        self.get(id)?.delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_list_hydrates_task_records() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/config/server/tasks/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"[{"id": "1e688bea", "state": "SLEEPING", "command": "git-upload-pack",
                     "queue_name": "SSH-Interactive-Worker", "delay": 1500}]"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let tasks = gerrit.config().tasks().list().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].info.state.as_deref(), Some("SLEEPING"));
        assert_eq!(tasks[0].info.delay, Some(1500));
    }
}
