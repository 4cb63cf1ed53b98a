//
//  gerrit-client
//  changes/drafts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Draft comments of a revision, owned by the calling user. Same
//! map-of-file-paths listing shape as published comments.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;

/// Declared fields of a draft comment record.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftInfo {
    /// URL-encoded draft id.
    pub id: String,
    /// File path; injected from the listing key, absent on single-draft
    /// responses.
    #[serde(default)]
    pub path: Option<String>,
    /// Line the draft applies to.
    #[serde(default)]
    pub line: Option<i64>,
    /// Draft text.
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the thread is unresolved.
    #[serde(default)]
    pub unresolved: Option<bool>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated: Option<String>,
}

impl Entity for DraftInfo {
    const KIND: &'static str = "draft";
    const FIELDS: &'static [&'static str] =
        &["id", "path", "line", "message", "unresolved", "updated"];
}

/// A typed handle for one draft comment.
pub struct Draft<'g> {
    /// The hydrated draft record.
    pub info: DraftInfo,
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> Draft<'g> {
    pub(crate) fn new(
        info: DraftInfo,
        change: String,
        revision: String,
        gerrit: &'g GerritClient,
    ) -> Self {
        Self {
            info,
            change,
            revision,
            gerrit,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "/changes/{}/revisions/{}/drafts/{}",
            self.change, self.revision, self.info.id
        )
    }

    /// Updates the draft, storing the server's record locally.
    ///
    /// `input` is the CommentInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#comment-input>
    pub fn update(&mut self, input: &Value) -> Result<(), GerritError> {
        let endpoint = self.endpoint();
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        self.info = hydrate(value)?;
        Ok(())
    }

    /// Deletes the draft.
    pub fn delete(&self) -> Result<(), GerritError> {
        self.gerrit.delete(&self.endpoint())?;
        Ok(())
    }
}

/// Entry point for the draft comments of one revision.
pub struct Drafts<'g> {
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> Drafts<'g> {
    pub(crate) fn new(change: String, revision: String, gerrit: &'g GerritClient) -> Self {
        Self {
            change,
            revision,
            gerrit,
        }
    }

    /// Lists the calling user's drafts on the revision, across all
    /// files.
    pub fn list(&self) -> Result<Vec<Draft<'g>>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/drafts",
            self.change, self.revision
        );
        let value = self.gerrit.get_json(&endpoint)?;
        let map = match value {
            Value::Object(map) => map,
            _ => {
                return Err(GerritError::Payload {
                    expected: "json object",
                    url: endpoint,
                })
            }
        };
        let mut drafts = Vec::new();
        for (path, group) in map {
            let rows = match group {
                Value::Array(rows) => rows,
                _ => continue,
            };
            for mut record in rows {
                if let Some(fields) = record.as_object_mut() {
                    fields.insert("path".to_string(), Value::String(path.clone()));
                }
                drafts.push(Draft::new(
                    hydrate(record)?,
                    self.change.clone(),
                    self.revision.clone(),
                    self.gerrit,
                ));
            }
        }
        Ok(drafts)
    }

    /// Retrieves one draft by id.
    pub fn get(&self, id: &str) -> Result<Draft<'g>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/drafts/{}",
            self.change, self.revision, id
        );
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Draft::new(
            hydrate(value)?,
            self.change.clone(),
            self.revision.clone(),
            self.gerrit,
        ))
    }

    /// Creates a draft on the revision.
    ///
    /// `input` is the CommentInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#comment-input>
    pub fn create(&self, input: &Value) -> Result<Draft<'g>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/drafts",
            self.change, self.revision
        );
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        Ok(Draft::new(
            hydrate(value)?,
            self.change.clone(),
            self.revision.clone(),
            self.gerrit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;
    use serde_json::json;

    #[test]
    fn test_create_puts_the_input_and_hydrates_the_draft() {
        let mut server = mockito::Server::new();
        let put = server
            .mock("PUT", "/a/changes/demo~main~I1/revisions/current/drafts")
            .match_body(mockito::Matcher::Json(json!({
                "path": "src/lib.rs",
                "line": 5,
                "message": "rename this"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"id": "daf02827_a8b56ef2", "line": 5, "message": "rename this",
                    "updated": "2026-08-23 10:00:00.000000000"}"#
            ))
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let drafts = Drafts::new("demo~main~I1".to_string(), "current".to_string(), &gerrit);
        let draft = drafts
            .create(&json!({
                "path": "src/lib.rs",
                "line": 5,
                "message": "rename this"
            }))
            .unwrap();
        assert_eq!(draft.info.id, "daf02827_a8b56ef2");
        put.assert();
    }

    #[test]
    fn test_update_stores_the_servers_record() {
        let mut server = mockito::Server::new();
        server
            .mock(
                "PUT",
                "/a/changes/demo~main~I1/revisions/current/drafts/daf02827_a8b56ef2",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"id": "daf02827_a8b56ef2", "message": "rename this field", "unresolved": true}"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let info: DraftInfo =
            serde_json::from_value(json!({ "id": "daf02827_a8b56ef2", "message": "rename this" }))
                .unwrap();
        let mut draft = Draft::new(
            info,
            "demo~main~I1".to_string(),
            "current".to_string(),
            &gerrit,
        );
        draft
            .update(&json!({ "message": "rename this field", "unresolved": true }))
            .unwrap();
        assert_eq!(draft.info.message.as_deref(), Some("rename this field"));
        assert_eq!(draft.info.unresolved, Some(true));
    }
}
