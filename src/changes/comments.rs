//
//  gerrit-client
//  changes/comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Published comments of a revision. Listed as a JSON object keyed by
//! file path, each value an array of comments, so the bulk listing
//! injects the path into every record before flattening.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;

/// Declared fields of a published comment record.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentInfo {
    /// URL-encoded comment id.
    pub id: String,
    /// File path; injected from the listing key, absent on single-
    /// comment responses.
    #[serde(default)]
    pub path: Option<String>,
    /// Line the comment applies to; 0 or absent for file comments.
    #[serde(default)]
    pub line: Option<i64>,
    /// Id of the comment this one replies to.
    #[serde(default)]
    pub in_reply_to: Option<String>,
    /// Comment text.
    #[serde(default)]
    pub message: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated: Option<String>,
    /// Author of the comment.
    #[serde(default)]
    pub author: Option<Value>,
}

impl Entity for CommentInfo {
    const KIND: &'static str = "comment";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "path",
        "line",
        "in_reply_to",
        "message",
        "updated",
        "author",
    ];
}

/// A typed handle for one published comment, contextualized with its
/// change and revision.
pub struct Comment<'g> {
    /// The hydrated comment record.
    pub info: CommentInfo,
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> Comment<'g> {
    pub(crate) fn new(
        info: CommentInfo,
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

    /// Deletes the comment. The server keeps the comment and replaces
    /// its message with a deletion notice; the returned record is the
    /// replacement. With an input the removal goes through the `delete`
    /// sub-endpoint, which accepts a reason.
    ///
    /// `input` is the DeleteCommentInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-changes.html#delete-comment-input>
    pub fn delete(&self, input: Option<&Value>) -> Result<CommentInfo, GerritError> {
        let value = match input {
            Some(input) => {
                let endpoint = format!(
                    "/changes/{}/revisions/{}/comments/{}/delete",
                    self.change, self.revision, self.info.id
                );
                self.gerrit.post_json(&endpoint, input)?.into_json(&endpoint)?
            }
            None => {
                let endpoint = format!(
                    "/changes/{}/revisions/{}/comments/{}",
                    self.change, self.revision, self.info.id
                );
                self.gerrit.delete(&endpoint)?.into_json(&endpoint)?
            }
        };
        hydrate(value)
    }
}

/// Entry point for the published comments of one revision.
pub struct Comments<'g> {
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> Comments<'g> {
    pub(crate) fn new(change: String, revision: String, gerrit: &'g GerritClient) -> Self {
        Self {
            change,
            revision,
            gerrit,
        }
    }

    /// Lists the published comments of the revision, across all files.
    pub fn list(&self) -> Result<Vec<Comment<'g>>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/comments",
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
        let mut comments = Vec::new();
        for (path, group) in map {
            let rows = match group {
                Value::Array(rows) => rows,
                _ => continue,
            };
            for mut record in rows {
                if let Some(fields) = record.as_object_mut() {
                    fields.insert("path".to_string(), Value::String(path.clone()));
                }
                comments.push(Comment::new(
                    hydrate(record)?,
                    self.change.clone(),
                    self.revision.clone(),
                    self.gerrit,
                ));
            }
        }
        Ok(comments)
    }

    /// Retrieves one published comment by id.
    pub fn get(&self, id: &str) -> Result<Comment<'g>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/comments/{}",
            self.change, self.revision, id
        );
        let value = self.gerrit.get_json(&endpoint)?;
        Ok(Comment::new(
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
    fn test_list_flattens_the_per_file_groups_and_injects_paths() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/changes/demo~main~I1/revisions/current/comments")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{
                    "src/lib.rs": [
                        {"id": "e167e775_e069567a", "line": 5, "message": "nit"},
                        {"id": "a09b0cdd_2b84e519", "line": 9, "message": "typo"}
                    ],
                    "README.md": [
                        {"id": "b154f1b0_89bd8b71", "message": "file comment"}
                    ]
                }"#
            ))
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let comments = Comments::new("demo~main~I1".to_string(), "current".to_string(), &gerrit)
            .list()
            .unwrap();
        assert_eq!(comments.len(), 3);
        assert!(comments
            .iter()
            .all(|comment| comment.info.path.is_some()));
        assert!(comments
            .iter()
            .any(|comment| comment.info.path.as_deref() == Some("README.md")));
    }

    #[test]
    fn test_delete_with_reason_goes_through_the_sub_endpoint() {
        let mut server = mockito::Server::new();
        let post = server
            .mock(
                "POST",
                "/a/changes/demo~main~I1/revisions/current/comments/e167e775_e069567a/delete",
            )
            .match_body(mockito::Matcher::Json(
                json!({ "reason": "contains confidential information" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"{"id": "e167e775_e069567a", "message": "Comment removed by: admin"}"#
            ))
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let info: CommentInfo =
            serde_json::from_value(json!({ "id": "e167e775_e069567a" })).unwrap();
        let comment = Comment::new(
            info,
            "demo~main~I1".to_string(),
            "current".to_string(),
            &gerrit,
        );
        let replaced = comment
            .delete(Some(&json!({ "reason": "contains confidential information" })))
            .unwrap();
        assert_eq!(
            replaced.message.as_deref(),
            Some("Comment removed by: admin")
        );
        post.assert();
    }
}
