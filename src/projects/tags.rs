//
//  gerrit-client
//  projects/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The `refs/tags/` collection of a project. Same cache lifecycle as
//! branches; see [`crate::collection`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::collection::{RefCache, RefCollection};
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;

/// The prefix every tag ref carries.
pub const TAG_PREFIX: &str = "refs/tags/";

/// Declared fields of a tag record.
#[derive(Debug, Clone, Deserialize)]
pub struct TagInfo {
    /// Fully-qualified ref, e.g. `refs/tags/v1.0`.
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// The tagged commit (annotated tags) or the commit itself.
    #[serde(default)]
    pub object: Option<String>,
    /// Annotation message.
    #[serde(default)]
    pub message: Option<String>,
    /// The commit the ref points to.
    #[serde(default)]
    pub revision: Option<String>,
    /// Tagger identity for annotated tags.
    #[serde(default)]
    pub tagger: Option<Value>,
}

impl Entity for TagInfo {
    const KIND: &'static str = "tag";
    const FIELDS: &'static [&'static str] = &["ref", "object", "message", "revision", "tagger"];
}

/// The TagInput entity for [`Tags::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#tag-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagInput {
    /// The commit to tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Annotation message; presence makes the tag annotated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A typed handle for one tag, contextualized with its project.
#[derive(Debug)]
pub struct Tag<'g> {
    /// The hydrated tag record.
    pub info: TagInfo,
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Tag<'g> {
    pub(crate) fn new(info: TagInfo, project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            project,
            gerrit,
        }
    }

    /// The tag name with the `refs/tags/` prefix stripped.
    pub fn name(&self) -> &str {
        self.info
            .ref_name
            .strip_prefix(TAG_PREFIX)
            .unwrap_or(&self.info.ref_name)
    }

    /// Deletes the tag.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/tags/{}", self.project, self.name());
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// The cache-coherent tag collection of one project.
pub struct Tags<'g> {
    project: String,
    gerrit: &'g GerritClient,
    cache: RefCache<TagInfo>,
}

impl RefCollection for Tags<'_> {
    type Info = TagInfo;

    fn ref_prefix(&self) -> &'static str {
        TAG_PREFIX
    }

    fn resource_kind(&self) -> &'static str {
        "tag"
    }

    fn poll(&self) -> Result<Vec<TagInfo>, GerritError> {
        let endpoint = format!("/projects/{}/tags/", self.project);
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
        hydrate_list::<TagInfo>(rows)
    }

    fn ref_name(info: &TagInfo) -> &str {
        &info.ref_name
    }

    fn cache(&mut self) -> &mut RefCache<TagInfo> {
        &mut self.cache
    }
}

impl<'g> Tags<'g> {
    pub(crate) fn new(project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            project,
            gerrit,
            cache: RefCache::new(),
        }
    }

    /// Gets a tag by fully-qualified ref (`refs/tags/...`).
    pub fn get(&mut self, ref_name: &str) -> Result<Tag<'g>, GerritError> {
        let info = self.find(ref_name)?;
        Ok(Tag::new(info, self.project.clone(), self.gerrit))
    }

    /// Iterates over hydrated handles for the cached snapshot.
    pub fn iter(&mut self) -> Result<impl Iterator<Item = Tag<'g>> + '_, GerritError> {
        self.fill()?;
        let project = self.project.clone();
        let gerrit = self.gerrit;
        Ok(self
            .cache
            .entries()
            .iter()
            .map(move |info| Tag::new(info.clone(), project.clone(), gerrit)))
    }

    /// Creates a new tag on the project, short-circuiting to the cached
    /// entry when `refs/tags/{name}` already exists in the snapshot.
    pub fn create(&mut self, name: &str, input: &TagInput) -> Result<Tag<'g>, GerritError> {
        let ref_name = format!("{TAG_PREFIX}{name}");
        if self.contains(&ref_name)? {
            return self.get(&ref_name);
        }

        let endpoint = format!("/projects/{}/tags/{}", self.project, name);
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        self.invalidate();
        Ok(Tag::new(hydrate(value)?, self.project.clone(), self.gerrit))
    }

    /// Deletes a tag by fully-qualified ref and clears the cache.
    pub fn delete(&mut self, ref_name: &str) -> Result<(), GerritError> {
        self.get(ref_name)?.delete()?;
        self.invalidate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GerritClient;

    #[test]
    fn test_tag_create_and_invalidation() {
        let mut server = mockito::Server::new();
        let listing = server
            .mock("GET", "/a/projects/demo/tags/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n[{\"ref\": \"refs/tags/v1.0\", \"revision\": \"aaa111\"}]")
            .expect(1)
            .create();
        let put = server
            .mock("PUT", "/a/projects/demo/tags/v1.1")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"ref\": \"refs/tags/v1.1\", \"revision\": \"bbb222\", \"message\": \"release\"}")
            .expect(1)
            .create();

        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut tags = Tags::new("demo".to_string(), &gerrit);

        let input = TagInput {
            revision: Some("bbb222".to_string()),
            message: Some("release".to_string()),
        };
        let tag = tags.create("v1.1", &input).unwrap();
        assert_eq!(tag.name(), "v1.1");
        assert_eq!(tag.info.message.as_deref(), Some("release"));
        assert!(!tags.cache.is_populated());

        listing.assert();
        put.assert();
    }

    #[test]
    fn test_tag_get_rejects_branch_refs() {
        let server = mockito::Server::new();
        let gerrit = GerritClient::builder(server.url()).build().unwrap();
        let mut tags = Tags::new("demo".to_string(), &gerrit);

        match tags.get("refs/heads/main").unwrap_err() {
            GerritError::InvalidRef { kind, prefix, name } => {
                assert_eq!(kind, "tag");
                assert_eq!(prefix, TAG_PREFIX);
                assert_eq!(name, "refs/heads/main");
            }
            other => panic!("expected InvalidRef, got {other:?}"),
        }
        drop(server);
    }
}
