//
//  gerrit-client
//  projects/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Branch Collection
//!
//! The `refs/heads/` collection of a project. One bulk listing call
//! backs all lookups; the cache is cleared whenever a create or delete
//! through the collection succeeds. The special `refs/meta/config`
//! branch is filtered out of listings.
//!
//! # Example
//!
//! ```rust,no_run
//! use gerrit_client::{BranchInput, GerritClient, RefCollection};
//!
//! let gerrit = GerritClient::builder("https://gerrit.example.com")
//!     .basic_auth("admin", "secret")
//!     .build()?;
//!
//! let project = gerrit.projects().get("demo")?;
//! let mut branches = project.branches();
//!
//! let input = BranchInput {
//!     revision: Some("76016386a0d8ecc7b6be212424978bb45959d668".to_string()),
//!     ..Default::default()
//! };
//! let stable = branches.create("stable", &input)?;
//! println!("created {}", stable.name());
//! # Ok::<(), gerrit_client::GerritError>(())
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GerritClient;
use crate::collection::{RefCache, RefCollection};
use crate::entity::{hydrate, hydrate_list, Entity};
use crate::error::GerritError;
use crate::util::escape_path_segment;

/// The prefix every branch ref carries.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Gerrit's per-project configuration branch, hidden from listings.
const META_CONFIG_REF: &str = "refs/meta/config";

/// Declared fields of a branch record.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchInfo {
    /// Fully-qualified ref, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// The commit the branch points to.
    #[serde(default)]
    pub revision: Option<String>,
    /// Whether the calling user can delete the branch.
    #[serde(default)]
    pub can_delete: Option<bool>,
    /// Links to the branch in external sites.
    #[serde(default)]
    pub web_links: Option<Value>,
}

impl Entity for BranchInfo {
    const KIND: &'static str = "branch";
    const FIELDS: &'static [&'static str] = &["ref", "revision", "can_delete", "web_links"];
}

/// The BranchInput entity for [`Branches::create`].
///
/// <https://gerrit-review.googlesource.com/Documentation/rest-api-projects.html#branch-input>
#[derive(Debug, Clone, Default, Serialize)]
pub struct BranchInput {
    /// The commit the new branch should point to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Explicit ref, when different from the name in the URL.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
}

/// A typed handle for one branch, contextualized with its project.
#[derive(Debug)]
pub struct Branch<'g> {
    /// The hydrated branch record.
    pub info: BranchInfo,
    project: String,
    gerrit: &'g GerritClient,
}

impl<'g> Branch<'g> {
    pub(crate) fn new(info: BranchInfo, project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            info,
            project,
            gerrit,
        }
    }

    /// The branch name with the `refs/heads/` prefix stripped.
    pub fn name(&self) -> &str {
        self.info
            .ref_name
            .strip_prefix(BRANCH_PREFIX)
            .unwrap_or(&self.info.ref_name)
    }

    /// Gets the content of a file from the HEAD revision of the branch,
    /// as the base64 string the server returns.
    pub fn file_content(&self, path: &str) -> Result<String, GerritError> {
        let endpoint = format!(
            "/projects/{}/branches/{}/files/{}/content",
            self.project,
            self.name(),
            escape_path_segment(path),
        );
        self.gerrit.get_string(&endpoint)
    }

    /// Like [`file_content`](Self::file_content), decoded to bytes.
    pub fn file_content_decoded(&self, path: &str) -> Result<Vec<u8>, GerritError> {
        let encoded = self.file_content(path)?;
        BASE64
            .decode(encoded.trim().as_bytes())
            .map_err(|_| GerritError::Payload {
                expected: "base64",
                url: format!(
                    "/projects/{}/branches/{}/files/{}/content",
                    self.project,
                    self.name(),
                    escape_path_segment(path),
                ),
            })
    }

    /// Gets whether `source` is mergeable into this branch.
    pub fn mergeable(&self, source: &str, strategy: Option<&str>) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/branches/{}/mergeable", self.project, self.name());
        let mut query = vec![("source", source)];
        if let Some(strategy) = strategy {
            query.push(("strategy", strategy));
        }
        self.gerrit.get_json_query(&endpoint, &query)
    }

    /// Gets the reflog of the branch.
    pub fn reflog(&self) -> Result<Value, GerritError> {
        let endpoint = format!("/projects/{}/branches/{}/reflog", self.project, self.name());
        self.gerrit.get_json(&endpoint)
    }

    /// Deletes the branch.
    pub fn delete(&self) -> Result<(), GerritError> {
        let endpoint = format!("/projects/{}/branches/{}", self.project, self.name());
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// The cache-coherent branch collection of one project.
pub struct Branches<'g> {
    project: String,
    gerrit: &'g GerritClient,
    cache: RefCache<BranchInfo>,
}

impl RefCollection for Branches<'_> {
    type Info = BranchInfo;

    fn ref_prefix(&self) -> &'static str {
        BRANCH_PREFIX
    }

    fn resource_kind(&self) -> &'static str {
        "branch"
    }

    fn poll(&self) -> Result<Vec<BranchInfo>, GerritError> {
        let endpoint = format!("/projects/{}/branches/", self.project);
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
        let mut infos = hydrate_list::<BranchInfo>(rows)?;
        infos.retain(|info| info.ref_name != META_CONFIG_REF);
        Ok(infos)
    }

    fn ref_name(info: &BranchInfo) -> &str {
        &info.ref_name
    }

    fn cache(&mut self) -> &mut RefCache<BranchInfo> {
        &mut self.cache
    }
}

impl<'g> Branches<'g> {
    pub(crate) fn new(project: String, gerrit: &'g GerritClient) -> Self {
        Self {
            project,
            gerrit,
            cache: RefCache::new(),
        }
    }

    /// Gets a branch by fully-qualified ref (`refs/heads/...`).
    ///
    /// Fails with [`GerritError::InvalidRef`] when the prefix is
    /// missing and [`GerritError::UnknownRef`] when the snapshot has no
    /// such branch.
    pub fn get(&mut self, ref_name: &str) -> Result<Branch<'g>, GerritError> {
        let info = self.find(ref_name)?;
        Ok(Branch::new(info, self.project.clone(), self.gerrit))
    }

    /// Iterates over hydrated handles for the cached snapshot.
    /// Re-iterating after an invalidation re-fetches.
    pub fn iter(&mut self) -> Result<impl Iterator<Item = Branch<'g>> + '_, GerritError> {
        self.fill()?;
        let project = self.project.clone();
        let gerrit = self.gerrit;
        Ok(self
            .cache
            .entries()
            .iter()
            .map(move |info| Branch::new(info.clone(), project.clone(), gerrit)))
    }

    /// Creates a new branch.
    ///
    /// When `refs/heads/{name}` already exists in the cached snapshot
    /// the existing handle is returned without any server call. Note
    /// the snapshot may be stale if another actor mutated the server
    /// concurrently; call [`invalidate`](RefCollection::invalidate)
    /// first to force a re-fetch.
    pub fn create(&mut self, name: &str, input: &BranchInput) -> Result<Branch<'g>, GerritError> {
        let ref_name = format!("{BRANCH_PREFIX}{name}");
        if self.contains(&ref_name)? {
            return self.get(&ref_name);
        }

        let endpoint = format!("/projects/{}/branches/{}", self.project, name);
        let value = self.gerrit.put_json(&endpoint, input)?.into_json(&endpoint)?;
        self.invalidate();
        Ok(Branch::new(
            hydrate(value)?,
            self.project.clone(),
            self.gerrit,
        ))
    }

    /// Deletes a branch by fully-qualified ref and clears the cache.
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

    const LISTING: &str = concat!(
        ")]}'\n",
        r#"[
            {"ref": "refs/heads/main", "revision": "aaa111", "can_delete": false},
            {"ref": "refs/meta/config", "revision": "ccc333"},
            {"ref": "refs/heads/stable", "revision": "bbb222", "can_delete": true}
        ]"#
    );

    fn client(server: &mockito::Server) -> GerritClient {
        GerritClient::builder(server.url())
            .basic_auth("admin", "secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_listing_is_fetched_once_and_meta_config_is_hidden() {
        let mut server = mockito::Server::new();
        let listing = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .expect(1)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);

        assert_eq!(
            branches.keys().unwrap(),
            vec!["refs/heads/main", "refs/heads/stable"]
        );
        assert_eq!(branches.len().unwrap(), 2);
        assert!(!branches.contains("refs/meta/config").unwrap());
        assert!(branches.contains("refs/heads/stable").unwrap());

        listing.assert();
    }

    #[test]
    fn test_get_requires_prefix_and_never_reaches_the_network() {
        let mut server = mockito::Server::new();
        let listing = server
            .mock("GET", "/a/projects/demo/branches/")
            .expect(0)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);

        let err = branches.get("main").unwrap_err();
        assert!(matches!(err, GerritError::InvalidRef { .. }));

        listing.assert();
    }

    #[test]
    fn test_get_unknown_ref_names_the_ref() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);

        match branches.get("refs/heads/gone").unwrap_err() {
            GerritError::UnknownRef { kind, name } => {
                assert_eq!(kind, "branch");
                assert_eq!(name, "refs/heads/gone");
            }
            other => panic!("expected UnknownRef, got {other:?}"),
        }
    }

    #[test]
    fn test_create_short_circuits_on_cached_ref() {
        let mut server = mockito::Server::new();
        let listing = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .expect(1)
            .create();
        let put = server
            .mock("PUT", "/a/projects/demo/branches/stable")
            .expect(0)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);

        let existing = branches
            .create("stable", &BranchInput::default())
            .unwrap();
        assert_eq!(existing.info.ref_name, "refs/heads/stable");
        assert_eq!(existing.info.revision.as_deref(), Some("bbb222"));

        listing.assert();
        put.assert();
    }

    #[test]
    fn test_create_invalidates_cache_so_next_listing_shows_the_branch() {
        let mut server = mockito::Server::new();
        let before = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .expect(1)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);
        assert!(!branches.contains("refs/heads/feature").unwrap());

        before.remove();
        let put = server
            .mock("PUT", "/a/projects/demo/branches/feature")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"ref\": \"refs/heads/feature\", \"revision\": \"ddd444\"}")
            .expect(1)
            .create();
        let after = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(concat!(
                ")]}'\n",
                r#"[
                    {"ref": "refs/heads/main", "revision": "aaa111"},
                    {"ref": "refs/heads/stable", "revision": "bbb222"},
                    {"ref": "refs/heads/feature", "revision": "ddd444"}
                ]"#
            ))
            .expect(1)
            .create();

        let created = branches
            .create("feature", &BranchInput::default())
            .unwrap();
        assert_eq!(created.info.revision.as_deref(), Some("ddd444"));
        assert!(branches.contains("refs/heads/feature").unwrap());

        put.assert();
        after.assert();
    }

    #[test]
    fn test_delete_invalidates_cache_and_one_refetch_reflects_it() {
        let mut server = mockito::Server::new();
        let before = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .expect(1)
            .create();
        let delete = server
            .mock("DELETE", "/a/projects/demo/branches/stable")
            .with_status(204)
            .expect(1)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);
        branches.delete("refs/heads/stable").unwrap();

        before.remove();
        let after = server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(")]}'\n[{\"ref\": \"refs/heads/main\", \"revision\": \"aaa111\"}]")
            .expect(1)
            .create();

        assert!(!branches.contains("refs/heads/stable").unwrap());
        assert_eq!(branches.len().unwrap(), 1);

        delete.assert();
        after.assert();
    }

    #[test]
    fn test_iter_yields_contextualized_handles() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/a/projects/demo/branches/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create();

        let gerrit = client(&server);
        let mut branches = Branches::new("demo".to_string(), &gerrit);
        let names: Vec<String> = branches
            .iter()
            .unwrap()
            .map(|branch| branch.name().to_string())
            .collect();
        assert_eq!(names, ["main", "stable"]);
    }
}
