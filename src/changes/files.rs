//
//  gerrit-client
//  changes/files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The file collection of a revision.
//!
//! The server lists files as a JSON object keyed by path, so the bulk
//! fetch injects each key into its record before hydration. File paths
//! are arbitrary strings, hence the empty ref prefix.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GerritClient;
use crate::collection::{RefCache, RefCollection};
use crate::entity::{hydrate, Entity};
use crate::error::GerritError;
use crate::util::escape_path_segment;

/// Declared fields of a file record. `path` is injected from the
/// listing key.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    /// Repository path of the file.
    pub path: String,
    /// Lines deleted by the patch set.
    #[serde(default)]
    pub lines_deleted: Option<i64>,
    /// Lines inserted by the patch set.
    #[serde(default)]
    pub lines_inserted: Option<i64>,
    /// File size in bytes after the patch set.
    #[serde(default)]
    pub size: Option<i64>,
    /// Size delta in bytes against the parent.
    #[serde(default)]
    pub size_delta: Option<i64>,
    /// `A`dded, `D`eleted, `R`enamed, `C`opied or `W` (rewritten);
    /// absent for modified files.
    #[serde(default)]
    pub status: Option<String>,
    /// Previous path for renamed or copied files.
    #[serde(default)]
    pub old_path: Option<String>,
}

impl Entity for FileInfo {
    const KIND: &'static str = "file";
    const FIELDS: &'static [&'static str] = &[
        "path",
        "lines_deleted",
        "lines_inserted",
        "size",
        "size_delta",
        "status",
        "old_path",
    ];
}

/// A typed handle for one file of a revision.
#[derive(Debug)]
pub struct File<'g> {
    /// The hydrated file record.
    pub info: FileInfo,
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
}

impl<'g> File<'g> {
    pub(crate) fn new(
        info: FileInfo,
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

    fn endpoint(&self, tail: &str) -> String {
        format!(
            "/changes/{}/revisions/{}/files/{}/{}",
            self.change,
            self.revision,
            escape_path_segment(&self.info.path),
            tail,
        )
    }

    /// Gets the content of the file as the base64 string the server
    /// returns.
    pub fn content(&self) -> Result<String, GerritError> {
        let endpoint = self.endpoint("content");
        self.gerrit.get_string(&endpoint)
    }

    /// Downloads the content in a safe format: verbatim for safe
    /// content types, wrapped in a ZIP archive otherwise.
    pub fn download(&self) -> Result<String, GerritError> {
        let endpoint = self.endpoint("download");
        self.gerrit.get_string(&endpoint)
    }

    /// Gets the diff of the file, optionally with intraline
    /// differences.
    pub fn diff(&self, intraline: bool) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("diff");
        if intraline {
            self.gerrit
                .get_json_query(&endpoint, &[("intraline", "")])
        } else {
            self.gerrit.get_json(&endpoint)
        }
    }

    /// Gets the blame of the file.
    pub fn blame(&self) -> Result<Value, GerritError> {
        let endpoint = self.endpoint("blame");
        self.gerrit.get_json(&endpoint)
    }

    /// Marks the file as reviewed by the calling user.
    pub fn set_reviewed(&self) -> Result<(), GerritError> {
        let endpoint = self.endpoint("reviewed");
        self.gerrit.put_empty(&endpoint)?;
        Ok(())
    }

    /// Clears the calling user's reviewed flag on the file.
    pub fn delete_reviewed(&self) -> Result<(), GerritError> {
        let endpoint = self.endpoint("reviewed");
        self.gerrit.delete(&endpoint)?;
        Ok(())
    }
}

/// The cache-coherent file collection of one revision.
///
/// Read-only: files come and go with patch sets, never through this
/// collection, so there is no `create`.
pub struct Files<'g> {
    change: String,
    revision: String,
    gerrit: &'g GerritClient,
    cache: RefCache<FileInfo>,
}

impl RefCollection for Files<'_> {
    type Info = FileInfo;

    fn ref_prefix(&self) -> &'static str {
        ""
    }

    fn resource_kind(&self) -> &'static str {
        "file"
    }

    fn poll(&self) -> Result<Vec<FileInfo>, GerritError> {
        let endpoint = format!(
            "/changes/{}/revisions/{}/files",
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
        let mut infos = Vec::with_capacity(map.len());
        for (path, mut record) in map {
            if let Some(fields) = record.as_object_mut() {
                fields.insert("path".to_string(), Value::String(path));
            }
            infos.push(hydrate::<FileInfo>(record)?);
        }
        Ok(infos)
    }

    fn ref_name(info: &FileInfo) -> &str {
        &info.path
    }

    fn cache(&mut self) -> &mut RefCache<FileInfo> {
        &mut self.cache
    }
}

impl<'g> Files<'g> {
    pub(crate) fn new(change: String, revision: String, gerrit: &'g GerritClient) -> Self {
        Self {
            change,
            revision,
            gerrit,
            cache: RefCache::new(),
        }
    }

    /// Gets a file by path.
    pub fn get(&mut self, path: &str) -> Result<File<'g>, GerritError> {
        let info = self.find(path)?;
        Ok(File::new(
            info,
            self.change.clone(),
            self.revision.clone(),
            self.gerrit,
        ))
    }

    /// Iterates over hydrated handles for the cached snapshot.
    pub fn iter(&mut self) -> Result<impl Iterator<Item = File<'g>> + '_, GerritError> {
        self.fill()?;
        let change = self.change.clone();
        let revision = self.revision.clone();
        let gerrit = self.gerrit;
        Ok(self.cache.entries().iter().map(move |info| {
            File::new(info.clone(), change.clone(), revision.clone(), gerrit)
        }))
    }
}
