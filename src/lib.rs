//
//  gerrit-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Gerrit Client Library
//!
//! A typed, synchronous client for the Gerrit Code Review REST API.
//!
//! ## Overview
//!
//! This library wraps Gerrit's REST endpoints behind typed resource
//! handles: a root [`GerritClient`] hands out entry points for
//! projects, changes, accounts, groups and server configuration, and
//! each entry point hydrates server responses into typed records that
//! keep a borrow of the client for follow-up calls.
//!
//! ## Features
//!
//! - **Authenticated Transport**: Basic auth over the `/a` endpoint
//!   prefix, anti-XSSI sentinel stripping, bounded retries for
//!   connection failures
//! - **Typed Entities**: Allow-list hydration keeps declared fields and
//!   drops unknown server keys without failing
//! - **Cache-Coherent Collections**: Branches, tags and revision files
//!   are fetched in bulk once and invalidated on every mutation
//! - **Classified Errors**: Every HTTP error status maps to a distinct
//!   [`GerritError`] variant carrying the full server reply
//! - **Opaque Payloads**: Review-workflow inputs and outputs pass
//!   through as [`serde_json::Value`], never re-interpreted
//!
//! ## Module Structure
//!
//! - [`client`]: The root client and its builder
//! - [`transport`]: HTTP session, retries, response decoding
//! - [`entity`]: Allow-list hydration of typed records
//! - [`collection`]: The generic cached ref-collection contract
//! - [`error`]: Error classification
//! - [`projects`], [`changes`], [`accounts`], [`groups`], [`config`]:
//!   the resource families
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gerrit_client::{BranchInput, GerritClient};
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
//! let branch = branches.create("stable-3.11", &input)?;
//! println!("created {}", branch.name());
//! # Ok::<(), gerrit_client::GerritError>(())
//! ```

/// The root client and its builder.
///
/// [`GerritClient`] owns the HTTP session and the base URL, inserts the
/// authenticated `/a` path segment into every endpoint, and hands out
/// the typed resource entry points.
pub mod client;

/// The generic cache-coherent ref-collection contract.
///
/// Branch, tag and file collections share one lifecycle: empty until
/// first read, populated by a single bulk fetch, and invalidated by any
/// successful mutation.
pub mod collection;

/// Allow-list hydration of typed records.
///
/// Server responses routinely carry more fields than a client release
/// knows about; hydration keeps the declared fields and drops the rest
/// with a debug log instead of failing.
pub mod entity;

/// Error classification.
///
/// HTTP error statuses are classified exactly once, at the transport,
/// into variants carrying the full [`error::HttpReply`].
pub mod error;

/// HTTP transport: session, authentication, retries, decoding.
pub mod transport;

/// Project resources: `/projects/`, branches, tags, commits,
/// dashboards, labels.
pub mod projects;

/// Change resources: `/changes/`, reviewers, revisions, files,
/// comments, drafts, the change edit.
pub mod changes;

/// Account resources: `/accounts/`, SSH keys, emails, GPG keys.
pub mod accounts;

/// Group resources: `/groups/`, members, subgroups.
pub mod groups;

/// Server configuration resources: `/config/server/`, tasks, caches.
pub mod config;

pub(crate) mod util;

pub use accounts::{
    Account, AccountInfo, AccountInput, Accounts, Email, EmailInfo, Emails, GpgKey, GpgKeyInfo,
    GpgKeys, SshKeyInfo,
};
pub use changes::{
    Change, ChangeInfo, ChangeInput, Changes, Comment, CommentInfo, Comments, Draft, DraftInfo,
    Drafts, Edit, EditInfo, File, FileInfo, Files, Reviewer, ReviewerInfo, Reviewers, Revision,
};
pub use client::{GerritClient, GerritClientBuilder, AUTH_SUFFIX};
pub use collection::RefCollection;
pub use config::{Cache, CacheInfo, Caches, ServerConfig, Task, TaskInfo, Tasks};
pub use error::{GerritError, HttpReply};
pub use groups::{Group, GroupInfo, GroupInput, Groups};
pub use projects::{
    Branch, BranchInfo, BranchInput, Branches, Commit, CommitInfo, Dashboard, DashboardInfo,
    Dashboards, Label, LabelInfo, Labels, Project, ProjectInfo, ProjectInput, Projects, Tag,
    TagInfo, TagInput, Tags, BRANCH_PREFIX, TAG_PREFIX,
};
pub use transport::{Decoded, XSSI_PREFIX};

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use gerrit_client::VERSION;
///
/// println!("gerrit-client {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
