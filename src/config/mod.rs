//
//  gerrit-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Server Configuration Resources
//!
//! Endpoints under `/config/server/`: version, server info, consistency
//! checks, default preferences, plus the background task queue and the
//! server cache registry.

use serde_json::Value;

use crate::client::GerritClient;
use crate::error::GerritError;

mod caches;
mod tasks;

pub use caches::{Cache, CacheInfo, Caches};
pub use tasks::{Task, TaskInfo, Tasks};

/// Entry point for `/config/server/` endpoints.
pub struct ServerConfig<'g> {
    gerrit: &'g GerritClient,
}

impl<'g> ServerConfig<'g> {
    pub(crate) fn new(gerrit: &'g GerritClient) -> Self {
        Self { gerrit }
    }

    /// Gets the version of the Gerrit server.
    pub fn version(&self) -> Result<String, GerritError> {
        self.gerrit.get_string("/config/server/version")
    }

    /// Gets information about the server configuration.
    pub fn server_info(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/info")
    }

    /// Runs consistency checks and returns the detected problems.
    ///
    /// `input` is the ConsistencyCheckInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-config.html#consistency-check-input>
    pub fn check_consistency(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = "/config/server/check.consistency";
        self.gerrit.post_json(endpoint, input)?.into_json(endpoint)
    }

    /// Reloads the `gerrit.config` configuration and returns the
    /// applied differences.
    pub fn reload_config(&self) -> Result<Value, GerritError> {
        let endpoint = "/config/server/reload";
        self.gerrit.post_empty(endpoint)?.into_json(endpoint)
    }

    /// Confirms that the calling user owns an email address.
    ///
    /// `input` is the EmailConfirmationInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-config.html#email-confirmation-input>
    pub fn confirm_email(&self, input: &Value) -> Result<(), GerritError> {
        self.gerrit.put_json("/config/server/email.confirm", input)?;
        Ok(())
    }

    /// Retrieves a summary of the current server state.
    pub fn summary(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/summary")
    }

    /// Lists the core and plugin-owned capabilities available in the
    /// system.
    pub fn list_capabilities(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/capabilities")
    }

    /// Returns the list of additional top menu entries.
    pub fn top_menus(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/top-menus")
    }

    /// Returns the default user preferences of the server.
    pub fn default_user_preferences(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/preferences")
    }

    /// Sets the default user preferences of the server.
    ///
    /// `input` is the PreferencesInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-accounts.html#preferences-input>
    pub fn set_default_user_preferences(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = "/config/server/preferences";
        self.gerrit.put_json(endpoint, input)?.into_json(endpoint)
    }

    /// Returns the default diff preferences of the server.
    pub fn default_diff_preferences(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/preferences.diff")
    }

    /// Sets the default diff preferences of the server.
    ///
    /// `input` is the DiffPreferencesInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-accounts.html#diff-preferences-input>
    pub fn set_default_diff_preferences(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = "/config/server/preferences.diff";
        self.gerrit.put_json(endpoint, input)?.into_json(endpoint)
    }

    /// Returns the default edit preferences of the server.
    pub fn default_edit_preferences(&self) -> Result<Value, GerritError> {
        self.gerrit.get_json("/config/server/preferences.edit")
    }

    /// Sets the default edit preferences of the server.
    ///
    /// `input` is the EditPreferencesInfo entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-accounts.html#edit-preferences-input>
    pub fn set_default_edit_preferences(&self, input: &Value) -> Result<Value, GerritError> {
        let endpoint = "/config/server/preferences.edit";
        self.gerrit.put_json(endpoint, input)?.into_json(endpoint)
    }

    /// Re-indexes a set of changes.
    ///
    /// `input` is the IndexChangesInput entity,
    /// <https://gerrit-review.googlesource.com/Documentation/rest-api-config.html#index-changes-input>
    pub fn index_changes(&self, input: &Value) -> Result<(), GerritError> {
        self.gerrit.post_json("/config/server/index.changes", input)?;
        Ok(())
    }

    /// The background task queue of the server.
    pub fn tasks(&self) -> Tasks<'g> {
        Tasks::new(self.gerrit)
    }

    /// The cache registry of the server.
    pub fn caches(&self) -> Caches<'g> {
        Caches::new(self.gerrit)
    }
}
