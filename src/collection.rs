//
//  gerrit-client
//  collection.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Cache-Coherent Ref Collections
//!
//! Branch, tag and revision-file listings behave like ordered associative
//! containers keyed by a fully-qualified ref name (`refs/heads/main`,
//! `refs/tags/v1`) or file path, backed by a single bulk fetch.
//!
//! The [`RefCollection`] trait implements the container contract once:
//! the snapshot is fetched lazily on first read, served from cache until
//! a mutation through the collection succeeds, and re-fetched in full on
//! the next read after an invalidation. There is no partial or paginated
//! state.
//!
//! ## Cache lifecycle
//!
//! ```text
//! Empty --first read--> Populated --create/delete--> Empty --read--> ...
//! ```
//!
//! ## Ownership
//!
//! Reads populate the cache, so every accessor takes `&mut self`: a
//! collection is owned by a single logical caller and is not synchronized.
//! Two units of work that mutate the same refs concurrently should each
//! use their own collection instance (the create short-circuit trusts the
//! local snapshot and cannot see another caller's writes).

use crate::error::GerritError;

/// The cached snapshot of one bulk listing.
///
/// `Empty` until first access, `Populated` after, cleared after any
/// successful mutation through the owning collection.
#[derive(Debug, Default)]
pub struct RefCache<I> {
    entries: Option<Vec<I>>,
}

impl<I> RefCache<I> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self { entries: None }
    }

    /// True once a bulk fetch has been stored and not yet invalidated.
    pub fn is_populated(&self) -> bool {
        self.entries.is_some()
    }

    /// Stores the result of a bulk fetch.
    pub fn set(&mut self, entries: Vec<I>) {
        self.entries = Some(entries);
    }

    /// The cached descriptors; empty slice when not populated.
    pub fn entries(&self) -> &[I] {
        self.entries.as_deref().unwrap_or(&[])
    }

    /// Clears the snapshot so the next read re-fetches server truth.
    pub fn invalidate(&mut self) {
        self.entries = None;
    }
}

/// The ref-keyed container contract shared by branch, tag and file
/// listings.
///
/// Implementors supply the bulk fetch ([`poll`](Self::poll)), the key
/// extractor, the required ref prefix and the cache storage; the default
/// methods provide lookup, iteration support and cache coherence.
pub trait RefCollection {
    /// Raw descriptor type held in the snapshot.
    type Info: Clone;

    /// The prefix every key must carry (`refs/heads/`, `refs/tags/`).
    /// Empty for path-keyed collections such as revision files.
    fn ref_prefix(&self) -> &'static str;

    /// Resource kind for error naming ("branch", "tag", "file").
    fn resource_kind(&self) -> &'static str;

    /// Performs the bulk listing call. Invoked once per cache generation.
    fn poll(&self) -> Result<Vec<Self::Info>, GerritError>;

    /// Extracts the fully-qualified key from one descriptor.
    fn ref_name(info: &Self::Info) -> &str;

    /// Access to the snapshot storage.
    fn cache(&mut self) -> &mut RefCache<Self::Info>;

    /// Populates the cache on first use.
    fn fill(&mut self) -> Result<(), GerritError> {
        if !self.cache().is_populated() {
            let entries = self.poll()?;
            self.cache().set(entries);
        }
        Ok(())
    }

    /// Ordered keys of the cached snapshot, fetching it if empty.
    fn keys(&mut self) -> Result<Vec<String>, GerritError> {
        self.fill()?;
        Ok(self
            .cache()
            .entries()
            .iter()
            .map(|info| Self::ref_name(info).to_string())
            .collect())
    }

    /// Number of entries in the snapshot.
    fn len(&mut self) -> Result<usize, GerritError> {
        self.fill()?;
        Ok(self.cache().entries().len())
    }

    /// True when the snapshot has no entries.
    fn is_empty(&mut self) -> Result<bool, GerritError> {
        Ok(self.len()? == 0)
    }

    /// True if the fully-qualified key exists in the snapshot.
    fn contains(&mut self, ref_name: &str) -> Result<bool, GerritError> {
        self.fill()?;
        Ok(self
            .cache()
            .entries()
            .iter()
            .any(|info| Self::ref_name(info) == ref_name))
    }

    /// Validates that a key carries the collection's required prefix.
    ///
    /// A missing prefix is a caller contract violation
    /// ([`GerritError::InvalidRef`]) and never reaches the network.
    fn check_prefix(&self, ref_name: &str) -> Result<(), GerritError> {
        let prefix = self.ref_prefix();
        if !prefix.is_empty() && !ref_name.starts_with(prefix) {
            return Err(GerritError::InvalidRef {
                kind: self.resource_kind(),
                prefix,
                name: ref_name.to_string(),
            });
        }
        Ok(())
    }

    /// Looks up one descriptor by fully-qualified key.
    ///
    /// Fails with [`GerritError::InvalidRef`] on a malformed key and
    /// [`GerritError::UnknownRef`] (naming the key) when the snapshot
    /// has no such entry.
    fn find(&mut self, ref_name: &str) -> Result<Self::Info, GerritError> {
        self.check_prefix(ref_name)?;
        self.fill()?;
        let found = self
            .cache()
            .entries()
            .iter()
            .find(|info| Self::ref_name(info) == ref_name)
            .cloned();
        found.ok_or_else(|| GerritError::UnknownRef {
            kind: self.resource_kind(),
            name: ref_name.to_string(),
        })
    }

    /// Clears the snapshot; the next read performs a fresh bulk fetch.
    fn invalidate(&mut self) {
        self.cache().invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// In-memory collection that counts bulk fetches.
    struct FakeRefs {
        rows: Vec<(String, u32)>,
        polls: Cell<u32>,
        cache: RefCache<(String, u32)>,
    }

    impl FakeRefs {
        fn new(names: &[&str]) -> Self {
            Self {
                rows: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.to_string(), i as u32))
                    .collect(),
                polls: Cell::new(0),
                cache: RefCache::new(),
            }
        }
    }

    impl RefCollection for FakeRefs {
        type Info = (String, u32);

        fn ref_prefix(&self) -> &'static str {
            "refs/heads/"
        }

        fn resource_kind(&self) -> &'static str {
            "branch"
        }

        fn poll(&self) -> Result<Vec<Self::Info>, GerritError> {
            self.polls.set(self.polls.get() + 1);
            Ok(self.rows.clone())
        }

        fn ref_name(info: &Self::Info) -> &str {
            &info.0
        }

        fn cache(&mut self) -> &mut RefCache<Self::Info> {
            &mut self.cache
        }
    }

    #[test]
    fn test_reads_share_one_bulk_fetch() {
        let mut refs = FakeRefs::new(&["refs/heads/main", "refs/heads/stable"]);
        assert_eq!(refs.len().unwrap(), 2);
        assert!(refs.contains("refs/heads/main").unwrap());
        assert_eq!(
            refs.keys().unwrap(),
            vec!["refs/heads/main", "refs/heads/stable"]
        );
        assert_eq!(refs.polls.get(), 1);
    }

    #[test]
    fn test_invalidation_forces_refetch() {
        let mut refs = FakeRefs::new(&["refs/heads/main"]);
        refs.keys().unwrap();
        refs.invalidate();
        refs.keys().unwrap();
        assert_eq!(refs.polls.get(), 2);
    }

    #[test]
    fn test_find_requires_prefix_before_any_fetch() {
        let mut refs = FakeRefs::new(&["refs/heads/main"]);
        let err = refs.find("main").unwrap_err();
        assert!(matches!(
            err,
            GerritError::InvalidRef { kind: "branch", prefix: "refs/heads/", .. }
        ));
        // The contract violation is rejected before the bulk fetch.
        assert_eq!(refs.polls.get(), 0);
    }

    #[test]
    fn test_find_names_the_missing_ref() {
        let mut refs = FakeRefs::new(&["refs/heads/main"]);
        let err = refs.find("refs/heads/gone").unwrap_err();
        match err {
            GerritError::UnknownRef { kind, name } => {
                assert_eq!(kind, "branch");
                assert_eq!(name, "refs/heads/gone");
            }
            other => panic!("expected UnknownRef, got {other:?}"),
        }
    }
}
