//! Accumulated deletion results.
//!
//! Results from every deletion in a session are merged into four lists.
//! Merging is pure: each function takes the previous list and the new items
//! and returns a fresh list, so merging the same report twice is the same as
//! merging it once.

use std::collections::{HashMap, HashSet};

use pms_admin_core::{BlockedManager, Reportee, UserKey, UserRecord};
use serde::Serialize;

use crate::pms::DeletionReport;

/// Union of user records by [`UserKey`], first occurrence wins, order kept.
#[must_use]
pub fn merge_unique_users(prev: &[UserRecord], next: &[UserRecord]) -> Vec<UserRecord> {
    let mut seen: HashSet<UserKey> = HashSet::new();
    prev.iter()
        .chain(next)
        .filter(|user| seen.insert(user.key()))
        .cloned()
        .collect()
}

/// Case-insensitive union of identifier strings.
///
/// The first casing seen is kept and empty strings are dropped.
#[must_use]
pub fn merge_unique_identifiers(prev: &[String], next: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    prev.iter()
        .chain(next)
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .cloned()
        .collect()
}

/// Union of blocked managers by key; a manager seen twice gets the union of
/// both reportee lists.
#[must_use]
pub fn merge_unique_managers(
    prev: &[BlockedManager],
    next: &[BlockedManager],
) -> Vec<BlockedManager> {
    let mut out: Vec<BlockedManager> = Vec::new();
    let mut index: HashMap<UserKey, usize> = HashMap::new();

    for manager in prev.iter().chain(next) {
        if let Some(existing) = index.get(&manager.key()).and_then(|&i| out.get_mut(i)) {
            existing.reportees = merge_reportees(&existing.reportees, &manager.reportees);
        } else {
            index.insert(manager.key(), out.len());
            out.push(BlockedManager {
                user: manager.user.clone(),
                reportees: merge_reportees(&[], &manager.reportees),
            });
        }
    }

    out
}

fn merge_reportees(prev: &[Reportee], next: &[Reportee]) -> Vec<Reportee> {
    merge_unique_users(prev, next)
}

/// The four result lists shown after deletions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionResults {
    pub deleted: Vec<UserRecord>,
    pub skipped: Vec<UserRecord>,
    pub not_found: Vec<String>,
    pub blocked_managers: Vec<BlockedManager>,
}

impl DeletionResults {
    /// New results with `report` merged in. `self` is left untouched.
    #[must_use]
    pub fn merge(&self, report: &DeletionReport) -> Self {
        Self {
            deleted: merge_unique_users(&self.deleted, &report.deleted),
            skipped: merge_unique_users(&self.skipped, &report.skipped),
            not_found: merge_unique_identifiers(&self.not_found, &report.not_found),
            blocked_managers: merge_unique_managers(
                &self.blocked_managers,
                &report.blocked_managers,
            ),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
            && self.skipped.is_empty()
            && self.not_found.is_empty()
            && self.blocked_managers.is_empty()
    }
}
