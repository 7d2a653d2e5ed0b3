//! Pull request snapshot types.
//!
//! A [`PrSnapshot`] is the externally-fetched representation of a pull request
//! at a point in time. Snapshots are never mutated; each poll attempt fetches
//! a fresh one that supersedes the last.

use serde::{Deserialize, Serialize};

use super::ids::{PrNumber, Sha};

/// GitHub's merge state for a pull request.
///
/// This mirrors the REST API's `mergeable_state` field. GitHub computes it
/// asynchronously after a PR's head changes, so the field may be absent on a
/// fetch issued right after a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeableState {
    /// All requirements satisfied - proceed with merge.
    Clean,

    /// Non-required checks failing - can still proceed.
    Unstable,

    /// Required checks not passing or missing approvals - wait.
    Blocked,

    /// Head branch behind base (strict mode) - needs update.
    Behind,

    /// Merge conflicts exist.
    Dirty,

    /// State not yet settled by GitHub - re-check later.
    Unknown,

    /// PR is a draft - wait for it to be marked ready for review.
    Draft,

    /// Repository has pre-receive hooks or a merge queue enabled.
    HasHooks,
}

impl MergeableState {
    /// Returns true if the PR is ready to merge (Clean or Unstable).
    pub fn is_mergeable(&self) -> bool {
        matches!(self, MergeableState::Clean | MergeableState::Unstable)
    }

    /// Returns true if the PR has a permanent issue requiring human intervention.
    ///
    /// These conditions cannot auto-resolve:
    /// - `Dirty`: Merge conflicts exist
    /// - `HasHooks`: Repository has merge hooks or merge queue
    pub fn is_permanent_failure(&self) -> bool {
        matches!(self, MergeableState::Dirty | MergeableState::HasHooks)
    }
}

/// A pull request as fetched from the GitHub API at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    /// The PR number.
    pub number: PrNumber,

    /// The current head SHA.
    pub head_sha: Sha,

    /// The head branch name.
    pub head_ref: String,

    /// The base branch the PR targets.
    pub base_ref: String,

    /// Whether the PR can be merged without conflicts.
    ///
    /// `None` while GitHub's merge computation is still running.
    pub mergeable: Option<bool>,

    /// GitHub's computed merge state.
    ///
    /// `None` while GitHub's merge computation is still running.
    pub mergeable_state: Option<MergeableState>,
}

impl PrSnapshot {
    /// Returns true while GitHub has not finished computing mergeability.
    ///
    /// Pending means both mergeability fields are absent. A snapshot with
    /// either field populated has converged and is safe to act on.
    pub fn merge_state_pending(&self) -> bool {
        self.mergeable.is_none() && self.mergeable_state.is_none()
    }
}
