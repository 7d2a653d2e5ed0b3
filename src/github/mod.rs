//! GitHub API client, polling, and App authentication.
//!
//! This module provides everything needed to talk to GitHub on behalf of a
//! user repository:
//!
//! - Mergeable-state polling with bounded fixed-delay retry
//! - A typed transient/terminal failure taxonomy, classified once at the
//!   boundary
//! - Per-call deadlines for an API with no native timeout support
//! - GitHub App authentication and repository-scoped installation tokens

mod app;
mod client;
mod error;
mod poll;
mod timeout;

pub use app::{is_app_installed, issue_installation_token, AppConfig, GitHubApp, GitHubAppError};
pub use client::{AppInstallationApi, OctocrabClient, PullRequestSource};
pub use error::{ApiFailure, NetworkErrorCode};
pub use poll::{fetch_pr_with_mergeable_polling, PollConfig};
pub use timeout::with_timeout;
