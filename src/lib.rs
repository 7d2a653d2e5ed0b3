//! GitHub API core for the GatewayZ task manager.
//!
//! This library provides the GitHub-facing pieces GatewayZ needs when it acts
//! on a user's repository: fetching pull requests and waiting for GitHub's
//! asynchronous mergeability computation to converge, and authenticating as a
//! GitHub App to mint repository-scoped installation tokens.

pub mod github;
pub mod types;
